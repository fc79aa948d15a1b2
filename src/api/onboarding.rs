// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::{Endpoint, Ignored, Request};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub estimated_minutes: Option<u32>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ModuleList {
    pub modules: Vec<Module>,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<u32>,
}

pub struct ListModules;

impl Endpoint for ListModules {
    type Response = ModuleList;

    fn into_request(self) -> Result<Request> {
        Ok(Request::get(&["onboarding", "modules"]))
    }
}

pub struct CreateModule(pub ModuleDraft);

impl Endpoint for CreateModule {
    type Response = Module;

    fn into_request(self) -> Result<Request> {
        Request::post(&["onboarding", "modules"]).with_json(&self.0)
    }
}

pub struct UpdateModule {
    pub id: String,
    pub draft: ModuleDraft,
}

impl Endpoint for UpdateModule {
    type Response = Module;

    fn into_request(self) -> Result<Request> {
        Request::put(&["onboarding", "modules", &self.id]).with_json(&self.draft)
    }
}

pub struct DeleteModule {
    pub id: String,
}

impl Endpoint for DeleteModule {
    type Response = Ignored;

    fn into_request(self) -> Result<Request> {
        Ok(Request::delete(&["onboarding", "modules", &self.id]))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleProgress {
    pub module_id: String,
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ProgressList {
    pub progress: Vec<ModuleProgress>,
}

/// The signed-in employee's progress through every module.
pub struct Progress;

impl Endpoint for Progress {
    type Response = ProgressList;

    fn into_request(self) -> Result<Request> {
        Ok(Request::get(&["onboarding", "progress"]))
    }
}

pub struct CompleteModule {
    pub id: String,
}

impl Endpoint for CompleteModule {
    type Response = ModuleProgress;

    fn into_request(self) -> Result<Request> {
        Ok(Request::post(&["onboarding", "modules", &self.id, "complete"]))
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    #[serde(default)]
    pub total_modules: u32,
    #[serde(default)]
    pub completed_modules: u32,
    #[serde(default)]
    pub total_employees: Option<u32>,
    #[serde(default)]
    pub completion_rate: f64,
}

pub struct OnboardingDashboard;

impl Endpoint for OnboardingDashboard {
    type Response = Dashboard;

    fn into_request(self) -> Result<Request> {
        Ok(Request::get(&["onboarding", "dashboard"]))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn completion_posts_without_body() -> Result<()> {
        let req = CompleteModule {
            id: "m3".to_owned(),
        }
        .into_request()?;

        assert_eq!(*req.method(), reqwest::Method::POST);
        assert_eq!(req.path(), "onboarding/modules/m3/complete");
        assert!(req.json().is_none());
        Ok(())
    }

    #[test]
    fn modules_default_their_order() -> Result<()> {
        let list: ModuleList = serde_json::from_value(json!({
            "modules": [{"id": "m1", "title": "Welcome"}],
        }))?;

        assert_eq!(list.modules[0].order, 0);
        assert_eq!(list.modules[0].content, None);
        Ok(())
    }
}
