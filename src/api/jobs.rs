// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::error::Result;

use super::{auth::Company, Endpoint, Ignored, Request};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Draft,
    Active,
    Paused,
    Closed,
}

impl JobStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Active => "ACTIVE",
            Self::Paused => "PAUSED",
            Self::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(skip)]
    #[serde(default)]
    pub description: String,
    #[tabled(rename = "Location", display_with = "display_optional")]
    #[serde(default)]
    pub location: Option<String>,
    #[tabled(rename = "Type", display_with = "display_optional")]
    #[serde(default, rename = "type")]
    pub employment_type: Option<String>,
    #[tabled(rename = "Status")]
    pub status: JobStatus,
    #[tabled(rename = "Salary", display_with("Self::format_salary", self))]
    #[serde(default)]
    pub salary_min: Option<f64>,
    #[tabled(skip)]
    #[serde(default)]
    pub salary_max: Option<f64>,
    #[tabled(skip)]
    #[serde(default)]
    pub currency: Option<String>,
    #[tabled(rename = "Company", display_with = "Self::format_company")]
    #[serde(default)]
    pub company: Option<Company>,
    #[tabled(skip)]
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Job {
    fn format_company(company: &Option<Company>) -> String {
        company
            .as_ref()
            .map(|c| c.name.clone())
            .unwrap_or_default()
    }

    fn format_salary(&self) -> String {
        let currency = self.currency.as_deref().unwrap_or("USD");
        match (self.salary_min, self.salary_max) {
            (Some(min), Some(max)) => format!("{min:.0}–{max:.0} {currency}"),
            (Some(min), None) => format!("from {min:.0} {currency}"),
            (None, Some(max)) => format!("up to {max:.0} {currency}"),
            (None, None) => String::new(),
        }
    }
}

pub(crate) fn display_optional(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

#[derive(Clone, Debug, Deserialize)]
pub struct JobList {
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraft {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<f64>,
}

/// The employer's own postings.
#[derive(Debug, Default)]
pub struct ListJobs {
    pub status: Option<JobStatus>,
    pub search: Option<String>,
}

impl Endpoint for ListJobs {
    type Response = JobList;

    fn into_request(self) -> Result<Request> {
        Ok(Request::get(&["jobs"])
            .with_query("status", self.status)
            .with_query("search", self.search))
    }
}

pub struct GetJob {
    pub id: String,
}

impl Endpoint for GetJob {
    type Response = Job;

    fn into_request(self) -> Result<Request> {
        Ok(Request::get(&["jobs", &self.id]))
    }
}

pub struct CreateJob(pub JobDraft);

impl Endpoint for CreateJob {
    type Response = Job;

    fn into_request(self) -> Result<Request> {
        Request::post(&["jobs"]).with_json(&self.0)
    }
}

pub struct UpdateJob {
    pub id: String,
    pub draft: JobDraft,
}

impl Endpoint for UpdateJob {
    type Response = Job;

    fn into_request(self) -> Result<Request> {
        Request::put(&["jobs", &self.id]).with_json(&self.draft)
    }
}

pub struct DeleteJob {
    pub id: String,
}

impl Endpoint for DeleteJob {
    type Response = Ignored;

    fn into_request(self) -> Result<Request> {
        Ok(Request::delete(&["jobs", &self.id]))
    }
}

/// The public job board. Needs no session.
#[derive(Debug, Default)]
pub struct ListPublicJobs {
    pub search: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
}

impl Endpoint for ListPublicJobs {
    type Response = JobList;

    fn into_request(self) -> Result<Request> {
        Ok(Request::get(&["jobs", "public"])
            .with_query("search", self.search)
            .with_query("location", self.location)
            .with_query("company", self.company))
    }
}

pub struct GetPublicJob {
    pub id: String,
}

impl Endpoint for GetPublicJob {
    type Response = Job;

    fn into_request(self) -> Result<Request> {
        Ok(Request::get(&["jobs", "public", &self.id]))
    }
}

#[derive(Clone, Debug)]
pub struct Resume {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, Default)]
pub struct Application {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub cover_letter: Option<String>,
    pub resume: Option<Resume>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ApplicationReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub application: Option<ApplicationSummary>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ApplicationSummary {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Candidates apply with a multipart form so a résumé can ride along.
pub struct Apply {
    pub job_id: String,
    pub application: Application,
}

impl Endpoint for Apply {
    type Response = ApplicationReceipt;

    fn into_request(self) -> Result<Request> {
        let Application {
            first_name,
            last_name,
            email,
            phone,
            cover_letter,
            resume,
        } = self.application;

        let mut form = Form::new()
            .text("firstName", first_name)
            .text("lastName", last_name)
            .text("email", email);
        if let Some(phone) = phone {
            form = form.text("phone", phone);
        }
        if let Some(cover_letter) = cover_letter {
            form = form.text("coverLetter", cover_letter);
        }
        if let Some(resume) = resume {
            form = form.part(
                "resume",
                Part::bytes(resume.bytes)
                    .file_name(resume.file_name)
                    .mime_str(&resume.content_type)?,
            );
        }

        Ok(Request::post(&["jobs", &self.job_id, "apply"]).with_multipart(form))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{super::Payload, *};

    #[test]
    fn list_filters_become_query() -> Result<()> {
        let req = ListJobs {
            status: Some(JobStatus::Active),
            search: Some("rust".to_owned()),
        }
        .into_request()?;

        assert_eq!(req.path(), "jobs");
        assert_eq!(
            req.query(),
            &[
                ("status".to_owned(), "ACTIVE".to_owned()),
                ("search".to_owned(), "rust".to_owned()),
            ]
        );
        Ok(())
    }

    #[test]
    fn job_decodes_with_sparse_fields() -> Result<()> {
        let job: Job = serde_json::from_value(json!({
            "id": "j1",
            "title": "Backend Engineer",
            "status": "ACTIVE",
            "type": "FULL_TIME",
            "salaryMin": 90000,
        }))?;

        assert_eq!(job.employment_type.as_deref(), Some("FULL_TIME"));
        assert_eq!(job.description, "");
        assert_eq!(job.format_salary(), "from 90000 USD");
        Ok(())
    }

    #[test]
    fn apply_is_multipart() -> Result<()> {
        let req = Apply {
            job_id: "j1".to_owned(),
            application: Application {
                first_name: "Grace".to_owned(),
                last_name: "Hopper".to_owned(),
                email: "grace@example.com".to_owned(),
                resume: Some(Resume {
                    file_name: "cv.pdf".to_owned(),
                    content_type: "application/pdf".to_owned(),
                    bytes: b"%PDF".to_vec(),
                }),
                ..Application::default()
            },
        }
        .into_request()?;

        assert_eq!(*req.method(), reqwest::Method::POST);
        assert_eq!(req.path(), "jobs/j1/apply");
        assert!(matches!(req.payload(), Payload::Multipart(_)));
        Ok(())
    }

    #[test]
    fn draft_serializes_type_field() -> Result<()> {
        let req = CreateJob(JobDraft {
            title: "SRE".to_owned(),
            description: "Keep it up".to_owned(),
            employment_type: Some("CONTRACT".to_owned()),
            status: Some(JobStatus::Draft),
            ..JobDraft::default()
        })
        .into_request()?;

        assert_eq!(
            req.json(),
            Some(&json!({
                "title": "SRE",
                "description": "Keep it up",
                "type": "CONTRACT",
                "status": "DRAFT",
            }))
        );
        Ok(())
    }
}
