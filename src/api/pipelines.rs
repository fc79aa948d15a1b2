// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! Hiring pipelines. Employers manage them with their session; candidates
//! reach a single pipeline through its shareable token instead.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::{Endpoint, Request};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Stage {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub order: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineCandidate {
    pub id: String,
    pub name: String,
    pub email: String,
    pub stage_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub job_id: Option<String>,
    /// Shareable token for candidate access.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub stages: Vec<Stage>,
    #[serde(default)]
    pub candidates: Vec<PipelineCandidate>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PipelineList {
    pub pipelines: Vec<Pipeline>,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    /// Stage names in order.
    pub stages: Vec<String>,
}

pub struct ListPipelines;

impl Endpoint for ListPipelines {
    type Response = PipelineList;

    fn into_request(self) -> Result<Request> {
        Ok(Request::get(&["pipelines"]))
    }
}

pub struct CreatePipeline(pub PipelineDraft);

impl Endpoint for CreatePipeline {
    type Response = Pipeline;

    fn into_request(self) -> Result<Request> {
        Request::post(&["pipelines"]).with_json(&self.0)
    }
}

pub struct GetPipeline {
    pub id: String,
}

impl Endpoint for GetPipeline {
    type Response = Pipeline;

    fn into_request(self) -> Result<Request> {
        Ok(Request::get(&["pipelines", &self.id]))
    }
}

pub struct MoveCandidate {
    pub pipeline_id: String,
    pub candidate_id: String,
    pub stage_id: String,
}

impl Endpoint for MoveCandidate {
    type Response = PipelineCandidate;

    fn into_request(self) -> Result<Request> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            stage_id: &'a str,
        }

        Request::put(&[
            "pipelines",
            &self.pipeline_id,
            "candidates",
            &self.candidate_id,
        ])
        .with_json(&Body {
            stage_id: &self.stage_id,
        })
    }
}

/// What a candidate sees when opening a shared pipeline link.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicPipeline {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub stages: Vec<Stage>,
    #[serde(default)]
    pub current_stage: Option<String>,
}

pub struct GetPipelineByToken {
    pub token: String,
}

impl Endpoint for GetPipelineByToken {
    type Response = PublicPipeline;

    fn into_request(self) -> Result<Request> {
        Ok(Request::get(&["pipelines", "token", &self.token]))
    }
}

pub struct SubmitPipelineStage {
    pub token: String,
    pub stage_id: String,
    pub responses: BTreeMap<String, String>,
}

impl Endpoint for SubmitPipelineStage {
    type Response = PublicPipeline;

    fn into_request(self) -> Result<Request> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            stage_id: &'a str,
            responses: &'a BTreeMap<String, String>,
        }

        Request::post(&["pipelines", "token", &self.token, "submit"]).with_json(&Body {
            stage_id: &self.stage_id,
            responses: &self.responses,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn token_flow_is_keyed_by_pipeline_token() -> Result<()> {
        let req = SubmitPipelineStage {
            token: "share-abc".to_owned(),
            stage_id: "s2".to_owned(),
            responses: BTreeMap::from([("portfolio".to_owned(), "https://x.test".to_owned())]),
        }
        .into_request()?;

        assert_eq!(req.path(), "pipelines/token/share-abc/submit");
        assert_eq!(
            req.json(),
            Some(&json!({
                "stageId": "s2",
                "responses": {"portfolio": "https://x.test"},
            }))
        );
        Ok(())
    }

    #[test]
    fn move_candidate_puts_stage() -> Result<()> {
        let req = MoveCandidate {
            pipeline_id: "p1".to_owned(),
            candidate_id: "c4".to_owned(),
            stage_id: "s3".to_owned(),
        }
        .into_request()?;

        assert_eq!(*req.method(), reqwest::Method::PUT);
        assert_eq!(req.path(), "pipelines/p1/candidates/c4");
        assert_eq!(req.json(), Some(&json!({"stageId": "s3"})));
        Ok(())
    }
}
