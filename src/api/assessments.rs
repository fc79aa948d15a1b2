// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::{Endpoint, Ignored, Request};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionKind {
    MultipleChoice,
    Text,
    Code,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub points: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub job_id: Option<String>,
    /// Minutes.
    #[serde(default)]
    pub time_limit: Option<u32>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AssessmentList {
    pub assessments: Vec<Assessment>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u32>,
    pub questions: Vec<QuestionDraft>,
}

pub struct ListAssessments;

impl Endpoint for ListAssessments {
    type Response = AssessmentList;

    fn into_request(self) -> Result<Request> {
        Ok(Request::get(&["assessments"]))
    }
}

pub struct GetAssessment {
    pub id: String,
}

impl Endpoint for GetAssessment {
    type Response = Assessment;

    fn into_request(self) -> Result<Request> {
        Ok(Request::get(&["assessments", &self.id]))
    }
}

pub struct CreateAssessment(pub AssessmentDraft);

impl Endpoint for CreateAssessment {
    type Response = Assessment;

    fn into_request(self) -> Result<Request> {
        Request::post(&["assessments"]).with_json(&self.0)
    }
}

pub struct UpdateAssessment {
    pub id: String,
    pub draft: AssessmentDraft,
}

impl Endpoint for UpdateAssessment {
    type Response = Assessment;

    fn into_request(self) -> Result<Request> {
        Request::put(&["assessments", &self.id]).with_json(&self.draft)
    }
}

pub struct DeleteAssessment {
    pub id: String,
}

impl Endpoint for DeleteAssessment {
    type Response = Ignored;

    fn into_request(self) -> Result<Request> {
        Ok(Request::delete(&["assessments", &self.id]))
    }
}

/// Opens an assessment from the link a candidate was sent. The link token
/// identifies the candidate, so no session is needed.
pub struct TakeAssessment {
    pub token: String,
}

impl Endpoint for TakeAssessment {
    type Response = Assessment;

    fn into_request(self) -> Result<Request> {
        Ok(Request::get(&["assessments", "take", &self.token]))
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    pub value: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub message: Option<String>,
}

pub struct SubmitAssessment {
    pub token: String,
    pub answers: Vec<Answer>,
}

impl Endpoint for SubmitAssessment {
    type Response = Submission;

    fn into_request(self) -> Result<Request> {
        #[derive(Serialize)]
        struct Body<'a> {
            answers: &'a [Answer],
        }

        Request::post(&["assessments", "take", &self.token, "submit"]).with_json(&Body {
            answers: &self.answers,
        })
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub id: String,
    pub candidate_email: String,
    #[serde(default)]
    pub candidate_name: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub submitted_at: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AssessmentResults {
    pub results: Vec<AssessmentResult>,
}

pub struct GetAssessmentResults {
    pub id: String,
}

impl Endpoint for GetAssessmentResults {
    type Response = AssessmentResults;

    fn into_request(self) -> Result<Request> {
        Ok(Request::get(&["assessments", &self.id, "results"]))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn submit_wraps_answers() -> Result<()> {
        let req = SubmitAssessment {
            token: "invite-1".to_owned(),
            answers: vec![Answer {
                question_id: "q1".to_owned(),
                value: "B".to_owned(),
            }],
        }
        .into_request()?;

        assert_eq!(req.path(), "assessments/take/invite-1/submit");
        assert_eq!(
            req.json(),
            Some(&json!({"answers": [{"questionId": "q1", "value": "B"}]}))
        );
        Ok(())
    }

    #[test]
    fn assessment_decodes_questions() -> Result<()> {
        let assessment: Assessment = serde_json::from_value(json!({
            "id": "a1",
            "title": "Rust basics",
            "timeLimit": 30,
            "questions": [
                {"id": "q1", "text": "Pick one", "type": "MULTIPLE_CHOICE", "options": ["A", "B"]},
                {"id": "q2", "text": "Explain borrowing", "type": "TEXT"},
            ],
        }))?;

        assert_eq!(assessment.time_limit, Some(30));
        assert_eq!(assessment.questions[0].kind, QuestionKind::MultipleChoice);
        assert!(assessment.questions[1].options.is_empty());
        Ok(())
    }

    #[test]
    fn results_live_under_the_assessment() -> Result<()> {
        let req = GetAssessmentResults {
            id: "a1".to_owned(),
        }
        .into_request()?;
        assert_eq!(*req.method(), reqwest::Method::GET);
        assert_eq!(req.path(), "assessments/a1/results");
        Ok(())
    }
}
