// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::{Endpoint, Request};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Easy => "EASY",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    #[serde(default)]
    pub total_questions: u64,
    #[serde(default)]
    pub total_categories: u64,
    #[serde(default)]
    pub by_difficulty: BTreeMap<String, u64>,
}

pub struct QuestionBankStats;

impl Endpoint for QuestionBankStats {
    type Response = Stats;

    fn into_request(self) -> Result<Request> {
        Ok(Request::get(&["question-banks", "stats"]))
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankQuestion {
    pub id: String,
    pub text: String,
    pub category: String,
    pub difficulty: Difficulty,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct QuestionList {
    pub questions: Vec<BankQuestion>,
}

#[derive(Debug, Default)]
pub struct ListQuestions {
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
}

impl Endpoint for ListQuestions {
    type Response = QuestionList;

    fn into_request(self) -> Result<Request> {
        Ok(Request::get(&["question-banks", "questions"])
            .with_query("category", self.category)
            .with_query("difficulty", self.difficulty))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub count: u64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CategoryList {
    pub categories: Vec<Category>,
}

pub struct ListCategories;

impl Endpoint for ListCategories {
    type Response = CategoryList;

    fn into_request(self) -> Result<Request> {
        Ok(Request::get(&["question-banks", "categories"]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn questions_filter_by_category_and_difficulty() -> Result<()> {
        let req = ListQuestions {
            category: Some("systems".to_owned()),
            difficulty: Some(Difficulty::Hard),
        }
        .into_request()?;

        assert_eq!(req.path(), "question-banks/questions");
        assert_eq!(
            req.query(),
            &[
                ("category".to_owned(), "systems".to_owned()),
                ("difficulty".to_owned(), "HARD".to_owned()),
            ]
        );
        Ok(())
    }
}
