// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::error::Result;

use super::{jobs::display_optional, Endpoint, Ignored, Request};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Proposal,
    Won,
    Lost,
}

impl LeadStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Contacted => "CONTACTED",
            Self::Qualified => "QUALIFIED",
            Self::Proposal => "PROPOSAL",
            Self::Won => "WON",
            Self::Lost => "LOST",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Company")]
    pub company_name: String,
    #[tabled(rename = "Contact")]
    pub contact_name: String,
    #[tabled(rename = "Email")]
    pub email: String,
    #[tabled(skip)]
    #[serde(default)]
    pub phone: Option<String>,
    #[tabled(rename = "Status")]
    pub status: LeadStatus,
    #[tabled(rename = "Value", display_with = "Self::format_value")]
    #[serde(default)]
    pub value: Option<f64>,
    #[tabled(skip)]
    #[serde(default)]
    pub notes: Option<String>,
}

impl Lead {
    fn format_value(value: &Option<f64>) -> String {
        value.map(|v| format!("{v:.2}")).unwrap_or_default()
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct LeadList {
    pub leads: Vec<Lead>,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadDraft {
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LeadStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Default)]
pub struct ListLeads {
    pub status: Option<LeadStatus>,
    pub search: Option<String>,
}

impl Endpoint for ListLeads {
    type Response = LeadList;

    fn into_request(self) -> Result<Request> {
        Ok(Request::get(&["crm", "leads"])
            .with_query("status", self.status)
            .with_query("search", self.search))
    }
}

pub struct CreateLead(pub LeadDraft);

impl Endpoint for CreateLead {
    type Response = Lead;

    fn into_request(self) -> Result<Request> {
        Request::post(&["crm", "leads"]).with_json(&self.0)
    }
}

pub struct UpdateLead {
    pub id: String,
    pub draft: LeadDraft,
}

impl Endpoint for UpdateLead {
    type Response = Lead;

    fn into_request(self) -> Result<Request> {
        Request::put(&["crm", "leads", &self.id]).with_json(&self.draft)
    }
}

pub struct DeleteLead {
    pub id: String,
}

impl Endpoint for DeleteLead {
    type Response = Ignored;

    fn into_request(self) -> Result<Request> {
        Ok(Request::delete(&["crm", "leads", &self.id]))
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Email", display_with = "display_optional")]
    #[serde(default)]
    pub email: Option<String>,
    #[tabled(rename = "Type", display_with = "display_optional")]
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[tabled(skip)]
    #[serde(default)]
    pub commission_rate: Option<f64>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PartnerList {
    pub partners: Vec<Partner>,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission_rate: Option<f64>,
}

pub struct ListPartners;

impl Endpoint for ListPartners {
    type Response = PartnerList;

    fn into_request(self) -> Result<Request> {
        Ok(Request::get(&["crm", "partners"]))
    }
}

pub struct CreatePartner(pub PartnerDraft);

impl Endpoint for CreatePartner {
    type Response = Partner;

    fn into_request(self) -> Result<Request> {
        Request::post(&["crm", "partners"]).with_json(&self.0)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    #[serde(default)]
    pub total_leads: u64,
    #[serde(default)]
    pub by_status: BTreeMap<String, u64>,
    #[serde(default)]
    pub pipeline_value: f64,
    #[serde(default)]
    pub conversion_rate: Option<f64>,
}

pub struct CrmStats;

impl Endpoint for CrmStats {
    type Response = Stats;

    fn into_request(self) -> Result<Request> {
        Ok(Request::get(&["crm", "stats"]))
    }
}
