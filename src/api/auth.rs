// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{convert::Infallible, fmt, str::FromStr};

use inflector::Inflector as _;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::error::Result;

use super::{expose_secret, Endpoint, Ignored, Request};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Employer,
    Recruiter,
    HiringManager,
    Candidate,
    /// A role this client does not know about yet.
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "ADMIN",
            Self::Employer => "EMPLOYER",
            Self::Recruiter => "RECRUITER",
            Self::HiringManager => "HIRING_MANAGER",
            Self::Candidate => "CANDIDATE",
            Self::Other(role) => role,
        }
    }

    pub const fn is_candidate(&self) -> bool {
        matches!(self, Self::Candidate)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.to_uppercase().as_str() {
            "ADMIN" => Self::Admin,
            "EMPLOYER" => Self::Employer,
            "RECRUITER" => Self::Recruiter,
            "HIRING_MANAGER" => Self::HiringManager,
            "CANDIDATE" => Self::Candidate,
            _ => Self::Other(value),
        }
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        match value {
            Role::Other(role) => role,
            Role::Admin
            | Role::Employer
            | Role::Recruiter
            | Role::HiringManager
            | Role::Candidate => value.as_str().to_owned(),
        }
    }
}

impl FromStr for Role {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.replace('-', "_").into())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str().to_lowercase().to_title_case())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Company {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Email")]
    pub email: String,
    #[tabled(rename = "First Name")]
    pub first_name: String,
    #[tabled(rename = "Last Name")]
    pub last_name: String,
    #[tabled(rename = "Role")]
    pub role: Role,
    #[tabled(rename = "Company", display_with = "Self::format_company")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
}

impl User {
    fn format_company(company: &Option<Company>) -> String {
        company
            .as_ref()
            .map(|c| c.name.clone())
            .unwrap_or_default()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// `/auth/me` and `/auth/profile` answer either with the bare profile or with
/// the profile under a `user` key.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum UserEnvelope {
    Wrapped { user: User },
    Bare(User),
}

impl From<UserEnvelope> for User {
    fn from(value: UserEnvelope) -> Self {
        match value {
            UserEnvelope::Wrapped { user } | UserEnvelope::Bare(user) => user,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct AuthResponse {
    pub token: SecretString,
    pub user: User,
}

pub struct Me;

impl Endpoint for Me {
    type Response = UserEnvelope;

    fn into_request(self) -> Result<Request> {
        Ok(Request::get(&["auth", "me"]))
    }
}

#[derive(Debug, Serialize)]
pub struct Login {
    pub email: String,
    #[serde(serialize_with = "expose_secret")]
    pub password: SecretString,
}

impl Login {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_owned(),
            password: SecretString::new(password.to_owned()),
        }
    }
}

impl Endpoint for Login {
    type Response = AuthResponse;

    fn into_request(self) -> Result<Request> {
        Request::post(&["auth", "login"]).with_json(&self)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Register {
    pub email: String,
    #[serde(serialize_with = "expose_secret")]
    pub password: SecretString,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

impl Endpoint for Register {
    type Response = AuthResponse;

    fn into_request(self) -> Result<Request> {
        Request::post(&["auth", "register"]).with_json(&self)
    }
}

/// Tells the backend the session is over. Local logout does not depend on it.
pub struct Logout;

impl Endpoint for Logout {
    type Response = Ignored;

    fn into_request(self) -> Result<Request> {
        Ok(Request::post(&["auth", "logout"]))
    }
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Endpoint for UpdateProfile {
    type Response = UserEnvelope;

    fn into_request(self) -> Result<Request> {
        Request::put(&["auth", "profile"]).with_json(&self)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use serde_test::{assert_tokens, Token};

    use super::*;

    #[test]
    fn role_wire_format() {
        assert_tokens(&Role::HiringManager, &[Token::Str("HIRING_MANAGER")]);
        assert_tokens(&Role::Other("AUDITOR".to_owned()), &[Token::Str("AUDITOR")]);
    }

    #[test]
    fn role_display_and_parse() {
        assert_eq!(Role::HiringManager.to_string(), "Hiring Manager");
        assert_eq!("hiring-manager".parse::<Role>(), Ok(Role::HiringManager));
        assert_eq!("candidate".parse::<Role>(), Ok(Role::Candidate));
    }

    #[test]
    fn profile_accepts_both_envelopes() -> Result<()> {
        let profile = json!({
            "id": "1",
            "email": "a@b.com",
            "firstName": "Ada",
            "lastName": "Byron",
            "role": "EMPLOYER",
            "company": {"id": "c1", "name": "Acme"},
        });

        let wrapped: UserEnvelope = serde_json::from_value(json!({"user": profile.clone()}))?;
        let bare: UserEnvelope = serde_json::from_value(profile)?;
        assert_eq!(User::from(wrapped.clone()), User::from(bare));

        let user = User::from(wrapped);
        assert_eq!(user.role, Role::Employer);
        assert_eq!(user.full_name(), "Ada Byron");
        assert_eq!(user.company.map(|c| c.name).as_deref(), Some("Acme"));
        Ok(())
    }

    #[test]
    fn register_omits_absent_company() -> Result<()> {
        let req = Register {
            email: "c@d.com".to_owned(),
            password: SecretString::new("pw".to_owned()),
            first_name: "Grace".to_owned(),
            last_name: "Hopper".to_owned(),
            role: Role::Candidate,
            company_name: None,
        }
        .into_request()?;

        assert_eq!(*req.method(), reqwest::Method::POST);
        assert_eq!(req.path(), "auth/register");
        assert_eq!(
            req.json(),
            Some(&json!({
                "email": "c@d.com",
                "password": "pw",
                "firstName": "Grace",
                "lastName": "Hopper",
                "role": "CANDIDATE",
            }))
        );
        Ok(())
    }

    #[test]
    fn profile_update_sends_only_changes() -> Result<()> {
        let req = UpdateProfile {
            last_name: Some("Lovelace".to_owned()),
            ..UpdateProfile::default()
        }
        .into_request()?;

        assert_eq!(*req.method(), reqwest::Method::PUT);
        assert_eq!(req.path(), "auth/profile");
        assert_eq!(req.json(), Some(&json!({"lastName": "Lovelace"})));
        Ok(())
    }
}
