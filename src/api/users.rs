// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::error::Result;

use super::{
    auth::{AuthResponse, Role, User},
    expose_secret,
    jobs::display_optional,
    Endpoint, Ignored, Request,
};

#[derive(Clone, Debug, Deserialize)]
pub struct UserList {
    pub users: Vec<User>,
}

/// Members of the signed-in user's company.
pub struct ListUsers;

impl Endpoint for ListUsers {
    type Response = UserList;

    fn into_request(self) -> Result<Request> {
        Ok(Request::get(&["users"]))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Expired,
    Revoked,
}

impl std::fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Expired => "Expired",
            Self::Revoked => "Revoked",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Email")]
    pub email: String,
    #[tabled(rename = "Role")]
    pub role: Role,
    #[tabled(rename = "Status")]
    pub status: InvitationStatus,
    #[tabled(rename = "Expires", display_with = "display_optional")]
    #[serde(default)]
    pub expires_at: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct InvitationList {
    pub invitations: Vec<Invitation>,
}

#[derive(Debug, Serialize)]
pub struct InviteUser {
    pub email: String,
    pub role: Role,
}

impl Endpoint for InviteUser {
    type Response = Invitation;

    fn into_request(self) -> Result<Request> {
        Request::post(&["users", "invite"]).with_json(&self)
    }
}

pub struct ListInvitations;

impl Endpoint for ListInvitations {
    type Response = InvitationList;

    fn into_request(self) -> Result<Request> {
        Ok(Request::get(&["users", "invitations"]))
    }
}

pub struct RevokeInvitation {
    pub id: String,
}

impl Endpoint for RevokeInvitation {
    type Response = Ignored;

    fn into_request(self) -> Result<Request> {
        Ok(Request::delete(&["users", "invitations", &self.id]))
    }
}

/// Joins a company through an emailed invitation link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptInvitation {
    #[serde(skip)]
    pub token: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(serialize_with = "expose_secret")]
    pub password: SecretString,
}

impl Endpoint for AcceptInvitation {
    type Response = AuthResponse;

    fn into_request(self) -> Result<Request> {
        Request::post(&["users", "invitations", &self.token, "accept"]).with_json(&self)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySettings {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
}

pub struct GetCompany;

impl Endpoint for GetCompany {
    type Response = CompanySettings;

    fn into_request(self) -> Result<Request> {
        Ok(Request::get(&["users", "company"]))
    }
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompany {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl Endpoint for UpdateCompany {
    type Response = CompanySettings;

    fn into_request(self) -> Result<Request> {
        Request::put(&["users", "company"]).with_json(&self)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn invitation_token_stays_in_path() -> Result<()> {
        let req = AcceptInvitation {
            token: "inv-7".to_owned(),
            first_name: "Katherine".to_owned(),
            last_name: "Johnson".to_owned(),
            password: SecretString::new("orbit".to_owned()),
        }
        .into_request()?;

        assert_eq!(req.path(), "users/invitations/inv-7/accept");
        assert_eq!(
            req.json(),
            Some(&json!({
                "firstName": "Katherine",
                "lastName": "Johnson",
                "password": "orbit",
            }))
        );
        Ok(())
    }

    #[test]
    fn invite_sends_role_on_the_wire() -> Result<()> {
        let req = InviteUser {
            email: "new@acme.test".to_owned(),
            role: Role::Recruiter,
        }
        .into_request()?;

        assert_eq!(
            req.json(),
            Some(&json!({"email": "new@acme.test", "role": "RECRUITER"}))
        );
        Ok(())
    }
}
