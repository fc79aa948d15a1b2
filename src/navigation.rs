// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! Where the front end should send the user after a session change.

use std::{fmt, sync::Mutex};

use log::info;
use url::Url;

use crate::api::auth::Role;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    /// The public landing page.
    Landing,
    Login,
    Dashboard,
    CandidateDashboard,
}

impl Destination {
    /// Candidates get their own view; every other role shares the dashboard.
    pub fn for_role(role: &Role) -> Self {
        if role.is_candidate() {
            Self::CandidateDashboard
        } else {
            Self::Dashboard
        }
    }

    pub const fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::CandidateDashboard => "/candidate/dashboard",
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, to: Destination);
}

impl<T: Navigator + ?Sized> Navigator for Box<T> {
    fn navigate(&self, to: Destination) {
        (**self).navigate(to);
    }
}

/// Keeps every destination it was sent to.
#[derive(Default)]
pub struct Recorder {
    history: Mutex<Vec<Destination>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<Destination> {
        self.history
            .lock()
            .map(|history| history.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<Destination> {
        self.history().last().copied()
    }
}

impl Navigator for Recorder {
    fn navigate(&self, to: Destination) {
        if let Ok(mut history) = self.history.lock() {
            history.push(to);
        }
    }
}

/// Announces destinations as URLs on the web front end.
pub struct Announce {
    base: Url,
}

impl Announce {
    pub const fn new(base: Url) -> Self {
        Self { base }
    }

    pub fn url(&self, to: Destination) -> Option<Url> {
        self.base.join(to.path()).ok()
    }

    /// The line printed for `to`.
    pub fn message(&self, to: Destination) -> String {
        match self.url(to) {
            Some(url) => format!("Continue at {url}"),
            None => format!("Continue at {to}"),
        }
    }
}

/// Prints each destination on standard output as well as logging it.
impl Navigator for Announce {
    fn navigate(&self, to: Destination) {
        let message = self.message(to);
        info!("{}", message);
        println!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_land_on_their_own_view() {
        assert_eq!(
            Destination::for_role(&Role::Candidate),
            Destination::CandidateDashboard
        );
    }

    #[test]
    fn other_roles_land_on_the_dashboard() {
        for role in [
            Role::Admin,
            Role::Employer,
            Role::Recruiter,
            Role::HiringManager,
            Role::Other("AUDITOR".to_owned()),
        ] {
            assert_eq!(Destination::for_role(&role), Destination::Dashboard);
        }
    }

    #[test]
    fn recorder_keeps_order() {
        let recorder = Recorder::new();
        recorder.navigate(Destination::Login);
        recorder.navigate(Destination::Landing);

        assert_eq!(
            recorder.history(),
            vec![Destination::Login, Destination::Landing]
        );
        assert_eq!(recorder.last(), Some(Destination::Landing));
    }

    #[test]
    fn announce_resolves_against_front_end() -> Result<(), url::ParseError> {
        let announce = Announce::new(Url::parse("https://app.example.com/")?);
        assert_eq!(
            announce.url(Destination::CandidateDashboard).map(String::from),
            Some("https://app.example.com/candidate/dashboard".to_owned())
        );
        Ok(())
    }

    #[test]
    fn announce_message_names_the_url() -> Result<(), url::ParseError> {
        let announce = Announce::new(Url::parse("https://app.example.com/portal/")?);
        assert_eq!(
            announce.message(Destination::Login),
            "Continue at https://app.example.com/login"
        );
        Ok(())
    }
}
