// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::api::expose_secret;

/// What survives a restart: the bearer token and nothing else. The profile is
/// always fetched again.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Data {
    #[serde(serialize_with = "expose_secret")]
    token: SecretString,
}

impl Data {
    pub const fn new(token: SecretString) -> Self {
        Self { token }
    }

    pub const fn token(&self) -> &SecretString {
        &self.token
    }

    pub fn into_token(self) -> SecretString {
        self.token
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret as _;
    use serde_test::{assert_ser_tokens, Token};

    use super::*;

    #[test]
    fn stored_under_token_key() {
        assert_ser_tokens(
            &Data::new(SecretString::new("T1".to_owned())),
            &[
                Token::Struct {
                    name: "Data",
                    len: 1,
                },
                Token::Str(crate::metadata::TOKEN_STORAGE_KEY),
                Token::Str("T1"),
                Token::StructEnd,
            ],
        );
    }

    #[test]
    fn reads_back_from_json() -> crate::error::Result<()> {
        let data: Data = serde_json::from_str(r#"{"token":"T2"}"#)?;
        assert_eq!(data.token().expose_secret(), "T2");
        Ok(())
    }
}
