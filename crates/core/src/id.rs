//! Strongly-typed identifiers.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Identifier of an authenticated user, as issued by the identity provider.
///
/// Providers hand out opaque strings (not necessarily UUIDs), so the only
/// constraint enforced here is that the value is non-empty and free of
/// whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    pub fn parse(value: impl Into<String>) -> ClientResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(ClientError::invalid_id("UserId: empty"));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(ClientError::invalid_id(format!(
                "UserId: contains whitespace: {value:?}"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for UserId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for UserId {
    type Err = ClientError;

    fn from_str(s: &str) -> ClientResult<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for UserId {
    type Error = ClientError;

    fn try_from(value: String) -> ClientResult<Self> {
        Self::parse(value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}
