//! Strongly-typed identifiers. Use these instead of raw strings.
//! Group ids and addresses are opaque; invite codes compare case-insensitively.

use crate::error::JamaeyaError;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const INVITE_CODE_LEN: usize = 8;
const ADDRESS_BYTES: usize = 20;

fn validate_non_empty(kind: &str, s: &str) -> Result<String, JamaeyaError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(JamaeyaError::validation(format!("{} must not be empty", kind)));
    }
    Ok(trimmed.to_string())
}

/// Group ID. Fixture groups use readable ids (`demo123`); new groups get a UUID.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupId(String);

/// Shareable join token. Stored as entered, compared case-insensitively.
#[derive(Clone, Debug)]
pub struct InviteCode(String);

/// Caller identity: a wallet address (`0x` + 40 hex) or a placeholder such as `user_address`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Address(String);

macro_rules! id_serde {
    ($name:ident) => {
        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
                ser.serialize_str(&self.0)
            }
        }
        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
                let s = String::deserialize(de)?;
                Self::from_str(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}
id_serde!(GroupId);
id_serde!(InviteCode);
id_serde!(Address);

macro_rules! id_type {
    ($name:ident, $kind:literal) => {
        impl $name {
            pub fn parse(s: impl AsRef<str>) -> Result<Self, JamaeyaError> {
                Self::from_str(s.as_ref())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }
        impl FromStr for $name {
            type Err = JamaeyaError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(validate_non_empty($kind, s)?))
            }
        }
        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}
id_type!(GroupId, "group id");
id_type!(InviteCode, "invite code");
id_type!(Address, "address");

impl GroupId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl InviteCode {
    pub fn generate() -> Self {
        let code: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(INVITE_CODE_LEN)
            .map(|b| (b as char).to_ascii_lowercase())
            .collect();
        Self(code)
    }

    /// Case-insensitive match, the way the join form compares codes. Input is not trimmed.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl PartialEq for InviteCode {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.0)
    }
}

impl Eq for InviteCode {}

impl Address {
    /// 20 random bytes as `0x`-prefixed lowercase hex (42 chars).
    pub fn random() -> Self {
        let bytes: [u8; ADDRESS_BYTES] = rand::thread_rng().gen();
        Self(format!("0x{}", hex::encode(bytes)))
    }
}
