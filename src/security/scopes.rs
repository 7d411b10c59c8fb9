/// Scope registry
///
/// The fixed catalog of permission strings. Every scope granted to an
/// account, requested at login, or carried by a token must be one of these;
/// unknown strings are rejected wherever they are parsed, never ignored.
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    TaskRead,
    TaskWrite,
    TaskDelete,
    AdminUser,
}

impl Scope {
    pub const ALL: [Scope; 4] = [
        Scope::TaskRead,
        Scope::TaskWrite,
        Scope::TaskDelete,
        Scope::AdminUser,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::TaskRead => "task:read",
            Scope::TaskWrite => "task:write",
            Scope::TaskDelete => "task:delete",
            Scope::AdminUser => "admin:user",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Scope::TaskRead => "Read created tasks",
            Scope::TaskWrite => "Create new tasks",
            Scope::TaskDelete => "Delete the tasks present in database",
            Scope::AdminUser => "User with this permission able to create new users",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "task:read" => Ok(Scope::TaskRead),
            "task:write" => Ok(Scope::TaskWrite),
            "task:delete" => Ok(Scope::TaskDelete),
            "admin:user" => Ok(Scope::AdminUser),
            other => Err(AppError::Validation(format!("Unknown scope: {}", other))),
        }
    }
}

impl Serialize for Scope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Scope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Scope::from_str(&s).map_err(de::Error::custom)
    }
}

/// Catalog advertised to clients building a token request.
pub fn catalog() -> BTreeMap<&'static str, &'static str> {
    Scope::ALL
        .iter()
        .map(|s| (s.as_str(), s.description()))
        .collect()
}

/// Parse the OAuth2 space-separated `scope` form field.
pub fn parse_scope_list(raw: &str) -> Result<Vec<Scope>, AppError> {
    raw.split_whitespace().map(Scope::from_str).collect()
}
