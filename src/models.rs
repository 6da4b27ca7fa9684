use std::fmt;
use std::str::FromStr;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

#[derive(Debug, Clone, PartialEq)]
pub struct House {
    pub id: Option<i64>,
    pub address: String,
    pub build_year: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Premise {
    pub id: Option<i64>,
    pub house_id: i64,
    pub number: String,
    pub area: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OwnerDocument {
    pub number: String,
    /// RFC 3339 timestamp of when the document was registered.
    pub issue_date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Owner {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub document: OwnerDocument,
    pub ownership_share: f64,
    pub status: OwnerStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OwnerStatus {
    #[default]
    Active,
    Inactive,
}

impl OwnerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for OwnerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OwnerStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(format!("unknown owner status: {other}")),
        }
    }
}

impl ToSql for OwnerStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for OwnerStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        s.parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_status_roundtrip() {
        for status in [OwnerStatus::Active, OwnerStatus::Inactive] {
            assert_eq!(status.as_str().parse::<OwnerStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_owner_status_rejects_unknown() {
        assert!("archived".parse::<OwnerStatus>().is_err());
    }

    #[test]
    fn test_owner_status_defaults_to_active() {
        assert_eq!(OwnerStatus::default(), OwnerStatus::Active);
    }
}
