//! BookInstance model and loan status

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

use super::{format_medium_date, format_ymd};

/// Loan status of a physical copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InstanceStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl InstanceStatus {
    /// All statuses, in form display order.
    pub const ALL: [InstanceStatus; 4] = [
        InstanceStatus::Available,
        InstanceStatus::Maintenance,
        InstanceStatus::Loaned,
        InstanceStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceStatus::Available => "Available",
            InstanceStatus::Maintenance => "Maintenance",
            InstanceStatus::Loaned => "Loaned",
            InstanceStatus::Reserved => "Reserved",
        }
    }
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error)]
#[error("unknown book instance status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for InstanceStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(InstanceStatus::Available),
            "Maintenance" => Ok(InstanceStatus::Maintenance),
            "Loaned" => Ok(InstanceStatus::Loaned),
            "Reserved" => Ok(InstanceStatus::Reserved),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookInstance {
    pub instance_id: Uuid,
    pub book_id: Uuid,
    pub imprint: String,
    pub status: String,
    pub due_back: Option<NaiveDate>,
}

impl BookInstance {
    /// Typed view of the stored status. Unrecognized stored values fall
    /// back to `Maintenance`, the entity default.
    pub fn status(&self) -> InstanceStatus {
        self.status.parse().unwrap_or_default()
    }

    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.instance_id)
    }

    pub fn due_back_formatted(&self) -> String {
        self.due_back.map(format_medium_date).unwrap_or_default()
    }

    pub fn due_back_ymd(&self) -> String {
        self.due_back.map(format_ymd).unwrap_or_default()
    }
}

/// Instance list row with the book reference resolved inline.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InstanceWithBook {
    pub instance_id: Uuid,
    pub book_id: Uuid,
    pub imprint: String,
    pub status: String,
    pub due_back: Option<NaiveDate>,
    pub title: Option<String>,
}

impl InstanceWithBook {
    pub fn status(&self) -> InstanceStatus {
        self.status.parse().unwrap_or_default()
    }

    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.instance_id)
    }

    pub fn book_title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}
