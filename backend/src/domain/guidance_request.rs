//! Guidance requests worked by providers.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UserId;
use super::booking_validation::non_blank;

/// Lifecycle of a guidance request: `pending` until a provider resolves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GuidanceStatus {
    #[default]
    Pending,
    Resolved,
}

impl GuidanceStatus {
    /// Wire and storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for GuidanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored status text that is not a known status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown guidance status: {0}")]
pub struct UnknownGuidanceStatus(pub String);

impl FromStr for GuidanceStatus {
    type Err = UnknownGuidanceStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "resolved" => Ok(Self::Resolved),
            other => Err(UnknownGuidanceStatus(other.to_owned())),
        }
    }
}

/// New guidance request. The note is optional; blank notes become `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuidanceDraft {
    note: Option<String>,
}

impl GuidanceDraft {
    pub fn new(note: Option<&str>) -> Self {
        Self {
            note: non_blank(note),
        }
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

/// Persisted guidance request row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GuidanceRequest {
    pub id: i64,
    pub user_id: UserId,
    pub note: Option<String>,
    pub status: GuidanceStatus,
    pub created_at: DateTime<Utc>,
}
