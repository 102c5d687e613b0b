//! Business record types.
//!
//! A [`BusinessRecord`] is one row of the directory as returned by the store.
//! [`NewRecord`] is the write-side shape accepted by the import path, where the
//! store may assign `id` and `created_at`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// A company entry in the business directory.
///
/// Dates other than `created_at` are 8-digit `YYYYMMDD` strings and are
/// compared lexicographically by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessRecord {
    /// Store-assigned identifier.
    pub id: i64,
    /// Australian Business Number.
    pub abn: String,
    /// Registered entity name.
    pub entity_name: String,
    /// Jurisdiction code (e.g. `NSW`).
    pub state: String,
    /// Postcode, kept as text to preserve leading zeros.
    pub postcode: String,
    /// Registration status code (e.g. `ACT`, `CAN`).
    pub status: String,
    /// Date the status took effect, `YYYYMMDD`.
    pub effective_from: String,
    /// Entity type description.
    pub entity_type: String,
    /// Date the upstream register last touched the record, `YYYYMMDD`.
    pub record_updated: String,
    /// When the row was inserted into this store.
    pub created_at: DateTime<Utc>,
}

impl BusinessRecord {
    /// Returns the text value of a field, or `None` for non-text fields.
    pub fn text(&self, field: RecordField) -> Option<&str> {
        match field {
            RecordField::Id | RecordField::CreatedAt => None,
            RecordField::Abn => Some(&self.abn),
            RecordField::EntityName => Some(&self.entity_name),
            RecordField::State => Some(&self.state),
            RecordField::Postcode => Some(&self.postcode),
            RecordField::Status => Some(&self.status),
            RecordField::EffectiveFrom => Some(&self.effective_from),
            RecordField::EntityType => Some(&self.entity_type),
            RecordField::RecordUpdated => Some(&self.record_updated),
        }
    }
}

/// A record to be written to the store.
///
/// Missing text fields default to empty strings. When `id` is absent the store
/// assigns one; when `created_at` is absent the insert time is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub abn: String,
    pub entity_name: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postcode: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub effective_from: String,
    #[serde(default)]
    pub entity_type: String,
    #[serde(default)]
    pub record_updated: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl NewRecord {
    /// Creates a record with the two mandatory fields set.
    pub fn new(abn: impl Into<String>, entity_name: impl Into<String>) -> Self {
        Self {
            abn: abn.into(),
            entity_name: entity_name.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    pub fn with_postcode(mut self, postcode: impl Into<String>) -> Self {
        self.postcode = postcode.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_effective_from(mut self, date: impl Into<String>) -> Self {
        self.effective_from = date.into();
        self
    }

    pub fn with_entity_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = entity_type.into();
        self
    }

    pub fn with_record_updated(mut self, date: impl Into<String>) -> Self {
        self.record_updated = date.into();
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// The closed set of record fields that can be sorted or filtered on.
///
/// Sort columns are only ever taken from this enum, so user text never reaches
/// the ORDER BY clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    Id,
    Abn,
    EntityName,
    State,
    Postcode,
    Status,
    EffectiveFrom,
    EntityType,
    RecordUpdated,
    CreatedAt,
}

impl RecordField {
    /// All fields, in table column order.
    pub const ALL: [RecordField; 10] = [
        RecordField::Id,
        RecordField::Abn,
        RecordField::EntityName,
        RecordField::State,
        RecordField::Postcode,
        RecordField::Status,
        RecordField::EffectiveFrom,
        RecordField::EntityType,
        RecordField::RecordUpdated,
        RecordField::CreatedAt,
    ];

    /// The wire name of the field, which is also its column name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordField::Id => "id",
            RecordField::Abn => "abn",
            RecordField::EntityName => "entity_name",
            RecordField::State => "state",
            RecordField::Postcode => "postcode",
            RecordField::Status => "status",
            RecordField::EffectiveFrom => "effective_from",
            RecordField::EntityType => "entity_type",
            RecordField::RecordUpdated => "record_updated",
            RecordField::CreatedAt => "created_at",
        }
    }

    /// The SQL column backing this field.
    pub fn column(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordField {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| SearchError::UnknownField {
                field: s.to_string(),
            })
    }
}
