use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Wall-clock format used for `reportedAt`, second precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Lost,
    Found,
}

impl ReportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportKind::Lost => "lost",
            ReportKind::Found => "found",
        }
    }

    /// Parses the value posted by the form's kind selector.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lost" => Some(ReportKind::Lost),
            "found" => Some(ReportKind::Found),
            _ => None,
        }
    }

    /// Status line shown on a report card.
    pub fn status_label(self) -> &'static str {
        match self {
            ReportKind::Lost => "Item LOST",
            ReportKind::Found => "Item FOUND",
        }
    }
}

/// One lost/found entry as persisted in the backing document.
///
/// Reports are append-only: nothing edits or deletes them after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: u64,
    pub reporter_name: String,
    pub kind: ReportKind,
    pub item_name: String,
    pub location: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(with = "timestamp")]
    pub reported_at: NaiveDateTime,
}

impl Report {
    pub fn reported_at_display(&self) -> String {
        self.reported_at.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// A validated report that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReport {
    pub reporter_name: String,
    pub kind: ReportKind,
    pub item_name: String,
    pub location: String,
    pub description: String,
    pub photo: Option<String>,
    pub reported_at: NaiveDateTime,
}

impl NewReport {
    pub fn into_report(self, id: u64) -> Report {
        Report {
            id,
            reporter_name: self.reporter_name,
            kind: self.kind,
            item_name: self.item_name,
            location: self.location,
            description: self.description,
            photo: self.photo,
            reported_at: self.reported_at,
        }
    }
}

/// Current local time truncated to whole seconds, so a stored report
/// compares equal to itself after a save/load cycle.
pub fn now_second_precision() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
