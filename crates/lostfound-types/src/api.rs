use serde::Serialize;
use thiserror::Error;

use crate::models::{NewReport, ReportKind};

// -- Navigation --

/// The page selected by the navigation control. This is the whole of the
/// site's state machine: each request picks exactly one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Home,
    Submit,
    Reports,
    Contact,
}

impl View {
    /// Navigation order.
    pub const ALL: [View; 4] = [View::Home, View::Reports, View::Submit, View::Contact];

    /// Absent or unrecognised values fall back to Home.
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("submit") => View::Submit,
            Some("reports") => View::Reports,
            Some("contact") => View::Contact,
            _ => View::Home,
        }
    }

    pub fn param(self) -> &'static str {
        match self {
            View::Home => "home",
            View::Submit => "submit",
            View::Reports => "reports",
            View::Contact => "contact",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Submit => "Submit Report",
            View::Reports => "View Reports",
            View::Contact => "Contact",
        }
    }
}

// -- List filter --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Lost,
    Found,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 3] = [StatusFilter::All, StatusFilter::Lost, StatusFilter::Found];

    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("lost") => StatusFilter::Lost,
            Some("found") => StatusFilter::Found,
            _ => StatusFilter::All,
        }
    }

    pub fn param(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Lost => "lost",
            StatusFilter::Found => "found",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Lost => "Lost",
            StatusFilter::Found => "Found",
        }
    }

    pub fn matches(self, kind: ReportKind) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Lost => kind == ReportKind::Lost,
            StatusFilter::Found => kind == ReportKind::Found,
        }
    }
}

// -- Submission --

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please complete all required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("Unknown report kind: {0:?}")]
    InvalidKind(String),
}

/// Raw text fields of a report form submission. Values are kept as typed so
/// a rejected form can be shown again with the user's input intact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubmitForm {
    pub reporter_name: String,
    pub kind: String,
    pub item_name: String,
    pub location: String,
    pub description: String,
}

impl SubmitForm {
    /// Assigns a text field by its form name. Unknown names are ignored.
    pub fn set_field(&mut self, name: &str, value: String) {
        match name {
            "reporter_name" => self.reporter_name = value,
            "kind" => self.kind = value.trim().to_ascii_lowercase(),
            "item_name" => self.item_name = value,
            "location" => self.location = value,
            "description" => self.description = value,
            _ => {}
        }
    }

    /// Checks the required fields and builds a report ready for the store.
    /// Whitespace-only input counts as empty; accepted values are trimmed.
    pub fn validate(
        &self,
        photo: Option<String>,
        reported_at: chrono::NaiveDateTime,
    ) -> Result<NewReport, ValidationError> {
        let required = [
            ("Reporter name", &self.reporter_name),
            ("Item name", &self.item_name),
            ("Location", &self.location),
            ("Description", &self.description),
        ];
        let missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(label, _)| *label)
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let kind = ReportKind::parse(&self.kind)
            .ok_or_else(|| ValidationError::InvalidKind(self.kind.clone()))?;

        Ok(NewReport {
            reporter_name: self.reporter_name.trim().to_string(),
            kind,
            item_name: self.item_name.trim().to_string(),
            location: self.location.trim().to_string(),
            description: self.description.trim().to_string(),
            photo,
            reported_at,
        })
    }
}
