//! Shared types for the lost & found site.
//!
//! `models` holds the persisted `Report` record. `api` holds the navigation
//! state and the submitted form, which the web crate builds from requests.

pub mod api;
pub mod models;

pub use api::{StatusFilter, SubmitForm, ValidationError, View};
pub use models::{NewReport, Report, ReportKind, TIMESTAMP_FORMAT, now_second_precision};
