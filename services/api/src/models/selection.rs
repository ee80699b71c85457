//! Date-selection records and their lifecycle payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::User;

/// Lifecycle of a date selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
}

/// One employee's date selection for one month.
///
/// The record migrates between the draft, submitted and approved collections
/// as its status changes; the designation and location are denormalized
/// copies taken at save time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateSelection {
    pub id: i64,
    pub user_id: i64,
    pub employee_id: String,
    pub user_designation: String,
    pub user_location: String,
    /// Kept sorted ascending
    pub selected_dates: Vec<DateTime<Utc>>,
    pub saved_at: DateTime<Utc>,
    pub status: SelectionStatus,
    pub month: u32,
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Stored filename of the uploaded image, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
}

/// Flat date record kept by the legacy save/fetch endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyDateRecord {
    pub id: i64,
    pub user_id: i64,
    pub employee_id: String,
    pub user_designation: String,
    pub user_location: String,
    pub selected_dates: Vec<DateTime<Utc>>,
    pub saved_at: DateTime<Utc>,
    pub month: u32,
    pub year: i32,
}

/// Fields a draft (or legacy) save carries
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSelectionRequest {
    pub user_id: i64,
    pub employee_id: String,
    pub selected_dates: Vec<DateTime<Utc>>,
    pub user_designation: String,
    pub user_location: String,
    /// Stored attachment filename; arrives as a multipart file, never as JSON
    #[serde(skip)]
    pub attachment: Option<String>,
}

/// Submit-for-review payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub employee_id: String,
}

/// Admin review payload for approve and reject
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub selection_id: i64,
    pub admin_comment: Option<String>,
}

/// Summary of who has not submitted for the current month
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotSubmittedSummary {
    pub month: u32,
    pub year: i32,
    pub total_users: usize,
    pub submitted_count: usize,
    pub not_submitted_count: usize,
    pub users_not_submitted: Vec<User>,
}
