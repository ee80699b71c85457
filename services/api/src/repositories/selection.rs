//! Selection lifecycle over the draft, submitted and approved collections

use std::collections::HashSet;

use chrono::{Datelike, Utc};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::models::{
    DateSelection, LegacyDateRecord, NotSubmittedSummary, SaveSelectionRequest, SelectionStatus,
    Store, User,
};

/// Selection lifecycle repository
#[derive(Clone)]
pub struct SelectionRepository {
    store: Store,
}

impl SelectionRepository {
    /// Create a new selection repository
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Fresh record id: the current timestamp in milliseconds
    fn next_id() -> i64 {
        Utc::now().timestamp_millis()
    }

    /// Save (or replace) the employee's draft for the current month.
    ///
    /// Any earlier draft is dropped, as is a lingering rejected submission
    /// for the same month: the new draft supersedes both.
    pub async fn save_draft(&self, req: SaveSelectionRequest) -> ApiResult<DateSelection> {
        let now = Utc::now();
        let mut dates = req.selected_dates;
        dates.sort();

        let record = DateSelection {
            id: Self::next_id(),
            user_id: req.user_id,
            employee_id: req.employee_id,
            user_designation: req.user_designation,
            user_location: req.user_location,
            selected_dates: dates,
            saved_at: now,
            status: SelectionStatus::Draft,
            month: now.month(),
            year: now.year(),
            submitted_at: None,
            admin_comment: None,
            reviewed_at: None,
            attachment: req.attachment,
        };

        info!(
            "Saving draft for employee {} ({} dates)",
            record.employee_id,
            record.selected_dates.len()
        );

        self.store
            .transact(move |db| {
                db.draft_selections
                    .retain(|s| s.employee_id != record.employee_id);
                db.submitted_selections.retain(|s| {
                    !(s.employee_id == record.employee_id
                        && s.status == SelectionStatus::Rejected
                        && s.month == record.month
                        && s.year == record.year)
                });
                db.draft_selections.push(record.clone());
                Ok(record)
            })
            .await
    }

    /// Move the employee's draft into the review queue as `pending`
    pub async fn submit_for_review(&self, employee_id: &str) -> ApiResult<DateSelection> {
        let employee_id = employee_id.to_string();

        self.store
            .transact(move |db| {
                let pos = db
                    .draft_selections
                    .iter()
                    .position(|s| s.employee_id == employee_id)
                    .ok_or_else(|| {
                        ApiError::NotFound("No draft found for this user".to_string())
                    })?;

                let mut record = db.draft_selections.remove(pos);
                record.status = SelectionStatus::Pending;
                record.submitted_at = Some(Utc::now());

                db.submitted_selections.push(record.clone());
                Ok(record)
            })
            .await
    }

    /// Approve a pending selection and relocate it to the approved collection
    pub async fn approve(
        &self,
        selection_id: i64,
        admin_comment: Option<String>,
    ) -> ApiResult<DateSelection> {
        self.store
            .transact(move |db| {
                let pos = db
                    .submitted_selections
                    .iter()
                    .position(|s| s.id == selection_id)
                    .ok_or_else(|| {
                        ApiError::NotFound("Submitted selection not found".to_string())
                    })?;

                let mut record = db.submitted_selections.remove(pos);
                record.status = SelectionStatus::Approved;
                record.admin_comment = admin_comment;
                record.reviewed_at = Some(Utc::now());

                db.approved_selections.push(record.clone());
                Ok(record)
            })
            .await
    }

    /// Reject a pending selection in place; no relocation
    pub async fn reject(&self, selection_id: i64, admin_comment: String) -> ApiResult<DateSelection> {
        self.store
            .transact(move |db| {
                let record = db
                    .submitted_selections
                    .iter_mut()
                    .find(|s| s.id == selection_id)
                    .ok_or_else(|| {
                        ApiError::NotFound("Submitted selection not found".to_string())
                    })?;

                record.status = SelectionStatus::Rejected;
                record.admin_comment = Some(admin_comment);
                record.reviewed_at = Some(Utc::now());

                Ok(record.clone())
            })
            .await
    }

    /// The employee's current draft, if any
    pub async fn draft_for(&self, employee_id: &str) -> Option<DateSelection> {
        self.store
            .read(|db| {
                db.draft_selections
                    .iter()
                    .find(|s| s.employee_id == employee_id)
                    .cloned()
            })
            .await
    }

    /// The employee's record in the review queue, if any
    pub async fn submitted_for(&self, employee_id: &str) -> Option<DateSelection> {
        self.store
            .read(|db| {
                db.submitted_selections
                    .iter()
                    .find(|s| s.employee_id == employee_id)
                    .cloned()
            })
            .await
    }

    /// Every approved record for the employee
    pub async fn approved_for(&self, employee_id: &str) -> Vec<DateSelection> {
        self.store
            .read(|db| {
                db.approved_selections
                    .iter()
                    .filter(|s| s.employee_id == employee_id)
                    .cloned()
                    .collect()
            })
            .await
    }

    /// The whole review queue
    pub async fn all_submitted(&self) -> Vec<DateSelection> {
        self.store
            .read(|db| db.submitted_selections.clone())
            .await
    }

    /// Users with no pending or approved record for the current month
    pub async fn not_submitted(&self) -> NotSubmittedSummary {
        let now = Utc::now();
        let (month, year) = (now.month(), now.year());

        self.store
            .read(|db| {
                let submitted: HashSet<&str> = db
                    .submitted_selections
                    .iter()
                    .chain(db.approved_selections.iter())
                    .filter(|s| s.month == month && s.year == year)
                    .map(|s| s.employee_id.as_str())
                    .collect();

                let users_not_submitted: Vec<User> = db
                    .users
                    .iter()
                    .filter(|u| !submitted.contains(u.employee_id.as_str()))
                    .map(User::sanitized)
                    .collect();

                NotSubmittedSummary {
                    month,
                    year,
                    total_users: db.users.len(),
                    submitted_count: submitted.len(),
                    not_submitted_count: users_not_submitted.len(),
                    users_not_submitted,
                }
            })
            .await
    }

    /// Upsert the employee's flat legacy record; the id survives an update
    pub async fn save_legacy(&self, req: SaveSelectionRequest) -> ApiResult<LegacyDateRecord> {
        let now = Utc::now();

        self.store
            .transact(move |db| {
                let existing_id = db
                    .selected_dates
                    .iter()
                    .find(|r| r.employee_id == req.employee_id)
                    .map(|r| r.id);

                let mut dates = req.selected_dates;
                dates.sort();

                let record = LegacyDateRecord {
                    id: existing_id.unwrap_or_else(Self::next_id),
                    user_id: req.user_id,
                    employee_id: req.employee_id,
                    user_designation: req.user_designation,
                    user_location: req.user_location,
                    selected_dates: dates,
                    saved_at: now,
                    month: now.month(),
                    year: now.year(),
                };

                db.selected_dates
                    .retain(|r| r.employee_id != record.employee_id);
                db.selected_dates.push(record.clone());
                Ok(record)
            })
            .await
    }

    /// The employee's legacy record, if any
    pub async fn legacy_for(&self, employee_id: &str) -> Option<LegacyDateRecord> {
        self.store
            .read(|db| {
                db.selected_dates
                    .iter()
                    .find(|r| r.employee_id == employee_id)
                    .cloned()
            })
            .await
    }

    /// Every legacy record
    pub async fn all_legacy(&self) -> Vec<LegacyDateRecord> {
        self.store.read(|db| db.selected_dates.clone()).await
    }
}
