//! Roster models: the on-disk document, account records and API payloads

use serde::{Deserialize, Serialize};

use common::store::JsonStore;

pub mod selection;

// Re-export for convenience
pub use selection::{
    DateSelection, LegacyDateRecord, NotSubmittedSummary, ReviewRequest, SaveSelectionRequest,
    SelectionStatus, SubmitRequest,
};

/// The whole datastore: one JSON document holding every collection.
///
/// Field names match the original `db.json` layout, so an existing document
/// opens as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Database {
    pub users: Vec<User>,
    pub admins: Vec<User>,
    pub draft_selections: Vec<DateSelection>,
    pub submitted_selections: Vec<DateSelection>,
    pub approved_selections: Vec<DateSelection>,
    pub selected_dates: Vec<LegacyDateRecord>,
}

/// Shared handle to the roster document store
pub type Store = JsonStore<Database>;

/// Account role, doubling as the collection selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

/// Employee or administrator account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub employee_id: String,
    pub name: String,
    /// Stored in the clear (hardening is out of scope); stripped from responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub designation: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

impl User {
    /// Copy of the record that is safe to return to clients.
    pub fn sanitized(&self) -> User {
        User {
            password: None,
            ..self.clone()
        }
    }

    /// Effective role; records in the admins collection may omit it.
    pub fn role_or(&self, fallback: UserRole) -> UserRole {
        self.role.unwrap_or(fallback)
    }
}

/// Payload for creating an account
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub employee_id: String,
    pub password: String,
    pub designation: String,
    pub location: String,
    #[serde(default)]
    pub role: Option<UserRole>,
}

/// Payload for updating an account; absent fields are left alone
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub name: Option<String>,
    pub employee_id: Option<String>,
    pub password: Option<String>,
    pub designation: Option<String>,
    pub location: Option<String>,
    pub role: Option<UserRole>,
}

/// Login payload: identity travels as plain request data, no tokens
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub employee_id: String,
    pub password: String,
}
