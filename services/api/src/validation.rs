//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

use crate::models::NewUser;

/// Validate an employee identifier
pub fn validate_employee_id(employee_id: &str) -> Result<(), String> {
    if employee_id.is_empty() {
        return Err("Employee ID is required".to_string());
    }

    if employee_id.len() > 32 {
        return Err("Employee ID must be at most 32 characters long".to_string());
    }

    static EMPLOYEE_ID_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMPLOYEE_ID_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_-]+$").expect("Failed to compile employee ID regex")
    });

    if !regex.is_match(employee_id) {
        return Err(
            "Employee ID can only contain letters, numbers, dashes, and underscores".to_string(),
        );
    }

    Ok(())
}

/// Validate a new-account payload: every field is required
pub fn validate_new_user(new_user: &NewUser) -> Result<(), String> {
    if new_user.name.trim().is_empty() {
        return Err("Name is required".to_string());
    }

    validate_employee_id(&new_user.employee_id)?;

    if new_user.password.is_empty() {
        return Err("Password is required".to_string());
    }

    if new_user.designation.trim().is_empty() {
        return Err("Designation is required".to_string());
    }

    if new_user.location.trim().is_empty() {
        return Err("Location is required".to_string());
    }

    Ok(())
}
