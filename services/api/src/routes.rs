//! Roster service routes

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::{DateTime, Utc};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{
    error::ApiError,
    models::{
        LoginRequest, NewUser, ReviewRequest, SaveSelectionRequest, SubmitRequest, UpdateUser,
    },
    policy,
    state::AppState,
    validation,
};

/// Create the router for the roster service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/login", post(login))
        .route("/api/save-draft", post(save_draft))
        .route("/api/submit-for-review", post(submit_for_review))
        .route("/api/get-draft/:employee_id", get(get_draft))
        .route("/api/get-submitted/:employee_id", get(get_submitted))
        .route("/api/get-approved/:employee_id", get(get_approved))
        .route("/api/submitted-selections", get(submitted_selections))
        .route("/api/approve-selection", post(approve_selection))
        .route("/api/reject-selection", post(reject_selection))
        .route("/api/save-dates", post(save_dates))
        .route("/api/get-dates/:employee_id", get(get_dates))
        .route("/api/all-saved-dates", get(all_saved_dates))
        .route("/api/users-not-submitted", get(users_not_submitted))
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/:id", put(update_user).delete(delete_user))
        .route("/uploads/:filename", get(serve_attachment))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "roster-api"
    }))
}

/// Plaintext credential login; returns the matched account, never a token
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Login attempt for employee {}", payload.employee_id);

    let user = state
        .user_repository
        .authenticate(&payload.employee_id, &payload.password)
        .await?;

    Ok(Json(json!({
        "message": "Login successful",
        "user": user,
    })))
}

/// Save the employee's draft selection (multipart, optional image attachment)
pub async fn save_draft(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut user_id: Option<i64> = None;
    let mut employee_id: Option<String> = None;
    let mut selected_dates: Option<Vec<DateTime<Utc>>> = None;
    let mut user_designation = String::new();
    let mut user_location = String::new();
    let mut attachment: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "userId" => {
                let text = field.text().await.map_err(bad_multipart)?;
                user_id = Some(text.trim().parse().map_err(|_| {
                    ApiError::BadRequest("userId must be a number".to_string())
                })?);
            }
            "employeeId" => {
                employee_id = Some(field.text().await.map_err(bad_multipart)?);
            }
            "selectedDates" => {
                let text = field.text().await.map_err(bad_multipart)?;
                let dates: Vec<DateTime<Utc>> = serde_json::from_str(&text).map_err(|_| {
                    ApiError::BadRequest(
                        "Selected dates are required and must be an array".to_string(),
                    )
                })?;
                selected_dates = Some(dates);
            }
            "userDesignation" => {
                user_designation = field.text().await.map_err(bad_multipart)?;
            }
            "userLocation" => {
                user_location = field.text().await.map_err(bad_multipart)?;
            }
            "attachment" => {
                let filename = field.file_name().unwrap_or("attachment").to_string();
                let bytes = field.bytes().await.map_err(bad_multipart)?;
                if !bytes.is_empty() {
                    attachment = Some((filename, bytes.to_vec()));
                }
            }
            _ => {}
        }
    }

    let employee_id =
        employee_id.ok_or_else(|| ApiError::BadRequest("Employee ID is required".to_string()))?;
    validation::validate_employee_id(&employee_id).map_err(ApiError::BadRequest)?;

    let selected_dates = selected_dates.ok_or_else(|| {
        ApiError::BadRequest("Selected dates are required and must be an array".to_string())
    })?;

    if selected_dates.is_empty() && attachment.is_none() {
        return Err(ApiError::BadRequest(
            "Select at least one date or attach an image".to_string(),
        ));
    }

    let stored = match attachment {
        Some((filename, bytes)) => Some(state.uploads.save(&filename, &bytes).await?),
        None => None,
    };

    let record = state
        .selection_repository
        .save_draft(SaveSelectionRequest {
            user_id: user_id.unwrap_or_default(),
            employee_id,
            selected_dates,
            user_designation,
            user_location,
            attachment: stored,
        })
        .await?;

    Ok(Json(json!({
        "message": "Draft saved successfully",
        "savedDates": record.selected_dates.len(),
        "record": record,
    })))
}

/// Submit the saved draft for admin review
pub async fn submit_for_review(
    State(state): State<AppState>,
    Json(payload): Json<SubmitRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Submission requested by employee {}", payload.employee_id);

    let draft = state
        .selection_repository
        .draft_for(&payload.employee_id)
        .await
        .ok_or_else(|| ApiError::NotFound("No draft found for this user".to_string()))?;

    policy::check_day_count(
        &draft.user_designation,
        draft.selected_dates.len(),
        draft.attachment.is_some(),
        Utc::now().date_naive(),
    )
    .map_err(|violation| ApiError::BadRequest(violation.to_string()))?;

    let record = state
        .selection_repository
        .submit_for_review(&payload.employee_id)
        .await?;

    Ok(Json(json!({
        "message": "Selection submitted for review successfully",
        "record": record,
    })))
}

/// The employee's draft, or an empty placeholder
pub async fn get_draft(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Response {
    match state.selection_repository.draft_for(&employee_id).await {
        Some(record) => Json(record).into_response(),
        None => Json(json!({
            "message": "No draft found for this user",
            "selectedDates": [],
        }))
        .into_response(),
    }
}

/// The employee's submitted record, or an empty placeholder
pub async fn get_submitted(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Response {
    match state.selection_repository.submitted_for(&employee_id).await {
        Some(record) => Json(record).into_response(),
        None => Json(json!({
            "message": "No submitted selection found for this user",
            "selectedDates": [],
        }))
        .into_response(),
    }
}

/// Every approved record for the employee
pub async fn get_approved(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> impl IntoResponse {
    Json(state.selection_repository.approved_for(&employee_id).await)
}

/// The whole review queue (admin)
pub async fn submitted_selections(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.selection_repository.all_submitted().await)
}

/// Approve a pending selection (admin)
pub async fn approve_selection(
    State(state): State<AppState>,
    Json(payload): Json<ReviewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .selection_repository
        .approve(payload.selection_id, payload.admin_comment)
        .await?;

    Ok(Json(json!({ "message": "Selection approved successfully" })))
}

/// Reject a pending selection (admin); a reason is required
pub async fn reject_selection(
    State(state): State<AppState>,
    Json(payload): Json<ReviewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let comment = payload
        .admin_comment
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Rejection reason is required".to_string()))?;

    state
        .selection_repository
        .reject(payload.selection_id, comment)
        .await?;

    Ok(Json(json!({ "message": "Selection rejected successfully" })))
}

/// Legacy flat save of the selected-date list
pub async fn save_dates(
    State(state): State<AppState>,
    Json(payload): Json<SaveSelectionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_employee_id(&payload.employee_id).map_err(ApiError::BadRequest)?;

    let record = state.selection_repository.save_legacy(payload).await?;

    Ok(Json(json!({
        "message": "Selected dates saved successfully",
        "savedDates": record.selected_dates.len(),
        "record": record,
    })))
}

/// The employee's legacy record, or an empty placeholder
pub async fn get_dates(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Response {
    match state.selection_repository.legacy_for(&employee_id).await {
        Some(record) => Json(record).into_response(),
        None => Json(json!({
            "message": "No saved dates found for this user",
            "selectedDates": [],
        }))
        .into_response(),
    }
}

/// Every legacy record (admin)
pub async fn all_saved_dates(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.selection_repository.all_legacy().await)
}

/// Users without a submission for the current month (admin)
pub async fn users_not_submitted(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.selection_repository.not_submitted().await)
}

/// Directory listing for the admin dashboard
pub async fn list_users(State(state): State<AppState>) -> impl IntoResponse {
    let (users, admins) = state.user_repository.all().await;
    Json(json!({
        "users": users,
        "admins": admins,
    }))
}

/// Create a user or admin account
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_new_user(&payload).map_err(ApiError::BadRequest)?;

    let user = state.user_repository.create(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User created successfully",
            "user": user,
        })),
    ))
}

/// Update an account; a role change moves it between collections
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUser>,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(employee_id) = payload.employee_id.as_deref() {
        validation::validate_employee_id(employee_id).map_err(ApiError::BadRequest)?;
    }

    let user = state.user_repository.update(id, payload).await?;

    Ok(Json(json!({
        "message": "User updated successfully",
        "user": user,
    })))
}

/// Delete an account and its selection records
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state.user_repository.delete(id).await?;

    Ok(Json(json!({
        "message": "User deleted successfully",
        "deletedUser": deleted.user.name,
        "removedSelections": deleted.removed_selections,
    })))
}

/// Serve a stored attachment back by filename
pub async fn serve_attachment(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let (bytes, content_type) = state.uploads.open(&filename).await?;
    Ok(([(header::CONTENT_TYPE, content_type)], bytes))
}

fn bad_multipart(e: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError::BadRequest(format!("Invalid multipart payload: {e}"))
}
