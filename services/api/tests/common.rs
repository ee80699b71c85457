#![allow(dead_code)]
//! Shared helpers for the API integration tests

use api::models::Store;
use api::routes;
use api::state::AppState;
use api::uploads::UploadStore;

pub struct TestApp {
    pub addr: String,
    pub state: AppState,
}

/// Spin up the service on an ephemeral port with a throwaway document
pub async fn spawn_app(tag: &str) -> TestApp {
    let suffix = uuid::Uuid::new_v4();
    let data_file = std::env::temp_dir().join(format!("roster-api-{tag}-{suffix}.json"));
    let uploads_dir = std::env::temp_dir().join(format!("roster-api-uploads-{tag}-{suffix}"));

    let store = Store::open(data_file).await.expect("store should open");
    let uploads = UploadStore::new(uploads_dir);
    uploads
        .ensure_dir()
        .await
        .expect("uploads dir should be creatable");

    let state = AppState::new(store, uploads);
    let app = routes::create_router(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral port should bind");
    let addr = listener.local_addr().expect("listener has an address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server runs");
    });

    TestApp {
        addr: format!("http://{addr}"),
        state,
    }
}

/// Multipart form for a draft save
pub fn draft_form(
    employee_id: &str,
    designation: &str,
    dates: &[&str],
) -> reqwest::multipart::Form {
    reqwest::multipart::Form::new()
        .text("userId", "1")
        .text("employeeId", employee_id.to_string())
        .text(
            "selectedDates",
            serde_json::to_string(dates).expect("dates serialize"),
        )
        .text("userDesignation", designation.to_string())
        .text("userLocation", "Chennai".to_string())
}

/// Attach a small fake PNG to a draft form
pub fn with_attachment(form: reqwest::multipart::Form) -> reqwest::multipart::Form {
    let part =
        reqwest::multipart::Part::bytes(b"\x89PNG fake image bytes".to_vec()).file_name("leave-note.png");
    form.part("attachment", part)
}

/// JSON payload for creating a directory account
pub fn user_payload(employee_id: &str, role: Option<&str>) -> serde_json::Value {
    let mut payload = serde_json::json!({
        "name": format!("Employee {employee_id}"),
        "employeeId": employee_id,
        "password": "secret",
        "designation": "Technical Lead",
        "location": "Chennai",
    });
    if let Some(role) = role {
        payload["role"] = serde_json::Value::String(role.to_string());
    }
    payload
}
