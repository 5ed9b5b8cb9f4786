//! Report compilation and sharing-rule tests over the HTTP surface.


use axum::http::StatusCode;
use chrono::{Duration, Utc};
use dossier_core::new_entity_id;
use serde_json::json;
use test_support::{assert_error, assert_success, TestApp};

/// Build an investigation with one completed job, then compile a report
/// with the given sharing settings. Returns the report id.
async fn compile_report(app: &TestApp, token: &str, body_extra: serde_json::Value) -> String {
    let response = app
        .post(
            "/api/v1/jobs",
            Some(token),
            json!({"input": {"tool": "email_lookup", "email": "target@example.com"}}),
        )
        .await;
    let data = assert_success(response, StatusCode::CREATED).await;
    let job_id = data["job"]["id"].as_str().unwrap().to_string();

    let response = app
        .post(
            &format!("/api/v1/jobs/{}/transition", job_id),
            Some(token),
            json!({
                "status": "completed",
                "output": {"tool": "email_lookup", "breaches": ["megacorp-2021"]}
            }),
        )
        .await;
    assert_success(response, StatusCode::OK).await;

    let response = app
        .post(
            "/api/v1/investigations",
            Some(token),
            json!({"name": "acme"}),
        )
        .await;
    let data = assert_success(response, StatusCode::CREATED).await;
    let inv_id = data["investigation"]["id"].as_str().unwrap().to_string();

    let response = app
        .post(
            &format!("/api/v1/investigations/{}/items", inv_id),
            Some(token),
            json!({"job_id": job_id}),
        )
        .await;
    assert_success(response, StatusCode::CREATED).await;

    let mut body = json!({"investigation_id": inv_id, "title": "Acme findings"});
    if let (Some(base), Some(extra)) = (body.as_object_mut(), body_extra.as_object()) {
        for (key, value) in extra {
            base.insert(key.clone(), value.clone());
        }
    }
    let response = app.post("/api/v1/reports", Some(token), body).await;
    let data = assert_success(response, StatusCode::CREATED).await;
    data["report"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_compiled_report_has_sections_and_metadata() {
    let app = TestApp::new();
    let token = app.token_for(new_entity_id());
    let report_id = compile_report(&app, &token, json!({})).await;

    let response = app
        .get(&format!("/api/v1/reports/{}", report_id), Some(&token))
        .await;
    let data = assert_success(response, StatusCode::OK).await;
    assert_eq!(data["report"]["metadata"]["item_count"], 1);
    assert_eq!(data["report"]["sections"].as_array().unwrap().len(), 1);
    assert_eq!(data["report"]["metadata"]["tools_used"], json!(["email_lookup"]));
}

#[tokio::test]
async fn test_private_report_hidden_from_everyone_else() {
    let app = TestApp::new();
    let owner_token = app.token_for(new_entity_id());
    let stranger_token = app.token_for(new_entity_id());
    let report_id = compile_report(&app, &owner_token, json!({})).await;

    let response = app
        .get(&format!("/api/v1/reports/{}", report_id), Some(&stranger_token))
        .await;
    let code = assert_error(response, StatusCode::NOT_FOUND).await;
    assert_eq!(code, "ENTITY_NOT_FOUND");

    let response = app
        .get(&format!("/api/v1/reports/{}", report_id), None)
        .await;
    assert_error(response, StatusCode::NOT_FOUND).await;
}

#[tokio::test]
async fn test_public_report_readable_without_a_token() {
    let app = TestApp::new();
    let token = app.token_for(new_entity_id());
    let report_id = compile_report(&app, &token, json!({"is_public": true})).await;

    let response = app
        .get(&format!("/api/v1/reports/{}", report_id), None)
        .await;
    let data = assert_success(response, StatusCode::OK).await;
    assert_eq!(data["report"]["title"], "Acme findings");
}

#[tokio::test]
async fn test_expired_public_report_locked_for_everyone() {
    let app = TestApp::new();
    let owner_token = app.token_for(new_entity_id());
    let expired = (Utc::now() - Duration::hours(1)).to_rfc3339();
    let report_id = compile_report(
        &app,
        &owner_token,
        json!({"is_public": true, "expires_at": expired}),
    )
    .await;

    // Expiry locks out the owner too.
    let response = app
        .get(&format!("/api/v1/reports/{}", report_id), Some(&owner_token))
        .await;
    let code = assert_error(response, StatusCode::FORBIDDEN).await;
    assert_eq!(code, "FORBIDDEN");

    let response = app
        .get(&format!("/api/v1/reports/{}", report_id), None)
        .await;
    assert_error(response, StatusCode::FORBIDDEN).await;
}

#[tokio::test]
async fn test_report_is_a_snapshot() {
    let app = TestApp::new();
    let token = app.token_for(new_entity_id());
    let report_id = compile_report(&app, &token, json!({})).await;

    let response = app
        .get(&format!("/api/v1/reports/{}", report_id), Some(&token))
        .await;
    let data = assert_success(response, StatusCode::OK).await;
    let inv_id = data["report"]["investigation_id"].as_str().unwrap().to_string();

    let response = app
        .delete(&format!("/api/v1/investigations/{}", inv_id), Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The compiled sections survive the source investigation.
    let response = app
        .get(&format!("/api/v1/reports/{}", report_id), Some(&token))
        .await;
    let data = assert_success(response, StatusCode::OK).await;
    assert_eq!(data["report"]["sections"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_report_management_requires_a_token() {
    let app = TestApp::new();
    let token = app.token_for(new_entity_id());
    let report_id = compile_report(&app, &token, json!({})).await;

    let response = app
        .patch(
            &format!("/api/v1/reports/{}", report_id),
            None,
            json!({"is_public": true}),
        )
        .await;
    assert_error(response, StatusCode::UNAUTHORIZED).await;

    let response = app.get("/api/v1/reports", None).await;
    assert_error(response, StatusCode::UNAUTHORIZED).await;
}
