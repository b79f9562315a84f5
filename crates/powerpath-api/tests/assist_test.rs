//! Integration tests for assisted sessions.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use powerpath_core::collaborator::{Collaborator, CollaboratorError};
use powerpath_test_support::{FailingCollaborator, ScriptedCollaborator};
use serde_json::json;

fn app_with(collaborator: impl Collaborator + 'static) -> axum::Router {
    common::build_test_app_with(Some(Arc::new(collaborator)), Duration::ZERO)
}

async fn create_assisted_session(app: axum::Router) -> serde_json::Value {
    let (status, view) =
        common::post_json(app, "/api/v1/sessions", &json!({"mode": "assisted"})).await;
    assert_eq!(status, StatusCode::CREATED);
    view
}

#[tokio::test]
async fn test_create_assisted_session_publishes_the_greeting() {
    let app = app_with(ScriptedCollaborator::new(vec![]));

    let view = create_assisted_session(app).await;

    assert_eq!(view["mode"], "assisted");
    assert_eq!(view["transcript"].as_array().unwrap().len(), 1);
    assert_eq!(view["transcript"][0]["role"], "assistant");
    assert!(view["choices"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_structured_reply_surfaces_message_and_options() {
    let app = app_with(ScriptedCollaborator::with_reply(
        r#"{"message": "Is it beeping?", "options": ["Yes", "No"], "danger": false}"#,
    ));
    let view = create_assisted_session(app.clone()).await;
    let id = view["session_id"].as_str().unwrap().to_owned();

    let (status, view) = common::post_json(
        app,
        &format!("/api/v1/sessions/{id}/messages"),
        &json!({"text": "My UPS is acting up"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let transcript = view["transcript"].as_array().unwrap();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[1]["role"], "user");
    assert_eq!(transcript[2]["message"], "Is it beeping?");

    let choices = view["choices"].as_array().unwrap();
    assert_eq!(choices.len(), 2);
    assert_eq!(choices[0]["label"], "Yes");
    // Assisted suggestions carry no target step.
    assert!(choices[0].get("next_step").is_none());
}

#[tokio::test]
async fn test_plain_text_reply_falls_back_to_raw_message() {
    let app = app_with(ScriptedCollaborator::with_reply("ok, thanks!"));
    let view = create_assisted_session(app.clone()).await;
    let id = view["session_id"].as_str().unwrap().to_owned();

    let (status, view) = common::post_json(
        app,
        &format!("/api/v1/sessions/{id}/messages"),
        &json!({"text": "thanks"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let last = view["transcript"].as_array().unwrap().last().unwrap().clone();
    assert_eq!(last["message"], "ok, thanks!");
    assert_eq!(last["danger"], false);
    assert!(view["choices"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_danger_reply_is_flagged_and_options_suppressed() {
    let app = app_with(ScriptedCollaborator::with_reply(
        r#"{"message": "WARNING: SAFETY COMES FIRST! Step away from the unit.", "options": ["Keep going"], "danger": true}"#,
    ));
    let view = create_assisted_session(app.clone()).await;
    let id = view["session_id"].as_str().unwrap().to_owned();

    let (status, view) = common::post_json(
        app,
        &format!("/api/v1/sessions/{id}/messages"),
        &json!({"text": "I smell something burning"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let last = view["transcript"].as_array().unwrap().last().unwrap().clone();
    assert_eq!(last["danger"], true);
    assert!(view["choices"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_collaborator_failure_is_recovered_into_the_apology() {
    let app = app_with(FailingCollaborator);
    let view = create_assisted_session(app.clone()).await;
    let id = view["session_id"].as_str().unwrap().to_owned();

    let (status, view) = common::post_json(
        app,
        &format!("/api/v1/sessions/{id}/messages"),
        &json!({"text": "hello?"}),
    )
    .await;

    // Recovery is local: the failure becomes a terminal turn, not an error.
    assert_eq!(status, StatusCode::OK);
    let last = view["transcript"].as_array().unwrap().last().unwrap().clone();
    assert_eq!(last["role"], "assistant");
    assert!(last["message"].as_str().unwrap().contains("Sorry"));
    assert!(view["choices"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_restart_discards_the_exchange_history() {
    let app = app_with(ScriptedCollaborator::new(vec![
        Ok(r#"{"message": "Go on."}"#.to_owned()),
        Err(CollaboratorError::Unavailable("gone".to_owned())),
    ]));
    let view = create_assisted_session(app.clone()).await;
    let id = view["session_id"].as_str().unwrap().to_owned();

    let (status, _) = common::post_json(
        app.clone(),
        &format!("/api/v1/sessions/{id}/messages"),
        &json!({"text": "first"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, view) = common::post_json(
        app,
        &format!("/api/v1/sessions/{id}/restart"),
        &json!({}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["transcript"].as_array().unwrap().len(), 1);
    assert_eq!(view["transcript"][0]["role"], "assistant");
}

#[tokio::test]
async fn test_empty_message_text_is_rejected() {
    let app = app_with(ScriptedCollaborator::new(vec![]));
    let view = create_assisted_session(app.clone()).await;
    let id = view["session_id"].as_str().unwrap().to_owned();

    let (status, json) = common::post_json(
        app,
        &format!("/api/v1/sessions/{id}/messages"),
        &json!({"text": "   "}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn test_assisted_mode_requires_a_collaborator() {
    let app = common::build_test_app();

    let (status, json) =
        common::post_json(app, "/api/v1/sessions", &json!({"mode": "assisted"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn test_choices_are_rejected_on_assisted_sessions() {
    let app = app_with(ScriptedCollaborator::new(vec![]));
    let view = create_assisted_session(app.clone()).await;
    let id = view["session_id"].as_str().unwrap().to_owned();

    let (status, json) = common::post_json(
        app,
        &format!("/api/v1/sessions/{id}/choices"),
        &json!({"label": "6 kVA or less", "next_step": "small_unit"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}
