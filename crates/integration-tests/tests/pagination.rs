//! Pagination behavior over the HTTP surface: newest-first message pages and
//! the deterministic owner-inbox listing.

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;

use integration_tests::{get_as_owner, post_json, send, test_app};

async fn create_inbox(app: &axum::Router, topic: &str) -> String {
    let (status, body) = send(
        app.clone(),
        post_json(
            "/inboxes",
            json!({
                "topic": topic,
                "username": "alice",
                "secret": "pw123456",
                "expires_at": (Utc::now() + Duration::days(7)).to_rfc3339(),
                "allow_anonymous": true,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body.unwrap()["id"].as_str().unwrap().to_string()
}

fn bodies(page: &serde_json::Value) -> Vec<String> {
    page["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|message| message["body"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn message_pages_walk_newest_to_oldest() {
    let (app, _) = test_app();
    let id = create_inbox(&app, "Feedback").await;

    for n in 1..=5 {
        let (status, _) = send(
            app.clone(),
            post_json(
                &format!("/inboxes/{id}/messages"),
                json!({ "body": format!("reply {n}") }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let uri = format!("/inboxes/{id}/messages?page=1&page_size=2");
    let (_, first) = send(app.clone(), get_as_owner(&uri, "alice", "pw123456")).await;
    assert_eq!(bodies(&first.unwrap()), vec!["reply 5", "reply 4"]);

    let uri = format!("/inboxes/{id}/messages?page=2&page_size=2");
    let (_, second) = send(app.clone(), get_as_owner(&uri, "alice", "pw123456")).await;
    assert_eq!(bodies(&second.unwrap()), vec!["reply 3", "reply 2"]);

    let uri = format!("/inboxes/{id}/messages?page=3&page_size=2");
    let (_, third) = send(app.clone(), get_as_owner(&uri, "alice", "pw123456")).await;
    assert_eq!(bodies(&third.unwrap()), vec!["reply 1"]);

    // Past the last page comes back empty, not an error.
    let uri = format!("/inboxes/{id}/messages?page=4&page_size=2");
    let (status, fourth) = send(app, get_as_owner(&uri, "alice", "pw123456")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(bodies(&fourth.unwrap()).is_empty());
}

#[tokio::test]
async fn owner_inboxes_page_in_a_stable_topic_descending_order() {
    let (app, _) = test_app();
    create_inbox(&app, "Alpha").await;
    create_inbox(&app, "Mid").await;
    create_inbox(&app, "Zulu").await;

    let topics = |body: &serde_json::Value| -> Vec<String> {
        body["inboxes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|inbox| inbox["topic"].as_str().unwrap().to_string())
            .collect()
    };

    let (_, first) = send(
        app.clone(),
        get_as_owner("/inboxes?page=1&page_size=2", "alice", "pw123456"),
    )
    .await;
    assert_eq!(topics(&first.unwrap()), vec!["Zulu", "Mid"]);

    let (_, second) = send(
        app,
        get_as_owner("/inboxes?page=2&page_size=2", "alice", "pw123456"),
    )
    .await;
    assert_eq!(topics(&second.unwrap()), vec!["Alpha"]);
}

#[tokio::test]
async fn default_page_parameters_apply_when_omitted() {
    let (app, _) = test_app();
    let id = create_inbox(&app, "Feedback").await;

    let (status, body) = send(
        app,
        get_as_owner(&format!("/inboxes/{id}/messages"), "alice", "pw123456"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(bodies(&body.unwrap()).is_empty());
}
