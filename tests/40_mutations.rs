mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

// Owner-scoped mutations: visibility toggle and delete.

fn content_ids(payload: &Value) -> Vec<String> {
    payload["files"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .iter()
        .map(|f| f["content_id"].as_str().unwrap_or_default().to_string())
        .collect()
}

async fn public_files_of(server: &common::TestServer, owner: &str) -> Result<Vec<String>> {
    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/api/user/files", server.base_url))
        .header("Authorization", common::bearer(owner))
        .json(&json!({
            "privateStatus": false,
            "publicStatus": true,
            "sortField": "file_name"
        }))
        .send()
        .await?;
    let payload = res.json::<Value>().await?;
    Ok(content_ids(&payload))
}

#[tokio::test]
async fn make_public_then_requery_includes_the_record() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    assert!(!public_files_of(&server, "u1").await?.contains(&"c1".to_string()));

    let res = client
        .patch(format!("{}/api/user/makePublic/c1", server.base_url))
        .header("Authorization", common::bearer("u1"))
        .json(&json!({ "state": true }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let payload = res.json::<Value>().await?;
    assert_eq!(payload["message"], "File visibility updated successfully!");

    assert!(public_files_of(&server, "u1").await?.contains(&"c1".to_string()));
    Ok(())
}

#[tokio::test]
async fn missing_state_is_rejected_before_the_store() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .patch(format!("{}/api/user/makePublic/c1", server.base_url))
        .header("Authorization", common::bearer("u1"))
        .json(&json!({}))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let payload = res.json::<Value>().await?;
    assert_eq!(payload["code"], "MISSING_FIELD");

    // The record is untouched
    assert!(!public_files_of(&server, "u1").await?.contains(&"c1".to_string()));
    Ok(())
}

#[tokio::test]
async fn visibility_toggle_on_unknown_content_id_is_not_found() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .patch(format!("{}/api/user/makePublic/no-such-cid", server.base_url))
        .header("Authorization", common::bearer("u1"))
        .json(&json!({ "state": true }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let payload = res.json::<Value>().await?;
    assert_eq!(payload["message"], "file_not_found");
    Ok(())
}

#[tokio::test]
async fn cross_owner_visibility_toggle_cannot_land() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    // u2's credential targeting u1's record: zero-match, not success
    let res = client
        .patch(format!("{}/api/user/makePublic/c1", server.base_url))
        .header("Authorization", common::bearer("u2"))
        .json(&json!({ "state": true }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // u1's record stayed private
    assert!(!public_files_of(&server, "u1").await?.contains(&"c1".to_string()));
    Ok(())
}

#[tokio::test]
async fn delete_removes_the_record_from_later_listings() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .patch(format!(
            "{}/api/user/deleteFile/{}",
            server.base_url,
            common::record_id(1)
        ))
        .header("Authorization", common::bearer("u1"))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let payload = res.json::<Value>().await?;
    assert_eq!(payload["message"], "File deleted successfully!");

    let res = client
        .post(format!("{}/api/user/checkFiles", server.base_url))
        .header("Authorization", common::bearer("u1"))
        .send()
        .await?;
    let payload = res.json::<Value>().await?;
    assert_eq!(content_ids(&payload), vec!["c2"]);
    Ok(())
}

#[tokio::test]
async fn delete_with_malformed_record_id_is_a_400() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .patch(format!("{}/api/user/deleteFile/not-a-uuid", server.base_url))
        .header("Authorization", common::bearer("u1"))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn cross_owner_delete_cannot_land() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .patch(format!(
            "{}/api/user/deleteFile/{}",
            server.base_url,
            common::record_id(1)
        ))
        .header("Authorization", common::bearer("u2"))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // u1 still owns both records
    let res = client
        .post(format!("{}/api/user/checkFiles", server.base_url))
        .header("Authorization", common::bearer("u1"))
        .send()
        .await?;
    let payload = res.json::<Value>().await?;
    assert_eq!(content_ids(&payload).len(), 2);
    Ok(())
}
