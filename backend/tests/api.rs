//! End-to-end tests of the gateway API over a real socket.

use dfs_gateway::{new_state, router, Topology};
use serde_json::{json, Value};

/// Serve a fresh gateway on an ephemeral port and return its `/api` base.
async fn spawn_gateway() -> String {
    spawn_gateway_with(Topology::default()).await
}

async fn spawn_gateway_with(topology: Topology) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(new_state(topology));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api", addr)
}

async fn get_json(url: &str) -> (u16, Value) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

fn messages(logs: &Value) -> Vec<String> {
    logs["logs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|line| {
            let line = line.as_str().unwrap();
            line.splitn(2, "] ").nth(1).unwrap().to_string()
        })
        .collect()
}

#[tokio::test]
async fn test_poll_endpoints() {
    let base = spawn_gateway().await;

    let (code, status) = get_json(&format!("{}/status", base)).await;
    assert_eq!(code, 200);
    assert_eq!(status["status"], "Online");
    assert_eq!(status["servers"][0], json!({"name": "New York", "host": "localhost", "port": 8000}));
    assert_eq!(status["servers"].as_array().unwrap().len(), 3);

    let (_, files) = get_json(&format!("{}/files", base)).await;
    assert_eq!(files, json!({"files": ["file1.txt", "file2.txt", "file3.txt"]}));

    let (_, logs) = get_json(&format!("{}/logs", base)).await;
    assert_eq!(messages(&logs), vec!["Web Client Started"]);
}

#[tokio::test]
async fn test_write_then_read_twice() {
    let base = spawn_gateway().await;
    let http = reqwest::Client::new();

    let response = http
        .post(format!("{}/files", base))
        .json(&json!({"filename": "file1.txt", "content": "Hello Distributed World!"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let (code, first) = get_json(&format!("{}/files/file1.txt", base)).await;
    assert_eq!(code, 200);
    assert_eq!(
        first,
        json!({"filename": "file1.txt", "content": "Hello Distributed World!", "source": "SERVER"})
    );

    let (_, second) = get_json(&format!("{}/files/file1.txt", base)).await;
    assert_eq!(second["source"], "CACHE HIT");

    let (_, logs) = get_json(&format!("{}/logs", base)).await;
    assert_eq!(
        messages(&logs),
        vec![
            "Web Client Started",
            "Wrote file1.txt (Quorum Met)",
            "Read file1.txt from SERVER",
            "Read file1.txt from CACHE HIT",
        ]
    );
}

#[tokio::test]
async fn test_missing_file_is_404() {
    let base = spawn_gateway().await;

    let (code, body) = get_json(&format!("{}/files/missing.txt", base)).await;
    assert_eq!(code, 404);
    assert_eq!(body, json!({"detail": "File not found or error"}));
}

#[tokio::test]
async fn test_percent_encoded_name_is_decoded() {
    let base = spawn_gateway().await;

    let (code, body) = get_json(&format!("{}/files/dir%2Fa%20b.txt", base)).await;
    assert_eq!(code, 404);
    assert_eq!(body["detail"], "File not found or error");
}

#[tokio::test]
async fn test_unknown_file_write_returns_detail() {
    let base = spawn_gateway().await;
    let http = reqwest::Client::new();

    let response = http
        .post(format!("{}/files", base))
        .json(&json!({"filename": "nope.txt", "content": "x"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 500);
    assert_eq!(response.text().await.unwrap(), r#"{"detail":"Unknown file"}"#);

    let (_, logs) = get_json(&format!("{}/logs", base)).await;
    assert_eq!(messages(&logs).last().unwrap(), "Write Failed: nope.txt - Unknown file");
}

#[tokio::test]
async fn test_malformed_write_is_422() {
    let base = spawn_gateway().await;
    let http = reqwest::Client::new();

    let response = http
        .post(format!("{}/files", base))
        .header("content-type", "application/json")
        .body(r#"{"filename": "file1.txt"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 422);
    let body: Value = response.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().starts_with("Invalid request"));
}

#[tokio::test]
async fn test_layout_file_drives_status_and_files() {
    let topology = Topology::from_json(
        r#"{
            "servers": [{ "name": "Sydney", "host": "10.1.0.1", "port": 7000 }],
            "files": [{ "file": "report.txt", "primary": "Sydney" }]
        }"#,
    )
    .unwrap();
    let base = spawn_gateway_with(topology).await;

    let (_, status) = get_json(&format!("{}/status", base)).await;
    assert_eq!(
        status["servers"],
        json!([{ "name": "Sydney", "host": "10.1.0.1", "port": 7000 }])
    );
    let (_, files) = get_json(&format!("{}/files", base)).await;
    assert_eq!(files["files"], json!(["report.txt"]));

    let response = reqwest::Client::new()
        .post(format!("{}/files", base))
        .json(&json!({ "filename": "file1.txt", "content": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 500);
}
