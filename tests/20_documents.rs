mod common;

use anyhow::Result;
use reqwest::{header, StatusCode};
use serde_json::{json, Value};

#[tokio::test]
async fn owner_can_delete_document() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    server.seed("doc1", "u1", "hello").await;
    let client = reqwest::Client::new();

    let res = client
        .delete(server.document_url("doc1"))
        .header(header::COOKIE, common::auth_cookie("u1"))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({ "success": true }));
    assert!(server.store.find("doc1").await.is_none());
    Ok(())
}

#[tokio::test]
async fn non_owner_sees_not_found() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    server.seed("doc1", "u1", "hello").await;
    let client = reqwest::Client::new();

    let res = client
        .delete(server.document_url("doc1"))
        .header(header::COOKIE, common::auth_cookie("u2"))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, json!({ "error": "Document not found" }));

    // Same response as a document that never existed
    let res = client
        .delete(server.document_url("nope"))
        .header(header::COOKIE, common::auth_cookie("u2"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, json!({ "error": "Document not found" }));

    assert!(server.store.find("doc1").await.is_some());
    Ok(())
}

#[tokio::test]
async fn owner_can_replace_content() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    server.seed("doc1", "u1", "hello").await;
    let client = reqwest::Client::new();

    let res = client
        .put(server.document_url("doc1"))
        .header(header::COOKIE, common::auth_cookie("u1"))
        .json(&json!({ "content": "hello, world" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["document"]["id"], "doc1");
    assert_eq!(body["document"]["content"], "hello, world");

    assert_eq!(server.store.find("doc1").await.unwrap().content, "hello, world");
    Ok(())
}

#[tokio::test]
async fn put_without_content_is_bad_request() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    server.seed("doc1", "u1", "hello").await;
    let client = reqwest::Client::new();

    let res = client
        .put(server.document_url("doc1"))
        .header(header::COOKIE, common::auth_cookie("u1"))
        .json(&json!({}))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?, json!({ "error": "Content is required" }));
    assert_eq!(server.store.find("doc1").await.unwrap().content, "hello");
    Ok(())
}

#[tokio::test]
async fn unsupported_method_on_owned_document() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    server.seed("doc1", "u1", "hello").await;
    let client = reqwest::Client::new();

    let res = client
        .patch(server.document_url("doc1"))
        .header(header::COOKIE, common::auth_cookie("u1"))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.json::<Value>().await?, json!({ "error": "Method not allowed" }));
    Ok(())
}

#[tokio::test]
async fn malformed_body_is_reported_generically() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    server.seed("doc1", "u1", "hello").await;
    let client = reqwest::Client::new();

    let res = client
        .put(server.document_url("doc1"))
        .header(header::COOKIE, common::auth_cookie("u1"))
        .header(header::CONTENT_TYPE, "application/json")
        .body("not json")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.json::<Value>().await?, json!({ "error": "Failed to process document" }));
    Ok(())
}
