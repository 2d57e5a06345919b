// Integration tests for the command line interface

use std::io::Write;
use tempfile::NamedTempFile;
use uri_templates::cli;

mod common;
use common::serve_once;

async fn run(args: &[&str]) -> anyhow::Result<String> {
    let mut argv = vec!["uri-templates"];
    argv.extend_from_slice(args);
    let matches = cli::command().try_get_matches_from(argv)?;
    cli::run(&matches).await
}

fn vars_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file
}

#[tokio::test]
async fn test_expand_named() {
    let output = run(&[
        "expand",
        "user/{user}/albumid/{albumId}",
        "--var",
        "user=MyName",
        "--var",
        "albumId=12345",
    ])
    .await
    .unwrap();
    assert_eq!(output, "user/MyName/albumid/12345");
}

#[tokio::test]
async fn test_expand_named_missing_is_lenient() {
    let output = run(&["expand", "user/{user}/albumid/{albumId}", "-v", "user=MyName"])
        .await
        .unwrap();
    assert_eq!(output, "user/MyName/albumid/{albumId}");
}

#[tokio::test]
async fn test_expand_strict_rejects_leftovers() {
    let err = run(&[
        "expand",
        "user/{user}/albumid/{albumId}",
        "-v",
        "user=MyName",
        "--strict",
    ])
    .await
    .unwrap_err();
    assert!(err.to_string().contains("albumId"));
}

#[tokio::test]
async fn test_expand_positional() {
    let output = run(&["expand", "user/{user}/albumid/{albumId}", "-p", "MyName", "-p", "12345"])
        .await
        .unwrap();
    assert_eq!(output, "user/MyName/albumid/12345");
}

#[tokio::test]
async fn test_expand_strict_allows_positional_values_containing_braces() {
    let output = run(&["expand", "files/{name}", "-p", "{draft}", "--strict"])
        .await
        .unwrap();
    assert_eq!(output, "files/{draft}");
}

#[tokio::test]
async fn test_expand_positional_short_fails() {
    let result = run(&["expand", "user/{user}/albumid/{albumId}", "-p", "MyName"]).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_expand_with_vars_file_and_encoding() {
    let file = vars_file("variables:\n  user: My Name\n  albumId: 12345\n");
    let path = file.path().to_str().unwrap();
    let output = run(&[
        "expand",
        "user/{user}/albumid/{albumId}",
        "--vars-file",
        path,
        "--encode",
    ])
    .await
    .unwrap();
    assert_eq!(output, "user/My%20Name/albumid/12345");
}

#[tokio::test]
async fn test_request_prints_url_and_headers() {
    let output = run(&[
        "request",
        "get",
        "user/{user}",
        "--base-url",
        "https://api.example.com/v1",
        "-v",
        "user=MyName",
        "-H",
        "Accept: application/json",
    ])
    .await
    .unwrap();
    let mut lines = output.lines();
    assert_eq!(lines.next(), Some("GET https://api.example.com/v1/user/MyName"));
    assert_eq!(lines.next(), Some("accept: application/json"));
}

#[tokio::test]
async fn test_request_uses_base_url_from_file() {
    let file = vars_file("base_url: https://api.example.com\nvariables:\n  id: 9\n");
    let path = file.path().to_str().unwrap();
    let output = run(&["request", "DELETE", "items/{id}", "-f", path])
        .await
        .unwrap();
    assert_eq!(output, "DELETE https://api.example.com/items/9");
}

#[tokio::test]
async fn test_request_requires_base_url() {
    let err = run(&["request", "GET", "items"]).await.unwrap_err();
    assert!(err.to_string().contains("base URL"));
}

#[tokio::test]
async fn test_request_rejects_bad_json() {
    let result = run(&[
        "request",
        "POST",
        "items",
        "-b",
        "https://api.example.com",
        "--json",
        "{not json",
    ])
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_request_send() {
    let (base_url, server) = serve_once().await;
    let output = run(&[
        "request",
        "PUT",
        "albums/{id}",
        "-b",
        base_url.as_str(),
        "-p",
        "3",
        "--json",
        r#"{"title":"Summer"}"#,
        "--send",
    ])
    .await
    .unwrap();
    assert_eq!(output, "204 No Content");

    let head = server.await.unwrap();
    assert!(head.starts_with("PUT /api/albums/3 HTTP/1.1\r\n"));
}
