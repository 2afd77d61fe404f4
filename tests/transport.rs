//
//  bitbucket-api
//  tests/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use bitbucket_api::api::cloud::commits::{self, DiffParams, ListCommitsParams};
use bitbucket_api::api::cloud::pullrequests::{self, MergeStrategy, PullrequestMergeParameters};
use bitbucket_api::api::cloud::repositories::{self, DeleteRepositoryParams};
use bitbucket_api::api::cloud::{issues, Error, IssueJobStatusStatus};
use bitbucket_api::api::{
    ApiError, BlockingHttpTransport, Call, Client, DecoderTable, HttpTransport, Parsed, RequestBuilder,
};
use bitbucket_api::auth::AuthCredential;
use bitbucket_api::codec::FieldValue;
use mockito::{Matcher, Server};
use reqwest::{Method, StatusCode};
use serde_json::json;

fn commit_body() -> String {
    json!({
        "type": "commit",
        "hash": "7d8f2a1c9e0b",
        "date": "2026-01-12T09:30:00+00:00",
        "message": "Fix login redirect",
        "rendered": {"message": {"raw": "Fix login redirect"}}
    })
    .to_string()
}

#[tokio::test]
async fn test_async_get_commit_sends_credentials_and_decodes() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/repositories/acme/rocket/commit/7d8f2a1c9e0b")
        .match_header("authorization", "Bearer secret")
        .match_header("user-agent", format!("bb-api/{}", bitbucket_api::VERSION).as_str())
        .match_header("x-trace", "t-1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(commit_body())
        .create_async()
        .await;

    let client = Client::new(server.url())
        .with_header("X-Trace", "t-1")
        .with_auth(AuthCredential::bearer("secret"));
    let transport = HttpTransport::from_config(&client).unwrap();

    let call = commits::get_commit(&client, "acme", "rocket", "7d8f2a1c9e0b").unwrap();
    let response = call.send(&transport).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.status, StatusCode::OK);
    let commit = response.success().unwrap();
    assert_eq!(commit.summary(), Some("Fix login redirect"));
    assert!(commit.additional_properties.contains_key("rendered"));
}

#[test]
fn test_blocking_domain_error_is_a_value() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/repositories/acme/rocket/pullrequests/99")
        .with_status(404)
        .with_body(r#"{"type": "error", "error": {"message": "Pull request not found"}}"#)
        .create();

    let client = Client::new(server.url());
    let transport = BlockingHttpTransport::from_config(&client).unwrap();
    let call = pullrequests::get_pullrequest(&client, "acme", "rocket", 99).unwrap();

    match call.parsed_blocking(&transport).unwrap() {
        Some(Parsed::DomainError(err)) => assert_eq!(err.message(), Some("Pull request not found")),
        other => panic!("unexpected {other:?}"),
    }
    mock.assert();
}

#[test]
fn test_blocking_query_cookies_and_raw_diff() {
    let mut server = Server::new();
    let patch = "diff --git a/x b/x\n--- a/x\n+++ b/x\n@@ -1 +1 @@\n-a\n+b\n";
    let mock = server
        .mock("GET", "/repositories/acme/rocket/diff/feature..main")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("context".into(), "5".into()),
            Matcher::UrlEncoded("ignore_whitespace".into(), "true".into()),
        ]))
        .match_header("cookie", "a=1; b=2")
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body(patch)
        .create();

    let client = Client::new(server.url()).with_cookie("b", "2").with_cookie("a", "1");
    let transport = BlockingHttpTransport::from_config(&client).unwrap();
    let params = DiffParams {
        context: FieldValue::Value(5),
        ignore_whitespace: FieldValue::Value(true),
        ..Default::default()
    };
    let call = commits::get_diff(&client, "acme", "rocket", "feature..main", &params).unwrap();

    let response = call.send_blocking(&transport).unwrap();
    mock.assert();
    assert_eq!(response.parsed, Parsed::Raw(patch.as_bytes().to_vec()));
}

#[test]
fn test_blocking_and_async_share_one_pipeline() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/repositories/acme/rocket/commits")
        .match_query(Matcher::UrlEncoded("include".into(), "main".into()))
        .with_status(200)
        .with_body(
            json!({
                "pagelen": 1,
                "values": [{"type": "commit", "hash": "aaa"}],
                "next": format!("{}/repositories/acme/rocket/commits?page=2", server.url())
            })
            .to_string(),
        )
        .expect(2)
        .create();

    let client = Client::new(server.url());
    let params = ListCommitsParams {
        include: FieldValue::Value("main".to_string()),
        ..Default::default()
    };
    let call = commits::list_commits(&client, "acme", "rocket", &params).unwrap();

    let blocking = call
        .send_blocking(&BlockingHttpTransport::from_config(&client).unwrap())
        .unwrap();

    let asynchronous = tokio_test::block_on(async {
        let transport = HttpTransport::from_config(&client).unwrap();
        call.send(&transport).await.unwrap()
    });

    mock.assert();
    assert_eq!(blocking.parsed, asynchronous.parsed);
    let page = blocking.success().unwrap();
    assert!(page.has_next());
    assert_eq!(page.values()[0].hash.value().map(String::as_str), Some("aaa"));
}

#[tokio::test]
async fn test_merge_sends_typed_body_and_accepts_202() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/repositories/acme/rocket/pullrequests/7/merge")
        .match_query(Matcher::UrlEncoded("async".into(), "true".into()))
        .match_body(Matcher::Json(json!({
            "type": "pullrequest_merge_parameters",
            "merge_strategy": "fast_forward"
        })))
        .with_status(202)
        .with_header("location", "/repositories/acme/rocket/pullrequests/7/merge/task-status/t1")
        .create_async()
        .await;

    let client = Client::new(server.url()).with_auth(AuthCredential::basic("me", "pw"));
    let transport = HttpTransport::from_config(&client).unwrap();
    let body = PullrequestMergeParameters {
        merge_strategy: FieldValue::Value(MergeStrategy::FastForward),
        ..Default::default()
    };
    let call = pullrequests::merge_pullrequest(&client, "acme", "rocket", 7, Some(&body), FieldValue::Value(true))
        .unwrap();

    let response = call.send(&transport).await.unwrap();
    mock.assert_async().await;
    assert_eq!(response.parsed, Parsed::Raw(Vec::new()));
    assert_eq!(
        response.headers["location"],
        "/repositories/acme/rocket/pullrequests/7/merge/task-status/t1"
    );
}

#[tokio::test]
async fn test_delete_repository_documented_statuses() {
    let mut server = Server::new_async().await;
    let _gone = server
        .mock("DELETE", "/repositories/acme/old")
        .with_status(204)
        .create_async()
        .await;
    let _denied = server
        .mock("DELETE", "/repositories/acme/locked")
        .with_status(403)
        .with_body(r#"{"type": "error", "error": {"message": "Access denied"}}"#)
        .create_async()
        .await;
    let _bad = server
        .mock("DELETE", "/repositories/acme/weird")
        .with_status(400)
        .with_body(r#"{"type": "error", "error": {"message": "Bad redirect"}}"#)
        .create_async()
        .await;

    let client = Client::new(server.url());
    let transport = HttpTransport::from_config(&client).unwrap();

    let gone = repositories::delete_repository(&client, "acme", "old", DeleteRepositoryParams::default())
        .unwrap()
        .send(&transport)
        .await
        .unwrap();
    assert_eq!(gone.parsed, Parsed::Raw(Vec::new()));

    for (slug, message) in [("locked", "Access denied"), ("weird", "Bad redirect")] {
        let response = repositories::delete_repository(&client, "acme", slug, DeleteRepositoryParams::default())
            .unwrap()
            .send(&transport)
            .await
            .unwrap();
        assert_eq!(response.domain_error().unwrap().message(), Some(message));
    }
}

#[tokio::test]
async fn test_undocumented_status_keeps_envelope() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/repositories/acme/rocket/issues/export/rocket-issues-t9.zip")
        .with_status(500)
        .with_header("x-request-id", "r-500")
        .with_body("internal error")
        .create_async()
        .await;

    let client = Client::new(server.url()).with_auth(AuthCredential::bearer("t"));
    let transport = HttpTransport::from_config(&client).unwrap();
    let call = issues::get_issue_export_status(&client, "acme", "rocket", "rocket", "t9").unwrap();

    let response = call.send(&transport).await.unwrap();
    assert!(response.parsed.is_unmatched());
    assert_eq!(response.headers["x-request-id"], "r-500");
    assert_eq!(response.text(), "internal error");
}

#[tokio::test]
async fn test_export_status_in_progress() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/repositories/acme/rocket/issues/export/rocket-issues-t9.zip")
        .with_status(202)
        .with_body(r#"{"type": "issue_job_status", "status": "RUNNING", "pct": 40.5}"#)
        .create_async()
        .await;

    let client = Client::new(server.url()).with_auth(AuthCredential::bearer("t"));
    let transport = HttpTransport::from_config(&client).unwrap();
    let call = issues::get_issue_export_status(&client, "acme", "rocket", "rocket", "t9").unwrap();

    let job = call.send(&transport).await.unwrap().success().cloned().unwrap();
    assert_eq!(job.status, FieldValue::Value(IssueJobStatusStatus::Running));
    assert_eq!(job.percent(), Some(40.5));
}

#[tokio::test]
async fn test_malformed_documented_body_is_an_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/repositories/acme/rocket/commit/abc")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let client = Client::new(server.url());
    let transport = HttpTransport::from_config(&client).unwrap();
    let err = commits::get_commit(&client, "acme", "rocket", "abc")
        .unwrap()
        .send(&transport)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::ResponseDecode(_)));
}

#[tokio::test]
async fn test_redirects_are_returned_unless_followed() {
    let mut server = Server::new_async().await;
    let _moved = server
        .mock("GET", "/old")
        .with_status(302)
        .with_header("location", "/new")
        .create_async()
        .await;
    let _target = server
        .mock("GET", "/new")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let table = || DecoderTable::<serde_json::Value, Error>::new().success(200).raw(302);

    let client = Client::new(server.url());
    let request = RequestBuilder::new(Method::GET, "/old").build(&client).unwrap();
    let call = Call::new(request, table());
    let response = call.send(&HttpTransport::from_config(&client).unwrap()).await.unwrap();
    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.headers["location"], "/new");

    let following = client.clone().with_follow_redirects(true);
    let response = call.send(&HttpTransport::from_config(&following).unwrap()).await.unwrap();
    assert_eq!(response.parsed, Parsed::Success(json!({})));
}

#[tokio::test]
async fn test_connection_failure_is_network_error() {
    let client = Client::new("http://127.0.0.1:9");
    let transport = HttpTransport::from_config(&client).unwrap();
    let err = commits::get_commit(&client, "a", "b", "c")
        .unwrap()
        .send(&transport)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}
