//! HTTP-level tests for the token exchange, the 401 refresh-and-retry
//! discipline, and the typed endpoint wrappers, against a wiremock server.

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use yc_autostart::api::{ApiError, CloudApiClient, InstanceStatus};

fn mock_client(server: &MockServer, oauth_token: &str) -> CloudApiClient {
    CloudApiClient::with_base_urls(
        oauth_token.to_string(),
        format!("{}/iam/v1/tokens", server.uri()),
        format!("{}/compute/v1", server.uri()),
        format!("{}/resource-manager/v1", server.uri()),
    )
}

fn token_mock(iam_token: &str) -> Mock {
    Mock::given(method("POST"))
        .and(path("/iam/v1/tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "iamToken": iam_token })))
}

#[tokio::test]
async fn token_exchange_sends_the_oauth_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/iam/v1/tokens"))
        .and(body_json(json!({ "yandexPassportOauthToken": "oauth-secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "iamToken": "iam-1" })))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = mock_client(&server, "oauth-secret");
    client.authenticate().await.unwrap();
}

#[tokio::test]
async fn rejected_token_exchange_is_an_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/iam/v1/tokens"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "oauth token is invalid" })),
        )
        .mount(&server)
        .await;

    let mut client = mock_client(&server, "bad-secret");
    let err = client.authenticate().await.unwrap_err();
    assert!(matches!(err, ApiError::Auth(_)), "got {:?}", err);
}

#[tokio::test]
async fn empty_oauth_token_fails_without_any_request() {
    let mut client = CloudApiClient::new(String::new());
    let err = client.authenticate().await.unwrap_err();
    assert!(matches!(err, ApiError::Auth(_)), "got {:?}", err);
}

#[tokio::test]
async fn refresh_and_retry_succeeds_after_401() {
    let server = MockServer::start().await;
    // one lazy acquisition plus exactly one refresh for the 401
    token_mock("iam-1").expect(2).mount(&server).await;

    // first attempt rejected as expired, retry succeeds
    Mock::given(method("GET"))
        .and(path("/compute/v1/instances/i-1"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/compute/v1/instances/i-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "i-1",
            "name": "worker",
            "status": "RUNNING"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = mock_client(&server, "oauth-secret");
    let instance = client.get_instance("i-1").await.unwrap();

    assert_eq!(instance.name, "worker");
    assert_eq!(
        InstanceStatus::classify(&instance.status),
        InstanceStatus::Running
    );
}

#[tokio::test]
async fn repeated_401_is_returned_without_a_third_attempt() {
    let server = MockServer::start().await;
    // still just one refresh beyond the lazy acquisition
    token_mock("iam-1").expect(2).mount(&server).await;

    // exactly two attempts reach the instance endpoint, never three
    Mock::given(method("GET"))
        .and(path("/compute/v1/instances/i-1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;

    let mut client = mock_client(&server, "oauth-secret");
    let err = client.get_instance("i-1").await.unwrap_err();

    match err {
        ApiError::Api { status } => assert_eq!(status.as_u16(), 401),
        other => panic!("expected ApiError::Api, got {:?}", other),
    }
}

#[tokio::test]
async fn get_instance_maps_non_success_to_api_error() {
    let server = MockServer::start().await;
    token_mock("iam-1").mount(&server).await;
    Mock::given(method("GET"))
        .and(path("/compute/v1/instances/i-1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut client = mock_client(&server, "oauth-secret");
    let err = client.get_instance("i-1").await.unwrap_err();

    match err {
        ApiError::Api { status } => assert_eq!(status.as_u16(), 500),
        other => panic!("expected ApiError::Api, got {:?}", other),
    }
}

#[tokio::test]
async fn start_instance_maps_status_codes() {
    for (status, expected) in [(200, true), (202, true), (400, false), (403, false), (500, false)] {
        let server = MockServer::start().await;
        token_mock("iam-1").mount(&server).await;
        Mock::given(method("POST"))
            .and(path("/compute/v1/instances/i-1:start"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "id": "op-42" })))
            .mount(&server)
            .await;

        let mut client = mock_client(&server, "oauth-secret");
        let accepted = client.start_instance("i-1").await.unwrap();
        assert_eq!(accepted, expected, "HTTP {}", status);
    }
}

#[tokio::test]
async fn list_endpoints_preserve_provider_order() {
    let server = MockServer::start().await;
    token_mock("iam-1").mount(&server).await;
    Mock::given(method("GET"))
        .and(path("/resource-manager/v1/clouds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "clouds": [
                { "id": "c2", "name": "beta" },
                { "id": "c1", "name": "alpha" }
            ]
        })))
        .mount(&server)
        .await;

    let mut client = mock_client(&server, "oauth-secret");
    let clouds = client.list_clouds().await.unwrap();

    let ids: Vec<&str> = clouds.iter().map(|cloud| cloud.id.as_str()).collect();
    assert_eq!(ids, ["c2", "c1"]);
}

#[tokio::test]
async fn list_endpoints_return_empty_when_nothing_exists() {
    let server = MockServer::start().await;
    token_mock("iam-1").mount(&server).await;
    Mock::given(method("GET"))
        .and(path("/resource-manager/v1/folders"))
        .and(query_param("cloudId", "c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let mut client = mock_client(&server, "oauth-secret");
    let folders = client.list_folders("c1").await.unwrap();
    assert!(folders.is_empty());
}

#[tokio::test]
async fn list_instances_surfaces_preemptible_flag() {
    let server = MockServer::start().await;
    token_mock("iam-1").mount(&server).await;
    Mock::given(method("GET"))
        .and(path("/compute/v1/instances"))
        .and(query_param("folderId", "f-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "instances": [
                {
                    "id": "i-1",
                    "name": "worker",
                    "status": "STOPPED",
                    "schedulingPolicy": { "preemptible": true }
                },
                { "id": "i-2", "name": "db", "status": "RUNNING" }
            ]
        })))
        .mount(&server)
        .await;

    let mut client = mock_client(&server, "oauth-secret");
    let instances = client.list_instances("f-1").await.unwrap();

    assert_eq!(instances.len(), 2);
    assert!(instances[0].scheduling_policy.preemptible);
    assert!(!instances[1].scheduling_policy.preemptible);
}
