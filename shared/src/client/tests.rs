use super::*;
use crate::http::MockHttpClient;
use crate::protocol::HttpMethod;
use crate::route::{AppRoute, GuardDecision};
use crate::session::SessionAction;
use serde_json::json;
use std::cell::Cell;

// =========================================================
// 辅助函数
// =========================================================

const BASE: &str = "http://api.test";

fn credentials() -> Credentials {
    Credentials {
        username: "operator".to_string(),
        password: "secret".to_string(),
    }
}

fn anonymous(mock: &Rc<MockHttpClient>) -> ApiClient<Rc<MockHttpClient>> {
    ApiClient::new(mock.clone(), BASE)
}

/// 登录并把结果交给 reducer，与前端的登录流程一致
async fn login_flow(mock: &Rc<MockHttpClient>, session: Session) -> (Session, ApiResult<()>) {
    let client = ApiClient::from_session(mock.clone(), &session);
    match client.login(credentials()).await {
        Ok(token) => (session.reduce(SessionAction::LoginFinished(token)), Ok(())),
        Err(e) => (session, Err(e)),
    }
}

// =========================================================
// 登录测试
// =========================================================

#[tokio::test]
async fn test_login_success_sets_token_and_opens_guard() {
    let mock = Rc::new(MockHttpClient::new());
    mock.mock_response(HttpMethod::Post, &format!("{BASE}/auth/"), 200, "\"abc123\"");

    let (session, result) = login_flow(&mock, Session::new(BASE)).await;

    assert_eq!(result, Ok(()));
    assert_eq!(session.token.as_deref(), Some("abc123"));
    assert_eq!(
        GuardDecision::resolve(AppRoute::Pools, session.is_logged_in()),
        GuardDecision::Render(AppRoute::Pools)
    );

    let requests = mock.requests.borrow();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].header("Authorization"), None);
    assert_eq!(requests[0].header("Content-Type"), Some("application/json"));
    let crate::http::RequestBody::Json(body) = &requests[0].body else {
        panic!("expected JSON body");
    };
    let body: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(body, json!({"username": "operator", "password": "secret"}));
}

#[tokio::test]
async fn test_login_not_found_is_incorrect_credentials() {
    let mock = Rc::new(MockHttpClient::new());
    mock.mock_response(HttpMethod::Post, &format!("{BASE}/auth/"), 404, "\"Login failed\"");

    let (session, result) = login_flow(&mock, Session::new(BASE)).await;

    assert_eq!(result, Err(ApiError::InvalidCredentials));
    assert_eq!(session.token, None);
    assert_eq!(
        GuardDecision::resolve(AppRoute::Pools, session.is_logged_in()),
        GuardDecision::Login
    );
}

#[tokio::test]
async fn test_login_other_status_reports_code() {
    let mock = Rc::new(MockHttpClient::new());
    mock.mock_response(HttpMethod::Post, &format!("{BASE}/auth/"), 500, "");

    let err = anonymous(&mock).login(credentials()).await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
}

#[tokio::test]
async fn test_login_network_failure_is_raw() {
    let mock = Rc::new(MockHttpClient::new());
    mock.mock_network_error(HttpMethod::Post, &format!("{BASE}/auth/"), "connection refused");

    let err = anonymous(&mock).login(credentials()).await.unwrap_err();
    assert_eq!(err, ApiError::Network("connection refused".to_string()));
    assert_eq!(err.to_string(), "connection refused");
}

#[tokio::test]
async fn test_login_401_does_not_trigger_logout_hook() {
    let mock = Rc::new(MockHttpClient::new());
    mock.mock_response(HttpMethod::Post, &format!("{BASE}/auth/"), 401, "");
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let client = anonymous(&mock).on_unauthorized(move || counter.set(counter.get() + 1));

    let err = client.login(credentials()).await.unwrap_err();
    assert_eq!(err.status_code(), Some(401));
    assert!(!err.is_unauthorized());
    assert_eq!(calls.get(), 0);
}

// =========================================================
// 认证与 401 拦截测试
// =========================================================

#[tokio::test]
async fn test_authenticated_request_sends_token_header() {
    let mock = Rc::new(MockHttpClient::new());
    mock.mock_json(HttpMethod::Get, &format!("{BASE}/pools/"), 200, json!({"pools": []}));

    let client = anonymous(&mock).with_token("abc123");
    assert_eq!(client.list_pools().await, Ok(Vec::new()));
    assert_eq!(
        mock.requests.borrow()[0].header("Authorization"),
        Some("Token abc123")
    );
}

#[tokio::test]
async fn test_unauthorized_invokes_hook_once() {
    let mock = Rc::new(MockHttpClient::new());
    mock.mock_response(HttpMethod::Get, &format!("{BASE}/pools/"), 401, "Token has expired");
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let client = anonymous(&mock)
        .with_token("stale")
        .on_unauthorized(move || counter.set(counter.get() + 1));

    assert_eq!(client.list_pools().await, Err(ApiError::Unauthorized));
    assert_eq!(calls.get(), 1);
}

#[tokio::test]
async fn test_unauthorized_handled_for_every_endpoint() {
    let mock = Rc::new(MockHttpClient::new());
    mock.mock_response(HttpMethod::Delete, &format!("{BASE}/reservations/"), 401, "");
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let client = anonymous(&mock)
        .with_token("stale")
        .on_unauthorized(move || counter.set(counter.get() + 1));

    assert_eq!(client.cancel_reservation(1).await, Err(ApiError::Unauthorized));
    assert_eq!(calls.get(), 1);
}

#[tokio::test]
async fn test_missing_token_short_circuits() {
    let mock = Rc::new(MockHttpClient::new());
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let client = anonymous(&mock).on_unauthorized(move || counter.set(counter.get() + 1));

    assert_eq!(client.list_pools().await, Err(ApiError::Unauthorized));
    assert!(mock.requests.borrow().is_empty());
    assert_eq!(calls.get(), 1);
}

#[tokio::test]
async fn test_non_success_status_is_reported() {
    let mock = Rc::new(MockHttpClient::new());
    mock.mock_response(HttpMethod::Get, &format!("{BASE}/pools/"), 503, "maintenance");
    let client = anonymous(&mock).with_token("abc123");

    assert_eq!(
        client.list_pools().await,
        Err(ApiError::Status {
            status: 503,
            body: "maintenance".to_string()
        })
    );
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mock = Rc::new(MockHttpClient::new());
    mock.mock_response(HttpMethod::Get, &format!("{BASE}/pools/"), 200, "<html>");
    let client = anonymous(&mock).with_token("abc123");

    assert!(matches!(client.list_pools().await, Err(ApiError::Decode(_))));
}

// =========================================================
// URL 测试
// =========================================================

#[test]
fn test_url_trims_trailing_slash() {
    let client = ApiClient::new(MockHttpClient::new(), "http://api.test/");
    assert_eq!(client.base_url(), BASE);
    assert_eq!(client.url("/pools/", &[]), format!("{BASE}/pools/"));
    assert_eq!(client.url("pools/", &[]), format!("{BASE}/pools/"));
}

#[test]
fn test_query_values_are_encoded() {
    let client = ApiClient::new(MockHttpClient::new(), BASE);
    let url = client.url(
        "/stats/",
        &[("start", "2026-10-09T12:00:00+02:00".to_string())],
    );
    assert_eq!(url, format!("{BASE}/stats/?start=2026-10-09T12:00:00%2B02:00"));
}
