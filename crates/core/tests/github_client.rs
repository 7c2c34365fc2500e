//! GithubClient behavior against an in-process API fixture: pagination
//! following, header contract, status allow-list and payload checks.

mod common;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{delete, get};
use axum::{Json, Router};
use reqwest::Method;
use serde_json::{json, Value};

use wl2board_core::config::BoardTarget;
use wl2board_core::github::GithubClient;
use wl2board_core::Error;

/// A projects endpoint that serves a fixed sequence of pages with
/// `Link: rel="next"` headers between them.
#[derive(Clone)]
struct PagedFixture {
    addr: SocketAddr,
    pages: Arc<Vec<Value>>,
    hits: Arc<AtomicUsize>,
    seen_headers: Arc<Mutex<Option<HashMap<String, String>>>>,
}

async fn paged_projects(
    State(fixture): State<PagedFixture>,
    Query(params): Query<HashMap<String, String>>,
    request_headers: HeaderMap,
) -> (HeaderMap, Json<Value>) {
    fixture.hits.fetch_add(1, Ordering::SeqCst);

    let mut seen = HashMap::new();
    for name in ["authorization", "accept", "user-agent", "content-type"] {
        if let Some(value) = request_headers.get(name).and_then(|v| v.to_str().ok()) {
            seen.insert(name.to_string(), value.to_string());
        }
    }
    *fixture.seen_headers.lock().unwrap() = Some(seen);

    let page: usize = params
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1);

    let mut response_headers = HeaderMap::new();
    if page < fixture.pages.len() {
        let link = format!(
            "<http://{addr}/orgs/acme/projects?page={next}>; rel=\"next\", <http://{addr}/orgs/acme/projects?page={last}>; rel=\"last\"",
            addr = fixture.addr,
            next = page + 1,
            last = fixture.pages.len(),
        );
        response_headers.insert(header::LINK, link.parse().unwrap());
    }

    (response_headers, Json(fixture.pages[page - 1].clone()))
}

async fn paged_client(pages: Vec<Value>) -> (GithubClient, PagedFixture) {
    let (listener, addr) = common::bind().await;
    let fixture = PagedFixture {
        addr,
        pages: Arc::new(pages),
        hits: Arc::new(AtomicUsize::new(0)),
        seen_headers: Arc::new(Mutex::new(None)),
    };
    let app = Router::new()
        .route("/orgs/acme/projects", get(paged_projects))
        .with_state(fixture.clone());
    common::serve(listener, app);

    let client = GithubClient::with_api_root(
        format!("http://{}", addr),
        "secret-token",
        &BoardTarget::Org("acme".to_string()),
    )
    .unwrap();
    (client, fixture)
}

#[tokio::test]
async fn test_paginated_get_flattens_pages_in_order() {
    let (client, fixture) =
        paged_client(vec![json!([1, 2]), json!([3]), json!([4, 5])]).await;

    let result = client.call(Method::GET, None, None).await.unwrap();

    assert_eq!(result, json!([1, 2, 3, 4, 5]));
    assert_eq!(fixture.hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_stops_when_no_next_link() {
    let (client, fixture) = paged_client(vec![json!([1, 2, 3])]).await;

    let result = client.call(Method::GET, None, None).await.unwrap();

    assert_eq!(result, json!([1, 2, 3]));
    assert_eq!(fixture.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_fixed_headers_are_sent() {
    let (client, fixture) = paged_client(vec![json!([])]).await;

    client.call(Method::GET, None, None).await.unwrap();

    let seen = fixture.seen_headers.lock().unwrap().clone().unwrap();
    assert_eq!(seen["authorization"], "token secret-token");
    assert_eq!(seen["accept"], "application/vnd.github.inertia-preview+json");
    assert_eq!(seen["user-agent"], "wl2board");
    assert_eq!(seen["content-type"], "application/json");
}

#[tokio::test]
async fn test_disallowed_status_is_fatal() {
    // No routes at all: every request 404s.
    let (listener, addr) = common::bind().await;
    common::serve(listener, Router::new());

    let client = GithubClient::with_api_root(
        format!("http://{}", addr),
        "secret-token",
        &BoardTarget::Org("acme".to_string()),
    )
    .unwrap();

    let err = client.call(Method::GET, None, None).await.unwrap_err();
    assert!(matches!(err, Error::UnexpectedStatus { status: 404, .. }));
}

#[tokio::test]
async fn test_next_link_on_non_array_payload_is_fatal() {
    let (listener, addr) = common::bind().await;

    async fn object_with_next(State(addr): State<SocketAddr>) -> (HeaderMap, Json<Value>) {
        let mut headers = HeaderMap::new();
        let link = format!("<http://{}/orgs/acme/projects?page=2>; rel=\"next\"", addr);
        headers.insert(header::LINK, link.parse().unwrap());
        (headers, Json(json!({ "id": 1 })))
    }

    let app = Router::new()
        .route("/orgs/acme/projects", get(object_with_next))
        .with_state(addr);
    common::serve(listener, app);

    let client = GithubClient::with_api_root(
        format!("http://{}", addr),
        "secret-token",
        &BoardTarget::Org("acme".to_string()),
    )
    .unwrap();

    let err = client.call(Method::GET, None, None).await.unwrap_err();
    assert!(matches!(err, Error::UnexpectedPayload(_)));
}

#[tokio::test]
async fn test_empty_body_decodes_to_null() {
    let (listener, addr) = common::bind().await;

    let app = Router::new().route(
        "/projects/columns/cards/{card_id}",
        delete(|| async { StatusCode::NO_CONTENT }),
    );
    common::serve(listener, app);

    let client = GithubClient::with_api_root(
        format!("http://{}", addr),
        "secret-token",
        &BoardTarget::Org("acme".to_string()),
    )
    .unwrap();

    let result = client
        .call(Method::DELETE, Some("projects/columns/cards/7"), None)
        .await
        .unwrap();
    assert_eq!(result, Value::Null);
}

#[tokio::test]
async fn test_unbounded_next_chain_hits_page_limit() {
    let (listener, addr) = common::bind().await;

    // Every response points back at itself.
    async fn endless(State(addr): State<SocketAddr>) -> (HeaderMap, Json<Value>) {
        let mut headers = HeaderMap::new();
        let link = format!("<http://{}/orgs/acme/projects>; rel=\"next\"", addr);
        headers.insert(header::LINK, link.parse().unwrap());
        (headers, Json(json!([])))
    }

    let app = Router::new()
        .route("/orgs/acme/projects", get(endless))
        .with_state(addr);
    common::serve(listener, app);

    let client = GithubClient::with_api_root(
        format!("http://{}", addr),
        "secret-token",
        &BoardTarget::Org("acme".to_string()),
    )
    .unwrap();

    let err = client.call(Method::GET, None, None).await.unwrap_err();
    assert!(matches!(err, Error::PageLimit(100)));
}
