//! Integration tests using mock HTTP server
//!
//! Drives offset and cursor sessions end to end: Pager → reqwest → wiremock

use async_trait::async_trait;
use futures::TryStreamExt;
use serde::Deserialize;
use serde_json::json;
use solidafy_pager::{
    CancellationToken, CursorPagination, OffsetPagination, PageFetcher, PageSequence, Pager,
    PagerError,
};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Service Layer
// ============================================================================

#[derive(Debug, Clone, Deserialize, PartialEq)]
struct User {
    id: u32,
    name: String,
}

#[derive(Debug, Deserialize)]
struct UserList {
    users: Option<Vec<User>>,
    has_more: Option<bool>,
}

#[derive(Debug, Clone)]
struct ListUsers {
    page: i64,
    per_page: i64,
}

#[derive(Debug, Deserialize)]
struct EventList {
    data: Vec<String>,
    next_cursor: Option<String>,
}

#[derive(Debug, Clone, Default)]
struct ListEvents {
    starting_after: Option<String>,
}

struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    fn new(server: &MockServer) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: server.uri(),
        }
    }
}

#[async_trait]
impl PageFetcher<ListUsers> for ApiClient {
    type Response = UserList;
    type Error = reqwest::Error;

    async fn fetch(&self, request: &ListUsers) -> Result<UserList, reqwest::Error> {
        self.http
            .get(format!("{}/users", self.base_url))
            .query(&[("page", request.page), ("per_page", request.per_page)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

#[async_trait]
impl PageFetcher<ListEvents> for ApiClient {
    type Response = EventList;
    type Error = reqwest::Error;

    async fn fetch(&self, request: &ListEvents) -> Result<EventList, reqwest::Error> {
        let mut builder = self.http.get(format!("{}/events", self.base_url));
        if let Some(cursor) = &request.starting_after {
            builder = builder.query(&[("starting_after", cursor)]);
        }
        builder.send().await?.error_for_status()?.json().await
    }
}

fn users_strategy() -> OffsetPagination<ListUsers, UserList, User> {
    OffsetPagination::new(
        |req: &ListUsers| req.page,
        |req: &mut ListUsers, page: i64| req.page = page,
        |resp: &UserList| resp.users.clone(),
    )
    .with_has_next_page(|resp: &UserList| resp.has_more)
}

fn events_strategy() -> CursorPagination<ListEvents, EventList, String> {
    CursorPagination::new(
        |req: &mut ListEvents, cursor: String| req.starting_after = Some(cursor),
        |resp: &EventList| resp.next_cursor.clone(),
        |resp: &EventList| Some(resp.data.clone()),
    )
}

async fn mount_users(server: &MockServer, pages: u32, per_page: u32) {
    for page in 1..=pages {
        let users: Vec<_> = (0..per_page)
            .map(|i| {
                let id = (page - 1) * per_page + i;
                json!({"id": id, "name": format!("user-{id}")})
            })
            .collect();

        Mock::given(method("GET"))
            .and(path("/users"))
            .and(query_param("page", page.to_string()))
            .and(query_param("per_page", per_page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "users": users,
                "has_more": page < pages,
            })))
            .expect(1)
            .mount(server)
            .await;
    }
}

async fn mount_events(server: &MockServer, cursors: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/events"))
        .and(query_param_is_missing("starting_after"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": ["evt_0"],
            "next_cursor": cursors.first(),
        })))
        .expect(1)
        .mount(server)
        .await;

    for (i, cursor) in cursors.iter().enumerate() {
        Mock::given(method("GET"))
            .and(path("/events"))
            .and(query_param("starting_after", *cursor))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [format!("evt_{}", i + 1)],
                "next_cursor": cursors.get(i + 1),
            })))
            .expect(1)
            .mount(server)
            .await;
    }
}

// ============================================================================
// Offset Pagination
// ============================================================================

#[tokio::test]
async fn test_offset_pages_over_http() {
    let server = MockServer::start().await;
    mount_users(&server, 5, 5).await;

    let request = ListUsers {
        page: 1,
        per_page: 5,
    };
    let mut pager = Pager::offset(ApiClient::new(&server), request, users_strategy());
    let pages = pager.collect_pages().await.unwrap();

    assert_eq!(pages.len(), 5);
    assert!(pages.iter().all(|p| p.len() == 5));
    assert_eq!(pages[4].response().has_more, Some(false));
    assert_eq!(pages[2].items()[0].name, "user-10");
    assert_eq!(pager.state().requests, 5);
    assert_eq!(pager.request().page, 5);
}

#[tokio::test]
async fn test_offset_items_over_http() {
    let server = MockServer::start().await;
    mount_users(&server, 3, 4).await;

    let request = ListUsers {
        page: 1,
        per_page: 4,
    };
    let users: Vec<User> = Pager::offset(ApiClient::new(&server), request, users_strategy())
        .into_items()
        .try_collect()
        .await
        .unwrap();

    let ids: Vec<u32> = users.iter().map(|u| u.id).collect();
    assert_eq!(ids, (0..12).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_offset_server_error_surfaces_as_transport() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{"id": 1, "name": "Alice"}],
            "has_more": true,
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let request = ListUsers {
        page: 1,
        per_page: 1,
    };
    let mut pager = Pager::offset(ApiClient::new(&server), request, users_strategy());

    let first = pager.next_page().await.unwrap().unwrap();
    assert_eq!(first.items()[0].name, "Alice");

    let err = pager.next_page().await.unwrap_err();
    let status = match err {
        PagerError::Transport(e) => e.status(),
        PagerError::Engine(e) => panic!("Expected transport error, got {e}"),
    };
    assert_eq!(status.map(|s| s.as_u16()), Some(503));
    assert!(pager.next_page().await.unwrap().is_none());
}

// ============================================================================
// Cursor Pagination
// ============================================================================

#[tokio::test]
async fn test_cursor_pages_over_http() {
    let server = MockServer::start().await;
    mount_events(&server, &["1", "2", "3", "4"]).await;

    let mut pager = Pager::cursor(
        ApiClient::new(&server),
        ListEvents::default(),
        events_strategy(),
    );
    let pages = pager.collect_pages().await.unwrap();

    assert_eq!(pages.len(), 5);
    assert!(pages[4].response().next_cursor.is_none());
    assert_eq!(pager.request().starting_after.as_deref(), Some("4"));
}

#[tokio::test]
async fn test_cursor_items_over_http() {
    let server = MockServer::start().await;
    mount_events(&server, &["evt_a", "evt_b"]).await;

    let events: Vec<String> = Pager::cursor(
        ApiClient::new(&server),
        ListEvents::default(),
        events_strategy(),
    )
    .into_items()
    .try_collect()
    .await
    .unwrap();

    assert_eq!(events, vec!["evt_0", "evt_1", "evt_2"]);
}

#[tokio::test]
async fn test_cancelled_session_issues_no_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let token = CancellationToken::new();
    token.cancel();

    let mut pager = Pager::cursor(
        ApiClient::new(&server),
        ListEvents::default(),
        events_strategy(),
    )
    .with_cancellation(token);

    assert!(pager.next_page().await.unwrap_err().is_cancelled());
}

// ============================================================================
// Independent Sessions
// ============================================================================

#[tokio::test]
async fn test_independent_sessions_run_concurrently() {
    let server = MockServer::start().await;
    mount_users(&server, 2, 3).await;
    mount_events(&server, &["1", "2"]).await;

    let users = Pager::offset(
        ApiClient::new(&server),
        ListUsers {
            page: 1,
            per_page: 3,
        },
        users_strategy(),
    )
    .into_items()
    .try_collect::<Vec<_>>();

    let events = Pager::cursor(
        ApiClient::new(&server),
        ListEvents::default(),
        events_strategy(),
    )
    .into_items()
    .try_collect::<Vec<_>>();

    let (users, events) = tokio::join!(users, events);

    assert_eq!(users.unwrap().len(), 6);
    assert_eq!(events.unwrap(), vec!["evt_0", "evt_1", "evt_2"]);
}
