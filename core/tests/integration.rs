//! Lifecycle tests against the live mock server.
//!
//! # Design
//! `build_parse_lifecycle` drives the sans-io `ItemClient` over real HTTP with
//! ureq, validating request building and response parsing end-to-end.
//! The async tests run `ItemCollectionManager` on top of
//! `HttpItemClient<ReqwestTransport>` against the same server.

use rid_core::{
    ApiError, ClientConfig, HttpItemClient, HttpMethod, HttpResponse, Item, ItemClient,
    ItemCollectionManager, RemoteItemClient, SyncError,
};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
fn execute(req: rid_core::HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => {
            agent.post(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

/// Start the mock server on its own runtime thread and return its address.
fn spawn_blocking_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });
    addr
}

/// Start the mock server as a task on the current runtime.
async fn spawn_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    format!("http://{addr}")
}

fn manager_for(base_url: &str) -> ItemCollectionManager<HttpItemClient> {
    ItemCollectionManager::new(HttpItemClient::from_config(&ClientConfig::new(base_url)))
}

#[test]
fn build_parse_lifecycle() {
    let addr = spawn_blocking_server();
    let client = ItemClient::new(&format!("http://{addr}"));

    // Step 1: list — should be empty.
    let items = client.parse_list_items(execute(client.build_list_items())).unwrap();
    assert!(items.is_empty(), "expected empty list");

    // Step 2: create an item with a client-chosen id.
    let req = client.build_create_item(&Item::new("1", "Integration test")).unwrap();
    let created = client.parse_create_item(execute(req)).unwrap();
    assert_eq!(created, Item::new("1", "Integration test"));

    // Step 3: get the created item.
    let req = client.build_get_item("1").unwrap();
    let fetched = client.parse_get_item(execute(req)).unwrap();
    assert_eq!(fetched, created);

    // Step 4: creating the same id again is rejected by the backend.
    let req = client.build_create_item(&Item::new("1", "Duplicate")).unwrap();
    let err = client.parse_create_item(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::HttpError { status: 409, .. }));

    // Step 5: list — should have one item.
    let items = client.parse_list_items(execute(client.build_list_items())).unwrap();
    assert_eq!(items.len(), 1);

    // Step 6: delete.
    let req = client.build_delete_item("1").unwrap();
    client.parse_delete_item(execute(req)).unwrap();

    // Step 7: get after delete — should be NotFound.
    let req = client.build_get_item("1").unwrap();
    let err = client.parse_get_item(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 8: delete again — should be NotFound.
    let req = client.build_delete_item("1").unwrap();
    let err = client.parse_delete_item(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 9: list — should be empty again.
    let items = client.parse_list_items(execute(client.build_list_items())).unwrap();
    assert!(items.is_empty(), "expected empty list after delete");
}

#[tokio::test(flavor = "multi_thread")]
async fn lamp_desk_scenario() {
    let manager = manager_for(&spawn_server().await);
    manager.refresh().await.unwrap();
    assert!(manager.items().is_empty());

    let lamp = manager.add("Lamp").await.unwrap().unwrap();
    assert_eq!(lamp, Item::new("1", "Lamp"));
    assert_eq!(manager.items(), vec![Item::new("1", "Lamp")]);

    manager.add("Desk").await.unwrap();
    assert_eq!(
        manager.items(),
        vec![Item::new("1", "Lamp"), Item::new("2", "Desk")]
    );

    manager.remove(&lamp).await.unwrap();
    manager.refresh().await.unwrap();
    assert_eq!(manager.items(), vec![Item::new("2", "Desk")]);

    // The backend agrees.
    let err = manager.fetch_item("1").await.unwrap_err();
    assert!(matches!(err, SyncError::Api(ApiError::NotFound)));
    assert_eq!(manager.fetch_item("2").await.unwrap().name, "Desk");
}

#[tokio::test(flavor = "multi_thread")]
async fn blank_add_creates_nothing_remotely() {
    let base_url = spawn_server().await;
    let manager = manager_for(&base_url);

    assert!(manager.add("   ").await.unwrap().is_none());

    let remote = HttpItemClient::from_config(&ClientConfig::new(&base_url));
    assert!(remote.list_items().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn second_session_sees_first_sessions_items() {
    let base_url = spawn_server().await;
    let first = manager_for(&base_url);
    let second = manager_for(&base_url);

    first.add("Lamp").await.unwrap();
    first.add("Desk").await.unwrap();

    second.refresh().await.unwrap();
    assert_eq!(second.items(), first.items());
    assert_eq!(second.next_id().unwrap(), "3");
}
