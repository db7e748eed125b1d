//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives it two ways: the
//! host-does-IO path (`build_execute` -> ureq -> `parse_execute`) and the
//! async `Crossword` wrapper over `ReqwestTransport`.

use std::net::SocketAddr;

use crossword_core::{
    ApiError, ClientOptions, Crossword, CrosswordClient, HttpRequest, HttpResponse, QueryOptions,
};

const KEY: &str = "integration-key";

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses come back as data and the core client interprets them.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut builder = agent.get(&req.url);
    for (name, value) in &req.headers {
        builder = builder.header(name, value);
    }
    let mut response = builder.call().expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

/// Start the mock server on its own thread and return its address.
fn spawn_server() -> SocketAddr {
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
            mock_server::run(listener, KEY).await
        })
        .unwrap();
    });
    addr
}

fn options(addr: SocketAddr, key: &str) -> ClientOptions {
    ClientOptions::new(key)
        .with_secure(false)
        .with_host(&addr.to_string())
}

#[test]
fn host_does_io_round_trip() {
    let addr = spawn_server();
    let client = CrosswordClient::new(options(addr, KEY));

    // No query: server defaults.
    let req = client.build_execute(&QueryOptions::new()).unwrap();
    let resp = client.parse_execute(execute(req)).unwrap();
    assert!(resp.is_ok());
    assert!(resp.error.is_none());
    assert!(resp.code.is_none());
    let data = resp.data.unwrap();
    assert_eq!(data.size, 15);
    assert_eq!(data.word_count, 2);
    assert_eq!(data.across[0].answer, "CAT");

    // Query values reach the server.
    let query = QueryOptions::new().size("small").theme("animals").difficulty("easy");
    let req = client.build_execute(&query).unwrap();
    let data = client.parse_execute(execute(req)).unwrap().data.unwrap();
    assert_eq!(data.size, 10);
    assert_eq!(data.theme, "animals");
    assert_eq!(data.difficulty, "easy");

    // Remote rejection is passed through.
    let req = client.build_execute(&QueryOptions::new().size("huge")).unwrap();
    let err = client.parse_execute(execute(req)).unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.remote_envelope().unwrap().code, Some(400));
}

#[tokio::test]
async fn wrapper_round_trip() {
    let addr = spawn_server();
    let crossword = Crossword::new(options(addr, KEY));

    let resp = crossword.execute(None).await.unwrap();
    assert_eq!(resp.data.unwrap().theme, "random");

    let query = QueryOptions::new().size("large");
    let (tx, rx) = std::sync::mpsc::channel();
    let resp = crossword
        .execute_with(Some(&query), move |result| {
            tx.send(result.map(|r| r.data.as_ref().map(|d| d.size)).is_ok())
                .unwrap();
        })
        .await
        .unwrap();
    assert_eq!(resp.data.unwrap().size, 20);
    assert!(rx.recv().unwrap());
}

#[tokio::test]
async fn wrapper_concurrent_calls() {
    let addr = spawn_server();
    let crossword = Crossword::new(options(addr, KEY));
    let small = QueryOptions::new().size("small").theme("food");
    let medium = QueryOptions::new().size("medium").theme("sports");

    let (a, b) = tokio::join!(crossword.execute(Some(&small)), crossword.execute(Some(&medium)));
    let (a, b) = (a.unwrap().data.unwrap(), b.unwrap().data.unwrap());
    assert_eq!((a.size, a.theme.as_str()), (10, "food"));
    assert_eq!((b.size, b.theme.as_str()), (15, "sports"));
}

#[tokio::test]
async fn wrapper_rejected_key() {
    let addr = spawn_server();
    let crossword = Crossword::new(options(addr, "wrong-key"));

    let err = crossword.execute(None).await.unwrap_err();
    let envelope = err.remote_envelope().unwrap();
    assert_eq!(err.status(), Some(401));
    assert_eq!(envelope.status, "error");
    assert!(envelope.error.is_some());
}

#[tokio::test]
async fn wrapper_transport_failure() {
    // Bind then drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let crossword = Crossword::new(options(addr, KEY));

    let err = crossword.execute(None).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
