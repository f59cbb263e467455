// Integration tests for the HTTP side of DefaultIndexLoader.
// Each case starts a throwaway HTTP server on localhost that answers every
// request with a canned status and body, and records the raw requests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use catalog_index_core::contract::{CatalogSource, IndexLoader, LoadError};
use catalog_index_core::loader::DefaultIndexLoader;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

struct StubServer {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

async fn serve(status_line: &'static str, body: &'static str) -> StubServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub server");
    let addr = listener.local_addr().expect("local addr");
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = requests.clone();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let mut buf = vec![0u8; 8192];
            let mut read = 0;
            // Read until the end of the request headers (GET has no body).
            while !buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut buf[read..]).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => read += n,
                }
            }
            seen.lock()
                .unwrap()
                .push(String::from_utf8_lossy(&buf[..read]).into_owned());
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    StubServer {
        base_url: format!("http://{addr}"),
        requests,
    }
}

fn loader(base_url: Option<String>) -> DefaultIndexLoader {
    DefaultIndexLoader::new(base_url, Duration::from_secs(5)).expect("client builds")
}

enum Expected {
    Records(usize),
    Format,
    Transport(Option<u16>),
}

struct TestCase {
    name: &'static str,
    status_line: &'static str,
    body: &'static str,
    expected: Expected,
}

#[tokio::test]
async fn test_http_load_outcomes_table_driven() {
    let cases = vec![
        TestCase {
            name: "array body loads every element",
            status_line: "200 OK",
            body: r#"[{"url":"/cours/a.pdf"},{"url":"/cours/b.ppt"},{}]"#,
            expected: Expected::Records(3),
        },
        TestCase {
            name: "empty array is a valid empty listing",
            status_line: "200 OK",
            body: "[]",
            expected: Expected::Records(0),
        },
        TestCase {
            name: "object body is a format error",
            status_line: "200 OK",
            body: "{}",
            expected: Expected::Format,
        },
        TestCase {
            name: "html body is a format error",
            status_line: "200 OK",
            body: "<html>not json</html>",
            expected: Expected::Format,
        },
        TestCase {
            name: "not found is a transport error with status",
            status_line: "404 Not Found",
            body: "[]",
            expected: Expected::Transport(Some(404)),
        },
        TestCase {
            name: "server error is a transport error with status",
            status_line: "500 Internal Server Error",
            body: "oops",
            expected: Expected::Transport(Some(500)),
        },
    ];

    for case in cases {
        let server = serve(case.status_line, case.body).await;
        let source = CatalogSource::Http {
            url: format!("{}/cours/index.json", server.base_url),
        };
        let result = loader(None).load(&source).await;

        match (&case.expected, result) {
            (Expected::Records(n), Ok(records)) => {
                assert_eq!(records.len(), *n, "case '{}'", case.name)
            }
            (Expected::Format, Err(LoadError::Format { .. })) => {}
            (Expected::Transport(expected), Err(LoadError::Transport { status, .. })) => {
                assert_eq!(&status, expected, "case '{}'", case.name)
            }
            (_, other) => panic!("case '{}': unexpected result {:?}", case.name, other),
        }
    }
}

#[tokio::test]
async fn test_http_load_bypasses_caches() {
    let server = serve("200 OK", "[]").await;
    let source = CatalogSource::Http {
        url: format!("{}/td/index.json", server.base_url),
    };
    loader(None).load(&source).await.expect("load succeeds");

    let requests = server.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let request = requests[0].to_ascii_lowercase();
    assert!(request.starts_with("get /td/index.json "), "request: {request}");
    assert!(request.contains("cache-control: no-cache, no-store"), "request: {request}");
    assert!(request.contains("pragma: no-cache"), "request: {request}");
}

#[tokio::test]
async fn test_named_source_resolves_against_base_url() {
    let server = serve("200 OK", r#"[{"url":"/td/serie1.pdf"}]"#).await;
    let source = CatalogSource::Named { name: "td".into() };
    let records = loader(Some(server.base_url.clone()))
        .load(&source)
        .await
        .expect("load succeeds");
    assert_eq!(records.len(), 1);

    let requests = server.requests.lock().unwrap();
    assert!(requests[0].starts_with("GET /td/index.json "));
}

#[tokio::test]
async fn test_named_source_without_base_url_fails() {
    let source = CatalogSource::Named { name: "cours".into() };
    let err = loader(None).load(&source).await.unwrap_err();
    assert_eq!(err.kind(), "transport");
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = CatalogSource::Http {
        url: format!("http://{addr}/cours/index.json"),
    };
    let err = loader(None).load(&source).await.unwrap_err();
    assert!(
        matches!(err, LoadError::Transport { status: None, .. }),
        "got {err:?}"
    );
}
