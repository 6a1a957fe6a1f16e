use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use typed_gather::framework::mock::MockSource;
use typed_gather::lifecycle::{App, ServerConfig};

async fn raw_request(addr: std::net::SocketAddr, request: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

/// Full end-to-end: real listener, real socket, graceful shutdown.
#[tokio::test]
async fn test_serve_and_shutdown() {
    let mut mock = MockSource::new();
    mock.expect_fetch("Remote").return_ok();
    let mock = Arc::new(mock);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let config = ServerConfig::builder().host(addr.ip()).port(addr.port()).build();
    let app = App::with_source(config, mock.clone());

    let (stop, stopped) = oneshot::channel::<()>();
    let server = tokio::spawn(app.serve(listener, async move {
        let _ = stopped.await;
    }));

    let health = raw_request(addr, "GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n").await;
    assert!(health.starts_with("HTTP/1.1 200"), "unexpected response: {health}");
    assert!(health.ends_with("OK"));

    let body = r#"{"source_name":"Remote","delay":0}"#;
    let request = format!(
        "POST /fetch-single HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    let fetched = raw_request(addr, &request).await;
    assert!(fetched.starts_with("HTTP/1.1 200"), "unexpected response: {fetched}");
    assert!(fetched.contains(r#""source_name":"Remote""#));
    mock.verify();

    stop.send(()).unwrap();
    server.await.unwrap().unwrap();
}
