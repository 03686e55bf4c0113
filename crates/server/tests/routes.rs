use std::io::Read;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use flate2::read::GzDecoder;
use indoc::indoc;
use pico_httpd::{Server, ServerConfig};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

struct RawResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl RawResponse {
    fn parse(bytes: &[u8]) -> Self {
        let split = bytes.windows(4).position(|window| window == b"\r\n\r\n").expect("response has no header terminator");
        let head = std::str::from_utf8(&bytes[..split]).unwrap();
        let body = bytes[split + 4..].to_vec();

        let mut lines = head.split("\r\n");
        let status_line = lines.next().unwrap();
        assert!(status_line.starts_with("HTTP/1.1 "), "unexpected status line: {status_line}");
        let status = status_line[9..12].parse().unwrap();

        let headers = lines
            .map(|line| {
                let (name, value) = line.split_once(": ").unwrap();
                (name.to_ascii_lowercase(), value.to_owned())
            })
            .collect();

        Self { status, headers, body }
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(n, _)| n == name).map(|(_, value)| value.as_str())
    }

    fn header_names(&self) -> Vec<&str> {
        self.headers.iter().map(|(name, _)| name.as_str()).collect()
    }
}

async fn start(directory: Option<&Path>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let config = ServerConfig::new(directory.map(Path::to_path_buf), addr.to_string());
    let server = Server::new(&config).unwrap();
    tokio::spawn(server.serve(listener));

    addr
}

async fn send_raw(addr: SocketAddr, request: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();

    let mut received = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut received)).await.unwrap().unwrap();
    received
}

async fn send(addr: SocketAddr, request: &str) -> RawResponse {
    RawResponse::parse(&send_raw(addr, request.as_bytes()).await)
}

#[tokio::test]
async fn root() {
    let addr = start(None).await;

    let response = send(addr, "GET / HTTP/1.1\r\nHost: localhost:4221\r\n\r\n").await;

    assert_eq!(response.status, 200);
    assert_eq!(response.header("content-length"), Some("0"));
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn echo_plain() {
    let addr = start(None).await;

    let response = send(addr, "GET /echo/abc HTTP/1.1\r\nHost: localhost\r\n\r\n").await;

    assert_eq!(response.status, 200);
    assert_eq!(response.header("content-type"), Some("text/plain"));
    assert_eq!(response.header("content-length"), Some("3"));
    assert_eq!(response.header("content-encoding"), None);
    assert_eq!(response.body, b"abc");
}

#[tokio::test]
async fn echo_gzip() {
    let addr = start(None).await;

    let response = send(addr, "GET /echo/abc HTTP/1.1\r\nAccept-Encoding: deflate, gzip\r\n\r\n").await;

    assert_eq!(response.status, 200);
    assert_eq!(response.header_names(), ["content-encoding", "content-type", "content-length"]);
    assert_eq!(response.header("content-encoding"), Some("gzip"));
    assert_eq!(response.header("content-length"), Some(response.body.len().to_string().as_str()));

    let mut decoded = String::new();
    GzDecoder::new(&response.body[..]).read_to_string(&mut decoded).unwrap();
    assert_eq!(decoded, "abc");
}

#[tokio::test]
async fn echo_multibyte_counts_bytes() {
    let addr = start(None).await;

    let response = send(addr, "GET /echo/h%C3%A9llo HTTP/1.1\r\n\r\n").await;

    assert_eq!(response.status, 200);
    assert_eq!(response.header("content-length"), Some("6"));
    assert_eq!(response.body, "héllo".as_bytes());
}

#[tokio::test]
async fn echo_percent_decodes_capture() {
    let addr = start(None).await;

    let response = send(addr, "GET /echo/hello%20world HTTP/1.1\r\n\r\n").await;
    assert_eq!(response.status, 200);
    assert_eq!(response.header("content-length"), Some("11"));
    assert_eq!(response.body, b"hello world");

    let response = send(addr, "GET /echo/%FF HTTP/1.1\r\n\r\n").await;
    assert_eq!(response.status, 404);
}

#[tokio::test]
async fn echo_unsupported_encoding_is_plain() {
    let addr = start(None).await;

    let response = send(addr, "GET /echo/abc HTTP/1.1\r\nAccept-Encoding: br\r\n\r\n").await;

    assert_eq!(response.status, 200);
    assert_eq!(response.header("content-encoding"), None);
    assert_eq!(response.body, b"abc");
}

#[tokio::test]
async fn user_agent() {
    let addr = start(None).await;

    let response = send(addr, "GET /user-agent HTTP/1.1\r\nUser-Agent: foobar/1.2.3\r\n\r\n").await;
    assert_eq!(response.status, 200);
    assert_eq!(response.header("content-length"), Some("12"));
    assert_eq!(response.body, b"foobar/1.2.3");

    let response = send(addr, "GET /user-agent HTTP/1.1\r\n\r\n").await;
    assert_eq!(response.status, 200);
    assert_eq!(response.header("content-length"), Some("0"));
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn large_user_agent() {
    let addr = start(None).await;
    let user_agent = "a".repeat(9000);

    let response = send(addr, &format!("GET /user-agent HTTP/1.1\r\nUser-Agent: {user_agent}\r\n\r\n")).await;

    assert_eq!(response.status, 200);
    assert_eq!(response.header("content-length"), Some("9000"));
    assert_eq!(response.body, user_agent.as_bytes());
}

#[tokio::test]
async fn many_headers() {
    let addr = start(None).await;

    let mut request = String::from("GET / HTTP/1.1\r\n");
    for i in 0..65 {
        request.push_str(&format!("X-H{i}: v\r\n"));
    }
    request.push_str("\r\n");

    let response = send(addr, &request).await;

    assert_eq!(response.status, 200);
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn unmatched_path_is_not_found() {
    let addr = start(None).await;

    let response = send(addr, "GET /nonexistent/path HTTP/1.1\r\n\r\n").await;

    assert_eq!(response.status, 404);
    assert_eq!(response.header("content-length"), Some("0"));
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn read_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), b"hello").unwrap();
    let addr = start(Some(dir.path())).await;

    let response = send(addr, "GET /files/a.txt HTTP/1.1\r\n\r\n").await;
    assert_eq!(response.status, 200);
    assert_eq!(response.header("content-type"), Some("application/octet-stream"));
    assert_eq!(response.header("content-length"), Some("5"));
    assert_eq!(response.body, b"hello");

    let response = send(addr, "GET /files/missing.txt HTTP/1.1\r\n\r\n").await;
    assert_eq!(response.status, 404);
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn write_file_then_read_it() {
    let dir = tempfile::tempdir().unwrap();
    let addr = start(Some(dir.path())).await;

    let post = indoc! {"
        POST /files/new.txt HTTP/1.1\r
        Host: localhost\r
        Content-Type: application/octet-stream\r
        Content-Length: 5\r
        \r
        hello"};

    let response = send(addr, post).await;
    assert_eq!(response.status, 201);
    assert!(response.body.is_empty());
    assert_eq!(std::fs::read(dir.path().join("new.txt")).unwrap(), b"hello");

    let response = send(addr, post).await;
    assert_eq!(response.status, 201);
    assert_eq!(std::fs::read(dir.path().join("new.txt")).unwrap(), b"hello");

    let response = send(addr, "GET /files/new.txt HTTP/1.1\r\n\r\n").await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body, b"hello");
}

#[tokio::test]
async fn file_names_are_percent_decoded() {
    let dir = tempfile::tempdir().unwrap();
    let addr = start(Some(dir.path())).await;

    let response = send(addr, "POST /files/my%20file.txt HTTP/1.1\r\nContent-Length: 2\r\n\r\nhi").await;
    assert_eq!(response.status, 201);
    assert_eq!(std::fs::read(dir.path().join("my file.txt")).unwrap(), b"hi");

    let response = send(addr, "GET /files/my%20file.txt HTTP/1.1\r\n\r\n").await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body, b"hi");
}

#[tokio::test]
async fn body_arrives_in_pieces() {
    let dir = tempfile::tempdir().unwrap();
    let addr = start(Some(dir.path())).await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(b"POST /files/slow.txt HTTP/1.1\r\nContent-Length: 11\r\n\r\nhello").await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    stream.write_all(b" world").await.unwrap();

    let mut received = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut received)).await.unwrap().unwrap();

    assert_eq!(RawResponse::parse(&received).status, 201);
    assert_eq!(std::fs::read(dir.path().join("slow.txt")).unwrap(), b"hello world");
}

#[tokio::test]
async fn files_without_directory_are_not_found() {
    let addr = start(None).await;

    let response = send(addr, "GET /files/a.txt HTTP/1.1\r\n\r\n").await;
    assert_eq!(response.status, 404);

    let response = send(addr, "POST /files/a.txt HTTP/1.1\r\nContent-Length: 1\r\n\r\nx").await;
    assert_eq!(response.status, 404);
}

#[tokio::test]
async fn malformed_request_gets_no_response() {
    let addr = start(None).await;

    let received = send_raw(addr, b"garbage without structure\r\n\r\n").await;
    assert!(received.is_empty());

    let response = send(addr, "GET / HTTP/1.1\r\n\r\n").await;
    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn slow_client_does_not_block_others() {
    let addr = start(None).await;

    let mut idle = TcpStream::connect(addr).await.unwrap();
    idle.write_all(b"GET /echo/slow HTTP/1.1\r\n").await.unwrap();

    let response = send(addr, "GET /echo/fast HTTP/1.1\r\n\r\n").await;
    assert_eq!(response.body, b"fast");

    idle.write_all(b"\r\n").await.unwrap();
    let mut received = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), idle.read_to_end(&mut received)).await.unwrap().unwrap();
    assert_eq!(RawResponse::parse(&received).body, b"slow");
}

#[tokio::test]
async fn concurrent_connections() {
    let addr = start(None).await;

    let tasks: Vec<_> = (0..32)
        .map(|i| {
            tokio::spawn(async move {
                let response = send(addr, &format!("GET /echo/n{i} HTTP/1.1\r\n\r\n")).await;
                (i, response)
            })
        })
        .collect();

    for task in tasks {
        let (i, response) = task.await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, format!("n{i}").as_bytes());
    }
}
