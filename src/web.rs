//! HTTP front end for the chatbot
//!
//! Plain tokio TCP, one request per connection:
//! - `POST /chat`  `{"message": "..."}` -> `{"response": "..."}`
//! - `GET /help`   help text as `{"response": "..."}`
//! - `GET /`       static chat page

use crate::error::{ChatError, Result};
use crate::resolver::QueryResolver;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::{timeout, Duration};
use tracing::{debug, error, info, warn};

const INDEX_HTML: &str = include_str!("../static/index.html");
const EMPTY_MESSAGE: &str = "Please enter a message.";
const READ_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_HEADER_BYTES: usize = 16 * 1024;
const MAX_BODY_BYTES: usize = 64 * 1024;

/// A missing `message` reads as empty; `null` or a non-string is a type error
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn json<T: Serialize>(status: u16, body: &T) -> Result<Self> {
        Ok(Self {
            status,
            content_type: "application/json",
            body: serde_json::to_string(body)?,
        })
    }

    fn error(status: u16, message: impl Into<String>) -> Result<Self> {
        Self::json(status, &ErrorResponse { error: message.into() })
    }

    fn html(body: &str) -> Self {
        Self {
            status: 200,
            content_type: "text/html; charset=utf-8",
            body: body.to_string(),
        }
    }

    fn empty(status: u16) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: String::new(),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let status_text = match self.status {
            200 => "OK",
            400 => "Bad Request",
            404 => "Not Found",
            405 => "Method Not Allowed",
            408 => "Request Timeout",
            500 => "Internal Server Error",
            _ => "Unknown",
        };

        format!(
            "HTTP/1.1 {} {}\r\n\
             Content-Type: {}\r\n\
             Access-Control-Allow-Origin: *\r\n\
             Access-Control-Allow-Methods: GET, POST, OPTIONS\r\n\
             Access-Control-Allow-Headers: Content-Type\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\
             \r\n\
             {}",
            self.status,
            status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
        .into_bytes()
    }
}

/// Answer a chat body. Malformed input becomes an `Error: ...` response.
pub fn chat(resolver: &QueryResolver, body: &[u8]) -> ChatResponse {
    let request: ChatRequest = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected chat body: {}", e);
            return ChatResponse {
                response: format!("Error: {}", e),
            };
        }
    };

    let message = request.message.trim();
    if message.is_empty() {
        return ChatResponse {
            response: EMPTY_MESSAGE.to_string(),
        };
    }

    ChatResponse {
        response: resolver.resolve(message),
    }
}

pub fn route(resolver: &QueryResolver, request: &HttpRequest) -> Result<HttpResponse> {
    match (request.method.as_str(), request.path.as_str()) {
        ("POST", "/chat") => HttpResponse::json(200, &chat(resolver, &request.body)),
        ("GET", "/help") => HttpResponse::json(
            200,
            &ChatResponse {
                response: resolver.help(),
            },
        ),
        ("GET", "/") => Ok(HttpResponse::html(INDEX_HTML)),
        ("OPTIONS", _) => Ok(HttpResponse::empty(200)),
        (method, path @ ("/chat" | "/help" | "/")) => {
            HttpResponse::error(405, format!("Method not allowed: {} {}", method, path))
        }
        (method, path) => HttpResponse::error(404, format!("Not found: {} {}", method, path)),
    }
}

/// Read one request: headers up to the blank line, then `Content-Length` body bytes
pub async fn read_request<S: AsyncRead + Unpin>(stream: &mut S) -> Result<HttpRequest> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 8192];

    let header_end = loop {
        if let Some(pos) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        if buffer.len() > MAX_HEADER_BYTES {
            return Err(ChatError::Request("Headers too large".to_string()));
        }
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Err(ChatError::Request("Connection closed before end of headers".to_string()));
        }
        buffer.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
    let mut lines = head.lines();

    let request_line = lines
        .next()
        .ok_or_else(|| ChatError::Request("Empty request".to_string()))?;
    let parts: Vec<&str> = request_line.split_whitespace().collect();
    if parts.len() < 2 {
        return Err(ChatError::Request("Invalid request line".to_string()));
    }
    let method = parts[0].to_uppercase();
    let path = normalize_path(parts[1]);

    let mut content_length = 0usize;
    for line in lines {
        if let Some((key, value)) = line.split_once(':') {
            if key.trim().eq_ignore_ascii_case("content-length") {
                content_length = value
                    .trim()
                    .parse()
                    .map_err(|_| ChatError::Request("Invalid Content-Length".to_string()))?;
            }
        }
    }
    if content_length > MAX_BODY_BYTES {
        return Err(ChatError::Request("Body too large".to_string()));
    }

    let mut body = buffer[header_end..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Err(ChatError::Request("Connection closed before end of body".to_string()));
        }
        body.extend_from_slice(&chunk[..n]);
    }
    body.truncate(content_length);

    Ok(HttpRequest { method, path, body })
}

/// Drop the query string and any trailing slash (except for the root)
fn normalize_path(target: &str) -> String {
    let path = target.split('?').next().unwrap_or("");
    let path = path.trim_end_matches('/');
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}

async fn handle_connection(mut stream: TcpStream, resolver: Arc<QueryResolver>) -> Result<()> {
    let response = match timeout(READ_TIMEOUT, read_request(&mut stream)).await {
        Ok(Ok(request)) => {
            debug!("Request: {} {}", request.method, request.path);
            match route(&resolver, &request) {
                Ok(response) => response,
                Err(e) => {
                    error!("Failed to handle {} {}: {}", request.method, request.path, e);
                    HttpResponse::error(500, e.to_string())?
                }
            }
        }
        Ok(Err(ChatError::Request(msg))) => {
            warn!("Bad request: {}", msg);
            HttpResponse::error(400, msg)?
        }
        Ok(Err(e)) => return Err(e),
        Err(_) => HttpResponse::error(408, ChatError::Timeout.to_string())?,
    };

    stream.write_all(&response.to_bytes()).await?;
    stream.flush().await?;
    Ok(())
}

/// Accept connections forever, one task per connection
pub async fn serve(listener: TcpListener, resolver: Arc<QueryResolver>) -> Result<()> {
    info!("Server listening on {}", listener.local_addr()?);

    loop {
        let (stream, addr) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                error!("Failed to accept connection: {}", e);
                continue;
            }
        };
        debug!("New connection from: {}", addr);

        let resolver = resolver.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, resolver).await {
                error!("Error handling connection from {}: {}", addr, e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: &str, path: &str, body: &str) -> HttpRequest {
        HttpRequest {
            method: method.to_string(),
            path: path.to_string(),
            body: body.as_bytes().to_vec(),
        }
    }

    fn response_text(response: &HttpResponse) -> String {
        serde_json::from_str::<ChatResponse>(&response.body)
            .unwrap()
            .response
    }

    #[test]
    fn test_chat_trims_and_resolves() {
        let resolver = QueryResolver::new();
        let reply = chat(&resolver, br#"{"message": "  Microsoft income  "}"#);
        assert_eq!(reply.response, resolver.resolve("Microsoft income"));
    }

    #[test]
    fn test_chat_empty_message() {
        let resolver = QueryResolver::new();
        for body in [r#"{"message": ""}"#, r#"{"message": "   "}"#, r#"{}"#] {
            assert_eq!(chat(&resolver, body.as_bytes()).response, EMPTY_MESSAGE, "body: {}", body);
        }
    }

    #[test]
    fn test_chat_malformed_body() {
        let resolver = QueryResolver::new();
        assert!(chat(&resolver, b"not json").response.starts_with("Error: "));
        assert!(chat(&resolver, br#"{"message": 42}"#).response.starts_with("Error: "));
        let null_message = chat(&resolver, br#"{"message": null}"#).response;
        assert!(null_message.starts_with("Error: invalid type: null"), "{}", null_message);
    }

    #[test]
    fn test_routes() {
        let resolver = QueryResolver::new();

        let help = route(&resolver, &request("GET", "/help", "")).unwrap();
        assert_eq!(help.status, 200);
        assert_eq!(response_text(&help), resolver.help());

        let index = route(&resolver, &request("GET", "/", "")).unwrap();
        assert_eq!(index.status, 200);
        assert!(index.content_type.starts_with("text/html"));

        let wrong_method = route(&resolver, &request("GET", "/chat", "")).unwrap();
        assert_eq!(wrong_method.status, 405);

        let missing = route(&resolver, &request("GET", "/metrics", "")).unwrap();
        assert_eq!(missing.status, 404);
        assert!(missing.body.contains("Not found: GET /metrics"));
    }

    #[tokio::test]
    async fn test_read_request_with_body() {
        let raw = "POST /chat/?x=1 HTTP/1.1\r\nHost: localhost\r\ncontent-length: 17\r\n\r\n{\"message\":\"hi\"}\n";
        let mut stream = raw.as_bytes();
        let request = read_request(&mut stream).await.unwrap();
        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/chat");
        assert_eq!(request.body, b"{\"message\":\"hi\"}\n");
    }

    #[tokio::test]
    async fn test_read_request_truncated_body() {
        let raw = "POST /chat HTTP/1.1\r\nContent-Length: 50\r\n\r\n{}";
        let mut stream = raw.as_bytes();
        let err = read_request(&mut stream).await.unwrap_err();
        assert!(matches!(err, ChatError::Request(_)));
    }

    #[test]
    fn test_response_bytes() {
        let response = HttpResponse::json(200, &ChatResponse { response: "ok".to_string() }).unwrap();
        let text = String::from_utf8(response.to_bytes()).unwrap();
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Content-Length: 17\r\n"));
        assert!(text.ends_with("\r\n\r\n{\"response\":\"ok\"}"));
    }
}
