// HTTP source: GET a snapshot document from the marketplace backend

use super::{SnapshotDocument, SourceError};
use std::time::Duration;

pub struct HttpSource {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl HttpSource {
    /// Create a new HTTP source
    ///
    /// # Errors
    /// Returns an error if the client cannot be built
    pub fn new(url: String, token: Option<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Network(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized HTTP source: {} (timeout {}s, auth: {})",
            url,
            timeout.as_secs(),
            if token.is_some() { "bearer" } else { "none" }
        );

        Ok(Self { client, url, token })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch(&self) -> Result<SnapshotDocument, SourceError> {
        let mut req = self
            .client
            .get(&self.url)
            .header("Accept", "application/json");
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let response = req
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SourceError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;
        SnapshotDocument::from_json(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned response and hand back the raw request text
    async fn serve_once(response: String) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/snapshot", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).to_string()
        });

        (url, handle)
    }

    #[tokio::test]
    async fn test_non_success_status_maps_to_http_error() {
        let (url, server) = serve_once(
            "HTTP/1.1 401 Unauthorized\r\nContent-Length: 9\r\nConnection: close\r\n\r\nbad token"
                .to_string(),
        )
        .await;

        let source =
            HttpSource::new(url, Some("secret".to_string()), Duration::from_secs(5)).unwrap();
        let err = source.fetch().await.unwrap_err();

        match err {
            SourceError::Http { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "bad token");
            }
            other => panic!("expected http error, got {:?}", other),
        }

        let request = server.await.unwrap().to_lowercase();
        assert!(request.starts_with("get /snapshot"));
        assert!(request.contains("authorization: bearer secret"));
        assert!(request.contains("accept: application/json"));
    }

    #[tokio::test]
    async fn test_success_parses_document_without_token() {
        let body = r#"{"users": [{"id": "u1", "name": "Ada", "role": "admin", "joined_at": "2026-01-01T00:00:00Z"}]}"#;
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        let (url, server) = serve_once(response).await;

        let source = HttpSource::new(url, None, Duration::from_secs(5)).unwrap();
        let snapshot = source.fetch().await.unwrap().validate();
        assert_eq!(snapshot.users.len(), 1);

        let request = server.await.unwrap().to_lowercase();
        assert!(!request.contains("authorization:"));
    }
}
