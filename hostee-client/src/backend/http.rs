// hostee-client/src/backend/http.rs
// HTTP 传输层 - 三个远程后端共用的 reqwest 客户端

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::{ClientError, ClientResult};

/// 服务端错误响应格式
///
/// Google-style APIs answer `{"error": {"code": 400, "message": "..."}}`,
/// the realtime database answers `{"error": "..."}`.
#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Structured { message: String },
    Plain(String),
}

/// Non-success reply from a remote service
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Rejection {
    pub status: StatusCode,
    /// Reason extracted from the error body, or the raw body
    pub message: String,
}

impl Rejection {
    pub fn into_store_error(self) -> ClientError {
        ClientError::Store(format!("{}: {}", self.status, self.message))
    }
}

/// Shared HTTP client; cheap to clone
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a client whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub(crate) fn get(&self, url: &str) -> RequestBuilder {
        self.client.get(url)
    }

    pub(crate) fn post(&self, url: &str) -> RequestBuilder {
        self.client.post(url)
    }

    pub(crate) fn patch(&self, url: &str) -> RequestBuilder {
        self.client.patch(url)
    }

    /// Send and split success from rejection
    pub(crate) async fn send(
        &self,
        request: RequestBuilder,
    ) -> ClientResult<Result<Response, Rejection>> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(Ok(response));
        }

        let text = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(ErrorBody {
                error: ErrorDetail::Structured { message } | ErrorDetail::Plain(message),
            }) => message,
            // 降级为原始响应体
            Err(_) if text.is_empty() => status.canonical_reason().unwrap_or("").to_string(),
            Err(_) => text,
        };
        tracing::debug!(%status, %message, "Remote call rejected");
        Ok(Err(Rejection { status, message }))
    }

    /// Decode a successful response body
    pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_shapes() {
        let structured: ErrorBody =
            serde_json::from_str(r#"{"error":{"code":400,"message":"EMAIL_EXISTS"}}"#).unwrap();
        assert!(matches!(
            structured.error,
            ErrorDetail::Structured { ref message } if message == "EMAIL_EXISTS"
        ));

        let plain: ErrorBody = serde_json::from_str(r#"{"error":"Permission denied"}"#).unwrap();
        assert!(matches!(plain.error, ErrorDetail::Plain(ref m) if m == "Permission denied"));
    }

    #[test]
    fn test_rejection_into_store_error() {
        let err = Rejection {
            status: StatusCode::FORBIDDEN,
            message: "Missing or insufficient permissions.".into(),
        }
        .into_store_error();
        assert!(matches!(err, ClientError::Store(ref m) if m.contains("403")));
    }

    #[test]
    fn test_transport_builds() {
        assert!(HttpTransport::new(Duration::from_secs(1)).is_ok());
    }
}
