//! Endpoints shared by every role

use bytes::Bytes;
use reqwest::Method;
use serde_json::Value;

use super::{ApiClient, ClientError, Scope};

/// Percent-encode a single path segment
fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

impl ApiClient {
    /// Landing page content
    pub async fn home(&self) -> Result<Value, ClientError> {
        let request = self.request(Method::GET, "/api/home").scope(Scope::AnyRole);
        self.execute(request).await
    }

    /// Download an uploaded document
    pub async fn document(&self, filename: &str) -> Result<Bytes, ClientError> {
        let request = self
            .request(
                Method::GET,
                format!("/api/documents/{}", encode_segment(filename)),
            )
            .scope(Scope::AnyRole);
        self.execute_bytes(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("id_proof.pdf"), "id_proof.pdf");
        assert_eq!(encode_segment("my file.pdf"), "my%20file.pdf");
        assert_eq!(encode_segment("../secret"), "..%2Fsecret");
    }
}
