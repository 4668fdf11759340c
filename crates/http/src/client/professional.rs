//! Professional API client methods

use bytes::Bytes;
use household_core::Role;
use reqwest::Method;
use serde_json::Value;

use super::{ApiClient, ClientError, PendingRequest, Scope};
use crate::types::{ExportResponse, MessageResponse, ServiceStatusBody};

impl ApiClient {
    fn professional(&self, method: Method, path: &str) -> PendingRequest {
        self.request(method, format!("/api/professional/{path}"))
            .scope(Scope::Role(Role::Professional))
    }

    pub async fn professional_dashboard(&self) -> Result<Value, ClientError> {
        self.execute(self.professional(Method::GET, "dashboard"))
            .await
    }

    /// Start a background CSV export of pending requests
    pub async fn export_pending_requests(&self) -> Result<ExportResponse, ClientError> {
        self.execute(self.professional(Method::POST, "export_pending_requests"))
            .await
    }

    /// Download the most recent CSV export
    pub async fn download_export(&self) -> Result<Bytes, ClientError> {
        self.execute_bytes(self.professional(Method::GET, "download_export"))
            .await
    }

    pub async fn pending_requests(&self) -> Result<Value, ClientError> {
        self.execute(self.professional(Method::GET, "pending_requests"))
            .await
    }

    pub async fn accept_service(&self, id: i64) -> Result<MessageResponse, ClientError> {
        self.execute(self.professional(Method::POST, &format!("accept_service/{id}")))
            .await
    }

    pub async fn reject_service(&self, id: i64) -> Result<MessageResponse, ClientError> {
        self.execute(self.professional(Method::POST, &format!("reject_service/{id}")))
            .await
    }

    pub async fn accepted_requests(&self) -> Result<Value, ClientError> {
        self.execute(self.professional(Method::GET, "accepted_requests"))
            .await
    }

    pub async fn update_service_status(
        &self,
        id: i64,
        status: &str,
    ) -> Result<MessageResponse, ClientError> {
        let request = self
            .professional(Method::POST, &format!("update_service_status/{id}"))
            .json(&ServiceStatusBody {
                service_status: status.to_string(),
            })?;
        self.execute(request).await
    }
}
