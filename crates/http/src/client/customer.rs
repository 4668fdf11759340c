//! Customer API client methods

use household_core::Role;
use reqwest::Method;
use serde_json::Value;

use super::{ApiClient, ClientError, PendingRequest, Scope};
use crate::types::{CloseRequestBody, MessageResponse, ServiceRequestData, UpdateRequestBody};

impl ApiClient {
    fn customer(&self, method: Method, path: &str) -> PendingRequest {
        self.request(method, format!("/api/customer/{path}"))
            .scope(Scope::Role(Role::Customer))
    }

    pub async fn customer_dashboard(&self) -> Result<Value, ClientError> {
        self.execute(self.customer(Method::GET, "dashboard")).await
    }

    /// Data backing the "create request" view
    pub async fn create_request_data(&self) -> Result<Value, ClientError> {
        self.execute(self.customer(Method::GET, "create_request"))
            .await
    }

    pub async fn search_services(&self, query: &str) -> Result<Value, ClientError> {
        let request = self
            .customer(Method::GET, "search_services")
            .query("search_query", query);
        self.execute(request).await
    }

    pub async fn request_service(
        &self,
        data: &ServiceRequestData,
    ) -> Result<MessageResponse, ClientError> {
        let request = self.customer(Method::POST, "request_service").json(data)?;
        self.execute(request).await
    }

    pub async fn service_requests(&self) -> Result<Value, ClientError> {
        self.execute(self.customer(Method::GET, "service_requests"))
            .await
    }

    pub async fn update_request(
        &self,
        id: i64,
        remarks: &str,
    ) -> Result<MessageResponse, ClientError> {
        let request = self
            .customer(Method::PUT, &format!("update_request/{id}"))
            .json(&UpdateRequestBody {
                remarks: remarks.to_string(),
            })?;
        self.execute(request).await
    }

    /// Close a request, rating the professional who served it
    pub async fn close_request(&self, id: i64, rating: u8) -> Result<MessageResponse, ClientError> {
        let request = self
            .customer(Method::POST, &format!("close_request/{id}"))
            .json(&CloseRequestBody { rating })?;
        self.execute(request).await
    }
}
