//! Admin API client methods

use household_core::Role;
use reqwest::Method;
use serde_json::Value;

use super::{ApiClient, ClientError, PendingRequest, Scope};
use crate::types::{ExportResponse, MessageResponse, ServiceData};

impl ApiClient {
    fn admin(&self, method: Method, path: &str) -> PendingRequest {
        self.request(method, format!("/api/admin/{path}"))
            .scope(Scope::Role(Role::Admin))
    }

    pub async fn admin_dashboard(&self) -> Result<Value, ClientError> {
        self.execute(self.admin(Method::GET, "dashboard")).await
    }

    /// List customers, optionally filtered
    pub async fn customers(&self, search_query: &str) -> Result<Value, ClientError> {
        let request = self
            .admin(Method::GET, "customer_info")
            .query("search_query", search_query);
        self.execute(request).await
    }

    /// List professionals, optionally filtered
    pub async fn professionals(&self, search_query: &str) -> Result<Value, ClientError> {
        let request = self
            .admin(Method::GET, "professional_info")
            .query("search_query", search_query);
        self.execute(request).await
    }

    pub async fn block_user(&self, id: i64) -> Result<MessageResponse, ClientError> {
        self.execute(self.admin(Method::POST, &format!("block_user/{id}")))
            .await
    }

    pub async fn unblock_user(&self, id: i64) -> Result<MessageResponse, ClientError> {
        self.execute(self.admin(Method::POST, &format!("unblock_user/{id}")))
            .await
    }

    pub async fn approve_professional(&self, id: i64) -> Result<MessageResponse, ClientError> {
        self.execute(self.admin(Method::POST, &format!("approve/{id}")))
            .await
    }

    pub async fn unapprove_professional(&self, id: i64) -> Result<MessageResponse, ClientError> {
        self.execute(self.admin(Method::POST, &format!("unapprove/{id}")))
            .await
    }

    pub async fn services(&self) -> Result<Value, ClientError> {
        self.execute(self.admin(Method::GET, "services")).await
    }

    pub async fn create_service(&self, service: &ServiceData) -> Result<MessageResponse, ClientError> {
        let request = self.admin(Method::POST, "create_service").json(service)?;
        self.execute(request).await
    }

    pub async fn update_service(
        &self,
        id: i64,
        service: &ServiceData,
    ) -> Result<MessageResponse, ClientError> {
        let request = self
            .admin(Method::POST, &format!("update_service/{id}"))
            .json(service)?;
        self.execute(request).await
    }

    pub async fn delete_service(&self, id: i64) -> Result<MessageResponse, ClientError> {
        self.execute(self.admin(Method::POST, &format!("delete_service/{id}")))
            .await
    }

    /// Start a background export of closed service requests
    pub async fn export_closed_requests(&self) -> Result<ExportResponse, ClientError> {
        self.execute(self.admin(Method::POST, "export_closed_requests"))
            .await
    }
}
