//! Wire types exchanged with the backend
//!
//! Only authentication payloads and request bodies are typed. Data returned by
//! dashboards and listings is passed through as JSON documents.

use bytes::Bytes;
use household_core::{Role, TokenPair};
use serde::{Deserialize, Serialize};

/// Username/password login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    pub access_token: String,
    #[serde(default, alias = "refreshToken")]
    pub refresh_token: Option<String>,
}

impl LoginResponse {
    pub fn token_pair(&self) -> TokenPair {
        TokenPair {
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
        }
    }
}

/// Token refresh request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

/// Token refresh response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenResponse {
    pub token: String,
}

/// File attached to a registration
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub file_name: String,
    pub content: Bytes,
    pub mime_type: Option<String>,
}

/// Registration form, sent as `multipart/form-data`
#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub email: String,
    pub phone_number: String,
    pub location: String,
    pub pin_code: String,
    pub address: String,
    /// Professionals only
    pub expertise: Option<String>,
    /// Professionals only, sent as the `documents` file part
    pub document: Option<DocumentUpload>,
}

impl RegisterForm {
    /// Text fields in the order they are sent
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("username", self.username.clone()),
            ("password", self.password.clone()),
            ("role", self.role.to_string()),
            ("email", self.email.clone()),
            ("phone_number", self.phone_number.clone()),
            ("location", self.location.clone()),
            ("pin_code", self.pin_code.clone()),
            ("address", self.address.clone()),
        ];
        if let Some(expertise) = &self.expertise {
            fields.push(("expertise", expertise.clone()));
        }
        fields
    }
}

/// Service definition managed by admins
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceData {
    pub name: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_required: Option<f64>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_of_service: Option<String>,
}

/// Customer request for a service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRequestData {
    pub service_id: i64,
    pub location: String,
    pub pin_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRequestBody {
    pub remarks: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseRequestBody {
    pub rating: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatusBody {
    pub service_status: String,
}

/// Generic acknowledgement returned by most mutating endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Background export job accepted by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub message: String,
    pub task_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_request_wire_name() {
        let body = serde_json::to_value(RefreshTokenRequest {
            refresh_token: "r".into(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "refreshToken": "r" }));
    }

    #[test]
    fn test_login_response_without_refresh_token() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"success": true, "access_token": "abc"}"#).unwrap();
        assert_eq!(
            response.token_pair(),
            TokenPair {
                access_token: "abc".into(),
                refresh_token: None,
            }
        );
    }

    #[test]
    fn test_register_fields_include_expertise_only_when_set() {
        let mut form = RegisterForm {
            username: "sam".into(),
            password: "pw".into(),
            role: Role::Customer,
            email: "sam@example.com".into(),
            phone_number: "555".into(),
            location: "Pune".into(),
            pin_code: "411001".into(),
            address: "1 Main St".into(),
            expertise: None,
            document: None,
        };
        assert!(!form.fields().iter().any(|(k, _)| *k == "expertise"));
        assert!(form.fields().contains(&("role", "customer".to_string())));

        form.expertise = Some("plumbing".into());
        assert!(form.fields().contains(&("expertise", "plumbing".to_string())));
    }
}
