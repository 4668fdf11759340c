//! In-flight request descriptor
//!
//! A [`PendingRequest`] is kept around until the call completes so that it
//! can be turned into a fresh wire request again after a token refresh.

use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::Serialize;

use super::{ClientError, Scope, scope::is_excluded};
use crate::types::{DocumentUpload, RegisterForm};

#[derive(Debug, Clone)]
pub(crate) enum Body {
    Empty,
    Json(serde_json::Value),
    Multipart {
        fields: Vec<(String, String)>,
        file: Option<(String, DocumentUpload)>,
    },
}

/// Request descriptor: method, path, parameters and retry state
#[derive(Debug, Clone)]
pub struct PendingRequest {
    method: Method,
    path: String,
    scope: Scope,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Body,
    retried: bool,
}

impl PendingRequest {
    /// Create a request whose scope is derived from `path`
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            scope: Scope::classify(&path),
            method,
            path,
            query: Vec::new(),
            headers: Vec::new(),
            body: Body::Empty,
            retried: false,
        }
    }

    /// Override the credential scope. Excluded endpoints stay public.
    #[must_use]
    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = if is_excluded(&self.path) {
            Scope::Public
        } else {
            scope
        };
        self
    }

    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach a JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ClientError> {
        self.body = Body::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Attach a registration form as a multipart body
    #[must_use]
    pub fn register_form(mut self, form: &RegisterForm) -> Self {
        self.body = Body::Multipart {
            fields: form
                .fields()
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
            file: form
                .document
                .clone()
                .map(|document| ("documents".to_string(), document)),
        };
        self
    }

    pub const fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub const fn credential_scope(&self) -> Scope {
        self.scope
    }

    pub const fn is_retried(&self) -> bool {
        self.retried
    }

    /// Flag the request as retried. Returns `false` if it already was.
    pub(crate) fn mark_retried(&mut self) -> bool {
        if self.retried {
            return false;
        }
        self.retried = true;
        true
    }

    /// Build the wire request, without credentials
    pub(crate) fn build(
        &self,
        client: &reqwest::Client,
        base_url: &str,
    ) -> Result<reqwest::RequestBuilder, ClientError> {
        let url = format!("{}{}", base_url, self.path);
        let mut request = client.request(self.method.clone(), url);

        if !self.query.is_empty() {
            request = request.query(&self.query);
        }
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        request = match &self.body {
            Body::Empty => request,
            Body::Json(value) => request.json(value),
            Body::Multipart { fields, file } => request.multipart(build_form(fields, file.as_ref())?),
        };

        Ok(request)
    }
}

fn build_form(
    fields: &[(String, String)],
    file: Option<&(String, DocumentUpload)>,
) -> Result<Form, ClientError> {
    let mut form = fields
        .iter()
        .fold(Form::new(), |form, (name, value)| {
            form.text(name.clone(), value.clone())
        });

    if let Some((name, document)) = file {
        let mut part = Part::bytes(document.content.to_vec()).file_name(document.file_name.clone());
        if let Some(mime) = &document.mime_type {
            part = part.mime_str(mime)?;
        }
        form = form.part(name.clone(), part);
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use household_core::Role;

    #[test]
    fn test_scope_follows_path() {
        let request = PendingRequest::new(Method::GET, "/api/customer/dashboard");
        assert_eq!(request.credential_scope(), Scope::Role(Role::Customer));
    }

    #[test]
    fn test_excluded_path_ignores_explicit_scope() {
        let request = PendingRequest::new(Method::POST, "/api/admin/login")
            .scope(Scope::Role(Role::Admin));
        assert_eq!(request.credential_scope(), Scope::Public);
    }

    #[test]
    fn test_retry_flag_flips_once() {
        let mut request = PendingRequest::new(Method::GET, "/api/admin/services");
        assert!(!request.is_retried());
        assert!(request.mark_retried());
        assert!(!request.mark_retried());
        assert!(request.is_retried());
    }

    #[test]
    fn test_build_sets_query_and_body() {
        let client = reqwest::Client::new();
        let request = PendingRequest::new(Method::PUT, "/api/customer/update_request/4")
            .query("search_query", "tap repair")
            .json(&serde_json::json!({ "remarks": "late" }))
            .unwrap()
            .build(&client, "http://localhost:5000")
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(request.method(), &Method::PUT);
        assert_eq!(
            request.url().as_str(),
            "http://localhost:5000/api/customer/update_request/4?search_query=tap+repair"
        );
        assert_eq!(
            request.headers()["content-type"],
            "application/json"
        );
        assert!(request.headers().get("authorization").is_none());
    }
}
