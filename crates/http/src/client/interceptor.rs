//! Request and response interceptors
//!
//! Outgoing: attach the bearer token of the request's scope.
//! Incoming failures, in order: excluded endpoints pass through untouched;
//! a first 401 refreshes the role's access token and retries once; a 403
//! notifies the user and navigates to the role's login view; anything else
//! passes through.

use household_core::Role;
use reqwest::{RequestBuilder, header};

use super::{ApiClient, ClientError, PendingRequest, Scope, scope::REFRESH_TOKEN_PATH};
use crate::types::{RefreshTokenRequest, RefreshTokenResponse};

/// What to do with a failed response
pub(crate) enum Outcome {
    Retry,
    Fail(ClientError),
}

impl ApiClient {
    /// Access token to present for `scope`, if the session holds one
    pub(crate) fn token_for(&self, scope: Scope) -> Option<String> {
        match scope {
            Scope::Public => None,
            Scope::Role(role) => self.session.access_token(role),
            Scope::AnyRole => Role::ALL
                .into_iter()
                .find_map(|role| self.session.access_token(role)),
        }
    }

    /// Request interceptor
    pub(crate) fn attach_token(
        &self,
        request: &PendingRequest,
        builder: RequestBuilder,
    ) -> RequestBuilder {
        match self.token_for(request.credential_scope()) {
            Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {token}")),
            None => {
                if !request.credential_scope().is_public() {
                    debug!(path = request.path(), "No token stored, sending unauthenticated");
                }
                builder
            }
        }
    }

    /// Response interceptor, failure path
    pub(crate) async fn intercept_failure(
        &self,
        request: &mut PendingRequest,
        error: ClientError,
    ) -> Outcome {
        let scope = request.credential_scope();
        if scope.is_public() {
            return Outcome::Fail(error);
        }

        match error.status() {
            Some(401) if request.mark_retried() => {
                match self.recover_session(scope).await {
                    Ok(()) => Outcome::Retry,
                    Err(refresh_error) => Outcome::Fail(refresh_error),
                }
            }
            Some(403) => {
                warn!(path = request.path(), "Permission denied for this resource");
                if let Some(role) = scope.role() {
                    self.navigator.notify(role.privilege_message());
                    self.navigator.navigate(role.login_path());
                }
                Outcome::Fail(error)
            }
            _ => Outcome::Fail(error),
        }
    }

    /// Refresh the access token of the scope's role. On failure the role's
    /// session is dropped and the user is sent to its login view.
    async fn recover_session(&self, scope: Scope) -> Result<(), ClientError> {
        let Some(role) = scope.role() else {
            return Err(ClientError::UnscopedRefresh);
        };

        let result = self.refresh_role(role).await.map(|_| ());
        if let Err(err) = &result {
            warn!(%role, error = %err, "Session expired, returning to login");
            if let Err(clear_err) = self.session.clear(role) {
                error!(%role, error = %clear_err, "Failed to clear session");
            }
            self.navigator.navigate(role.login_path());
        }
        result
    }

    /// Exchange the role's refresh token for a new access token and store it
    pub(crate) async fn refresh_role(&self, role: Role) -> Result<String, ClientError> {
        let refresh_token = self
            .session
            .refresh_token(role)
            .ok_or(ClientError::MissingRefreshToken(role))?;

        let token = self
            .exchange_refresh_token(&refresh_token)
            .await
            .map_err(|e| ClientError::RefreshFailed(Box::new(e)))?;

        self.session.set_access_token(role, &token)?;
        info!(%role, "Access token refreshed");
        Ok(token)
    }

    /// Call the refresh endpoint directly, outside the interceptor chain
    async fn exchange_refresh_token(&self, refresh_token: &str) -> Result<String, ClientError> {
        let request = PendingRequest::new(reqwest::Method::POST, REFRESH_TOKEN_PATH).json(
            &RefreshTokenRequest {
                refresh_token: refresh_token.to_string(),
            },
        )?;

        let response = Self::check(self.send(&request).await?).await?;
        let body: RefreshTokenResponse = response.json().await?;
        Ok(body.token)
    }
}
