//! Authentication API client methods

use household_core::Role;
use reqwest::Method;

use super::{ApiClient, ClientError, Scope, scope::REGISTER_PATH};
use crate::types::{Credentials, LoginResponse, MessageResponse, RegisterForm};

impl ApiClient {
    /// Log in as `role` and keep the issued tokens in the session store
    pub async fn login(
        &self,
        role: Role,
        credentials: &Credentials,
    ) -> Result<LoginResponse, ClientError> {
        let request = self
            .request(Method::POST, format!("/api/{role}/login"))
            .json(credentials)?;
        let response: LoginResponse = self.execute(request).await?;

        self.session.store_pair(role, &response.token_pair())?;
        info!(%role, username = %credentials.username, "Logged in");
        Ok(response)
    }

    /// Log out of `role`, drop its tokens and return to its login view
    pub async fn logout(&self, role: Role) -> Result<MessageResponse, ClientError> {
        let request = self
            .request(Method::POST, format!("/api/{role}/logout"))
            .scope(Scope::Role(role));
        let response = self.execute(request).await?;

        self.session.clear(role)?;
        self.navigator.navigate(role.login_path());
        info!(%role, "Logged out");
        Ok(response)
    }

    /// Exchange the stored refresh token of `role` for a new access token
    ///
    /// The new token replaces the old one in the session store. Unlike the
    /// automatic refresh, a failure here leaves the session untouched.
    pub async fn refresh_token(&self, role: Role) -> Result<String, ClientError> {
        self.refresh_role(role).await
    }

    /// Register a new customer or professional
    pub async fn register(&self, form: &RegisterForm) -> Result<MessageResponse, ClientError> {
        let request = self
            .request(Method::POST, REGISTER_PATH)
            .register_form(form);
        self.execute(request).await
    }
}
