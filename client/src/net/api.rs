//! HTTP wrapper around the employee service REST API.
//!
//! Every call goes through [`ApiClient::dispatch`], which attaches the
//! bearer token on the way out and classifies failures on the way back.
//!
//! ERROR HANDLING
//! ==============
//! Failures are reported once on the diagnostic channel and then returned to
//! the caller unchanged. Nothing is retried. A 401 additionally invalidates
//! the session through [`SessionStore::logout`] and hard-redirects to the
//! entry point.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::marker::PhantomData;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::diagnostics::{Diagnostics, TracingDiagnostics};
use super::transport::{HttpRequest, HttpResponse, Method, Transport};
use super::types::{
    CreateEmployee, CreatePosition, Employee, EmployeeList, MessageResponse, Position, PositionList, SignInRequest,
    SignInResponse, UpdateEmployee, UpdatePosition,
};
use crate::error::{ApiError, ErrorClass};
use crate::router::{ENTRY_PATH, Navigator};
use crate::state::session::SessionStore;

const SIGN_IN_PATH: &str = "/auth/signin";

// =============================================================================
// CLIENT
// =============================================================================

pub struct ApiClient {
    transport: Box<dyn Transport>,
    session: Rc<SessionStore>,
    navigator: Rc<dyn Navigator>,
    diagnostics: Rc<dyn Diagnostics>,
}

impl ApiClient {
    pub fn new(transport: impl Transport + 'static, session: Rc<SessionStore>, navigator: Rc<dyn Navigator>) -> Self {
        Self { transport: Box::new(transport), session, navigator, diagnostics: Rc::new(TracingDiagnostics) }
    }

    /// Replace the default `tracing` diagnostic channel.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Rc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Native client: `reqwest` transport against `config.api_base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_config(
        config: &crate::config::ClientConfig,
        storage: Rc<dyn crate::state::storage::TokenStorage>,
        navigator: Rc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let transport = super::transport::ReqwestTransport::new(config)?;
        let session = Rc::new(SessionStore::from_config(storage, config));
        Ok(Self::new(transport, session, navigator))
    }

    /// Browser client: `fetch` transport, `localStorage` and
    /// `window.location`.
    #[cfg(feature = "hydrate")]
    pub fn browser(config: &crate::config::ClientConfig) -> Self {
        let storage = Rc::new(crate::state::storage::LocalStorage);
        let session = Rc::new(SessionStore::from_config(storage, config));
        Self::new(
            super::transport::FetchTransport::new(config.api_base_url.clone()),
            session,
            Rc::new(crate::router::LocationNavigator),
        )
    }

    pub fn session(&self) -> &Rc<SessionStore> {
        &self.session
    }

    /// Sign in and store the token. See [`SessionStore::login`].
    ///
    /// # Errors
    ///
    /// Returns the sign-in error unchanged.
    pub async fn login(&self, identifier: &str) -> Result<SignInResponse, ApiError> {
        self.session.login(self, identifier).await
    }

    pub fn logout(&self) {
        self.session.logout();
    }

    /// `POST /auth/signin` with `{ id }`. Does not touch the session.
    ///
    /// # Errors
    ///
    /// Returns the classified failure.
    pub async fn sign_in(&self, identifier: &str) -> Result<SignInResponse, ApiError> {
        let body = self.encode(SIGN_IN_PATH, &SignInRequest { id: identifier })?;
        self.call(HttpRequest::new(Method::Post, SIGN_IN_PATH).with_body(body)).await
    }

    pub fn employees(&self) -> Employees<'_> {
        Resource::new(self, "/employee")
    }

    pub fn positions(&self) -> Positions<'_> {
        Resource::new(self, "/position")
    }

    // -------------------------------------------------------------------------
    // interception
    // -------------------------------------------------------------------------

    /// Request context for one call, derived from the session as it is now.
    fn prepare(&self, mut request: HttpRequest) -> HttpRequest {
        request.set_header("Content-Type", "application/json");
        if let Some(token) = self.session.stored_token() {
            request.set_header("Authorization", format!("Bearer {token}"));
        }
        request
    }

    async fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let request = self.prepare(request);
        let method = request.method.as_str();
        let path = request.path.clone();

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => return Err(self.fail(&path, ApiError::Network(e.0))),
        };

        if response.is_success() {
            tracing::debug!(method, path = %path, status = response.status, "request completed");
            return Ok(response);
        }

        Err(self.fail(&path, ApiError::from_status(response.status, &response.body)))
    }

    fn fail(&self, path: &str, error: ApiError) -> ApiError {
        let class = error.class();
        self.diagnostics.report(class, path, &error);
        if class == ErrorClass::Unauthorized {
            self.session.logout();
            self.navigator.hard_redirect(ENTRY_PATH);
        }
        error
    }

    async fn call<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, ApiError> {
        let path = request.path.clone();
        let response = self.dispatch(request).await?;
        serde_json::from_str(&response.body).map_err(|e| self.fail(&path, ApiError::Decode(e.to_string())))
    }

    /// Serialize a request body. A failure never reaches the transport but is
    /// still reported against `path`.
    fn encode<T: Serialize>(&self, path: &str, body: &T) -> Result<serde_json::Value, ApiError> {
        serde_json::to_value(body).map_err(|e| self.fail(path, ApiError::Encode(e.to_string())))
    }
}

// =============================================================================
// RESOURCES
// =============================================================================

/// CRUD proxy for one REST collection.
///
/// `R` is the record, `L` the list page, `C`/`U` the create and update
/// bodies.
pub struct Resource<'a, R, L, C, U> {
    api: &'a ApiClient,
    base: &'static str,
    _types: PhantomData<fn() -> (R, L, C, U)>,
}

pub type Employees<'a> = Resource<'a, Employee, EmployeeList, CreateEmployee, UpdateEmployee>;
pub type Positions<'a> = Resource<'a, Position, PositionList, CreatePosition, UpdatePosition>;

impl<'a, R, L, C, U> Resource<'a, R, L, C, U>
where
    R: DeserializeOwned,
    L: DeserializeOwned,
    C: Serialize,
    U: Serialize,
{
    fn new(api: &'a ApiClient, base: &'static str) -> Self {
        Self { api, base, _types: PhantomData }
    }

    fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.base, urlencoding::encode(id))
    }

    /// `GET /x`, optionally from `cursor`.
    ///
    /// # Errors
    ///
    /// Returns the classified failure.
    pub async fn list(&self, cursor: Option<&str>) -> Result<L, ApiError> {
        let mut request = HttpRequest::new(Method::Get, self.base);
        if let Some(cursor) = cursor.filter(|c| !c.is_empty()) {
            request = request.with_query("cursor", cursor);
        }
        self.api.call(request).await
    }

    /// `GET /x/:id`.
    ///
    /// # Errors
    ///
    /// Returns the classified failure.
    pub async fn get(&self, id: &str) -> Result<R, ApiError> {
        self.api.call(HttpRequest::new(Method::Get, self.item_path(id))).await
    }

    /// `POST /x`.
    ///
    /// # Errors
    ///
    /// Returns the classified failure.
    pub async fn create(&self, body: &C) -> Result<R, ApiError> {
        let body = self.api.encode(self.base, body)?;
        self.api.call(HttpRequest::new(Method::Post, self.base).with_body(body)).await
    }

    /// `PUT /x/:id`.
    ///
    /// # Errors
    ///
    /// Returns the classified failure.
    pub async fn update(&self, id: &str, body: &U) -> Result<R, ApiError> {
        let path = self.item_path(id);
        let body = self.api.encode(&path, body)?;
        self.api.call(HttpRequest::new(Method::Put, path).with_body(body)).await
    }

    /// `DELETE /x/:id`. An empty success body reads as an empty
    /// acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns the classified failure.
    pub async fn delete(&self, id: &str) -> Result<MessageResponse, ApiError> {
        let request = HttpRequest::new(Method::Delete, self.item_path(id));
        let path = request.path.clone();
        let response = self.api.dispatch(request).await?;
        if response.body.trim().is_empty() {
            return Ok(MessageResponse::default());
        }
        serde_json::from_str(&response.body).map_err(|e| self.api.fail(&path, ApiError::Decode(e.to_string())))
    }
}
