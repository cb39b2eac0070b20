//! Session store: the single source of truth for the bearer token.
//!
//! DESIGN
//! ======
//! The in-memory token mirrors one entry in persistent storage. Every write
//! goes through this store, and [`SessionStore::logout`] is the only
//! invalidation path: the HTTP wrapper calls it on a 401 instead of touching
//! storage itself, so memory and storage cannot drift apart.
//!
//! There is no shared default header. Requests ask the store for the
//! current token when they are built.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::rc::Rc;

use super::storage::TokenStorage;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::net::api::ApiClient;
use crate::net::types::{Employee, SignInResponse};

/// Client-side view of who is signed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<Employee>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

pub struct SessionStore {
    storage: Rc<dyn TokenStorage>,
    key: String,
    session: RefCell<Session>,
}

impl SessionStore {
    /// Load the session from `storage`. An empty stored value counts as no
    /// token.
    pub fn new(storage: Rc<dyn TokenStorage>, key: impl Into<String>) -> Self {
        let key = key.into();
        let token = storage.get(&key).filter(|t| !t.is_empty());
        tracing::debug!(authenticated = token.is_some(), "session restored from storage");
        Self { storage, key, session: RefCell::new(Session { token, user: None }) }
    }

    pub fn from_config(storage: Rc<dyn TokenStorage>, config: &ClientConfig) -> Self {
        Self::new(storage, config.token_key.clone())
    }

    /// Store `token` in memory and in persistent storage. `None` or an empty
    /// string removes the stored entry.
    pub fn set_token(&self, token: Option<&str>) {
        match token.filter(|t| !t.is_empty()) {
            Some(token) => {
                self.storage.set(&self.key, token);
                self.session.borrow_mut().token = Some(token.to_owned());
            }
            None => {
                self.storage.remove(&self.key);
                self.session.borrow_mut().token = None;
            }
        }
    }

    /// Sign in with `identifier` and store the returned token.
    ///
    /// # Errors
    ///
    /// Returns the sign-in call's error unchanged, or [`ApiError::Decode`]
    /// when a success response carries no token. The session is untouched
    /// on error.
    pub async fn login(&self, api: &ApiClient, identifier: &str) -> Result<SignInResponse, ApiError> {
        let response = api.sign_in(identifier).await?;
        let Some(token) = response.token() else {
            return Err(ApiError::Decode("sign-in response carries no token".to_owned()));
        };
        self.set_token(Some(token));
        tracing::info!("signed in");
        Ok(response)
    }

    /// Drop token and user, and remove the stored entry. Idempotent.
    pub fn logout(&self) {
        self.storage.remove(&self.key);
        let mut session = self.session.borrow_mut();
        if session.token.is_some() {
            tracing::info!("session cleared");
        }
        *session = Session::default();
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.borrow().is_authenticated()
    }

    pub fn token(&self) -> Option<String> {
        self.session.borrow().token.clone()
    }

    pub fn user(&self) -> Option<Employee> {
        self.session.borrow().user.clone()
    }

    pub fn set_user(&self, user: Option<Employee>) {
        self.session.borrow_mut().user = user;
    }

    pub fn snapshot(&self) -> Session {
        self.session.borrow().clone()
    }

    /// Token as persistent storage holds it right now.
    ///
    /// Storage wins over memory: if another tab or process replaced or removed
    /// the entry, the in-memory copy follows.
    pub fn stored_token(&self) -> Option<String> {
        let stored = self.storage.get(&self.key).filter(|t| !t.is_empty());
        let mut session = self.session.borrow_mut();
        if session.token != stored {
            tracing::debug!(authenticated = stored.is_some(), "session re-synchronized from storage");
            session.token.clone_from(&stored);
            if stored.is_none() {
                session.user = None;
            }
        }
        stored
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }
}
