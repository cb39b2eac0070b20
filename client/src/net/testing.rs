//! Scripted collaborators for exercising the client without a network.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::api::ApiClient;
use super::diagnostics::Diagnostics;
use super::transport::{HttpRequest, HttpResponse, Transport, TransportError};
use crate::error::{ApiError, ErrorClass};
use crate::router::Navigator;
use crate::state::session::SessionStore;
use crate::state::storage::{MemoryStorage, TokenStorage};

pub const TOKEN_KEY: &str = "token";

/// Transport answering from a queue and recording every request it sees.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    replies: Rc<RefCell<VecDeque<Result<HttpResponse, TransportError>>>>,
    sent: Rc<RefCell<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub fn reply(&self, status: u16, body: serde_json::Value) -> &Self {
        self.replies
            .borrow_mut()
            .push_back(Ok(HttpResponse { status, body: body.to_string() }));
        self
    }

    pub fn reply_raw(&self, status: u16, body: &str) -> &Self {
        self.replies
            .borrow_mut()
            .push_back(Ok(HttpResponse { status, body: body.to_owned() }));
        self
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.replies
            .borrow_mut()
            .push_back(Err(TransportError(message.to_owned())));
        self
    }

    pub fn sent(&self) -> Vec<HttpRequest> {
        self.sent.borrow().clone()
    }

    pub fn last(&self) -> HttpRequest {
        self.sent.borrow().last().cloned().expect("no request sent")
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sent.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no scripted reply".to_owned())))
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub redirects: RefCell<Vec<String>>,
}

impl Navigator for RecordingNavigator {
    fn hard_redirect(&self, path: &str) {
        self.redirects.borrow_mut().push(path.to_owned());
    }
}

#[derive(Default)]
pub struct RecordingDiagnostics {
    pub reports: RefCell<Vec<(ErrorClass, String)>>,
}

impl Diagnostics for RecordingDiagnostics {
    fn report(&self, class: ErrorClass, path: &str, _error: &ApiError) {
        self.reports.borrow_mut().push((class, path.to_owned()));
    }
}

/// Everything a test needs to drive and observe one client.
pub struct Harness {
    pub api: ApiClient,
    pub transport: ScriptedTransport,
    pub storage: Rc<MemoryStorage>,
    pub navigator: Rc<RecordingNavigator>,
    pub diagnostics: Rc<RecordingDiagnostics>,
}

impl Harness {
    pub fn anonymous() -> Self {
        Self::with_storage(MemoryStorage::new())
    }

    pub fn signed_in(token: &str) -> Self {
        Self::with_storage(MemoryStorage::with_entry(TOKEN_KEY, token))
    }

    fn with_storage(storage: MemoryStorage) -> Self {
        let storage = Rc::new(storage);
        let transport = ScriptedTransport::default();
        let navigator = Rc::new(RecordingNavigator::default());
        let diagnostics = Rc::new(RecordingDiagnostics::default());
        let session = Rc::new(SessionStore::new(storage.clone(), TOKEN_KEY));
        let api = ApiClient::new(transport.clone(), session, navigator.clone()).with_diagnostics(diagnostics.clone());
        Self { api, transport, storage, navigator, diagnostics }
    }

    pub fn session(&self) -> &SessionStore {
        self.api.session()
    }

    pub fn stored_token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY)
    }

    pub fn redirects(&self) -> Vec<String> {
        self.navigator.redirects.borrow().clone()
    }

    pub fn reports(&self) -> Vec<(ErrorClass, String)> {
        self.diagnostics.reports.borrow().clone()
    }
}
