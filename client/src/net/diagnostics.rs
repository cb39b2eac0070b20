//! Diagnostic channel for classified request failures.

use crate::error::{ApiError, ErrorClass};

/// Receives one report per failed call, after classification and before the
/// error is returned to the caller.
pub trait Diagnostics {
    fn report(&self, class: ErrorClass, path: &str, error: &ApiError);
}

/// Default channel: structured `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, class: ErrorClass, path: &str, error: &ApiError) {
        let code = class.code();
        match class {
            ErrorClass::Unauthorized | ErrorClass::Forbidden | ErrorClass::NotFound => {
                tracing::warn!(code, path, status = error.status(), error = %error, "{}", class.summary());
            }
            _ => {
                tracing::error!(code, path, status = error.status(), error = %error, "{}", class.summary());
            }
        }
    }
}
