//! Networking: the REST wrapper and its collaborators.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` is the HTTP wrapper, `transport` the seam to the actual HTTP stack,
//! `diagnostics` the channel failures are reported on, and `types` the wire
//! schema shared with the employee service.

pub mod api;
pub mod diagnostics;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;
