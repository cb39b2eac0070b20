//! Client-side session state.
//!
//! DESIGN
//! ======
//! `storage` is the persistent key-value seam (memory, file, browser
//! `localStorage`); `session` is the single source of truth for the bearer
//! token and the only place that mutates the stored entry.

pub mod session;
pub mod storage;
