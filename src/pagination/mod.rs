//! Pagination module
//!
//! Supports: next, previous and jump-to-page navigation over offset-paged
//! endpoints.
//!
//! # Overview
//!
//! A [`PaginatedSession`] owns a private copy of a request and moves its
//! offset page by page. Each step is planned, rendered, fetched and decoded
//! before anything is committed, so a failed step leaves the session exactly
//! as it was and can simply be retried.
//!
//! Counts are reported as [`ERROR_SENTINEL`] until a response carrying
//! `nb_results` has been committed.
//!
//! Navigation takes `&mut self`; a session shared between tasks needs an
//! outer `Mutex`.

mod session;
mod types;

pub use session::PaginatedSession;
pub use types::{
    Navigation, PageFetcher, PagedRequest, PagedResponse, SessionPhase, ERROR_SENTINEL,
};
