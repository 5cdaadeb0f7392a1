//! # API crate — REST access layer for the wellness portal
//!
//! Every page of the web client reaches the backend through this crate. It
//! offers two shims over the same endpoints that differ only in caching policy:
//!
//! - [`ApiClient`] issues a request on every call. It attaches the bearer token
//!   from the shared [`store::Session`] and turns non-2xx responses into
//!   [`ApiError::Server`] carrying the backend's `{ "error": ... }` message.
//! - [`CachedApi`] wraps the client with a [`QueryCache`]. Reads are served from
//!   cache until a mutation invalidates one of their [`Tag`]s.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | Request building, bearer attachment, response decoding |
//! | [`error`] | [`ApiError`] and the fallback-message helper used by banners |
//! | `auth` | `POST /auth/login`, `/auth/register`, `/auth/logout` |
//! | `users` | Profile read/update, consent, patient directory |
//! | `patients` | Dashboard, active goals, progress logging and history |
//! | `providers` | Patient assignment and goal management |
//! | `care` | Preventive-care schedule, booking, completion, rescheduling |
//! | [`cache`] | Tagged query cache |
//! | [`cached`] | [`CachedApi`], the cache-aware facade |
//!
//! Endpoint methods are inherent methods on [`ApiClient`], grouped by backend
//! resource across the modules above.

mod auth;
pub mod cache;
pub mod cached;
mod care;
pub mod client;
pub mod error;
mod patients;
mod providers;
mod users;

#[cfg(test)]
mod test_support;

pub use cache::{Generation, QueryCache, Tag};
pub use cached::CachedApi;
pub use client::ApiClient;
pub use error::{ApiError, Result};
