//! Residency portal client.
//!
//! A session-aware client for the university residency service together
//! with the controllers behind its pages: registration, login, the admin
//! and student dashboards, and block and room management.
//!
//! - [`client`] sends typed requests through an ordered hook chain that
//!   attaches the bearer token and expires the session on 401/403.
//! - [`controllers`] hold form and list state and turn user actions into
//!   API calls, surfacing a notice for every outcome.
//! - [`domain`] defines the records, drafts, errors and ports.
//! - [`outbound`] implements the ports over `reqwest`, a JSON credential
//!   file and `tracing`.
//! - [`inbound`] exposes the controllers as the `portal` command.

pub mod client;
pub mod config;
pub mod controllers;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod session;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use client::{ApiClient, PortalApi};
pub use session::SessionContext;
