//! Outbound adapters implementing the domain ports.
//!
//! Purpose: keep HTTP, filesystem and logging details out of the client and
//! controllers. Each adapter maps its library errors into the port's error
//! enum.

pub mod credentials;
pub mod http;
pub mod notify;

pub use credentials::FileCredentialStore;
pub use http::ReqwestTransport;
pub use notify::TracingNotifier;
