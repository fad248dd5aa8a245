//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the client expects to interact with driven adapters
//! (the HTTP transport, the credential store, navigation and notices). Each
//! fallible trait exposes a typed error generated by `define_port_error!` so
//! adapters map their failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod credential_store;
mod http_transport;
mod navigator;
mod notifier;

#[cfg(test)]
pub use credential_store::MockCredentialStore;
pub use credential_store::{
    CredentialStore, CredentialStoreError, InMemoryCredentialStore, TOKEN_KEY,
};
#[cfg(test)]
pub use http_transport::MockHttpTransport;
pub use http_transport::{ApiRequest, ApiResponse, HttpMethod, HttpTransport, TransportError};
#[cfg(test)]
pub use navigator::MockNavigator;
pub use navigator::{Navigator, RecordingNavigator};
#[cfg(test)]
pub use notifier::MockNotifier;
pub use notifier::{Notifier, RecordingNotifier};
