//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod http_transport;
mod session_repository;
mod token_refresher;

pub use http_transport::{HttpTransport, TransportError};
pub use session_repository::{SessionError, SessionRepository};
pub use token_refresher::TokenRefresher;
