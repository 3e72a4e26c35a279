pub mod connect;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod session;
pub mod verifier;


pub use connect::{CONNECT_TIMEOUT_HEADER, ConnectError, ConnectErrorBody};
pub use error::{Result as ServerResult, ServerError};
pub use routes::{RouterConfig, build_router};
pub use verifier::{VerifierSetup, build_verifier};
