pub mod authenticator;
pub mod bearer_authenticator;
pub mod claims;
pub mod error;
pub mod jwks_cache;
pub mod oidc_config;
pub mod oidc_verifier;
pub mod static_key;
pub mod static_key_verifier;
pub mod token_verifier;

pub use authenticator::Authenticator;
pub use bearer_authenticator::{AUTHORIZATION_HEADER, BearerAuthenticator};
pub use claims::{Audience, Claims, RealmAccess, ResourceRoles};
pub use error::{AuthError, Result};
pub use jwks_cache::JwksCache;
pub use oidc_config::OidcConfig;
pub use oidc_verifier::OidcVerifier;
pub use static_key::StaticKey;
pub use static_key_verifier::StaticKeyVerifier;
pub use token_verifier::{TokenVerifier, VerifiedToken};

#[cfg(test)]
mod tests;
