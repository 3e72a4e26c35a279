/// Locally held verification key, as opposed to keys discovered over OIDC
#[derive(Debug, Clone)]
pub enum StaticKey {
    /// Shared HMAC secret, verified with HS256
    Hmac { secret: Vec<u8> },
    /// PEM-encoded RSA public key, verified with RS256
    RsaPem { public_key_pem: String },
}

impl StaticKey {
    pub fn hmac(secret: impl AsRef<[u8]>) -> Self {
        Self::Hmac {
            secret: secret.as_ref().to_vec(),
        }
    }

    pub fn algorithm_name(&self) -> &'static str {
        match self {
            Self::Hmac { .. } => "HS256",
            Self::RsaPem { .. } => "RS256",
        }
    }
}
