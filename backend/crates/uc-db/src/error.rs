use uc_rpc::RpcError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Column '{column}' is reserved for the tenant scope {location}")]
    ReservedColumn {
        column: &'static str,
        location: ErrorLocation,
    },

    #[error("Tenant scope unavailable: {source} {location}")]
    TenantUnresolved {
        #[source]
        source: RpcError,
        location: ErrorLocation,
    },
}

impl DbError {
    #[track_caller]
    pub fn reserved_column(column: &'static str) -> Self {
        Self::ReservedColumn {
            column,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<RpcError> for DbError {
    #[track_caller]
    fn from(source: RpcError) -> Self {
        Self::TenantUnresolved {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
