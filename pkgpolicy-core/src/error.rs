//! Error types for pkgpolicy-core
//!
//! Only [`StoreError`] crosses the public API as a `Result`. The decode errors
//! are logged and then normalized to "no value" or "entry dropped".

use thiserror::Error;

/// Errors raised while loading a policy store snapshot
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read policy store {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid policy store TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Errors from decoding a single source policy entry
#[derive(Debug, Error)]
pub enum SourceDecodeError {
    /// Not JSON, or JSON that does not fit the source entry schema
    #[error("invalid source entry: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from decoding a certificate pinning document
#[derive(Debug, Error)]
pub enum PinningError {
    #[error("pinning document does not match schema: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("unknown pinning validation: {0}")]
    UnknownValidation(String),

    #[error("pinning chain {0} is empty")]
    EmptyChain(usize),

    #[error("embedded certificate is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("embedded certificate rejected: {0}")]
    Certificate(#[from] CertificateError),
}

/// Errors from the certificate parsing collaborator
#[derive(Debug, Error)]
pub enum CertificateError {
    #[error("certificate parse failed: {0}")]
    Parse(String),

    #[error("certificate has {0} trailing bytes")]
    TrailingData(usize),
}

pub type StoreResult<T> = Result<T, StoreError>;
