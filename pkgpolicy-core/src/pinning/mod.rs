//! Certificate pinning for policy-declared sources
//!
//! This module provides:
//! - The certificate capability pins are compared against
//! - Decoding of `CertificatePinning` documents
//! - Validation of live certificate chains against declared pins

mod certificate;
mod config;

pub use certificate::{Certificate, CertificateInfo, CertificateParser, X509CertificateParser};
pub use config::{PinningChain, PinningConfiguration, PinningDetails, ValidationMode};
