//! Certificate capability used by pin validation
//!
//! Validation only ever looks at three attributes of a certificate, so hosts
//! can plug their own certificate type in through [`CertificateInfo`].

use x509_parser::parse_x509_certificate;

use crate::error::CertificateError;

/// The attributes a pin can be checked against
pub trait CertificateInfo {
    /// DER encoded SubjectPublicKeyInfo
    fn public_key(&self) -> &[u8];

    /// DER encoded subject distinguished name
    fn subject(&self) -> &[u8];

    /// DER encoded issuer distinguished name
    fn issuer(&self) -> &[u8];
}

/// Turns raw certificate bytes into a [`Certificate`]
pub trait CertificateParser: Send + Sync {
    fn parse(&self, der: &[u8]) -> Result<Certificate, CertificateError>;
}

/// Owned certificate attributes plus the encoding they came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    der: Vec<u8>,
    public_key: Vec<u8>,
    subject: Vec<u8>,
    issuer: Vec<u8>,
    subject_name: String,
}

impl Certificate {
    /// Parse a DER encoded X.509 certificate
    pub fn from_der(der: &[u8]) -> Result<Self, CertificateError> {
        let (rest, cert) =
            parse_x509_certificate(der).map_err(|e| CertificateError::Parse(e.to_string()))?;
        if !rest.is_empty() {
            return Err(CertificateError::TrailingData(rest.len()));
        }

        Ok(Self {
            der: der.to_vec(),
            public_key: cert.public_key().raw.to_vec(),
            subject: cert.subject().as_raw().to_vec(),
            issuer: cert.issuer().as_raw().to_vec(),
            subject_name: cert.subject().to_string(),
        })
    }

    /// Build from attributes a host has already extracted
    pub fn from_parts(
        der: Vec<u8>,
        public_key: Vec<u8>,
        subject: Vec<u8>,
        issuer: Vec<u8>,
        subject_name: impl Into<String>,
    ) -> Self {
        Self {
            der,
            public_key,
            subject,
            issuer,
            subject_name: subject_name.into(),
        }
    }

    /// The encoding this certificate was parsed from
    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// Printable subject, for logs and diagnostics only
    pub fn subject_name(&self) -> &str {
        &self.subject_name
    }
}

impl CertificateInfo for Certificate {
    fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    fn subject(&self) -> &[u8] {
        &self.subject
    }

    fn issuer(&self) -> &[u8] {
        &self.issuer
    }
}

/// Default parser for DER encoded X.509 certificates
#[derive(Debug, Clone, Copy, Default)]
pub struct X509CertificateParser;

impl CertificateParser for X509CertificateParser {
    fn parse(&self, der: &[u8]) -> Result<Certificate, CertificateError> {
        Certificate::from_der(der)
    }
}
