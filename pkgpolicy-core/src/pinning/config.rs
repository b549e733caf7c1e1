//! Certificate pinning configuration
//!
//! A configuration holds alternative chains. A live chain is accepted when
//! any alternative matches it position by position. Both chains must be
//! supplied in the same direction; pin documents list the root first and the
//! leaf last, and so should callers.

use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::certificate::{Certificate, CertificateInfo, CertificateParser};
use crate::error::PinningError;

/// Attribute compared at a pinned position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValidationMode {
    /// SubjectPublicKeyInfo must be identical
    PublicKey,
    /// Subject distinguished name must be identical
    Subject,
    /// Issuer distinguished name must be identical
    Issuer,
}

impl ValidationMode {
    /// Get the string representation used in pinning documents
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PublicKey => "publickey",
            Self::Subject => "subject",
            Self::Issuer => "issuer",
        }
    }
}

impl FromStr for ValidationMode {
    type Err = PinningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "publickey" => Ok(Self::PublicKey),
            "subject" => Ok(Self::Subject),
            "issuer" => Ok(Self::Issuer),
            _ => Err(PinningError::UnknownValidation(s.to_string())),
        }
    }
}

/// One pinned position in a chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinningDetails {
    validations: Vec<ValidationMode>,
    certificate: Certificate,
}

impl PinningDetails {
    /// Pin `certificate`, comparing the given attributes
    ///
    /// Duplicate modes are collapsed. An empty mode list pins the position
    /// without comparing anything.
    pub fn new(
        certificate: Certificate,
        validations: impl IntoIterator<Item = ValidationMode>,
    ) -> Self {
        let mut validations: Vec<_> = validations.into_iter().collect();
        validations.sort();
        validations.dedup();
        Self {
            validations,
            certificate,
        }
    }

    /// Compared attributes, deduplicated
    pub fn validations(&self) -> &[ValidationMode] {
        &self.validations
    }

    /// Reference certificate the compared attributes come from
    pub fn certificate(&self) -> &Certificate {
        &self.certificate
    }

    /// Whether `candidate` satisfies every requested mode
    pub fn matches<C: CertificateInfo + ?Sized>(&self, candidate: &C) -> bool {
        self.validations.iter().all(|mode| match mode {
            ValidationMode::PublicKey => candidate.public_key() == self.certificate.public_key(),
            ValidationMode::Subject => candidate.subject() == self.certificate.subject(),
            ValidationMode::Issuer => candidate.issuer() == self.certificate.issuer(),
        })
    }
}

/// Ordered list of pinned positions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinningChain {
    details: Vec<PinningDetails>,
}

impl PinningChain {
    /// Build a chain from pinned positions, root first
    pub fn new(details: Vec<PinningDetails>) -> Self {
        Self { details }
    }

    /// Pinned positions in chain order
    pub fn details(&self) -> &[PinningDetails] {
        &self.details
    }

    /// Number of pinned positions
    pub fn len(&self) -> usize {
        self.details.len()
    }

    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }

    /// Positional match against a live chain of the same length
    pub fn matches<C: CertificateInfo>(&self, chain: &[C]) -> bool {
        self.details.len() == chain.len()
            && self
                .details
                .iter()
                .zip(chain)
                .all(|(pinned, live)| pinned.matches(live))
    }
}

/// Set of alternative pinned chains declared for a source
///
/// An empty configuration enforces nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinningConfiguration {
    chains: Vec<PinningChain>,
}

impl PinningConfiguration {
    /// Build a configuration from alternative chains
    pub fn new(chains: Vec<PinningChain>) -> Self {
        Self { chains }
    }

    /// Alternative chains, in declaration order
    pub fn chains(&self) -> &[PinningChain] {
        &self.chains
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Decode a `CertificatePinning` document
    pub fn from_json(
        document: &Value,
        parser: &dyn CertificateParser,
    ) -> Result<Self, PinningError> {
        let document = PinningDocument::deserialize(document)?;

        let chains = document
            .chains
            .into_iter()
            .enumerate()
            .map(|(index, chain)| {
                if chain.chain.is_empty() {
                    return Err(PinningError::EmptyChain(index));
                }
                let details = chain
                    .chain
                    .into_iter()
                    .map(|details| details.into_details(parser))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(PinningChain::new(details))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(chains))
    }

    /// Decode a pinning document, treating a malformed one as "no pins"
    pub fn from_json_or_empty(document: &Value, parser: &dyn CertificateParser) -> Self {
        Self::from_json(document, parser).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring malformed certificate pinning document");
            Self::default()
        })
    }

    /// Check a live chain against the pins
    ///
    /// Succeeds when nothing is pinned or when at least one alternative chain
    /// matches. Any mismatch, including a length mismatch, fails.
    pub fn validate<C: CertificateInfo>(&self, chain: &[C]) -> bool {
        self.chains.is_empty() || self.chains.iter().any(|pinned| pinned.matches(chain))
    }

    /// Parse a DER encoded live chain, then validate it
    ///
    /// A certificate that fails to parse fails validation.
    pub fn validate_der<B: AsRef<[u8]>>(
        &self,
        chain: &[B],
        parser: &dyn CertificateParser,
    ) -> bool {
        if self.chains.is_empty() {
            return true;
        }

        let parsed: Result<Vec<_>, _> =
            chain.iter().map(|der| parser.parse(der.as_ref())).collect();
        match parsed {
            Ok(certificates) => self.validate(&certificates),
            Err(e) => {
                tracing::debug!(error = %e, "Live certificate chain could not be parsed");
                false
            }
        }
    }

    fn to_document(&self) -> PinningDocument {
        PinningDocument {
            chains: self
                .chains
                .iter()
                .map(|chain| ChainDocument {
                    chain: chain
                        .details()
                        .iter()
                        .map(|details| DetailsDocument {
                            validation: details
                                .validations()
                                .iter()
                                .map(|mode| mode.as_str().to_string())
                                .collect(),
                            embedded_certificate: hex::encode(details.certificate().der()),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl Serialize for PinningConfiguration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_document().serialize(serializer)
    }
}

// Wire shape of the pinning document
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
struct PinningDocument {
    chains: Vec<ChainDocument>,
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ChainDocument {
    chain: Vec<DetailsDocument>,
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
struct DetailsDocument {
    validation: Vec<String>,
    embedded_certificate: String,
}

impl DetailsDocument {
    fn into_details(self, parser: &dyn CertificateParser) -> Result<PinningDetails, PinningError> {
        let validations = self
            .validation
            .iter()
            .map(|mode| mode.parse::<ValidationMode>())
            .collect::<Result<Vec<_>, _>>()?;
        let der = hex::decode(self.embedded_certificate.trim())?;
        let certificate = parser.parse(&der)?;
        Ok(PinningDetails::new(certificate, validations))
    }
}
