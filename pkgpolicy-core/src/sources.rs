//! Administrator-declared package sources
//!
//! Source list policies are sub-keys whose children each hold one JSON
//! encoded source entry. Entries are decoded independently: a malformed
//! entry is dropped and the rest of the list survives.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SourceDecodeError;
use crate::pinning::{CertificateParser, PinningConfiguration};
use crate::store::PolicyStore;

/// Trust flag a policy can grant to a source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceTrustLevel {
    /// No extra trust
    None,
    /// Packages from the source are trusted
    Trusted,
    /// The source is treated as store origin
    StoreOrigin,
}

impl SourceTrustLevel {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Trusted => "Trusted",
            Self::StoreOrigin => "StoreOrigin",
        }
    }
}

impl FromStr for SourceTrustLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "trusted" => Ok(Self::Trusted),
            "storeorigin" => Ok(Self::StoreOrigin),
            _ => Err(format!("unknown trust level: {}", s)),
        }
    }
}

/// A package source declared by policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SourceFromPolicy {
    pub name: String,
    pub arg: String,
    #[serde(rename = "Type")]
    pub source_type: String,
    pub data: String,
    pub identifier: String,
    /// Trust flags exactly as declared, in declaration order
    pub trust_level: Vec<String>,
    pub explicit: bool,
    /// Pins for the source's certificate chain (empty when none declared)
    #[serde(
        rename = "CertificatePinning",
        skip_serializing_if = "PinningConfiguration::is_empty"
    )]
    pub pinning_configuration: PinningConfiguration,
}

impl SourceFromPolicy {
    /// Decode one JSON source entry
    pub fn from_json(
        payload: &str,
        parser: &dyn CertificateParser,
    ) -> Result<Self, SourceDecodeError> {
        let entry: SourceEntry = serde_json::from_str(payload)?;

        let pinning_configuration = entry
            .certificate_pinning
            .as_ref()
            .map(|document| PinningConfiguration::from_json_or_empty(document, parser))
            .unwrap_or_default();

        Ok(Self {
            name: entry.name,
            arg: entry.arg,
            source_type: entry.source_type,
            data: entry.data,
            identifier: entry.identifier,
            trust_level: entry.trust_level,
            explicit: entry.explicit,
            pinning_configuration,
        })
    }

    /// Export back to the policy wire format
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Known trust flags, skipping tokens this client does not recognize
    pub fn trust_levels(&self) -> Vec<SourceTrustLevel> {
        self.trust_level
            .iter()
            .filter_map(|token| token.parse().ok())
            .collect()
    }

    pub fn has_trust_level(&self, level: SourceTrustLevel) -> bool {
        self.trust_levels().contains(&level)
    }
}

// Wire shape; every field except CertificatePinning is mandatory
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SourceEntry {
    name: String,
    arg: String,
    #[serde(rename = "Type")]
    source_type: String,
    data: String,
    identifier: String,
    trust_level: Vec<String>,
    explicit: bool,
    #[serde(default)]
    certificate_pinning: Option<Value>,
}

/// Decode every entry under `key`, keeping the well-formed ones in order
///
/// Returns `None` only when the sub-key is missing. A present sub-key always
/// yields a list, even if every entry was dropped.
pub(crate) fn read_source_list(
    store: &dyn PolicyStore,
    parser: &dyn CertificateParser,
    key: &str,
) -> Option<Vec<SourceFromPolicy>> {
    let payloads = store.sub_values(key)?;

    let sources = payloads
        .iter()
        .enumerate()
        .filter_map(|(index, payload)| match SourceFromPolicy::from_json(payload, parser) {
            Ok(source) => Some(source),
            Err(e) => {
                tracing::debug!(policy = key, index, error = %e, "Dropping malformed source entry");
                None
            }
        })
        .collect();

    Some(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pinning::X509CertificateParser;
    use crate::store::MemoryStore;

    fn source_json(name: &str, trust_level: &str, explicit: bool) -> String {
        format!(
            r#"{{ "Name":"{name}", "Arg":"{name}-arg", "Type":"{name}-type", "Data":"{name}-data", "Identifier":"{name}-id", "TrustLevel":{trust_level}, "Explicit":{explicit} }}"#
        )
    }

    fn decode(payload: &str) -> Result<SourceFromPolicy, SourceDecodeError> {
        SourceFromPolicy::from_json(payload, &X509CertificateParser)
    }

    #[test]
    fn test_decode_copies_fields_verbatim() {
        let source = decode(&source_json("s0", r#"["Trusted", "StoreOrigin"]"#, true)).unwrap();

        assert_eq!(source.name, "s0");
        assert_eq!(source.arg, "s0-arg");
        assert_eq!(source.source_type, "s0-type");
        assert_eq!(source.data, "s0-data");
        assert_eq!(source.identifier, "s0-id");
        assert_eq!(source.trust_level, vec!["Trusted", "StoreOrigin"]);
        assert!(source.explicit);
        assert!(source.pinning_configuration.is_empty());
    }

    #[test]
    fn test_decode_missing_field() {
        let payload = r#"{ "Name":"n", "Arg":"a", "Data":"d", "Identifier":"i", "TrustLevel":[], "Explicit":false }"#;
        assert!(decode(payload).is_err());
    }

    #[test]
    fn test_decode_wrong_field_type() {
        let payload = r#"{ "Name":"n", "Arg":"a", "Type":"t", "Data":{}, "Identifier":"i", "TrustLevel":[], "Explicit":false }"#;
        assert!(decode(payload).is_err());

        let payload = r#"{ "Name":"n", "Arg":"a", "Type":"t", "Data":"d", "Identifier":"i", "TrustLevel":[1], "Explicit":false }"#;
        assert!(decode(payload).is_err());

        let payload = r#"{ "Name":"n", "Arg":"a", "Type":"t", "Data":"d", "Identifier":"i", "TrustLevel":[], "Explicit":"yes" }"#;
        assert!(decode(payload).is_err());
    }

    #[test]
    fn test_decode_not_json() {
        assert!(decode("not a JSON").is_err());
        assert!(decode("[]").is_err());
    }

    #[test]
    fn test_empty_trust_level_is_allowed() {
        let source = decode(&source_json("s", "[]", false)).unwrap();
        assert!(source.trust_level.is_empty());
        assert!(source.trust_levels().is_empty());
    }

    #[test]
    fn test_malformed_pinning_keeps_source() {
        let payload = r#"{ "Name":"n", "Arg":"a", "Type":"t", "Data":"d", "Identifier":"i", "TrustLevel":["None"], "Explicit":false, "CertificatePinning":{ "Chains":"nope" } }"#;
        let source = decode(payload).unwrap();
        assert!(source.pinning_configuration.is_empty());
    }

    #[test]
    fn test_trust_levels_parse_known_tokens() {
        let source = decode(&source_json("s", r#"["storeorigin", "Bogus", "Trusted"]"#, false)).unwrap();

        assert_eq!(
            source.trust_levels(),
            vec![SourceTrustLevel::StoreOrigin, SourceTrustLevel::Trusted]
        );
        assert!(source.has_trust_level(SourceTrustLevel::Trusted));
        assert!(!source.has_trust_level(SourceTrustLevel::None));
    }

    #[test]
    fn test_exported_json_decodes_to_same_source() {
        let source = SourceFromPolicy {
            name: "json-name".to_string(),
            arg: "json-arg".to_string(),
            source_type: "json-type".to_string(),
            data: "json-data".to_string(),
            identifier: "json-id".to_string(),
            trust_level: vec!["Trusted".to_string(), "StoreOrigin".to_string()],
            explicit: false,
            pinning_configuration: PinningConfiguration::default(),
        };

        let exported = source.to_json_string().unwrap();
        assert!(!exported.contains("CertificatePinning"));
        assert_eq!(decode(&exported).unwrap(), source);
    }

    #[test]
    fn test_read_source_list_missing_and_empty() {
        let mut store = MemoryStore::new();
        assert_eq!(read_source_list(&store, &X509CertificateParser, "AllowedSources"), None);

        store.create_sub_key("AllowedSources");
        assert_eq!(
            read_source_list(&store, &X509CertificateParser, "AllowedSources"),
            Some(vec![])
        );
    }

    #[test]
    fn test_read_source_list_drops_invalid_entries_in_place() {
        let mut store = MemoryStore::new();
        store.set_sub_string("AdditionalSources", "0", source_json("s0", r#"["Trusted"]"#, false));
        store.set_sub_string("AdditionalSources", "1", "not a source");
        store.set_sub_string("AdditionalSources", "2", source_json("s2", r#"["StoreOrigin"]"#, true));

        let sources = read_source_list(&store, &X509CertificateParser, "AdditionalSources").unwrap();
        let names: Vec<_> = sources.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["s0", "s2"]);
    }

    #[test]
    fn test_read_source_list_all_invalid_is_still_configured() {
        let mut store = MemoryStore::new();
        store.set_sub_string("AllowedSources", "0", "not a JSON");

        assert_eq!(
            read_source_list(&store, &X509CertificateParser, "AllowedSources"),
            Some(vec![])
        );
    }
}
