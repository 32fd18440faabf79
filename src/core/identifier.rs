use std::fmt;

use serde::{Deserialize, Serialize};

use super::countries;
use super::error::FacturError;

/// Scheme qualifiers for scoped identifiers (ISO 6523 ICD subset plus the
/// EAS codes the CII serializer emits as `schemeID`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdScheme {
    /// EM — electronic mail address.
    Email,
    /// 0002 — SIRENE (France).
    Sirene,
    /// 0021 — SWIFT BIC.
    Swift,
    /// 0060 — Dun & Bradstreet DUNS.
    Duns,
    /// 0088 — GLN (EAN location code).
    Gln,
    /// 0160 — GTIN (global trade item number).
    Gtin,
    /// 0177 — ODETTE.
    Odette,
    /// 0204 — Leitweg-ID (German public sector routing).
    Leitweg,
}

impl IdScheme {
    /// The `schemeID` attribute value.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Email => "EM",
            Self::Sirene => "0002",
            Self::Swift => "0021",
            Self::Duns => "0060",
            Self::Gln => "0088",
            Self::Gtin => "0160",
            Self::Odette => "0177",
            Self::Leitweg => "0204",
        }
    }

    /// Parse from a `schemeID` attribute value.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "EM" => Some(Self::Email),
            "0002" => Some(Self::Sirene),
            "0021" => Some(Self::Swift),
            "0060" => Some(Self::Duns),
            "0088" => Some(Self::Gln),
            "0160" => Some(Self::Gtin),
            "0177" => Some(Self::Odette),
            "0204" => Some(Self::Leitweg),
            _ => None,
        }
    }
}

/// A scoped identifier: an opaque value with an optional scheme qualifier.
///
/// One parametrized type for every EN 16931 identifier term (electronic
/// address, legal registration, global item ID, party ID, ...) instead of a
/// wrapper type per term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    /// Identifier value.
    pub value: String,
    /// Scheme qualifier, emitted as `schemeID` when present.
    pub scheme: Option<IdScheme>,
}

impl Identifier {
    /// An unqualified identifier.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            scheme: None,
        }
    }

    /// An identifier qualified by `scheme`.
    pub fn with_scheme(value: impl Into<String>, scheme: IdScheme) -> Self {
        Self {
            value: value.into(),
            scheme: Some(scheme),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// BT-31 / BT-48 / BT-63: VAT identifier.
///
/// The first two characters must name the issuing country. `EL` (Greece) and
/// `XI` (Northern Ireland) are accepted as VAT-specific prefixes alongside
/// the ISO 3166-1 list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VatId(String);

impl VatId {
    /// Validate and wrap a VAT identifier.
    pub fn new(value: impl Into<String>) -> Result<Self, FacturError> {
        let value = value.into();
        let prefix = value.get(..2).unwrap_or("");
        if !countries::is_known_country_code(prefix) && prefix != "EL" && prefix != "XI" {
            return Err(FacturError::InvalidVatId(format!(
                "'{value}' does not start with a known country code"
            )));
        }
        Ok(Self(value))
    }

    /// The wrapped identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
