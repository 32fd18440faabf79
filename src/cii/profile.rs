use crate::core::ProcessControl;

/// Factur-X / ZUGFeRD conformance profile, ordered from least to most
/// detailed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Profile {
    /// Minimal machine-readable data, no line items.
    Minimum,
    /// Document-level data without line items.
    BasicWl,
    /// Basic with line items.
    Basic,
    /// Full EN 16931 European norm.
    EN16931,
    /// Extended profile beyond EN 16931.
    Extended,
    /// XRechnung 2.x (German public sector, superseded).
    XRechnung2,
    /// XRechnung 3.0 (German public sector).
    XRechnung,
}

/// XRechnung 3.0 specification identifier (BT-24).
pub const XRECHNUNG_CUSTOMIZATION_ID: &str =
    "urn:cen.eu:en16931:2017#compliant#urn:xeinkauf.de:kosit:xrechnung_3.0";

/// XRechnung 2.3 specification identifier, still seen in the wild.
pub const XRECHNUNG_2_CUSTOMIZATION_ID: &str =
    "urn:cen.eu:en16931:2017#compliant#urn:xoev-de:kosit:standard:xrechnung_2.3";

impl Profile {
    /// The URN emitted in `GuidelineSpecifiedDocumentContextParameter` (BT-24).
    pub fn urn(&self) -> &'static str {
        match self {
            Self::Minimum => "urn:factur-x.eu:1p0:minimum",
            Self::BasicWl => "urn:factur-x.eu:1p0:basicwl",
            Self::Basic => "urn:cen.eu:en16931:2017#compliant#urn:factur-x.eu:1p0:basic",
            Self::EN16931 => "urn:cen.eu:en16931:2017",
            Self::Extended => "urn:cen.eu:en16931:2017#conformant#urn:factur-x.eu:1p0:extended",
            Self::XRechnung2 => XRECHNUNG_2_CUSTOMIZATION_ID,
            Self::XRechnung => XRECHNUNG_CUSTOMIZATION_ID,
        }
    }

    /// Resolve a specification identifier back to a known profile. Exact
    /// string match; unknown URNs yield `None`.
    pub fn from_urn(urn: &str) -> Option<Self> {
        match urn {
            "urn:factur-x.eu:1p0:minimum" => Some(Self::Minimum),
            "urn:factur-x.eu:1p0:basicwl" => Some(Self::BasicWl),
            "urn:cen.eu:en16931:2017#compliant#urn:factur-x.eu:1p0:basic" => Some(Self::Basic),
            "urn:cen.eu:en16931:2017" => Some(Self::EN16931),
            "urn:cen.eu:en16931:2017#conformant#urn:factur-x.eu:1p0:extended" => {
                Some(Self::Extended)
            }
            XRECHNUNG_2_CUSTOMIZATION_ID => Some(Self::XRechnung2),
            XRECHNUNG_CUSTOMIZATION_ID => Some(Self::XRechnung),
            _ => None,
        }
    }

}

impl From<Profile> for ProcessControl {
    fn from(profile: Profile) -> Self {
        ProcessControl::new(profile.urn())
    }
}

/// Document parts whose emission depends on the conformance profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatedElement {
    /// `ram:IncludedNote` under `rsm:ExchangedDocument`.
    IncludedNote,
    /// `ram:IncludedSupplyChainTradeLineItem`.
    TradeLineItem,
    /// `ram:ApplicableTradeTax` VAT breakdown at settlement level.
    VatBreakdown,
}

/// Whether `element` may be emitted under the given specification
/// identifier.
///
/// Only the Minimum profile restricts output; every other known profile,
/// and any identifier this crate does not recognize, is unrestricted —
/// custom guideline URNs pass everything through.
pub fn is_element_permitted(guideline_id: &str, element: GatedElement) -> bool {
    match Profile::from_urn(guideline_id) {
        Some(Profile::Minimum) => match element {
            GatedElement::IncludedNote
            | GatedElement::TradeLineItem
            | GatedElement::VatBreakdown => false,
        },
        _ => true,
    }
}
