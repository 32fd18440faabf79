//! Codelist enumerations used across the invoice model.

use serde::{Deserialize, Serialize};

/// UNTDID 5305 — Tax category codes (BT-95, BT-102, BT-118, BT-151).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxCategory {
    /// S — Standard rate.
    StandardRate,
    /// Z — Zero rated.
    ZeroRated,
    /// E — Exempt from tax.
    Exempt,
    /// AE — VAT reverse charge.
    ReverseCharge,
    /// K — Intra-community supply.
    IntraCommunitySupply,
    /// G — Free export item, tax not charged.
    Export,
    /// O — Services outside scope of tax.
    NotSubjectToVat,
    /// L — Canary Islands general indirect tax.
    CanaryIslands,
    /// M — Tax for production, services and importation in Ceuta and Melilla.
    CeutaMelilla,
}

impl TaxCategory {
    /// UNTDID 5305 code letter.
    pub fn code(&self) -> &'static str {
        match self {
            Self::StandardRate => "S",
            Self::ZeroRated => "Z",
            Self::Exempt => "E",
            Self::ReverseCharge => "AE",
            Self::IntraCommunitySupply => "K",
            Self::Export => "G",
            Self::NotSubjectToVat => "O",
            Self::CanaryIslands => "L",
            Self::CeutaMelilla => "M",
        }
    }

    /// Parse from a UNTDID 5305 code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "S" => Some(Self::StandardRate),
            "Z" => Some(Self::ZeroRated),
            "E" => Some(Self::Exempt),
            "AE" => Some(Self::ReverseCharge),
            "K" => Some(Self::IntraCommunitySupply),
            "G" => Some(Self::Export),
            "O" => Some(Self::NotSubjectToVat),
            "L" => Some(Self::CanaryIslands),
            "M" => Some(Self::CeutaMelilla),
            _ => None,
        }
    }
}

/// UNTDID 1001 — Invoice type codes (BT-3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceTypeCode {
    /// 380 — Commercial invoice.
    Invoice,
    /// 381 — Credit note.
    CreditNote,
    /// 384 — Corrected invoice.
    Corrected,
    /// 386 — Prepayment invoice.
    Prepayment,
    /// 326 — Partial invoice.
    Partial,
    /// 389 — Self-billed invoice.
    SelfBilled,
}

impl InvoiceTypeCode {
    /// UNTDID 1001 numeric code.
    pub fn code(&self) -> u16 {
        match self {
            Self::Invoice => 380,
            Self::CreditNote => 381,
            Self::Corrected => 384,
            Self::Prepayment => 386,
            Self::Partial => 326,
            Self::SelfBilled => 389,
        }
    }

    /// Parse from a UNTDID 1001 numeric code.
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            380 => Some(Self::Invoice),
            381 => Some(Self::CreditNote),
            384 => Some(Self::Corrected),
            386 => Some(Self::Prepayment),
            326 => Some(Self::Partial),
            389 => Some(Self::SelfBilled),
            _ => None,
        }
    }
}

/// UNTDID 4461 — Payment means type codes (BT-81).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMeansCode {
    /// 10 — Cash.
    Cash,
    /// 30 — Credit transfer.
    CreditTransfer,
    /// 42 — Payment to bank account.
    PaymentToBankAccount,
    /// 48 — Bank card.
    BankCard,
    /// 49 — Direct debit.
    DirectDebit,
    /// 57 — Standing agreement.
    StandingAgreement,
    /// 58 — SEPA credit transfer.
    SepaCreditTransfer,
    /// 59 — SEPA direct debit.
    SepaDirectDebit,
    /// Other code value.
    Other(u16),
}

impl PaymentMeansCode {
    /// UNTDID 4461 numeric code.
    pub fn code(&self) -> u16 {
        match self {
            Self::Cash => 10,
            Self::CreditTransfer => 30,
            Self::PaymentToBankAccount => 42,
            Self::BankCard => 48,
            Self::DirectDebit => 49,
            Self::StandingAgreement => 57,
            Self::SepaCreditTransfer => 58,
            Self::SepaDirectDebit => 59,
            Self::Other(c) => *c,
        }
    }

    /// Parse from a UNTDID 4461 numeric code.
    pub fn from_code(code: u16) -> Self {
        match code {
            10 => Self::Cash,
            30 => Self::CreditTransfer,
            42 => Self::PaymentToBankAccount,
            48 => Self::BankCard,
            49 => Self::DirectDebit,
            57 => Self::StandingAgreement,
            58 => Self::SepaCreditTransfer,
            59 => Self::SepaDirectDebit,
            c => Self::Other(c),
        }
    }
}

/// MIME types allowed for embedded attachments (BT-125).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MimeCode {
    /// application/pdf
    Pdf,
    /// image/png
    Png,
    /// image/jpeg
    Jpeg,
    /// text/csv
    Csv,
    /// application/vnd.openxmlformats-officedocument.spreadsheetml.sheet
    Xlsx,
    /// application/vnd.oasis.opendocument.spreadsheet
    Ods,
    /// application/xml
    Xml,
}

impl MimeCode {
    /// The `mimeCode` attribute value.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Csv => "text/csv",
            Self::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            Self::Ods => "application/vnd.oasis.opendocument.spreadsheet",
            Self::Xml => "application/xml",
        }
    }

    /// Parse from a `mimeCode` attribute value.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "application/pdf" => Some(Self::Pdf),
            "image/png" => Some(Self::Png),
            "image/jpeg" => Some(Self::Jpeg),
            "text/csv" => Some(Self::Csv),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => {
                Some(Self::Xlsx)
            }
            "application/vnd.oasis.opendocument.spreadsheet" => Some(Self::Ods),
            "application/xml" => Some(Self::Xml),
            _ => None,
        }
    }
}

/// UNTDID 1001 subset for additional referenced documents (BT-17/BT-18/BG-24).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentTypeCode {
    /// 50 — Tender or lot reference.
    TenderOrLot,
    /// 130 — Invoiced object identifier.
    InvoicedObject,
    /// 916 — Additional supporting document.
    SupportingDocument,
}

impl DocumentTypeCode {
    /// Numeric code string as emitted in `ram:TypeCode`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TenderOrLot => "50",
            Self::InvoicedObject => "130",
            Self::SupportingDocument => "916",
        }
    }

    /// Parse from the `ram:TypeCode` string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "50" => Some(Self::TenderOrLot),
            "130" => Some(Self::InvoicedObject),
            "916" => Some(Self::SupportingDocument),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tax_category_codes_round_trip() {
        for cat in [
            TaxCategory::StandardRate,
            TaxCategory::ZeroRated,
            TaxCategory::Exempt,
            TaxCategory::ReverseCharge,
            TaxCategory::IntraCommunitySupply,
            TaxCategory::Export,
            TaxCategory::NotSubjectToVat,
            TaxCategory::CanaryIslands,
            TaxCategory::CeutaMelilla,
        ] {
            assert_eq!(TaxCategory::from_code(cat.code()), Some(cat));
        }
        assert_eq!(TaxCategory::from_code("X"), None);
    }

    #[test]
    fn invoice_type_codes_round_trip() {
        for tc in [
            InvoiceTypeCode::Invoice,
            InvoiceTypeCode::CreditNote,
            InvoiceTypeCode::Corrected,
            InvoiceTypeCode::Prepayment,
            InvoiceTypeCode::Partial,
            InvoiceTypeCode::SelfBilled,
        ] {
            assert_eq!(InvoiceTypeCode::from_code(tc.code()), Some(tc));
        }
        assert_eq!(InvoiceTypeCode::from_code(999), None);
    }

    #[test]
    fn payment_means_preserves_unknown_codes() {
        assert_eq!(PaymentMeansCode::from_code(58), PaymentMeansCode::SepaCreditTransfer);
        assert_eq!(PaymentMeansCode::from_code(97), PaymentMeansCode::Other(97));
        assert_eq!(PaymentMeansCode::Other(97).code(), 97);
    }

    #[test]
    fn document_type_codes_round_trip() {
        for dt in [
            DocumentTypeCode::TenderOrLot,
            DocumentTypeCode::InvoicedObject,
            DocumentTypeCode::SupportingDocument,
        ] {
            assert_eq!(DocumentTypeCode::from_code(dt.code()), Some(dt));
        }
    }
}
