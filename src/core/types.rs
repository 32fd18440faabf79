use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::codes::*;
use super::decimal::{Amount, Percentage, Quantity, UnitPrice};
use super::identifier::{Identifier, VatId};

/// BG-0: Invoice — the root aggregate.
///
/// Constructed via [`crate::core::InvoiceBuilder`], which enforces the
/// construction invariants (required parts present, `lines` and
/// `vat_breakdown` non-empty); the finished value is not mutated again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// BT-1: Invoice number.
    pub number: String,
    /// BT-2: Invoice issue date.
    pub issue_date: NaiveDate,
    /// BT-3: Invoice type code (UNTDID 1001).
    pub type_code: InvoiceTypeCode,
    /// BT-5: Invoice currency code (ISO 4217).
    pub currency_code: String,
    /// BT-6: VAT accounting currency code, when VAT is booked in a second currency.
    pub tax_currency_code: Option<String>,
    /// BG-2: Process control (business process + specification identifier).
    pub process_control: ProcessControl,
    /// BG-1: Invoice notes, in append order.
    pub notes: Vec<Note>,
    /// BT-9: Payment due date.
    pub due_date: Option<NaiveDate>,
    /// BT-10: Buyer reference (routing identifier).
    pub buyer_reference: Option<String>,
    /// BT-11: Project reference.
    pub project_reference: Option<String>,
    /// BT-12: Contract reference.
    pub contract_reference: Option<String>,
    /// BT-13: Purchase order reference.
    pub order_reference: Option<String>,
    /// BT-14: Sales order reference.
    pub sales_order_reference: Option<String>,
    /// BT-15: Receiving advice reference.
    pub receiving_advice_reference: Option<String>,
    /// BT-16: Despatch advice reference.
    pub despatch_advice_reference: Option<String>,
    /// BT-19: Buyer accounting reference.
    pub buyer_accounting_reference: Option<String>,
    /// BT-20: Payment terms free text.
    pub payment_terms: Option<String>,
    /// BG-4: Seller.
    pub seller: TradeParty,
    /// BG-7: Buyer.
    pub buyer: TradeParty,
    /// BG-10: Payee, when different from the seller.
    pub payee: Option<Payee>,
    /// BG-11: Seller tax representative.
    pub tax_representative: Option<TaxRepresentative>,
    /// BG-13/BG-15: Delivery information.
    pub delivery: Option<DeliveryInformation>,
    /// BG-16: Payment instructions.
    pub payment: Option<PaymentInstructions>,
    /// BG-20: Document-level allowances.
    pub allowances: Vec<AllowanceCharge>,
    /// BG-21: Document-level charges.
    pub charges: Vec<AllowanceCharge>,
    /// BG-3: Preceding invoice references.
    pub preceding_invoices: Vec<PrecedingInvoice>,
    /// BG-24: Additional supporting documents.
    pub additional_documents: Vec<AdditionalDocument>,
    /// BG-14: Invoicing period.
    pub invoicing_period: Option<Period>,
    /// BG-25: Invoice lines. Non-empty.
    pub lines: Vec<InvoiceLine>,
    /// BG-23: VAT breakdown. Non-empty.
    pub vat_breakdown: Vec<VatBreakdown>,
    /// BG-22: Document totals, supplied by the caller.
    pub totals: DocumentTotals,
}

/// BG-2: Process control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessControl {
    /// BT-23: Business process type identifier.
    pub business_process: Option<String>,
    /// BT-24: Specification (guideline) identifier — usually a Factur-X or
    /// XRechnung profile URN.
    pub guideline: String,
}

impl ProcessControl {
    /// Process control for the given guideline identifier.
    pub fn new(guideline: impl Into<String>) -> Self {
        Self {
            business_process: None,
            guideline: guideline.into(),
        }
    }

    /// Set the business process identifier (BT-23).
    pub fn with_business_process(mut self, id: impl Into<String>) -> Self {
        self.business_process = Some(id.into());
        self
    }
}

/// BG-1: Invoice note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    /// BT-22: Note content.
    pub content: String,
    /// BT-21: Note subject qualifier (UNTDID 4451).
    pub subject_code: Option<String>,
}

impl Note {
    /// A note without a subject qualifier.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            subject_code: None,
        }
    }

    /// A note with a UNTDID 4451 subject qualifier.
    pub fn with_subject(content: impl Into<String>, subject_code: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            subject_code: Some(subject_code.into()),
        }
    }
}

/// BG-4 / BG-7: Trade party (seller or buyer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeParty {
    /// BT-27 / BT-44: Name.
    pub name: String,
    /// BT-29 / BT-46: Party identifier.
    pub identifier: Option<Identifier>,
    /// BT-30 / BT-47: Legal registration identifier.
    pub legal_registration: Option<Identifier>,
    /// BT-28 / BT-45: Trading name.
    pub trading_name: Option<String>,
    /// BT-31 / BT-48: VAT identifier.
    pub vat_id: Option<VatId>,
    /// BT-32: Tax registration number (seller only).
    pub tax_registration: Option<String>,
    /// BG-5 / BG-8: Postal address.
    pub address: Address,
    /// BG-6 / BG-9: Contact information.
    pub contact: Option<Contact>,
    /// BT-34 / BT-49: Electronic address with scheme.
    pub electronic_address: Option<Identifier>,
}

/// BG-5 / BG-8: Postal address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    /// BT-35 / BT-50: Street + house number.
    pub street: Option<String>,
    /// BT-36 / BT-51: Additional address line.
    pub additional: Option<String>,
    /// BT-37 / BT-52: City.
    pub city: String,
    /// BT-38 / BT-53: Postal code.
    pub postal_code: String,
    /// BT-39 / BT-54: Country subdivision.
    pub subdivision: Option<String>,
    /// BT-40 / BT-55: Country code (ISO 3166-1 alpha-2).
    pub country_code: String,
}

/// BG-6 / BG-9: Contact information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    /// BT-41 / BT-56: Contact point name.
    pub name: Option<String>,
    /// BT-42 / BT-57: Telephone.
    pub phone: Option<String>,
    /// BT-43 / BT-58: Email.
    pub email: Option<String>,
}

/// BG-10: Payee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payee {
    /// BT-59: Payee name.
    pub name: String,
    /// BT-60: Payee identifier.
    pub identifier: Option<Identifier>,
    /// BT-61: Payee legal registration identifier.
    pub legal_registration: Option<Identifier>,
}

/// BG-11: Seller tax representative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxRepresentative {
    /// BT-62: Representative name.
    pub name: String,
    /// BT-63: Representative VAT identifier.
    pub vat_id: VatId,
    /// BG-12: Representative postal address.
    pub address: Address,
}

/// BG-25: Invoice line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceLine {
    /// BT-126: Line identifier.
    pub id: String,
    /// BT-127: Line note.
    pub note: Option<String>,
    /// BT-153: Item name.
    pub item_name: String,
    /// BT-154: Item description.
    pub description: Option<String>,
    /// BT-155: Seller's item identifier.
    pub seller_item_id: Option<String>,
    /// BT-156: Buyer's item identifier.
    pub buyer_item_id: Option<String>,
    /// BT-157: Item standard identifier (GTIN etc., scheme-qualified).
    pub standard_item_id: Option<Identifier>,
    /// BT-159: Item country of origin.
    pub origin_country: Option<String>,
    /// BG-32: Item attributes (name/value pairs).
    pub attributes: Vec<ItemAttribute>,
    /// BT-129: Invoiced quantity.
    pub quantity: Quantity,
    /// BT-130: Unit of measure (UNECE Rec 20).
    pub unit_code: String,
    /// BT-146: Item net price.
    pub unit_price: UnitPrice,
    /// BT-148: Item gross price, before discount.
    pub gross_price: Option<UnitPrice>,
    /// BT-149: Item price base quantity.
    pub base_quantity: Option<Quantity>,
    /// BG-27: Line allowances.
    pub allowances: Vec<AllowanceCharge>,
    /// BG-28: Line charges.
    pub charges: Vec<AllowanceCharge>,
    /// BT-151: Line VAT category.
    pub tax_category: TaxCategory,
    /// BT-152: Line VAT rate.
    pub tax_rate: Percentage,
    /// BT-131: Line net amount.
    pub line_total: Amount,
    /// BG-26: Line invoicing period.
    pub invoicing_period: Option<Period>,
}

/// BT-160 / BT-161: Item attribute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemAttribute {
    /// Attribute name.
    pub name: String,
    /// Attribute value.
    pub value: String,
}

/// BG-23: VAT breakdown line, keyed by taxable amount, rate and category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VatBreakdown {
    /// BT-116: Taxable amount for this category/rate.
    pub taxable_amount: Amount,
    /// BT-117: Tax amount for this category/rate.
    pub tax_amount: Amount,
    /// BT-118: Tax category.
    pub category: TaxCategory,
    /// BT-119: Tax rate percentage.
    pub rate: Percentage,
    /// BT-120: Exemption reason text.
    pub exemption_reason: Option<String>,
    /// BT-121: Exemption reason code (VATEX).
    pub exemption_reason_code: Option<String>,
}

impl VatBreakdown {
    /// A breakdown line without exemption details.
    pub fn new(
        taxable_amount: Amount,
        tax_amount: Amount,
        category: TaxCategory,
        rate: Percentage,
    ) -> Self {
        Self {
            taxable_amount,
            tax_amount,
            category,
            rate,
            exemption_reason: None,
            exemption_reason_code: None,
        }
    }

    /// Set the exemption reason text (BT-120).
    pub fn with_exemption_reason(mut self, reason: impl Into<String>) -> Self {
        self.exemption_reason = Some(reason.into());
        self
    }

    /// Set the exemption reason code (BT-121).
    pub fn with_exemption_reason_code(mut self, code: impl Into<String>) -> Self {
        self.exemption_reason_code = Some(code.into());
        self
    }
}

/// BG-22: Document totals. Supplied by the caller — this crate validates
/// and serializes totals, it never derives them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentTotals {
    /// BT-106: Sum of all line net amounts.
    pub line_total: Amount,
    /// BT-107: Sum of document-level allowances.
    pub allowance_total: Option<Amount>,
    /// BT-108: Sum of document-level charges.
    pub charge_total: Option<Amount>,
    /// BT-109: Invoice total without VAT.
    pub net_total: Amount,
    /// BT-110: Total VAT amount in the invoice currency.
    pub tax_total: Amount,
    /// BT-111: Total VAT amount in the VAT accounting currency.
    pub tax_total_accounting: Option<Amount>,
    /// BT-112: Invoice total with VAT.
    pub grand_total: Amount,
    /// BT-113: Paid amount (prepayments).
    pub prepaid: Option<Amount>,
    /// BT-114: Rounding amount.
    pub rounding_amount: Option<Amount>,
    /// BT-115: Amount due for payment.
    pub amount_due: Amount,
}

impl DocumentTotals {
    /// Totals with only the mandatory amounts; optional amounts default to
    /// absent.
    pub fn new(
        line_total: Amount,
        net_total: Amount,
        tax_total: Amount,
        grand_total: Amount,
        amount_due: Amount,
    ) -> Self {
        Self {
            line_total,
            allowance_total: None,
            charge_total: None,
            net_total,
            tax_total,
            tax_total_accounting: None,
            grand_total,
            prepaid: None,
            rounding_amount: None,
            amount_due,
        }
    }

    /// Set the document-level allowance total (BT-107).
    pub fn with_allowance_total(mut self, amount: Amount) -> Self {
        self.allowance_total = Some(amount);
        self
    }

    /// Set the document-level charge total (BT-108).
    pub fn with_charge_total(mut self, amount: Amount) -> Self {
        self.charge_total = Some(amount);
        self
    }

    /// Set the VAT total in the accounting currency (BT-111).
    pub fn with_tax_total_accounting(mut self, amount: Amount) -> Self {
        self.tax_total_accounting = Some(amount);
        self
    }

    /// Set the prepaid amount (BT-113).
    pub fn with_prepaid(mut self, amount: Amount) -> Self {
        self.prepaid = Some(amount);
        self
    }

    /// Set the rounding amount (BT-114).
    pub fn with_rounding_amount(mut self, amount: Amount) -> Self {
        self.rounding_amount = Some(amount);
        self
    }
}

/// BG-20/BG-21 (document level) or BG-27/BG-28 (line level): allowance or
/// charge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowanceCharge {
    /// True = charge, false = allowance.
    pub is_charge: bool,
    /// BT-92 / BT-99: Amount.
    pub amount: Amount,
    /// BT-93 / BT-100: Base amount for percentage calculation.
    pub base_amount: Option<Amount>,
    /// BT-94 / BT-101: Percentage.
    pub percentage: Option<Percentage>,
    /// BT-95 / BT-102: Tax category.
    pub tax_category: TaxCategory,
    /// BT-96 / BT-103: Tax rate.
    pub tax_rate: Percentage,
    /// BT-97 / BT-104: Reason text.
    pub reason: Option<String>,
    /// BT-98 / BT-105: Reason code (UNTDID 5189 / 7161).
    pub reason_code: Option<String>,
}

/// BG-16: Payment instructions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInstructions {
    /// BT-81: Payment means type code (UNTDID 4461).
    pub means_code: PaymentMeansCode,
    /// BT-82: Payment means text.
    pub means_text: Option<String>,
    /// BT-83: Remittance information.
    pub remittance_info: Option<String>,
    /// BG-17: Credit transfer account.
    pub credit_transfer: Option<CreditTransfer>,
    /// BG-18: Payment card information.
    pub card_payment: Option<CardPayment>,
    /// BG-19: Direct debit.
    pub direct_debit: Option<DirectDebit>,
}

/// BG-17: Credit transfer / bank account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditTransfer {
    /// BT-84: IBAN or account identifier.
    pub iban: String,
    /// BT-86: BIC.
    pub bic: Option<String>,
    /// BT-85: Account name.
    pub account_name: Option<String>,
}

/// BG-18: Payment card information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardPayment {
    /// BT-87: Masked primary account number.
    pub account_number: String,
    /// BT-88: Card holder name.
    pub holder_name: Option<String>,
}

/// BG-19: Direct debit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectDebit {
    /// BT-89: Mandate reference.
    pub mandate_id: Option<String>,
    /// BT-90: Bank assigned creditor identifier.
    pub creditor_id: Option<String>,
    /// BT-91: Debited account identifier.
    pub debited_account: Option<String>,
}

/// BG-13/BG-15: Delivery information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryInformation {
    /// BT-72: Actual delivery date.
    pub actual_delivery_date: Option<NaiveDate>,
    /// BG-15: Deliver-to party and address.
    pub ship_to: Option<ShipTo>,
}

/// BG-15: Deliver-to party.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipTo {
    /// BT-70: Deliver-to party name.
    pub name: String,
    /// BT-71: Deliver-to location identifier.
    pub location_id: Option<Identifier>,
    /// BT-75..BT-80: Deliver-to address.
    pub address: Option<Address>,
}

/// BG-3: Preceding invoice reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrecedingInvoice {
    /// BT-25: Preceding invoice number.
    pub number: String,
    /// BT-26: Preceding invoice issue date.
    pub issue_date: Option<NaiveDate>,
}

/// BG-24: Additional supporting document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdditionalDocument {
    /// BT-122: Supporting document reference.
    pub id: String,
    /// Document type code (916 for supporting documents).
    pub type_code: DocumentTypeCode,
    /// BT-123: Supporting document description.
    pub description: Option<String>,
    /// BT-124: External document location URI.
    pub external_uri: Option<String>,
    /// BT-125: Embedded attachment.
    pub attachment: Option<Attachment>,
}

/// BT-125: Embedded binary attachment (base64 content).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    /// Base64-encoded content.
    pub content: String,
    /// MIME type from the allowed set.
    pub mime: MimeCode,
    /// Filename.
    pub filename: String,
}

/// BG-14 / BG-26: Date period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Period {
    /// BT-73 / BT-134: Start date.
    pub start: NaiveDate,
    /// BT-74 / BT-135: End date.
    pub end: NaiveDate,
}
