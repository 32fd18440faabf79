use chrono::NaiveDate;

use super::codes::{InvoiceTypeCode, TaxCategory};
use super::decimal::{Amount, Percentage, Quantity, UnitPrice};
use super::error::FacturError;
use super::identifier::{Identifier, VatId};
use super::types::*;

/// Builder for the [`Invoice`] aggregate.
///
/// Required parts: seller, buyer, process control, document totals, at least
/// one invoice line and at least one VAT breakdown entry. `build()` checks
/// these once and yields an immutable invoice; cross-field business rules
/// are checked separately by [`super::validate_en16931`].
///
/// ```
/// use chrono::NaiveDate;
/// use facturx::cii::Profile;
/// use facturx::core::*;
/// use rust_decimal_macros::dec;
///
/// # fn main() -> Result<(), FacturError> {
/// let invoice = InvoiceBuilder::new("RE-2026-042", NaiveDate::from_ymd_opt(2026, 3, 1).unwrap())
///     .process_control(Profile::Extended.into())
///     .seller(PartyBuilder::new("ACME GmbH", AddressBuilder::new("Berlin", "10115", "DE").build())
///         .vat_id(VatId::new("DE123456789")?)
///         .build())
///     .buyer(PartyBuilder::new("Kunde AG", AddressBuilder::new("München", "80331", "DE").build())
///         .build())
///     .note("Zahlbar innerhalb von 30 Tagen")
///     .add_line(LineBuilder::new("1", "Hosting", Quantity::new(dec!(1))?, "C62",
///             UnitPrice::new(dec!(49.90))?, Amount::new(dec!(49.90))?)
///         .tax(TaxCategory::StandardRate, Percentage::new(dec!(19))?)
///         .build())
///     .add_vat_breakdown(VatBreakdown::new(
///         Amount::new(dec!(49.90))?, Amount::new(dec!(9.48))?,
///         TaxCategory::StandardRate, Percentage::new(dec!(19))?))
///     .totals(DocumentTotals::new(
///         Amount::new(dec!(49.90))?, Amount::new(dec!(49.90))?, Amount::new(dec!(9.48))?,
///         Amount::new(dec!(59.38))?, Amount::new(dec!(59.38))?))
///     .build()?;
/// assert_eq!(invoice.lines.len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct InvoiceBuilder {
    number: String,
    issue_date: NaiveDate,
    type_code: InvoiceTypeCode,
    currency_code: String,
    tax_currency_code: Option<String>,
    process_control: Option<ProcessControl>,
    notes: Vec<Note>,
    due_date: Option<NaiveDate>,
    buyer_reference: Option<String>,
    project_reference: Option<String>,
    contract_reference: Option<String>,
    order_reference: Option<String>,
    sales_order_reference: Option<String>,
    receiving_advice_reference: Option<String>,
    despatch_advice_reference: Option<String>,
    buyer_accounting_reference: Option<String>,
    payment_terms: Option<String>,
    seller: Option<TradeParty>,
    buyer: Option<TradeParty>,
    payee: Option<Payee>,
    tax_representative: Option<TaxRepresentative>,
    delivery: Option<DeliveryInformation>,
    payment: Option<PaymentInstructions>,
    allowances: Vec<AllowanceCharge>,
    charges: Vec<AllowanceCharge>,
    preceding_invoices: Vec<PrecedingInvoice>,
    additional_documents: Vec<AdditionalDocument>,
    invoicing_period: Option<Period>,
    lines: Vec<InvoiceLine>,
    vat_breakdown: Vec<VatBreakdown>,
    totals: Option<DocumentTotals>,
}

impl InvoiceBuilder {
    pub fn new(number: impl Into<String>, issue_date: NaiveDate) -> Self {
        Self {
            number: number.into(),
            issue_date,
            type_code: InvoiceTypeCode::Invoice,
            currency_code: "EUR".to_string(),
            tax_currency_code: None,
            process_control: None,
            notes: Vec::new(),
            due_date: None,
            buyer_reference: None,
            project_reference: None,
            contract_reference: None,
            order_reference: None,
            sales_order_reference: None,
            receiving_advice_reference: None,
            despatch_advice_reference: None,
            buyer_accounting_reference: None,
            payment_terms: None,
            seller: None,
            buyer: None,
            payee: None,
            tax_representative: None,
            delivery: None,
            payment: None,
            allowances: Vec::new(),
            charges: Vec::new(),
            preceding_invoices: Vec::new(),
            additional_documents: Vec::new(),
            invoicing_period: None,
            lines: Vec::new(),
            vat_breakdown: Vec::new(),
            totals: None,
        }
    }

    pub fn type_code(mut self, code: InvoiceTypeCode) -> Self {
        self.type_code = code;
        self
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.currency_code = code.into();
        self
    }

    /// BT-6: VAT accounting currency, when different from the invoice currency.
    pub fn tax_currency(mut self, code: impl Into<String>) -> Self {
        self.tax_currency_code = Some(code.into());
        self
    }

    pub fn process_control(mut self, pc: ProcessControl) -> Self {
        self.process_control = Some(pc);
        self
    }

    /// Append a note without a subject qualifier. Output order follows
    /// append order.
    pub fn note(mut self, content: impl Into<String>) -> Self {
        self.notes.push(Note::new(content));
        self
    }

    /// Append a pre-built note. Output order follows append order.
    pub fn add_note(mut self, note: Note) -> Self {
        self.notes.push(note);
        self
    }

    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn buyer_reference(mut self, reference: impl Into<String>) -> Self {
        self.buyer_reference = Some(reference.into());
        self
    }

    pub fn project_reference(mut self, reference: impl Into<String>) -> Self {
        self.project_reference = Some(reference.into());
        self
    }

    pub fn contract_reference(mut self, reference: impl Into<String>) -> Self {
        self.contract_reference = Some(reference.into());
        self
    }

    pub fn order_reference(mut self, reference: impl Into<String>) -> Self {
        self.order_reference = Some(reference.into());
        self
    }

    pub fn sales_order_reference(mut self, reference: impl Into<String>) -> Self {
        self.sales_order_reference = Some(reference.into());
        self
    }

    pub fn receiving_advice_reference(mut self, reference: impl Into<String>) -> Self {
        self.receiving_advice_reference = Some(reference.into());
        self
    }

    pub fn despatch_advice_reference(mut self, reference: impl Into<String>) -> Self {
        self.despatch_advice_reference = Some(reference.into());
        self
    }

    pub fn buyer_accounting_reference(mut self, reference: impl Into<String>) -> Self {
        self.buyer_accounting_reference = Some(reference.into());
        self
    }

    pub fn payment_terms(mut self, terms: impl Into<String>) -> Self {
        self.payment_terms = Some(terms.into());
        self
    }

    pub fn seller(mut self, party: TradeParty) -> Self {
        self.seller = Some(party);
        self
    }

    pub fn buyer(mut self, party: TradeParty) -> Self {
        self.buyer = Some(party);
        self
    }

    pub fn payee(mut self, payee: Payee) -> Self {
        self.payee = Some(payee);
        self
    }

    pub fn tax_representative(mut self, rep: TaxRepresentative) -> Self {
        self.tax_representative = Some(rep);
        self
    }

    pub fn delivery(mut self, delivery: DeliveryInformation) -> Self {
        self.delivery = Some(delivery);
        self
    }

    pub fn payment(mut self, payment: PaymentInstructions) -> Self {
        self.payment = Some(payment);
        self
    }

    pub fn add_allowance(mut self, allowance: AllowanceCharge) -> Self {
        self.allowances.push(AllowanceCharge {
            is_charge: false,
            ..allowance
        });
        self
    }

    pub fn add_charge(mut self, charge: AllowanceCharge) -> Self {
        self.charges.push(AllowanceCharge {
            is_charge: true,
            ..charge
        });
        self
    }

    pub fn add_preceding_invoice(mut self, reference: PrecedingInvoice) -> Self {
        self.preceding_invoices.push(reference);
        self
    }

    pub fn add_document(mut self, document: AdditionalDocument) -> Self {
        self.additional_documents.push(document);
        self
    }

    pub fn invoicing_period(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.invoicing_period = Some(Period { start, end });
        self
    }

    pub fn add_line(mut self, line: InvoiceLine) -> Self {
        self.lines.push(line);
        self
    }

    pub fn add_vat_breakdown(mut self, breakdown: VatBreakdown) -> Self {
        self.vat_breakdown.push(breakdown);
        self
    }

    pub fn totals(mut self, totals: DocumentTotals) -> Self {
        self.totals = Some(totals);
        self
    }

    /// Check the construction invariants and produce the immutable invoice.
    pub fn build(self) -> Result<Invoice, FacturError> {
        let seller = self
            .seller
            .ok_or_else(|| FacturError::Builder("seller is required".into()))?;
        let buyer = self
            .buyer
            .ok_or_else(|| FacturError::Builder("buyer is required".into()))?;
        let process_control = self
            .process_control
            .ok_or_else(|| FacturError::Builder("process control is required".into()))?;
        let totals = self
            .totals
            .ok_or_else(|| FacturError::Builder("document totals are required".into()))?;

        if self.lines.is_empty() {
            return Err(FacturError::MissingCollection("invoice lines"));
        }
        if self.vat_breakdown.is_empty() {
            return Err(FacturError::MissingCollection("VAT breakdown"));
        }

        // Input limits to prevent abuse
        if self.lines.len() > 10_000 {
            return Err(FacturError::Builder(
                "invoice cannot have more than 10,000 lines".into(),
            ));
        }
        if self.number.len() > 200 {
            return Err(FacturError::Builder(
                "invoice number cannot exceed 200 characters".into(),
            ));
        }
        if self.notes.len() > 100 {
            return Err(FacturError::Builder(
                "invoice cannot have more than 100 notes".into(),
            ));
        }

        Ok(Invoice {
            number: self.number,
            issue_date: self.issue_date,
            type_code: self.type_code,
            currency_code: self.currency_code,
            tax_currency_code: self.tax_currency_code,
            process_control,
            notes: self.notes,
            due_date: self.due_date,
            buyer_reference: self.buyer_reference,
            project_reference: self.project_reference,
            contract_reference: self.contract_reference,
            order_reference: self.order_reference,
            sales_order_reference: self.sales_order_reference,
            receiving_advice_reference: self.receiving_advice_reference,
            despatch_advice_reference: self.despatch_advice_reference,
            buyer_accounting_reference: self.buyer_accounting_reference,
            payment_terms: self.payment_terms,
            seller,
            buyer,
            payee: self.payee,
            tax_representative: self.tax_representative,
            delivery: self.delivery,
            payment: self.payment,
            allowances: self.allowances,
            charges: self.charges,
            preceding_invoices: self.preceding_invoices,
            additional_documents: self.additional_documents,
            invoicing_period: self.invoicing_period,
            lines: self.lines,
            vat_breakdown: self.vat_breakdown,
            totals,
        })
    }
}

/// Builder for [`TradeParty`] (seller or buyer).
pub struct PartyBuilder {
    name: String,
    identifier: Option<Identifier>,
    legal_registration: Option<Identifier>,
    trading_name: Option<String>,
    vat_id: Option<VatId>,
    tax_registration: Option<String>,
    address: Address,
    contact: Option<Contact>,
    electronic_address: Option<Identifier>,
}

impl PartyBuilder {
    pub fn new(name: impl Into<String>, address: Address) -> Self {
        Self {
            name: name.into(),
            identifier: None,
            legal_registration: None,
            trading_name: None,
            vat_id: None,
            tax_registration: None,
            address,
            contact: None,
            electronic_address: None,
        }
    }

    pub fn identifier(mut self, id: Identifier) -> Self {
        self.identifier = Some(id);
        self
    }

    pub fn legal_registration(mut self, id: Identifier) -> Self {
        self.legal_registration = Some(id);
        self
    }

    pub fn trading_name(mut self, name: impl Into<String>) -> Self {
        self.trading_name = Some(name.into());
        self
    }

    pub fn vat_id(mut self, id: VatId) -> Self {
        self.vat_id = Some(id);
        self
    }

    pub fn tax_registration(mut self, number: impl Into<String>) -> Self {
        self.tax_registration = Some(number.into());
        self
    }

    pub fn contact(
        mut self,
        name: Option<String>,
        phone: Option<String>,
        email: Option<String>,
    ) -> Self {
        self.contact = Some(Contact { name, phone, email });
        self
    }

    pub fn electronic_address(mut self, address: Identifier) -> Self {
        self.electronic_address = Some(address);
        self
    }

    pub fn build(self) -> TradeParty {
        TradeParty {
            name: self.name,
            identifier: self.identifier,
            legal_registration: self.legal_registration,
            trading_name: self.trading_name,
            vat_id: self.vat_id,
            tax_registration: self.tax_registration,
            address: self.address,
            contact: self.contact,
            electronic_address: self.electronic_address,
        }
    }
}

/// Builder for [`Address`].
pub struct AddressBuilder {
    street: Option<String>,
    additional: Option<String>,
    city: String,
    postal_code: String,
    subdivision: Option<String>,
    country_code: String,
}

impl AddressBuilder {
    pub fn new(
        city: impl Into<String>,
        postal_code: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            street: None,
            additional: None,
            city: city.into(),
            postal_code: postal_code.into(),
            subdivision: None,
            country_code: country_code.into(),
        }
    }

    pub fn street(mut self, street: impl Into<String>) -> Self {
        self.street = Some(street.into());
        self
    }

    pub fn additional(mut self, additional: impl Into<String>) -> Self {
        self.additional = Some(additional.into());
        self
    }

    pub fn subdivision(mut self, subdivision: impl Into<String>) -> Self {
        self.subdivision = Some(subdivision.into());
        self
    }

    pub fn build(self) -> Address {
        Address {
            street: self.street,
            additional: self.additional,
            city: self.city,
            postal_code: self.postal_code,
            subdivision: self.subdivision,
            country_code: self.country_code,
        }
    }
}

/// Builder for [`InvoiceLine`].
pub struct LineBuilder {
    id: String,
    item_name: String,
    quantity: Quantity,
    unit_code: String,
    unit_price: UnitPrice,
    line_total: Amount,
    note: Option<String>,
    description: Option<String>,
    seller_item_id: Option<String>,
    buyer_item_id: Option<String>,
    standard_item_id: Option<Identifier>,
    origin_country: Option<String>,
    attributes: Vec<ItemAttribute>,
    gross_price: Option<UnitPrice>,
    base_quantity: Option<Quantity>,
    allowances: Vec<AllowanceCharge>,
    charges: Vec<AllowanceCharge>,
    tax_category: TaxCategory,
    tax_rate: Percentage,
    invoicing_period: Option<Period>,
}

impl LineBuilder {
    pub fn new(
        id: impl Into<String>,
        item_name: impl Into<String>,
        quantity: Quantity,
        unit_code: impl Into<String>,
        unit_price: UnitPrice,
        line_total: Amount,
    ) -> Self {
        Self {
            id: id.into(),
            item_name: item_name.into(),
            quantity,
            unit_code: unit_code.into(),
            unit_price,
            line_total,
            note: None,
            description: None,
            seller_item_id: None,
            buyer_item_id: None,
            standard_item_id: None,
            origin_country: None,
            attributes: Vec::new(),
            gross_price: None,
            base_quantity: None,
            allowances: Vec::new(),
            charges: Vec::new(),
            tax_category: TaxCategory::StandardRate,
            tax_rate: Percentage::ZERO,
            invoicing_period: None,
        }
    }

    pub fn tax(mut self, category: TaxCategory, rate: Percentage) -> Self {
        self.tax_category = category;
        self.tax_rate = rate;
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn seller_item_id(mut self, id: impl Into<String>) -> Self {
        self.seller_item_id = Some(id.into());
        self
    }

    pub fn buyer_item_id(mut self, id: impl Into<String>) -> Self {
        self.buyer_item_id = Some(id.into());
        self
    }

    pub fn standard_item_id(mut self, id: Identifier) -> Self {
        self.standard_item_id = Some(id);
        self
    }

    pub fn origin_country(mut self, code: impl Into<String>) -> Self {
        self.origin_country = Some(code.into());
        self
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(ItemAttribute {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn gross_price(mut self, price: UnitPrice) -> Self {
        self.gross_price = Some(price);
        self
    }

    pub fn base_quantity(mut self, quantity: Quantity) -> Self {
        self.base_quantity = Some(quantity);
        self
    }

    pub fn add_allowance(mut self, allowance: AllowanceCharge) -> Self {
        self.allowances.push(AllowanceCharge {
            is_charge: false,
            ..allowance
        });
        self
    }

    pub fn add_charge(mut self, charge: AllowanceCharge) -> Self {
        self.charges.push(AllowanceCharge {
            is_charge: true,
            ..charge
        });
        self
    }

    pub fn invoicing_period(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.invoicing_period = Some(Period { start, end });
        self
    }

    pub fn build(self) -> InvoiceLine {
        InvoiceLine {
            id: self.id,
            note: self.note,
            item_name: self.item_name,
            description: self.description,
            seller_item_id: self.seller_item_id,
            buyer_item_id: self.buyer_item_id,
            standard_item_id: self.standard_item_id,
            origin_country: self.origin_country,
            attributes: self.attributes,
            quantity: self.quantity,
            unit_code: self.unit_code,
            unit_price: self.unit_price,
            gross_price: self.gross_price,
            base_quantity: self.base_quantity,
            allowances: self.allowances,
            charges: self.charges,
            tax_category: self.tax_category,
            tax_rate: self.tax_rate,
            line_total: self.line_total,
            invoicing_period: self.invoicing_period,
        }
    }
}
