//! UN/CEFACT Cross Industry Invoice generation.
//!
//! One serialization path for every conformance profile: the specification
//! identifier carried in BG-2 decides which gated parts are emitted (see
//! [`super::profile`]), everything else follows the strict CII element
//! order.

use chrono::NaiveDate;

use super::ns;
use super::profile::{GatedElement, is_element_permitted};
use super::writer::XmlWriter;
use crate::core::*;

/// Serialize an invoice as Cross Industry Invoice XML.
///
/// The conformance profile is taken from the invoice's specification
/// identifier (BT-24); the Minimum profile yields a reduced document
/// without notes, line items or VAT breakdown.
pub fn to_cii_xml(invoice: &Invoice) -> Result<String, FacturError> {
    let guideline = invoice.process_control.guideline.as_str();
    let currency = invoice.currency_code.as_str();
    let mut w = XmlWriter::new()?;

    w.start_element_with_attrs(
        "rsm:CrossIndustryInvoice",
        &[
            ("xmlns:rsm", ns::RSM),
            ("xmlns:ram", ns::RAM),
            ("xmlns:qdt", ns::QDT),
            ("xmlns:udt", ns::UDT),
            ("xmlns:xsi", ns::XSI),
        ],
    )?;

    // --- ExchangedDocumentContext ---
    w.start_element("rsm:ExchangedDocumentContext")?;
    if let Some(bp) = &invoice.process_control.business_process {
        w.start_element("ram:BusinessProcessSpecifiedDocumentContextParameter")?;
        w.text_element("ram:ID", bp)?;
        w.end_element("ram:BusinessProcessSpecifiedDocumentContextParameter")?;
    }
    w.start_element("ram:GuidelineSpecifiedDocumentContextParameter")?;
    w.text_element("ram:ID", guideline)?;
    w.end_element("ram:GuidelineSpecifiedDocumentContextParameter")?;
    w.end_element("rsm:ExchangedDocumentContext")?;

    // --- ExchangedDocument ---
    w.start_element("rsm:ExchangedDocument")?;
    w.text_element("ram:ID", &invoice.number)?;
    w.text_element("ram:TypeCode", &invoice.type_code.code().to_string())?;
    write_date(&mut w, "ram:IssueDateTime", &invoice.issue_date)?;
    if is_element_permitted(guideline, GatedElement::IncludedNote) {
        for note in &invoice.notes {
            w.start_element("ram:IncludedNote")?;
            w.text_element("ram:Content", &note.content)?;
            if let Some(subject) = &note.subject_code {
                w.text_element("ram:SubjectCode", subject)?;
            }
            w.end_element("ram:IncludedNote")?;
        }
    }
    w.end_element("rsm:ExchangedDocument")?;

    // --- SupplyChainTradeTransaction ---
    w.start_element("rsm:SupplyChainTradeTransaction")?;

    if is_element_permitted(guideline, GatedElement::TradeLineItem) {
        for line in &invoice.lines {
            write_line(&mut w, line)?;
        }
    }

    write_header_agreement(&mut w, invoice)?;
    write_header_delivery(&mut w, invoice)?;
    write_header_settlement(&mut w, invoice, guideline, currency)?;

    w.end_element("rsm:SupplyChainTradeTransaction")?;
    w.end_element("rsm:CrossIndustryInvoice")?;

    w.into_string()
}

fn write_header_agreement(w: &mut XmlWriter, invoice: &Invoice) -> Result<(), FacturError> {
    w.start_element("ram:ApplicableHeaderTradeAgreement")?;
    if let Some(br) = &invoice.buyer_reference {
        w.text_element("ram:BuyerReference", br)?;
    }
    write_party(w, &invoice.seller, "ram:SellerTradeParty", true)?;
    write_party(w, &invoice.buyer, "ram:BuyerTradeParty", false)?;

    if let Some(rep) = &invoice.tax_representative {
        w.start_element("ram:SellerTaxRepresentativeTradeParty")?;
        w.text_element("ram:Name", &rep.name)?;
        write_address(w, &rep.address)?;
        w.start_element("ram:SpecifiedTaxRegistration")?;
        w.text_element_with_attrs("ram:ID", rep.vat_id.as_str(), &[("schemeID", "VA")])?;
        w.end_element("ram:SpecifiedTaxRegistration")?;
        w.end_element("ram:SellerTaxRepresentativeTradeParty")?;
    }

    if let Some(so) = &invoice.sales_order_reference {
        w.start_element("ram:SellerOrderReferencedDocument")?;
        w.text_element("ram:IssuerAssignedID", so)?;
        w.end_element("ram:SellerOrderReferencedDocument")?;
    }
    if let Some(or) = &invoice.order_reference {
        w.start_element("ram:BuyerOrderReferencedDocument")?;
        w.text_element("ram:IssuerAssignedID", or)?;
        w.end_element("ram:BuyerOrderReferencedDocument")?;
    }
    if let Some(cr) = &invoice.contract_reference {
        w.start_element("ram:ContractReferencedDocument")?;
        w.text_element("ram:IssuerAssignedID", cr)?;
        w.end_element("ram:ContractReferencedDocument")?;
    }
    for doc in &invoice.additional_documents {
        w.start_element("ram:AdditionalReferencedDocument")?;
        w.text_element("ram:IssuerAssignedID", &doc.id)?;
        if let Some(uri) = &doc.external_uri {
            w.text_element("ram:URIID", uri)?;
        }
        w.text_element("ram:TypeCode", doc.type_code.code())?;
        if let Some(desc) = &doc.description {
            w.text_element("ram:Name", desc)?;
        }
        if let Some(att) = &doc.attachment {
            w.text_element_with_attrs(
                "ram:AttachmentBinaryObject",
                &att.content,
                &[("mimeCode", att.mime.code()), ("filename", &att.filename)],
            )?;
        }
        w.end_element("ram:AdditionalReferencedDocument")?;
    }
    if let Some(project) = &invoice.project_reference {
        // The schema requires a Name sibling; BT-11 only carries the
        // reference, so it doubles as both.
        w.start_element("ram:SpecifiedProcuringProject")?;
        w.text_element("ram:ID", project)?;
        w.text_element("ram:Name", project)?;
        w.end_element("ram:SpecifiedProcuringProject")?;
    }
    w.end_element("ram:ApplicableHeaderTradeAgreement")?;
    Ok(())
}

fn write_header_delivery(w: &mut XmlWriter, invoice: &Invoice) -> Result<(), FacturError> {
    w.start_element("ram:ApplicableHeaderTradeDelivery")?;
    if let Some(delivery) = &invoice.delivery {
        // Schema order: ShipToTradeParty before the delivery event.
        if let Some(ship_to) = &delivery.ship_to {
            w.start_element("ram:ShipToTradeParty")?;
            if let Some(location) = &ship_to.location_id {
                write_identifier(w, "ram:ID", location)?;
            }
            w.text_element("ram:Name", &ship_to.name)?;
            if let Some(address) = &ship_to.address {
                write_address(w, address)?;
            }
            w.end_element("ram:ShipToTradeParty")?;
        }
        if let Some(date) = &delivery.actual_delivery_date {
            w.start_element("ram:ActualDeliverySupplyChainEvent")?;
            write_date(w, "ram:OccurrenceDateTime", date)?;
            w.end_element("ram:ActualDeliverySupplyChainEvent")?;
        }
    }
    if let Some(da) = &invoice.despatch_advice_reference {
        w.start_element("ram:DespatchAdviceReferencedDocument")?;
        w.text_element("ram:IssuerAssignedID", da)?;
        w.end_element("ram:DespatchAdviceReferencedDocument")?;
    }
    if let Some(ra) = &invoice.receiving_advice_reference {
        w.start_element("ram:ReceivingAdviceReferencedDocument")?;
        w.text_element("ram:IssuerAssignedID", ra)?;
        w.end_element("ram:ReceivingAdviceReferencedDocument")?;
    }
    w.end_element("ram:ApplicableHeaderTradeDelivery")?;
    Ok(())
}

fn write_header_settlement(
    w: &mut XmlWriter,
    invoice: &Invoice,
    guideline: &str,
    currency: &str,
) -> Result<(), FacturError> {
    w.start_element("ram:ApplicableHeaderTradeSettlement")?;

    if let Some(payment) = &invoice.payment {
        if let Some(dd) = &payment.direct_debit {
            if let Some(creditor_id) = &dd.creditor_id {
                w.text_element("ram:CreditorReferenceID", creditor_id)?;
            }
        }
        if let Some(ri) = &payment.remittance_info {
            w.text_element("ram:PaymentReference", ri)?;
        }
    }
    if let Some(tcc) = &invoice.tax_currency_code {
        w.text_element("ram:TaxCurrencyCode", tcc)?;
    }
    w.text_element("ram:InvoiceCurrencyCode", currency)?;

    if let Some(payee) = &invoice.payee {
        w.start_element("ram:PayeeTradeParty")?;
        if let Some(id) = &payee.identifier {
            write_identifier(w, "ram:ID", id)?;
        }
        w.text_element("ram:Name", &payee.name)?;
        if let Some(reg) = &payee.legal_registration {
            w.start_element("ram:SpecifiedLegalOrganization")?;
            write_identifier(w, "ram:ID", reg)?;
            w.end_element("ram:SpecifiedLegalOrganization")?;
        }
        w.end_element("ram:PayeeTradeParty")?;
    }

    if let Some(payment) = &invoice.payment {
        write_payment_means(w, payment)?;
    }

    if is_element_permitted(guideline, GatedElement::VatBreakdown) {
        for bd in &invoice.vat_breakdown {
            w.start_element("ram:ApplicableTradeTax")?;
            w.text_element("ram:CalculatedAmount", &bd.tax_amount.to_string())?;
            w.text_element("ram:TypeCode", "VAT")?;
            if let Some(reason) = &bd.exemption_reason {
                w.text_element("ram:ExemptionReason", reason)?;
            }
            w.text_element("ram:BasisAmount", &bd.taxable_amount.to_string())?;
            w.text_element("ram:CategoryCode", bd.category.code())?;
            if let Some(code) = &bd.exemption_reason_code {
                w.text_element("ram:ExemptionReasonCode", code)?;
            }
            w.text_element("ram:RateApplicablePercent", &bd.rate.to_string())?;
            w.end_element("ram:ApplicableTradeTax")?;
        }
    }

    // BG-14: document-level invoicing period sits in settlement.
    if let Some(period) = &invoice.invoicing_period {
        write_period(w, period)?;
    }

    for ac in invoice.allowances.iter().chain(invoice.charges.iter()) {
        write_allowance_charge(w, ac, true)?;
    }

    if invoice.payment_terms.is_some()
        || invoice.due_date.is_some()
        || has_direct_debit_mandate(invoice)
    {
        w.start_element("ram:SpecifiedTradePaymentTerms")?;
        if let Some(terms) = &invoice.payment_terms {
            w.text_element("ram:Description", terms)?;
        }
        if let Some(due) = &invoice.due_date {
            write_date(w, "ram:DueDateDateTime", due)?;
        }
        if let Some(payment) = &invoice.payment {
            if let Some(dd) = &payment.direct_debit {
                if let Some(mandate) = &dd.mandate_id {
                    w.text_element("ram:DirectDebitMandateID", mandate)?;
                }
            }
        }
        w.end_element("ram:SpecifiedTradePaymentTerms")?;
    }

    write_monetary_summation(w, invoice, guideline, currency)?;

    // BG-3: preceding invoice references come after the summation.
    for pi in &invoice.preceding_invoices {
        w.start_element("ram:InvoiceReferencedDocument")?;
        w.text_element("ram:IssuerAssignedID", &pi.number)?;
        if let Some(date) = &pi.issue_date {
            write_formatted_date(w, "ram:FormattedIssueDateTime", date)?;
        }
        w.end_element("ram:InvoiceReferencedDocument")?;
    }
    if let Some(account) = &invoice.buyer_accounting_reference {
        w.start_element("ram:ReceivableSpecifiedTradeAccountingAccount")?;
        w.text_element("ram:ID", account)?;
        w.end_element("ram:ReceivableSpecifiedTradeAccountingAccount")?;
    }

    w.end_element("ram:ApplicableHeaderTradeSettlement")?;
    Ok(())
}

fn write_monetary_summation(
    w: &mut XmlWriter,
    invoice: &Invoice,
    guideline: &str,
    currency: &str,
) -> Result<(), FacturError> {
    let totals = &invoice.totals;
    let reduced = !is_element_permitted(guideline, GatedElement::TradeLineItem);

    w.start_element("ram:SpecifiedTradeSettlementHeaderMonetarySummation")?;
    if !reduced {
        w.text_element("ram:LineTotalAmount", &totals.line_total.to_string())?;
        if let Some(charges) = &totals.charge_total {
            w.text_element("ram:ChargeTotalAmount", &charges.to_string())?;
        }
        if let Some(allowances) = &totals.allowance_total {
            w.text_element("ram:AllowanceTotalAmount", &allowances.to_string())?;
        }
    }
    w.text_element("ram:TaxBasisTotalAmount", &totals.net_total.to_string())?;
    w.text_element_with_attrs(
        "ram:TaxTotalAmount",
        &totals.tax_total.to_string(),
        &[("currencyID", currency)],
    )?;
    if let (Some(tcc), Some(accounting)) =
        (&invoice.tax_currency_code, &totals.tax_total_accounting)
    {
        w.text_element_with_attrs(
            "ram:TaxTotalAmount",
            &accounting.to_string(),
            &[("currencyID", tcc.as_str())],
        )?;
    }
    if !reduced {
        if let Some(rounding) = &totals.rounding_amount {
            w.text_element("ram:RoundingAmount", &rounding.to_string())?;
        }
    }
    w.text_element("ram:GrandTotalAmount", &totals.grand_total.to_string())?;
    if !reduced {
        if let Some(prepaid) = &totals.prepaid {
            w.text_element("ram:TotalPrepaidAmount", &prepaid.to_string())?;
        }
    }
    w.text_element("ram:DuePayableAmount", &totals.amount_due.to_string())?;
    w.end_element("ram:SpecifiedTradeSettlementHeaderMonetarySummation")?;
    Ok(())
}

fn write_payment_means(
    w: &mut XmlWriter,
    payment: &PaymentInstructions,
) -> Result<(), FacturError> {
    w.start_element("ram:SpecifiedTradeSettlementPaymentMeans")?;
    w.text_element("ram:TypeCode", &payment.means_code.code().to_string())?;
    if let Some(text) = &payment.means_text {
        w.text_element("ram:Information", text)?;
    }
    if let Some(card) = &payment.card_payment {
        w.start_element("ram:ApplicableTradeSettlementFinancialCard")?;
        w.text_element("ram:ID", &card.account_number)?;
        if let Some(holder) = &card.holder_name {
            w.text_element("ram:CardholderName", holder)?;
        }
        w.end_element("ram:ApplicableTradeSettlementFinancialCard")?;
    }
    if let Some(dd) = &payment.direct_debit {
        if let Some(account) = &dd.debited_account {
            w.start_element("ram:PayerPartyDebtorFinancialAccount")?;
            w.text_element("ram:IBANID", account)?;
            w.end_element("ram:PayerPartyDebtorFinancialAccount")?;
        }
    }
    if let Some(ct) = &payment.credit_transfer {
        w.start_element("ram:PayeePartyCreditorFinancialAccount")?;
        w.text_element("ram:IBANID", &ct.iban)?;
        if let Some(name) = &ct.account_name {
            w.text_element("ram:AccountName", name)?;
        }
        w.end_element("ram:PayeePartyCreditorFinancialAccount")?;
        if let Some(bic) = &ct.bic {
            w.start_element("ram:PayeeSpecifiedCreditorFinancialInstitution")?;
            w.text_element("ram:BICID", bic)?;
            w.end_element("ram:PayeeSpecifiedCreditorFinancialInstitution")?;
        }
    }
    w.end_element("ram:SpecifiedTradeSettlementPaymentMeans")?;
    Ok(())
}

fn has_direct_debit_mandate(invoice: &Invoice) -> bool {
    invoice
        .payment
        .as_ref()
        .and_then(|p| p.direct_debit.as_ref())
        .is_some_and(|dd| dd.mandate_id.is_some())
}

fn write_party(
    w: &mut XmlWriter,
    party: &TradeParty,
    element: &str,
    is_seller: bool,
) -> Result<(), FacturError> {
    // CII schema requires strict element order within TradeParty:
    // ID → Name → SpecifiedLegalOrganization → DefinedTradeContact →
    // PostalTradeAddress → URIUniversalCommunication → SpecifiedTaxRegistration
    w.start_element(element)?;
    if let Some(id) = &party.identifier {
        write_identifier(w, "ram:ID", id)?;
    }
    w.text_element("ram:Name", &party.name)?;

    if party.legal_registration.is_some() || party.trading_name.is_some() {
        w.start_element("ram:SpecifiedLegalOrganization")?;
        if let Some(reg) = &party.legal_registration {
            write_identifier(w, "ram:ID", reg)?;
        }
        if let Some(tn) = &party.trading_name {
            w.text_element("ram:TradingBusinessName", tn)?;
        }
        w.end_element("ram:SpecifiedLegalOrganization")?;
    }

    if let Some(contact) = &party.contact {
        w.start_element("ram:DefinedTradeContact")?;
        if let Some(name) = &contact.name {
            w.text_element("ram:PersonName", name)?;
        }
        if let Some(phone) = &contact.phone {
            w.start_element("ram:TelephoneUniversalCommunication")?;
            w.text_element("ram:CompleteNumber", phone)?;
            w.end_element("ram:TelephoneUniversalCommunication")?;
        }
        if let Some(email) = &contact.email {
            w.start_element("ram:EmailURIUniversalCommunication")?;
            w.text_element("ram:URIID", email)?;
            w.end_element("ram:EmailURIUniversalCommunication")?;
        }
        w.end_element("ram:DefinedTradeContact")?;
    }

    write_address(w, &party.address)?;

    if let Some(ea) = &party.electronic_address {
        w.start_element("ram:URIUniversalCommunication")?;
        write_identifier(w, "ram:URIID", ea)?;
        w.end_element("ram:URIUniversalCommunication")?;
    }

    // Tax registrations come last per schema.
    if let Some(vat_id) = &party.vat_id {
        w.start_element("ram:SpecifiedTaxRegistration")?;
        w.text_element_with_attrs("ram:ID", vat_id.as_str(), &[("schemeID", "VA")])?;
        w.end_element("ram:SpecifiedTaxRegistration")?;
    }
    if is_seller {
        if let Some(tax_num) = &party.tax_registration {
            w.start_element("ram:SpecifiedTaxRegistration")?;
            w.text_element_with_attrs("ram:ID", tax_num, &[("schemeID", "FC")])?;
            w.end_element("ram:SpecifiedTaxRegistration")?;
        }
    }

    w.end_element(element)?;
    Ok(())
}

fn write_address(w: &mut XmlWriter, address: &Address) -> Result<(), FacturError> {
    w.start_element("ram:PostalTradeAddress")?;
    w.text_element("ram:PostcodeCode", &address.postal_code)?;
    if let Some(street) = &address.street {
        w.text_element("ram:LineOne", street)?;
    }
    if let Some(additional) = &address.additional {
        w.text_element("ram:LineTwo", additional)?;
    }
    w.text_element("ram:CityName", &address.city)?;
    w.text_element("ram:CountryID", &address.country_code)?;
    if let Some(sub) = &address.subdivision {
        w.text_element("ram:CountrySubDivisionName", sub)?;
    }
    w.end_element("ram:PostalTradeAddress")?;
    Ok(())
}

fn write_identifier(w: &mut XmlWriter, element: &str, id: &Identifier) -> Result<(), FacturError> {
    match &id.scheme {
        Some(scheme) => {
            w.text_element_with_attrs(element, &id.value, &[("schemeID", scheme.code())])?
        }
        None => w.text_element(element, &id.value)?,
    };
    Ok(())
}

fn write_line(w: &mut XmlWriter, line: &InvoiceLine) -> Result<(), FacturError> {
    w.start_element("ram:IncludedSupplyChainTradeLineItem")?;

    w.start_element("ram:AssociatedDocumentLineDocument")?;
    w.text_element("ram:LineID", &line.id)?;
    if let Some(note) = &line.note {
        w.start_element("ram:IncludedNote")?;
        w.text_element("ram:Content", note)?;
        w.end_element("ram:IncludedNote")?;
    }
    w.end_element("ram:AssociatedDocumentLineDocument")?;

    w.start_element("ram:SpecifiedTradeProduct")?;
    if let Some(std_id) = &line.standard_item_id {
        write_identifier(w, "ram:GlobalID", std_id)?;
    }
    if let Some(sid) = &line.seller_item_id {
        w.text_element("ram:SellerAssignedID", sid)?;
    }
    if let Some(bid) = &line.buyer_item_id {
        w.text_element("ram:BuyerAssignedID", bid)?;
    }
    w.text_element("ram:Name", &line.item_name)?;
    if let Some(desc) = &line.description {
        w.text_element("ram:Description", desc)?;
    }
    for attr in &line.attributes {
        w.start_element("ram:ApplicableProductCharacteristic")?;
        w.text_element("ram:Description", &attr.name)?;
        w.text_element("ram:Value", &attr.value)?;
        w.end_element("ram:ApplicableProductCharacteristic")?;
    }
    if let Some(country) = &line.origin_country {
        w.start_element("ram:OriginTradeCountry")?;
        w.text_element("ram:ID", country)?;
        w.end_element("ram:OriginTradeCountry")?;
    }
    w.end_element("ram:SpecifiedTradeProduct")?;

    // BG-29: price details
    w.start_element("ram:SpecifiedLineTradeAgreement")?;
    if let Some(gp) = &line.gross_price {
        w.start_element("ram:GrossPriceProductTradePrice")?;
        w.text_element("ram:ChargeAmount", &gp.to_string())?;
        // BT-147: price discount, derived from gross minus net.
        let mut discount = gp.sub(&line.unit_price, Some(UnitPrice::SCALE));
        if discount > rust_decimal::Decimal::ZERO {
            discount.rescale(UnitPrice::SCALE);
            w.start_element("ram:AppliedTradeAllowanceCharge")?;
            w.start_element("ram:ChargeIndicator")?;
            w.text_element("udt:Indicator", "false")?;
            w.end_element("ram:ChargeIndicator")?;
            w.text_element("ram:ActualAmount", &discount.to_string())?;
            w.end_element("ram:AppliedTradeAllowanceCharge")?;
        }
        w.end_element("ram:GrossPriceProductTradePrice")?;
    }
    w.start_element("ram:NetPriceProductTradePrice")?;
    w.text_element("ram:ChargeAmount", &line.unit_price.to_string())?;
    if let Some(bq) = &line.base_quantity {
        w.text_element_with_attrs(
            "ram:BasisQuantity",
            &bq.to_string(),
            &[("unitCode", line.unit_code.as_str())],
        )?;
    }
    w.end_element("ram:NetPriceProductTradePrice")?;
    w.end_element("ram:SpecifiedLineTradeAgreement")?;

    w.start_element("ram:SpecifiedLineTradeDelivery")?;
    w.text_element_with_attrs(
        "ram:BilledQuantity",
        &line.quantity.to_string(),
        &[("unitCode", line.unit_code.as_str())],
    )?;
    w.end_element("ram:SpecifiedLineTradeDelivery")?;

    w.start_element("ram:SpecifiedLineTradeSettlement")?;
    w.start_element("ram:ApplicableTradeTax")?;
    w.text_element("ram:TypeCode", "VAT")?;
    w.text_element("ram:CategoryCode", line.tax_category.code())?;
    w.text_element("ram:RateApplicablePercent", &line.tax_rate.to_string())?;
    w.end_element("ram:ApplicableTradeTax")?;
    if let Some(period) = &line.invoicing_period {
        write_period(w, period)?;
    }
    for ac in line.allowances.iter().chain(line.charges.iter()) {
        write_allowance_charge(w, ac, false)?;
    }
    w.start_element("ram:SpecifiedTradeSettlementLineMonetarySummation")?;
    w.text_element("ram:LineTotalAmount", &line.line_total.to_string())?;
    w.end_element("ram:SpecifiedTradeSettlementLineMonetarySummation")?;
    w.end_element("ram:SpecifiedLineTradeSettlement")?;

    w.end_element("ram:IncludedSupplyChainTradeLineItem")?;
    Ok(())
}

fn write_allowance_charge(
    w: &mut XmlWriter,
    ac: &AllowanceCharge,
    with_tax: bool,
) -> Result<(), FacturError> {
    w.start_element("ram:SpecifiedTradeAllowanceCharge")?;
    w.start_element("ram:ChargeIndicator")?;
    w.text_element("udt:Indicator", if ac.is_charge { "true" } else { "false" })?;
    w.end_element("ram:ChargeIndicator")?;
    if let Some(pct) = &ac.percentage {
        w.text_element("ram:CalculationPercent", &pct.to_string())?;
    }
    if let Some(base) = &ac.base_amount {
        w.text_element("ram:BasisAmount", &base.to_string())?;
    }
    w.text_element("ram:ActualAmount", &ac.amount.to_string())?;
    if let Some(code) = &ac.reason_code {
        w.text_element("ram:ReasonCode", code)?;
    }
    if let Some(reason) = &ac.reason {
        w.text_element("ram:Reason", reason)?;
    }
    if with_tax {
        w.start_element("ram:CategoryTradeTax")?;
        w.text_element("ram:TypeCode", "VAT")?;
        w.text_element("ram:CategoryCode", ac.tax_category.code())?;
        w.text_element("ram:RateApplicablePercent", &ac.tax_rate.to_string())?;
        w.end_element("ram:CategoryTradeTax")?;
    }
    w.end_element("ram:SpecifiedTradeAllowanceCharge")?;
    Ok(())
}

fn write_period(w: &mut XmlWriter, period: &Period) -> Result<(), FacturError> {
    w.start_element("ram:BillingSpecifiedPeriod")?;
    write_date(w, "ram:StartDateTime", &period.start)?;
    write_date(w, "ram:EndDateTime", &period.end)?;
    w.end_element("ram:BillingSpecifiedPeriod")?;
    Ok(())
}

/// Wrap a date in `udt:DateTimeString` with the CII format code 102
/// (calendar date, YYYYMMDD).
fn write_date(w: &mut XmlWriter, element: &str, date: &NaiveDate) -> Result<(), FacturError> {
    w.start_element(element)?;
    w.text_element_with_attrs(
        "udt:DateTimeString",
        &date.format("%Y%m%d").to_string(),
        &[("format", "102")],
    )?;
    w.end_element(element)?;
    Ok(())
}

/// `FormattedIssueDateTime` uses the qualified data type namespace.
fn write_formatted_date(
    w: &mut XmlWriter,
    element: &str,
    date: &NaiveDate,
) -> Result<(), FacturError> {
    w.start_element(element)?;
    w.text_element_with_attrs(
        "qdt:DateTimeString",
        &date.format("%Y%m%d").to_string(),
        &[("format", "102")],
    )?;
    w.end_element(element)?;
    Ok(())
}
