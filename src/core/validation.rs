//! EN 16931 business rule checks.
//!
//! [`validate_en16931`] inspects a finished [`Invoice`] and reports every
//! violated business rule as a [`ValidationError`] carrying the rule
//! identifier (BR-xx). Validation never fails construction — callers decide
//! what to do with the findings.

use rust_decimal::Decimal;

use super::codes::TaxCategory;
use super::countries::is_known_country_code;
use super::currencies::is_known_currency_code;
use super::decimal::round_half_away;
use super::error::ValidationError;
use super::types::{Address, AllowanceCharge, Invoice, TradeParty};

/// Tolerance for the per-category tax computation check (BR-CO-17). Totals
/// are caller-supplied and legitimately carry rounding applied per line or
/// per category, so exact equality is too strict.
const TAX_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2); // 0.01

/// Check an invoice against the EN 16931 business rules this crate covers.
///
/// Returns an empty vector when the invoice is compliant.
pub fn validate_en16931(invoice: &Invoice) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_document(invoice, &mut errors);
    check_parties(invoice, &mut errors);
    check_lines(invoice, &mut errors);
    check_category_cross_references(invoice, &mut errors);
    check_totals(invoice, &mut errors);

    errors
}

fn check_document(invoice: &Invoice, errors: &mut Vec<ValidationError>) {
    if invoice.number.trim().is_empty() {
        errors.push(
            ValidationError::new("number", "invoice number must not be empty")
                .with_rule("BR-02"),
        );
    }
    if !is_known_currency_code(&invoice.currency_code) {
        errors.push(
            ValidationError::new(
                "currency_code",
                format!("'{}' is not a known ISO 4217 code", invoice.currency_code),
            )
            .with_rule("BR-05"),
        );
    }
    if let Some(tax_currency) = &invoice.tax_currency_code {
        if !is_known_currency_code(tax_currency) {
            errors.push(
                ValidationError::new(
                    "tax_currency_code",
                    format!("'{tax_currency}' is not a known ISO 4217 code"),
                )
                .with_rule("BR-05"),
            );
        }
        if tax_currency == &invoice.currency_code {
            errors.push(ValidationError::new(
                "tax_currency_code",
                "VAT accounting currency must differ from the invoice currency",
            ));
        }
        if invoice.totals.tax_total_accounting.is_none() {
            errors.push(
                ValidationError::new(
                    "totals.tax_total_accounting",
                    "VAT total in the accounting currency is required when a \
                     VAT accounting currency is given",
                )
                .with_rule("BR-53"),
            );
        }
    }
    if invoice.process_control.guideline.trim().is_empty() {
        errors.push(
            ValidationError::new("process_control.guideline", "specification identifier must not be empty")
                .with_rule("BR-01"),
        );
    }
}

fn check_parties(invoice: &Invoice, errors: &mut Vec<ValidationError>) {
    check_party(&invoice.seller, "seller", "BR-06", "BR-09", errors);
    check_party(&invoice.buyer, "buyer", "BR-07", "BR-11", errors);

    // The seller must be identifiable for VAT purposes, unless a tax
    // representative stands in.
    if invoice.seller.vat_id.is_none()
        && invoice.seller.tax_registration.is_none()
        && invoice.tax_representative.is_none()
    {
        errors.push(
            ValidationError::new(
                "seller",
                "seller needs a VAT identifier or a tax registration number \
                 (or a tax representative)",
            )
            .with_rule("BR-CO-26"),
        );
    }

    if let Some(rep) = &invoice.tax_representative {
        if rep.name.trim().is_empty() {
            errors.push(
                ValidationError::new("tax_representative.name", "name must not be empty")
                    .with_rule("BR-18"),
            );
        }
        check_address(&rep.address, "tax_representative.address", "BR-20", errors);
    }
}

fn check_party(
    party: &TradeParty,
    field: &str,
    name_rule: &str,
    country_rule: &str,
    errors: &mut Vec<ValidationError>,
) {
    if party.name.trim().is_empty() {
        errors.push(
            ValidationError::new(format!("{field}.name"), "name must not be empty")
                .with_rule(name_rule),
        );
    }
    check_address(&party.address, &format!("{field}.address"), country_rule, errors);
}

fn check_address(
    address: &Address,
    field: &str,
    country_rule: &str,
    errors: &mut Vec<ValidationError>,
) {
    if !is_known_country_code(&address.country_code) {
        errors.push(
            ValidationError::new(
                format!("{field}.country_code"),
                format!("'{}' is not a known ISO 3166-1 code", address.country_code),
            )
            .with_rule(country_rule),
        );
    }
}

fn check_lines(invoice: &Invoice, errors: &mut Vec<ValidationError>) {
    for (idx, line) in invoice.lines.iter().enumerate() {
        let at = |part: &str| format!("lines[{idx}].{part}");
        if line.id.trim().is_empty() {
            errors.push(
                ValidationError::new(at("id"), "line identifier must not be empty")
                    .with_rule("BR-21"),
            );
        }
        if line.item_name.trim().is_empty() {
            errors.push(
                ValidationError::new(at("item_name"), "item name must not be empty")
                    .with_rule("BR-25"),
            );
        }
        if line.unit_code.trim().is_empty() {
            errors.push(
                ValidationError::new(at("unit_code"), "unit of measure must not be empty")
                    .with_rule("BR-23"),
            );
        }
        if let Some(country) = &line.origin_country {
            if !is_known_country_code(country) {
                errors.push(
                    ValidationError::new(
                        at("origin_country"),
                        format!("'{country}' is not a known ISO 3166-1 code"),
                    )
                    .with_rule("BR-CL-14"),
                );
            }
        }
        for (ac_idx, ac) in line.allowances.iter().enumerate() {
            check_allowance_charge(ac, &format!("lines[{idx}].allowances[{ac_idx}]"), errors);
        }
        for (ac_idx, ac) in line.charges.iter().enumerate() {
            check_allowance_charge(ac, &format!("lines[{idx}].charges[{ac_idx}]"), errors);
        }
    }
}

fn check_allowance_charge(
    ac: &AllowanceCharge,
    field: &str,
    errors: &mut Vec<ValidationError>,
) {
    // Percentage requires a base amount to apply to.
    if ac.percentage.is_some() && ac.base_amount.is_none() {
        errors.push(ValidationError::new(
            field,
            "a percentage needs a base amount",
        ));
    }
}

/// Every VAT category used on a line or a document-level allowance/charge
/// must have a matching breakdown entry.
fn check_category_cross_references(invoice: &Invoice, errors: &mut Vec<ValidationError>) {
    let mut used: Vec<TaxCategory> = Vec::new();
    for line in &invoice.lines {
        if !used.contains(&line.tax_category) {
            used.push(line.tax_category);
        }
    }
    for ac in invoice.allowances.iter().chain(&invoice.charges) {
        if !used.contains(&ac.tax_category) {
            used.push(ac.tax_category);
        }
    }

    for category in used {
        let covered = invoice
            .vat_breakdown
            .iter()
            .any(|b| b.category == category);
        if !covered {
            errors.push(
                ValidationError::new(
                    "vat_breakdown",
                    format!(
                        "category '{}' is used but has no VAT breakdown entry",
                        category.code()
                    ),
                )
                .with_rule(category_breakdown_rule(category)),
            );
        }
    }
}

/// The "breakdown must exist" rule identifier for each UNTDID 5305 category.
fn category_breakdown_rule(category: TaxCategory) -> &'static str {
    match category {
        TaxCategory::StandardRate => "BR-S-1",
        TaxCategory::ZeroRated => "BR-Z-1",
        TaxCategory::Exempt => "BR-E-1",
        TaxCategory::ReverseCharge => "BR-AE-1",
        TaxCategory::IntraCommunitySupply => "BR-IC-1",
        TaxCategory::Export => "BR-G-1",
        TaxCategory::NotSubjectToVat => "BR-O-1",
        TaxCategory::CanaryIslands => "BR-IG-1",
        TaxCategory::CeutaMelilla => "BR-IP-1",
    }
}

fn check_totals(invoice: &Invoice, errors: &mut Vec<ValidationError>) {
    let totals = &invoice.totals;

    // BR-CO-10: Σ line net amounts = line total.
    let line_sum: Decimal = invoice
        .lines
        .iter()
        .map(|l| l.line_total.value_rounded())
        .sum();
    if line_sum != totals.line_total.value_rounded() {
        errors.push(
            ValidationError::new(
                "totals.line_total",
                format!(
                    "line net amounts sum to {line_sum}, totals state {}",
                    totals.line_total
                ),
            )
            .with_rule("BR-CO-10"),
        );
    }

    // BR-CO-11 / BR-CO-12: declared allowance/charge totals match the
    // document-level entries.
    let allowance_sum: Decimal = invoice
        .allowances
        .iter()
        .map(|a| a.amount.value_rounded())
        .sum();
    let declared_allowances = totals
        .allowance_total
        .map(|a| a.value_rounded())
        .unwrap_or_default();
    if allowance_sum != declared_allowances {
        errors.push(
            ValidationError::new(
                "totals.allowance_total",
                format!(
                    "document allowances sum to {allowance_sum}, totals state {declared_allowances}"
                ),
            )
            .with_rule("BR-CO-11"),
        );
    }
    let charge_sum: Decimal = invoice
        .charges
        .iter()
        .map(|c| c.amount.value_rounded())
        .sum();
    let declared_charges = totals
        .charge_total
        .map(|c| c.value_rounded())
        .unwrap_or_default();
    if charge_sum != declared_charges {
        errors.push(
            ValidationError::new(
                "totals.charge_total",
                format!("document charges sum to {charge_sum}, totals state {declared_charges}"),
            )
            .with_rule("BR-CO-12"),
        );
    }

    // BR-CO-13: net = lines − allowances + charges.
    let expected_net =
        totals.line_total.value_rounded() - declared_allowances + declared_charges;
    if expected_net != totals.net_total.value_rounded() {
        errors.push(
            ValidationError::new(
                "totals.net_total",
                format!("expected {expected_net}, totals state {}", totals.net_total),
            )
            .with_rule("BR-CO-13"),
        );
    }

    // BR-CO-14: VAT total = Σ breakdown tax amounts.
    let breakdown_sum: Decimal = invoice
        .vat_breakdown
        .iter()
        .map(|b| b.tax_amount.value_rounded())
        .sum();
    if breakdown_sum != totals.tax_total.value_rounded() {
        errors.push(
            ValidationError::new(
                "totals.tax_total",
                format!(
                    "breakdown tax amounts sum to {breakdown_sum}, totals state {}",
                    totals.tax_total
                ),
            )
            .with_rule("BR-CO-14"),
        );
    }

    // BR-CO-15: grand = net + VAT (+ rounding amount).
    let rounding = totals
        .rounding_amount
        .map(|r| r.value_rounded())
        .unwrap_or_default();
    let expected_grand =
        totals.net_total.value_rounded() + totals.tax_total.value_rounded() + rounding;
    if expected_grand != totals.grand_total.value_rounded() {
        errors.push(
            ValidationError::new(
                "totals.grand_total",
                format!("expected {expected_grand}, totals state {}", totals.grand_total),
            )
            .with_rule("BR-CO-15"),
        );
    }

    // BR-CO-16: due = grand − prepaid.
    let prepaid = totals.prepaid.map(|p| p.value_rounded()).unwrap_or_default();
    let expected_due = totals.grand_total.value_rounded() - prepaid;
    if expected_due != totals.amount_due.value_rounded() {
        errors.push(
            ValidationError::new(
                "totals.amount_due",
                format!("expected {expected_due}, totals state {}", totals.amount_due),
            )
            .with_rule("BR-CO-16"),
        );
    }

    // BR-CO-17: per breakdown line, tax ≈ taxable × rate / 100.
    for (idx, breakdown) in invoice.vat_breakdown.iter().enumerate() {
        let computed = round_half_away(
            breakdown.taxable_amount.value() * breakdown.rate.value() / Decimal::ONE_HUNDRED,
            2,
        );
        let stated = breakdown.tax_amount.value_rounded();
        if (computed - stated).abs() > TAX_TOLERANCE {
            errors.push(
                ValidationError::new(
                    format!("vat_breakdown[{idx}].tax_amount"),
                    format!("expected {computed} from {} at {}%", breakdown.taxable_amount, breakdown.rate),
                )
                .with_rule("BR-CO-17"),
            );
        }
    }

    // Exemption reasons make no sense on the standard rate and are required
    // for exempt-style categories.
    for (idx, breakdown) in invoice.vat_breakdown.iter().enumerate() {
        let needs_reason = matches!(
            breakdown.category,
            TaxCategory::Exempt
                | TaxCategory::ReverseCharge
                | TaxCategory::IntraCommunitySupply
                | TaxCategory::Export
                | TaxCategory::NotSubjectToVat
        );
        let has_reason =
            breakdown.exemption_reason.is_some() || breakdown.exemption_reason_code.is_some();
        if needs_reason && !has_reason {
            errors.push(
                ValidationError::new(
                    format!("vat_breakdown[{idx}]"),
                    format!(
                        "category '{}' requires an exemption reason or reason code",
                        breakdown.category.code()
                    ),
                )
                .with_rule("BR-E-10"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::{AddressBuilder, InvoiceBuilder, LineBuilder, PartyBuilder};
    use crate::core::decimal::{Amount, Percentage, Quantity, UnitPrice};
    use crate::core::identifier::VatId;
    use crate::core::types::{DocumentTotals, ProcessControl, VatBreakdown};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn issue_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
    }

    fn seller() -> crate::core::types::TradeParty {
        PartyBuilder::new(
            "Lieferant GmbH",
            AddressBuilder::new("Berlin", "10115", "DE").build(),
        )
        .vat_id(VatId::new("DE123456789").unwrap())
        .build()
    }

    fn buyer() -> crate::core::types::TradeParty {
        PartyBuilder::new(
            "Kunde AG",
            AddressBuilder::new("Hamburg", "20095", "DE").build(),
        )
        .build()
    }

    fn compliant_invoice() -> crate::core::types::Invoice {
        InvoiceBuilder::new("RE-100", issue_date())
            .process_control(ProcessControl::new(
                "urn:cen.eu:en16931:2017#conformant#urn:factur-x.eu:1p0:extended",
            ))
            .seller(seller())
            .buyer(buyer())
            .add_line(
                LineBuilder::new(
                    "1",
                    "Beratung",
                    Quantity::new(dec!(10)).unwrap(),
                    "HUR",
                    UnitPrice::new(dec!(150)).unwrap(),
                    Amount::new(dec!(1500)).unwrap(),
                )
                .tax(TaxCategory::StandardRate, Percentage::new(dec!(19)).unwrap())
                .build(),
            )
            .add_vat_breakdown(VatBreakdown::new(
                Amount::new(dec!(1500)).unwrap(),
                Amount::new(dec!(285)).unwrap(),
                TaxCategory::StandardRate,
                Percentage::new(dec!(19)).unwrap(),
            ))
            .totals(DocumentTotals::new(
                Amount::new(dec!(1500)).unwrap(),
                Amount::new(dec!(1500)).unwrap(),
                Amount::new(dec!(285)).unwrap(),
                Amount::new(dec!(1785)).unwrap(),
                Amount::new(dec!(1785)).unwrap(),
            ))
            .build()
            .unwrap()
    }

    fn rules(errors: &[ValidationError]) -> Vec<&str> {
        errors.iter().filter_map(|e| e.rule.as_deref()).collect()
    }

    #[test]
    fn compliant_invoice_passes() {
        let errors = validate_en16931(&compliant_invoice());
        assert!(errors.is_empty(), "unexpected: {errors:?}");
    }

    #[test]
    fn empty_number_violates_br_02() {
        let mut invoice = compliant_invoice();
        invoice.number = "  ".into();
        assert!(rules(&validate_en16931(&invoice)).contains(&"BR-02"));
    }

    #[test]
    fn unknown_currency_violates_br_05() {
        let mut invoice = compliant_invoice();
        invoice.currency_code = "EURO".into();
        assert!(rules(&validate_en16931(&invoice)).contains(&"BR-05"));
    }

    #[test]
    fn unknown_seller_country_violates_br_09() {
        let mut invoice = compliant_invoice();
        invoice.seller.address.country_code = "XX".into();
        assert!(rules(&validate_en16931(&invoice)).contains(&"BR-09"));
    }

    #[test]
    fn seller_without_tax_identity_violates_br_co_26() {
        let mut invoice = compliant_invoice();
        invoice.seller.vat_id = None;
        invoice.seller.tax_registration = None;
        assert!(rules(&validate_en16931(&invoice)).contains(&"BR-CO-26"));
    }

    #[test]
    fn tax_representative_waives_seller_vat_requirement() {
        let mut invoice = compliant_invoice();
        invoice.seller.vat_id = None;
        invoice.seller.tax_registration = None;
        invoice.tax_representative = Some(crate::core::types::TaxRepresentative {
            name: "Vertreter GmbH".into(),
            vat_id: VatId::new("FR12345678901").unwrap(),
            address: AddressBuilder::new("Paris", "75001", "FR").build(),
        });
        assert!(!rules(&validate_en16931(&invoice)).contains(&"BR-CO-26"));
    }

    #[test]
    fn unmatched_line_category_reports_per_category_rule() {
        let mut invoice = compliant_invoice();
        invoice.lines.push(
            LineBuilder::new(
                "2",
                "Auslandsleistung",
                Quantity::new(dec!(1)).unwrap(),
                "C62",
                UnitPrice::new(dec!(100)).unwrap(),
                Amount::new(dec!(100)).unwrap(),
            )
            .tax(TaxCategory::ReverseCharge, Percentage::ZERO)
            .build(),
        );
        // Totals now also disagree; the category rule must still be present.
        assert!(rules(&validate_en16931(&invoice)).contains(&"BR-AE-1"));
    }

    #[test]
    fn wrong_line_total_violates_br_co_10() {
        let mut invoice = compliant_invoice();
        invoice.totals.line_total = Amount::new(dec!(1400)).unwrap();
        let errors = validate_en16931(&invoice);
        let found = rules(&errors);
        assert!(found.contains(&"BR-CO-10"));
        // Net no longer matches the (stated) line total either.
        assert!(found.contains(&"BR-CO-13"));
    }

    #[test]
    fn wrong_tax_total_violates_br_co_14() {
        let mut invoice = compliant_invoice();
        invoice.totals.tax_total = Amount::new(dec!(284)).unwrap();
        let errors = validate_en16931(&invoice);
        let found = rules(&errors);
        assert!(found.contains(&"BR-CO-14"));
        assert!(found.contains(&"BR-CO-15"));
    }

    #[test]
    fn breakdown_tax_amount_checked_within_tolerance() {
        let mut invoice = compliant_invoice();
        // 1500 × 19% = 285; 285.01 is inside the tolerance, 285.02 outside.
        invoice.vat_breakdown[0].tax_amount = Amount::new(dec!(285.01)).unwrap();
        invoice.totals.tax_total = Amount::new(dec!(285.01)).unwrap();
        invoice.totals.grand_total = Amount::new(dec!(1785.01)).unwrap();
        invoice.totals.amount_due = Amount::new(dec!(1785.01)).unwrap();
        assert!(!rules(&validate_en16931(&invoice)).contains(&"BR-CO-17"));

        invoice.vat_breakdown[0].tax_amount = Amount::new(dec!(285.02)).unwrap();
        invoice.totals.tax_total = Amount::new(dec!(285.02)).unwrap();
        invoice.totals.grand_total = Amount::new(dec!(1785.02)).unwrap();
        invoice.totals.amount_due = Amount::new(dec!(1785.02)).unwrap();
        assert!(rules(&validate_en16931(&invoice)).contains(&"BR-CO-17"));
    }

    #[test]
    fn exempt_breakdown_needs_a_reason() {
        let mut invoice = compliant_invoice();
        invoice.lines[0].tax_category = TaxCategory::Exempt;
        invoice.lines[0].tax_rate = Percentage::ZERO;
        invoice.vat_breakdown[0] = VatBreakdown::new(
            Amount::new(dec!(1500)).unwrap(),
            Amount::new(dec!(0)).unwrap(),
            TaxCategory::Exempt,
            Percentage::ZERO,
        );
        invoice.totals.tax_total = Amount::new(dec!(0)).unwrap();
        invoice.totals.grand_total = Amount::new(dec!(1500)).unwrap();
        invoice.totals.amount_due = Amount::new(dec!(1500)).unwrap();
        assert!(rules(&validate_en16931(&invoice)).contains(&"BR-E-10"));

        invoice.vat_breakdown[0] = invoice.vat_breakdown[0]
            .clone()
            .with_exemption_reason("Steuerbefreit nach §4 UStG");
        assert!(!rules(&validate_en16931(&invoice)).contains(&"BR-E-10"));
    }

    #[test]
    fn tax_currency_requires_accounting_total() {
        let mut invoice = compliant_invoice();
        invoice.tax_currency_code = Some("NOK".into());
        assert!(rules(&validate_en16931(&invoice)).contains(&"BR-53"));

        invoice.totals.tax_total_accounting = Some(Amount::new(dec!(3300)).unwrap());
        assert!(!rules(&validate_en16931(&invoice)).contains(&"BR-53"));
    }
}
