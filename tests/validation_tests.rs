use chrono::NaiveDate;
use facturx::cii::Profile;
use facturx::core::*;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn amount(v: rust_decimal::Decimal) -> Amount {
    Amount::new(v).unwrap()
}

fn seller() -> TradeParty {
    PartyBuilder::new(
        "ACME GmbH",
        AddressBuilder::new("Berlin", "10115", "DE").build(),
    )
    .vat_id(VatId::new("DE123456789").unwrap())
    .build()
}

fn buyer() -> TradeParty {
    PartyBuilder::new(
        "Kunde AG",
        AddressBuilder::new("München", "80331", "DE").build(),
    )
    .build()
}

fn line(id: &str, category: TaxCategory, rate: rust_decimal::Decimal, total: rust_decimal::Decimal) -> InvoiceLine {
    LineBuilder::new(
        id,
        "Position",
        Quantity::new(dec!(1)).unwrap(),
        "C62",
        UnitPrice::new(total).unwrap(),
        amount(total),
    )
    .tax(category, Percentage::new(rate).unwrap())
    .build()
}

fn rules(errors: &[ValidationError]) -> Vec<&str> {
    errors.iter().filter_map(|e| e.rule.as_deref()).collect()
}

/// An invoice whose line uses reverse charge but whose breakdown only covers
/// the standard rate. Construction succeeds — the mismatch is a validation
/// finding, not a builder error.
#[test]
fn category_mismatch_builds_but_fails_validation() {
    let invoice = InvoiceBuilder::new("RE-2026-010", date(2026, 3, 1))
        .process_control(Profile::EN16931.into())
        .seller(seller())
        .buyer(buyer())
        .add_line(line("1", TaxCategory::StandardRate, dec!(19), dec!(1000)))
        .add_line(line("2", TaxCategory::ReverseCharge, dec!(0), dec!(500)))
        .add_vat_breakdown(VatBreakdown::new(
            amount(dec!(1000)),
            amount(dec!(190)),
            TaxCategory::StandardRate,
            Percentage::new(dec!(19)).unwrap(),
        ))
        .totals(DocumentTotals::new(
            amount(dec!(1500)),
            amount(dec!(1500)),
            amount(dec!(190)),
            amount(dec!(1690)),
            amount(dec!(1690)),
        ))
        .build()
        .expect("construction must not reject category mismatches");

    let errors = validate_en16931(&invoice);
    assert!(rules(&errors).contains(&"BR-AE-1"));
}

#[test]
fn document_charge_category_needs_breakdown_coverage() {
    let invoice = InvoiceBuilder::new("RE-2026-011", date(2026, 3, 1))
        .process_control(Profile::EN16931.into())
        .seller(seller())
        .buyer(buyer())
        .add_line(line("1", TaxCategory::StandardRate, dec!(19), dec!(1000)))
        .add_charge(AllowanceCharge {
            is_charge: true,
            amount: amount(dec!(40)),
            base_amount: None,
            percentage: None,
            tax_category: TaxCategory::ZeroRated,
            tax_rate: Percentage::ZERO,
            reason: Some("Versand".into()),
            reason_code: None,
        })
        .add_vat_breakdown(VatBreakdown::new(
            amount(dec!(1000)),
            amount(dec!(190)),
            TaxCategory::StandardRate,
            Percentage::new(dec!(19)).unwrap(),
        ))
        .totals(
            DocumentTotals::new(
                amount(dec!(1000)),
                amount(dec!(1040)),
                amount(dec!(190)),
                amount(dec!(1230)),
                amount(dec!(1230)),
            )
            .with_charge_total(amount(dec!(40))),
        )
        .build()
        .unwrap();

    assert!(rules(&validate_en16931(&invoice)).contains(&"BR-Z-1"));
}

fn multi_rate_invoice() -> Invoice {
    // 1000 @ 19% and 500 @ 7%: 190 + 35 = 225 tax.
    InvoiceBuilder::new("RE-2026-012", date(2026, 3, 1))
        .process_control(Profile::EN16931.into())
        .seller(seller())
        .buyer(buyer())
        .add_line(line("1", TaxCategory::StandardRate, dec!(19), dec!(1000)))
        .add_line(line("2", TaxCategory::StandardRate, dec!(7), dec!(500)))
        .add_vat_breakdown(VatBreakdown::new(
            amount(dec!(1000)),
            amount(dec!(190)),
            TaxCategory::StandardRate,
            Percentage::new(dec!(19)).unwrap(),
        ))
        .add_vat_breakdown(VatBreakdown::new(
            amount(dec!(500)),
            amount(dec!(35)),
            TaxCategory::StandardRate,
            Percentage::new(dec!(7)).unwrap(),
        ))
        .totals(DocumentTotals::new(
            amount(dec!(1500)),
            amount(dec!(1500)),
            amount(dec!(225)),
            amount(dec!(1725)),
            amount(dec!(1725)),
        ))
        .build()
        .unwrap()
}

#[test]
fn multi_rate_invoice_is_compliant() {
    let errors = validate_en16931(&multi_rate_invoice());
    assert!(errors.is_empty(), "unexpected: {errors:?}");
}

#[test]
fn totals_arithmetic_is_checked_against_lines() {
    let mut invoice = multi_rate_invoice();
    invoice.totals.line_total = amount(dec!(1600));
    invoice.totals.net_total = amount(dec!(1600));
    let errors = validate_en16931(&invoice);
    let found = rules(&errors);
    assert!(found.contains(&"BR-CO-10"));
    assert!(found.contains(&"BR-CO-15"));
}

#[test]
fn prepaid_amount_flows_into_amount_due() {
    let mut invoice = multi_rate_invoice();
    invoice.totals.prepaid = Some(amount(dec!(500)));
    assert!(rules(&validate_en16931(&invoice)).contains(&"BR-CO-16"));

    invoice.totals.amount_due = amount(dec!(1225));
    let errors = validate_en16931(&invoice);
    assert!(errors.is_empty(), "unexpected: {errors:?}");
}

#[test]
fn rounding_amount_flows_into_grand_total() {
    let mut invoice = multi_rate_invoice();
    invoice.totals.rounding_amount = Some(amount(dec!(0.05)));
    assert!(rules(&validate_en16931(&invoice)).contains(&"BR-CO-15"));

    invoice.totals.grand_total = amount(dec!(1725.05));
    invoice.totals.amount_due = amount(dec!(1725.05));
    let errors = validate_en16931(&invoice);
    assert!(errors.is_empty(), "unexpected: {errors:?}");
}

#[test]
fn empty_line_fields_are_reported_per_line() {
    let mut invoice = multi_rate_invoice();
    invoice.lines[1].id = "".into();
    invoice.lines[1].item_name = " ".into();
    let errors = validate_en16931(&invoice);
    assert!(errors.iter().any(|e| e.field == "lines[1].id"));
    assert!(errors.iter().any(|e| e.field == "lines[1].item_name"));
    let found = rules(&errors);
    assert!(found.contains(&"BR-21"));
    assert!(found.contains(&"BR-25"));
}

#[test]
fn line_charge_defects_report_the_charges_path() {
    let mut invoice = multi_rate_invoice();
    // Percentage without a base amount, once as allowance and once as charge.
    let defective = AllowanceCharge {
        is_charge: false,
        amount: amount(dec!(10)),
        base_amount: None,
        percentage: Some(Percentage::new(dec!(5)).unwrap()),
        tax_category: TaxCategory::StandardRate,
        tax_rate: Percentage::new(dec!(19)).unwrap(),
        reason: None,
        reason_code: None,
    };
    invoice.lines[0].allowances = vec![defective.clone()];
    invoice.lines[0].charges = vec![AllowanceCharge {
        is_charge: true,
        ..defective
    }];
    let errors = validate_en16931(&invoice);
    assert!(errors.iter().any(|e| e.field == "lines[0].allowances[0]"));
    assert!(errors.iter().any(|e| e.field == "lines[0].charges[0]"));
}

#[test]
fn validation_errors_render_with_rule_prefix() {
    let mut invoice = multi_rate_invoice();
    invoice.number = "".into();
    let errors = validate_en16931(&invoice);
    let rendered = errors[0].to_string();
    assert!(rendered.starts_with("[BR-02] number:"), "got: {rendered}");
}
