use chrono::NaiveDate;
use facturx::cii::{self, Profile};
use facturx::core::*;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seller() -> TradeParty {
    PartyBuilder::new(
        "ACME GmbH",
        AddressBuilder::new("Berlin", "10115", "DE")
            .street("Friedrichstraße 123")
            .build(),
    )
    .vat_id(VatId::new("DE123456789").unwrap())
    .electronic_address(Identifier::with_scheme("billing@acme.de", IdScheme::Email))
    .contact(
        Some("Max Mustermann".into()),
        Some("+49 30 12345".into()),
        Some("max@acme.de".into()),
    )
    .build()
}

fn buyer() -> TradeParty {
    PartyBuilder::new(
        "Kunde AG",
        AddressBuilder::new("München", "80331", "DE")
            .street("Marienplatz 1")
            .build(),
    )
    .build()
}

fn invoice_for(profile: Profile) -> Invoice {
    InvoiceBuilder::new("RE-2026-001", date(2026, 6, 15))
        .process_control(profile.into())
        .due_date(date(2026, 7, 15))
        .buyer_reference("04011000-12345-03")
        .seller(seller())
        .buyer(buyer())
        .note("Lieferung erfolgt frei Haus")
        .payment_terms("Zahlbar innerhalb von 30 Tagen")
        .payment(PaymentInstructions {
            means_code: PaymentMeansCode::SepaCreditTransfer,
            means_text: None,
            remittance_info: Some("RE-2026-001".into()),
            credit_transfer: Some(CreditTransfer {
                iban: "DE89370400440532013000".into(),
                bic: Some("COBADEFFXXX".into()),
                account_name: Some("ACME GmbH".into()),
            }),
            card_payment: None,
            direct_debit: None,
        })
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

#[test]
fn en16931_profile_emits_full_document() {
    let xml = cii::to_cii_xml(&invoice_for(Profile::EN16931)).unwrap();

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("<rsm:CrossIndustryInvoice"));
    assert!(xml.contains("urn:un:unece:uncefact:data:standard:CrossIndustryInvoice:100"));
    assert!(xml.contains("<ram:ID>urn:cen.eu:en16931:2017</ram:ID>"));
    assert!(xml.contains("<ram:ID>RE-2026-001</ram:ID>"));
    assert!(xml.contains("<ram:TypeCode>380</ram:TypeCode>"));
    assert!(xml.contains("<udt:DateTimeString format=\"102\">20260615</udt:DateTimeString>"));
    assert!(xml.contains("<ram:IncludedNote>"));
    assert!(xml.contains("<ram:IncludedSupplyChainTradeLineItem>"));
    assert!(xml.contains("<ram:BilledQuantity unitCode=\"HUR\">10.0000</ram:BilledQuantity>"));
    assert!(xml.contains("<ram:ApplicableTradeTax>"));
    assert!(xml.contains("<ram:CalculatedAmount>285.00</ram:CalculatedAmount>"));
    assert!(xml.contains("<ram:TaxTotalAmount currencyID=\"EUR\">285.00</ram:TaxTotalAmount>"));
    assert!(xml.contains("<ram:GrandTotalAmount>1785.00</ram:GrandTotalAmount>"));
    assert!(xml.contains("<ram:DuePayableAmount>1785.00</ram:DuePayableAmount>"));
    assert!(xml.contains("<ram:IBANID>DE89370400440532013000</ram:IBANID>"));
    assert!(xml.contains("<ram:ID schemeID=\"VA\">DE123456789</ram:ID>"));
}

#[test]
fn minimum_profile_suppresses_gated_parts() {
    let xml = cii::to_cii_xml(&invoice_for(Profile::Minimum)).unwrap();

    assert!(xml.contains("<ram:ID>urn:factur-x.eu:1p0:minimum</ram:ID>"));
    assert!(!xml.contains("<ram:IncludedNote>"));
    assert!(!xml.contains("<ram:IncludedSupplyChainTradeLineItem>"));
    assert!(!xml.contains("<ram:ApplicableTradeTax>"));
    // Reduced monetary summation.
    assert!(!xml.contains("<ram:LineTotalAmount>"));
    assert!(xml.contains("<ram:TaxBasisTotalAmount>1500.00</ram:TaxBasisTotalAmount>"));
    assert!(xml.contains("<ram:TaxTotalAmount currencyID=\"EUR\">285.00</ram:TaxTotalAmount>"));
    assert!(xml.contains("<ram:GrandTotalAmount>1785.00</ram:GrandTotalAmount>"));
    assert!(xml.contains("<ram:DuePayableAmount>1785.00</ram:DuePayableAmount>"));
}

#[test]
fn basic_wl_profile_keeps_notes_and_breakdown() {
    // Only the Minimum profile gates output; BasicWL passes everything.
    let xml = cii::to_cii_xml(&invoice_for(Profile::BasicWl)).unwrap();
    assert!(xml.contains("<ram:ID>urn:factur-x.eu:1p0:basicwl</ram:ID>"));
    assert!(xml.contains("<ram:IncludedNote>"));
    assert!(xml.contains("<ram:ApplicableTradeTax>"));
    assert!(xml.contains("<ram:LineTotalAmount>1500.00</ram:LineTotalAmount>"));
}

#[test]
fn unknown_guideline_urn_is_unrestricted() {
    let mut invoice = invoice_for(Profile::EN16931);
    invoice.process_control = ProcessControl::new("urn:example:custom-profile");
    let xml = cii::to_cii_xml(&invoice).unwrap();
    assert!(xml.contains("<ram:ID>urn:example:custom-profile</ram:ID>"));
    assert!(xml.contains("<ram:IncludedSupplyChainTradeLineItem>"));
    assert!(xml.contains("<ram:ApplicableTradeTax>"));
}

#[test]
fn notes_appear_in_append_order() {
    let mut invoice = invoice_for(Profile::Extended);
    invoice.notes = vec![Note::new("Alpha"), Note::new("Bravo"), Note::new("Charlie")];
    let xml = cii::to_cii_xml(&invoice).unwrap();
    let a = xml.find("Alpha").unwrap();
    let b = xml.find("Bravo").unwrap();
    let c = xml.find("Charlie").unwrap();
    assert!(a < b && b < c);
}

#[test]
fn business_process_parameter_is_emitted_when_set() {
    let mut invoice = invoice_for(Profile::XRechnung);
    invoice.process_control = ProcessControl::new(Profile::XRechnung.urn())
        .with_business_process("urn:fdc:peppol.eu:2017:poacc:billing:01:1.0");
    let xml = cii::to_cii_xml(&invoice).unwrap();
    assert!(xml.contains("<ram:BusinessProcessSpecifiedDocumentContextParameter>"));
    assert!(xml.contains("urn:fdc:peppol.eu:2017:poacc:billing:01:1.0"));
    assert!(xml.contains("xrechnung_3.0"));
}

#[test]
fn tax_currency_duplicates_tax_total() {
    let mut invoice = invoice_for(Profile::EN16931);
    invoice.tax_currency_code = Some("NOK".into());
    invoice.totals.tax_total_accounting = Some(Amount::new(dec!(3306)).unwrap());
    let xml = cii::to_cii_xml(&invoice).unwrap();
    assert!(xml.contains("<ram:TaxCurrencyCode>NOK</ram:TaxCurrencyCode>"));
    assert!(xml.contains("<ram:TaxTotalAmount currencyID=\"EUR\">285.00</ram:TaxTotalAmount>"));
    assert!(xml.contains("<ram:TaxTotalAmount currencyID=\"NOK\">3306.00</ram:TaxTotalAmount>"));
}

#[test]
fn preceding_invoice_uses_qualified_date_type() {
    let mut invoice = invoice_for(Profile::Extended);
    invoice.preceding_invoices = vec![PrecedingInvoice {
        number: "RE-2026-000".into(),
        issue_date: Some(date(2026, 5, 15)),
    }];
    let xml = cii::to_cii_xml(&invoice).unwrap();
    assert!(xml.contains("<ram:InvoiceReferencedDocument>"));
    assert!(xml.contains("<ram:IssuerAssignedID>RE-2026-000</ram:IssuerAssignedID>"));
    assert!(xml.contains("<qdt:DateTimeString format=\"102\">20260515</qdt:DateTimeString>"));
}

#[test]
fn delivery_ship_to_precedes_delivery_event() {
    let mut invoice = invoice_for(Profile::Extended);
    invoice.delivery = Some(DeliveryInformation {
        actual_delivery_date: Some(date(2026, 6, 10)),
        ship_to: Some(ShipTo {
            name: "Lager Süd".into(),
            location_id: Some(Identifier::with_scheme("4000001123452", IdScheme::Gln)),
            address: Some(AddressBuilder::new("Augsburg", "86150", "DE").build()),
        }),
    });
    let xml = cii::to_cii_xml(&invoice).unwrap();
    let ship_to = xml.find("<ram:ShipToTradeParty>").unwrap();
    let event = xml.find("<ram:ActualDeliverySupplyChainEvent>").unwrap();
    assert!(ship_to < event);
    assert!(xml.contains("<ram:ID schemeID=\"0088\">4000001123452</ram:ID>"));
}

#[test]
fn direct_debit_mandate_sits_in_payment_terms() {
    let mut invoice = invoice_for(Profile::EN16931);
    invoice.payment = Some(PaymentInstructions {
        means_code: PaymentMeansCode::SepaDirectDebit,
        means_text: None,
        remittance_info: None,
        credit_transfer: None,
        card_payment: None,
        direct_debit: Some(DirectDebit {
            mandate_id: Some("MANDATE-42".into()),
            creditor_id: Some("DE98ZZZ09999999999".into()),
            debited_account: Some("DE75512108001245126199".into()),
        }),
    });
    let xml = cii::to_cii_xml(&invoice).unwrap();
    assert!(xml.contains("<ram:CreditorReferenceID>DE98ZZZ09999999999</ram:CreditorReferenceID>"));
    assert!(xml.contains("<ram:PayerPartyDebtorFinancialAccount>"));

    let terms_start = xml.find("<ram:SpecifiedTradePaymentTerms>").unwrap();
    let terms_end = xml.find("</ram:SpecifiedTradePaymentTerms>").unwrap();
    let mandate = xml.find("<ram:DirectDebitMandateID>MANDATE-42").unwrap();
    assert!(terms_start < mandate && mandate < terms_end);
}

#[test]
fn attachment_carries_mime_and_filename() {
    let mut invoice = invoice_for(Profile::Extended);
    invoice.additional_documents = vec![AdditionalDocument {
        id: "TIMESHEET-1".into(),
        type_code: DocumentTypeCode::SupportingDocument,
        description: Some("Stundenzettel".into()),
        external_uri: None,
        attachment: Some(Attachment {
            content: "UERGLWRhdGE=".into(),
            mime: MimeCode::Pdf,
            filename: "timesheet.pdf".into(),
        }),
    }];
    let xml = cii::to_cii_xml(&invoice).unwrap();
    assert!(xml.contains(
        "<ram:AttachmentBinaryObject mimeCode=\"application/pdf\" filename=\"timesheet.pdf\">"
    ));
    assert!(xml.contains("<ram:TypeCode>916</ram:TypeCode>"));
}

#[test]
fn line_allowance_has_no_category_tax_but_document_allowance_does() {
    let ac = AllowanceCharge {
        is_charge: false,
        amount: Amount::new(dec!(50)).unwrap(),
        base_amount: Some(Amount::new(dec!(1500)).unwrap()),
        percentage: None,
        tax_category: TaxCategory::StandardRate,
        tax_rate: Percentage::new(dec!(19)).unwrap(),
        reason: Some("Treuerabatt".into()),
        reason_code: None,
    };
    let mut invoice = invoice_for(Profile::Extended);
    invoice.allowances = vec![ac.clone()];
    invoice.lines[0].allowances = vec![ac];
    let xml = cii::to_cii_xml(&invoice).unwrap();
    // One CategoryTradeTax for the document-level entry, none for the line.
    assert_eq!(xml.matches("<ram:CategoryTradeTax>").count(), 1);
    assert_eq!(xml.matches("<udt:Indicator>false</udt:Indicator>").count(), 2);
    assert!(xml.contains("<ram:Reason>Treuerabatt</ram:Reason>"));
}

#[test]
fn project_reference_names_itself() {
    let mut invoice = invoice_for(Profile::Extended);
    invoice.project_reference = Some("PRJ-2026-07".into());
    let xml = cii::to_cii_xml(&invoice).unwrap();
    assert!(xml.contains("<ram:SpecifiedProcuringProject>"));
    assert!(xml.contains("<ram:ID>PRJ-2026-07</ram:ID>"));
    assert!(xml.contains("<ram:Name>PRJ-2026-07</ram:Name>"));
    assert!(!xml.contains("Project reference"));
}

#[test]
fn gross_price_emits_discount() {
    let mut invoice = invoice_for(Profile::Extended);
    invoice.lines[0].gross_price = Some(UnitPrice::new(dec!(170)).unwrap());
    let xml = cii::to_cii_xml(&invoice).unwrap();
    assert!(xml.contains("<ram:GrossPriceProductTradePrice>"));
    assert!(xml.contains("<ram:ActualAmount>20.0000</ram:ActualAmount>"));
    assert!(xml.contains("<ram:ChargeAmount>150.0000</ram:ChargeAmount>"));
}
