//! # facturx
//!
//! EN 16931 semantic invoice model with Factur-X conformance profiles and
//! UN/CEFACT Cross Industry Invoice (CII) XML generation.
//!
//! Invoices are assembled from validated Business Term group composites via
//! [`InvoiceBuilder`] and serialized once into the fixed-schema CII wire
//! format. All monetary and quantity fields use the precision-checked
//! [`DecimalValue`] flavors ([`Amount`], [`Quantity`], [`UnitPrice`],
//! [`Percentage`], [`IntegerValue`]) backed by [`rust_decimal::Decimal`] —
//! never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use facturx::cii::{self, Profile};
//! use facturx::core::*;
//! use rust_decimal_macros::dec;
//!
//! # fn main() -> Result<(), FacturError> {
//! let seller = PartyBuilder::new("ACME GmbH", AddressBuilder::new("Berlin", "10115", "DE").build())
//!     .vat_id(VatId::new("DE123456789")?)
//!     .build();
//! let buyer = PartyBuilder::new("Kunde AG", AddressBuilder::new("München", "80331", "DE").build())
//!     .build();
//!
//! let invoice = InvoiceBuilder::new("RE-2026-001", NaiveDate::from_ymd_opt(2026, 8, 25).unwrap())
//!     .process_control(Profile::EN16931.into())
//!     .seller(seller)
//!     .buyer(buyer)
//!     .add_line(
//!         LineBuilder::new(
//!             "1",
//!             "Beratung",
//!             Quantity::new(dec!(10))?,
//!             "HUR",
//!             UnitPrice::new(dec!(150))?,
//!             Amount::new(dec!(1500))?,
//!         )
//!         .tax(TaxCategory::StandardRate, Percentage::new(dec!(19))?)
//!         .build(),
//!     )
//!     .add_vat_breakdown(VatBreakdown::new(
//!         Amount::new(dec!(1500))?,
//!         Amount::new(dec!(285))?,
//!         TaxCategory::StandardRate,
//!         Percentage::new(dec!(19))?,
//!     ))
//!     .totals(DocumentTotals::new(
//!         Amount::new(dec!(1500))?,
//!         Amount::new(dec!(1500))?,
//!         Amount::new(dec!(285))?,
//!         Amount::new(dec!(1785))?,
//!         Amount::new(dec!(1785))?,
//!     ))
//!     .build()?;
//!
//! assert!(validate_en16931(&invoice).is_empty());
//!
//! let xml = cii::to_cii_xml(&invoice)?;
//! assert!(xml.contains("rsm:CrossIndustryInvoice"));
//! # Ok(())
//! # }
//! ```

pub mod cii;
pub mod core;

// Re-export core types at crate root for convenience
pub use crate::core::*;
