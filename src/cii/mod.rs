//! UN/CEFACT Cross Industry Invoice (CII) serialization.
//!
//! One engine serves every Factur-X / ZUGFeRD conformance profile; the
//! specification identifier in the invoice's process control block (BT-24)
//! decides which gated parts appear in the output.
//!
//! # Example
//!
//! ```no_run
//! use facturx::cii;
//! use facturx::core::Invoice;
//!
//! let invoice: Invoice = todo!(); // build via InvoiceBuilder
//! let xml = cii::to_cii_xml(&invoice).unwrap();
//! ```

mod document;
mod profile;
pub(crate) mod writer;

pub use document::to_cii_xml;
pub use profile::{
    GatedElement, Profile, XRECHNUNG_2_CUSTOMIZATION_ID, XRECHNUNG_CUSTOMIZATION_ID,
    is_element_permitted,
};

/// CII namespace URIs.
pub mod ns {
    pub const RSM: &str = "urn:un:unece:uncefact:data:standard:CrossIndustryInvoice:100";
    pub const RAM: &str =
        "urn:un:unece:uncefact:data:standard:ReusableAggregateBusinessInformationEntity:100";
    pub const QDT: &str = "urn:un:unece:uncefact:data:standard:QualifiedDataType:100";
    pub const UDT: &str = "urn:un:unece:uncefact:data:standard:UnqualifiedDataType:100";
    pub const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
}
