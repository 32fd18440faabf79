//! Core invoice semantic model.
//!
//! Types follow the EN 16931 Business Term (BT) / Business Group (BG)
//! structure. Construction goes through [`InvoiceBuilder`], which checks the
//! aggregate invariants once and yields an immutable [`Invoice`]; business
//! rule validation is a separate, explicit step ([`validate_en16931`]).

mod builder;
mod codes;
mod countries;
mod currencies;
mod decimal;
mod error;
mod identifier;
mod types;
mod validation;

pub use builder::*;
pub use codes::*;
pub use countries::is_known_country_code;
pub use currencies::is_known_currency_code;
pub use decimal::*;
pub use error::*;
pub use identifier::*;
pub use types::*;
pub use validation::*;
