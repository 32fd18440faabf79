use thiserror::Error;

/// Errors raised during invoice construction, decimal arithmetic, or
/// CII serialization.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FacturError {
    /// A decimal value has more fractional digits than its scale allows.
    #[error("precision error: {0}")]
    Precision(String),

    /// Division by a zero-valued operand.
    #[error("division by zero")]
    DivisionByZero,

    /// A required collection (invoice lines, VAT breakdown) is empty.
    #[error("missing required collection: {0}")]
    MissingCollection(&'static str),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// VAT identifier does not start with a known country code.
    #[error("invalid VAT identifier: {0}")]
    InvalidVatId(String),

    /// Serialization-time invariant violation. Unreachable in correct use;
    /// indicates a defect in the document assembly itself.
    #[error("structural error: {0}")]
    Structural(String),
}

/// A single business rule violation with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the offending field (e.g. "seller.address.country_code").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
    /// EN 16931 business rule ID if applicable (e.g. "BR-CO-13").
    pub rule: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(rule) = &self.rule {
            write!(f, "[{}] {}: {}", rule, self.field, self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl ValidationError {
    /// Create a validation error without a rule ID.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Attach an EN 16931 rule ID.
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }
}
