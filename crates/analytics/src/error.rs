use core_types::CoreError;
use std::fmt;
use strategies::StrategyError;
use thiserror::Error;

/// Which index a failed lookup went against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Seller,
    Product,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::Seller => f.write_str("seller"),
            ReferenceKind::Product => f.write_str("product"),
        }
    }
}

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Invalid input data: {0}")]
    InvalidInput(String),

    #[error("Required strategy '{0}' was not supplied")]
    MissingStrategy(&'static str),

    #[error("Strategy could not be resolved: {0}")]
    InvalidStrategy(#[from] StrategyError),

    #[error("Purchase data references unknown {kind} '{id}'")]
    UnresolvedReference { kind: ReferenceKind, id: String },
}

impl From<CoreError> for AnalyticsError {
    fn from(err: CoreError) -> Self {
        AnalyticsError::InvalidInput(err.to_string())
    }
}
