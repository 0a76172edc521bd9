use thiserror::Error;
use upsell_core::{OfferFormatError, RuleType};

/// Why a selection was rejected. The record is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("product not found in catalog: {product_id}")]
    ProductNotFound { product_id: String },

    #[error("variant {variant_id} does not belong to product {product_id}")]
    VariantNotFound {
        product_id: String,
        variant_id: String,
    },

    #[error("category not found in catalog: {category}")]
    CategoryNotFound { category: String },

    #[error("no product selected; choose a product before its variant")]
    NoProductSelected,

    #[error("display rule is {actual}, this selection requires {expected}")]
    RuleKindMismatch {
        expected: RuleType,
        actual: RuleType,
    },
}

impl SelectionError {
    /// `true` for lookups of an id or category the catalog does not contain.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SelectionError::ProductNotFound { .. }
                | SelectionError::VariantNotFound { .. }
                | SelectionError::CategoryNotFound { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("offer index {index} out of range for {len} offers")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("unknown offer field: {0}")]
    UnknownField(String),

    #[error("{0} is taken from the selected product and cannot be set directly")]
    ReadOnlyField(String),

    #[error(transparent)]
    InvalidValue(#[from] OfferFormatError),
}

/// Failures reported by a persistence provider.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("malformed offer payload: {0}")]
    MalformedPayload(#[source] OfferFormatError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A save that did not reach the provider's stored state.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to serialize offer list: {0}")]
    Serialization(#[from] OfferFormatError),

    #[error("persistence provider rejected save: {0}")]
    Provider(#[from] GatewayError),
}
