pub mod app_config;
pub mod catalog;
pub mod config;
pub mod offers;

pub use app_config::{AppConfig, Environment};
pub use catalog::{Catalog, Product, Variant, DEFAULT_VARIANT_TITLE};
pub use config::{load_app_config, load_app_config_from_env};
pub use offers::{
    decode_offers, encode_offers, DiscountInput, DisplayRule, OfferFormatError, OfferRecord,
    ProductSelection, RuleType,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
