use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Saved Shopify Admin GraphQL `products` response used as the catalog.
    pub catalog_path: PathBuf,
    /// JSON file backing the offer list between editing sessions.
    pub offers_path: PathBuf,
    /// Products kept from the catalog snapshot, in snapshot order.
    pub catalog_max_products: usize,
    /// Variants kept per product, in snapshot order.
    pub catalog_max_variants: usize,
}
