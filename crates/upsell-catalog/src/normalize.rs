//! Normalization of snapshot products into an editor [`Catalog`].
//!
//! Products keep snapshot order. Ids must be unique: a repeated product id or
//! a repeated variant id within one product is dropped (first one wins) and
//! logged, since the pickers select by id.

use std::collections::HashSet;

use upsell_core::{AppConfig, Catalog, Product};

/// Page sizes applied to a snapshot, matching the `first:` arguments of the
/// Admin query the snapshot was captured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogLimits {
    pub max_products: usize,
    pub max_variants: usize,
}

impl Default for CatalogLimits {
    fn default() -> Self {
        Self {
            max_products: 50,
            max_variants: 10,
        }
    }
}

impl CatalogLimits {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_products: config.catalog_max_products,
            max_variants: config.catalog_max_variants,
        }
    }
}

/// Builds a [`Catalog`] from snapshot products, applying `limits` and
/// dropping entries with empty or repeated ids.
#[must_use]
pub fn normalize_catalog(products: Vec<Product>, limits: &CatalogLimits) -> Catalog {
    let mut seen_products = HashSet::new();
    let mut normalized = Vec::with_capacity(products.len().min(limits.max_products));

    for product in products {
        if normalized.len() == limits.max_products {
            tracing::debug!(
                max_products = limits.max_products,
                "catalog snapshot truncated at product limit"
            );
            break;
        }

        if product.id.is_empty() {
            tracing::warn!(title = %product.title, "skipping product: id is empty");
            continue;
        }

        if !seen_products.insert(product.id.clone()) {
            tracing::warn!(product_id = %product.id, "skipping product: duplicate id");
            continue;
        }

        normalized.push(normalize_product(product, limits.max_variants));
    }

    Catalog::new(normalized)
}

fn normalize_product(mut product: Product, max_variants: usize) -> Product {
    let mut seen_variants = HashSet::new();
    let product_id = product.id.clone();

    product.variants = product
        .variants
        .into_iter()
        .filter(|variant| {
            if variant.id.is_empty() {
                tracing::warn!(product_id = %product_id, "skipping variant: id is empty");
                return false;
            }
            if !seen_variants.insert(variant.id.clone()) {
                tracing::warn!(
                    product_id = %product_id,
                    variant_id = %variant.id,
                    "skipping variant: duplicate id within product"
                );
                return false;
            }
            true
        })
        .take(max_variants)
        .collect();

    // Taxonomy names occasionally carry stray whitespace.
    let trimmed = product.category.trim();
    if trimmed.len() != product.category.len() {
        product.category = trimmed.to_string();
    }

    product
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
