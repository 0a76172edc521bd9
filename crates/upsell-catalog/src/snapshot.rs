use std::path::Path;

use upsell_core::{Catalog, Product};

use crate::error::CatalogError;
use crate::normalize::{normalize_catalog, CatalogLimits};
use crate::types::CatalogSnapshot;

/// Parses snapshot text (an Admin GraphQL response body or a bare product
/// array) into a normalized [`Catalog`].
///
/// # Errors
///
/// - [`CatalogError::Deserialize`]: the text matches neither accepted shape.
/// - [`CatalogError::Graphql`]: the response carries a non-empty `errors` array.
/// - [`CatalogError::MissingData`]: the response has no `data` and no errors.
pub fn parse_catalog_snapshot(
    json: &str,
    limits: &CatalogLimits,
) -> Result<Catalog, CatalogError> {
    let snapshot: CatalogSnapshot =
        serde_json::from_str(json).map_err(|source| CatalogError::Deserialize {
            context: "catalog snapshot".to_string(),
            source,
        })?;

    let products: Vec<Product> = match snapshot {
        CatalogSnapshot::Products(products) => products,
        CatalogSnapshot::Graphql(response) => {
            if !response.errors.is_empty() {
                let messages: Vec<String> =
                    response.errors.into_iter().map(|e| e.message).collect();
                return Err(CatalogError::Graphql(messages.join("; ")));
            }
            let data = response.data.ok_or(CatalogError::MissingData)?;
            data.products
                .edges
                .into_iter()
                .map(|edge| Product::from(edge.node))
                .collect()
        }
    };

    Ok(normalize_catalog(products, limits))
}

/// Reads and parses the catalog snapshot at `path`.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] if the file cannot be read, or any error
/// from [`parse_catalog_snapshot`].
pub async fn load_catalog(path: &Path, limits: &CatalogLimits) -> Result<Catalog, CatalogError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;

    let catalog = parse_catalog_snapshot(&content, limits)?;
    tracing::debug!(
        path = %path.display(),
        products = catalog.len(),
        "loaded catalog snapshot"
    );
    Ok(catalog)
}

/// Like [`load_catalog`], but a missing or unreadable snapshot yields an
/// empty catalog. The editor then offers no products instead of failing.
pub async fn load_catalog_or_empty(path: &Path, limits: &CatalogLimits) -> Catalog {
    match load_catalog(path, limits).await {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "catalog unavailable: continuing with no products"
            );
            Catalog::empty()
        }
    }
}
