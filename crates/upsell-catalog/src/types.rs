//! Shapes of a saved Shopify Admin GraphQL `products` query response.
//!
//! The snapshot is the body returned for:
//!
//! ```graphql
//! {
//!   products(first: 50) {
//!     edges { node {
//!       id
//!       title
//!       variants(first: 10) { edges { node { id title } } }
//!       productCategory { productTaxonomyNode { fullName } }
//!     } }
//!   }
//! }
//! ```
//!
//! ### `productCategory`
//! `null` for uncategorized products, and `productTaxonomyNode` may itself be
//! `null`. Both collapse to an empty category.
//!
//! ### `variants`
//! Always present in observed responses, but modeled as optional so a trimmed
//! snapshot without the connection still loads (as a product with no variants).
//!
//! ### `errors`
//! GraphQL reports query failures in a top-level `errors` array alongside
//! `"data": null`, with HTTP 200. A snapshot captured from such a response
//! is rejected rather than treated as an empty store.

use serde::Deserialize;
use upsell_core::{Product, Variant};

/// Any file the catalog loader accepts.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CatalogSnapshot {
    /// A bare JSON array of already-flattened products.
    Products(Vec<Product>),
    /// The raw Admin GraphQL response body.
    Graphql(ProductsQueryResponse),
}

/// Top-level GraphQL response body.
#[derive(Debug, Deserialize)]
pub struct ProductsQueryResponse {
    #[serde(default)]
    pub data: Option<ProductsData>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ProductsData {
    pub products: Connection<ProductNode>,
}

/// Relay-style connection; only `edges` is queried.
#[derive(Debug, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

/// A product node, e.g. `{"id": "gid://shopify/Product/1001", "title": "Facewash", ...}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductNode {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub variants: Option<Connection<VariantNode>>,
    #[serde(default)]
    pub product_category: Option<ProductCategory>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCategory {
    #[serde(default)]
    pub product_taxonomy_node: Option<TaxonomyNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyNode {
    /// e.g. `"Health & Beauty > Personal Care > Cosmetics > Skin Care"`.
    #[serde(default)]
    pub full_name: Option<String>,
}

/// A variant node. Option-less products have a single `"Default Title"` variant.
#[derive(Debug, Deserialize)]
pub struct VariantNode {
    pub id: String,
    pub title: String,
}

impl From<ProductNode> for Product {
    fn from(node: ProductNode) -> Self {
        let category = node
            .product_category
            .and_then(|c| c.product_taxonomy_node)
            .and_then(|t| t.full_name)
            .unwrap_or_default();

        let variants = node
            .variants
            .map(|conn| {
                conn.edges
                    .into_iter()
                    .map(|edge| Variant {
                        id: edge.node.id,
                        title: edge.node.title,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Product {
            id: node.id,
            title: node.title,
            category,
            variants,
        }
    }
}
