use serde::{Deserialize, Serialize};

/// Title Shopify gives the single variant of a product without options.
pub const DEFAULT_VARIANT_TITLE: &str = "Default Title";

/// A purchasable variant of a [`Product`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Shopify variant GID, e.g. `"gid://shopify/ProductVariant/4411"`.
    pub id: String,
    pub title: String,
}

impl Variant {
    /// Returns `true` when this is the placeholder variant of an option-less product.
    #[must_use]
    pub fn is_default_title(&self) -> bool {
        self.title == DEFAULT_VARIANT_TITLE
    }
}

/// A product from the store catalog snapshot.
///
/// Variant ids are unique within a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Shopify product GID, e.g. `"gid://shopify/Product/1001"`.
    pub id: String,
    pub title: String,
    /// Full taxonomy name (e.g. `"Health & Beauty > Skin Care"`), or `""` when
    /// the product is uncategorized.
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Product {
    #[must_use]
    pub fn variant(&self, variant_id: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == variant_id)
    }

    #[must_use]
    pub fn has_category(&self) -> bool {
        !self.category.is_empty()
    }
}

/// Read-only product snapshot for one editing session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The catalog handed to the editor when the provider failed.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Looks up a product by id.
    #[must_use]
    pub fn product(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_product(id: &str, title: &str, variants: &[(&str, &str)]) -> Product {
        Product {
            id: id.to_string(),
            title: title.to_string(),
            category: String::new(),
            variants: variants
                .iter()
                .map(|(id, title)| Variant {
                    id: (*id).to_string(),
                    title: (*title).to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn catalog_product_lookup_by_id() {
        let catalog = Catalog::new(vec![
            make_product("1", "Facewash", &[("v1", "Default Title")]),
            make_product("2", "Moisturizer", &[("v2", "50ml"), ("v3", "100ml")]),
        ]);
        assert_eq!(catalog.product("2").map(|p| p.title.as_str()), Some("Moisturizer"));
        assert!(catalog.product("3").is_none());
    }

    #[test]
    fn product_variant_lookup_by_id() {
        let product = make_product("2", "Moisturizer", &[("v2", "50ml"), ("v3", "100ml")]);
        assert_eq!(product.variant("v3").map(|v| v.title.as_str()), Some("100ml"));
        assert!(product.variant("v1").is_none());
    }

    #[test]
    fn default_title_detection_is_exact() {
        let exact = Variant {
            id: "v1".to_string(),
            title: "Default Title".to_string(),
        };
        let lower = Variant {
            id: "v2".to_string(),
            title: "default title".to_string(),
        };
        assert!(exact.is_default_title());
        assert!(!lower.is_default_title());
    }

    #[test]
    fn empty_catalog_has_no_products() {
        let catalog = Catalog::empty();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
        assert!(catalog.product("1").is_none());
    }

    #[test]
    fn product_deserializes_without_category_or_variants() {
        let product: Product =
            serde_json::from_str(r#"{"id":"1","title":"Facewash"}"#).expect("valid product json");
        assert_eq!(product.category, "");
        assert!(!product.has_category());
        assert!(product.variants.is_empty());
    }
}
