//! Catalog filtering and picker options.
//!
//! Everything here is a pure function of its inputs.

use std::collections::HashSet;

use serde::Serialize;
use upsell_core::{Catalog, Product};

/// One entry of a select or autocomplete list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Products whose title contains `query`, ignoring case, in catalog order.
///
/// An empty query matches every product.
#[must_use]
pub fn filter_products<'a>(query: &str, catalog: &'a Catalog) -> Vec<&'a Product> {
    let needle = query.to_lowercase();
    catalog
        .products()
        .iter()
        .filter(|p| p.title.to_lowercase().contains(&needle))
        .collect()
}

/// Non-empty product categories in first-seen order, without duplicates.
#[must_use]
pub fn distinct_categories(catalog: &Catalog) -> Vec<String> {
    let mut seen = HashSet::new();
    catalog
        .products()
        .iter()
        .filter(|p| p.has_category())
        .filter(|p| seen.insert(p.category.as_str()))
        .map(|p| p.category.clone())
        .collect()
}

/// Autocomplete options for products: title as label, id as value.
pub fn product_options<'a>(products: impl IntoIterator<Item = &'a Product>) -> Vec<SelectOption> {
    products
        .into_iter()
        .map(|p| SelectOption::new(p.title.as_str(), p.id.as_str()))
        .collect()
}

#[must_use]
pub fn category_options(catalog: &Catalog) -> Vec<SelectOption> {
    distinct_categories(catalog)
        .into_iter()
        .map(|c| SelectOption::new(c.clone(), c))
        .collect()
}

/// Options of the rule-type select. The "no rule" entry has an empty value.
#[must_use]
pub fn rule_type_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("Select Type", ""),
        SelectOption::new("Has Product", "product"),
        SelectOption::new("Has Category", "category"),
    ]
}
