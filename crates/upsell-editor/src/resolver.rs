//! Selection rules that keep an [`OfferRecord`] consistent with the catalog.
//!
//! Every function either applies the whole change or returns a
//! [`SelectionError`] and leaves the record untouched.
//!
//! - Picking a product always clears that side's variant, even when the same
//!   product is picked again.
//! - A variant must belong to the product currently selected on its side.
//! - Changing the rule kind resets every rule field.
//! - A `"Default Title"` variant is labelled with its product's title. This
//!   is display only; the stored variant id never changes.

use upsell_core::{Catalog, DisplayRule, OfferRecord, Product, ProductSelection, RuleType, Variant};

use crate::error::SelectionError;
use crate::search::{distinct_categories, SelectOption};

/// Label of the leading empty entry in a variant select.
pub const NO_VARIANT_LABEL: &str = "Select a variant";

/// Display label for `variant`.
#[must_use]
pub fn variant_label<'a>(product: &'a Product, variant: &'a Variant) -> &'a str {
    if variant.is_default_title() {
        &product.title
    } else {
        &variant.title
    }
}

/// Variant select options for `product`, led by an empty "no selection" entry.
#[must_use]
pub fn variant_options_for(product: &Product) -> Vec<SelectOption> {
    std::iter::once(SelectOption::new(NO_VARIANT_LABEL, ""))
        .chain(
            product
                .variants
                .iter()
                .map(|v| SelectOption::new(variant_label(product, v), v.id.as_str())),
        )
        .collect()
}

/// Sets the promoted product and clears the promoted variant.
///
/// # Errors
///
/// Returns [`SelectionError::ProductNotFound`] if `product_id` is not in `catalog`.
pub fn select_product(
    record: &mut OfferRecord,
    product_id: &str,
    catalog: &Catalog,
) -> Result<(), SelectionError> {
    let product = find_product(product_id, catalog)?;
    apply_product(&mut record.target, product);
    Ok(())
}

/// Sets the promoted variant. An empty `variant_id` clears it.
///
/// # Errors
///
/// - [`SelectionError::NoProductSelected`]: no promoted product yet.
/// - [`SelectionError::ProductNotFound`]: the promoted product left the catalog.
/// - [`SelectionError::VariantNotFound`]: the variant belongs to another product.
pub fn select_variant(
    record: &mut OfferRecord,
    variant_id: &str,
    catalog: &Catalog,
) -> Result<(), SelectionError> {
    apply_variant(&mut record.target, variant_id, catalog)
}

/// Sets the product the display rule looks for and clears the rule variant.
///
/// # Errors
///
/// - [`SelectionError::RuleKindMismatch`]: the rule is not a product rule.
/// - [`SelectionError::ProductNotFound`]: `product_id` is not in `catalog`.
pub fn select_rule_product(
    record: &mut OfferRecord,
    product_id: &str,
    catalog: &Catalog,
) -> Result<(), SelectionError> {
    let selection = rule_product_mut(record)?;
    let product = find_product(product_id, catalog)?;
    apply_product(selection, product);
    Ok(())
}

/// Sets the variant the display rule looks for. An empty `variant_id` clears it.
///
/// # Errors
///
/// [`SelectionError::RuleKindMismatch`] if the rule is not a product rule,
/// otherwise the same errors as [`select_variant`].
pub fn select_rule_variant(
    record: &mut OfferRecord,
    variant_id: &str,
    catalog: &Catalog,
) -> Result<(), SelectionError> {
    let selection = rule_product_mut(record)?;
    apply_variant(selection, variant_id, catalog)
}

/// Sets the category the display rule looks for. An empty `category` clears it.
///
/// # Errors
///
/// - [`SelectionError::RuleKindMismatch`]: the rule is not a category rule.
/// - [`SelectionError::CategoryNotFound`]: no catalog product has `category`.
pub fn select_rule_category(
    record: &mut OfferRecord,
    category: &str,
    catalog: &Catalog,
) -> Result<(), SelectionError> {
    let actual = record.rule.kind();
    let DisplayRule::Category { category: current } = &mut record.rule else {
        return Err(SelectionError::RuleKindMismatch {
            expected: RuleType::Category,
            actual,
        });
    };

    if !category.is_empty() && !distinct_categories(catalog).iter().any(|c| c == category) {
        return Err(SelectionError::CategoryNotFound {
            category: category.to_string(),
        });
    }

    category.clone_into(current);
    Ok(())
}

/// Clears stored variant ids that no longer belong to their product.
///
/// Only selections whose product is still in `catalog` are checked; a product
/// missing from `catalog` (for example when the catalog failed to load) is
/// left alone. Returns the cleared variant ids.
pub fn clear_stale_variants(record: &mut OfferRecord, catalog: &Catalog) -> Vec<String> {
    let mut cleared = Vec::new();
    clear_stale_variant(&mut record.target, catalog, &mut cleared);
    if let DisplayRule::Product(selection) = &mut record.rule {
        clear_stale_variant(selection, catalog, &mut cleared);
    }
    cleared
}

/// Switches the display rule kind. All rule fields are reset, including when
/// `kind` equals the current kind.
pub fn set_rule_type(record: &mut OfferRecord, kind: RuleType) {
    record.rule = DisplayRule::empty(kind);
}

fn find_product<'a>(product_id: &str, catalog: &'a Catalog) -> Result<&'a Product, SelectionError> {
    catalog
        .product(product_id)
        .ok_or_else(|| SelectionError::ProductNotFound {
            product_id: product_id.to_string(),
        })
}

fn rule_product_mut(record: &mut OfferRecord) -> Result<&mut ProductSelection, SelectionError> {
    let actual = record.rule.kind();
    match &mut record.rule {
        DisplayRule::Product(selection) => Ok(selection),
        _ => Err(SelectionError::RuleKindMismatch {
            expected: RuleType::Product,
            actual,
        }),
    }
}

fn clear_stale_variant(
    selection: &mut ProductSelection,
    catalog: &Catalog,
    cleared: &mut Vec<String>,
) {
    if selection.variant_id.is_empty() {
        return;
    }
    let Some(product) = catalog.product(&selection.product_id) else {
        return;
    };
    if product.variant(&selection.variant_id).is_none() {
        cleared.push(std::mem::take(&mut selection.variant_id));
    }
}

fn apply_product(selection: &mut ProductSelection, product: &Product) {
    product.id.clone_into(&mut selection.product_id);
    product.title.clone_into(&mut selection.product_title);
    selection.variant_id.clear();
}

fn apply_variant(
    selection: &mut ProductSelection,
    variant_id: &str,
    catalog: &Catalog,
) -> Result<(), SelectionError> {
    if variant_id.is_empty() {
        selection.variant_id.clear();
        return Ok(());
    }

    if selection.is_empty() {
        return Err(SelectionError::NoProductSelected);
    }

    let product = find_product(&selection.product_id, catalog)?;
    if product.variant(variant_id).is_none() {
        return Err(SelectionError::VariantNotFound {
            product_id: product.id.clone(),
            variant_id: variant_id.to_string(),
        });
    }

    variant_id.clone_into(&mut selection.variant_id);
    Ok(())
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
