//! The editable offer list and its per-offer picker state.
//!
//! Offers and drafts are two index-aligned vectors; every insert or removal
//! touches both. Callers read through shared references and change state only
//! through the methods here, so constrained fields always go through
//! [`crate::resolver`].

use std::str::FromStr;

use upsell_core::{Catalog, DiscountInput, OfferRecord, RuleType};

use crate::error::{SelectionError, StoreError};
use crate::resolver;
use crate::search::{category_options, filter_products, product_options, SelectOption};

/// Transient picker state for one offer. Never saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDraft {
    /// Text typed into the promoted-product autocomplete.
    pub product_query: String,
    /// Catalog products matching `product_query`.
    pub product_options: Vec<SelectOption>,
    /// Text typed into the rule-product autocomplete.
    pub rule_product_query: String,
    /// Catalog products matching `rule_product_query`.
    pub rule_product_options: Vec<SelectOption>,
}

impl RecordDraft {
    fn for_record(record: &OfferRecord, all_products: &[SelectOption]) -> Self {
        Self {
            product_query: record.target.product_title.clone(),
            product_options: all_products.to_vec(),
            rule_product_query: record
                .rule
                .product()
                .map(|r| r.product_title.clone())
                .unwrap_or_default(),
            rule_product_options: all_products.to_vec(),
        }
    }
}

/// Editable offer fields, addressed by their saved names.
///
/// Product titles are absent on purpose: they are copied from the catalog
/// when a product is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldName {
    Heading,
    DiscountPercent,
    TargetProductId,
    TargetVariantId,
    RuleType,
    RuleProductId,
    RuleVariantId,
    RuleCategory,
}

impl FromStr for FieldName {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heading" => Ok(FieldName::Heading),
            "discountPercent" => Ok(FieldName::DiscountPercent),
            "targetProductId" => Ok(FieldName::TargetProductId),
            "targetVariantId" => Ok(FieldName::TargetVariantId),
            "ruleType" => Ok(FieldName::RuleType),
            "ruleProductId" => Ok(FieldName::RuleProductId),
            "ruleVariantId" => Ok(FieldName::RuleVariantId),
            "ruleCategory" => Ok(FieldName::RuleCategory),
            "targetProductTitle" | "ruleProductTitle" => {
                Err(StoreError::ReadOnlyField(s.to_string()))
            }
            other => Err(StoreError::UnknownField(other.to_string())),
        }
    }
}

/// A single-field change to one offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfferUpdate {
    Heading(String),
    Discount(DiscountInput),
    TargetProduct(String),
    TargetVariant(String),
    RuleType(RuleType),
    RuleProduct(String),
    RuleVariant(String),
    RuleCategory(String),
}

impl OfferUpdate {
    /// Builds an update from a field name and its text value.
    ///
    /// # Errors
    ///
    /// - [`StoreError::UnknownField`] / [`StoreError::ReadOnlyField`] for a bad name.
    /// - [`StoreError::InvalidValue`] when `ruleType` is not a known rule kind.
    pub fn parse(field: &str, value: &str) -> Result<Self, StoreError> {
        let value = value.to_string();
        Ok(match field.parse::<FieldName>()? {
            FieldName::Heading => OfferUpdate::Heading(value),
            FieldName::DiscountPercent => OfferUpdate::Discount(DiscountInput::new(value)),
            FieldName::TargetProductId => OfferUpdate::TargetProduct(value),
            FieldName::TargetVariantId => OfferUpdate::TargetVariant(value),
            FieldName::RuleType => OfferUpdate::RuleType(value.parse()?),
            FieldName::RuleProductId => OfferUpdate::RuleProduct(value),
            FieldName::RuleVariantId => OfferUpdate::RuleVariant(value),
            FieldName::RuleCategory => OfferUpdate::RuleCategory(value),
        })
    }
}

/// Result of [`OfferListStore::update_field`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Applied,
    /// The selection was rejected and the offer is unchanged.
    Ignored(SelectionError),
}

impl FieldUpdate {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, FieldUpdate::Applied)
    }
}

#[derive(Debug, Clone)]
pub struct OfferListStore {
    catalog: Catalog,
    /// Every catalog product as an autocomplete option; the unfiltered list.
    all_products: Vec<SelectOption>,
    offers: Vec<OfferRecord>,
    drafts: Vec<RecordDraft>,
}

impl OfferListStore {
    /// Creates a store over `offers`. An empty list is replaced by a single
    /// blank offer so there is always something to edit.
    ///
    /// Variant ids that the catalog says no longer belong to their product
    /// are cleared and logged.
    #[must_use]
    pub fn new(catalog: Catalog, offers: Vec<OfferRecord>) -> Self {
        let mut offers = if offers.is_empty() {
            vec![OfferRecord::blank()]
        } else {
            offers
        };
        for (index, record) in offers.iter_mut().enumerate() {
            for variant_id in resolver::clear_stale_variants(record, &catalog) {
                tracing::warn!(
                    index,
                    variant_id = %variant_id,
                    "stored variant no longer belongs to its product; cleared"
                );
            }
        }
        let all_products = product_options(catalog.products());
        let drafts = offers
            .iter()
            .map(|record| RecordDraft::for_record(record, &all_products))
            .collect();

        Self {
            catalog,
            all_products,
            offers,
            drafts,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn offers(&self) -> &[OfferRecord] {
        &self.offers
    }

    #[must_use]
    pub fn drafts(&self) -> &[RecordDraft] {
        &self.drafts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.offers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `index` is past the end.
    pub fn offer(&self, index: usize) -> Result<&OfferRecord, StoreError> {
        self.check_index(index)?;
        Ok(&self.offers[index])
    }

    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `index` is past the end.
    pub fn draft(&self, index: usize) -> Result<&RecordDraft, StoreError> {
        self.check_index(index)?;
        Ok(&self.drafts[index])
    }

    /// Appends a blank offer and returns its index.
    pub fn add(&mut self) -> usize {
        let record = OfferRecord::blank();
        self.drafts
            .push(RecordDraft::for_record(&record, &self.all_products));
        self.offers.push(record);
        self.offers.len() - 1
    }

    /// Removes the offer at `index` together with its draft.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `index` is past the end.
    pub fn remove(&mut self, index: usize) -> Result<OfferRecord, StoreError> {
        self.check_index(index)?;
        self.drafts.remove(index);
        Ok(self.offers.remove(index))
    }

    /// Applies `update` to the offer at `index`.
    ///
    /// Heading and discount are stored verbatim. Everything else goes through
    /// the selection rules; a rejected selection is logged and reported as
    /// [`FieldUpdate::Ignored`] with the offer unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `index` is past the end.
    pub fn update_field(
        &mut self,
        index: usize,
        update: OfferUpdate,
    ) -> Result<FieldUpdate, StoreError> {
        self.check_index(index)?;
        let catalog = &self.catalog;
        let record = &mut self.offers[index];
        let draft = &mut self.drafts[index];

        let outcome = match update {
            OfferUpdate::Heading(heading) => {
                record.heading = heading;
                Ok(())
            }
            OfferUpdate::Discount(discount) => {
                record.discount = discount;
                Ok(())
            }
            OfferUpdate::TargetProduct(product_id) => {
                resolver::select_product(record, &product_id, catalog).map(|()| {
                    record
                        .target
                        .product_title
                        .clone_into(&mut draft.product_query);
                })
            }
            OfferUpdate::TargetVariant(variant_id) => {
                resolver::select_variant(record, &variant_id, catalog)
            }
            OfferUpdate::RuleType(kind) => {
                resolver::set_rule_type(record, kind);
                draft.rule_product_query.clear();
                draft.rule_product_options.clone_from(&self.all_products);
                Ok(())
            }
            OfferUpdate::RuleProduct(product_id) => {
                resolver::select_rule_product(record, &product_id, catalog).map(|()| {
                    if let Some(rule) = record.rule.product() {
                        rule.product_title
                            .clone_into(&mut draft.rule_product_query);
                    }
                })
            }
            OfferUpdate::RuleVariant(variant_id) => {
                resolver::select_rule_variant(record, &variant_id, catalog)
            }
            OfferUpdate::RuleCategory(category) => {
                resolver::select_rule_category(record, &category, catalog)
            }
        };

        match outcome {
            Ok(()) => Ok(FieldUpdate::Applied),
            Err(e) => {
                tracing::warn!(index, error = %e, "selection ignored: offer unchanged");
                Ok(FieldUpdate::Ignored(e))
            }
        }
    }

    /// Parses `field`/`value` with [`OfferUpdate::parse`] and applies it.
    ///
    /// # Errors
    ///
    /// Any error from [`OfferUpdate::parse`] or [`OfferListStore::update_field`].
    pub fn set_field(
        &mut self,
        index: usize,
        field: &str,
        value: &str,
    ) -> Result<FieldUpdate, StoreError> {
        self.check_index(index)?;
        let update = OfferUpdate::parse(field, value)?;
        self.update_field(index, update)
    }

    /// Records `query` as the promoted-product search text for `index` and
    /// returns it with the matching product options. The offer itself is
    /// not changed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `index` is past the end.
    pub fn search(
        &mut self,
        index: usize,
        query: &str,
    ) -> Result<(&str, &[SelectOption]), StoreError> {
        self.check_index(index)?;
        let draft = &mut self.drafts[index];
        query.clone_into(&mut draft.product_query);
        draft.product_options = product_options(filter_products(query, &self.catalog));
        Ok((&draft.product_query, &draft.product_options))
    }

    /// Like [`OfferListStore::search`], for the rule-product autocomplete.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `index` is past the end.
    pub fn search_rule_product(
        &mut self,
        index: usize,
        query: &str,
    ) -> Result<(&str, &[SelectOption]), StoreError> {
        self.check_index(index)?;
        let draft = &mut self.drafts[index];
        query.clone_into(&mut draft.rule_product_query);
        draft.rule_product_options = product_options(filter_products(query, &self.catalog));
        Ok((&draft.rule_product_query, &draft.rule_product_options))
    }

    /// Variant select options for the promoted product of offer `index`.
    /// Only the placeholder entry when no known product is selected.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `index` is past the end.
    pub fn variant_options(&self, index: usize) -> Result<Vec<SelectOption>, StoreError> {
        let record = self.offer(index)?;
        Ok(self.options_for_product(&record.target.product_id))
    }

    /// Variant select options for the rule product of offer `index`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `index` is past the end.
    pub fn rule_variant_options(&self, index: usize) -> Result<Vec<SelectOption>, StoreError> {
        let record = self.offer(index)?;
        let product_id = record
            .rule
            .product()
            .map_or("", |r| r.product_id.as_str());
        Ok(self.options_for_product(product_id))
    }

    #[must_use]
    pub fn category_options(&self) -> Vec<SelectOption> {
        category_options(&self.catalog)
    }

    fn options_for_product(&self, product_id: &str) -> Vec<SelectOption> {
        self.catalog.product(product_id).map_or_else(
            || vec![SelectOption::new(resolver::NO_VARIANT_LABEL, "")],
            resolver::variant_options_for,
        )
    }

    fn check_index(&self, index: usize) -> Result<(), StoreError> {
        if index < self.offers.len() {
            Ok(())
        } else {
            Err(StoreError::IndexOutOfRange {
                index,
                len: self.offers.len(),
            })
        }
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
