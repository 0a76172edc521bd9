//! Offer records and their saved JSON form.
//!
//! In memory the display rule is a tagged union, so an offer can never carry
//! fields of a rule kind that is not active. On the wire every record is a
//! flat object with all ten fields present; fields that do not belong to the
//! active rule kind are written as `""` and ignored when read back.
//!
//! Records saved by the first version of the settings page used different
//! key names (`text`, `discount`, `productId`, `type`, `newProductId`, ...).
//! Those are accepted as aliases so old lists still hydrate.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OfferFormatError {
    #[error("failed to encode offer list: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode offer list: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("offer record {index} is invalid: {source}")]
    Record {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown rule type {0:?}; expected none, product, or category")]
    UnknownRuleType(String),
}

/// Kind of display condition attached to an offer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RuleType {
    #[default]
    None,
    Product,
    Category,
}

impl RuleType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RuleType::None => "none",
            RuleType::Product => "product",
            RuleType::Category => "category",
        }
    }
}

impl std::fmt::Display for RuleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleType {
    type Err = OfferFormatError;

    /// Accepts `""` as [`RuleType::None`]; the settings page used an empty
    /// select value for "no rule".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "none" => Ok(RuleType::None),
            "product" => Ok(RuleType::Product),
            "category" => Ok(RuleType::Category),
            other => Err(OfferFormatError::UnknownRuleType(other.to_string())),
        }
    }
}

/// Discount exactly as the merchant typed it.
///
/// The value is conventionally a percentage between 0 and 100, but nothing
/// here clamps or rejects it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscountInput(String);

impl DiscountInput {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The entered text read as an exact decimal, if it is one.
    #[must_use]
    pub fn percent(&self) -> Option<Decimal> {
        Decimal::from_str(self.0.trim()).ok()
    }
}

impl std::fmt::Display for DiscountInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for DiscountInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DiscountInput {
    /// Accepts a JSON string, a JSON number, or `null`.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<serde_json::Value>::deserialize(deserializer)? {
            None | Some(serde_json::Value::Null) => Ok(Self::default()),
            Some(serde_json::Value::String(s)) => Ok(Self(s)),
            Some(serde_json::Value::Number(n)) => Ok(Self(n.to_string())),
            Some(other) => Err(serde::de::Error::custom(format!(
                "discount must be a string or number, got {other}"
            ))),
        }
    }
}

/// A chosen product and, optionally, one of its variants.
///
/// An empty `variant_id` means "no variant selected".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductSelection {
    pub product_id: String,
    pub product_title: String,
    pub variant_id: String,
}

impl ProductSelection {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.product_id.is_empty()
    }
}

/// Display condition for an offer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DisplayRule {
    /// Always shown.
    #[default]
    None,
    /// Shown when the cart contains this product (and variant, if set).
    Product(ProductSelection),
    /// Shown when the cart contains a product in this category.
    Category { category: String },
}

impl DisplayRule {
    /// A rule of the given kind with every field empty.
    #[must_use]
    pub fn empty(kind: RuleType) -> Self {
        match kind {
            RuleType::None => DisplayRule::None,
            RuleType::Product => DisplayRule::Product(ProductSelection::default()),
            RuleType::Category => DisplayRule::Category {
                category: String::new(),
            },
        }
    }

    #[must_use]
    pub fn kind(&self) -> RuleType {
        match self {
            DisplayRule::None => RuleType::None,
            DisplayRule::Product(_) => RuleType::Product,
            DisplayRule::Category { .. } => RuleType::Category,
        }
    }

    #[must_use]
    pub fn product(&self) -> Option<&ProductSelection> {
        match self {
            DisplayRule::Product(selection) => Some(selection),
            _ => None,
        }
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        match self {
            DisplayRule::Category { category } => Some(category),
            _ => None,
        }
    }
}

/// One configured post-purchase offer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OfferRecordWire", into = "OfferRecordWire")]
pub struct OfferRecord {
    pub heading: String,
    pub discount: DiscountInput,
    /// The promoted product and variant.
    pub target: ProductSelection,
    pub rule: DisplayRule,
}

impl OfferRecord {
    /// A record with every field empty and no display rule.
    #[must_use]
    pub fn blank() -> Self {
        Self::default()
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OfferRecordWire {
    #[serde(default, alias = "text", deserialize_with = "string_or_null")]
    heading: String,
    #[serde(default, alias = "discount")]
    discount_percent: DiscountInput,
    #[serde(default, alias = "productId", deserialize_with = "string_or_null")]
    target_product_id: String,
    #[serde(default, alias = "productTitle", deserialize_with = "string_or_null")]
    target_product_title: String,
    #[serde(default, alias = "variantId", deserialize_with = "string_or_null")]
    target_variant_id: String,
    #[serde(default, alias = "type", deserialize_with = "string_or_null")]
    rule_type: String,
    #[serde(default, alias = "newProductId", deserialize_with = "string_or_null")]
    rule_product_id: String,
    #[serde(default, alias = "newProductTitle", deserialize_with = "string_or_null")]
    rule_product_title: String,
    #[serde(default, alias = "newVariantId", deserialize_with = "string_or_null")]
    rule_variant_id: String,
    #[serde(default, alias = "category", deserialize_with = "string_or_null")]
    rule_category: String,
}

fn string_or_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl TryFrom<OfferRecordWire> for OfferRecord {
    type Error = OfferFormatError;

    fn try_from(wire: OfferRecordWire) -> Result<Self, Self::Error> {
        let rule = match wire.rule_type.parse::<RuleType>()? {
            RuleType::None => DisplayRule::None,
            RuleType::Product => DisplayRule::Product(ProductSelection {
                product_id: wire.rule_product_id,
                product_title: wire.rule_product_title,
                variant_id: wire.rule_variant_id,
            }),
            RuleType::Category => DisplayRule::Category {
                category: wire.rule_category,
            },
        };

        Ok(OfferRecord {
            heading: wire.heading,
            discount: wire.discount_percent,
            target: ProductSelection {
                product_id: wire.target_product_id,
                product_title: wire.target_product_title,
                variant_id: wire.target_variant_id,
            },
            rule,
        })
    }
}

impl From<OfferRecord> for OfferRecordWire {
    fn from(record: OfferRecord) -> Self {
        let rule_type = record.rule.kind().as_str().to_string();
        let (rule_product, rule_category) = match record.rule {
            DisplayRule::None => (ProductSelection::default(), String::new()),
            DisplayRule::Product(selection) => (selection, String::new()),
            DisplayRule::Category { category } => (ProductSelection::default(), category),
        };

        OfferRecordWire {
            heading: record.heading,
            discount_percent: record.discount,
            target_product_id: record.target.product_id,
            target_product_title: record.target.product_title,
            target_variant_id: record.target.variant_id,
            rule_type,
            rule_product_id: rule_product.product_id,
            rule_product_title: rule_product.product_title,
            rule_variant_id: rule_product.variant_id,
            rule_category,
        }
    }
}

/// Serializes an offer list to its saved JSON text: an ordered array of records.
///
/// # Errors
///
/// Returns [`OfferFormatError::Encode`] if serialization fails.
pub fn encode_offers(offers: &[OfferRecord]) -> Result<String, OfferFormatError> {
    serde_json::to_string(offers).map_err(OfferFormatError::Encode)
}

/// Parses saved JSON text back into an offer list, preserving order.
///
/// The list is all or nothing: one bad record rejects the whole payload.
/// A record that carries both a current key and its legacy alias (say
/// `heading` and `text`) is a bad record.
///
/// # Errors
///
/// - [`OfferFormatError::Decode`]: the text is not a JSON array.
/// - [`OfferFormatError::Record`]: the record at `index` has a wrong-typed
///   field, a duplicated key, or an unknown rule type.
pub fn decode_offers(payload: &str) -> Result<Vec<OfferRecord>, OfferFormatError> {
    let records: Vec<serde_json::Value> =
        serde_json::from_str(payload).map_err(OfferFormatError::Decode)?;
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            serde_json::from_value(record)
                .map_err(|source| OfferFormatError::Record { index, source })
        })
        .collect()
}

#[cfg(test)]
#[path = "offers_test.rs"]
mod tests;
