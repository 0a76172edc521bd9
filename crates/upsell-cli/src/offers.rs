//! Offer-list command handlers.
//!
//! Each handler works on an already hydrated store and returns the text to
//! print; `main` decides whether the run needs saving.

use std::fmt::Write as _;

use upsell_core::{DisplayRule, OfferRecord, ProductSelection};
use upsell_editor::search::product_options;
use upsell_editor::{filter_products, FieldUpdate, OfferListStore, SelectOption};

use crate::Commands;

const EMPTY: &str = "-";

/// Apply `command` to `store` and render its result.
///
/// # Errors
///
/// Returns an error for an out-of-range index, an unknown or read-only field
/// name, or an unparseable rule type. Rejected catalog selections are not
/// errors; they are reported in the output and leave the offer unchanged.
pub(crate) fn run(store: &mut OfferListStore, command: &Commands) -> anyhow::Result<String> {
    let mut out = String::new();

    match command {
        Commands::Show => render_offers(&mut out, store)?,
        Commands::Add => {
            let index = store.add();
            writeln!(out, "added offer #{index}")?;
        }
        Commands::Remove { index } => {
            let removed = store.remove(*index)?;
            writeln!(out, "removed offer #{index} ({})", or_empty(&removed.heading))?;
        }
        Commands::Set {
            index,
            field,
            value,
        } => match store.set_field(*index, field, value)? {
            FieldUpdate::Applied => render_offer(&mut out, *index, store.offer(*index)?)?,
            FieldUpdate::Ignored(reason) => {
                writeln!(out, "offer #{index}: {field} unchanged ({reason})")?;
            }
        },
        Commands::Search { index, query, rule } => {
            let (_, options) = if *rule {
                store.search_rule_product(*index, query)?
            } else {
                store.search(*index, query)?
            };
            render_options(&mut out, options, "no products match")?;
        }
        Commands::Variants { index, rule } => {
            let options = if *rule {
                store.rule_variant_options(*index)?
            } else {
                store.variant_options(*index)?
            };
            render_options(&mut out, &options, "")?;
        }
        Commands::Categories => {
            render_options(&mut out, &store.category_options(), "catalog has no categories")?;
        }
        Commands::Products { query } => {
            let products = filter_products(query.as_deref().unwrap_or(""), store.catalog());
            render_options(&mut out, &product_options(products), "no products match")?;
        }
    }

    Ok(out)
}

fn render_offers(out: &mut String, store: &OfferListStore) -> std::fmt::Result {
    if store.is_empty() {
        return writeln!(out, "no offers; run `add` to create one");
    }
    for (index, offer) in store.offers().iter().enumerate() {
        render_offer(out, index, offer)?;
    }
    Ok(())
}

fn render_offer(out: &mut String, index: usize, offer: &OfferRecord) -> std::fmt::Result {
    writeln!(out, "#{index:<3}heading:  {}", or_empty(&offer.heading))?;
    writeln!(out, "    discount: {}", discount_display(offer))?;
    writeln!(out, "    product:  {}", selection_display(&offer.target))?;
    let rule = match &offer.rule {
        DisplayRule::None => "always shown".to_string(),
        DisplayRule::Product(selection) => {
            format!("order has product {}", selection_display(selection))
        }
        DisplayRule::Category { category } => {
            format!("order has category {}", or_empty(category))
        }
    };
    writeln!(out, "    rule:     {rule}")
}

fn render_options(
    out: &mut String,
    options: &[SelectOption],
    when_empty: &str,
) -> std::fmt::Result {
    if options.is_empty() {
        return writeln!(out, "{when_empty}");
    }
    for option in options {
        writeln!(out, "{:<24}{}", or_empty(&option.value), option.label)?;
    }
    Ok(())
}

fn discount_display(offer: &OfferRecord) -> String {
    if offer.discount.is_empty() {
        return EMPTY.to_string();
    }
    offer.discount.percent().map_or_else(
        || format!("{} (not a number)", offer.discount.as_str()),
        |percent| format!("{percent}%"),
    )
}

fn selection_display(selection: &ProductSelection) -> String {
    if selection.is_empty() {
        return EMPTY.to_string();
    }
    format!(
        "{} [{}] variant {}",
        or_empty(&selection.product_title),
        selection.product_id,
        or_empty(&selection.variant_id)
    )
}

fn or_empty(value: &str) -> &str {
    if value.is_empty() {
        EMPTY
    } else {
        value
    }
}

#[cfg(test)]
#[path = "offers_test.rs"]
mod tests;
