use upsell_core::{DisplayRule, Product, ProductSelection, Variant};

use super::*;

fn make_product(id: &str, title: &str, category: &str, variants: &[(&str, &str)]) -> Product {
    Product {
        id: id.to_owned(),
        title: title.to_owned(),
        category: category.to_owned(),
        variants: variants
            .iter()
            .map(|(id, title)| Variant {
                id: (*id).to_owned(),
                title: (*title).to_owned(),
            })
            .collect(),
    }
}

fn skincare_catalog() -> Catalog {
    Catalog::new(vec![
        make_product("1", "Facewash", "Skin Care", &[("v1", "Default Title")]),
        make_product("2", "Moisturizer", "Skin Care", &[("v2", "50ml")]),
        make_product("3", "Sunscreen", "Sun Care", &[("v4", "SPF 30"), ("v5", "SPF 50")]),
    ])
}

fn make_store() -> OfferListStore {
    OfferListStore::new(skincare_catalog(), Vec::new())
}

fn make_offer(heading: &str, product_id: &str, product_title: &str) -> OfferRecord {
    OfferRecord {
        heading: heading.to_owned(),
        discount: DiscountInput::new("10"),
        target: ProductSelection {
            product_id: product_id.to_owned(),
            product_title: product_title.to_owned(),
            variant_id: String::new(),
        },
        rule: DisplayRule::None,
    }
}

fn option_values(options: &[SelectOption]) -> Vec<&str> {
    options.iter().map(|o| o.value.as_str()).collect()
}

// -----------------------------------------------------------------------
// Construction / add / remove
// -----------------------------------------------------------------------

#[test]
fn empty_list_hydrates_as_one_blank_offer() {
    let store = make_store();
    assert_eq!(store.len(), 1);
    assert_eq!(store.offers()[0], OfferRecord::blank());
    assert_eq!(store.drafts().len(), 1);
}

#[test]
fn hydrated_drafts_start_from_record_titles() {
    let mut offer = make_offer("Glow", "2", "Moisturizer");
    offer.rule = DisplayRule::Product(ProductSelection {
        product_id: "3".to_owned(),
        product_title: "Sunscreen".to_owned(),
        variant_id: String::new(),
    });
    let store = OfferListStore::new(skincare_catalog(), vec![offer]);

    let draft = store.draft(0).unwrap();
    assert_eq!(draft.product_query, "Moisturizer");
    assert_eq!(draft.rule_product_query, "Sunscreen");
    assert_eq!(option_values(&draft.product_options), vec!["1", "2", "3"]);
}

#[test]
fn hydration_clears_variant_that_left_its_product() {
    let mut offer = make_offer("Glow", "3", "Sunscreen");
    offer.target.variant_id = "v-retired".to_owned();
    let mut kept = make_offer("Shine", "3", "Sunscreen");
    kept.target.variant_id = "v4".to_owned();

    let store = OfferListStore::new(skincare_catalog(), vec![offer, kept]);

    assert_eq!(store.offers()[0].target.variant_id, "");
    assert_eq!(store.offers()[0].target.product_id, "3");
    assert_eq!(store.offers()[1].target.variant_id, "v4");
}

#[test]
fn add_appends_blank_offer_with_draft() {
    let mut store = make_store();
    store.set_field(0, "heading", "First").unwrap();

    let index = store.add();

    assert_eq!(index, 1);
    assert_eq!(store.len(), 2);
    assert_eq!(store.offers()[0].heading, "First");
    assert_eq!(store.offers()[1], OfferRecord::blank());
    assert_eq!(store.drafts().len(), 2);
}

#[test]
fn remove_deletes_offer_and_its_draft() {
    let offers = vec![
        make_offer("A", "1", "Facewash"),
        make_offer("B", "2", "Moisturizer"),
        make_offer("C", "3", "Sunscreen"),
    ];
    let mut store = OfferListStore::new(skincare_catalog(), offers);

    let removed = store.remove(1).unwrap();

    assert_eq!(removed.heading, "B");
    let headings: Vec<&str> = store.offers().iter().map(|o| o.heading.as_str()).collect();
    assert_eq!(headings, vec!["A", "C"]);
    assert_eq!(store.draft(1).unwrap().product_query, "Sunscreen");
}

#[test]
fn remove_out_of_range_is_an_error() {
    let mut store = make_store();
    store.add();
    store.add();

    let err = store.remove(5).unwrap_err();

    assert!(matches!(err, StoreError::IndexOutOfRange { index: 5, len: 3 }));
    assert_eq!(store.len(), 3);
}

#[test]
fn removing_the_last_offer_leaves_an_empty_list() {
    let mut store = make_store();
    store.remove(0).unwrap();
    assert!(store.is_empty());
    assert!(store.drafts().is_empty());
}

// -----------------------------------------------------------------------
// update_field / set_field
// -----------------------------------------------------------------------

#[test]
fn heading_and_discount_are_stored_verbatim() {
    let mut store = make_store();
    store.set_field(0, "heading", "  Add a sunscreen!  ").unwrap();
    store.set_field(0, "discountPercent", "abc").unwrap();

    let offer = store.offer(0).unwrap();
    assert_eq!(offer.heading, "  Add a sunscreen!  ");
    assert_eq!(offer.discount.as_str(), "abc");
}

#[test]
fn selecting_target_product_copies_title_and_fills_query() {
    let mut store = make_store();

    let outcome = store
        .update_field(0, OfferUpdate::TargetProduct("3".to_owned()))
        .unwrap();

    assert!(outcome.is_applied());
    assert_eq!(store.offers()[0].target.product_title, "Sunscreen");
    assert_eq!(store.drafts()[0].product_query, "Sunscreen");
}

#[test]
fn unknown_product_is_ignored_and_offer_unchanged() {
    let mut store = make_store();
    store.set_field(0, "targetProductId", "1").unwrap();
    let before = store.offers()[0].clone();

    let outcome = store.set_field(0, "targetProductId", "404").unwrap();

    assert_eq!(
        outcome,
        FieldUpdate::Ignored(SelectionError::ProductNotFound {
            product_id: "404".to_owned()
        })
    );
    assert_eq!(store.offers()[0], before);
    assert_eq!(store.drafts()[0].product_query, "Facewash");
}

#[test]
fn variant_of_other_product_is_ignored() {
    let mut store = make_store();
    store.set_field(0, "targetProductId", "3").unwrap();

    let outcome = store.set_field(0, "targetVariantId", "v1").unwrap();

    assert!(matches!(
        outcome,
        FieldUpdate::Ignored(SelectionError::VariantNotFound { .. })
    ));
    assert_eq!(store.offers()[0].target.variant_id, "");
}

#[test]
fn rule_type_change_resets_rule_fields_and_rule_draft() {
    let mut store = make_store();
    store.set_field(0, "ruleType", "product").unwrap();
    store.search_rule_product(0, "sun").unwrap();
    store.set_field(0, "ruleProductId", "3").unwrap();
    store.set_field(0, "ruleVariantId", "v5").unwrap();
    assert_eq!(store.drafts()[0].rule_product_query, "Sunscreen");

    store.set_field(0, "ruleType", "category").unwrap();

    assert_eq!(store.offers()[0].rule, DisplayRule::empty(RuleType::Category));
    let draft = &store.drafts()[0];
    assert_eq!(draft.rule_product_query, "");
    assert_eq!(option_values(&draft.rule_product_options), vec!["1", "2", "3"]);
}

#[test]
fn rule_category_must_exist_in_catalog() {
    let mut store = make_store();
    store.set_field(0, "ruleType", "category").unwrap();

    assert!(store.set_field(0, "ruleCategory", "Sun Care").unwrap().is_applied());
    let outcome = store.set_field(0, "ruleCategory", "Hair Care").unwrap();

    assert!(!outcome.is_applied());
    assert_eq!(store.offers()[0].rule.category(), Some("Sun Care"));
}

#[test]
fn rule_product_on_none_rule_is_ignored() {
    let mut store = make_store();
    let outcome = store.set_field(0, "ruleProductId", "1").unwrap();
    assert!(matches!(
        outcome,
        FieldUpdate::Ignored(SelectionError::RuleKindMismatch { .. })
    ));
    assert_eq!(store.offers()[0].rule, DisplayRule::None);
}

#[test]
fn set_field_rejects_bad_names_and_values() {
    let mut store = make_store();

    assert!(matches!(
        store.set_field(0, "color", "red"),
        Err(StoreError::UnknownField(name)) if name == "color"
    ));
    assert!(matches!(
        store.set_field(0, "targetProductTitle", "Facewash"),
        Err(StoreError::ReadOnlyField(_))
    ));
    assert!(matches!(
        store.set_field(0, "ruleType", "tag"),
        Err(StoreError::InvalidValue(_))
    ));
    assert!(matches!(
        store.set_field(3, "heading", "x"),
        Err(StoreError::IndexOutOfRange { index: 3, len: 1 })
    ));
    assert_eq!(store.offers()[0], OfferRecord::blank());
}

#[test]
fn field_names_parse_from_saved_keys() {
    assert_eq!("heading".parse::<FieldName>().unwrap(), FieldName::Heading);
    assert_eq!(
        "discountPercent".parse::<FieldName>().unwrap(),
        FieldName::DiscountPercent
    );
    assert_eq!(
        "ruleCategory".parse::<FieldName>().unwrap(),
        FieldName::RuleCategory
    );
    assert!("Heading".parse::<FieldName>().is_err());
}

// -----------------------------------------------------------------------
// search / option lists
// -----------------------------------------------------------------------

#[test]
fn search_updates_draft_without_touching_offer() {
    let mut store = make_store();
    store.set_field(0, "targetProductId", "1").unwrap();
    let before = store.offers()[0].clone();

    let (query, options) = store.search(0, "SUN").unwrap();

    assert_eq!(query, "SUN");
    assert_eq!(options, &[SelectOption::new("Sunscreen", "3")]);
    assert_eq!(store.offers()[0], before);
}

#[test]
fn search_drafts_are_independent_per_offer() {
    let mut store = make_store();
    store.add();

    store.search(0, "face").unwrap();
    store.search(1, "moist").unwrap();

    assert_eq!(option_values(&store.drafts()[0].product_options), vec!["1"]);
    assert_eq!(option_values(&store.drafts()[1].product_options), vec!["2"]);
    assert_eq!(
        option_values(&store.drafts()[1].rule_product_options),
        vec!["1", "2", "3"]
    );
}

#[test]
fn search_without_match_yields_no_options() {
    let mut store = make_store();
    let (_, options) = store.search_rule_product(0, "shampoo").unwrap();
    assert!(options.is_empty());
}

#[test]
fn variant_options_follow_selected_product() {
    let mut store = make_store();
    assert_eq!(
        store.variant_options(0).unwrap(),
        vec![SelectOption::new(resolver::NO_VARIANT_LABEL, "")]
    );

    store.set_field(0, "targetProductId", "1").unwrap();

    assert_eq!(
        store.variant_options(0).unwrap(),
        vec![
            SelectOption::new("Select a variant", ""),
            SelectOption::new("Facewash", "v1"),
        ]
    );
}

#[test]
fn rule_variant_options_use_rule_product() {
    let mut store = make_store();
    store.set_field(0, "targetProductId", "1").unwrap();
    store.set_field(0, "ruleType", "product").unwrap();
    store.set_field(0, "ruleProductId", "3").unwrap();

    assert_eq!(
        option_values(&store.rule_variant_options(0).unwrap()),
        vec!["", "v4", "v5"]
    );
}

#[test]
fn category_options_come_from_catalog() {
    let store = make_store();
    assert_eq!(
        store.category_options(),
        vec![
            SelectOption::new("Skin Care", "Skin Care"),
            SelectOption::new("Sun Care", "Sun Care"),
        ]
    );
}
