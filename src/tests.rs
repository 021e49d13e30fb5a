/* -------------------------------------------------------------------------
 *  Tests
 * ---------------------------------------------------------------------- */

use crate::store::init_tracing;
use crate::{
    CatalogFilter, CatalogItem, CatalogSearch, CatalogSearchBuilder, EquivalenceClasses,
    SearchLimits, filter_catalog, matches_loose, sample_catalog, suggest, vocabulary,
};
use std::sync::LazyLock;

fn make_engine() -> CatalogSearch {
    init_tracing();
    CatalogSearchBuilder::new().build(sample_catalog().to_vec())
}

fn ids(items: &[&CatalogItem]) -> Vec<u32> {
    items.iter().map(|item| item.id).collect()
}

#[test]
fn test_short_queries_have_no_suggestions() {
    let vocab = vocabulary(sample_catalog());
    assert!(suggest("", &vocab, 5).is_empty());
    assert!(suggest("м", &vocab, 5).is_empty());
    assert!(suggest("   ", &vocab, 5).is_empty());
    assert!(suggest(" к ", &vocab, 5).is_empty());
}

#[test]
fn test_empty_vocabulary() {
    let vocab: [&str; 0] = [];
    assert!(suggest("мишка", &vocab, 5).is_empty());
}

#[test]
fn test_substring_suggestion() {
    let engine = make_engine();
    assert_eq!(engine.suggest("мишк"), ["плюшевый мишка"]);
    assert_eq!(engine.suggest("МИШК"), ["плюшевый мишка"]);
}

#[test]
fn test_edit_distance_suggestion() {
    let engine = make_engine();
    // "куклв" is one substitution away from "куклы".
    assert_eq!(engine.suggest("куклв"), ["куклы"]);
    // two edits still qualify, three do not
    assert_eq!(engine.suggest("спрот"), ["спорт"]);
    assert!(engine.suggest("спааа").is_empty());
}

#[test]
fn test_suggestions_keep_vocabulary_order_and_limit() {
    let engine = make_engine();
    // "на" occurs in many names and categories.
    let all = suggest("на", engine.vocabulary(), 100);
    assert!(all.len() > 5, "{all:?}");
    assert_eq!(engine.suggest("на"), all[..5]);

    let positions: Vec<usize> = all
        .iter()
        .map(|s| engine.vocabulary().iter().position(|w| w == s).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");

    assert!(suggest("на", engine.vocabulary(), 0).is_empty());
}

#[test]
fn test_custom_limits() {
    let engine = CatalogSearchBuilder::new()
        .limits(SearchLimits::new().min_query_len(4).max_edits(0))
        .build(sample_catalog().to_vec());
    assert!(engine.suggest("мяч").is_empty());
    assert!(engine.suggest("куклв").is_empty());
    assert_eq!(engine.suggest("футб"), ["футбольный мяч"]);
}

#[test]
fn test_limits_from_partial_json() {
    let limits: SearchLimits = serde_json::from_str(r#"{"max_suggestions": 3}"#).unwrap();
    assert_eq!(limits, SearchLimits::new().max_suggestions(3));
}

#[test]
fn test_loose_match_equivalence_classes() {
    assert!(matches_loose("мишка", "мышка"));
    assert!(matches_loose("Плюшевый мишка", "МЫШКА"));
    assert!(matches_loose("ёлка", "елка"));
    assert!(matches_loose("елка", "ёлка"));
    assert!(!matches_loose("мишка", "машка"));
    assert!(!matches_loose("мишка", ""));
    // no edit-distance fallback in the loose pass
    assert!(!matches_loose("мишка", "мишко"));
}

#[test]
fn test_hints() {
    let engine = make_engine();
    assert_eq!(engine.hints("мышк"), ["Плюшевый мишка"]);
    assert_eq!(
        engine.hints("игр"),
        ["Мягкие игрушки", "Развивающие игрушки", "Настольные игры"]
    );
    assert_eq!(
        engine.hints("а"),
        ["Плюшевый мишка", "Кукла", "Машинка", "Пазл", "Развивающие игрушки"]
    );
    assert!(engine.hints("  ").is_empty());

    let custom = CatalogSearchBuilder::new()
        .hints(["Ёлочные игрушки"])
        .build(Vec::new());
    assert_eq!(custom.hints("елочн"), ["Ёлочные игрушки"]);
}

#[test]
fn test_custom_equivalences() {
    static LATIN: LazyLock<EquivalenceClasses> =
        LazyLock::new(|| EquivalenceClasses::new().class(['o', '0']));
    let engine = CatalogSearchBuilder::new()
        .equivalences(&LATIN)
        .build(sample_catalog().to_vec());
    assert!(engine.matches_loose("LEGO", "leg0"));
    assert!(!engine.matches_loose("мишка", "мышка"));
}

#[test]
fn test_filter_by_query() {
    let engine = make_engine();
    let all = CatalogFilter::new();
    assert_eq!(ids(&engine.filter("мишк", &all)), [1]);
    assert_eq!(ids(&engine.filter("мышка", &all)), [1]);
    assert_eq!(ids(&engine.filter("транспорт", &all)), [4, 11]);
    assert_eq!(ids(&engine.filter("", &all)).len(), 12);
    assert!(engine.filter("вертолёт", &all).is_empty());
}

#[test]
fn test_filter_matches_whitespace_literally() {
    let engine = make_engine();
    let all = CatalogFilter::new();
    // only the empty string lifts the text restriction
    assert!(engine.filter("  ", &all).is_empty());
    assert!(engine.filter("мишк ", &all).is_empty());
    assert!(engine.suggest("мишк ").is_empty());
    // a single space does occur inside names
    assert_eq!(ids(&engine.filter("й м", &all)), [1, 9]);

    let found = filter_catalog(sample_catalog(), "  ", &[] as &[&str], &all);
    assert!(found.is_empty());
}

#[test]
fn test_filter_through_suggestions() {
    let engine = make_engine();
    // "спрот" is not a substring of anything, but suggests "спорт", which in
    // turn is a substring of "транспорт".
    assert_eq!(ids(&engine.filter("спрот", &CatalogFilter::new())), [4, 9, 11]);
}

#[test]
fn test_filter_by_age() {
    let engine = make_engine();
    let filter = CatalogFilter::new().ages(["0-3"]);
    assert_eq!(ids(&engine.filter("", &filter)), [1, 8, 12]);

    let filter = CatalogFilter::new().ages(["0-3", "3-6"]);
    assert_eq!(ids(&engine.filter("", &filter)), [1, 3, 5, 8, 9, 10, 12]);
}

#[test]
fn test_filter_by_price_and_stock() {
    let engine = make_engine();
    let filter = CatalogFilter::new().price(0, 1000).in_stock_only(true);
    let found = engine.filter("", &filter);
    assert_eq!(ids(&found), [7, 9]);
    assert!(found.iter().all(|item| item.price <= 1000 && item.in_stock));

    // toy 5 costs 899 but is out of stock
    let with_query = engine.filter("набор", &filter);
    assert!(with_query.is_empty(), "{with_query:?}");

    let bounds = CatalogFilter::new().price(1299, 1299);
    assert_eq!(ids(&engine.filter("", &bounds)), [1]);
}

#[test]
fn test_filter_by_category() {
    let engine = make_engine();
    let filter = CatalogFilter::new().category("Мягкие игрушки");
    assert_eq!(ids(&engine.filter("", &filter)), [1, 12]);
    assert_eq!(ids(&engine.filter("единорог", &filter)), [12]);
    // exact equality, not a substring test
    assert!(engine.filter("", &CatalogFilter::new().category("Мягкие")).is_empty());
}

#[test]
fn test_filter_catalog_free_function() {
    let catalog = sample_catalog();
    let vocab = vocabulary(catalog);
    let suggestions = suggest("мишк", &vocab, 5);
    let found = filter_catalog(catalog, "мишк", &suggestions, &CatalogFilter::new());
    assert_eq!(ids(&found), [1]);

    // a suggestion alone can pull items in
    let found = filter_catalog(catalog, "zz", &["футбольный"], &CatalogFilter::new());
    assert_eq!(ids(&found), [9]);

    // blank suggestions never match everything
    let found = filter_catalog(catalog, "zz", &["", " "], &CatalogFilter::new());
    assert!(found.is_empty());
}

#[test]
fn test_filter_is_idempotent() {
    let engine = make_engine();
    let filter = CatalogFilter::new().ages(["6-12"]).price(500, 4000);
    let first = ids(&engine.filter("на", &filter));
    let second = ids(&engine.filter("на", &filter));
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn test_engine_accessors() {
    let engine = make_engine();
    assert_eq!(engine.items().len(), 12);
    assert_eq!(engine.get(11).unwrap().name, "Железная дорога");
    assert!(engine.get(13).is_none());
    assert_eq!(engine.limits().max_suggestions, 5);
    assert!(format!("{engine:?}").contains("vocabulary: 22"));
}
