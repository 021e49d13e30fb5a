use crate::{CatalogItem, ItemId, text};
use itertools::Itertools;
use std::sync::LazyLock;

/// Hints offered by the search bar dropdown.
pub const DEFAULT_HINTS: [&str; 9] = [
    "Плюшевый мишка",
    "Конструктор",
    "Кукла",
    "Машинка",
    "Робот",
    "Пазл",
    "Мягкие игрушки",
    "Развивающие игрушки",
    "Настольные игры",
];

pub const AGE_GROUPS: [&str; 3] = ["0-3", "3-6", "6-12"];

fn toy(
    id: ItemId,
    name: &str,
    price: u32,
    age_group: &str,
    category: &str,
    emoji: &str,
    in_stock: bool,
) -> CatalogItem {
    CatalogItem {
        id,
        name: name.to_owned(),
        category: category.to_owned(),
        price,
        age_group: age_group.to_owned(),
        in_stock,
        emoji: emoji.to_owned(),
    }
}

static SAMPLE: LazyLock<Vec<CatalogItem>> = LazyLock::new(|| {
    vec![
        toy(1, "Плюшевый мишка", 1299, "0-3", "Мягкие игрушки", "🧸", true),
        toy(2, "Конструктор LEGO", 2499, "6-12", "Конструкторы", "🏗️", true),
        toy(3, "Кукла Барби", 1599, "3-6", "Куклы", "👧", true),
        toy(4, "Машинка на радиоуправлении", 3499, "6-12", "Транспорт", "🚗", true),
        toy(5, "Набор для рисования", 899, "3-6", "Творчество", "🎨", false),
        toy(6, "Робот-трансформер", 2799, "6-12", "Роботы", "🤖", true),
        toy(7, "Пазл 500 деталей", 699, "6-12", "Настольные игры", "🧩", true),
        toy(8, "Музыкальная игрушка", 1199, "0-3", "Музыкальные", "🎵", true),
        toy(9, "Футбольный мяч", 599, "3-6", "Спорт", "⚽", true),
        toy(10, "Набор доктора", 1099, "3-6", "Ролевые игры", "💉", true),
        toy(11, "Железная дорога", 4299, "6-12", "Транспорт", "🚂", true),
        toy(12, "Мягкий единорог", 1499, "0-3", "Мягкие игрушки", "🦄", true),
    ]
});

/// The twelve-toy storefront catalog.
pub fn sample_catalog() -> &'static [CatalogItem] {
    &SAMPLE
}

/// Parses a JSON array of catalog items.
pub fn catalog_from_json(json: &str) -> serde_json::Result<Vec<CatalogItem>> {
    serde_json::from_str(json)
}

/// Folded names and categories, name before category for each item,
/// de-duplicated in first occurrence order.
pub fn vocabulary(items: &[CatalogItem]) -> Vec<String> {
    items
        .iter()
        .flat_map(|item| [item.name.as_str(), item.category.as_str()])
        .map(text::fold)
        .unique()
        .collect()
}

/// Distinct categories in catalog order.
pub fn categories(items: &[CatalogItem]) -> Vec<&str> {
    items.iter().map(|item| item.category.as_str()).unique().collect()
}
