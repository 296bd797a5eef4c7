//! Static region and category catalogs.
//!
//! Read-only process-wide configuration: the set of searchable regions
//! (provider area ids) and the category shortcuts shown in the category
//! keyboard. User data never lives here.

/// Searchable regions, keyed by the listing provider's area id.
pub const REGIONS: &[(i64, &str)] = &[
    (1, "Moscow"),
    (2, "Saint Petersburg"),
    (66, "Krasnodar"),
    (73, "Novosibirsk"),
    (88, "Yekaterinburg"),
    (104, "Kazan"),
    (112, "Nizhny Novgorod"),
    (113, "Samara"),
    (120, "Chelyabinsk"),
];

/// Category shortcuts: button label and the search keyword it expands to.
pub const CATEGORIES: &[(&str, &str)] = &[
    ("Driver", "driver"),
    ("Sales", "sales"),
    ("Courier", "courier"),
    ("Cleaner", "cleaner"),
    ("Programmer", "programmer"),
    ("Tutor", "tutor"),
    ("Builder", "builder"),
];

/// Display name for a region id, if it is in the catalog.
pub fn region_name(region_id: i64) -> Option<&'static str> {
    REGIONS
        .iter()
        .find(|(id, _)| *id == region_id)
        .map(|(_, name)| *name)
}

/// Whether a region id is a known catalog entry.
pub fn is_known_region(region_id: i64) -> bool {
    region_name(region_id).is_some()
}

/// Search keyword for a category tag, if it is in the catalog.
pub fn category_keyword(tag: &str) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .find(|(_, keyword)| *keyword == tag)
        .map(|(_, keyword)| *keyword)
}
