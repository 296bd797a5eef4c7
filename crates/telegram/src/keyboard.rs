//! Menu and keyboard builders.
//!
//! Pure mappings from the static catalogs to `(label, action tag)` rows,
//! with one adapter turning rows into Telegram inline keyboards.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use {
    crate::event::ButtonAction,
    jobgram_common::catalog::{CATEGORIES, REGIONS},
};

/// One keyboard button: display label plus the callback action tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: String,
}

impl Button {
    fn new(label: impl Into<String>, action: &ButtonAction) -> Self {
        Self {
            label: label.into(),
            action: action.tag(),
        }
    }
}

/// Main menu: one item per row.
pub fn main_menu() -> Vec<Vec<Button>> {
    vec![
        vec![Button::new("Search listings", &ButtonAction::Search)],
        vec![Button::new("Categories", &ButtonAction::Categories)],
        vec![Button::new("Change region", &ButtonAction::ChangeRegion)],
    ]
}

/// Operator panel: one item per row.
pub fn admin_panel() -> Vec<Vec<Button>> {
    vec![
        vec![Button::new("Send broadcast", &ButtonAction::Broadcast)],
        vec![Button::new("Statistics", &ButtonAction::Stats)],
        vec![Button::new("Back", &ButtonAction::BackToMenu)],
    ]
}

/// Region picker: catalog order, two items per row.
pub fn region_picker() -> Vec<Vec<Button>> {
    rows_of_two(
        REGIONS
            .iter()
            .map(|(id, name)| Button::new(*name, &ButtonAction::Region(*id))),
    )
}

/// Category picker: catalog order, two items per row.
pub fn category_picker() -> Vec<Vec<Button>> {
    rows_of_two(CATEGORIES.iter().map(|(label, keyword)| {
        Button::new(*label, &ButtonAction::Category((*keyword).to_string()))
    }))
}

fn rows_of_two(buttons: impl Iterator<Item = Button>) -> Vec<Vec<Button>> {
    let all: Vec<Button> = buttons.collect();
    all.chunks(2).map(<[Button]>::to_vec).collect()
}

/// Convert button rows into a Telegram inline keyboard.
pub fn to_markup(rows: &[Vec<Button>]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(rows.iter().map(|row| {
        row.iter()
            .map(|b| InlineKeyboardButton::callback(b.label.clone(), b.action.clone()))
            .collect::<Vec<_>>()
    }))
}
