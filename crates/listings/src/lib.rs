//! Listing Source client.
//!
//! Queries an external job-listing catalog by region and keyword, and
//! normalizes salary/employer fields into display text. A listing search is
//! advisory: provider failures degrade to an empty result instead of failing
//! the user interaction.

pub mod client;
pub mod render;
pub mod salary;

pub use {
    client::{DEFAULT_API_URL, ListingClient, ListingSummary, PAGE_SIZE},
    render::render_listing,
    salary::format_salary,
};
