//! Browser-driven scraping of the monthly sighting index.
//!
//! The index renders its table and pagination controls client-side, so rows
//! are read from a real browser (`driver`), parsed out of the rendered HTML
//! (`parse`), and walked page by page per calendar month (`sightings`).

pub mod driver;
pub mod parse;
pub mod periods;
pub mod sightings;

pub use parse::Sighting;
pub use periods::Period;
