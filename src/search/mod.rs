//! Tutorial and FAQ search.
//!
//! # Modules
//!
//! - `catalog` - Curated tutorial catalog and series aliases
//! - `fetcher` - The [`PageFetcher`] trait and its HTTP implementation
//! - `page` - Scraping of result pages with `scraper`
//! - `searcher` - The [`Searcher`] combining the above
//! - `structs` - Public search structures

mod catalog;
mod fetcher;
mod page;
mod searcher;
mod structs;

pub use crate::search::catalog::TutorialCatalog;
#[cfg(test)]
pub use crate::search::fetcher::MockPageFetcher;
pub use crate::search::fetcher::{HttpFetcher, PageFetcher};
pub use crate::search::searcher::Searcher;
pub use crate::search::structs::{SearchResult, SearchSettings};
