//! Public search structures.

use std::fmt;

/// One entry of a search reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub description: String,
    /// Preview image, absent for pointer entries
    pub image_url: Option<String>,
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.url)
    }
}

/// Community site details used while scraping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    /// Descriptions are only read from urls containing this domain
    pub site_domain: String,
    /// Suffix removed from page titles
    pub title_suffix: String,
    /// Image used when a page has no more than one image
    pub default_image_url: String,
    /// Page listing every tutorial
    pub tutorials_url: String,
    /// FAQ search endpoint, the search terms are appended to it
    pub faq_url: String,
    /// FAQ main page
    pub faq_page_url: String,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn create_test_settings() -> SearchSettings {
        SearchSettings {
            site_domain: "tophattwaffle".to_string(),
            title_suffix: " | TopHATTwaffle".to_string(),
            default_image_url: "https://example.com/logo.png".to_string(),
            tutorials_url: "https://www.tophattwaffle.com/tutorials/".to_string(),
            faq_url: "https://www.tophattwaffle.com/faq-search?search_words=".to_string(),
            faq_page_url: "http://tophattwaffle.com/faq".to_string(),
        }
    }
}
