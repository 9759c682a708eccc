//! Tutorial and FAQ search.
//!
//! This module provides the [`Searcher`], which matches search terms against
//! the tutorial catalog or the remote FAQ and scrapes every matching page to
//! build the results.
//!
//! Outside direct rooms, broad searches are capped to avoid flooding the room:
//! after [`MAX_RESULTS`] results, a pointer to the full listing is appended
//! instead of the remaining results.

use futures::future::join_all;
use log::{debug, info, warn};

use crate::search::{
    catalog::{SearchScope, TutorialCatalog, resolve_scope},
    fetcher::PageFetcher,
    page::{FAQ_LAYOUT, PageLayout, TUTORIAL_LAYOUT, extract_links, summarize_page},
    structs::{SearchResult, SearchSettings},
};

/// Number of results displayed by a capped search.
pub const MAX_RESULTS: usize = 2;

/// Searches tutorials and FAQ entries.
///
/// # Examples
///
/// ```no_run
/// let searcher = Searcher::new(HttpFetcher::new(), catalog, settings);
/// let results = searcher.search("all", &["lighting"], false).await;
/// ```
pub struct Searcher<F: PageFetcher> {
    /// Fetcher used for the FAQ listing and every result page
    fetcher: F,
    catalog: TutorialCatalog,
    settings: SearchSettings,
}

impl<F: PageFetcher> Searcher<F> {
    pub fn new(fetcher: F, catalog: TutorialCatalog, settings: SearchSettings) -> Self {
        Searcher {
            fetcher,
            catalog,
            settings,
        }
    }

    /// Searches `terms` in the series named by `series_alias`.
    ///
    /// # Arguments
    ///
    /// * `series_alias` - Series alias such as `all`, `v2` or `faq`.
    /// * `terms` - Search terms, each matched against whole tags.
    /// * `is_direct` - Whether the search comes from a direct room, where results are not capped.
    ///
    /// # Returns
    ///
    /// The results in display order, empty when nothing matched or the alias is unknown.
    pub async fn search(
        &self,
        series_alias: &str,
        terms: &[&str],
        is_direct: bool,
    ) -> Vec<SearchResult> {
        info!("search {:?} in series {}", terms, series_alias);

        match resolve_scope(series_alias) {
            None => {
                debug!("unknown series alias {}", series_alias);
                vec![]
            }
            Some(SearchScope::Faq) => self.search_faq(terms, is_direct).await,
            Some(SearchScope::Tutorials { series, all }) => {
                self.search_tutorials(&series, terms, all && !is_direct)
                    .await
            }
        }
    }

    async fn search_tutorials(
        &self,
        series: &[usize],
        terms: &[&str],
        capped: bool,
    ) -> Vec<SearchResult> {
        let urls: Vec<String> = self
            .catalog
            .find(series, terms)
            .into_iter()
            .map(|tutorial| tutorial.url.clone())
            .collect();
        debug!("{} tutorials match {:?}", urls.len(), terms);

        let pointer = SearchResult {
            title: "View All Tutorials".to_owned(),
            url: self.settings.tutorials_url.clone(),
            description: "There are more results than I can display without flooding chat. \
                Consider viewing all tutorials, or do a search without `all`. \
                If you send me your search in a direct room, the results won't be limited."
                .to_owned(),
            image_url: None,
        };

        self.collect_results(urls, &TUTORIAL_LAYOUT, capped, pointer)
            .await
    }

    async fn search_faq(&self, terms: &[&str], is_direct: bool) -> Vec<SearchResult> {
        let url = format!("{}{}", self.settings.faq_url, terms.join(" "));

        let listing = match self.fetcher.fetch_document(&url).await {
            Ok(listing) => listing,
            Err(e) => {
                warn!("failed to fetch FAQ listing: {:#}", e);
                return vec![];
            }
        };
        let urls = extract_links(&listing);
        debug!("{} FAQ entries match {:?}", urls.len(), terms);

        let pointer = SearchResult {
            title: "I cannot display any more results!".to_owned(),
            url: self.settings.faq_page_url.clone(),
            description: "I found more results than I can display here. \
                Consider going directly to the FAQ main page and searching from there. \
                If you send me your search in a direct room, the results won't be limited."
                .to_owned(),
            image_url: None,
        };

        self.collect_results(urls, &FAQ_LAYOUT, !is_direct, pointer)
            .await
    }

    /// Scrapes the pages at `urls` concurrently, in order.
    ///
    /// When `capped`, only the first [`MAX_RESULTS`] pages are scraped and
    /// `pointer` is appended if more pages matched. Pages that fail to load
    /// are skipped.
    async fn collect_results(
        &self,
        mut urls: Vec<String>,
        layout: &PageLayout,
        capped: bool,
        pointer: SearchResult,
    ) -> Vec<SearchResult> {
        let truncated = capped && urls.len() > MAX_RESULTS;
        if truncated {
            urls.truncate(MAX_RESULTS);
        }

        let documents = join_all(urls.iter().map(|url| self.fetcher.fetch_document(url))).await;

        let mut results: Vec<SearchResult> = urls
            .iter()
            .zip(documents)
            .filter_map(|(url, document)| match document {
                Ok(document) => Some(summarize_page(url, &document, layout, &self.settings)),
                Err(e) => {
                    warn!("skipping search result {}: {:#}", url, e);
                    None
                }
            })
            .collect();

        if truncated {
            results.push(pointer);
        }

        results
    }
}
