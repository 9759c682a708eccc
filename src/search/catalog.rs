//! Curated tutorial catalog and its series aliases.
//!
//! The catalog is a JSON document grouping tutorials by series:
//!
//! ```json
//! {"series": [{"tutorial": [{"url": "https://example.com/t1", "tags": ["lighting"]}]}]}
//! ```

use log::{error, info};
use serde::Deserialize;
use tokio::fs;

/// Series searched by `all`. The legacy series (index 4) is only searched explicitly.
const ALL_SERIES: [usize; 5] = [0, 1, 2, 3, 5];

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Tutorial {
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
struct Series {
    #[serde(default)]
    tutorial: Vec<Tutorial>,
}

/// What a series alias searches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchScope {
    /// Catalog series, by index
    Tutorials {
        series: Vec<usize>,
        /// Whether the alias was `all`, which caps the number of results
        all: bool,
    },
    /// The remote FAQ
    Faq,
}

/// Resolves a user supplied series alias, case-insensitively.
///
/// # Returns
///
/// `None` if the alias is unknown.
pub fn resolve_scope(alias: &str) -> Option<SearchScope> {
    let single = |index: usize| SearchScope::Tutorials {
        series: vec![index],
        all: false,
    };

    let scope = match alias.to_lowercase().as_str() {
        "all" => SearchScope::Tutorials {
            series: ALL_SERIES.to_vec(),
            all: true,
        },
        "v2series" | "v2" | "1" => single(0),
        "csgobootcamp" | "bc" | "2" => single(1),
        "3dsmax" | "3ds" | "3" => single(2),
        "writtentutorials" | "written" | "4" => single(3),
        "legacyseries" | "v1" | "lg" | "5" => single(4),
        "hammertroubleshooting" | "ht" | "6" => single(5),
        "faq" | "f" | "7" => SearchScope::Faq,
        _ => return None,
    };

    Some(scope)
}

/// Tutorials grouped by series, loaded once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TutorialCatalog {
    #[serde(default)]
    series: Vec<Series>,
}

impl TutorialCatalog {
    /// Loads the catalog at `path`.
    ///
    /// A missing or invalid file gives an empty catalog.
    pub async fn load(path: &str) -> Self {
        let serialized = match fs::read_to_string(path).await {
            Ok(serialized) => serialized,
            Err(e) => {
                error!("failed to read tutorial catalog {}: {}", path, e);
                return TutorialCatalog::default();
            }
        };

        match serde_json::from_str::<TutorialCatalog>(&serialized) {
            Ok(catalog) => {
                info!(
                    "loaded tutorial catalog with {} series",
                    catalog.series.len()
                );
                catalog
            }
            Err(e) => {
                error!("failed to deserialize tutorial catalog {}: {}", path, e);
                TutorialCatalog::default()
            }
        }
    }

    /// Finds the tutorials of `series` having a tag equal to one of `terms`.
    ///
    /// Results are ordered by series, then by term, then by catalog order,
    /// with duplicates removed. Unknown series indices are ignored.
    pub fn find(&self, series: &[usize], terms: &[&str]) -> Vec<&Tutorial> {
        let mut found: Vec<&Tutorial> = Vec::new();

        for series in series.iter().filter_map(|index| self.series.get(*index)) {
            for term in terms {
                for tutorial in &series.tutorial {
                    if tutorial.tags.iter().any(|tag| tag == term) && !found.contains(&tutorial) {
                        found.push(tutorial);
                    }
                }
            }
        }

        found
    }
}
