//! Extraction of search results from fetched pages.

use rand::seq::SliceRandom;
use scraper::{Html, Selector};

use crate::search::structs::{SearchResult, SearchSettings};

/// Where the description of a page is read from.
pub struct PageLayout {
    /// Id of the element holding the article text
    pub content_id: &'static str,
    /// Description length before truncation
    pub max_description_chars: usize,
}

pub const TUTORIAL_LAYOUT: PageLayout = PageLayout {
    content_id: "content-area",
    max_description_chars: 250,
};

pub const FAQ_LAYOUT: PageLayout = PageLayout {
    content_id: "kb-article-content",
    max_description_chars: 180,
};

/// Builds a [SearchResult] from the HTML of the page at `url`.
///
/// The description is only read on pages of the community site, other pages
/// get an empty description.
pub fn summarize_page(
    url: &str,
    document: &str,
    layout: &PageLayout,
    settings: &SearchSettings,
) -> SearchResult {
    let document = Html::parse_document(document);

    let title = select_first_text(&document, "title")
        .replace('\n', "")
        .replace(&settings.title_suffix, "")
        .trim()
        .to_owned();

    let description = if url.to_lowercase().contains(&settings.site_domain) {
        let text =
            select_first_text(&document, &format!("#{}", layout.content_id)).replace('\n', "");
        truncate(text.trim(), layout.max_description_chars)
    } else {
        String::new()
    };

    let images = select_attributes(&document, "img", "src");
    let image_url = if images.len() > 1 {
        images.choose(&mut rand::thread_rng()).cloned()
    } else {
        None
    }
    .unwrap_or_else(|| settings.default_image_url.clone());

    SearchResult {
        title,
        url: url.to_owned(),
        description,
        image_url: Some(image_url),
    }
}

/// Returns the `href` of every link of the document, without backslashes or quotes.
///
/// The FAQ listing is served as an escaped JSON string, hence the cleanup.
pub fn extract_links(document: &str) -> Vec<String> {
    let document = Html::parse_document(document);
    select_attributes(&document, "a[href]", "href")
        .into_iter()
        .map(|href| href.replace(['\\', '"'], ""))
        .filter(|href| !href.is_empty())
        .collect()
}

fn select_first_text(document: &Html, selector: &str) -> String {
    let Ok(selector) = Selector::parse(selector) else {
        return String::new();
    };

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>())
        .unwrap_or_default()
}

fn select_attributes(document: &Html, selector: &str, attribute: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(selector) else {
        return vec![];
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr(attribute))
        .map(str::to_owned)
        .collect()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() < max_chars {
        return text.to_owned();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{}...", truncated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::structs::tests::create_test_settings;

    const TUTORIAL_PAGE: &str = r#"<html><head><title>
        Lighting Basics | TopHATTwaffle</title></head>
        <body>
            <img src="https://example.com/header.png">
            <div id="content-area">Lights &#8211; how
            they work</div>
        </body></html>"#;

    #[test]
    fn test_summarize_tutorial_page() {
        let settings = create_test_settings();
        let result = summarize_page(
            "https://www.tophattwaffle.com/lighting",
            TUTORIAL_PAGE,
            &TUTORIAL_LAYOUT,
            &settings,
        );

        assert_eq!(result.title, "Lighting Basics");
        assert_eq!(result.url, "https://www.tophattwaffle.com/lighting");
        assert!(result.description.starts_with("Lights – how "));
        assert!(result.description.ends_with("they work"));
        assert!(!result.description.contains('\n'));
        // A single image is the site header, the default image is used instead
        assert_eq!(result.image_url, Some(settings.default_image_url.clone()));
    }

    #[test]
    fn test_summarize_foreign_page_has_no_description() {
        let result = summarize_page(
            "https://other.example.com/lighting",
            TUTORIAL_PAGE,
            &TUTORIAL_LAYOUT,
            &create_test_settings(),
        );

        assert_eq!(result.title, "Lighting Basics");
        assert!(result.description.is_empty());
    }

    #[test]
    fn test_summarize_picks_one_of_the_images() {
        let page = r#"<html><title>Leaks</title><body>
            <img src="https://example.com/a.png"><img src="https://example.com/b.png">
            </body></html>"#;

        let result = summarize_page(
            "https://www.tophattwaffle.com/leaks",
            page,
            &TUTORIAL_LAYOUT,
            &create_test_settings(),
        );

        let image = result.image_url.unwrap();
        assert!(image == "https://example.com/a.png" || image == "https://example.com/b.png");
    }

    #[test]
    fn test_summarize_truncates_long_description() {
        let page = format!(
            r#"<html><title>FAQ</title><div id="kb-article-content">{}</div></html>"#,
            "a".repeat(400)
        );

        let result = summarize_page(
            "https://www.tophattwaffle.com/faq/1",
            &page,
            &FAQ_LAYOUT,
            &create_test_settings(),
        );

        assert_eq!(result.description, format!("{}...", "a".repeat(180)));
    }

    #[test]
    fn test_extract_links_strips_escapes() {
        let listing = r#"<a href=\"https://www.tophattwaffle.com/faq/leak\">Leak</a>
            <a href="https://www.tophattwaffle.com/faq/skybox">Skybox</a>
            <a>No link</a>"#;

        assert_eq!(
            extract_links(listing),
            vec![
                "https://www.tophattwaffle.com/faq/leak",
                "https://www.tophattwaffle.com/faq/skybox"
            ]
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!...");
        assert_eq!(truncate("ééééé", 2), "éé...");
    }
}
