//! HTML extraction for the updates page
//!
//! Pulls the update capsules out of the served updates page markup and
//! returns raw (title, date text, description HTML) tuples. The site's
//! class names carry generated suffixes, so every selector matches on a
//! stable substring of the class attribute.

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::domain::services::{ExtractionError, RawUpdate, UpdateExtractor};
use crate::infrastructure::config::SourceConfig;
use crate::infrastructure::http_client::HttpClient;

/// CSS selectors for the updates overview page.
#[derive(Debug, Clone)]
pub struct UpdatePageSelectors {
    /// Container that only exists once the update list has rendered
    pub updates_container: String,
    /// One element per update capsule
    pub capsule: String,
    /// Title inside a capsule
    pub title: String,
    /// Rendered date text inside a capsule
    pub date: String,
    /// Description body inside a capsule
    pub description: String,
}

impl Default for UpdatePageSelectors {
    fn default() -> Self {
        Self {
            updates_container: r#"div[class^="blogoverviewpage_SubUpdates"]"#.to_string(),
            capsule: r#"div[class*="updatecapsule_UpdateCapsule"]"#.to_string(),
            title: r#"div[class*="updatecapsule_Title"]"#.to_string(),
            date: r#"div[class*="updatecapsule_Date"]"#.to_string(),
            description: r#"div[class*="updatecapsule_Desc"]"#.to_string(),
        }
    }
}

/// Extractor for the Counter-Strike updates page.
pub struct SteamUpdateExtractor {
    http: HttpClient,
    source: SourceConfig,
    selectors: UpdatePageSelectors,
}

impl SteamUpdateExtractor {
    /// Creates an extractor with the default page selectors.
    #[must_use]
    pub fn new(http: HttpClient, source: SourceConfig) -> Self {
        Self {
            http,
            source,
            selectors: UpdatePageSelectors::default(),
        }
    }

    /// Extracts raw updates from already-fetched page markup.
    pub fn extract_from_html(&self, html: &str) -> Result<Vec<RawUpdate>, ExtractionError> {
        let document = Html::parse_document(html);

        let container = parse_selector(&self.selectors.updates_container)?;
        if document.select(&container).next().is_none() {
            return Err(ExtractionError::UnexpectedMarkup {
                reason: "updates container not found in page".to_string(),
            });
        }

        let capsule = parse_selector(&self.selectors.capsule)?;
        let title = parse_selector(&self.selectors.title)?;
        let date = parse_selector(&self.selectors.date)?;
        let description = parse_selector(&self.selectors.description)?;

        let mut updates = Vec::new();
        for element in document.select(&capsule) {
            let Some(title) = first_text(&element, &title) else {
                warn!("update capsule without a title, skipping");
                continue;
            };
            let Some(date_text) = first_text(&element, &date) else {
                warn!(title = %title, "update capsule without a date, skipping");
                continue;
            };
            let description_html = element
                .select(&description)
                .next()
                .map(|el| el.inner_html().trim().to_string())
                .unwrap_or_default();

            updates.push(RawUpdate {
                title,
                date_text,
                description_html,
            });
        }

        debug!(count = updates.len(), "extracted update capsules");
        Ok(updates)
    }
}

#[async_trait]
impl UpdateExtractor for SteamUpdateExtractor {
    async fn extract(&self, language_name: &str) -> Result<Vec<RawUpdate>, ExtractionError> {
        let url = self.source.updates_url(language_name);
        let body = self.http.fetch_html(&url).await?;
        self.extract_from_html(&body)
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(selector).map_err(|err| ExtractionError::UnexpectedMarkup {
        reason: format!("invalid selector '{selector}': {err}"),
    })
}

/// Text content of the first element matched inside `element`, trimmed;
/// None when absent or empty.
fn first_text(element: &ElementRef, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::HttpConfig;

    fn extractor() -> SteamUpdateExtractor {
        SteamUpdateExtractor::new(
            HttpClient::new(&HttpConfig::default()).unwrap(),
            SourceConfig::default(),
        )
    }

    const PAGE: &str = r#"
        <html><body>
        <div class="blogoverviewpage_SubUpdates_3cIE0">
            <div class="updatecapsule_UpdateCapsule_a1b2c">
                <div class="updatecapsule_Title_x9">Release Notes for 1/10/2024</div>
                <div class="updatecapsule_Date_y8">January 10, 2024</div>
                <div class="updatecapsule_Desc_z7"><br/><br/>[ MAPS ]<br/>Fixed a pixel walk</div>
            </div>
            <div class="updatecapsule_UpdateCapsule_a1b2c">
                <div class="updatecapsule_Title_x9">Release Notes for 1/9/2024</div>
                <div class="updatecapsule_Date_y8">January 9, 2024</div>
                <div class="updatecapsule_Desc_z7">Small update</div>
            </div>
        </div>
        </body></html>
    "#;

    #[test]
    fn extracts_all_capsules_in_page_order() {
        let updates = extractor().extract_from_html(PAGE).unwrap();

        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].title, "Release Notes for 1/10/2024");
        assert_eq!(updates[0].date_text, "January 10, 2024");
        assert!(updates[0].description_html.contains("[ MAPS ]"));
        assert_eq!(updates[1].date_text, "January 9, 2024");
        assert_eq!(updates[1].description_html, "Small update");
    }

    #[test]
    fn description_html_is_the_raw_fragment() {
        let updates = extractor().extract_from_html(PAGE).unwrap();
        // Leading break tags survive extraction; normalization happens later.
        assert!(updates[0].description_html.starts_with("<br>"));
    }

    #[test]
    fn missing_container_is_unexpected_markup() {
        let err = extractor()
            .extract_from_html("<html><body><p>maintenance</p></body></html>")
            .unwrap_err();
        assert!(matches!(err, ExtractionError::UnexpectedMarkup { .. }));
    }

    #[test]
    fn capsule_without_title_is_skipped() {
        let page = r#"
            <div class="blogoverviewpage_SubUpdates_3cIE0">
                <div class="updatecapsule_UpdateCapsule_a1b2c">
                    <div class="updatecapsule_Date_y8">January 10, 2024</div>
                    <div class="updatecapsule_Desc_z7">no title</div>
                </div>
                <div class="updatecapsule_UpdateCapsule_a1b2c">
                    <div class="updatecapsule_Title_x9">Valid</div>
                    <div class="updatecapsule_Date_y8">January 9, 2024</div>
                    <div class="updatecapsule_Desc_z7">ok</div>
                </div>
            </div>
        "#;
        let updates = extractor().extract_from_html(page).unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].title, "Valid");
    }

    #[test]
    fn empty_update_list_is_not_an_error() {
        let page = r#"<div class="blogoverviewpage_SubUpdates_3cIE0"></div>"#;
        let updates = extractor().extract_from_html(page).unwrap();
        assert!(updates.is_empty());
    }
}
