//! RSS 2.0 rendering and parsing of feed documents
//!
//! Rendering writes entries in exactly the order handed in; ordering is the
//! merge engine's job. Parsing is deliberately tolerant: it recovers what a
//! document carries and only fails when the bytes are not readable markup
//! at all, so an operator can tell a corrupt document apart from a missing
//! or merely foreign one.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rss::{Channel, Guid, Item, Source};
use thiserror::Error;

use crate::domain::feed_document::FeedDocument;
use crate::domain::identity::EntryId;
use crate::domain::update::FeedEntry;
use crate::infrastructure::config::{steam, AppConfig, LocaleConfig};

/// Namespace of the content module carrying each entry's HTML body. Must be
/// declared on the channel: the `content:encoded` elements written for
/// `Item::content` are not namespace-well-formed without it.
const CONTENT_NAMESPACE: &str = "http://purl.org/rss/1.0/modules/content/";

/// The persisted bytes could not be read back as a feed document.
#[derive(Error, Debug)]
pub enum FeedReadError {
    #[error("malformed feed document: {source}")]
    Malformed {
        #[from]
        source: rss::Error,
    },
}

/// Writing the feed XML failed.
#[derive(Error, Debug)]
pub enum FeedRenderError {
    #[error("failed to write feed XML: {source}")]
    Xml {
        #[from]
        source: rss::Error,
    },
}

/// Renders a document as an RSS 2.0 feed for one locale.
pub fn render(
    document: &FeedDocument,
    locale: &LocaleConfig,
    config: &AppConfig,
) -> Result<Vec<u8>, FeedRenderError> {
    let page_url = config.source.updates_url(&locale.name);

    let items: Vec<Item> = document
        .entries()
        .iter()
        .map(|entry| render_item(entry, &page_url))
        .collect();

    let mut channel = Channel::default();
    channel.set_title(format!(
        "Counter-Strike 2 - Updates ({})",
        capitalize(&locale.name)
    ));
    channel.set_description(steam::FEED_DESCRIPTION.to_string());
    channel.set_link(config.public_feed_url(&locale.code));
    channel.set_language(Some(locale.code.clone()));
    channel.set_copyright(Some(steam::RIGHTS.to_string()));
    channel.set_namespaces(BTreeMap::from([(
        "content".to_string(),
        CONTENT_NAMESPACE.to_string(),
    )]));
    channel.set_items(items);

    let bytes = channel.pretty_write_to(Vec::new(), b' ', 2)?;
    Ok(bytes)
}

fn render_item(entry: &FeedEntry, page_url: &str) -> Item {
    let mut guid = Guid::default();
    guid.set_value(entry.id.as_str().to_string());
    guid.set_permalink(false);

    let mut source = Source::default();
    source.set_url(page_url.to_string());

    let mut item = Item::default();
    item.set_guid(Some(guid));
    item.set_title(Some(entry.title.clone()));
    item.set_link(Some(page_url.to_string()));
    if let Some(published) = entry.published_at() {
        item.set_pub_date(Some(published.to_rfc2822()));
    }
    item.set_author(Some(format!(
        "{} ({})",
        steam::AUTHOR_EMAIL,
        steam::AUTHOR_NAME
    )));
    item.set_content(Some(entry.content.clone()));
    item.set_source(Some(source));
    item
}

/// Parses persisted bytes back into the document model.
///
/// Items without a usable guid are skipped; missing title or content
/// degrade to empty strings, a missing or unparseable pubDate to an absent
/// date. Well-formed markup whose root is not an RSS channel (an Atom feed,
/// say) carries no recoverable entries but is not corruption: it degrades
/// to an empty model. Only unreadable bytes are malformed.
pub fn parse(bytes: &[u8]) -> Result<FeedDocument, FeedReadError> {
    match Channel::read_from(bytes) {
        Ok(channel) => {
            let entries = channel.items().iter().filter_map(entry_from_item);
            Ok(FeedDocument::from_entries(entries))
        }
        Err(rss::Error::InvalidStartTag) => Ok(FeedDocument::empty()),
        Err(source) => Err(FeedReadError::Malformed { source }),
    }
}

fn entry_from_item(item: &Item) -> Option<FeedEntry> {
    let guid = item.guid()?.value().trim();
    if guid.is_empty() {
        return None;
    }

    Some(FeedEntry {
        id: EntryId::new(guid),
        title: item.title().unwrap_or_default().to_string(),
        date: item.pub_date().and_then(parse_pub_date),
        content: item
            .content()
            .or_else(|| item.description())
            .unwrap_or_default()
            .to_string(),
    })
}

fn parse_pub_date(raw: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc2822(raw)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok())
        .map(|instant| instant.with_timezone(&Utc).date_naive())
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::update::UpdateRecord;

    fn locale() -> LocaleConfig {
        LocaleConfig {
            name: "english".to_string(),
            code: "en".to_string(),
            tag: "en_US".to_string(),
        }
    }

    fn entry(day: u32, title: &str, content: &str) -> FeedEntry {
        let date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        FeedEntry::from(UpdateRecord::new(title, date, content))
    }

    #[test]
    fn round_trip_recovers_ids_dates_and_content() {
        let document = FeedDocument::from_entries([
            entry(10, "Newer", "<b>maps</b> changed"),
            entry(9, "Older", "small fix"),
        ]);
        let config = AppConfig::default();

        let bytes = render(&document, &locale(), &config).unwrap();
        let parsed = parse(&bytes).unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.entries(), document.entries());
    }

    #[test]
    fn rendered_channel_carries_locale_metadata() {
        let document = FeedDocument::from_entries([entry(10, "Only", "")]);
        let config = AppConfig::default();

        let bytes = render(&document, &locale(), &config).unwrap();
        let xml = String::from_utf8(bytes).unwrap();

        assert!(xml.contains("Counter-Strike 2 - Updates (English)"));
        assert!(xml.contains("<language>en</language>"));
        assert!(xml.contains("updates-feed-en.xml"));
        assert!(xml.contains("?l=english"));
        assert!(xml.contains("support@steampowered.com (Valve Corporation)"));
        assert!(xml.contains(r#"xmlns:content="http://purl.org/rss/1.0/modules/content/""#));
    }

    #[test]
    fn content_is_embedded_verbatim_not_escaped() {
        let document = FeedDocument::from_entries([entry(10, "t", "<b>bold</b><br/>next")]);
        let config = AppConfig::default();

        let bytes = render(&document, &locale(), &config).unwrap();
        let xml = String::from_utf8(bytes).unwrap();
        assert!(xml.contains("<content:encoded>"));
        assert!(xml.contains("<![CDATA[<b>bold</b><br/>next]]>"));
        // The content prefix must be declared or the document is not
        // namespace-well-formed and strict validators reject it.
        assert!(xml.contains(r#"xmlns:content="http://purl.org/rss/1.0/modules/content/""#));
    }

    #[test]
    fn entries_render_in_the_order_given() {
        let document = FeedDocument::from_entries([
            entry(9, "First given", ""),
            entry(10, "Second given", ""),
        ]);
        let config = AppConfig::default();

        let parsed = parse(&render(&document, &locale(), &config).unwrap()).unwrap();
        let titles: Vec<_> = parsed.entries().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["First given", "Second given"]);
    }

    #[test]
    fn pub_date_renders_midnight_utc_rfc2822() {
        let document = FeedDocument::from_entries([entry(10, "t", "")]);
        let config = AppConfig::default();

        let xml = String::from_utf8(render(&document, &locale(), &config).unwrap()).unwrap();
        assert!(xml.contains("Wed, 10 Jan 2024 00:00:00 +0000"));
    }

    #[test]
    fn unreadable_bytes_are_malformed() {
        assert!(matches!(
            parse(b"this is not xml at all"),
            Err(FeedReadError::Malformed { .. })
        ));
    }

    #[test]
    fn well_formed_foreign_markup_is_empty_not_malformed() {
        let atom = r#"<?xml version="1.0" encoding="utf-8"?>
            <feed xmlns="http://www.w3.org/2005/Atom">
              <title>elsewhere</title>
              <entry><id>abc</id><title>not an rss item</title></entry>
            </feed>"#;

        let parsed = parse(atom.as_bytes()).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn foreign_documents_degrade_gracefully() {
        // Hand-written feed: one item missing everything but a guid, one
        // item with no guid at all, one with an RFC 3339 pubDate.
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
            <rss version="2.0">
              <channel>
                <title>elsewhere</title>
                <link>https://example.com</link>
                <description>d</description>
                <item><guid>bare-id</guid></item>
                <item><title>no guid, skipped</title></item>
                <item>
                  <guid>dated</guid>
                  <pubDate>2024-01-10T00:00:00Z</pubDate>
                  <description>fallback body</description>
                </item>
              </channel>
            </rss>"#;

        let parsed = parse(xml.as_bytes()).unwrap();
        assert_eq!(parsed.len(), 2);

        let bare = &parsed.entries()[0];
        assert_eq!(bare.id.as_str(), "bare-id");
        assert_eq!(bare.title, "");
        assert_eq!(bare.date, None);

        let dated = &parsed.entries()[1];
        assert_eq!(dated.date, NaiveDate::from_ymd_opt(2024, 1, 10));
        assert_eq!(dated.content, "fallback body");
    }
}
