//! arXiv daily RSS source.
//!
//! The feed at `<rss_url>/<category>` always holds today's announcements; it
//! takes no date parameter and is never capped. Parsing uses a quick-xml event
//! reader rather than a generic feed parser because the announcement type
//! lives in the `arxiv:` namespace extension that generic parsers drop.

use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::config::{FeedEndpoints, HttpConfig};
use crate::models::{FeedMode, FeedQuery, Published, RawEntry};
use crate::sources::{FeedSource, FetchError};
use crate::utils::HttpClient;

/// arXiv RSS source
#[derive(Debug, Clone)]
pub struct ArxivRssSource {
    client: HttpClient,
    rss_url: String,
}

impl ArxivRssSource {
    /// Create a new RSS source
    pub fn new(http: &HttpConfig, feeds: &FeedEndpoints) -> Result<Self, FetchError> {
        Ok(Self::with_client(HttpClient::new(http)?, &feeds.rss_url))
    }

    /// Create with a custom HTTP client and feed base URL (for testing)
    pub fn with_client(client: HttpClient, rss_url: impl Into<String>) -> Self {
        Self {
            client,
            rss_url: rss_url.into(),
        }
    }

    /// Feed URL for a category
    ///
    /// `+` joins several categories into one feed (`cs.AI+cs.LG`) and is
    /// legal in a path segment, so it stays unencoded.
    fn feed_url(&self, category: &str) -> String {
        let segment = category
            .split('+')
            .map(|part| urlencoding::encode(part).into_owned())
            .collect::<Vec<_>>()
            .join("+");
        format!("{}/{}", self.rss_url.trim_end_matches('/'), segment)
    }
}

#[async_trait]
impl FeedSource for ArxivRssSource {
    fn id(&self) -> &str {
        "arxiv-rss"
    }

    fn mode(&self) -> FeedMode {
        FeedMode::Rss
    }

    async fn fetch(&self, query: &FeedQuery) -> Result<Vec<RawEntry>, FetchError> {
        let url = self.feed_url(&query.category);
        let payload = self
            .client
            .get_bytes(&url, "application/rss+xml, application/xml;q=0.9")
            .await?;

        let entries = parse_rss(&payload)?;

        tracing::debug!(
            category = %query.category,
            entries = entries.len(),
            "arXiv RSS feed fetched"
        );

        Ok(entries)
    }
}

/// Item child elements we read, by local name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemField {
    Title,
    Link,
    Guid,
    Description,
    Creator,
    AnnounceType,
    PubDate,
}

impl ItemField {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(ItemField::Title),
            b"link" => Some(ItemField::Link),
            b"guid" => Some(ItemField::Guid),
            b"description" => Some(ItemField::Description),
            b"creator" => Some(ItemField::Creator),
            b"announce_type" => Some(ItemField::AnnounceType),
            b"pubDate" | b"date" => Some(ItemField::PubDate),
            _ => None,
        }
    }
}

/// Fields collected for the item currently being read
#[derive(Debug, Default)]
struct ItemFields {
    title: Option<String>,
    link: Option<String>,
    guid: Option<String>,
    description: Option<String>,
    creators: Vec<String>,
    announce_type: Option<String>,
    pub_date: Option<String>,
}

impl ItemFields {
    fn set(&mut self, field: ItemField, text: String) {
        match field {
            ItemField::Title => self.title = Some(text),
            ItemField::Link => self.link = Some(text),
            ItemField::Guid => self.guid = Some(text),
            ItemField::Description => self.description = Some(text),
            ItemField::Creator => self.creators.push(text),
            ItemField::AnnounceType => self.announce_type = Some(text),
            ItemField::PubDate => self.pub_date = Some(text),
        }
    }

    fn finish(self) -> RawEntry {
        RawEntry {
            title: self.title,
            summary: self.description,
            authors: self.creators,
            link: self.link.filter(|l| !l.is_empty()).or(self.guid),
            announce_type: self.announce_type,
            published: self.pub_date.map(Published::Verbatim),
        }
    }
}

/// Parse an RSS 2.0 or RSS 1.0 (RDF) document into raw entries, in document order
pub(crate) fn parse_rss(payload: &[u8]) -> Result<Vec<RawEntry>, FetchError> {
    let mut reader = Reader::from_reader(payload);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut entries = Vec::new();
    let mut root_checked = false;
    let mut item: Option<ItemFields> = None;
    let mut field: Option<ItemField> = None;
    let mut text = String::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                depth += 1;
                let local = e.local_name();
                if !root_checked {
                    check_root(local.as_ref())?;
                    root_checked = true;
                } else if local.as_ref() == b"item" {
                    item = Some(ItemFields::default());
                    field = None;
                } else if item.is_some() && field.is_none() {
                    field = ItemField::from_local_name(local.as_ref());
                    text.clear();
                }
            }
            Ok(Event::Empty(e)) => {
                if !root_checked {
                    check_root(e.local_name().as_ref())?;
                    root_checked = true;
                }
            }
            Ok(Event::Text(e)) => {
                if field.is_some() {
                    let unescaped = e
                        .unescape()
                        .map_err(|e| FetchError::Parse(format!("Bad text in RSS item: {}", e)))?;
                    text.push_str(&unescaped);
                }
            }
            Ok(Event::CData(e)) => {
                if field.is_some() {
                    text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::End(e)) => {
                depth = depth.saturating_sub(1);
                let local = e.local_name();
                if local.as_ref() == b"item" {
                    if let Some(fields) = item.take() {
                        entries.push(fields.finish());
                    }
                    field = None;
                } else if let (Some(current), Some(fields)) = (field, item.as_mut()) {
                    if ItemField::from_local_name(local.as_ref()) == Some(current) {
                        fields.set(current, std::mem::take(&mut text));
                        field = None;
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(FetchError::Parse(format!(
                    "XML parsing error at position {}: {}",
                    reader.error_position(),
                    e
                )))
            }
        }
        buf.clear();
    }

    if !root_checked {
        return Err(FetchError::Parse("Empty RSS document".to_string()));
    }
    if depth > 0 {
        return Err(FetchError::Parse(format!(
            "Truncated RSS document: {} unclosed element(s)",
            depth
        )));
    }

    Ok(entries)
}

fn check_root(local_name: &[u8]) -> Result<(), FetchError> {
    match local_name {
        b"rss" | b"RDF" => Ok(()),
        other => Err(FetchError::Parse(format!(
            "Expected an RSS document, found <{}>",
            String::from_utf8_lossy(other)
        ))),
    }
}
