use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
pub const NO_DESCRIPTION: &str = "No description available.";

/// A single search hit, immutable once received.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Article {
    pub id: String,
    pub headline: String,
    pub byline: Option<String>,   // e.g. "By Jane Doe"
    pub pub_date: Option<String>, // raw timestamp as sent by the API
    pub snippet: Option<String>,
    pub lead_paragraph: Option<String>,
    pub url: String,
}

impl Article {
    pub fn author_line(&self) -> &str {
        non_empty(&self.byline).unwrap_or(UNKNOWN_AUTHOR)
    }

    /// Short description for list rows: snippet, then lead paragraph.
    pub fn summary(&self) -> &str {
        non_empty(&self.snippet)
            .or_else(|| non_empty(&self.lead_paragraph))
            .unwrap_or(NO_DESCRIPTION)
    }

    /// Longer text for the detail pane: lead paragraph, then snippet.
    pub fn detail_body(&self) -> &str {
        non_empty(&self.lead_paragraph)
            .or_else(|| non_empty(&self.snippet))
            .unwrap_or(NO_DESCRIPTION)
    }

    pub fn published(&self) -> Option<DateTime<Utc>> {
        self.pub_date.as_deref().and_then(parse_timestamp)
    }

    /// Publication day in UTC as `YYYY-MM-DD`.
    pub fn day(&self) -> Option<String> {
        self.published().map(|dt| dt.format("%Y-%m-%d").to_string())
    }

    pub fn date_line(&self) -> String {
        match (self.published(), self.pub_date.as_deref()) {
            (Some(dt), _) => dt.format("%Y-%m-%d %H:%M").to_string(),
            (None, Some(raw)) => raw.to_string(),
            (None, None) => "—".to_string(),
        }
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Accepts RFC 3339 and the `+0000` offset form the NYT API emits.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

// Wire format of the Article Search v2 endpoint.

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    pub response: ResponseBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseBody {
    #[serde(default)]
    pub docs: Option<Vec<Doc>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Doc {
    #[serde(rename = "_id")]
    pub id: String,
    pub headline: Headline,
    #[serde(default)]
    pub byline: Option<Byline>,
    #[serde(default)]
    pub pub_date: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub lead_paragraph: Option<String>,
    pub web_url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Headline {
    pub main: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Byline {
    #[serde(default)]
    pub original: Option<String>,
}

impl From<Doc> for Article {
    fn from(doc: Doc) -> Self {
        Self {
            id: doc.id,
            headline: doc.headline.main,
            byline: doc.byline.and_then(|b| b.original),
            pub_date: doc.pub_date,
            snippet: doc.snippet,
            lead_paragraph: doc.lead_paragraph,
            url: doc.web_url,
        }
    }
}

/// Decode a search response body into articles, keeping the API's order.
pub(crate) fn decode_docs(body: &[u8]) -> Result<Vec<Article>, serde_json::Error> {
    let envelope: Envelope = serde_json::from_slice(body)?;
    Ok(envelope
        .response
        .docs
        .unwrap_or_default()
        .into_iter()
        .map(Article::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(pub_date: Option<&str>) -> Article {
        Article {
            id: "a1".into(),
            headline: "Headline".into(),
            byline: None,
            pub_date: pub_date.map(Into::into),
            snippet: None,
            lead_paragraph: None,
            url: "https://example.com/a1".into(),
        }
    }

    #[test]
    fn decodes_search_response() {
        let body = br#"{
            "status": "OK",
            "response": {
                "docs": [{
                    "_id": "test-article-id",
                    "headline": { "main": "Test Article", "print_headline": "x" },
                    "byline": { "original": "By Test Author" },
                    "snippet": "Test snippet",
                    "web_url": "https://example.com/article",
                    "pub_date": "2025-07-19T00:00:00Z"
                }]
            }
        }"#;
        let docs = decode_docs(body).unwrap();
        assert_eq!(docs.len(), 1);
        let a = &docs[0];
        assert_eq!(a.id, "test-article-id");
        assert_eq!(a.headline, "Test Article");
        assert_eq!(a.byline.as_deref(), Some("By Test Author"));
        assert_eq!(a.url, "https://example.com/article");
        assert_eq!(a.day().as_deref(), Some("2025-07-19"));
    }

    #[test]
    fn null_docs_decode_as_empty() {
        let docs = decode_docs(br#"{"response": {"docs": null}}"#).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn missing_headline_is_a_decode_error() {
        let body = br#"{"response": {"docs": [{"_id": "x", "web_url": "u"}]}}"#;
        assert!(decode_docs(body).is_err());
    }

    #[test]
    fn missing_response_is_a_decode_error() {
        assert!(decode_docs(br#"{"fault": "bad key"}"#).is_err());
    }

    #[test]
    fn byline_without_original_is_absent() {
        let body = br#"{"response": {"docs": [{
            "_id": "x", "headline": {"main": "h"}, "byline": {"person": []}, "web_url": "u"
        }]}}"#;
        let docs = decode_docs(body).unwrap();
        assert_eq!(docs[0].byline, None);
        assert_eq!(docs[0].author_line(), UNKNOWN_AUTHOR);
    }

    #[test]
    fn summary_falls_back_in_order() {
        let mut a = article(None);
        assert_eq!(a.summary(), NO_DESCRIPTION);

        a.lead_paragraph = Some("Lead".into());
        assert_eq!(a.summary(), "Lead");

        a.snippet = Some(String::new());
        assert_eq!(a.summary(), "Lead");

        a.snippet = Some("Snippet".into());
        assert_eq!(a.summary(), "Snippet");
        assert_eq!(a.detail_body(), "Lead");
    }

    #[test]
    fn nyt_offset_format_parses() {
        let a = article(Some("2025-07-19T23:30:00+0000"));
        assert_eq!(a.day().as_deref(), Some("2025-07-19"));
        assert_eq!(a.date_line(), "2025-07-19 23:30");
    }

    #[test]
    fn day_is_truncated_in_utc() {
        let a = article(Some("2025-07-19T22:00:00-05:00"));
        assert_eq!(a.day().as_deref(), Some("2025-07-20"));
    }

    #[test]
    fn unparseable_date_falls_back_to_raw() {
        let a = article(Some("last tuesday"));
        assert_eq!(a.published(), None);
        assert_eq!(a.day(), None);
        assert_eq!(a.date_line(), "last tuesday");
        assert_eq!(article(None).date_line(), "—");
    }
}
