use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// zh-CN `toLocaleString` with a 24-hour clock, e.g. `2024/1/5 09:03:07`.
pub const TIMESTAMP_FMT: &str = "%Y/%-m/%-d %H:%M:%S";

/// The whole persisted note list, newest first.
pub type Collection = Vec<Note>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: i64,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub source_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_title: Option<String>,
    #[serde(default)]
    pub timestamp: String,
}

impl Note {
    pub fn new(
        id: i64,
        content: String,
        source_url: String,
        source_title: Option<String>,
        captured_at: DateTime<Local>,
    ) -> Self {
        Self {
            id,
            content,
            source_url,
            source_title,
            timestamp: format_timestamp(captured_at),
        }
    }

    /// Page title if one was captured, otherwise `fallback`.
    pub fn title_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.source_title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => fallback,
        }
    }

    /// Title shown next to a source link; falls back to the raw URL.
    pub fn display_title(&self) -> &str {
        self.title_or(&self.source_url)
    }
}

pub fn format_timestamp(at: DateTime<Local>) -> String {
    at.format(TIMESTAMP_FMT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn note(title: Option<&str>) -> Note {
        Note {
            id: 1,
            content: "text".to_string(),
            source_url: "https://example.com/a".to_string(),
            source_title: title.map(str::to_string),
            timestamp: "2024/1/1 10:00:00".to_string(),
        }
    }

    #[test]
    fn timestamp_uses_unpadded_date_and_24h_time() {
        let at = Local.with_ymd_and_hms(2024, 1, 5, 21, 3, 7).unwrap();
        assert_eq!(format_timestamp(at), "2024/1/5 21:03:07");
    }

    #[test]
    fn display_title_falls_back_to_url() {
        assert_eq!(note(Some("Page")).display_title(), "Page");
        assert_eq!(note(None).display_title(), "https://example.com/a");
        assert_eq!(note(Some("")).display_title(), "https://example.com/a");
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let json = serde_json::to_value(note(Some("Page"))).unwrap();
        assert_eq!(json["sourceUrl"], "https://example.com/a");
        assert_eq!(json["sourceTitle"], "Page");

        let json = serde_json::to_value(note(None)).unwrap();
        assert!(json.get("sourceTitle").is_none());
    }

    #[test]
    fn tolerates_records_without_title() {
        let raw = r#"{"id":7,"content":"x","sourceUrl":"u","timestamp":"t"}"#;
        let parsed: Note = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.id, 7);
        assert_eq!(parsed.source_title, None);
    }
}
