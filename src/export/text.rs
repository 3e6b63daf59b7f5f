use crate::models::{ExportOptions, Note};

pub const TEXT_FILENAME: &str = "my-notes.txt";
pub const TEXT_MIME: &str = "text/plain;charset=utf-8";

const SEPARATOR: &str = "--------------------------------------------------";
const UNKNOWN_PAGE: &str = "未知网页";

pub fn to_text(notes: &[Note], options: ExportOptions) -> String {
    let mut text = String::new();
    for note in notes {
        text.push_str(&note.content);
        text.push('\n');
        if options.include_time {
            text.push_str(&format!("时间: {}\n", note.timestamp));
        }
        if options.include_source {
            text.push_str(&format!(
                "来源: {} ({})\n",
                note.title_or(UNKNOWN_PAGE),
                note.source_url
            ));
        }
        text.push_str(SEPARATOR);
        text.push_str("\n\n");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hello() -> Note {
        Note {
            id: 1,
            content: "Hello".to_string(),
            source_url: "https://x.com".to_string(),
            source_title: Some("X".to_string()),
            timestamp: "2024-01-01 10:00:00".to_string(),
        }
    }

    #[test]
    fn both_toggles_emit_time_and_source_lines() {
        let text = to_text(&[hello()], ExportOptions::default());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Hello",
                "时间: 2024-01-01 10:00:00",
                "来源: X (https://x.com)",
                SEPARATOR,
                "",
            ]
        );
        assert!(text.ends_with(&format!("{SEPARATOR}\n\n")));
        assert_eq!(SEPARATOR.len(), 50);
    }

    #[test]
    fn toggles_are_independent() {
        let only_source = ExportOptions {
            include_time: false,
            include_source: true,
        };
        let text = to_text(&[hello()], only_source);
        assert!(!text.contains("时间:"));
        assert!(text.contains("来源: X"));

        let none = ExportOptions {
            include_time: false,
            include_source: false,
        };
        assert_eq!(to_text(&[hello()], none), format!("Hello\n{SEPARATOR}\n\n"));
    }

    #[test]
    fn missing_title_uses_placeholder() {
        let mut note = hello();
        note.source_title = None;
        let text = to_text(&[note], ExportOptions::default());
        assert!(text.contains("来源: 未知网页 (https://x.com)"));
    }

    #[test]
    fn keeps_collection_order_and_raw_content() {
        let mut second = hello();
        second.content = "<b>raw</b>".to_string();
        let text = to_text(&[second, hello()], ExportOptions::default());
        let raw = text.find("<b>raw</b>").unwrap();
        let hello_at = text.find("Hello").unwrap();
        assert!(raw < hello_at);
    }

    #[test]
    fn empty_collection_is_empty_text() {
        assert_eq!(to_text(&[], ExportOptions::default()), "");
    }
}
