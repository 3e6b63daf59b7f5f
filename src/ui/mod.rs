mod cards;
mod handler;
mod page;

pub use cards::{CardState, ListRegion};
pub use handler::{handle_dom_event, AppAction, DomEvent, DomTarget, Rect};
pub use page::{render_page, Presentation};

/// Neutralise the five HTML metacharacters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape_html;

    #[test]
    fn escapes_all_metacharacters() {
        assert_eq!(
            escape_html(r#"<b>&"'</b>"#),
            "&lt;b&gt;&amp;&quot;&#039;&lt;/b&gt;"
        );
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(escape_html("句存 plain text"), "句存 plain text");
        assert_eq!(escape_html(""), "");
    }
}
