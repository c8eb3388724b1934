//! Markdown Rendering
//!
//! pulldown-cmark with tables and strikethrough. Raw HTML in the source is
//! rendered as text so help content can never inject markup.

use pulldown_cmark::{html::push_html, Event, Options, Parser};

/// Parse markdown to an HTML string
pub fn parse_markdown(text: &str) -> String {
    let events = Parser::new_ext(text, get_options()).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut html_output = String::new();
    push_html(&mut html_output, events);
    html_output
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_markdown() {
        let html = parse_markdown("Click **Register New Case**.\n\n- one\n- two");
        assert!(html.contains("<strong>Register New Case</strong>"));
        assert!(html.contains("<li>one</li>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = parse_markdown("before <script>alert(1)</script> after");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
