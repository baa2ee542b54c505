//! Markdown body → HTML fragment.
//!
//! The dialect is CommonMark plus tables, footnotes and `~~strike~~`, with
//! a few house rules so pages match the site's fixed visual style:
//!
//! - A line holding only `+++` is a forced break and becomes `<br>`.
//! - Single newlines inside a paragraph are kept as `<br />`.
//! - `*em*` and `**strong**` render as `<i>` and `<b>`.
//! - Top-level paragraphs carry `class="MsoNormal"`.
//!
//! Rendering never fails; markup the parser cannot make sense of comes out
//! as literal text.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html as md_html};

/// Line that forces a break in the rendered body.
pub const BREAK_TOKEN: &str = "+++";

const PARAGRAPH_OPEN: &str = "<p class=\"MsoNormal\">";

/// Render a review body into an HTML fragment.
pub fn render_body(markdown: &str) -> String {
    let source = expand_break_tokens(markdown);

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut styler = HouseStyle::default();
    let events = Parser::new_ext(&source, options).map(|ev| styler.convert(ev));

    let mut out = String::with_capacity(source.len() * 3 / 2);
    md_html::push_html(&mut out, events);
    out
}

/// Swap every `+++` line for a raw `<br>` before parsing.
fn expand_break_tokens(markdown: &str) -> String {
    markdown
        .lines()
        .map(|line| if line.trim() == BREAK_TOKEN { "<br>" } else { line })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rewrites parser events into the site's markup.
#[derive(Default)]
struct HouseStyle {
    /// Open block quotes, list items and footnotes around the cursor.
    container_depth: usize,
    /// Whether each open paragraph was emitted with the house class.
    paragraphs: Vec<bool>,
}

impl HouseStyle {
    fn convert<'a>(&mut self, event: Event<'a>) -> Event<'a> {
        match event {
            Event::SoftBreak => Event::HardBreak,
            Event::Start(Tag::Emphasis) => inline("<i>"),
            Event::End(TagEnd::Emphasis) => inline("</i>"),
            Event::Start(Tag::Strong) => inline("<b>"),
            Event::End(TagEnd::Strong) => inline("</b>"),
            Event::Start(Tag::Paragraph) => {
                let top_level = self.container_depth == 0;
                self.paragraphs.push(top_level);
                if top_level {
                    Event::Html(CowStr::Borrowed(PARAGRAPH_OPEN))
                } else {
                    Event::Start(Tag::Paragraph)
                }
            }
            Event::End(TagEnd::Paragraph) => {
                if self.paragraphs.pop().unwrap_or(false) {
                    Event::Html(CowStr::Borrowed("</p>\n"))
                } else {
                    Event::End(TagEnd::Paragraph)
                }
            }
            Event::Start(
                tag @ (Tag::BlockQuote(_) | Tag::Item | Tag::FootnoteDefinition(_)),
            ) => {
                self.container_depth += 1;
                Event::Start(tag)
            }
            Event::End(
                end @ (TagEnd::BlockQuote(_) | TagEnd::Item | TagEnd::FootnoteDefinition),
            ) => {
                self.container_depth = self.container_depth.saturating_sub(1);
                Event::End(end)
            }
            other => other,
        }
    }
}

fn inline(html: &'static str) -> Event<'static> {
    Event::InlineHtml(CowStr::Borrowed(html))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_get_house_class() {
        let html = render_body("First.\n\nSecond.");
        assert_eq!(html.matches(PARAGRAPH_OPEN).count(), 2);
        assert!(html.contains("<p class=\"MsoNormal\">First.</p>"));
        assert!(!html.contains("<p>"));
    }

    #[test]
    fn soft_breaks_become_line_breaks() {
        let html = render_body("line one\nline two");
        assert_eq!(html.matches(PARAGRAPH_OPEN).count(), 1);
        assert!(html.contains("line one<br />"));
        assert!(html.contains("line two"));
    }

    #[test]
    fn emphasis_uses_plain_tags() {
        let html = render_body("This is **bold** and *italic*.");
        assert!(html.contains("<b>bold</b>"));
        assert!(html.contains("<i>italic</i>"));
        assert!(!html.contains("<strong>"));
        assert!(!html.contains("<em>"));
    }

    #[test]
    fn break_token_becomes_br() {
        let html = render_body("Verse one.\n\n+++\n\nVerse two.");
        assert!(html.contains("<br>"));
        assert!(!html.contains("+++"));
        assert_eq!(html.matches(PARAGRAPH_OPEN).count(), 2);
    }

    #[test]
    fn break_token_inside_text_is_literal() {
        let html = render_body("score: 7 +++ bonus");
        assert!(html.contains("7 +++ bonus"));
    }

    #[test]
    fn strikethrough_links_images_and_code() {
        let html = render_body("~~gone~~ [site](https://rat.reviews) ![cover](cover.jpg) `x`");
        assert!(html.contains("<del>gone</del>"));
        assert!(html.contains(r#"<a href="https://rat.reviews">site</a>"#));
        assert!(html.contains(r#"<img src="cover.jpg" alt="cover" />"#));
        assert!(html.contains("<code>x</code>"));
    }

    #[test]
    fn headings_render_unchanged() {
        let html = render_body("## Side B");
        assert!(html.contains("<h2>Side B</h2>"));
    }

    #[test]
    fn nested_paragraphs_stay_plain() {
        let html = render_body("> quoted line\n\nafter");
        assert!(html.contains("<blockquote>"));
        assert!(html.contains("<p>quoted line</p>"));
        assert!(html.contains("<p class=\"MsoNormal\">after</p>"));
    }

    #[test]
    fn list_items_render() {
        let html = render_body("- one\n- two");
        assert!(html.contains("<ul>"));
        assert!(html.contains("<li>one</li>"));
        assert!(!html.contains("MsoNormal"));
    }

    #[test]
    fn malformed_markup_degrades_to_text() {
        let html = render_body("**unclosed [link(");
        assert!(html.contains("**unclosed [link("));
    }

    #[test]
    fn empty_body_renders_nothing() {
        assert_eq!(render_body(""), "");
    }
}
