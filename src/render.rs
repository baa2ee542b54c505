//! Page chrome and the document page template.
//!
//! Every page shares the same head (icon, stylesheet, viewport, web fonts),
//! a `topnav` bar and a copyright footer. HTML is generated with
//! [maud](https://maud.lambda.xyz/), so interpolated fields are escaped; the
//! only pre-escaped content is the rendered review body.
//!
//! The copyright year comes in through [`PageContext`] rather than the clock,
//! so the same store always renders to the same bytes within a given year.

use crate::config::SiteSection;
use crate::site::Site;
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Everything page templates need besides the content itself.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub site: SiteSection,
    /// Store directory as seen from the site root (e.g. `Content`).
    pub content_prefix: String,
    pub copyright_year: i32,
}

impl PageContext {
    pub fn new(site: &Site, copyright_year: i32) -> Self {
        Self {
            site: site.config.site.clone(),
            content_prefix: site.content_prefix(),
            copyright_year,
        }
    }

    /// Link to a stored document from a page at the site root.
    pub fn document_href(&self, relative_path: &str) -> String {
        if self.content_prefix.is_empty() {
            relative_path.to_string()
        } else {
            format!("{}/{}", self.content_prefix, relative_path)
        }
    }

    /// Absolute navigation link to a top-level page.
    pub fn nav_url(&self, page: &str) -> String {
        let base = self.site.base_url.trim_end_matches('/');
        if page.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{page}")
        }
    }
}

/// One link in the navigation bar.
pub struct NavLink<'a> {
    pub label: &'a str,
    /// Page under `base_url`; empty for the home page.
    pub page: &'a str,
    pub active: bool,
}

impl<'a> NavLink<'a> {
    pub fn to(label: &'a str, page: &'a str) -> Self {
        Self {
            label,
            page,
            active: false,
        }
    }

    pub fn active(mut self) -> Self {
        self.active = true;
        self
    }
}

/// Renders the base HTML document structure.
pub fn base_document(
    ctx: &PageContext,
    title: &str,
    head_extra: Markup,
    body_style: Option<&str>,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                link rel="icon" type="image/x-icon" href=(ctx.site.favicon);
                link rel="shortcut icon" href=(ctx.site.favicon);
                link rel="stylesheet" href=(ctx.site.stylesheet);
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                link href=(ctx.site.fonts_url) rel="stylesheet";
                (head_extra)
            }
            body.bkg style=[body_style] {
                (content)
                (footer(ctx))
            }
        }
    }
}

/// Renders the navigation bar. The home link always comes last, split right.
pub fn topnav(ctx: &PageContext, links: &[NavLink]) -> Markup {
    html! {
        div.topnav {
            @for link in links {
                a class=[link.active.then_some("active")] href=(ctx.nav_url(link.page)) {
                    (link.label)
                }
            }
            a.split href=(ctx.nav_url("")) { "Home" }
        }
    }
}

fn footer(ctx: &PageContext) -> Markup {
    html! {
        footer {
            div.footer {
                p { "© Copyright " (ctx.copyright_year) ", " (ctx.site.name) }
            }
        }
    }
}

/// Fields shown on a document page.
pub struct DocumentPage<'a> {
    pub title: &'a str,
    pub artist: &'a str,
    pub album: &'a str,
    pub release_year: &'a str,
    pub author: &'a str,
    /// `YYYY-MM-DD`
    pub publish_date: &'a str,
    /// Output of [`crate::markup::render_body`].
    pub body_html: &'a str,
}

/// Renders a full review page. The metadata block is prepended separately.
pub fn render_document(ctx: &PageContext, page: &DocumentPage) -> Markup {
    let nav = topnav(
        ctx,
        &[
            NavLink::to("Recent", "Recent"),
            NavLink::to("Archive", "Archive"),
            NavLink::to("About", "About"),
        ],
    );
    let background = format!("background-image: url({})", ctx.site.background);
    let page_title = format!("{} — {}", page.title, ctx.site.name);

    let content = html! {
        (nav)
        div.review-header-wrap {
            div.review-title-block {
                h1 { (page.title) }
                p.sub { (page.artist) ", " i { (page.album) } " (" (page.release_year) ")" }
            }
        }
        div.WordSection1.prg style="word-wrap:break-word;" {
            br;
            (PreEscaped(page.body_html))
            div.review-signature {
                span.sig-name { "- " (page.author) }
                span.sig-meta { (page.publish_date) }
            }
        }
    };

    base_document(ctx, &page_title, html! {}, Some(&background), content)
}
