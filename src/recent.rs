//! The Recent page: the newest documents, capped at a fixed count.
//!
//! Only documents with an album/work name are listed. Everything past the
//! limit drops off this page but stays in the store and in the Archive.

use crate::render::{NavLink, PageContext, base_document, topnav};
use crate::types::PublishedDocument;
use chrono::{Datelike, NaiveDate};
use maud::{Markup, html};

/// The newest documents, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentIndex {
    pub entries: Vec<PublishedDocument>,
}

impl RecentIndex {
    /// Filter, sort and truncate a full scan result.
    ///
    /// The sort is stable: documents sharing a date keep scan order.
    pub fn build(docs: Vec<PublishedDocument>, limit: usize) -> Self {
        let mut entries: Vec<PublishedDocument> = docs
            .into_iter()
            .filter(|d| !d.album.trim().is_empty())
            .collect();
        entries.sort_by(|a, b| b.publish_date.cmp(&a.publish_date));
        entries.truncate(limit);
        Self { entries }
    }

    /// Renders the complete Recent page.
    pub fn render(&self, ctx: &PageContext) -> Markup {
        let nav = topnav(
            ctx,
            &[
                NavLink::to("Archive", "Archive"),
                NavLink::to("About", "About"),
                NavLink::to("Contact", "Contact"),
            ],
        );

        let content = html! {
            (nav)
            p.prg {
                @for doc in &self.entries {
                    (recent_entry(ctx, doc))
                }
            }
        };

        base_document(ctx, &ctx.site.name, html! {}, None, content)
    }
}

fn recent_entry(ctx: &PageContext, doc: &PublishedDocument) -> Markup {
    let href = format!("/{}", ctx.document_href(&doc.relative_path));
    html! {
        a.link href=(href) {
            i style="font-size: 0.7em;" {
                (doc.doc_type) " | " (display_date(doc.publish_date)) " | " (doc.author)
                br;
                b { (doc.album) " - " (doc.artist) " (" (doc.year) ")" }
            }
            " "
            br;
            (doc.title)
        }
    }
}

/// `D.M.YYYY` without zero padding (`5.3.2024`).
pub fn display_date(date: NaiveDate) -> String {
    format!("{}.{}.{}", date.day(), date.month(), date.year())
}
