//! The Archive page: every document, grouped by year then month.
//!
//! ```text
//! 2024
//!   March
//!     [Albums] LP Two - X (2001)      ← newest first within the month
//!     [Albums] LP One - X (1999)
//!   January
//!     ...
//! 2023
//!   ...
//! ```
//!
//! Documents are sorted once, newest first, before grouping. The sort is
//! stable, so documents sharing a date keep their scan order inside their
//! month.

use crate::render::{NavLink, PageContext, base_document, topnav};
use crate::types::PublishedDocument;
use chrono::Datelike;
use maud::{Markup, html};
use std::collections::BTreeMap;

const ARCHIVE_CSS: &str = "ul.a { list-style-type: circle; padding: 0 8%; }\n\
    .list { color: black; font-size: 1em; text-decoration: none; }";

/// All documents grouped for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveIndex {
    /// Newest year first.
    pub years: Vec<YearGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearGroup {
    pub year: i32,
    /// Newest month first.
    pub months: Vec<MonthGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGroup {
    /// 1-based.
    pub month: u32,
    /// English month name (`March`).
    pub name: String,
    /// Newest first; same-date entries in scan order.
    pub entries: Vec<PublishedDocument>,
}

impl ArchiveIndex {
    /// Group a full scan result.
    pub fn build(mut docs: Vec<PublishedDocument>) -> Self {
        docs.sort_by(|a, b| b.publish_date.cmp(&a.publish_date));

        let mut grouped: BTreeMap<i32, BTreeMap<u32, Vec<PublishedDocument>>> = BTreeMap::new();
        for doc in docs {
            let date = doc.publish_date;
            grouped
                .entry(date.year())
                .or_default()
                .entry(date.month())
                .or_default()
                .push(doc);
        }

        let years = grouped
            .into_iter()
            .rev()
            .map(|(year, months)| YearGroup {
                year,
                months: months
                    .into_iter()
                    .rev()
                    .map(|(month, entries)| MonthGroup {
                        month,
                        name: month_name(&entries),
                        entries,
                    })
                    .collect(),
            })
            .collect();

        Self { years }
    }

    /// Total number of documents across all groups.
    pub fn len(&self) -> usize {
        self.years
            .iter()
            .flat_map(|y| &y.months)
            .map(|m| m.entries.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Renders the complete Archive page.
    pub fn render(&self, ctx: &PageContext) -> Markup {
        let nav = topnav(
            ctx,
            &[
                NavLink::to("Reviews", "Recent").active(),
                NavLink::to("About", "About"),
                NavLink::to("Contact", "Contact"),
            ],
        );
        let head = html! { style { (ARCHIVE_CSS) } };
        let title = format!("{} ⊚ Archive", ctx.site.name);

        let content = html! {
            (nav)
            div.prg style="font-size:1em; text-align:left;" {
                @for year in &self.years {
                    h2 { (year.year) }
                    @for month in &year.months {
                        h3 style="padding: 0 4%" { (month.name) }
                        ul.a {
                            @for doc in &month.entries {
                                (archive_entry(ctx, doc))
                            }
                        }
                    }
                }
            }
        };

        base_document(ctx, &title, head, None, content)
    }
}

fn archive_entry(ctx: &PageContext, doc: &PublishedDocument) -> Markup {
    html! {
        li {
            a.list href=(ctx.document_href(&doc.relative_path)) {
                "[" span style="color:#02ab6d;" { (doc.doc_type) } "] "
                i { (doc.album) " - " (doc.artist) }
                " (" (doc.year) ")"
            }
        }
    }
}

fn month_name(entries: &[PublishedDocument]) -> String {
    entries
        .first()
        .map(|d| d.publish_date.format("%B").to_string())
        .unwrap_or_default()
}
