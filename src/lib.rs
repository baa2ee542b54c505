//! # rat-press
//!
//! A local publisher for short review pages. Each review is written as a
//! static HTML page that begins with a metadata comment block, and two index
//! pages are regenerated from those blocks after every publish.
//!
//! # Architecture: The Store Is the Database
//!
//! ```text
//! submission ──► publish ──► Content/<type>/<year>/<month>/<album>.html
//!                                          │
//!                    full rescan ◄─────────┘
//!                        │
//!            ┌───────────┴───────────┐
//!            ▼                       ▼
//!       Archive.html            Recent.html
//! ```
//!
//! Nothing besides the document files is persisted. The index pages are pure
//! projections of the store: delete them and `rat-press reindex` rebuilds
//! them byte for byte from metadata alone.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`markup`] | Markdown body → HTML fragment in the site's house style |
//! | [`metadata`] | Encode/decode the `<!-- KEY: value -->` block at the top of each document |
//! | [`paths`] | Type/year/month layout, filename sanitizing, collision policy |
//! | [`scan`] | Walks the store and yields dated documents, skipping everything else |
//! | [`archive`] | Year → month grouped index page |
//! | [`recent`] | Newest-first feed capped at 13 entries |
//! | [`publish`] | Orchestrates one publish and the index rebuild |
//! | [`render`] | Shared page chrome and the document page template |
//! | [`assets`] | Copies stylesheet/icons/images beside each document |
//! | [`site`] | Site root layout and atomic writes |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`types`] | `DocumentSubmission` and `PublishedDocument` |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Full Rescan on Every Publish
//!
//! The indexes are never patched. Every publish walks the whole store and
//! rewrites both pages. A personal review site holds hundreds of pages, not
//! millions, and a full rebuild keeps "store is truth" trivially true.
//!
//! ## Lenient Scanner, Strict Publisher
//!
//! Files the scanner cannot use (no block, bad `DATE`, unreadable) are
//! skipped and logged at debug level; a stray HTML file in the store never
//! breaks a build. The publisher, on the other hand, refuses bad input before
//! writing anything.
//!
//! ## Maud for HTML
//!
//! Pages are built with [Maud](https://maud.lambda.xyz/): compile-time
//! checked, auto-escaped, and no template directory to ship.

pub mod archive;
pub mod assets;
pub mod config;
pub mod markup;
pub mod metadata;
pub mod output;
pub mod paths;
pub mod publish;
pub mod recent;
pub mod render;
pub mod scan;
pub mod site;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
