use chrono::Datelike;
use clap::{Parser, Subcommand};
use rat_press::publish::{self, Publisher};
use rat_press::render::PageContext;
use rat_press::scan::Store;
use rat_press::site::Site;
use rat_press::types::DocumentSubmission;
use rat_press::{config, output};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter (e.g. `rat_press=debug`).
const LOG_ENV: &str = "RAT_PRESS_LOG";

#[derive(Parser)]
#[command(name = "rat-press")]
#[command(about = "Publish review pages and regenerate the Recent and Archive indexes")]
#[command(long_about = "\
Publish review pages and regenerate the Recent and Archive indexes

The document store is the source of truth. Every page begins with a metadata
comment block; Recent and Archive are rebuilt from those blocks on every
publish and can be regenerated at any time with 'reindex'.

Site layout:

  site/
  ├── config.toml                  # Optional (see 'rat-press gen-config')
  ├── rat.css, favicon.ico, ...    # Assets, copied beside every document
  ├── Archive.html                 # Generated: all documents by year/month
  ├── Recent.html                  # Generated: newest 13 documents
  └── Content/
      └── Albums/2024/03/LPOne.html

Body markdown: **bold**  *italic*  # H1  [text](url)  ![alt](img.jpg)
> quote  - list  `code`  ~~strike~~  and a line of +++ for a forced break.")]
#[command(version)]
struct Cli {
    /// Site root (holds config.toml, the index pages and the content store)
    #[arg(long, default_value = ".", global = true)]
    site: PathBuf,

    /// Log debug diagnostics to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Publish one document and rebuild both indexes
    Publish(PublishArgs),
    /// Rebuild Archive and Recent from the content store
    Reindex,
    /// List every indexed document, newest first
    Scan {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(clap::Args)]
struct PublishArgs {
    /// Review title
    #[arg(long)]
    title: String,
    /// Album or work name (also names the file)
    #[arg(long)]
    album: String,
    #[arg(long, default_value = "")]
    artist: String,
    /// Release year
    #[arg(long, default_value = "")]
    year: String,
    /// Review type, e.g. Albums, Tracks, Essays (sets the folder)
    #[arg(long = "type", default_value = "")]
    doc_type: String,
    /// Signature shown on the page
    #[arg(long, default_value = "")]
    author: String,
    /// Publish date override, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    date: Option<String>,
    /// Markdown body file, or '-' for stdin
    #[arg(long)]
    body: Option<PathBuf>,
}

impl PublishArgs {
    fn into_submission(self) -> std::io::Result<DocumentSubmission> {
        let body = match &self.body {
            Some(path) if path.as_os_str() == "-" => {
                let mut body = String::new();
                std::io::stdin().read_to_string(&mut body)?;
                body
            }
            Some(path) => std::fs::read_to_string(path)?,
            None => String::new(),
        };
        Ok(DocumentSubmission {
            title: self.title,
            artist: self.artist,
            album: self.album,
            release_year: self.year,
            doc_type: self.doc_type,
            author: self.author,
            publish_date: self.date,
            body,
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Publish(args) => {
            let site = Site::open(&cli.site)?;
            let submission = args.into_submission()?;
            let result = Publisher::new(&site).publish(&submission)?;
            output::print_publish_output(submission.title.trim(), &result);
        }
        Command::Reindex => {
            let site = Site::open(&cli.site)?;
            let year = chrono::Local::now().year();
            let report = publish::rebuild_indexes(&site, &PageContext::new(&site, year))?;
            output::print_reindex_output(&report, site.root());
        }
        Command::Scan { json } => {
            let site = Site::open(&cli.site)?;
            let store = Store::new(site.content_root(), site.config.documents.default_type.clone());
            let mut docs = store.scan_all();
            docs.sort_by(|a, b| {
                b.publish_date
                    .cmp(&a.publish_date)
                    .then_with(|| a.relative_path.cmp(&b.relative_path))
            });
            if json {
                println!("{}", serde_json::to_string_pretty(&docs)?);
            } else {
                output::print_scan_output(&docs);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Send `tracing` output to stderr, filtered by `RAT_PRESS_LOG`.
///
/// `--verbose` wins over the environment and turns on debug output.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
