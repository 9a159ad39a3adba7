//! docsite-store - SQLite-backed page tree for a docs site

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod seed;
mod storage;
mod traits;

use error::StoreResult;
use storage::SqliteStore;
use traits::{PageNode, PageStore};

#[derive(Parser, Debug)]
#[command(name = "docsite-store")]
#[command(about = "SQLite-backed page tree for a docs site")]
struct Args {
    /// Path to SQLite database
    #[arg(long, env = "DOCSITE_DATABASE_PATH", default_value = "./docsite.db")]
    database: String,

    /// Log level
    #[arg(long, env = "DOCSITE_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the schema and seed an empty database
    Init {
        /// Skip inserting the seed pages
        #[arg(long)]
        no_seed: bool,
    },
    /// Print the published page tree
    Tree {
        /// Root the tree at the page with this slug instead of the
        /// whole forest
        #[arg(long)]
        slug: Option<String>,

        /// Emit JSON instead of indented text
        #[arg(long)]
        json: bool,
    },
    /// List every page regardless of status
    List,
    /// Search published pages by title or content
    Search { query: String },
    /// Print page counts
    Stats,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&args.log_level))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("docsite-store v{}", env!("CARGO_PKG_VERSION"));

    let store = SqliteStore::new(&args.database)?;
    store.initialize()?;

    match args.command {
        Command::Init { no_seed } => {
            if !no_seed {
                let inserted = seed::seed_if_empty(&store)?;
                if inserted > 0 {
                    println!("seeded {} pages", inserted);
                } else {
                    println!("database already has pages, seed skipped");
                }
            }
            println!("database ready at {}", args.database);
        }
        Command::Tree { slug, json } => {
            let forest = match slug {
                Some(slug) => {
                    let page = store
                        .page_by_slug(&slug)?
                        .ok_or_else(|| error::StoreError::PageNotFound(format!("slug '{slug}'")))?;
                    let children = store.build_tree(Some(page.id))?;
                    vec![PageNode { page, children }]
                }
                None => store.build_tree(None)?,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&forest)?);
            } else {
                print_forest(&forest, 0);
            }
        }
        Command::List => {
            for page in store.all_pages()? {
                println!(
                    "{:>5}  {:<12} {:<30} {}",
                    page.id,
                    page.status.as_str(),
                    page.slug,
                    page.title
                );
            }
        }
        Command::Search { query } => {
            let hits = store.search(&query)?;
            if hits.is_empty() {
                println!("no pages match '{}'", query);
            }
            for page in hits {
                println!("{:<30} {}", page.slug, page.title);
            }
        }
        Command::Stats => {
            let stats = stats_line(&store)?;
            println!("{}", stats);
        }
    }

    store.close()?;
    Ok(())
}

fn print_forest(nodes: &[PageNode], depth: usize) {
    for node in nodes {
        println!(
            "{}{} ({}) [{}]",
            "  ".repeat(depth),
            node.page.title,
            node.page.slug,
            node.page.layout_type
        );
        print_forest(&node.children, depth + 1);
    }
}

fn stats_line(store: &SqliteStore) -> StoreResult<String> {
    let stats = store.stats()?;
    Ok(format!(
        "{} pages ({} published, {} draft), {} roots",
        stats.page_count, stats.published_count, stats.draft_count, stats.root_count
    ))
}
