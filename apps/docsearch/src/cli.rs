use clap::{ArgAction, Args, Parser, Subcommand};
use search_core::{Category, SortMode};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase verbosity. Can be used multiple times (e.g., -v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Use this configuration file instead of the platform default
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a search index and report structural problems
    Check {
        /// search_index.js or a built documentation directory
        path: Option<PathBuf>,
        /// Treat any malformed record as an error
        #[arg(long)]
        strict: bool,
    },
    /// Search the index
    Search(SearchArgs),
    /// Print the page / section / symbol tree
    Outline {
        path: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Print record statistics
    Stats {
        path: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Re-serialize the index
    Dump {
        path: Option<PathBuf>,
        /// Emit plain JSON instead of the JavaScript assignment
        #[arg(long)]
        json: bool,
        /// Pretty-print JSON output
        #[arg(long, requires = "json")]
        pretty: bool,
        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// search_index.js or a built documentation directory
    pub path: PathBuf,

    /// Query, e.g. `field cat:module NOT loc:index*`. Put a query that starts
    /// with `-` after `--`.
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Maximum number of results (defaults to the configured limit)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Skip this many results
    #[arg(long, default_value_t = 0)]
    pub offset: usize,

    /// Only fragments of this category (page, section, module, method, ...)
    #[arg(short, long)]
    pub category: Option<Category>,

    /// relevance, document-order or alphabetical
    #[arg(short, long, default_value_t = SortMode::Relevance)]
    pub sort: SortMode,

    /// Group results by page
    #[arg(short, long)]
    pub group: bool,

    /// Pass the query to the full-text engine as is, without the query language
    #[arg(long)]
    pub plain: bool,

    /// Print hits as JSON
    #[arg(long, conflicts_with = "group")]
    pub json: bool,
}

impl SearchArgs {
    pub fn query_string(&self) -> String {
        self.query.join(" ")
    }
}
