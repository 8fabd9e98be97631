use clap::{Parser, Subcommand};

use fs_browse::ops::{
    Context, ListDirRequest, ReadManyRequest, ReadRequest, SearchRequest, StatRequest, TreeRequest,
};
use fs_browse::Result;

#[derive(Debug, Parser)]
#[command(name = "fs-browse")]
#[command(
    about = "Read-only filesystem browsing (read/list/tree/search/stat) bounded to allowed directories."
)]
struct Cli {
    /// Allowed root directory; repeatable. Every request path must stay
    /// inside one of them.
    #[arg(long = "dir", required = true)]
    dirs: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Read one file, optionally a head/tail/line-range slice of it.
    Read {
        path: String,
        #[arg(long)]
        head: Option<u64>,
        #[arg(long)]
        tail: Option<u64>,
        #[arg(long)]
        start_line: Option<u64>,
        #[arg(long)]
        end_line: Option<u64>,
    },
    /// Read several files; per-file errors render inline.
    ReadMany { paths: Vec<String> },
    /// List a directory, non-recursively.
    List { path: String },
    /// Recursive directory tree as JSON.
    Tree {
        path: String,
        #[arg(long = "exclude")]
        exclude_patterns: Vec<String>,
    },
    /// Recursive glob search for matching paths.
    Search {
        path: String,
        pattern: String,
        #[arg(long = "exclude")]
        exclude_patterns: Vec<String>,
    },
    /// File metadata: size, timestamps, kind, permissions.
    Stat { path: String },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let ctx = Context::new(cli.dirs)?;

    let value = match cli.command {
        Command::Read {
            path,
            head,
            tail,
            start_line,
            end_line,
        } => serde_json::to_value(ctx.read_file(ReadRequest {
            path,
            head,
            tail,
            start_line,
            end_line,
        })?)?,
        Command::ReadMany { paths } => {
            serde_json::to_value(ctx.read_many_files(ReadManyRequest { paths })?)?
        }
        Command::List { path } => serde_json::to_value(ctx.list_dir(ListDirRequest { path })?)?,
        Command::Tree {
            path,
            exclude_patterns,
        } => serde_json::to_value(ctx.build_tree(TreeRequest {
            path,
            exclude_patterns,
        })?)?,
        Command::Search {
            path,
            pattern,
            exclude_patterns,
        } => serde_json::to_value(ctx.search_files(SearchRequest {
            path,
            pattern,
            exclude_patterns,
        })?)?,
        Command::Stat { path } => serde_json::to_value(ctx.stat_file(StatRequest { path })?)?,
    };

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
