use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::types::ReactionContent;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Compact,
}

#[derive(Parser)]
#[command(name = "gh-issues")]
#[command(about = "Browse open issues of a GitHub repository, star it and react to issues", version)]
#[command(after_help = "EXAMPLES:
    gh-issues search octocat/Hello-World        Show the first page of open issues
    gh-issues search octocat/Hello-World --all  Show every open issue
    gh-issues star octocat/Hello-World          Star a repository
    gh-issues react I_kwDOAB 'octocat/Hello-World' --content rocket
    gh-issues browse                            Start an interactive session")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json, compact)
    #[arg(long, short = 'o', global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Output as JSON (alias for --format json)
    #[arg(long, global = true, hide = true)]
    pub json: bool,

    /// Suppress success messages
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Show debug logs and detailed error information
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Get the effective output format, considering --json flag
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List open issues of a repository
    #[command(
        alias = "s",
        after_help = "EXAMPLES:
    gh-issues search octocat/Hello-World
    gh-issues search octocat/Hello-World --pages 3
    gh-issues search --all"
    )]
    Search(SearchArgs),
    /// Star a repository
    #[command(after_help = "EXAMPLES:
    gh-issues star octocat/Hello-World")]
    Star(RepoArgs),
    /// Remove your star from a repository
    #[command(after_help = "EXAMPLES:
    gh-issues unstar octocat/Hello-World")]
    Unstar(RepoArgs),
    /// React to an issue
    #[command(after_help = "EXAMPLES:
    gh-issues react I_kwDOAB octocat/Hello-World
    gh-issues react I_kwDOAB octocat/Hello-World --content heart")]
    React(ReactArgs),
    /// Interactive session: search, page through, star and react
    #[command(
        alias = "b",
        after_help = "EXAMPLES:
    gh-issues browse
    gh-issues browse octocat/Hello-World"
    )]
    Browse(RepoArgs),
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    gh-issues completions bash > ~/.bash_completion.d/gh-issues
    gh-issues completions zsh > ~/.zfunc/_gh-issues")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    #[command(after_help = "EXAMPLES:
    gh-issues init")]
    Init,
}

#[derive(Args, Clone)]
pub struct RepoArgs {
    /// Repository as owner/name (uses default_path from config if omitted)
    pub path: Option<String>,
}

#[derive(Args, Clone)]
pub struct SearchArgs {
    /// Repository as owner/name (uses default_path from config if omitted)
    pub path: Option<String>,

    /// Number of pages to fetch
    #[arg(long, short, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: u32,

    /// Fetch all pages (may be slow for repositories with many issues)
    #[arg(long, conflicts_with = "pages")]
    pub all: bool,
}

#[derive(Args, Clone)]
pub struct ReactArgs {
    /// Issue node ID (as shown by `search --format json`)
    pub issue_id: String,

    /// Repository as owner/name (uses default_path from config if omitted)
    pub path: Option<String>,

    /// Reaction to add
    #[arg(long, short, value_enum, default_value = "hooray")]
    pub content: ReactionContent,
}
