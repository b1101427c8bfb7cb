use std::io::{self, BufRead, Write};

use clap::ValueEnum;
use colored::Colorize;
use tracing::debug;

use crate::cli::RepoArgs;
use crate::config::Config;
use crate::error::{GhError, Result};
use crate::output;
use crate::session::Session;
use crate::types::ReactionContent;

const HELP: &str = "Commands:
    search <owner/name>   Show open issues of another repository
    more                  Load the next page of issues
    star                  Star or unstar the repository
    react <#> [kind]      React to issue # (default: hooray)
    show                  Show the current view again
    help                  Show this help
    quit                  Leave the session";

#[derive(Debug, PartialEq, Eq)]
enum BrowseCommand {
    Search(String),
    More,
    Star,
    React { index: usize, content: ReactionContent },
    Show,
    Help,
    Quit,
}

impl BrowseCommand {
    fn parse(line: &str) -> std::result::Result<Self, String> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(Self::Show);
        };

        match command {
            "search" | "s" => words
                .next()
                .map(|path| Self::Search(path.to_string()))
                .ok_or_else(|| "usage: search <owner/name>".to_string()),
            "more" | "m" => Ok(Self::More),
            "star" | "unstar" => Ok(Self::Star),
            "react" | "r" => {
                let index = words
                    .next()
                    .and_then(|n| n.parse::<usize>().ok())
                    .filter(|n| *n > 0)
                    .ok_or_else(|| "usage: react <#> [kind]".to_string())?;
                let content = match words.next() {
                    Some(kind) => ReactionContent::from_str(kind, true)
                        .map_err(|_| format!("unknown reaction '{kind}'"))?,
                    None => ReactionContent::default(),
                };
                Ok(Self::React { index, content })
            }
            "show" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(format!("unknown command '{other}', try 'help'")),
        }
    }
}

pub async fn run(session: &mut Session, config: &Config, args: RepoArgs) -> Result<()> {
    let path = config.resolve_path(args.path.as_deref());
    report(session.search(&path).await.map(output::print_view));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{} ", ">".bold());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let command = match BrowseCommand::parse(&line) {
            Ok(command) => command,
            Err(usage) => {
                println!("{usage}");
                continue;
            }
        };
        debug!(?command, "Browse command");

        match command {
            BrowseCommand::Quit => break,
            BrowseCommand::Help => println!("{HELP}"),
            BrowseCommand::Show => match session.view() {
                Some(view) => output::print_view(view),
                None => println!("No information yet..."),
            },
            BrowseCommand::Search(path) => {
                report(session.search(&path).await.map(output::print_view));
            }
            BrowseCommand::More => {
                report(session.load_more().await.map(output::print_view));
            }
            BrowseCommand::Star => {
                let target = session
                    .view()
                    .and_then(|v| v.repository())
                    .map(|repo| (repo.id.clone(), repo.viewer_has_starred));
                let result = match target {
                    Some((repo_id, starred)) => session.toggle_star(&repo_id, starred).await,
                    None => Err(GhError::NoRepository),
                };
                report(result.map(output::print_view));
            }
            BrowseCommand::React { index, content } => {
                let issue_id = session
                    .view()
                    .and_then(|v| v.issues().get(index - 1))
                    .map(|edge| edge.node.id.clone());
                let result = match issue_id {
                    Some(issue_id) => session.react(&issue_id, content).await,
                    None => Err(GhError::IssueNotFound(format!("#{index}"))),
                };
                report(result.map(output::print_view));
            }
        }
    }

    Ok(())
}

/// Failed intents leave the session running with its last good view.
fn report(result: Result<()>) {
    if let Err(e) = result {
        println!("{} {e}", "Something went wrong:".red().bold());
    }
}
