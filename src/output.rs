use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use colored::Colorize;
use serde::Serialize;
use serde_json::json;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::OutputFormat;
use crate::state::ViewState;
use crate::types::{Issue, Repository};

static FORMAT: AtomicU8 = AtomicU8::new(0);
static QUIET: AtomicBool = AtomicBool::new(false);

pub fn set_format(format: OutputFormat) {
    let raw = match format {
        OutputFormat::Table => 0,
        OutputFormat::Json => 1,
        OutputFormat::Compact => 2,
    };
    FORMAT.store(raw, Ordering::Relaxed);
}

pub fn format() -> OutputFormat {
    match FORMAT.load(Ordering::Relaxed) {
        1 => OutputFormat::Json,
        2 => OutputFormat::Compact,
        _ => OutputFormat::Table,
    }
}

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Print a single item or JSON depending on output mode
pub fn print_item<T: Serialize>(item: &T, display: impl FnOnce(&T)) {
    if format() == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(item).unwrap_or_default());
    } else {
        display(item);
    }
}

/// Print a success message (skipped when quiet, wrapped in an object for JSON)
pub fn print_message(message: &str) {
    if is_quiet() {
        return;
    }
    if format() == OutputFormat::Json {
        println!("{}", json!({ "message": message }));
    } else {
        println!("{message}");
    }
}

pub fn print_view(view: &ViewState) {
    print_item(view, |view| match format() {
        OutputFormat::Compact => print_compact(view),
        _ => print_full(view),
    });
}

#[derive(Tabled)]
struct IssueRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Reactions")]
    reactions: String,
    #[tabled(rename = "URL")]
    url: String,
}

impl IssueRow {
    fn new(index: usize, issue: &Issue) -> Self {
        Self {
            index,
            title: truncate(&issue.title, 60),
            reactions: reactions_summary(issue),
            url: issue.url.clone(),
        }
    }
}

fn print_full(view: &ViewState) {
    if view.has_errors() {
        println!("{} {}", "Something went wrong:".red().bold(), error_text(view));
        return;
    }

    let Some(organization) = &view.organization else {
        println!("No information yet...");
        return;
    };

    println!(
        "{} {} {}",
        "Issues from Organization:".bold(),
        organization.name.as_deref().unwrap_or("-"),
        organization.url.as_deref().unwrap_or("").bright_black()
    );
    if let Some(description) = &organization.description {
        println!("{description}");
    }
    if let Some(email) = organization.email.as_deref().filter(|e| !e.is_empty()) {
        println!("{} {email}", "Email:".bold());
    }

    let Some(repo) = &organization.repository else {
        println!("Repository {} not found", view.path);
        return;
    };

    println!();
    println!(
        "{} {} {}",
        "In Repository:".bold(),
        repo.name,
        repo.url.bright_black()
    );
    if let Some(description) = &repo.description {
        println!("{} {description}", "Description:".bold());
    }
    println!("{} {}", "Total Count:".bold(), repo.issues.total_count);
    println!("{}", star_label(repo));
    println!();

    if repo.issues.edges.is_empty() {
        println!("No open issues");
    } else {
        let rows: Vec<IssueRow> = repo
            .issues
            .edges
            .iter()
            .enumerate()
            .map(|(i, edge)| IssueRow::new(i + 1, &edge.node))
            .collect();
        println!("{}", Table::new(rows).with(Style::rounded()));
    }

    if repo.issues.page_info.has_next_page {
        println!(
            "{}",
            format!(
                "Showing {} of {} issues, more available",
                repo.issues.edges.len(),
                repo.issues.total_count
            )
            .bright_black()
        );
    }
}

fn print_compact(view: &ViewState) {
    if view.has_errors() {
        println!("error\t{}", error_text(view));
    }
    for (i, edge) in view.issues().iter().enumerate() {
        println!(
            "{}\t{}\t{}\t{}",
            i + 1,
            edge.node.id,
            edge.node.title,
            reactions_summary(&edge.node)
        );
    }
}

/// Star count with the action a toggle would take, like a Star/Unstar button.
pub fn star_label(repo: &Repository) -> String {
    let action = if repo.viewer_has_starred {
        "Unstar".yellow().to_string()
    } else {
        "Star".to_string()
    };
    format!("★ {} {action}", repo.stargazers.total_count)
}

pub fn reactions_summary(issue: &Issue) -> String {
    issue
        .reactions()
        .map(|r| r.content.emoji())
        .collect::<Vec<_>>()
        .join(" ")
}

fn error_text(view: &ViewState) -> String {
    view.errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate a string with ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
