use std::io::{self, Write};

use crate::config::{Config, DEFAULT_PATH};
use crate::error::{GhError, Result};
use crate::operations::RepoPath;

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        let answer = prompt(&format!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        ))?;

        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("gh-issues Configuration");
    println!("=======================\n");

    let token = prompt(
        "Enter a GitHub personal access token (create one at https://github.com/settings/tokens): ",
    )?;
    if token.is_empty() {
        return Err(GhError::MissingToken);
    }

    let default_path = prompt(&format!("Enter default repository [{DEFAULT_PATH}]: "))?;
    if !default_path.is_empty() {
        default_path.parse::<RepoPath>()?;
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| GhError::ConfigRead {
            path: config_path.clone(),
            source: e,
        })?;
    }

    std::fs::write(&config_path, render(&token, &default_path)).map_err(|e| {
        GhError::ConfigRead {
            path: config_path.clone(),
            source: e,
        }
    })?;

    println!("\nConfig saved to {}", config_path.display());
    println!("You can now use 'gh-issues' commands!");

    Ok(())
}

fn render(token: &str, default_path: &str) -> String {
    let mut content = format!("token = {}\n", toml::Value::from(token));
    if !default_path.is_empty() {
        content.push_str(&format!("default_path = {}\n", toml::Value::from(default_path)));
    }
    content
}
