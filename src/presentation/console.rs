// Console adapter - Binds typed commands to the dashboard entry points
use crate::application::dashboard_app::DashboardApp;
use crate::presentation::html::render_page;
use crate::presentation::text::render_text;
use anyhow::Context;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "commands: refresh | client <name> | clients | show | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh,
    Client(String),
    Clients,
    Show,
    Help,
    Quit,
    Unknown(String),
}

/// Parses one input line; blank lines yield `None`.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match (word.to_ascii_lowercase().as_str(), rest) {
        ("refresh" | "r", "") => Command::Refresh,
        ("client" | "c", name) if !name.is_empty() => Command::Client(name.to_string()),
        ("clients", "") => Command::Clients,
        ("show" | "s", "") => Command::Show,
        ("help" | "?", "") => Command::Help,
        ("quit" | "exit" | "q", "") => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    };
    Some(command)
}

pub struct Console {
    app: DashboardApp,
    html_path: PathBuf,
    title: String,
}

impl Console {
    pub fn new(app: DashboardApp, html_path: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            app,
            html_path: html_path.into(),
            title: title.into(),
        }
    }

    pub fn app(&self) -> &DashboardApp {
        &self.app
    }

    pub async fn page(&self) -> String {
        self.app.with_view(|view| render_page(view, &self.title)).await
    }

    pub async fn write_page(&self) -> anyhow::Result<()> {
        let html = self.page().await;
        tokio::fs::write(&self.html_path, html)
            .await
            .with_context(|| format!("Failed to write {}", self.html_path.display()))
    }

    /// Writes the current page to disk and prints the text rendering.
    pub async fn publish(&self) -> anyhow::Result<()> {
        self.write_page().await?;
        println!("{}", self.app.with_view(render_text).await);
        Ok(())
    }

    /// Reads commands from stdin until `quit` or end of input. The page is also rewritten
    /// whenever a banner expires.
    pub async fn run(&self) -> anyhow::Result<()> {
        println!("{}", HELP);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut dismissals = self.app.dismissals();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };
                    let Some(command) = parse_command(&line) else {
                        continue;
                    };
                    if !self.execute(command).await? {
                        break;
                    }
                }
                changed = dismissals.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    tracing::debug!("Banner {} expired, rewriting page", *dismissals.borrow_and_update());
                    self.write_page().await?;
                }
            }
        }
        Ok(())
    }

    /// Runs one command. Returns `false` when the console should stop.
    async fn execute(&self, command: Command) -> anyhow::Result<bool> {
        match command {
            Command::Refresh => {
                let outcome = self.app.on_refresh().await;
                tracing::debug!("Refresh finished: {:?}", outcome);
            }
            Command::Client(name) => match self.app.on_client_change(&name).await {
                Some(outcome) => tracing::debug!("Switched to {}: {:?}", name, outcome),
                None => {
                    println!("cannot select client: {}", name);
                    return Ok(true);
                }
            },
            Command::Clients => {
                let listing = self
                    .app
                    .with_view(|view| {
                        view.selector
                            .options
                            .iter()
                            .map(|o| {
                                let marker = if view.selector.selected.as_deref() == Some(o.value.as_str()) {
                                    "*"
                                } else {
                                    " "
                                };
                                format!("{} {} ({})", marker, o.value, o.label)
                            })
                            .collect::<Vec<_>>()
                    })
                    .await;
                for entry in listing {
                    println!("{}", entry);
                }
                return Ok(true);
            }
            Command::Show => {}
            Command::Help => {
                println!("{}", HELP);
                return Ok(true);
            }
            Command::Quit => return Ok(false),
            Command::Unknown(input) => {
                println!("unrecognised command: {}\n{}", input, HELP);
                return Ok(true);
            }
        }
        self.publish().await?;
        Ok(true)
    }
}
