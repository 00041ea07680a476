use clap::{Parser, Subcommand};

use crate::app::{Alert, MemoApp, Tracked};
use crate::config::{Config, PasswordMode};
use crate::error::{MemoError, Result};
use crate::modules::memos::types::MemoId;
use crate::types::ApiClient;
use crate::view;

/// Terminal memo pad backed by the memo API
#[derive(Parser, Debug)]
#[command(name = "memo", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base URL of the memo API
    #[arg(long, global = true, env = "MEMO_API_BASE")]
    pub api_base: Option<String>,

    /// How the memo password is sent to the server
    #[arg(long, global = true, value_enum, env = "MEMO_PASSWORD_MODE")]
    pub password_mode: Option<PasswordMode>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "MEMO_TIMEOUT_SECS")]
    pub timeout: Option<u64>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress all log output (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the whole memo pad
    Show,
    /// List all memos
    List,
    /// Write a new memo; hashtags go inline as #tag
    Create {
        content: String,
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Delete a memo
    Delete {
        id: MemoId,
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Replace the content of a memo
    Edit {
        id: MemoId,
        content: String,
        #[arg(short, long)]
        password: Option<String>,
    },
    /// List categories and their hashtags
    Categories,
    /// Show the memos of one category
    Category { name: String },
}

/// Alerts go to stderr so stdout carries only rendered output.
pub struct StderrAlert;

impl Alert for StderrAlert {
    fn alert(&self, message: &str) {
        eprintln!("! {message}");
    }
}

impl Cli {
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "memo_client=debug"
        } else if self.quiet {
            "memo_client=error"
        } else {
            "memo_client=info"
        }
    }

    /// Defaults, overridden by flags or their `MEMO_*` environment variables
    /// (`.env` is loaded before parsing).
    pub fn config(&self) -> Result<Config> {
        let mut config = Config::default();

        if let Some(base) = &self.api_base {
            config.api_base = base.clone();
        }
        if let Some(mode) = self.password_mode {
            config.password_mode = mode;
        }
        if let Some(secs) = self.timeout {
            config.timeout_secs = secs;
        }

        config.validate()?;
        Ok(config)
    }

    pub async fn run(self) -> Result<()> {
        self.run_with(StderrAlert).await
    }

    /// Runs the command, reporting through `alert`. A failure that no handler
    /// alerted (config, initial load, prompt) is alerted here, so every error
    /// reaches the user exactly once.
    pub async fn run_with<A: Alert>(self, alert: A) -> Result<()> {
        let alert = Tracked::new(alert);
        let result = self.execute(&alert).await;

        if let Err(err) = &result {
            if alert.shown() == 0 {
                alert.alert(&format!("error: {err}"));
            }
        }
        result
    }

    async fn execute<A: Alert>(self, alert: A) -> Result<()> {
        let config = self.config()?;
        tracing::debug!(api_base = %config.api_base, mode = ?config.password_mode, "starting");

        let client = ApiClient::new(&config)?;
        let mut app = MemoApp::new(client, alert);
        if let Err(err) = app.load().await {
            tracing::error!(error = %err, "could not load memos");
            return Err(err);
        }

        match self.command {
            Commands::Show => print!("{}", view::render(app.state())),
            Commands::List => print!("{}", view::render_memo_list(&app.state().memos)),
            Commands::Create { content, password } => {
                let password = password_or_prompt(password)?;
                let memo = app.create_memo(&content, &password).await?;
                println!("created memo {}", memo.id);
            }
            Commands::Delete { id, password } => {
                let password = password_or_prompt(password)?;
                app.delete_memo(id, &password).await?;
                println!("deleted memo {id}");
            }
            Commands::Edit { id, content, password } => {
                let password = password_or_prompt(password)?;
                app.edit_memo(id, &content, &password).await?;
                println!("edited memo {id}");
            }
            Commands::Categories => print!("{}", view::render_categories(app.state())),
            Commands::Category { name } => {
                app.select_category(&name).await?;
                print!("{}", view::render(app.state()));
            }
        }

        Ok(())
    }
}

fn password_or_prompt(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    dialoguer::Password::new()
        .with_prompt("Memo password")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| MemoError::Input(format!("could not read password: {e}")))
}
