//! CLI interface for Tastecheck.
//!
//! With no subcommand the interactive survey runs. The other subcommands are
//! non-interactive: arguments in, plain output out.
//!
//! - `tastecheck survey`: run the survey in the terminal.
//! - `tastecheck responses list|show`: read back stored submissions.
//! - `tastecheck theme show|set|toggle`: the persisted theme preference.
//! - `tastecheck contact`: validate a message and print its mailto link.

mod format;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};

use crate::config::{self, Config};
use crate::contact::ContactForm;
use crate::model::Theme;
use crate::storage::Storage;
use crate::{logging, tui};

use format::format_submission_line;

/// Tastecheck: quick meal feedback from the terminal.
#[derive(Debug, Parser)]
#[command(name = "tastecheck", version)]
pub struct Cli {
    /// Data directory for config, stored responses, and logs.
    /// Defaults to `~/.tastecheck/`.
    #[arg(long, global = true, env = "TASTECHECK_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the feedback survey (the default).
    Survey,

    /// Read stored survey responses.
    Responses {
        #[command(subcommand)]
        command: ResponsesCommand,
    },

    /// Show or change the color theme.
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommand>,
    },

    /// Validate a contact message and print a mailto link for it.
    ///
    /// Exits non-zero and lists every problem when a field is invalid.
    Contact {
        /// Your name (2–50 characters).
        #[arg(long)]
        name: String,

        /// Your email address.
        #[arg(long)]
        email: String,

        /// The message (10–1000 characters).
        #[arg(long)]
        message: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ResponsesCommand {
    /// List stored responses, oldest first.
    List,

    /// Print one response as JSON.
    Show {
        /// Response ID: full UUID or unambiguous prefix.
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ThemeCommand {
    /// Print the current theme.
    Show,

    /// Set the theme.
    Set {
        #[arg(value_enum)]
        theme: ThemeArg,
    },

    /// Switch between light and dark.
    Toggle,
}

/// CLI-facing theme, mapped to the domain `Theme`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl ThemeArg {
    fn to_domain(self) -> Theme {
        match self {
            Self::Light => Theme::Light,
            Self::Dark => Theme::Dark,
        }
    }
}

/// Run the CLI, returning an error message on failure.
pub fn run() -> Result<(), String> {
    let cli = Cli::parse();

    let data_root = match cli.data_dir {
        Some(dir) => dir,
        None => config::default_data_root().ok_or("could not determine home directory")?,
    };

    if let Err(e) = logging::init(&data_root) {
        eprintln!("warning: logging disabled: {e}");
    }

    let config_path = Config::path_in(&data_root);
    let config = Config::load_from(&config_path).map_err(|e| e.to_string())?;

    match cli.command.unwrap_or(Command::Survey) {
        Command::Survey => cmd_survey(&config, &data_root),
        Command::Responses { command } => {
            let storage = open_storage(&data_root)?;
            match command {
                ResponsesCommand::List => cmd_list(&storage),
                ResponsesCommand::Show { id } => cmd_show(&storage, &id),
            }
        }
        Command::Theme { command } => {
            cmd_theme(config, &config_path, command.unwrap_or(ThemeCommand::Show))
        }
        Command::Contact {
            name,
            email,
            message,
        } => cmd_contact(
            &config,
            &ContactForm {
                name,
                email,
                message,
            },
        ),
    }
}

fn open_storage(data_root: &Path) -> Result<Storage, String> {
    Storage::new(data_root.join("responses"))
        .map_err(|e| format!("failed to initialize storage: {e}"))
}

fn cmd_survey(config: &Config, data_root: &Path) -> Result<(), String> {
    let storage = open_storage(data_root)?;
    tui::run(config, &storage).map_err(|e| e.to_string())
}

fn cmd_list(storage: &Storage) -> Result<(), String> {
    let submissions = storage
        .list()
        .map_err(|e| format!("failed to list responses: {e}"))?;

    if submissions.is_empty() {
        println!("No responses");
        return Ok(());
    }

    for submission in &submissions {
        println!("{}", format_submission_line(submission));
    }

    Ok(())
}

fn cmd_show(storage: &Storage, reference: &str) -> Result<(), String> {
    let submission = storage.resolve(reference).map_err(|e| e.to_string())?;
    let json = serde_json::to_string_pretty(&submission)
        .map_err(|e| format!("failed to serialize response: {e}"))?;
    println!("{json}");
    Ok(())
}

fn cmd_theme(mut config: Config, config_path: &Path, command: ThemeCommand) -> Result<(), String> {
    let theme = match command {
        ThemeCommand::Show => {
            println!("{}", config.theme);
            return Ok(());
        }
        ThemeCommand::Set { theme } => theme.to_domain(),
        ThemeCommand::Toggle => config.theme.toggled(),
    };

    config.theme = theme;
    config.save_to(config_path).map_err(|e| e.to_string())?;
    info!(%theme, "theme changed");
    println!("{theme}");
    Ok(())
}

fn cmd_contact(config: &Config, form: &ContactForm) -> Result<(), String> {
    match form.mailto(&config.contact_address) {
        Ok(url) => {
            println!("{url}");
            Ok(())
        }
        Err(errors) => {
            warn!(count = errors.len(), "contact form rejected");
            let lines: Vec<String> = errors.iter().map(|e| format!("  {e}")).collect();
            Err(format!("please fix the following:\n{}", lines.join("\n")))
        }
    }
}
