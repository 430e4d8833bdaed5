use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;
use std::process::ExitCode;

use ccm::{
    args::ExplicitFields,
    commands,
    env::Shell,
    paths::Paths,
    ui::{ColorMode, Ui},
};

#[derive(Parser)]
#[command(name = "ccm")]
#[command(about = "Claude Code API profile manager - store and switch API tokens, base URLs and models")]
#[command(version)]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// When to use colors: always, auto, never
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all saved profiles
    #[command(visible_alias = "ls")]
    List,

    /// Add a profile (or overwrite one with the same name)
    ///
    /// Positional values are classified automatically: the http(s) value is the
    /// base URL, KEY=VALUE values are custom parameters, and of the remaining two
    /// the one starting with "sk-" (or the longer one) is the token.
    Add {
        /// Name of the profile
        name: String,

        /// [TOKEN] [BASE_URL] [MODEL] [KEY=VALUE...] in any order
        #[arg(num_args = 0..)]
        values: Vec<String>,

        /// API token (overrides positional classification)
        #[arg(long)]
        token: Option<String>,

        /// Base URL (overrides positional classification)
        #[arg(long)]
        url: Option<String>,

        /// Model name (overrides positional classification)
        #[arg(long)]
        model: Option<String>,

        /// Custom parameter as KEY=VALUE (repeatable)
        #[arg(long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// Overwrite an existing profile without asking
        #[arg(short, long)]
        force: bool,
    },

    /// Switch to a profile (make it active)
    Use {
        /// Name of the profile to activate
        name: String,
    },

    /// Show the active profile
    #[command(visible_alias = "c")]
    Current,

    /// Remove a profile
    #[command(visible_alias = "del")]
    Remove {
        /// Name of the profile to remove
        name: String,
    },

    /// Replace the API token of a profile
    Token {
        /// Name of the profile
        name: String,

        /// New token
        token: String,
    },

    /// Print shell commands exporting a profile's environment variables
    ///
    /// Apply with: eval "$(ccm env)"
    Env {
        /// Profile to export (defaults to the active profile)
        name: Option<String>,

        /// Target shell: bash, zsh, fish, powershell (defaults to $SHELL)
        #[arg(long)]
        shell: Option<Shell>,
    },

    /// Run diagnostics on the settings file
    Doctor,

    /// Generate shell completion scripts
    Completions {
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

fn status(ok: bool) -> ExitCode {
    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    let paths = Paths::new()?;
    let ui = Ui::new(cli.color, cli.no_color);

    match cli.command {
        Commands::List => commands::list(&paths, &ui)?,
        Commands::Add {
            name,
            values,
            token,
            url,
            model,
            params,
            force,
        } => {
            let flags = ExplicitFields {
                token,
                url,
                model,
                params,
            };
            commands::add(&paths, &ui, &name, &values, flags, force)?
        }
        Commands::Use { name } => commands::use_profile(&paths, &ui, &name)?,
        Commands::Current => commands::current(&paths, &ui)?,
        Commands::Remove { name } => return Ok(status(commands::remove(&paths, &ui, &name)?)),
        Commands::Token { name, token } => {
            return Ok(status(commands::set_token(&paths, &ui, &name, &token)?));
        }
        Commands::Env { name, shell } => commands::env(&paths, &ui, name.as_deref(), shell)?,
        Commands::Doctor => commands::doctor(&paths, &ui)?,
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "ccm", &mut std::io::stdout());
        }
    }

    Ok(ExitCode::SUCCESS)
}
