use clap::{Parser, Subcommand};
use mdtoggle::action::Action;
use mdtoggle::config::{self, Config, ConfigError};
use mdtoggle::host::{Position, TextHost};
use mdtoggle::shortcuts::Platform;
use mdtoggle::sourceedit::MarkdownDocument;
use mdtoggle::state::classify;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mdtoggle")]
#[command(about = "Toggle Markdown markup on a selection", long_about = None)]
struct Args {
    /// Config file to use instead of the one in the user config directory
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply an action to a document and print the result
    Apply {
        /// Action name (e.g. toggle-bold) or a bound key chord (e.g. Ctrl-B)
        action: String,
        /// Selection start as LINE:COLUMN, both zero based
        #[arg(long, default_value = "0:0")]
        from: Position,
        /// Selection end as LINE:COLUMN (defaults to the start)
        #[arg(long)]
        to: Option<Position>,
        /// Write the result back to FILE instead of stdout
        #[arg(short, long, requires = "file")]
        in_place: bool,
        /// Markdown file to read, stdin if omitted
        file: Option<PathBuf>,
    },
    /// Print the styles active at a position
    State {
        /// Position as LINE:COLUMN
        #[arg(long, default_value = "0:0")]
        at: Position,
        /// Markdown file to read, stdin if omitted
        file: Option<PathBuf>,
    },
    /// List the key bindings
    Keys {
        /// Show macOS labels regardless of the current platform
        #[arg(long)]
        mac: bool,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to read stdin: {0}")]
    Stdin(io::Error),
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("`{0}` is neither an action nor a bound key chord")]
    UnknownAction(String),
}

fn load_config(path: Option<&Path>) -> Result<Config, CliError> {
    match path.map(Path::to_path_buf).or_else(config::config_file_path) {
        Some(path) => Ok(config::load(&path)?),
        None => {
            tracing::warn!("no config directory available, using defaults");
            Ok(Config::default())
        }
    }
}

fn read_source(file: Option<&Path>) -> Result<String, CliError> {
    match file {
        Some(path) => fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .map_err(CliError::Stdin)?;
            Ok(source)
        }
    }
}

fn resolve_action(config: &Config, name: &str) -> Result<Action, CliError> {
    if let Ok(action) = name.parse::<Action>() {
        return Ok(action);
    }
    config
        .keymap()?
        .lookup(name, Platform::current())
        .ok_or_else(|| CliError::UnknownAction(name.to_string()))
}

fn cmd_apply(
    config: &Config,
    name: &str,
    from: Position,
    to: Option<Position>,
    in_place: bool,
    file: Option<&Path>,
) -> Result<(), CliError> {
    let action = resolve_action(config, name)?;
    let mut doc = MarkdownDocument::new(&read_source(file)?);
    doc.set_selection(from, to.unwrap_or(from));

    let outcome = config.toggler().apply(&mut doc, action);
    let (start, end) = doc.selection_range();
    tracing::info!(%action, ?outcome, %start, %end, "applied action");

    match file {
        Some(path) if in_place => fs::write(path, doc.text()).map_err(|source| CliError::Write {
            path: path.to_path_buf(),
            source,
        }),
        _ => {
            print!("{}", doc.text());
            Ok(())
        }
    }
}

fn cmd_state(at: Position, file: Option<&Path>) -> Result<(), CliError> {
    let doc = MarkdownDocument::new(&read_source(file)?);
    let styles = classify(&doc, Some(at));
    if styles.is_empty() {
        println!("(none)");
    } else {
        println!("{styles}");
    }
    Ok(())
}

fn cmd_keys(config: &Config, mac: bool) -> Result<(), CliError> {
    let platform = if mac { Platform::Mac } else { Platform::current() };
    println!("{}", config.keymap()?.render(platform));
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Commands::Apply {
            action,
            from,
            to,
            in_place,
            file,
        } => cmd_apply(&config, &action, from, to, in_place, file.as_deref()),
        Commands::State { at, file } => cmd_state(at, file.as_deref()),
        Commands::Keys { mac } => cmd_keys(&config, mac),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
