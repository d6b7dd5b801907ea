use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ft_list::config::{self, AppConfig};
use ft_list::controller::{Controller, Dialogs, Outcome};
use ft_list::render::{self, ListSurface, ListView};
use ft_list::store::{EntryStore, FileCookieJar};
use ft_list::terminal::{AssumeYes, TerminalDialogs};

#[derive(Parser)]
#[command(name = "ftl")]
#[command(about = "Newest-first to-do list kept in a cookie jar")]
struct Cli {
    /// Cookie file to use instead of the configured one
    #[arg(long, global = true)]
    jar: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show all entries, newest first
    List,
    /// Add an entry (prompts when no text is given)
    New {
        text: Vec<String>,
    },
    /// Remove an entry by id
    Remove {
        id: String,

        /// Skip the confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the effective configuration
    Config,
}

/// Logs go to stderr so stdout only carries the list.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "ft_list=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn open_controller<D: Dialogs>(
    config: &AppConfig,
    jar_path: PathBuf,
    dialogs: D,
) -> anyhow::Result<Controller<FileCookieJar, D, ListView>> {
    let jar = FileCookieJar::open(&jar_path)
        .with_context(|| format!("Failed to open cookie file {}", jar_path.display()))?;
    let store = EntryStore::with_key(jar, config.cookie_name.clone());
    let mut controller = Controller::new(store, dialogs, ListView::new());
    controller.start();
    Ok(controller)
}

fn print_list(view: &ListView) {
    if view.nodes().is_empty() {
        println!("(no entries)");
    } else {
        print!("{}", render::render_text(view.nodes()));
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = AppConfig::load();
    let jar_path = match cli.jar {
        Some(path) => path,
        None => config.resolved_jar_path()?,
    };

    match cli.command.unwrap_or(Commands::List) {
        Commands::List => {
            let dialogs = TerminalDialogs::new(io::stdin().lock(), io::stderr());
            let controller = open_controller(&config, jar_path, dialogs)?;
            print_list(controller.view());
        }
        Commands::New { text } => {
            let dialogs = TerminalDialogs::new(io::stdin().lock(), io::stderr());
            let mut controller = open_controller(&config, jar_path, dialogs)?;
            let outcome = if text.is_empty() {
                controller.create()
            } else {
                controller.add(&text.join(" "))
            };
            match outcome {
                Outcome::Created(entry) => println!("Added {}", entry.id),
                Outcome::Cancelled => println!("Cancelled"),
                _ => println!("Nothing to add"),
            }
        }
        Commands::Remove { id, yes } => {
            let outcome = if yes {
                open_controller(&config, jar_path, AssumeYes)?.delete(&id)
            } else {
                let dialogs = TerminalDialogs::new(io::stdin().lock(), io::stderr());
                open_controller(&config, jar_path, dialogs)?.delete(&id)
            };
            match outcome {
                Outcome::Deleted(entry) => println!("Removed {}", render::plain_text(&entry.text)),
                Outcome::Declined => println!("Kept"),
                _ => println!("No entry with id {id}"),
            }
        }
        Commands::Config => {
            println!("config file: {}", config::config_path()?.display());
            println!("cookie file: {}", jar_path.display());
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
