use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use helpdesk_router::config::loader::{load_config, ConfigError};
use helpdesk_router::config::watcher::ConfigWatcher;
use helpdesk_router::config::{ObservabilityConfig, RouterConfig};
use helpdesk_router::observability::logging;
use helpdesk_router::{helpdesk, RouteTable};

#[derive(Parser)]
#[command(name = "routes-cli")]
#[command(about = "Inspect and validate route declarations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a route file
    Check {
        file: PathBuf,
        /// Keep revalidating whenever the file changes
        #[arg(long)]
        watch: bool,
    },
    /// Print the route tree
    Table {
        /// Route file; the built-in helpdesk table when omitted
        file: Option<PathBuf>,
    },
    /// Show which screens a path resolves to (nothing is loaded)
    Resolve {
        #[arg(short, long)]
        routes: Option<PathBuf>,
        path: String,
    },
}

fn config_or_builtin(file: Option<&Path>) -> Result<RouterConfig, ConfigError> {
    match file {
        Some(path) => load_config(path),
        None => Ok(helpdesk::config()),
    }
}

fn report(file: &Path, result: &Result<RouterConfig, ConfigError>) -> bool {
    match result {
        Ok(config) => {
            println!("{}: ok ({} top-level routes)", file.display(), config.routes.len());
            true
        }
        Err(ConfigError::Validation(errors)) => {
            println!("{}: {} problem(s)", file.display(), errors.len());
            for err in errors {
                println!("  - {}", err);
            }
            false
        }
        Err(e) => {
            println!("{}: {}", file.display(), e);
            false
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { file, watch } => {
            let ok = report(&file, &load_config(&file));
            if !watch {
                if !ok {
                    std::process::exit(1);
                }
                return Ok(());
            }

            logging::init_logging(&ObservabilityConfig::default())?;

            let (watcher, mut updates) = ConfigWatcher::new(&file);
            let _handle = watcher.run()?;
            loop {
                tokio::select! {
                    Some(result) = updates.recv() => {
                        report(&file, &result);
                    }
                    _ = tokio::signal::ctrl_c() => break,
                }
            }
        }
        Commands::Table { file } => {
            let config = config_or_builtin(file.as_deref())?;
            print!("{}", RouteTable::from_config(&config)?);
        }
        Commands::Resolve { routes, path } => {
            let config = config_or_builtin(routes.as_deref())?;
            let table = RouteTable::from_config(&config)?;
            match table.resolve(&path) {
                Ok(plan) => println!("{}", serde_json::to_string_pretty(&plan)?),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
