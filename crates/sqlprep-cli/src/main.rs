//! sqlprep CLI
//!
//! Command-line tool for rendering typed SQL templates.

use clap::{Parser, Subcommand};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use sqlprep_cli::params::parse_params;
use sqlprep_cli::{build_preparer, scan_entries};

/// Render typed SQL templates into injection-safe SQL.
#[derive(Parser)]
#[command(name = "sqlprep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database driver: pgsql, mysql, sqlite, sqlsrv, dblib or cubrid.
    #[arg(short, long, env = "SQLPREP_DRIVER", default_value = "mysql")]
    driver: String,

    /// Prefix prepended to every `?t` table name.
    #[arg(short, long, env = "SQLPREP_PREFIX", default_value = "")]
    prefix: String,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Substitute parameters into a template and print the SQL.
    Render {
        /// The SQL template.
        template: String,

        /// Parameters as a JSON array.
        #[arg(long, default_value = "[]")]
        params: String,
    },

    /// List the placeholders of a template.
    Scan {
        /// The SQL template.
        template: String,

        /// Print the placeholders as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let preparer = build_preparer(&cli.driver, &cli.prefix)?;
    if preparer.dialect().name() != cli.driver.trim().to_ascii_lowercase() {
        info!(
            "Unknown driver {:?}, using {} conventions.",
            cli.driver,
            preparer.dialect()
        );
    }

    match cli.command {
        Commands::Render { template, params } => {
            let params = parse_params(&params)?;
            debug!(params = params.len(), "Rendering template");
            let sql = preparer.prepare(&template, &params)?;
            println!("{sql}");
        }

        Commands::Scan { template, json } => {
            let entries = scan_entries(&preparer, &template);
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                info!("No placeholders found.");
            } else {
                for entry in &entries {
                    println!(
                        " {:>3}  {}  at byte {}",
                        entry.index, entry.token, entry.position
                    );
                }
            }
        }
    }

    Ok(())
}
