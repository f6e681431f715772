//! USDA FoodData Central importer
//!
//! Writes an ordered SQL script for FDC datasets, or applies them directly to
//! a SQLite store.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use usda_import::db::{schema, Database};
use usda_import::plan::DEFAULT_OWNER;
use usda_import::{apply_datasets, build_info, write_script, IdStrategy, ImportConfig};

#[derive(Parser)]
#[command(
    name = "usda_import",
    version,
    about = "Convert USDA FoodData Central datasets into food/serving rows"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write an SQL script that inserts every food.
    Sql(SqlArgs),

    /// Insert every food into a SQLite database.
    Apply(ApplyArgs),
}

#[derive(Args)]
struct InputArgs {
    /// Dataset JSON file, or a directory of them.
    #[arg(long, short, env = "USDA_IMPORT_INPUT", value_name = "PATH")]
    input: PathBuf,

    /// User id that owns the imported foods.
    #[arg(long, env = "USDA_IMPORT_OWNER", default_value_t = DEFAULT_OWNER)]
    owner: i64,
}

#[derive(Args)]
struct SqlArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Script destination (default: stdout).
    #[arg(long, short, env = "USDA_IMPORT_OUTPUT", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Assign concrete ids starting here instead of letting the store allocate them.
    #[arg(long, value_name = "ID", requires = "first_serving_id")]
    first_food_id: Option<i64>,

    /// First serving id; required with --first-food-id.
    #[arg(long, value_name = "ID", requires = "first_food_id")]
    first_serving_id: Option<i64>,
}

#[derive(Args)]
struct ApplyArgs {
    #[command(flatten)]
    input: InputArgs,

    /// SQLite database to import into (created if missing).
    #[arg(long, short, env = "USDA_IMPORT_DATABASE", value_name = "FILE")]
    database: PathBuf,
}

impl SqlArgs {
    fn config(&self) -> ImportConfig {
        let ids = match (self.first_food_id, self.first_serving_id) {
            (Some(next_food), Some(next_serving)) => IdStrategy::Sequential {
                next_food,
                next_serving,
            },
            _ => IdStrategy::Deferred,
        };
        ImportConfig {
            owner: self.input.owner,
            ids,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so the script can go to stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("usda_import=info".parse()?))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    build_info::print_startup_banner();

    match cli.command {
        Command::Sql(args) => {
            let config = args.config();
            let summary = match &args.output {
                Some(path) => {
                    let out = BufWriter::new(File::create(path)?);
                    write_script(&args.input.input, &config, out)?
                }
                None => write_script(&args.input.input, &config, io::stdout().lock())?,
            };
            eprintln!("Wrote {} foods ({} servings)", summary.foods, summary.servings);
        }
        Command::Apply(args) => {
            let config = ImportConfig {
                owner: args.input.owner,
                ids: IdStrategy::Deferred,
            };

            if let Some(parent) = args.database.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }

            eprintln!("Database path: {}", args.database.display());
            let database = Database::new(&args.database)?;
            database.with_conn(|conn| schema::init_schema(conn))?;

            let summary = database
                .with_conn_mut(|conn| apply_datasets(conn, &args.input.input, &config))?;
            eprintln!("Imported {} foods ({} servings)", summary.foods, summary.servings);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_sequential_ids_require_both_flags() {
        let result = Cli::try_parse_from(["usda_import", "sql", "-i", "data", "--first-food-id", "5"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from([
            "usda_import",
            "sql",
            "-i",
            "data",
            "--first-food-id",
            "5",
            "--first-serving-id",
            "40",
        ])
        .unwrap();
        let Command::Sql(args) = cli.command else {
            panic!("expected sql subcommand");
        };
        assert_eq!(
            args.config().ids,
            IdStrategy::Sequential {
                next_food: 5,
                next_serving: 40
            }
        );
    }
}
