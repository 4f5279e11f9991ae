//! oxide-ddl CLI
//!
//! Prints or executes the DDL of a table schema.

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use sqlx::sqlite::SqlitePoolOptions;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use oxide_ddl::prelude::*;

/// Cross-dialect CREATE/DROP TABLE generator.
#[derive(Parser)]
#[command(name = "oxide-ddl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// SQL dialect of the generated statements.
    #[arg(long, value_enum, env = "OXIDE_DDL_DIALECT", default_value = "sqlite")]
    dialect: DialectName,

    /// Database URL used with `--execute` (SQLite only).
    #[arg(short, long, env = "DATABASE_URL", default_value = "sqlite::memory:")]
    database: String,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum DialectName {
    Mysql,
    Postgres,
    Sqlite,
}

impl DialectName {
    fn dialect(self) -> Dialect {
        match self {
            Self::Mysql => Dialect::mysql(),
            Self::Postgres => Dialect::postgres(),
            Self::Sqlite => Dialect::sqlite(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a table from a JSON schema file.
    Create {
        /// Schema file.
        schema: PathBuf,

        /// Table name.
        #[arg(short, long)]
        table: String,

        /// Run the statements instead of printing them.
        #[arg(long)]
        execute: bool,
    },

    /// Drop a table.
    Drop {
        /// Table name.
        #[arg(short, long)]
        table: String,

        /// Fail if the table does not exist (no `IF EXISTS`).
        #[arg(long)]
        hard: bool,

        /// Run the statement instead of printing it.
        #[arg(long)]
        execute: bool,
    },

    /// List the abstract column types of the dialect.
    Types,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let dialect = cli.dialect.dialect();

    match cli.command {
        Commands::Create {
            schema,
            table,
            execute,
        } => {
            let definition = load_schema(&schema)?;
            if execute {
                let executor = connect(&cli.database, dialect).await?;
                executor.create_schema(&table, &definition).await?;
            } else {
                let mut writer = SqlWriter::new(io::stdout().lock());
                dialect
                    .compiler()
                    .create_schema(&mut writer, &table, &definition)?;
            }
        }

        Commands::Drop {
            table,
            hard,
            execute,
        } => {
            let dropped = if execute {
                let executor = connect(&cli.database, dialect).await?;
                executor.drop_schema(&table, !hard).await?
            } else {
                let mut writer = SqlWriter::new(io::stdout().lock());
                dialect.compiler().drop_schema(&mut writer, &table, !hard)?
            };
            if !dropped {
                anyhow::bail!("Table name is empty");
            }
        }

        Commands::Types => {
            let mut names: Vec<_> = dialect.types.names().collect();
            names.sort_unstable();
            for name in names {
                let ty = dialect.types.resolve(name)?;
                println!("{name:<12} {}", ty.keyword);
            }
        }
    }

    Ok(())
}

async fn connect(database: &str, dialect: Dialect) -> anyhow::Result<SchemaExecutor> {
    if dialect.name != "sqlite" {
        anyhow::bail!("--execute needs the sqlite dialect, got {}", dialect.name);
    }
    info!(database, "Connecting to database");
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database)
        .await?;
    Ok(SchemaExecutor::new(pool, dialect))
}
