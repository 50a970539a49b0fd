//! CLI argument definitions for the DataSnail workbench.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use dsw_gateway::DatabaseEngine;
use dsw_state::AnalysisType;

#[derive(Parser)]
#[command(
    name = "datasnail",
    version,
    about = "DataSnail - drive the analysis backend from a terminal",
    long_about = "Drive the DataSnail analysis backend from a terminal.\n\n\
                  Lists connections and schemas, previews tables, runs statistics,\n\
                  and runs SQL or Python scripts through the same Script Lab and\n\
                  session table flow as the workbench."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (default: platform config folder).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL (overrides settings).
    #[arg(long = "backend-url", value_name = "URL", global = true)]
    pub backend_url: Option<String>,

    /// Python session id (overrides settings).
    #[arg(long = "session", value_name = "ID", global = true)]
    pub session: Option<String>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check that the backend answers.
    Health,

    /// List configured connections.
    Connections,

    /// Register a new connection.
    Connect(ConnectArgs),

    /// List the tables of a connection.
    Schema {
        #[arg(value_name = "CONNECTION_ID")]
        connection_id: String,
    },

    /// Preview rows of a table.
    Preview(PreviewArgs),

    /// Run a statistical probe on a table column.
    Stats(StatsArgs),

    /// Talk to the Python kernel.
    #[command(subcommand)]
    Python(PythonCommand),

    /// Run a .sql or .py file through the Script Lab.
    Run(RunArgs),
}

#[derive(Parser)]
pub struct ConnectArgs {
    /// Connection name shown in the explorer.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Database engine.
    #[arg(long = "engine", value_enum, default_value = "mysql")]
    pub engine: EngineArg,

    /// Host (default: localhost for server engines).
    #[arg(long = "host")]
    pub host: Option<String>,

    /// Port (default: the engine's standard port).
    #[arg(long = "port")]
    pub port: Option<u16>,

    /// Database name, or file path for duckdb/sqlite.
    #[arg(long = "database", value_name = "NAME_OR_PATH")]
    pub database: Option<String>,

    #[arg(long = "username")]
    pub username: Option<String>,

    #[arg(long = "password")]
    pub password: Option<String>,
}

#[derive(Parser)]
pub struct PreviewArgs {
    #[arg(value_name = "TABLE")]
    pub table: String,

    /// Rows to fetch (default: grid.preview_limit from settings).
    #[arg(long = "limit")]
    pub limit: Option<u32>,

    /// SQL WHERE expression, e.g. "grade = 'A'".
    #[arg(long = "filter", value_name = "EXPR")]
    pub filter: Option<String>,
}

#[derive(Parser)]
pub struct StatsArgs {
    #[arg(value_name = "TABLE")]
    pub table: String,

    /// Column to probe (default: stats.default_column from settings).
    #[arg(long = "column")]
    pub column: Option<String>,

    #[arg(long = "analysis", value_enum, default_value = "distribution")]
    pub analysis: AnalysisArg,
}

#[derive(Subcommand)]
pub enum PythonCommand {
    /// Run a Python file in the kernel session.
    Run {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// List variables bound in the kernel session.
    Vars,

    /// Publish a DataFrame variable as a SQL table.
    Publish {
        #[arg(value_name = "VAR")]
        var_name: String,

        /// Table name (default: the variable name).
        #[arg(long = "as", value_name = "TABLE")]
        table_name: Option<String>,
    },
}

#[derive(Parser)]
pub struct RunArgs {
    /// Script file; the extension picks the language.
    #[arg(value_name = "SCRIPT_FILE")]
    pub script: PathBuf,

    /// Fabricate SQL results locally instead of calling the backend.
    #[arg(long = "simulate")]
    pub simulate: bool,
}

/// Engines accepted by `connect --engine`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EngineArg {
    Mysql,
    Postgres,
    Clickhouse,
    Hive,
    Duckdb,
    Sqlite,
    Oracle,
    Mssql,
}

impl From<EngineArg> for DatabaseEngine {
    fn from(engine: EngineArg) -> Self {
        match engine {
            EngineArg::Mysql => Self::Mysql,
            EngineArg::Postgres => Self::Postgres,
            EngineArg::Clickhouse => Self::Clickhouse,
            EngineArg::Hive => Self::Hive,
            EngineArg::Duckdb => Self::Duckdb,
            EngineArg::Sqlite => Self::Sqlite,
            EngineArg::Oracle => Self::Oracle,
            EngineArg::Mssql => Self::Mssql,
        }
    }
}

/// Analysis types accepted by `stats --analysis`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AnalysisArg {
    Distribution,
    Missing,
    Outlier,
    Dupes,
}

impl From<AnalysisArg> for AnalysisType {
    fn from(analysis: AnalysisArg) -> Self {
        match analysis {
            AnalysisArg::Distribution => Self::Distribution,
            AnalysisArg::Missing => Self::Missing,
            AnalysisArg::Outlier => Self::Outlier,
            AnalysisArg::Dupes => Self::Dupes,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
