//! Command handlers.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use dsw_state::ScriptLanguage;
use dsw_workbench::settings::{load_settings, load_settings_from};
use dsw_workbench::{ScriptOutcome, Settings, SqlExecution, Workbench};
use tracing::{Instrument, info_span};

use crate::cli::{Cli, Command, ConnectArgs, PreviewArgs, PythonCommand, RunArgs, StatsArgs};
use crate::summary::{
    print_connections, print_preview, print_schema, print_session_tables, print_stats,
    print_variables,
};

/// Settings from `--config` (or the platform folder) with CLI overrides applied.
pub fn resolve_settings(cli: &Cli) -> Settings {
    let mut settings = match &cli.config {
        Some(path) => load_settings_from(path),
        None => load_settings(),
    };
    if let Some(url) = &cli.backend_url {
        settings.backend.base_url.clone_from(url);
    }
    if let Some(session) = &cli.session {
        settings.backend.session_id.clone_from(session);
    }
    settings
}

/// Run `command`. Returns the process exit code.
pub async fn dispatch(command: &Command, mut settings: Settings) -> Result<i32> {
    // The CLI prints its own session table list; no seeded demo rows.
    settings.demo.seed_demo_content = false;
    if let Command::Run(RunArgs { simulate: true, .. }) = command {
        settings.scripts.sql_execution = SqlExecution::Simulated;
    }
    if let Command::Preview(PreviewArgs { limit: Some(limit), .. }) = command {
        settings.grid.preview_limit = *limit;
    }

    let workbench = Workbench::connect(settings).context("create backend client")?;
    let backend = workbench.backend();

    match command {
        Command::Health => {
            let health = backend.health().await?;
            println!("{} (version {})", health.status, health.version);
            Ok(if health.is_ok() { 0 } else { 1 })
        }
        Command::Connections => {
            let connections = backend.list_connections().await?;
            print_connections(&connections);
            Ok(0)
        }
        Command::Connect(args) => run_connect(&workbench, args).await,
        Command::Schema { connection_id } => {
            let schema = backend.schema(connection_id).await?;
            print_schema(&schema);
            Ok(0)
        }
        Command::Preview(args) => run_preview(&workbench, args).await,
        Command::Stats(args) => run_stats(&workbench, args).await,
        Command::Python(PythonCommand::Run { file }) => {
            run_script(&workbench, file, Some(ScriptLanguage::Python)).await
        }
        Command::Python(PythonCommand::Vars) => {
            let variables = workbench.variable_explorer().refresh().await?;
            print_variables(&variables);
            Ok(0)
        }
        Command::Python(PythonCommand::Publish {
            var_name,
            table_name,
        }) => {
            let explorer = workbench.variable_explorer();
            let published = explorer.publish(var_name, table_name.clone()).await?;
            println!(
                "Published '{}' ({} rows x {} cols)",
                published.published_name, published.rows, published.cols
            );
            print_session_tables(&explorer.published_tables());
            Ok(0)
        }
        Command::Run(args) => run_script(&workbench, &args.script, None).await,
    }
}

async fn run_connect(workbench: &Workbench, args: &ConnectArgs) -> Result<i32> {
    let mut explorer = workbench.explorer();
    let mut form = explorer.connection_form();
    form.select_engine(args.engine.into());
    form.name.clone_from(&args.name);
    if let Some(host) = &args.host {
        form.host.clone_from(host);
    }
    if let Some(port) = args.port {
        form.port = port.to_string();
    }
    if let Some(database) = &args.database {
        form.database.clone_from(database);
    }
    if let Some(username) = &args.username {
        form.username.clone_from(username);
    }
    if let Some(password) = &args.password {
        form.password.clone_from(password);
    }

    match explorer.submit_connection(&mut form).await {
        Ok(connection) => {
            println!("Connected '{}' ({})", connection.name, connection.id);
            print_connections(explorer.connections());
            Ok(0)
        }
        Err(e) => Err(anyhow!(form.error().map_or_else(|| e.to_string(), str::to_string))),
    }
}

async fn run_preview(workbench: &Workbench, args: &PreviewArgs) -> Result<i32> {
    workbench.open_dataset(args.table.as_str());
    let mut grid = workbench.data_grid();
    let loaded = match &args.filter {
        Some(filter) => {
            grid.set_filter(filter.as_str());
            grid.refresh().await
        }
        None => grid.sync().await,
    };
    if !loaded {
        bail!(grid.last_error().unwrap_or("preview failed").to_string());
    }
    if let Some(preview) = grid.grid() {
        print_preview(preview);
    }
    Ok(0)
}

async fn run_stats(workbench: &Workbench, args: &StatsArgs) -> Result<i32> {
    workbench.open_dataset(args.table.as_str());
    workbench.toolkit().select_tool(args.analysis.into());
    let mut stats = workbench.stats();
    if let Some(column) = &args.column {
        stats.set_column(column.as_str());
    }
    stats.sync().await;
    match stats.result() {
        Some(result) => {
            print_stats(result, stats.type_label());
            Ok(0)
        }
        None => bail!(stats.last_error().unwrap_or("stats request failed").to_string()),
    }
}

/// Load `path` into a new Script Lab buffer and run it.
///
/// The language comes from `language` or the file extension. The output
/// pane is printed either way; kernel and backend errors exit with status 1.
pub async fn run_script(
    workbench: &Workbench,
    path: &Path,
    language: Option<ScriptLanguage>,
) -> Result<i32> {
    let language = match language {
        Some(language) => language,
        None => path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ScriptLanguage::from_extension)
            .ok_or_else(|| anyhow!("{}: expected a .sql or .py file", path.display()))?,
    };
    let content =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;

    let span = info_span!("run_script", path = %path.display(), %language);
    async {
        let mut lab = workbench.script_lab();
        lab.add_script(language);
        lab.edit_active(content);

        let result = lab.run().await;
        if let Some(output) = lab.output() {
            println!("{output}");
        }
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::debug!(error = %e, "script run failed");
                return Ok(1);
            }
        };
        if matches!(outcome, ScriptOutcome::Table { .. }) {
            print_session_tables(&workbench.session().tables());
        }
        Ok(if matches!(outcome, ScriptOutcome::Failed(_)) { 1 } else { 0 })
    }
    .instrument(span)
    .await
}
