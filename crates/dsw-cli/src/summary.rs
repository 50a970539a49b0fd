//! Terminal tables for command output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dsw_gateway::{
    ChartPoint, Connection, DatabaseSchema, PreviewResponse, RuntimeVariable, StatsResponse,
};
use dsw_state::SessionTable;
use dsw_workbench::panels::{NO_CONNECTIONS, NO_SESSION_TABLES, NO_TABLES, NO_VARIABLES};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn connections_table(connections: &[Connection]) -> Table {
    let mut table = styled(&["ID", "Name", "Engine", "Status"]);
    for connection in connections {
        let engine = connection
            .engine()
            .map_or_else(|| connection.engine.clone(), |e| e.label().to_string());
        table.add_row(vec![
            Cell::new(&connection.id),
            Cell::new(&connection.name).add_attribute(Attribute::Bold),
            Cell::new(engine),
            status_cell(connection.status.as_deref()),
        ]);
    }
    table
}

pub fn schema_table(schema: &DatabaseSchema) -> Table {
    let mut table = styled(&["Table", "Columns"]);
    for entry in &schema.tables {
        let columns: Vec<String> = entry
            .columns
            .iter()
            .map(|c| {
                if c.is_pk {
                    format!("{} {} (pk)", c.name, c.data_type)
                } else {
                    format!("{} {}", c.name, c.data_type)
                }
            })
            .collect();
        table.add_row(vec![
            Cell::new(&entry.name).add_attribute(Attribute::Bold),
            Cell::new(columns.join("\n")),
        ]);
    }
    table
}

pub fn preview_table(preview: &PreviewResponse) -> Table {
    let headers: Vec<&str> = preview.columns.iter().map(|c| c.header_name.as_str()).collect();
    let mut table = styled(&headers);
    for row in 0..preview.data.len() {
        table.add_row(
            preview
                .columns
                .iter()
                .map(|c| Cell::new(preview.cell_text(row, &c.field))),
        );
    }
    table
}

pub fn stats_table(stats: &StatsResponse) -> Table {
    let mut table = styled(&["Label", "Value"]);
    align_column(&mut table, 1, CellAlignment::Right);
    for ChartPoint { label, value } in stats.points() {
        let value = value.map_or_else(|| dim_cell("-"), Cell::new);
        table.add_row(vec![Cell::new(label), value]);
    }
    table
}

pub fn variables_table(variables: &[RuntimeVariable]) -> Table {
    let mut table = styled(&["Variable", "Shape", "Columns"]);
    for variable in variables {
        let columns = variable
            .columns
            .as_ref()
            .map_or_else(String::new, |c| c.join(", "));
        table.add_row(vec![
            Cell::new(&variable.name).add_attribute(Attribute::Bold),
            Cell::new(variable.shape_label()),
            dim_cell(columns),
        ]);
    }
    table
}

pub fn session_table(tables: &[SessionTable]) -> Table {
    let mut table = styled(&["Session table", "Rows", "Created"]);
    align_column(&mut table, 1, CellAlignment::Right);
    for entry in tables {
        table.add_row(vec![
            Cell::new(&entry.name).add_attribute(Attribute::Bold),
            Cell::new(entry.row_count),
            dim_cell(entry.created_at.format("%Y-%m-%d %H:%M:%S")),
        ]);
    }
    table
}

pub fn print_connections(connections: &[Connection]) {
    if connections.is_empty() {
        println!("{NO_CONNECTIONS}");
    } else {
        println!("{}", connections_table(connections));
    }
}

pub fn print_schema(schema: &DatabaseSchema) {
    if schema.tables.is_empty() {
        println!("{NO_TABLES}");
    } else {
        println!("{}", schema_table(schema));
    }
}

pub fn print_preview(preview: &PreviewResponse) {
    println!("{}", preview_table(preview));
    println!("{} of {} rows", preview.data.len(), preview.row_count());
}

pub fn print_stats(stats: &StatsResponse, label: &str) {
    println!("{} [{label}]", stats.title);
    if !stats.is_heatmap() {
        println!("{}", stats_table(stats));
    }
    if let Some(summary) = stats.summary() {
        println!(
            "count={} missing={} mean={:.2} std={:.2} min={} max={}",
            summary.count, summary.missing, summary.mean, summary.std, summary.min, summary.max
        );
    }
}

pub fn print_variables(variables: &[RuntimeVariable]) {
    if variables.is_empty() {
        println!("{NO_VARIABLES}");
    } else {
        println!("{}", variables_table(variables));
    }
}

pub fn print_session_tables(tables: &[SessionTable]) {
    if tables.is_empty() {
        println!("{NO_SESSION_TABLES}");
    } else {
        println!("{}", session_table(tables));
    }
}

fn styled(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_header(headers.iter().map(|h| header_cell(h)));
    apply_table_style(&mut table);
    table
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(status: Option<&str>) -> Cell {
    match status {
        Some("connected") => Cell::new("connected").fg(Color::Green),
        Some(other) => Cell::new(other).fg(Color::Yellow),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
