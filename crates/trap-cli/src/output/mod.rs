use serde::Serialize;
use serde_json::Value;
use trap_core::QueryResponse;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Render a query response. As a table, every field is a column and row `i`
/// holds each field's `i`-th value; shorter fields leave `-` cells.
pub fn render_response(response: &QueryResponse, format: OutputFormat) -> anyhow::Result<String> {
    if format != OutputFormat::Table {
        return render(response, format);
    }

    let fields = response.fields().collect::<Vec<_>>();
    if fields.is_empty() {
        return Ok(String::from("(no fields)"));
    }

    let headers = fields.iter().map(|f| f.name.as_str()).collect::<Vec<_>>();
    let height = fields.iter().map(|f| f.values.len()).max().unwrap_or(0);
    if height == 0 {
        return Ok(format!("{}\n(no rows)", headers.join("  ")));
    }

    let rows = (0..height)
        .map(|i| {
            fields
                .iter()
                .map(|f| f.values.get(i).map_or_else(|| String::from("-"), |v| text_cell(v)))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    Ok(table::render_entity_table(&headers, &rows, options()))
}

/// Print a query response in the requested format.
pub fn output_response(response: &QueryResponse, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render_response(response, format)?;
    println!("{rendered}");
    Ok(())
}

fn options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => Ok(render_array_table(&items)),
        Value::Object(map) => {
            let headers = ["key", "value"];
            let rows = map
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&headers, &rows, options()))
        }
        scalar => {
            let headers = ["value"];
            let rows = vec![vec![value_to_cell(&scalar)]];
            Ok(table::render_entity_table(&headers, &rows, options()))
        }
    }
}

fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let headers = ["value"];
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&headers, &rows, options());
    }

    // Columns in first-seen key order.
    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| {
                    map.get(header)
                        .map_or_else(|| String::from("-"), value_to_cell)
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, options())
}

/// Field values are JSON text; show strings without their quotes.
fn text_cell(raw: &str) -> String {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => value_to_cell(&value),
        Err(_) => raw.to_string(),
    }
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("null"),
        Value::String(v) => v.clone(),
        other => other.to_string(),
    }
}
