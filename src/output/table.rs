use comfy_table::{Table, presets::ASCII_FULL};

use super::{RenderError, error_line};
use crate::collector::{ApplicationSummary, Storage};

/// Columns shown for every report
const DEFAULT_HEADERS: [&str; 8] = [
    "App",
    "Pods",
    "Service",
    "Ingress",
    "Storage",
    "Secrets",
    "ConfigMaps",
    "Nodes",
];

/// Extra columns appended with `--verbose`
const VERBOSE_HEADERS: [&str; 4] = ["Containers", "Namespace", "Labels", "Annotations"];

pub fn headers(verbose: bool) -> Vec<&'static str> {
    let mut headers = DEFAULT_HEADERS.to_vec();
    if verbose {
        headers.extend(VERBOSE_HEADERS);
    }
    headers
}

fn storage_cell(storage: &Storage) -> String {
    let kinds: Vec<String> = storage
        .kinds()
        .iter()
        .map(|(key, values)| format!("{:?}: {:?}", key, values))
        .collect();
    format!("{{{}}}", kinds.join(", "))
}

/// Cells for the single data row, in header order
pub fn row(summary: &ApplicationSummary, verbose: bool) -> Result<Vec<String>, RenderError> {
    let mut cells = vec![
        summary.app.clone(),
        format!("{:?}", summary.pods),
        format!("{:?}", summary.services),
        format!("{:?}", summary.ingress),
        storage_cell(&summary.storage),
        format!("{:?}", summary.secrets),
        format!("{:?}", summary.configs),
        format!("{:?}", summary.nodes),
    ];

    if verbose {
        let details = summary
            .details
            .as_ref()
            .ok_or(RenderError::MissingField("namespace"))?;
        cells.push(format!("{:?}", details.containers));
        cells.push(details.namespace.clone());
        cells.push(format!("{:?}", details.labels));
        cells.push(format!("{:?}", details.annotations));
    }

    Ok(cells)
}

/// One-row table. A row that cannot be built is reported above a header-only table.
pub fn render(summary: &ApplicationSummary, verbose: bool) -> String {
    let mut out = String::new();

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(headers(verbose));

    match row(summary, verbose) {
        Ok(cells) => {
            table.add_row(cells);
        }
        Err(e) => out.push_str(&error_line(&format!("Failed to add table row: {}", e))),
    }

    out.push_str(&table.to_string());
    out.push('\n');
    out
}
