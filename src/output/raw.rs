use super::error_line;
use crate::collector::ApplicationSummary;

/// The summary's structural form on one line
pub fn render(summary: &ApplicationSummary) -> String {
    format!("{:?}\n", summary)
}

// JSON serialization is not offered yet; say so and fall back to raw.
pub fn render_json(summary: &ApplicationSummary) -> String {
    let mut out = error_line("JSON not yet supported, printing raw");
    out.push_str(&render(summary));
    out
}
