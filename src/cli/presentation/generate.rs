//! Generate command presentation.

use super::shared::{format_section_heading, table, to_json};
use crate::orchestrator::GenerateReport;
use owo_colors::OwoColorize;

pub fn format_generate_report(report: &GenerateReport, format: &str) -> String {
    if format == "json" {
        return to_json(report);
    }

    let mut out = format!("{}\n", format_section_heading("Configurations"));
    let mut configs = table(vec!["Configuration", "Visible body", "Status"]);
    for config in &report.configurations {
        let status = if config.created { "created" } else { "reused" };
        configs.add_row(vec![config.name.as_str(), config.visible_body.as_str(), status]);
    }
    out.push_str(&format!("{}\n\n", configs));

    out.push_str(&format!("{}\n", format_section_heading("Sheets")));
    let mut sheets = table(vec!["Sheet", "Configuration", "Views"]);
    for sheet in &report.sheets {
        let views: Vec<String> = sheet.views.iter().map(|v| v.kind.to_string()).collect();
        sheets.add_row(vec![
            sheet.name.clone(),
            sheet.configuration.clone(),
            views.join(", "),
        ]);
    }
    out.push_str(&format!("{}\n", sheets));

    for skipped in &report.skipped_views {
        out.push_str(&format!(
            "\n{} {} view was not created on {}",
            "warning:".yellow(),
            skipped.kind,
            skipped.sheet
        ));
    }
    if !report.skipped_views.is_empty() {
        out.push('\n');
    }

    out.push_str(&format!(
        "\n{} {} sheet(s) in {}",
        "Generated".green(),
        report.sheets.len(),
        report.drawing.path.display()
    ));
    out
}
