//! Markdown table rendering

use super::state::ChainState;

/// Widest free-text cell, ellipsis included
pub const TABLE_CELL_CHARS: usize = 80;

const ELLIPSIS: &str = "...";

/// Clips `text` to [`TABLE_CELL_CHARS`] and escapes pipes.
fn cell(text: &str) -> String {
    let clipped = if text.chars().count() > TABLE_CELL_CHARS {
        let head: String = text.chars().take(TABLE_CELL_CHARS - ELLIPSIS.len()).collect();
        format!("{}{}", head, ELLIPSIS)
    } else {
        text.to_string()
    };
    clipped.replace('|', "\\|")
}

/// First two entries joined with "; "
fn summary(items: &[String]) -> String {
    items.iter().take(2).map(String::as_str).collect::<Vec<_>>().join("; ")
}

pub(crate) fn render_table(state: &ChainState) -> String {
    let mut rows = vec![
        "| Component | Value |".to_string(),
        "|-----------|-------|".to_string(),
    ];

    if let Some(data) = state.data() {
        rows.push(format!("| **DATA** | {} |", cell(&summary(data.facts()))));
    }
    if let Some(claim) = state.claim() {
        rows.push(format!("| **CLAIM** | {} |", cell(claim.statement())));
    }
    if let Some(warrant) = state.warrant() {
        rows.push(format!(
            "| **WARRANT** | {} [{}] |",
            cell(warrant.principle()),
            warrant.strength()
        ));
    }
    if let Some(backing) = state.backing() {
        rows.push(format!(
            "| **BACKING** | {} [{}] |",
            cell(backing.authority()),
            backing.strength()
        ));
    }
    if let Some(rebuttal) = state.rebuttal() {
        rows.push(format!(
            "| **REBUTTAL** | {} [{}] |",
            cell(&summary(rebuttal.exceptions())),
            rebuttal.strength()
        ));
    }
    if let Some(qualifier) = state.qualifier() {
        rows.push(format!(
            "| **QUALIFIER** | {} ({}%) |",
            qualifier.degree(),
            qualifier.confidence_pct()
        ));
    }
    if let Some(verdict) = state.verdict() {
        rows.push(format!(
            "| **VERDICT** | {}: {} |",
            verdict.status(),
            cell(verdict.final_statement())
        ));
    }

    rows.join("\n")
}
