//! Plain-text run summary printed at the end of a run.

use jobfeed_ingest::RunSummary;

const RULE_WIDTH: usize = 60;
const TITLE_CHARS: usize = 60;

pub(crate) fn render_summary(summary: &RunSummary) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![
        rule.clone(),
        format!("run {} (source: {})", summary.run_id, summary.source),
        rule.clone(),
        format!("{:<14}{}", "acquired", summary.acquired),
    ];

    if summary.dry_run {
        lines.push(format!(
            "{:<14}{} planned, nothing submitted (dry run)",
            "batches", summary.batches_planned
        ));
    } else {
        lines.push(format!("{:<14}{}", "processed", summary.processed));
        lines.push(format!("{:<14}{}", "failed", summary.failed));
        lines.push(format!(
            "{:<14}{:.1}%",
            "success rate",
            summary.success_rate()
        ));
        lines.push(format!(
            "{:<14}{} submitted, {} rejected",
            "batches",
            summary.batches_submitted,
            summary.rejected_batches.len()
        ));
    }
    lines.push(format!(
        "{:<14}{}",
        "snapshot",
        summary.snapshot_path.display()
    ));
    lines.push(format!(
        "{:<14}{}",
        "finished",
        summary.finished_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    if !summary.rejected_batches.is_empty() {
        lines.push(String::new());
        lines.push("rejected batches:".to_string());
        for rejected in &summary.rejected_batches {
            lines.push(format!(
                "  - batch {} ({} records): {}",
                rejected.batch, rejected.size, rejected.reason
            ));
        }
    }

    if !summary.sample_failures.is_empty() {
        lines.push(String::new());
        lines.push("first item failures:".to_string());
        for failure in &summary.sample_failures {
            lines.push(format!(
                "  - {}: {}",
                truncate_title(&failure.title),
                failure.error
            ));
        }
    }

    lines.push(rule);
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn truncate_title(title: &str) -> String {
    if title.chars().count() > TITLE_CHARS {
        format!("{}...", title.chars().take(TITLE_CHARS).collect::<String>())
    } else {
        title.to_string()
    }
}
