//! The `edupulse analyze` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use edupulse_core::insight::{Insight, InsightRequester, InsightSource, INSIGHT_FALLBACK};
use edupulse_core::model::DerivedStudent;
use edupulse_core::report::AnalysisReport;
use edupulse_core::session::Session;
use edupulse_core::statistics::{round_half_up, AnalysisView};
use edupulse_providers::config::load_config_from;
use edupulse_providers::create_provider;

pub async fn execute(
    input: PathBuf,
    format: String,
    no_insight: bool,
    model_override: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(
        matches!(format.as_str(), "text" | "json" | "markdown" | "md"),
        "unknown format '{format}' (expected text, json or markdown)"
    );
    if let Some(path) = &config_path {
        anyhow::ensure!(path.exists(), "config file not found: {}", path.display());
    }

    let text = std::fs::read_to_string(&input)
        .with_context(|| format!("failed to read roster file: {}", input.display()))?;

    let mut session = Session::new();
    let mut draft = session.open_entry();
    let count = draft.import_csv(&text)?;
    tracing::info!("imported {count} student(s) from {}", input.display());
    session.save(&mut draft)?;

    let students = session.derived();
    let analysis = match session.analysis() {
        AnalysisView::Ready(analysis) => analysis,
        AnalysisView::Empty => {
            println!("No student data yet. Add records on the data-entry screen first.");
            return Ok(());
        }
    };
    let mut report = AnalysisReport::new(students, analysis);

    if no_insight {
        tracing::debug!("insight request skipped by flag");
    } else if let Some(insight) =
        request_insight(&report.students, model_override, config_path).await
    {
        report = report.with_insight(insight);
    }

    match format.as_str() {
        "json" => println!("{}", report.to_json()?),
        "markdown" | "md" => println!("{}", report.to_markdown()),
        _ => print_text(&report),
    }

    Ok(())
}

/// Load the config and ask for an insight.
///
/// A config that cannot be read or parsed degrades to the fallback text
/// like any other insight failure. `None` means insights are turned off or
/// the response was superseded.
async fn request_insight(
    students: &[DerivedStudent],
    model_override: Option<String>,
    config_path: Option<PathBuf>,
) -> Option<Insight> {
    let config = match load_config_from(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("insight unavailable, config not loaded: {e:#}");
            return Some(Insight {
                sequence: 0,
                text: INSIGHT_FALLBACK.to_string(),
                source: InsightSource::Fallback,
            });
        }
    };
    if !config.insights {
        tracing::debug!("insights disabled in config");
        return None;
    }
    if !config.has_credential() {
        tracing::warn!("no API key configured; set EDUPULSE_API_KEY to enable insights");
    }

    let model = model_override.unwrap_or_else(|| config.model.clone());
    let mut requester = InsightRequester::new(Arc::from(create_provider(&config)), model);
    if let Some(limit) = config.request_timeout() {
        requester = requester.with_timeout(limit);
    }
    tracing::info!(model = requester.model(), "requesting insight");
    requester.request(students).await.into_current()
}

fn print_text(report: &AnalysisReport) {
    use comfy_table::{Cell, Table};

    let s = &report.stats;

    let mut summary = Table::new();
    summary.set_header(vec![
        "Students",
        "Avg Marks",
        "Avg Attendance",
        "Avg Study Hours",
        "Pass Rate",
    ]);
    summary.add_row(vec![
        Cell::new(s.total),
        Cell::new(format!("{}/100", s.avg_marks)),
        Cell::new(format!("{}%", s.avg_attendance)),
        Cell::new(format!("{}h", s.avg_study_hours)),
        Cell::new(format!("{}%", s.pass_rate)),
    ]);
    println!("{summary}");
    println!(
        "Passed: {}  Failed: {}\n",
        report.pass_fail.passed, report.pass_fail.failed
    );

    let mut ranking = Table::new();
    ranking.set_header(vec![
        "#",
        "Name",
        "Marks",
        "Attendance",
        "Study h/day",
        "Score",
        "Status",
    ]);
    for r in &report.ranking {
        ranking.add_row(vec![
            Cell::new(r.rank),
            Cell::new(&r.name),
            Cell::new(format!("{}%", round_half_up(r.marks))),
            Cell::new(format!("{}%", r.attendance)),
            Cell::new(r.study_hours),
            Cell::new(format!("{} pts", round_half_up(r.performance_score))),
            Cell::new(r.status),
        ]);
    }
    println!("{ranking}");

    if let Some(insight) = &report.insight {
        println!("\nInsights:\n{}", insight.display_text());
    }
}
