//! Analysis report: the presentation-ready bundle for one session.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::insight::Insight;
use crate::model::DerivedStudent;
use crate::statistics::{
    round_half_up, AggregateStats, Analysis, ChartPoint, PassFailCounts, RankedStudent,
};

/// Everything the analysis view renders, in one serializable value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Derived records in input order.
    pub students: Vec<DerivedStudent>,
    pub stats: AggregateStats,
    pub ranking: Vec<RankedStudent>,
    pub pass_fail: PassFailCounts,
    pub chart: Vec<ChartPoint>,
    /// Insight text, if one was requested.
    #[serde(default)]
    pub insight: Option<Insight>,
}

impl AnalysisReport {
    pub fn new(students: Vec<DerivedStudent>, analysis: Analysis) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            students,
            stats: analysis.stats,
            ranking: analysis.ranking,
            pass_fail: analysis.pass_fail,
            chart: analysis.chart,
            insight: None,
        }
    }

    pub fn with_insight(mut self, insight: Insight) -> Self {
        self.insight = Some(insight);
        self
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize report")
    }

    /// Render as a Markdown document.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        let s = &self.stats;

        md.push_str("# Class Performance Report\n\n");
        md.push_str(&format!(
            "_{} students, generated {}_\n\n",
            s.total,
            self.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        md.push_str("## Summary\n\n");
        md.push_str("| Avg Marks | Avg Attendance | Avg Study Hours | Pass Rate |\n");
        md.push_str("|---|---|---|---|\n");
        md.push_str(&format!(
            "| {}/100 | {}% | {}h | {}% |\n\n",
            s.avg_marks, s.avg_attendance, s.avg_study_hours, s.pass_rate
        ));
        md.push_str(&format!(
            "Passed: {}, Failed: {}\n\n",
            self.pass_fail.passed, self.pass_fail.failed
        ));

        md.push_str("## Ranking\n\n");
        md.push_str("| # | Name | Marks | Attendance | Score | Status |\n");
        md.push_str("|---|---|---|---|---|---|\n");
        for r in &self.ranking {
            md.push_str(&format!(
                "| {} | {} | {}% | {}% | {} pts | {} |\n",
                r.rank,
                escape_cell(&r.name),
                round_half_up(r.marks),
                r.attendance,
                round_half_up(r.performance_score),
                r.status
            ));
        }

        if let Some(insight) = &self.insight {
            md.push_str("\n## Insights\n\n");
            md.push_str(insight.display_text());
            md.push('\n');
        }

        md
    }
}

/// Keep pipes in names from breaking the table.
fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}
