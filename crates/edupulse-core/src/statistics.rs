//! Group statistics and chart-ready projections.
//!
//! Everything here is computed from a non-empty slice of derived records.
//! Empty input yields [`AnalysisView::Empty`] (or `None`) instead of a
//! division by zero, so callers can branch to an empty-state screen.

use serde::{Deserialize, Serialize};

use crate::model::{DerivedStudent, Status};

/// Round half up to an integer, matching the browser's `Math.round`.
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Round half up to one decimal place.
pub fn round_to_tenth(x: f64) -> f64 {
    round_half_up(x * 10.0) / 10.0
}

/// Group averages and pass rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Average marks, one decimal.
    pub avg_marks: f64,
    /// Average attendance, one decimal.
    pub avg_attendance: f64,
    /// Average daily study hours, one decimal.
    pub avg_study_hours: f64,
    /// Whole-number percentage of passing students.
    pub pass_rate: u32,
    /// Number of students.
    pub total: usize,
}

/// Pass/fail proportion for the pie chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassFailCounts {
    pub passed: usize,
    pub failed: usize,
}

/// One row of the ranking table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedStudent {
    /// 1-based position.
    pub rank: usize,
    pub name: String,
    pub marks: f64,
    pub attendance: f64,
    pub study_hours: f64,
    pub performance_score: f64,
    pub status: Status,
}

/// One point of the per-student charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub name: String,
    pub marks: f64,
    pub attendance: f64,
    pub study_hours: f64,
    /// Performance score rounded to a whole number.
    pub score: f64,
}

/// Everything the analysis view shows apart from the insight text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub stats: AggregateStats,
    pub ranking: Vec<RankedStudent>,
    pub pass_fail: PassFailCounts,
    pub chart: Vec<ChartPoint>,
}

/// Either a populated analysis or the empty state.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisView {
    Empty,
    Ready(Analysis),
}

/// Compute the full analysis, or [`AnalysisView::Empty`] for no students.
pub fn analyze(students: &[DerivedStudent]) -> AnalysisView {
    let Some(stats) = compute_aggregate_stats(students) else {
        return AnalysisView::Empty;
    };

    AnalysisView::Ready(Analysis {
        stats,
        ranking: rank_students(students),
        pass_fail: pass_fail_counts(students),
        chart: chart_points(students),
    })
}

/// Compute averages and pass rate. `None` when `students` is empty.
pub fn compute_aggregate_stats(students: &[DerivedStudent]) -> Option<AggregateStats> {
    if students.is_empty() {
        return None;
    }

    let n = students.len() as f64;
    let mean = |f: fn(&DerivedStudent) -> f64| students.iter().map(f).sum::<f64>() / n;

    let avg_marks = mean(|s| s.student.marks);
    let avg_attendance = mean(|s| s.student.attendance);
    let avg_study_hours = mean(|s| s.student.study_hours);
    let passed = pass_fail_counts(students).passed as f64;

    Some(AggregateStats {
        avg_marks: round_to_tenth(avg_marks),
        avg_attendance: round_to_tenth(avg_attendance),
        avg_study_hours: round_to_tenth(avg_study_hours),
        pass_rate: round_half_up(passed / n * 100.0) as u32,
        total: students.len(),
    })
}

/// Count passing and failing students.
pub fn pass_fail_counts(students: &[DerivedStudent]) -> PassFailCounts {
    let passed = students.iter().filter(|s| s.status.is_pass()).count();
    PassFailCounts {
        passed,
        failed: students.len() - passed,
    }
}

/// Sort descending by performance score.
///
/// The sort is stable, so equal scores keep their input order.
pub fn rank_students(students: &[DerivedStudent]) -> Vec<RankedStudent> {
    let mut order: Vec<&DerivedStudent> = students.iter().collect();
    order.sort_by(|a, b| b.performance_score.total_cmp(&a.performance_score));

    order
        .into_iter()
        .enumerate()
        .map(|(i, s)| RankedStudent {
            rank: i + 1,
            name: s.student.name.clone(),
            marks: s.student.marks,
            attendance: s.student.attendance,
            study_hours: s.student.study_hours,
            performance_score: s.performance_score,
            status: s.status,
        })
        .collect()
}

/// Per-student chart points, in input order.
pub fn chart_points(students: &[DerivedStudent]) -> Vec<ChartPoint> {
    students
        .iter()
        .map(|s| ChartPoint {
            name: s.student.name.clone(),
            marks: s.student.marks,
            attendance: s.student.attendance,
            study_hours: s.student.study_hours,
            score: round_half_up(s.performance_score),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawStudent;
    use crate::scoring::derive_all;

    fn derived(rows: &[(&str, f64, f64, f64)]) -> Vec<DerivedStudent> {
        let raw: Vec<RawStudent> = rows
            .iter()
            .map(|(n, m, a, h)| RawStudent::new(*n, *m, *a, *h))
            .collect();
        derive_all(&raw)
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(66.4), 66.0);
        assert_eq!(round_to_tenth(3.25), 3.3);
        assert_eq!(round_to_tenth(7.0), 7.0);
    }

    #[test]
    fn empty_input_is_empty_state() {
        assert_eq!(analyze(&[]), AnalysisView::Empty);
        assert!(compute_aggregate_stats(&[]).is_none());
    }

    #[test]
    fn averages_and_pass_rate() {
        let students = derived(&[
            ("Alice", 85.0, 92.0, 4.5),
            ("Bob", 40.0, 80.0, 1.0),
            ("Carol", 70.0, 60.0, 2.0),
        ]);
        let stats = compute_aggregate_stats(&students).unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.avg_marks, 65.0);
        assert_eq!(stats.avg_attendance, 77.3);
        assert_eq!(stats.avg_study_hours, 2.5);
        // 1 of 3 passes.
        assert_eq!(stats.pass_rate, 33);
    }

    #[test]
    fn pass_rate_rounds_half_up() {
        let students = derived(&[
            ("A", 90.0, 90.0, 1.0),
            ("B", 90.0, 90.0, 1.0),
            ("C", 90.0, 90.0, 1.0),
            ("D", 10.0, 10.0, 1.0),
            ("E", 90.0, 90.0, 1.0),
            ("F", 90.0, 90.0, 1.0),
            ("G", 10.0, 10.0, 1.0),
            ("H", 10.0, 10.0, 1.0),
        ]);
        // 5/8 = 62.5%
        assert_eq!(compute_aggregate_stats(&students).unwrap().pass_rate, 63);
    }

    #[test]
    fn ranking_is_descending_and_stable() {
        let students = derived(&[
            ("Low", 10.0, 10.0, 0.0),
            ("TieFirst", 80.0, 90.0, 0.0),
            ("High", 100.0, 100.0, 0.0),
            ("TieSecond", 80.0, 90.0, 9.0),
        ]);
        let ranking = rank_students(&students);
        let names: Vec<&str> = ranking.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["High", "TieFirst", "TieSecond", "Low"]);
        let ranks: Vec<usize> = ranking.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, [1, 2, 3, 4]);
    }

    #[test]
    fn pass_fail_counts_cover_everyone() {
        let students = derived(&[
            ("A", 50.0, 75.0, 0.0),
            ("B", 49.0, 90.0, 0.0),
            ("C", 100.0, 74.0, 0.0),
        ]);
        assert_eq!(
            pass_fail_counts(&students),
            PassFailCounts {
                passed: 1,
                failed: 2
            }
        );
    }

    #[test]
    fn chart_scores_are_rounded() {
        let students = derived(&[("A", 81.0, 90.0, 3.0)]);
        // 56.7 + 27 = 83.7
        let chart = chart_points(&students);
        assert_eq!(chart[0].score, 84.0);
        assert_eq!(chart[0].study_hours, 3.0);
    }

    #[test]
    fn analyze_bundles_everything() {
        let students = derived(&[("A", 90.0, 90.0, 1.0), ("B", 20.0, 90.0, 1.0)]);
        let AnalysisView::Ready(analysis) = analyze(&students) else {
            panic!("expected populated analysis");
        };
        assert_eq!(analysis.stats.pass_rate, 50);
        assert_eq!(analysis.ranking.len(), 2);
        assert_eq!(analysis.chart.len(), 2);
        assert_eq!(analysis.pass_fail.failed, 1);
    }
}
