use crate::data::ConsumptionKind;
use crate::engines::analysis::{parse_threshold, QueryOp, QueryResult, Subtable};
use crate::engines::trend::TrendCurve;
use crate::error::Result;
use crate::session::Session;
use chrono::{DateTime, Utc};

/// All statistics for one range and consumption kind
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub kind: ConsumptionKind,
    pub minimum: QueryResult,
    pub maximum: QueryResult,
    pub average: QueryResult,
    pub above: Option<QueryResult>,
    pub below: Option<QueryResult>,
    pub threshold: Option<f64>,
}

/// Period points with an optional sampled trend
#[derive(Debug, Clone)]
pub struct PlotData {
    pub period: Subtable,
    pub trend: Option<Vec<(DateTime<Utc>, f64)>>,
}

pub struct AnalysisRunner;

impl AnalysisRunner {
    /// Threshold counts are skipped when the threshold text is blank.
    pub fn run(
        session: &Session,
        start: &str,
        end: &str,
        kind: ConsumptionKind,
        threshold_text: &str,
    ) -> Result<AnalysisReport> {
        let threshold = if threshold_text.trim().is_empty() {
            None
        } else {
            Some(parse_threshold(threshold_text)?)
        };

        let minimum = session.query(start, end, kind, QueryOp::Minimum)?;
        let maximum = session.query(start, end, kind, QueryOp::Maximum)?;
        let average = session.query(start, end, kind, QueryOp::Average)?;
        let (above, below) = match threshold {
            Some(t) => (
                Some(session.query(start, end, kind, QueryOp::CountAbove(t))?),
                Some(session.query(start, end, kind, QueryOp::CountBelow(t))?),
            ),
            None => (None, None),
        };

        Ok(AnalysisReport {
            kind,
            minimum,
            maximum,
            average,
            above,
            below,
            threshold,
        })
    }

    /// `None` when the period holds no values. A trend that cannot be fitted is logged and left out.
    pub fn plot_data(
        session: &Session,
        start: &str,
        end: &str,
        kind: ConsumptionKind,
        trend_degree: Option<usize>,
    ) -> Result<Option<PlotData>> {
        let period = match session.query(start, end, kind, QueryOp::Extract)? {
            QueryResult::Subtable(subtable) => subtable,
            _ => return Ok(None),
        };

        let trend = trend_degree.and_then(|degree| match TrendCurve::fit(&period.points, degree) {
            Ok(curve) => Some(curve.sample(session.config().analysis.trend_points)),
            Err(e) => {
                log::warn!("Trend not available: {}", e);
                None
            }
        });

        Ok(Some(PlotData { period, trend }))
    }

    /// One display line per result
    pub fn describe(result: &QueryResult) -> String {
        match result {
            QueryResult::Extreme { value, date } => {
                format!("{:.2} on {}", value, date.format("%Y-%m-%d"))
            }
            QueryResult::Scalar(value) => format!("{:.2}", value),
            QueryResult::Count(n) => format!("{} days", n),
            QueryResult::Subtable(subtable) => format!("{} points", subtable.len()),
            QueryResult::NoData => "No data".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyzerError;

    fn session() -> Session {
        let mut session = Session::default();
        session
            .load_csv(
                b"date,electricity_consumption,gas_consumption\n\
                  2024-12-01,10,1\n2024-12-02,5,2\n2024-12-03,20,3\n",
            )
            .unwrap();
        session
    }

    #[test]
    fn test_report_with_threshold() {
        let report = AnalysisRunner::run(
            &session(),
            "2024-12-01",
            "2024-12-03",
            ConsumptionKind::Electricity,
            "10",
        )
        .unwrap();
        assert!(matches!(report.minimum, QueryResult::Extreme { value, .. } if value == 5.0));
        assert!(matches!(report.maximum, QueryResult::Extreme { value, .. } if value == 20.0));
        assert_eq!(report.above, Some(QueryResult::Count(1)));
        assert_eq!(report.below, Some(QueryResult::Count(1)));
    }

    #[test]
    fn test_blank_threshold_skips_counts() {
        let report =
            AnalysisRunner::run(&session(), "2024-12-01", "2024-12-03", ConsumptionKind::Gas, "")
                .unwrap();
        assert!(report.above.is_none());
        assert_eq!(report.average, QueryResult::Scalar(2.0));
    }

    #[test]
    fn test_bad_threshold_is_rejected() {
        let err = AnalysisRunner::run(
            &session(),
            "2024-12-01",
            "2024-12-03",
            ConsumptionKind::Gas,
            "abc",
        )
        .unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidThreshold(_)));
    }

    #[test]
    fn test_plot_data_with_trend() {
        let plot = AnalysisRunner::plot_data(
            &session(),
            "2024-12-01",
            "2024-12-03",
            ConsumptionKind::Gas,
            Some(1),
        )
        .unwrap()
        .unwrap();
        assert_eq!(plot.period.len(), 3);
        assert_eq!(plot.trend.map(|t| t.len()), Some(100));
    }

    #[test]
    fn test_plot_data_without_fittable_trend() {
        let plot = AnalysisRunner::plot_data(
            &session(),
            "2024-12-01",
            "2024-12-02",
            ConsumptionKind::Gas,
            Some(3),
        )
        .unwrap()
        .unwrap();
        assert_eq!(plot.period.len(), 2);
        assert!(plot.trend.is_none());
    }

    #[test]
    fn test_plot_data_empty_period() {
        let plot = AnalysisRunner::plot_data(
            &session(),
            "2025-01-01",
            "2025-01-31",
            ConsumptionKind::Gas,
            None,
        )
        .unwrap();
        assert!(plot.is_none());
    }

    #[test]
    fn test_describe() {
        assert_eq!(AnalysisRunner::describe(&QueryResult::NoData), "No data");
        assert_eq!(AnalysisRunner::describe(&QueryResult::Count(0)), "0 days");
    }
}
