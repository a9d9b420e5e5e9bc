use crate::config::analysis::MAX_TREND_DEGREE;
use crate::error::{AnalyzerError, Result};
use chrono::{DateTime, Duration, Utc};

/// Least-squares polynomial over whole days since the earliest point.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendCurve {
    pub degree: usize,
    origin: DateTime<Utc>,
    span_days: f64,
    /// Coefficients in ascending powers of `days / span_days`
    coefficients: Vec<f64>,
}

impl TrendCurve {
    pub fn fit(points: &[(DateTime<Utc>, f64)], degree: usize) -> Result<Self> {
        if degree == 0 || degree > MAX_TREND_DEGREE {
            return Err(AnalyzerError::Trend(format!(
                "Degree must be between 1 and {}, got {}",
                MAX_TREND_DEGREE, degree
            )));
        }
        if points.len() <= degree {
            return Err(AnalyzerError::Trend(format!(
                "Degree {} needs more than {} points, got {}",
                degree,
                degree,
                points.len()
            )));
        }

        let origin = points
            .iter()
            .map(|(date, _)| *date)
            .min()
            .ok_or_else(|| AnalyzerError::Trend("No points to fit".to_string()))?;
        let xs: Vec<f64> = points
            .iter()
            .map(|(date, _)| (*date - origin).num_days() as f64)
            .collect();
        let span_days = xs.iter().cloned().fold(0.0, f64::max);

        let mut distinct = xs.clone();
        distinct.sort_by(|a, b| a.total_cmp(b));
        distinct.dedup();
        if distinct.len() <= degree {
            return Err(AnalyzerError::Trend(format!(
                "Degree {} needs more than {} distinct days, got {}",
                degree,
                degree,
                distinct.len()
            )));
        }

        let scale = if span_days > 0.0 { span_days } else { 1.0 };
        let n = degree + 1;
        let mut matrix = vec![vec![0.0; n]; n];
        let mut rhs = vec![0.0; n];
        for (x, (_, y)) in xs.iter().zip(points) {
            let u = x / scale;
            let powers: Vec<f64> = (0..2 * n - 1).map(|p| u.powi(p as i32)).collect();
            for j in 0..n {
                for k in 0..n {
                    matrix[j][k] += powers[j + k];
                }
                rhs[j] += y * powers[j];
            }
        }

        let coefficients = Self::solve(matrix, rhs)?;
        log::info!("Fitted degree {} trend over {} points", degree, points.len());

        Ok(Self {
            degree,
            origin,
            span_days: scale,
            coefficients,
        })
    }

    pub fn origin(&self) -> DateTime<Utc> {
        self.origin
    }

    /// Value at `days` after the origin
    pub fn evaluate(&self, days: f64) -> f64 {
        let u = days / self.span_days;
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, c| acc * u + c)
    }

    /// `count` evenly spaced points from the first to the last fitted day.
    pub fn sample(&self, count: usize) -> Vec<(DateTime<Utc>, f64)> {
        let max_x = self.span_days;
        if count < 2 {
            return vec![(self.origin, self.evaluate(0.0))];
        }
        let step = max_x / (count - 1) as f64;
        (0..count)
            .map(|i| {
                let x = step * i as f64;
                (self.origin + Duration::days(x as i64), self.evaluate(x))
            })
            .collect()
    }

    /// Gaussian elimination with partial pivoting
    fn solve(mut matrix: Vec<Vec<f64>>, mut rhs: Vec<f64>) -> Result<Vec<f64>> {
        let n = rhs.len();
        for col in 0..n {
            let pivot = (col..n)
                .max_by(|&a, &b| matrix[a][col].abs().total_cmp(&matrix[b][col].abs()))
                .unwrap_or(col);
            if matrix[pivot][col].abs() < 1e-12 {
                return Err(AnalyzerError::Trend("Singular system, cannot fit trend".to_string()));
            }
            matrix.swap(col, pivot);
            rhs.swap(col, pivot);

            for row in col + 1..n {
                let factor = matrix[row][col] / matrix[col][col];
                for k in col..n {
                    matrix[row][k] -= factor * matrix[col][k];
                }
                rhs[row] -= factor * rhs[col];
            }
        }

        let mut solution = vec![0.0; n];
        for row in (0..n).rev() {
            let tail: f64 = (row + 1..n).map(|k| matrix[row][k] * solution[k]).sum();
            solution[row] = (rhs[row] - tail) / matrix[row][row];
        }
        Ok(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn series(f: impl Fn(f64) -> f64, days: i64) -> Vec<(DateTime<Utc>, f64)> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        (0..days)
            .map(|d| (start + Duration::days(d), f(d as f64)))
            .collect()
    }

    #[test]
    fn test_linear_fit_is_exact() {
        let points = series(|x| 3.0 + 2.0 * x, 10);
        let curve = TrendCurve::fit(&points, 1).unwrap();
        assert!((curve.evaluate(0.0) - 3.0).abs() < 1e-9);
        assert!((curve.evaluate(9.0) - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_quadratic_fit() {
        let points = series(|x| 1.0 - x + 0.5 * x * x, 30);
        let curve = TrendCurve::fit(&points, 2).unwrap();
        assert!((curve.evaluate(20.0) - 181.0).abs() < 1e-6);
    }

    #[test]
    fn test_sample_spans_the_data() {
        let points = series(|x| x, 11);
        let curve = TrendCurve::fit(&points, 1).unwrap();
        let sampled = curve.sample(5);
        assert_eq!(sampled.len(), 5);
        assert_eq!(sampled[0].0, points[0].0);
        assert_eq!(sampled[4].0, points[10].0);
        assert!((sampled[4].1 - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let points = series(|x| x, 2);
        assert!(TrendCurve::fit(&points, 0).is_err());
        assert!(TrendCurve::fit(&points, 2).is_err());
        assert!(TrendCurve::fit(&points, MAX_TREND_DEGREE + 1).is_err());

        let same_day = vec![(points[0].0, 1.0), (points[0].0, 2.0), (points[0].0, 3.0)];
        assert!(TrendCurve::fit(&same_day, 1).is_err());
    }
}
