use serde::Serialize;

/// Least-squares line through a series indexed 0, 1, 2, ...
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
}

/// Direction of a series relative to its own scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
    InsufficientData,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Increasing => write!(f, "increasing ↗"),
            Self::Decreasing => write!(f, "decreasing ↘"),
            Self::Stable => write!(f, "stable →"),
            Self::InsufficientData => write!(f, "insufficient data"),
        }
    }
}

#[inline]
#[allow(clippy::cast_precision_loss)]
fn count_to_f64(count: usize) -> f64 {
    count as f64
}

/// Fit a line to `values`. Fewer than two points give a flat line at zero.
#[must_use]
pub fn trend_line(values: &[f64]) -> TrendLine {
    let n = values.len();
    if n < 2 {
        return TrendLine {
            slope: 0.0,
            intercept: 0.0,
        };
    }

    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2) = (0.0, 0.0, 0.0, 0.0);
    for (i, &y) in values.iter().enumerate() {
        let x = count_to_f64(i);
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    let n = count_to_f64(n);
    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_x2 - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / n;

    TrendLine { slope, intercept }
}

/// Classify a slope. The slope must exceed 5% of the series mean (and at
/// least 1) to count as a change.
#[must_use]
pub fn trend_direction(slope: f64, values: &[f64]) -> TrendDirection {
    if values.len() < 2 {
        return TrendDirection::InsufficientData;
    }

    let mean = values.iter().sum::<f64>() / count_to_f64(values.len());
    let threshold = (0.05 * mean).max(1.0);

    if slope > threshold {
        TrendDirection::Increasing
    } else if slope < -threshold {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_line_exact_fit() {
        let line = trend_line(&[1.0, 3.0, 5.0, 7.0]);
        assert!((line.slope - 2.0).abs() < 1e-9);
        assert!((line.intercept - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_trend_line_short_series() {
        let line = trend_line(&[42.0]);
        assert!(line.slope.abs() < f64::EPSILON);
        assert!(line.intercept.abs() < f64::EPSILON);
    }

    #[test]
    fn test_trend_direction() {
        let rising = [500.0, 600.0, 700.0];
        assert_eq!(
            trend_direction(trend_line(&rising).slope, &rising),
            TrendDirection::Increasing
        );

        let falling = [700.0, 600.0, 500.0];
        assert_eq!(
            trend_direction(trend_line(&falling).slope, &falling),
            TrendDirection::Decreasing
        );

        // 10/day is under 5% of a ~600 mean
        let flat = [600.0, 610.0, 620.0];
        assert_eq!(
            trend_direction(trend_line(&flat).slope, &flat),
            TrendDirection::Stable
        );

        assert_eq!(trend_direction(5.0, &[1.0]), TrendDirection::InsufficientData);
    }
}
