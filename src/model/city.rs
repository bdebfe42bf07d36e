use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

/// Contribution-base bracket and employer rate for one city in one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "city_name": "Foshan",
        "year": "2024",
        "base_min": 4546.0,
        "base_max": 26421.0,
        "rate": 0.14
    })
)]
pub struct CityStandard {
    #[schema(example = "Foshan")]
    pub city_name: String,

    /// `YYYY`
    #[schema(example = "2024")]
    pub year: String,

    #[schema(example = 4546.0)]
    pub base_min: f64,

    #[schema(example = 26421.0)]
    pub base_max: f64,

    /// Employer share, a fraction in `(0, 1]`.
    #[schema(example = 0.14)]
    pub rate: f64,
}

impl CityStandard {
    /// Rejects brackets the calculator could not clamp against sensibly.
    pub fn validate(&self) -> Result<(), AppError> {
        let invalid = |reason: String| Err(AppError::InvalidStandard { reason });

        if !self.base_min.is_finite() || !self.base_max.is_finite() || !self.rate.is_finite() {
            return invalid(format!(
                "{} {}: bounds and rate must be finite numbers",
                self.city_name, self.year
            ));
        }
        if self.base_min < 0.0 {
            return invalid(format!(
                "{} {}: base_min {} is negative",
                self.city_name, self.year, self.base_min
            ));
        }
        if self.base_max < self.base_min {
            return invalid(format!(
                "{} {}: base_max {} is below base_min {}",
                self.city_name, self.year, self.base_max, self.base_min
            ));
        }
        if self.rate <= 0.0 || self.rate > 1.0 {
            return invalid(format!(
                "{} {}: rate {} is outside (0, 1]",
                self.city_name, self.year, self.rate
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard(base_min: f64, base_max: f64, rate: f64) -> CityStandard {
        CityStandard {
            city_name: "Foshan".into(),
            year: "2024".into(),
            base_min,
            base_max,
            rate,
        }
    }

    #[test]
    fn accepts_sane_bracket() {
        assert!(standard(5000.0, 20000.0, 0.16).validate().is_ok());
        // degenerate bracket and full rate are allowed
        assert!(standard(5000.0, 5000.0, 1.0).validate().is_ok());
    }

    #[test]
    fn rejects_inverted_bracket() {
        let err = standard(20000.0, 5000.0, 0.16).validate().unwrap_err();
        assert!(matches!(err, AppError::InvalidStandard { .. }));
        assert!(err.to_string().contains("below base_min"));
    }

    #[test]
    fn rejects_rate_out_of_range() {
        assert!(standard(5000.0, 20000.0, 0.0).validate().is_err());
        assert!(standard(5000.0, 20000.0, 1.5).validate().is_err());
        assert!(standard(5000.0, 20000.0, -0.1).validate().is_err());
    }

    #[test]
    fn rejects_negative_or_nan_bounds() {
        assert!(standard(-1.0, 20000.0, 0.16).validate().is_err());
        assert!(standard(f64::NAN, 20000.0, 0.16).validate().is_err());
        assert!(standard(5000.0, f64::INFINITY, 0.16).validate().is_err());
    }
}
