//! Dashboard DTOs

use bitacora_core::AppError;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

/// Dashboard query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardParams {
    /// Reference day (`YYYY-MM-DD`), today in UTC when absent
    pub today: Option<String>,
}

impl DashboardParams {
    /// Resolve the reference day
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidInput` if `today` is not a `YYYY-MM-DD` date.
    pub fn reference_day(&self) -> Result<NaiveDate, AppError> {
        match self.today.as_deref() {
            None | Some("") => Ok(Utc::now().date_naive()),
            Some(day) => NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|e| {
                AppError::InvalidInput(format!("today must be YYYY-MM-DD, got {:?}: {}", day, e))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_day() {
        let params = DashboardParams {
            today: Some("2024-01-22".to_string()),
        };
        assert_eq!(
            params.reference_day().unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 22).unwrap()
        );

        assert!(DashboardParams::default().reference_day().is_ok());

        let params = DashboardParams {
            today: Some("22/01/2024".to_string()),
        };
        assert!(matches!(
            params.reference_day(),
            Err(AppError::InvalidInput(_))
        ));
    }
}
