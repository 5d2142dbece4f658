pub mod entities;
pub mod repositories;

use chrono::NaiveDate;
use sea_orm::DbErr;
use std::future::Future;
use std::time::Duration;

use crate::error::{AppError, Result};

/// Release dates travel as `DD.MM.YYYY` strings.
pub const RELEASE_DATE_FORMAT: &str = "%d.%m.%Y";

/// Run one storage round trip under its own deadline.
pub async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T>
where
    F: Future<Output = std::result::Result<T, DbErr>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(AppError::Timeout(limit)),
    }
}

/// Check that `value` is a real calendar date written as `DD.MM.YYYY`.
///
/// Day and month must be zero padded and the year must have four digits.
pub fn is_date(value: &str) -> Result<()> {
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'.',
            _ => b.is_ascii_digit(),
        });

    if !well_formed {
        return Err(AppError::BadRequest(format!(
            "release date '{}' is not in DD.MM.YYYY format",
            value
        )));
    }

    NaiveDate::parse_from_str(value, RELEASE_DATE_FORMAT)
        .map(|_| ())
        .map_err(|e| AppError::BadRequest(format!("release date '{}' is invalid: {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_padded_calendar_dates() {
        for date in ["16.07.2006", "01.01.1970", "29.02.2024", "31.12.9999"] {
            assert!(is_date(date).is_ok(), "{} should be accepted", date);
        }
    }

    #[test]
    fn rejects_malformed_dates() {
        for date in [
            "",
            "2006-07-16",
            "16.7.2006",
            "6.07.2006",
            "16.07.06",
            "16/07/2006",
            "16.07.2006 ",
            "aa.bb.cccc",
        ] {
            assert!(
                matches!(is_date(date), Err(AppError::BadRequest(_))),
                "{:?} should be rejected",
                date
            );
        }
    }

    #[test]
    fn rejects_impossible_dates() {
        for date in ["32.01.2020", "29.02.2023", "00.10.2020", "10.13.2020"] {
            assert!(is_date(date).is_err(), "{} should be rejected", date);
        }
    }

    #[tokio::test]
    async fn deadline_miss_is_a_timeout() {
        let slow = async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok::<_, DbErr>(())
        };

        let result = with_timeout(Duration::from_millis(10), slow).await;
        assert!(matches!(result, Err(AppError::Timeout(_))));
    }

    #[tokio::test]
    async fn storage_errors_pass_through() {
        let failing = async { Err::<(), _>(DbErr::Custom("boom".into())) };

        let result = with_timeout(Duration::from_secs(1), failing).await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }
}
