use chrono::NaiveDate;

/// ドメイン層のエラー型
/// 値オブジェクトの生成時のルール違反を表現する
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// 無効な料金（例: 0以下の1日あたり料金）
    InvalidPrice(String),
    /// 無効な期間（例: 開始日より前の終了日）
    InvalidDateRange(String),
    /// 通貨の不一致
    CurrencyMismatch,
    /// 無効な値
    InvalidValue(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::InvalidPrice(msg) => write!(f, "Invalid price: {}", msg),
            DomainError::InvalidDateRange(msg) => write!(f, "Invalid date range: {}", msg),
            DomainError::CurrencyMismatch => write!(f, "Currency mismatch"),
            DomainError::InvalidValue(msg) => write!(f, "Invalid value: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

/// 車両が利用できない理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailabilityReason {
    /// 事前予約期限を満たしていない
    InsufficientAdvanceNotice { earliest_start: NaiveDate },
    /// 指定期間はすでに予約されている
    AlreadyBooked,
}

impl std::fmt::Display for UnavailabilityReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnavailabilityReason::InsufficientAdvanceNotice { earliest_start } => write!(
                f,
                "bookings must start on or after {}",
                earliest_start.format("%Y-%m-%d")
            ),
            UnavailabilityReason::AlreadyBooked => {
                write!(f, "vehicle is already booked for the selected dates")
            }
        }
    }
}

/// 予約の却下理由
/// 利用者が入力を修正すれば解消できる検証エラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingRejection {
    #[error("Vehicle unavailable: {0}")]
    VehicleUnavailable(UnavailabilityReason),
    #[error("Rental period exceeds the maximum of {max_days} days")]
    RentalPeriodTooLong { max_days: i64 },
    #[error("Rental period is outside the supported calendar")]
    PeriodOutOfRange,
    #[error("Guest name is required")]
    MissingGuestName,
    #[error("Guest phone number is required")]
    MissingGuestPhone,
}

impl BookingRejection {
    /// 利用者向けの説明文を取得
    pub fn description(&self) -> String {
        match self {
            BookingRejection::VehicleUnavailable(UnavailabilityReason::InsufficientAdvanceNotice {
                earliest_start,
            }) => format!(
                "予約は事前に行う必要があります。{}以降の日付を選択してください",
                earliest_start.format("%Y-%m-%d")
            ),
            BookingRejection::VehicleUnavailable(UnavailabilityReason::AlreadyBooked) => {
                "この車両は選択された期間には利用できません".to_string()
            }
            BookingRejection::RentalPeriodTooLong { max_days } => {
                format!("レンタル期間は最大{}日までです", max_days)
            }
            BookingRejection::PeriodOutOfRange => {
                "選択された期間は予約できません。別の日付を選択してください".to_string()
            }
            BookingRejection::MissingGuestName => "お名前を入力してください".to_string(),
            BookingRejection::MissingGuestPhone => "電話番号を入力してください".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_display() {
        let rejection = BookingRejection::RentalPeriodTooLong { max_days: 7 };
        assert_eq!(
            rejection.to_string(),
            "Rental period exceeds the maximum of 7 days"
        );
        assert_eq!(
            BookingRejection::MissingGuestName.to_string(),
            "Guest name is required"
        );
    }

    #[test]
    fn test_advance_notice_description_contains_earliest_date() {
        let earliest_start = NaiveDate::from_ymd_opt(2026, 10, 25).unwrap();
        let rejection = BookingRejection::VehicleUnavailable(
            UnavailabilityReason::InsufficientAdvanceNotice { earliest_start },
        );
        assert!(rejection.description().contains("2026-10-25"));
        assert!(rejection.to_string().contains("2026-10-25"));
    }
}
