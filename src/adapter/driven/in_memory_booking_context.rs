use crate::domain::model::{BookingRecord, DateRange, User, VehicleId};
use crate::domain::port::{AvailabilityOracle, BookingStore, RepositoryError, UserSession};
use async_trait::async_trait;
use std::sync::RwLock;

/// インメモリ予約コンテキスト
/// ログイン中の利用者と予約記録をプロセス内に保持する
/// 空き状況は同じ車両の有効な予約との重なりで判定する
#[derive(Default)]
pub struct InMemoryBookingContext {
    current_user: RwLock<Option<User>>,
    bookings: RwLock<Vec<BookingRecord>>,
}

impl InMemoryBookingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// 利用者をログイン状態にする
    pub fn sign_in(&self, user: User) {
        if let Ok(mut current) = self.current_user.write() {
            *current = Some(user);
        }
    }

    /// ログアウトする
    pub fn sign_out(&self) {
        if let Ok(mut current) = self.current_user.write() {
            *current = None;
        }
    }

    fn conflicts(bookings: &[BookingRecord], vehicle_id: &VehicleId, period: &DateRange) -> bool {
        bookings.iter().any(|booking| {
            booking.vehicle_id() == vehicle_id
                && booking.status().holds_vehicle()
                && booking.period().overlaps(period)
        })
    }
}

impl UserSession for InMemoryBookingContext {
    fn current_user(&self) -> Option<User> {
        self.current_user
            .read()
            .ok()
            .and_then(|current| current.clone())
    }
}

impl AvailabilityOracle for InMemoryBookingContext {
    fn is_available(&self, vehicle_id: &VehicleId, start_date: &str, end_date: &str) -> bool {
        let Some(period) = DateRange::from_iso(start_date, end_date)
            .ok()
            .and_then(|period| period.normalized())
        else {
            return false;
        };
        match self.bookings.read() {
            Ok(bookings) => !Self::conflicts(&bookings, vehicle_id, &period),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingContext {
    /// 同じ車両の期間が重なる予約があれば記録を受け付けない
    async fn add_booking(
        &self,
        record: BookingRecord,
    ) -> Result<Option<BookingRecord>, RepositoryError> {
        let mut bookings = self.bookings.write().map_err(|e| {
            RepositoryError::OperationFailed(format!("予約の保存に失敗しました: {}", e))
        })?;

        if Self::conflicts(&bookings, record.vehicle_id(), &record.period()) {
            return Ok(None);
        }

        bookings.push(record.clone());
        Ok(Some(record))
    }

    async fn find_all(&self) -> Result<Vec<BookingRecord>, RepositoryError> {
        let bookings = self.bookings.read().map_err(|e| {
            RepositoryError::FetchFailed(format!("予約一覧の取得に失敗しました: {}", e))
        })?;
        Ok(bookings.clone())
    }

    async fn find_by_vehicle(
        &self,
        vehicle_id: &VehicleId,
    ) -> Result<Vec<BookingRecord>, RepositoryError> {
        let bookings = self.bookings.read().map_err(|e| {
            RepositoryError::FetchFailed(format!("予約一覧の取得に失敗しました: {}", e))
        })?;
        Ok(bookings
            .iter()
            .filter(|booking| booking.vehicle_id() == vehicle_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{
        BookingRequest, Money, RequesterIdentity, UserId, Vehicle,
    };
    use crate::domain::service::BookingEngine;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn vehicle(id: &str) -> Vehicle {
        Vehicle::new(
            VehicleId::new(id).unwrap(),
            "Audi".to_string(),
            "A3".to_string(),
            Money::eur(Decimal::from(90)),
            Vec::new(),
        )
        .unwrap()
    }

    fn record(context: &InMemoryBookingContext, vehicle_id: &str, start: NaiveDate, end: NaiveDate) -> BookingRecord {
        let request = BookingRequest::new(
            vehicle(vehicle_id),
            DateRange::new(start, end),
            RequesterIdentity::Guest {
                name: "Hugo".to_string(),
                phone: "0600000000".to_string(),
            },
        );
        BookingEngine::default()
            .evaluate_booking(&request, date(2026, 10, 18), context)
            .unwrap()
    }

    #[tokio::test]
    async fn test_stored_booking_blocks_overlapping_dates() {
        let context = InMemoryBookingContext::new();
        let booking = record(&context, "audi-a3", date(2026, 11, 1), date(2026, 11, 4));
        assert!(context.add_booking(booking).await.unwrap().is_some());

        assert!(!context.is_available(&VehicleId::new("audi-a3").unwrap(), "2026-11-03", "2026-11-05"));
        assert!(context.is_available(&VehicleId::new("audi-a3").unwrap(), "2026-11-04", "2026-11-06"));
        assert!(context.is_available(&VehicleId::new("audi-a4").unwrap(), "2026-11-01", "2026-11-04"));
    }

    #[tokio::test]
    async fn test_conflicting_insert_returns_none() {
        let context = InMemoryBookingContext::new();
        let first = record(&context, "audi-a3", date(2026, 11, 1), date(2026, 11, 4));
        let second = record(&context, "audi-a3", date(2026, 11, 2), date(2026, 11, 3));

        assert!(context.add_booking(first).await.unwrap().is_some());
        assert!(context.add_booking(second).await.unwrap().is_none());
        assert_eq!(context.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_by_vehicle() {
        let context = InMemoryBookingContext::new();
        let a3 = record(&context, "audi-a3", date(2026, 11, 1), date(2026, 11, 2));
        let a4 = record(&context, "audi-a4", date(2026, 11, 1), date(2026, 11, 2));
        context.add_booking(a3).await.unwrap();
        context.add_booking(a4).await.unwrap();

        let found = context
            .find_by_vehicle(&VehicleId::new("audi-a4").unwrap())
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].vehicle_id().as_str(), "audi-a4");
    }

    #[test]
    fn test_malformed_dates_are_unavailable() {
        let context = InMemoryBookingContext::new();
        assert!(!context.is_available(&VehicleId::new("audi-a3").unwrap(), "tomorrow", "2026-11-02"));
    }

    #[test]
    fn test_last_calendar_day_is_unavailable() {
        let context = InMemoryBookingContext::new();
        let last_day = NaiveDate::MAX.format("%Y-%m-%d").to_string();
        assert!(!context.is_available(&VehicleId::new("audi-a3").unwrap(), &last_day, &last_day));
    }

    #[test]
    fn test_sign_in_and_out() {
        let context = InMemoryBookingContext::new();
        assert!(context.current_user().is_none());

        let user = User::new(UserId::new(), "Inès".to_string(), None);
        context.sign_in(user.clone());
        assert_eq!(context.current_user(), Some(user));

        context.sign_out();
        assert!(context.current_user().is_none());
    }
}
