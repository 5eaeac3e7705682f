use crate::application::ApplicationError;
use crate::domain::model::{BookingRecord, VehicleId};
use crate::domain::port::BookingStore;
use std::sync::Arc;

/// 予約クエリサービス
/// 管理者向けの予約一覧を提供する
pub struct BookingQueryService {
    booking_store: Arc<dyn BookingStore>,
}

impl BookingQueryService {
    /// 新しい予約クエリサービスを作成
    ///
    /// # Arguments
    /// * `booking_store` - 予約ストア
    pub fn new(booking_store: Arc<dyn BookingStore>) -> Self {
        Self { booking_store }
    }

    /// すべての予約を取得
    pub async fn list_bookings(&self) -> Result<Vec<BookingRecord>, ApplicationError> {
        self.booking_store
            .find_all()
            .await
            .map_err(ApplicationError::from)
    }

    /// 指定された車両の予約を取得
    pub async fn list_bookings_for_vehicle(
        &self,
        vehicle_id: &VehicleId,
    ) -> Result<Vec<BookingRecord>, ApplicationError> {
        self.booking_store
            .find_by_vehicle(vehicle_id)
            .await
            .map_err(ApplicationError::from)
    }
}
