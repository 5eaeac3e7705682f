use crate::domain::model::{BookingRecord, User, VehicleId};
use crate::domain::port::{AvailabilityOracle, BookingStore, RepositoryError, UserSession};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// 遅延を模擬する予約コンテキストのラッパー
/// 予約の保存に成功した後、指定時間待ってから結果を返す
pub struct SimulatedLatencyContext<C> {
    inner: Arc<C>,
    latency: Duration,
}

impl<C> SimulatedLatencyContext<C> {
    /// # Arguments
    /// * `inner` - 実際の処理を行うコンテキスト
    /// * `latency` - 保存成功後に待つ時間
    pub fn new(inner: Arc<C>, latency: Duration) -> Self {
        Self { inner, latency }
    }

    pub fn inner(&self) -> &Arc<C> {
        &self.inner
    }
}

impl<C: UserSession> UserSession for SimulatedLatencyContext<C> {
    fn current_user(&self) -> Option<User> {
        self.inner.current_user()
    }
}

impl<C: AvailabilityOracle> AvailabilityOracle for SimulatedLatencyContext<C> {
    fn is_available(&self, vehicle_id: &VehicleId, start_date: &str, end_date: &str) -> bool {
        self.inner.is_available(vehicle_id, start_date, end_date)
    }
}

#[async_trait]
impl<C: BookingStore> BookingStore for SimulatedLatencyContext<C> {
    async fn add_booking(
        &self,
        record: BookingRecord,
    ) -> Result<Option<BookingRecord>, RepositoryError> {
        let stored = self.inner.add_booking(record).await?;
        if stored.is_some() && !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(stored)
    }

    async fn find_all(&self) -> Result<Vec<BookingRecord>, RepositoryError> {
        self.inner.find_all().await
    }

    async fn find_by_vehicle(
        &self,
        vehicle_id: &VehicleId,
    ) -> Result<Vec<BookingRecord>, RepositoryError> {
        self.inner.find_by_vehicle(vehicle_id).await
    }
}
