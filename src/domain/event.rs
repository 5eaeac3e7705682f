use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::domain::model::{BookingId, BookingRecord, DateRange, Money, VehicleId};

/// ドメインイベント列挙型
/// ビジネス上の重要なイベントを表現する
#[derive(Debug, Clone)]
pub enum DomainEvent {
    /// 予約が登録された
    BookingPlaced(BookingPlaced),
}

impl DomainEvent {
    /// イベント種別名
    pub fn event_type(&self) -> &'static str {
        match self {
            DomainEvent::BookingPlaced(_) => "BookingPlaced",
        }
    }
}

/// 予約登録イベント
#[derive(Debug, Clone)]
pub struct BookingPlaced {
    /// 予約ID
    pub booking_id: BookingId,
    /// 車両ID
    pub vehicle_id: VehicleId,
    /// 車両の表示名
    pub vehicle_name: String,
    /// レンタル期間
    pub period: DateRange,
    /// 合計金額
    pub amount: Money,
    /// ゲスト予約か（管理者からの連絡が必要）
    pub guest_booking: bool,
    /// 相関ID
    pub correlation_id: Uuid,
    /// イベント発生日時
    pub occurred_at: DateTime<Utc>,
}

impl BookingPlaced {
    /// 保存済みの予約記録から予約登録イベントを作成
    pub fn from_record(record: &BookingRecord, correlation_id: Uuid) -> Self {
        Self {
            booking_id: record.id(),
            vehicle_id: record.vehicle_id().clone(),
            vehicle_name: record.vehicle_name().to_string(),
            period: record.period(),
            amount: record.amount(),
            guest_booking: record.is_guest_booking(),
            correlation_id,
            occurred_at: Utc::now(),
        }
    }
}
