use crate::domain::error::BookingRejection;
use crate::domain::model::{BookingId, BookingStatus, DateRange, Money, UserId, Vehicle, VehicleId};
use serde::{Deserialize, Serialize};

/// 予約者の身元
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequesterIdentity {
    /// ログイン済みの利用者（電話番号は任意）
    Authenticated {
        user_id: UserId,
        phone: Option<String>,
    },
    /// ログインしていないゲスト（名前と電話番号を直接入力）
    Guest { name: String, phone: String },
}

impl RequesterIdentity {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, RequesterIdentity::Authenticated { .. })
    }
}

/// ゲスト予約者の連絡先
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestDetails {
    name: String,
    phone: String,
}

impl GuestDetails {
    /// 入力値の前後の空白を除去して作成
    /// 電話番号、名前の順に必須チェックを行う
    ///
    /// # Returns
    /// * `Ok(GuestDetails)` - 作成成功
    /// * `Err(BookingRejection::MissingGuestPhone)` - 電話番号が空
    /// * `Err(BookingRejection::MissingGuestName)` - 名前が空
    pub fn new(name: &str, phone: &str) -> Result<Self, BookingRejection> {
        let phone = phone.trim();
        if phone.is_empty() {
            return Err(BookingRejection::MissingGuestPhone);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(BookingRejection::MissingGuestName);
        }
        Ok(Self {
            name: name.to_string(),
            phone: phone.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}

/// 予約リクエスト
/// フォームの状態から一時的に組み立てられ、検証後に破棄される
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    vehicle: Vehicle,
    period: DateRange,
    identity: RequesterIdentity,
}

impl BookingRequest {
    pub fn new(vehicle: Vehicle, period: DateRange, identity: RequesterIdentity) -> Self {
        Self {
            vehicle,
            period,
            identity,
        }
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    /// 入力されたままの期間
    pub fn period(&self) -> DateRange {
        self.period
    }

    pub fn identity(&self) -> &RequesterIdentity {
        &self.identity
    }

    /// レンタル日数（最低1日）
    pub fn duration_days(&self) -> u32 {
        self.period.rental_days()
    }
}

/// 確定した予約の記録
/// 予約ストアに渡された後の寿命はストアが管理する
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    id: BookingId,
    vehicle_id: VehicleId,
    vehicle_name: String,
    image_url: Option<String>,
    period: DateRange,
    status: BookingStatus,
    amount: Money,
    user_id: Option<UserId>,
    guest: Option<GuestDetails>,
}

impl BookingRecord {
    /// 利用前ステータスの予約記録を作成
    /// ゲスト情報は未ログインの場合のみ保持する
    pub(crate) fn upcoming(
        vehicle: &Vehicle,
        period: DateRange,
        amount: Money,
        user_id: Option<UserId>,
        guest: Option<GuestDetails>,
    ) -> Self {
        Self {
            id: BookingId::new(),
            vehicle_id: vehicle.id().clone(),
            vehicle_name: vehicle.display_name(),
            image_url: vehicle.primary_image().map(str::to_string),
            period,
            status: BookingStatus::Upcoming,
            amount,
            user_id,
            guest,
        }
    }

    pub fn id(&self) -> BookingId {
        self.id
    }

    pub fn vehicle_id(&self) -> &VehicleId {
        &self.vehicle_id
    }

    /// 予約時点の車両表示名
    pub fn vehicle_name(&self) -> &str {
        &self.vehicle_name
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn period(&self) -> DateRange {
        self.period
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    /// 合計金額（丸めなし）
    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    pub fn guest(&self) -> Option<&GuestDetails> {
        self.guest.as_ref()
    }

    pub fn is_guest_booking(&self) -> bool {
        self.guest.is_some()
    }
}
