// ドメインサービス
// 予約可否の判定と料金計算を実装
// 状態を持たず、同じ入力には同じ判定を返す

use crate::domain::error::{BookingRejection, UnavailabilityReason};
use crate::domain::model::{
    saturating_add_days, BookingRecord, BookingRequest, DateRange, GuestDetails, Money,
    RequesterIdentity, Vehicle,
};
use crate::domain::port::AvailabilityOracle;
use chrono::NaiveDate;

/// 予約ポリシー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingPolicy {
    /// 何日前までに予約が必要か
    pub advance_notice_days: i64,
    /// レンタル期間の上限日数
    pub max_rental_days: i64,
}

impl BookingPolicy {
    pub fn new(advance_notice_days: i64, max_rental_days: i64) -> Self {
        Self {
            advance_notice_days,
            max_rental_days,
        }
    }

    /// 予約可能な最も早い開始日
    /// 暦の範囲を超える場合は暦の最終日
    pub fn earliest_start(&self, today: NaiveDate) -> NaiveDate {
        saturating_add_days(today, self.advance_notice_days)
    }

    /// 開始日に対して選択可能な最も遅い終了日
    pub fn latest_end(&self, start_date: NaiveDate) -> NaiveDate {
        saturating_add_days(start_date, self.max_rental_days)
    }
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self::new(7, 7)
    }
}

/// 料金見積もり
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceQuote {
    /// 1日あたりの料金
    pub nightly_rate: Money,
    /// レンタル日数（最低1日）
    pub rental_days: u32,
    /// 合計金額 = 1日あたりの料金 × 日数
    pub total: Money,
}

/// 予約可否判定・料金計算エンジン
#[derive(Debug, Clone, Copy, Default)]
pub struct BookingEngine {
    policy: BookingPolicy,
}

impl BookingEngine {
    /// 新しいエンジンを作成
    ///
    /// # Arguments
    /// * `policy` - 事前予約日数と最大レンタル日数
    pub fn new(policy: BookingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> BookingPolicy {
        self.policy
    }

    /// 料金を見積もる
    /// 終了日が開始日以前の場合も1日分として計算する
    pub fn quote(&self, vehicle: &Vehicle, period: &DateRange) -> PriceQuote {
        let rental_days = period.rental_days();
        let nightly_rate = vehicle.price();
        PriceQuote {
            nightly_rate,
            rental_days,
            total: nightly_rate.multiply(rental_days),
        }
    }

    /// 予約リクエストを評価する
    ///
    /// # Arguments
    /// * `request` - 予約リクエスト
    /// * `today` - 事前予約期限の基準日
    /// * `oracle` - 空き状況オラクル
    ///
    /// # Returns
    /// * `Ok(BookingRecord)` - 受付可能な予約記録（ステータスはUpcoming）
    /// * `Err(BookingRejection)` - 却下理由
    pub fn evaluate_booking<O>(
        &self,
        request: &BookingRequest,
        today: NaiveDate,
        oracle: &O,
    ) -> Result<BookingRecord, BookingRejection>
    where
        O: AvailabilityOracle + ?Sized,
    {
        let vehicle = request.vehicle();
        let period = request
            .period()
            .normalized()
            .ok_or(BookingRejection::PeriodOutOfRange)?;

        let earliest_start = self.policy.earliest_start(today);
        if period.start_date() < earliest_start {
            return Err(BookingRejection::VehicleUnavailable(
                UnavailabilityReason::InsufficientAdvanceNotice { earliest_start },
            ));
        }

        if period.end_date() > self.policy.latest_end(period.start_date()) {
            return Err(BookingRejection::RentalPeriodTooLong {
                max_days: self.policy.max_rental_days,
            });
        }

        if !oracle.is_available(vehicle.id(), &period.start_iso(), &period.end_iso()) {
            return Err(BookingRejection::VehicleUnavailable(
                UnavailabilityReason::AlreadyBooked,
            ));
        }

        let (user_id, guest) = match request.identity() {
            RequesterIdentity::Authenticated { user_id, .. } => (Some(*user_id), None),
            RequesterIdentity::Guest { name, phone } => {
                (None, Some(GuestDetails::new(name, phone)?))
            }
        };

        let quote = self.quote(vehicle, &period);
        Ok(BookingRecord::upcoming(
            vehicle,
            period,
            quote.total,
            user_id,
            guest,
        ))
    }
}
