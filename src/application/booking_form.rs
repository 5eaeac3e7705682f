use crate::domain::model::{saturating_add_days, DateRange, User, Vehicle};
use crate::domain::port::AvailabilityOracle;
use crate::domain::service::{BookingEngine, BookingPolicy, PriceQuote};
use chrono::NaiveDate;

/// 予約フォームに入力された連絡先
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDetails {
    /// ゲストの名前（ログイン済みの場合は使用しない）
    pub guest_name: String,
    /// 電話番号
    pub phone: String,
}

/// 空き状況の確認結果
/// どの期間に対する結果かを一緒に保持する
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AvailabilityCheck {
    period: DateRange,
    available: bool,
}

/// 予約フォームの状態
/// 1台の車両に対する日付選択・連絡先・送信中フラグを保持する
#[derive(Debug, Clone)]
pub struct BookingForm {
    vehicle: Vehicle,
    engine: BookingEngine,
    today: NaiveDate,
    start_date: NaiveDate,
    end_date: NaiveDate,
    contact: ContactDetails,
    phone_locked: bool,
    signed_in: bool,
    last_check: Option<AvailabilityCheck>,
    processing: bool,
}

impl BookingForm {
    /// フォームを開く
    /// 開始日は予約可能な最も早い日、終了日はその翌日を初期値とし、
    /// 初期期間の空き状況をすぐに確認する
    ///
    /// # Arguments
    /// * `vehicle` - 予約対象の車両
    /// * `policy` - 予約ポリシー
    /// * `today` - 基準日
    /// * `user` - ログイン中の利用者（電話番号があれば入力済み・変更不可にする）
    /// * `oracle` - 空き状況オラクル
    pub fn open<O>(
        vehicle: Vehicle,
        policy: BookingPolicy,
        today: NaiveDate,
        user: Option<&User>,
        oracle: &O,
    ) -> Self
    where
        O: AvailabilityOracle + ?Sized,
    {
        let start_date = policy.earliest_start(today);
        let profile_phone = user.and_then(User::phone);
        let mut form = Self {
            vehicle,
            engine: BookingEngine::new(policy),
            today,
            start_date,
            end_date: saturating_add_days(start_date, 1),
            contact: ContactDetails {
                guest_name: String::new(),
                phone: profile_phone.unwrap_or_default().to_string(),
            },
            phone_locked: profile_phone.is_some(),
            signed_in: user.is_some(),
            last_check: None,
            processing: false,
        };
        form.refresh_availability(oracle);
        form
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn policy(&self) -> BookingPolicy {
        self.engine.policy()
    }

    /// 現在選択されている期間
    pub fn period(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }

    /// 開始日を変更する
    /// 終了日が新しい開始日以前になる場合は開始日の翌日に進め、
    /// 新しい期間で空き状況を確認し直す
    pub fn change_start_date<O>(&mut self, date: NaiveDate, oracle: &O)
    where
        O: AvailabilityOracle + ?Sized,
    {
        self.start_date = date;
        if self.end_date <= date {
            self.end_date = saturating_add_days(date, 1);
        }
        self.refresh_availability(oracle);
    }

    /// 終了日を変更し、空き状況を確認し直す
    pub fn change_end_date<O>(&mut self, date: NaiveDate, oracle: &O)
    where
        O: AvailabilityOracle + ?Sized,
    {
        self.end_date = date;
        self.refresh_availability(oracle);
    }

    fn refresh_availability<O>(&mut self, oracle: &O)
    where
        O: AvailabilityOracle + ?Sized,
    {
        let period = self.period();
        let available =
            oracle.is_available(self.vehicle.id(), &period.start_iso(), &period.end_iso());
        self.last_check = Some(AvailabilityCheck { period, available });
    }

    /// 現在の期間に対して空きが確認済みか
    /// 別の期間に対する確認結果は信用しない
    pub fn is_available_for_current_dates(&self) -> bool {
        let period = self.period();
        let meets_floor = self.start_date >= self.policy().earliest_start(self.today);
        match self.last_check {
            Some(check) => meets_floor && check.period == period && check.available,
            None => false,
        }
    }

    /// カレンダーで開始日として選択できるか
    pub fn is_start_date_selectable(&self, date: NaiveDate) -> bool {
        date >= self.policy().earliest_start(self.today)
    }

    /// カレンダーで終了日として選択できるか（1日以上、最大日数以内）
    pub fn is_end_date_selectable(&self, date: NaiveDate) -> bool {
        date > self.start_date
            && date <= self.policy().latest_end(self.start_date)
    }

    pub fn set_guest_name(&mut self, name: impl Into<String>) {
        self.contact.guest_name = name.into();
    }

    /// 電話番号を入力する
    /// プロフィールの電話番号で固定されている場合は無視する
    pub fn set_phone_number(&mut self, phone: impl Into<String>) {
        if !self.phone_locked {
            self.contact.phone = phone.into();
        }
    }

    pub fn contact(&self) -> &ContactDetails {
        &self.contact
    }

    pub fn phone_locked(&self) -> bool {
        self.phone_locked
    }

    /// フォームを開いた時点でログインしていたか
    pub fn signed_in(&self) -> bool {
        self.signed_in
    }

    /// 表示用の日数と料金
    pub fn quote(&self) -> PriceQuote {
        self.engine.quote(&self.vehicle, &self.period())
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// 送信ボタンを押せるか
    pub fn can_submit(&self) -> bool {
        !self.processing && self.is_available_for_current_dates()
    }

    /// 送信中フラグを立てる
    /// すでに送信中ならfalseを返す
    pub(crate) fn begin_submission(&mut self) -> bool {
        if self.processing {
            return false;
        }
        self.processing = true;
        true
    }

    pub(crate) fn finish_submission(&mut self) {
        self.processing = false;
    }
}
