use crate::domain::error::DomainError;
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;

/// 車両の識別子
/// カタログ側で採番された文字列IDをそのまま保持する
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleId(String);

impl VehicleId {
    /// 文字列からVehicleIdを作成
    /// 空白のみのIDは許可しない
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidValue(
                "車両IDは空にできません".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// 内部の文字列を取得
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 利用者の一意識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// 新しい一意のUserIdを生成
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// UUIDから UserId を作成
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// 内部のUUIDを取得
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

/// 予約の一意識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(Uuid);

impl BookingId {
    /// 新しい一意のBookingIdを生成
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// UUIDから BookingId を作成
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// 内部のUUIDを取得
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

/// 通貨
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    /// ユーロ
    #[allow(clippy::upper_case_acronyms)]
    EUR,
}

impl Currency {
    /// 表示用の通貨記号
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::EUR => "€",
        }
    }
}

/// 金額を表す値オブジェクト
/// 小数を含む金額を丸めずに保持する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// 金額と通貨から作成
    pub fn new(amount: Decimal, currency: String) -> Result<Self, DomainError> {
        let currency = match currency.as_str() {
            "EUR" => Currency::EUR,
            _ => {
                return Err(DomainError::InvalidValue(format!(
                    "サポートされていない通貨: {}",
                    currency
                )))
            }
        };
        Ok(Self { amount, currency })
    }

    /// ユーロの金額を作成
    pub fn eur(amount: Decimal) -> Self {
        Self {
            amount,
            currency: Currency::EUR,
        }
    }

    /// 金額を取得
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// 通貨を文字列として取得
    pub fn currency(&self) -> String {
        match self.currency {
            Currency::EUR => "EUR".to_string(),
        }
    }

    /// 金額が0より大きいか
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// 金額を加算
    pub fn add(&self, other: &Money) -> Result<Money, DomainError> {
        if self.currency != other.currency {
            return Err(DomainError::CurrencyMismatch);
        }
        Ok(Money {
            amount: self.amount + other.amount,
            currency: self.currency,
        })
    }

    /// 金額を乗算
    pub fn multiply(&self, factor: u32) -> Money {
        Money {
            amount: self.amount * Decimal::from(factor),
            currency: self.currency,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.currency.symbol())
    }
}

/// レンタル期間を表す値オブジェクト
/// 開始日を含み終了日を含まない暦日の区間
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl DateRange {
    /// 開始日と終了日から作成
    /// 終了日が開始日以前でも作成でき、日数は最低1日として扱う
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// ISO形式（YYYY-MM-DD）の文字列から作成
    pub fn from_iso(start_date: &str, end_date: &str) -> Result<Self, DomainError> {
        let parse = |value: &str| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
                DomainError::InvalidDateRange(format!("日付の解析に失敗しました: {} ({})", value, e))
            })
        };
        Ok(Self::new(parse(start_date)?, parse(end_date)?))
    }

    /// 開始日を取得
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// 終了日を取得
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// 開始日をISO形式で取得
    pub fn start_iso(&self) -> String {
        self.start_date.format("%Y-%m-%d").to_string()
    }

    /// 終了日をISO形式で取得
    pub fn end_iso(&self) -> String {
        self.end_date.format("%Y-%m-%d").to_string()
    }

    /// 終了日が開始日より後か
    pub fn is_well_formed(&self) -> bool {
        self.end_date > self.start_date
    }

    /// レンタル日数（終了日 - 開始日、最低1日）
    pub fn rental_days(&self) -> u32 {
        let days = (self.end_date - self.start_date).num_days().max(1);
        u32::try_from(days).unwrap_or(u32::MAX)
    }

    /// 終了日が開始日以前の場合、終了日を開始日の翌日に補正した期間を返す
    /// 翌日が暦の範囲外になる場合はNone
    pub fn normalized(&self) -> Option<Self> {
        if self.is_well_formed() {
            return Some(*self);
        }
        add_days(self.start_date, 1).map(|end_date| Self::new(self.start_date, end_date))
    }

    /// 2つの期間が重なるか（半開区間として判定）
    /// 補正できない期間はどの期間とも重ならない
    pub fn overlaps(&self, other: &DateRange) -> bool {
        match (self.normalized(), other.normalized()) {
            (Some(this), Some(other)) => {
                this.start_date < other.end_date && other.start_date < this.end_date
            }
            _ => false,
        }
    }
}

/// 日付に日数を加える
/// 結果が暦の範囲外になる場合はNone
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    Duration::try_days(days).and_then(|delta| date.checked_add_signed(delta))
}

/// 日付に日数を加え、範囲外なら暦の端で止める
pub fn saturating_add_days(date: NaiveDate, days: i64) -> NaiveDate {
    add_days(date, days).unwrap_or(if days < 0 {
        NaiveDate::MIN
    } else {
        NaiveDate::MAX
    })
}

/// 予約のステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// 利用前
    Upcoming,
    /// 利用中
    Active,
    /// 返却済み
    Completed,
    /// キャンセル済み
    Cancelled,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status_str = match self {
            BookingStatus::Upcoming => "upcoming",
            BookingStatus::Active => "active",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", status_str)
    }
}

impl BookingStatus {
    /// 文字列からBookingStatusを作成
    pub fn from_string(s: &str) -> Result<Self, DomainError> {
        match s {
            "upcoming" => Ok(BookingStatus::Upcoming),
            "active" => Ok(BookingStatus::Active),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            _ => Err(DomainError::InvalidValue(format!(
                "無効な予約ステータス: {}",
                s
            ))),
        }
    }

    /// 車両の空き状況に影響するステータスか
    pub fn holds_vehicle(&self) -> bool {
        matches!(self, BookingStatus::Upcoming | BookingStatus::Active)
    }
}
