// 出力ポート
// ドメイン層が外部に依存する機能をトレイトとして定義
// アダプター層でこれらのトレイトを実装する

use crate::domain::event::DomainEvent;
use crate::domain::model::{BookingRecord, User, Vehicle, VehicleId};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use uuid::Uuid;

/// ログレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

/// ロガートレイト
/// ログ出力を抽象化するポート
pub trait Logger: Send + Sync {
    /// デバッグレベルのログを出力
    fn debug(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    );

    /// 情報レベルのログを出力
    fn info(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    );

    /// 警告レベルのログを出力
    fn warn(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    );

    /// エラーレベルのログを出力
    fn error(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    );
}

/// リポジトリエラー型
/// ストア操作で発生するエラーを表現する
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::enum_variant_names)]
pub enum RepositoryError {
    /// ストアへの接続に失敗
    ConnectionFailed(String),
    /// 操作に失敗
    OperationFailed(String),
    /// データの取得に失敗
    FetchFailed(String),
}

impl std::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepositoryError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            RepositoryError::OperationFailed(msg) => write!(f, "Operation failed: {}", msg),
            RepositoryError::FetchFailed(msg) => write!(f, "Fetch failed: {}", msg),
        }
    }
}

impl std::error::Error for RepositoryError {}

/// 空き状況オラクル
/// 指定期間に車両が利用可能かを答える外部の述語
pub trait AvailabilityOracle: Send + Sync {
    /// 車両が指定期間に利用可能か
    ///
    /// # Arguments
    /// * `vehicle_id` - 車両ID
    /// * `start_date` - 開始日（YYYY-MM-DD）
    /// * `end_date` - 終了日（YYYY-MM-DD）
    fn is_available(&self, vehicle_id: &VehicleId, start_date: &str, end_date: &str) -> bool;
}

/// 予約ストアトレイト
/// 確定した予約記録の永続化を抽象化する
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// 予約記録を追加する
    ///
    /// # Arguments
    /// * `record` - 追加する予約記録
    ///
    /// # Returns
    /// * `Ok(Some(BookingRecord))` - 保存された予約記録
    /// * `Ok(None)` - ストアが記録を受け付けなかった
    /// * `Err(RepositoryError)` - 保存失敗
    async fn add_booking(
        &self,
        record: BookingRecord,
    ) -> Result<Option<BookingRecord>, RepositoryError>;

    /// すべての予約記録を取得する
    async fn find_all(&self) -> Result<Vec<BookingRecord>, RepositoryError>;

    /// 指定された車両の予約記録を取得する
    async fn find_by_vehicle(
        &self,
        vehicle_id: &VehicleId,
    ) -> Result<Vec<BookingRecord>, RepositoryError>;
}

/// ログイン中の利用者を返すポート
pub trait UserSession: Send + Sync {
    /// 現在の利用者（未ログインならNone）
    fn current_user(&self) -> Option<User>;
}

/// 予約処理に必要な依存関係の束
/// 利用者・空き状況・予約ストアをまとめて明示的に注入する
pub trait BookingContext: UserSession + AvailabilityOracle + BookingStore {}

impl<T> BookingContext for T where T: UserSession + AvailabilityOracle + BookingStore {}

/// 車両カタログトレイト
/// 車両の参照データを提供する
#[async_trait]
pub trait VehicleCatalog: Send + Sync {
    /// 車両IDで車両を検索する
    ///
    /// # Returns
    /// * `Ok(Some(Vehicle))` - 車両が見つかった
    /// * `Ok(None)` - 車両が見つからなかった
    /// * `Err(RepositoryError)` - 検索失敗
    async fn find_by_id(&self, vehicle_id: &VehicleId) -> Result<Option<Vehicle>, RepositoryError>;

    /// すべての車両を取得する
    async fn find_all(&self) -> Result<Vec<Vehicle>, RepositoryError>;
}

/// 現在日付を提供するポート
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// イベント発行エラー
#[derive(Debug, thiserror::Error)]
pub enum PublisherError {
    #[error("Event publishing failed: {0}")]
    PublishingFailed(String),
}

/// イベント発行トレイト
pub trait EventPublisher: Send + Sync {
    /// ドメインイベントを発行する
    fn publish(&self, event: &DomainEvent) -> Result<(), PublisherError>;
}
