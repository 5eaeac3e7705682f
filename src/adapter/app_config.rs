use crate::domain::service::BookingPolicy;
use std::env;
use std::time::Duration;

/// 予約ポリシーの日数に指定できる上限
const MAX_POLICY_DAYS: i64 = 3650;

/// アプリケーション設定を管理する構造体
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub advance_notice_days: i64,
    pub max_rental_days: i64,
    pub simulated_latency_ms: u64,
}

/// 設定エラー
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl AppConfig {
    /// 環境変数から設定を読み取る
    /// 環境変数が設定されていない場合はデフォルト値を使用
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidValue(format!("Invalid SERVER_PORT: {}", e)))?;

        let advance_notice_days = Self::policy_days("BOOKING_ADVANCE_NOTICE_DAYS", "7")?;

        let max_rental_days = Self::policy_days("BOOKING_MAX_RENTAL_DAYS", "7")?;
        if max_rental_days < 1 {
            return Err(ConfigError::InvalidValue(
                "BOOKING_MAX_RENTAL_DAYS must be at least 1".to_string(),
            ));
        }

        let simulated_latency_ms = env::var("BOOKING_SIMULATED_LATENCY_MS")
            .unwrap_or_else(|_| "0".to_string())
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidValue(format!("Invalid BOOKING_SIMULATED_LATENCY_MS: {}", e))
            })?;

        Ok(Self {
            host,
            port,
            advance_notice_days,
            max_rental_days,
            simulated_latency_ms,
        })
    }

    fn policy_days(key: &str, default: &str) -> Result<i64, ConfigError> {
        let days = env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<i64>()
            .map_err(|e| ConfigError::InvalidValue(format!("Invalid {}: {}", key, e)))?;
        if !(0..=MAX_POLICY_DAYS).contains(&days) {
            return Err(ConfigError::InvalidValue(format!(
                "{} must be between 0 and {}",
                key, MAX_POLICY_DAYS
            )));
        }
        Ok(days)
    }

    /// サーバーの待ち受けアドレス
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 予約ポリシー
    pub fn booking_policy(&self) -> BookingPolicy {
        BookingPolicy::new(self.advance_notice_days, self.max_rental_days)
    }

    /// 予約保存後に模擬する遅延
    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}
