use crate::domain::port::{LogLevel, Logger};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write;
use uuid::Uuid;

/// ログエントリ
/// 構造化ログの1行分
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    pub correlation_id: Option<Uuid>,
    pub component: String,
    pub additional_context: BTreeMap<String, String>,
}

impl LogEntry {
    /// 新しいログエントリを作成
    pub fn new(level: LogLevel, message: String, component: String) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message,
            correlation_id: None,
            component,
            additional_context: BTreeMap::new(),
        }
    }

    /// 相関IDを設定
    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }

    /// 追加コンテキストを設定
    pub fn with_context(mut self, key: String, value: String) -> Self {
        self.additional_context.insert(key, value);
        self
    }

    /// 1行のテキストに整形する
    /// `[時刻] [レベル] [コンポーネント] [correlation_id: ..] メッセージ [k=v, ..]`
    /// コンテキストはキーの昇順で並べる
    pub fn format(&self) -> String {
        let mut line = format!(
            "[{}] [{}] [{}]",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            level_label(self.level),
            self.component
        );
        if let Some(correlation_id) = self.correlation_id {
            let _ = write!(line, " [correlation_id: {}]", correlation_id);
        }
        let _ = write!(line, " {}", self.message);

        let mut pairs = self.additional_context.iter();
        if let Some((key, value)) = pairs.next() {
            let _ = write!(line, " [{}={}", key, value);
            for (key, value) in pairs {
                let _ = write!(line, ", {}={}", key, value);
            }
            line.push(']');
        }
        line
    }
}

fn level_label(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Debug => "DEBUG",
        LogLevel::Info => "INFO",
        LogLevel::Warning => "WARN",
        LogLevel::Error => "ERROR",
    }
}

/// コンソールログ実装
/// 情報以下は標準出力、警告以上は標準エラー出力に書き出す
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
        }
    }

    /// 出力する最低レベルを指定して作成
    pub fn with_min_level(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    fn severity(level: LogLevel) -> u8 {
        match level {
            LogLevel::Debug => 0,
            LogLevel::Info => 1,
            LogLevel::Warning => 2,
            LogLevel::Error => 3,
        }
    }

    /// 指定レベルのログを出力するか
    pub fn enabled(&self, level: LogLevel) -> bool {
        Self::severity(level) >= Self::severity(self.min_level)
    }

    fn write(
        &self,
        level: LogLevel,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    ) {
        if !self.enabled(level) {
            return;
        }

        let mut entry = LogEntry::new(level, message.to_string(), component.to_string());
        if let Some(corr_id) = correlation_id {
            entry = entry.with_correlation_id(corr_id);
        }
        for (key, value) in context.unwrap_or_default() {
            entry = entry.with_context(key, value);
        }

        match level {
            LogLevel::Debug | LogLevel::Info => println!("{}", entry.format()),
            LogLevel::Warning | LogLevel::Error => eprintln!("{}", entry.format()),
        }
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for ConsoleLogger {
    fn debug(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    ) {
        self.write(LogLevel::Debug, component, message, correlation_id, context);
    }

    fn info(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    ) {
        self.write(LogLevel::Info, component, message, correlation_id, context);
    }

    fn warn(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    ) {
        self.write(LogLevel::Warning, component, message, correlation_id, context);
    }

    fn error(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    ) {
        self.write(LogLevel::Error, component, message, correlation_id, context);
    }
}
