// アプリケーション層
// ユースケースの調整とフォーム状態の管理

pub mod booking_form;
pub mod error;
pub mod service;

pub use error::ApplicationError;
