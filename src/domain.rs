// ドメイン層
// 予約可否判定と料金計算のビジネスルールを保持する

pub mod error;
pub mod event;
pub mod model;
pub mod port;
pub mod service;
