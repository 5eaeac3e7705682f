use serde::{Deserialize, Serialize};

/// 予約作成用のリクエストDTO
#[derive(Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub vehicle_id: String,
    pub start_date: String, // YYYY-MM-DD
    pub end_date: String,   // YYYY-MM-DD
    #[serde(default)]
    pub guest_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// 見積もり・空き状況確認用のクエリパラメータ
#[derive(Serialize, Deserialize)]
pub struct DateRangeQueryParams {
    pub start_date: String,
    pub end_date: String,
}

/// 予約一覧取得用のクエリパラメータ
#[derive(Deserialize)]
pub struct BookingsQueryParams {
    pub vehicle_id: Option<String>,
}
