use crate::application::service::{BookingConfirmation, FollowUp};
use crate::domain::model::{BookingRecord, Money, Vehicle};
use crate::domain::service::PriceQuote;
use serde::{Deserialize, Serialize};

/// 金額用のレスポンスDTO
/// 金額は小数点以下2桁の文字列で返す
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct MoneyResponse {
    pub amount: String,
    pub currency: String,
}

impl MoneyResponse {
    pub fn from_money(money: &Money) -> Self {
        Self {
            amount: format!("{:.2}", money.amount()),
            currency: money.currency(),
        }
    }
}

/// 車両用のレスポンスDTO
#[derive(Serialize, Deserialize)]
pub struct VehicleResponse {
    pub vehicle_id: String,
    pub brand: String,
    pub name: String,
    pub price_per_day: MoneyResponse,
    pub images: Vec<String>,
}

impl VehicleResponse {
    /// ドメインオブジェクトからVehicleResponseを作成
    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        Self {
            vehicle_id: vehicle.id().to_string(),
            brand: vehicle.brand().to_string(),
            name: vehicle.name().to_string(),
            price_per_day: MoneyResponse::from_money(&vehicle.price()),
            images: vehicle.images().to_vec(),
        }
    }
}

/// 見積もり用のレスポンスDTO
#[derive(Serialize, Deserialize)]
pub struct QuoteResponse {
    pub rental_days: u32,
    pub price_per_day: MoneyResponse,
    pub total: MoneyResponse,
}

impl QuoteResponse {
    pub fn from_quote(quote: &PriceQuote) -> Self {
        Self {
            rental_days: quote.rental_days,
            price_per_day: MoneyResponse::from_money(&quote.nightly_rate),
            total: MoneyResponse::from_money(&quote.total),
        }
    }
}

/// 空き状況用のレスポンスDTO
#[derive(Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub vehicle_id: String,
    pub start_date: String,
    pub end_date: String,
    pub available: bool,
}

/// ゲスト情報用のレスポンスDTO
#[derive(Serialize, Deserialize)]
pub struct GuestResponse {
    pub name: String,
    pub phone: String,
}

/// 予約用のレスポンスDTO
#[derive(Serialize, Deserialize)]
pub struct BookingResponse {
    pub booking_id: String,
    pub vehicle_id: String,
    pub vehicle_name: String,
    pub image_url: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub amount: MoneyResponse,
    pub user_id: Option<String>,
    pub guest: Option<GuestResponse>,
}

impl BookingResponse {
    /// ドメインオブジェクトからBookingResponseを作成
    pub fn from_record(record: &BookingRecord) -> Self {
        Self {
            booking_id: record.id().to_string(),
            vehicle_id: record.vehicle_id().to_string(),
            vehicle_name: record.vehicle_name().to_string(),
            image_url: record.image_url().map(str::to_string),
            start_date: record.period().start_iso(),
            end_date: record.period().end_iso(),
            status: record.status().to_string(),
            amount: MoneyResponse::from_money(&record.amount()),
            user_id: record.user_id().map(|id| id.to_string()),
            guest: record.guest().map(|guest| GuestResponse {
                name: guest.name().to_string(),
                phone: guest.phone().to_string(),
            }),
        }
    }
}

/// 予約確定用のレスポンスDTO
#[derive(Serialize, Deserialize)]
pub struct BookingConfirmationResponse {
    pub booking: BookingResponse,
    pub follow_up: String,
    pub notices: Vec<String>,
}

impl BookingConfirmationResponse {
    pub fn from_confirmation(confirmation: &BookingConfirmation) -> Self {
        let follow_up = match confirmation.follow_up {
            FollowUp::Dashboard => "dashboard",
            FollowUp::VehicleCatalog => "vehicles",
        };
        Self {
            booking: BookingResponse::from_record(&confirmation.record),
            follow_up: follow_up.to_string(),
            notices: confirmation.notices.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_money_response_has_two_decimals() {
        let response = MoneyResponse::from_money(&Money::eur(Decimal::new(2499, 1)));
        assert_eq!(
            response,
            MoneyResponse {
                amount: "249.90".to_string(),
                currency: "EUR".to_string(),
            }
        );
    }
}
