use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::adapter::driven::{InMemoryBookingContext, SimulatedLatencyContext};
use crate::adapter::driver::request_dto::{
    BookingsQueryParams, CreateBookingRequest, DateRangeQueryParams,
};
use crate::adapter::driver::response_dto::{
    AvailabilityResponse, BookingConfirmationResponse, BookingResponse, QuoteResponse,
    VehicleResponse,
};
use crate::application::booking_form::ContactDetails;
use crate::application::service::{
    BookingApplicationService, BookingQueryService, VehicleQueryService,
};
use crate::application::ApplicationError;
use crate::domain::error::{BookingRejection, DomainError};
use crate::domain::model::{DateRange, VehicleId};

#[derive(Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

/// サーバーで使う予約コンテキスト
pub type ServerBookingContext = SimulatedLatencyContext<InMemoryBookingContext>;

// アプリケーションサービスを含む状態
pub type AppState = AppStateInner;

#[derive(Clone)]
pub struct AppStateInner {
    pub booking_service: Arc<BookingApplicationService<ServerBookingContext>>,
    pub vehicle_query_service: Arc<VehicleQueryService>,
    pub booking_query_service: Arc<BookingQueryService>,
}

// REST APIルーターを作成
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/vehicles", get(get_vehicles))
        .route("/vehicles/:vehicle_id", get(get_vehicle_by_id))
        .route("/vehicles/:vehicle_id/quote", get(get_quote))
        .route("/vehicles/:vehicle_id/availability", get(get_availability))
        .route("/bookings", post(create_booking))
        .route("/bookings", get(get_bookings))
}

// ヘルスチェックエンドポイント
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "vehicle-rental-booking",
        "version": "0.1.0"
    }))
}

// 車両一覧取得エンドポイント
async fn get_vehicles(State(state): State<AppState>) -> ApiResult<Json<Vec<VehicleResponse>>> {
    let vehicles = state
        .vehicle_query_service
        .list_vehicles()
        .await
        .map_err(map_application_error)?;

    let response: Vec<VehicleResponse> =
        vehicles.iter().map(VehicleResponse::from_vehicle).collect();

    Ok(Json(response))
}

// 車両詳細取得エンドポイント
async fn get_vehicle_by_id(
    State(state): State<AppState>,
    Path(vehicle_id): Path<String>,
) -> ApiResult<Json<VehicleResponse>> {
    let vehicle_id = parse_vehicle_id(vehicle_id)?;

    match state.vehicle_query_service.get_vehicle(&vehicle_id).await {
        Ok(vehicle) => Ok(Json(VehicleResponse::from_vehicle(&vehicle))),
        Err(err) => Err(map_application_error(err)),
    }
}

// 見積もりエンドポイント
async fn get_quote(
    State(state): State<AppState>,
    Path(vehicle_id): Path<String>,
    query: Result<Query<DateRangeQueryParams>, QueryRejection>,
) -> ApiResult<Json<QuoteResponse>> {
    let vehicle_id = parse_vehicle_id(vehicle_id)?;
    let period = parse_period_query(query)?;

    match state.booking_service.quote(&vehicle_id, period).await {
        Ok(quote) => Ok(Json(QuoteResponse::from_quote(&quote))),
        Err(err) => Err(map_application_error(err)),
    }
}

// 空き状況確認エンドポイント
async fn get_availability(
    State(state): State<AppState>,
    Path(vehicle_id): Path<String>,
    query: Result<Query<DateRangeQueryParams>, QueryRejection>,
) -> ApiResult<Json<AvailabilityResponse>> {
    let vehicle_id = parse_vehicle_id(vehicle_id)?;
    let period = parse_period_query(query)?;

    match state
        .booking_service
        .check_availability(&vehicle_id, period)
        .await
    {
        Ok(available) => Ok(Json(AvailabilityResponse {
            vehicle_id: vehicle_id.to_string(),
            start_date: period.start_iso(),
            end_date: period.end_iso(),
            available,
        })),
        Err(err) => Err(map_application_error(err)),
    }
}

// 予約作成エンドポイント
async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> ApiResult<(StatusCode, Json<BookingConfirmationResponse>)> {
    let vehicle_id = parse_vehicle_id(request.vehicle_id)?;
    let period = DateRange::from_iso(&request.start_date, &request.end_date)
        .map_err(|err| map_application_error(err.into()))?;
    let contact = ContactDetails {
        guest_name: request.guest_name.unwrap_or_default(),
        phone: request.phone.unwrap_or_default(),
    };

    match state
        .booking_service
        .place_booking(&vehicle_id, period, &contact)
        .await
    {
        Ok(confirmation) => Ok((
            StatusCode::CREATED,
            Json(BookingConfirmationResponse::from_confirmation(&confirmation)),
        )),
        Err(err) => Err(map_application_error(err)),
    }
}

// 予約一覧取得エンドポイント
async fn get_bookings(
    State(state): State<AppState>,
    query: Result<Query<BookingsQueryParams>, QueryRejection>,
) -> ApiResult<Json<Vec<BookingResponse>>> {
    let Query(params) = query.map_err(|_| invalid_parameter())?;

    let bookings = match params.vehicle_id {
        // 車両でフィルタリング
        Some(vehicle_id) => {
            let vehicle_id = parse_vehicle_id(vehicle_id)?;
            state
                .booking_query_service
                .list_bookings_for_vehicle(&vehicle_id)
                .await
        }
        None => state.booking_query_service.list_bookings().await,
    }
    .map_err(map_application_error)?;

    let response: Vec<BookingResponse> =
        bookings.iter().map(BookingResponse::from_record).collect();

    Ok(Json(response))
}

fn parse_vehicle_id(raw: String) -> ApiResult<VehicleId> {
    VehicleId::new(raw).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                error: "無効な車両IDです".to_string(),
                code: "INVALID_VEHICLE_ID".to_string(),
            }),
        )
    })
}

fn parse_period_query(
    query: Result<Query<DateRangeQueryParams>, QueryRejection>,
) -> ApiResult<DateRange> {
    let Query(params) = query.map_err(|_| invalid_parameter())?;
    DateRange::from_iso(&params.start_date, &params.end_date)
        .map_err(|err| map_application_error(err.into()))
}

fn invalid_parameter() -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError {
            error: "無効なクエリパラメータです".to_string(),
            code: "INVALID_PARAMETER".to_string(),
        }),
    )
}

// アプリケーションエラーをHTTPエラーにマッピング
fn map_application_error(err: ApplicationError) -> (StatusCode, Json<ApiError>) {
    let message = err.user_message();
    let (status, code) = match &err {
        ApplicationError::Rejected(rejection) => map_rejection(rejection),
        ApplicationError::StoreFailure(_) => (StatusCode::SERVICE_UNAVAILABLE, "STORE_FAILURE"),
        ApplicationError::DomainError(domain_err) => map_domain_error(domain_err),
        ApplicationError::RepositoryError(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "REPOSITORY_ERROR")
        }
        ApplicationError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ApplicationError::SubmissionInProgress => (StatusCode::CONFLICT, "SUBMISSION_IN_PROGRESS"),
    };

    (
        status,
        Json(ApiError {
            error: message,
            code: code.to_string(),
        }),
    )
}

// 予約の却下理由をHTTPステータスコードとエラーコードにマッピング
fn map_rejection(rejection: &BookingRejection) -> (StatusCode, &'static str) {
    match rejection {
        BookingRejection::VehicleUnavailable(_) => (StatusCode::CONFLICT, "VEHICLE_UNAVAILABLE"),
        BookingRejection::RentalPeriodTooLong { .. } => {
            (StatusCode::BAD_REQUEST, "RENTAL_PERIOD_TOO_LONG")
        }
        BookingRejection::PeriodOutOfRange => (StatusCode::BAD_REQUEST, "PERIOD_OUT_OF_RANGE"),
        BookingRejection::MissingGuestName => (StatusCode::BAD_REQUEST, "MISSING_GUEST_NAME"),
        BookingRejection::MissingGuestPhone => (StatusCode::BAD_REQUEST, "MISSING_GUEST_PHONE"),
    }
}

fn map_domain_error(domain_err: &DomainError) -> (StatusCode, &'static str) {
    match domain_err {
        DomainError::InvalidPrice(_) => (StatusCode::BAD_REQUEST, "INVALID_PRICE"),
        DomainError::InvalidDateRange(_) => (StatusCode::BAD_REQUEST, "INVALID_DATE_RANGE"),
        DomainError::CurrencyMismatch => (StatusCode::BAD_REQUEST, "CURRENCY_MISMATCH"),
        DomainError::InvalidValue(_) => (StatusCode::BAD_REQUEST, "INVALID_VALUE"),
    }
}
