use vehicle_rental_booking::adapter::driven::{
    ConsoleEventPublisher, ConsoleLogger, InMemoryBookingContext, InMemoryVehicleCatalog,
    SimulatedLatencyContext, SystemClock,
};
use vehicle_rental_booking::adapter::driver::rest_api::{create_router, AppStateInner};
use vehicle_rental_booking::adapter::AppConfig;
use vehicle_rental_booking::application::service::{
    BookingApplicationService, BookingQueryService, VehicleQueryService,
};
use vehicle_rental_booking::domain::port::{BookingStore, Logger, VehicleCatalog};

use std::sync::Arc;
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== 高級車レンタル予約システム REST API ===");
    println!();

    // .envファイルから環境変数を読み込む
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    let policy = config.booking_policy();
    println!(
        "予約ポリシー: {}日前から予約可能、最大{}日間",
        policy.advance_notice_days, policy.max_rental_days
    );

    let logger: Arc<dyn Logger> = Arc::new(ConsoleLogger::new());

    // デモ用の車両カタログ
    let catalog: Arc<dyn VehicleCatalog> = Arc::new(InMemoryVehicleCatalog::with_demo_fleet()?);

    // 予約コンテキスト（保存成功後に遅延を模擬する）
    let context = Arc::new(SimulatedLatencyContext::new(
        Arc::new(InMemoryBookingContext::new()),
        config.simulated_latency(),
    ));
    let booking_store: Arc<dyn BookingStore> = context.clone();

    let booking_service = BookingApplicationService::new(
        context,
        catalog.clone(),
        Arc::new(SystemClock),
        logger.clone(),
        Arc::new(ConsoleEventPublisher::new()),
        policy,
    );

    // アプリケーション状態を作成
    let app_state = AppStateInner {
        booking_service: Arc::new(booking_service),
        vehicle_query_service: Arc::new(VehicleQueryService::new(catalog)),
        booking_query_service: Arc::new(BookingQueryService::new(booking_store)),
    };

    // REST APIルーターを作成
    let app = create_router()
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // サーバーを起動
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    logger.info("main", &format!("Server listening on {}", address), None, None);
    println!("REST APIサーバーが起動しました: http://{}", address);
    println!("API仕様:");
    println!("  GET  /health - ヘルスチェック");
    println!("  GET  /vehicles - 車両一覧取得");
    println!("  GET  /vehicles/:id - 車両詳細取得");
    println!("  GET  /vehicles/:id/quote?start_date&end_date - 料金見積もり");
    println!("  GET  /vehicles/:id/availability?start_date&end_date - 空き状況確認");
    println!("  POST /bookings - 予約作成");
    println!("  GET  /bookings - 予約一覧取得");
    println!();

    axum::serve(listener, app).await?;

    Ok(())
}
