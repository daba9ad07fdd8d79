use crate::cli::ServeArgs;
use crate::infra::{
    load_hotels, load_rate_table, AppState, InMemoryBookingRepository, InMemoryHotelDirectory,
};
use crate::routes::with_booking_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use hotel_booking::booking::{BookingService, PricingEngine};
use hotel_booking::config::AppConfig;
use hotel_booking::error::AppError;
use hotel_booking::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let rates = load_rate_table(config.booking.rate_table_path.as_deref())?;
    let hotels = Arc::new(InMemoryHotelDirectory::new(load_hotels(
        config.booking.hotel_catalog_path.as_deref(),
    )?));
    let engine = Arc::new(PricingEngine::with_max_nights(
        rates,
        config.booking.max_nights,
    ));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryBookingRepository::default());
    let booking_service = Arc::new(BookingService::new(engine, repository, hotels.clone()));

    let app = with_booking_routes(booking_service, hotels)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "hotel booking service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
