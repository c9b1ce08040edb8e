pub mod auth;
pub mod authz;
pub mod booking;
pub mod capacity;
pub mod deadlines;
pub mod error;
pub mod handlers;
pub mod mailer;
pub mod models;
pub mod openapi;
pub mod reference;
pub mod settings;
pub mod store;
pub mod sweeper;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use handlers::{
    class_registrations, get_registration, healthz_live, healthz_ready, reserve, root,
    update_registration,
};
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::booking::BookingService;
use crate::mailer::LogMailer;
use crate::openapi::ApiDoc;
use crate::settings::Settings;
use crate::store::MemoryStore;

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub store: Arc<MemoryStore>,
    pub booking: Arc<BookingService>,
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;

    let env_filter = if settings.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .without_time()
        .init();

    let store = Arc::new(MemoryStore::new());
    let booking = Arc::new(BookingService::new(
        store.clone(),
        Arc::new(LogMailer),
        &settings,
    ));
    let state = AppState {
        settings: settings.clone(),
        store,
        booking: booking.clone(),
    };

    sweeper::spawn(booking, Duration::from_secs(settings.sweep_interval_secs));

    let app = build_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], state.settings.port));
    info!("Starting Studio Booking API on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    let mut router = Router::new()
        .route("/", get(root))
        .route("/healthz/live", get(healthz_live))
        .route("/healthz/ready", get(healthz_ready))
        .route("/registrations/reserve", post(reserve))
        .route(
            "/registrations/{id}",
            get(get_registration).patch(update_registration),
        )
        .route("/classes/{id}/registrations", get(class_registrations))
        .with_state(state.clone());

    if state.settings.enable_swagger {
        let openapi = ApiDoc::openapi();
        let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi);
        router = router.merge(swagger);
    }

    router.layer(trace_layer)
}
