use anyhow::anyhow;
use axum::{
    routing::{post, get},
    Router,
    http::StatusCode,
    Json,
    extract::State,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{CorsLayer, Any};
use tracing::{info, error};

use url_integrity_service::errors::ServiceError;
use url_integrity_service::models::{UrlCheckRequest, UrlCheckResponse, ErrorResponse, CheckedUrl};
use url_integrity_service::rate_limiter::RateLimiter;
use url_integrity_service::url_check_service::UrlCheckService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting URL Integrity Check Service...");

    // Initialize services
    let url_check_service = Arc::new(UrlCheckService::new()?);

    let limit: u32 = std::env::var("RATE_LIMIT_MAX_REQUESTS")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(5);
    let window_ms: u64 = std::env::var("RATE_LIMIT_WINDOW_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(60_000);
    let rate_limiter = Arc::new(RateLimiter::new(limit, Duration::from_millis(window_ms))); // 5 checks per minute

    // Create shared state
    let state = Arc::new(AppState {
        url_check_service,
        rate_limiter,
    });

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Create router
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/check-url", post(check_url))
        .route("/checks", get(get_checks))
        .route("/checks/:id", get(get_check_by_id))
        .layer(cors)
        .with_state(state);

    // Start server with fallback port binding
    let listener = bind_with_fallback().await?;
    let addr = listener.local_addr()?;
    info!("Server listening on http://{}:{}", addr.ip(), addr.port());
    info!("Available endpoints:");
    info!("  GET  /health - Health check");
    info!("  POST /check-url - Check a URL against the safety API");
    info!("  GET  /checks - Get all completed checks");
    info!("  GET  /checks/:id - Get a specific check by ID");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn bind_with_fallback() -> anyhow::Result<tokio::net::TcpListener> {
    let preferred_port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    // Try preferred, then a small range, then ephemeral (0)
    let mut candidates: Vec<u16> = Vec::new();
    candidates.push(preferred_port);
    if preferred_port != 3000 { candidates.push(3000); }
    for p in 3001..=3010 { candidates.push(p); }
    candidates.push(0); // let OS choose an available ephemeral port

    for port in candidates {
        let addr = format!("0.0.0.0:{}", port);
        match tokio::net::TcpListener::bind(&addr).await {
            Ok(listener) => {
                if port == 0 {
                    info!("Bound to ephemeral port");
                } else {
                    info!("Bound to {}", addr);
                }
                return Ok(listener);
            }
            Err(e) => {
                if e.kind() != std::io::ErrorKind::AddrInUse {
                    error!("Failed to bind {}: {}", addr, e);
                } else {
                    info!("Port {} in use, trying next...", port);
                }
            }
        }
    }

    Err(anyhow!("Unable to bind to any port"))
}

#[derive(Clone)]
struct AppState {
    url_check_service: Arc<UrlCheckService>,
    rate_limiter: Arc<RateLimiter>,
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

async fn check_url(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UrlCheckRequest>,
) -> Result<Json<UrlCheckResponse>, (StatusCode, Json<ErrorResponse>)> {
    // Check rate limit before touching the network
    if !state.rate_limiter.check_rate_limit().await {
        return Err((
            StatusCode::TOO_MANY_REQUESTS,
            Json(ErrorResponse {
                error: "Rate limit exceeded".to_string(),
                message: "Please wait before making another request.".to_string(),
            })
        ));
    }

    match state.url_check_service.check_and_display_url(&request).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            error!("URL check error: {:?}", e);
            Err(error_response(e))
        }
    }
}

async fn get_checks(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CheckedUrl>>, (StatusCode, Json<ErrorResponse>)> {
    match state.url_check_service.get_all_checks().await {
        Ok(checks) => Ok(Json(checks)),
        Err(e) => {
            error!("Failed to get checks: {:?}", e);
            Err(error_response(e))
        }
    }
}

async fn get_check_by_id(
    State(state): State<Arc<AppState>>,
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<Json<CheckedUrl>, (StatusCode, Json<ErrorResponse>)> {
    match state.url_check_service.get_check_by_id(&id).await {
        Ok(check) => Ok(Json(check)),
        Err(e) => {
            error!("Failed to get check {}: {:?}", id, e);
            Err(error_response(e))
        }
    }
}

fn error_response(err: ServiceError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, label) = match &err {
        ServiceError::InvalidUrl(_) => (StatusCode::BAD_REQUEST, "Invalid URL"),
        ServiceError::CheckNotFound(_) => (StatusCode::NOT_FOUND, "Check not found"),
        ServiceError::UpstreamError(_) | ServiceError::UpstreamStatus(_) => {
            (StatusCode::BAD_GATEWAY, "URL check failed")
        }
    };
    (
        status,
        Json(ErrorResponse {
            error: label.to_string(),
            message: err.to_string(),
        })
    )
}
