pub mod exports;
pub mod reports;

use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/tickets/statistics", get(reports::ticket_statistics))
        .route("/api/reports/common-repairs", get(reports::common_repairs))
        .route("/api/reports/repair-time-by-vehicle", get(reports::repair_time_by_vehicle))
        .route(
            "/api/reports/repair-time-by-technician",
            get(reports::repair_time_by_technician),
        )
        .route(
            "/api/reports/vehicle-status-distribution",
            get(reports::vehicle_status_distribution),
        )
        .route("/api/reports/ticket-trends", get(reports::ticket_trends))
        .route("/api/reports/cost-analysis", get(reports::cost_analysis))
        .route("/api/reports/fleet-health-score", get(reports::fleet_health_score))
        .route("/api/reports/dashboard-summary", get(reports::dashboard_summary))
        .route(
            "/api/reports/export/maintenance-log",
            get(exports::export_maintenance_log),
        )
        .route(
            "/api/reports/export/repair-analytics",
            get(exports::export_repair_analytics),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "OK", "timestamp": Utc::now() }))
}
