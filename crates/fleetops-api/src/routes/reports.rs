use axum::extract::{Query, State};
use axum::Json;

use fleetops_common::ReportWindow;
use fleetops_db::queries::analytics::DEFAULT_COMMON_REPAIRS_LIMIT;
use fleetops_db::queries::{AnalyticsQueries, DashboardQueries, HealthQueries};
use fleetops_db::{
    CostCategoryStat, DashboardSnapshot, HealthScoreSnapshot, RepairCategoryStat,
    StatusDistributionEntry, TechnicianStat, TicketStatistics, TrendPoint, VehicleRepairStat,
};

use crate::error::ApiError;
use crate::params::{resolve_granularity, resolve_window, ReportQuery};
use crate::state::AppState;

pub async fn common_repairs(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Vec<RepairCategoryStat>>, ApiError> {
    let window = resolve_window(&query, ReportWindow::default_reports())?;
    let limit = query.limit.unwrap_or(DEFAULT_COMMON_REPAIRS_LIMIT);

    let rows = AnalyticsQueries::common_repairs(&state.db, window, limit).await?;
    Ok(Json(rows))
}

pub async fn repair_time_by_vehicle(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Vec<VehicleRepairStat>>, ApiError> {
    let window = resolve_window(&query, ReportWindow::default_reports())?;

    let rows = AnalyticsQueries::repair_time_by_vehicle(&state.db, window).await?;
    Ok(Json(rows))
}

pub async fn repair_time_by_technician(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Vec<TechnicianStat>>, ApiError> {
    let window = resolve_window(&query, ReportWindow::default_reports())?;

    let rows = AnalyticsQueries::repair_time_by_technician(&state.db, window).await?;
    Ok(Json(rows))
}

pub async fn vehicle_status_distribution(
    State(state): State<AppState>,
) -> Result<Json<Vec<StatusDistributionEntry>>, ApiError> {
    let rows = AnalyticsQueries::vehicle_status_distribution(&state.db).await?;
    Ok(Json(rows))
}

pub async fn ticket_trends(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Vec<TrendPoint>>, ApiError> {
    let window = resolve_window(&query, ReportWindow::default_reports())?;
    let granularity = resolve_granularity(&query)?;

    let rows = AnalyticsQueries::ticket_trends(&state.db, window, granularity).await?;
    Ok(Json(rows))
}

pub async fn cost_analysis(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Vec<CostCategoryStat>>, ApiError> {
    let window = resolve_window(&query, ReportWindow::default_reports())?;

    let rows = AnalyticsQueries::cost_analysis(&state.db, window).await?;
    Ok(Json(rows))
}

pub async fn fleet_health_score(
    State(state): State<AppState>,
) -> Result<Json<HealthScoreSnapshot>, ApiError> {
    let snapshot = HealthQueries::fleet_health_score(&state.db).await?;
    Ok(Json(snapshot))
}

pub async fn dashboard_summary(
    State(state): State<AppState>,
) -> Result<Json<DashboardSnapshot>, ApiError> {
    let snapshot = DashboardQueries::snapshot(&state.db).await?;
    Ok(Json(snapshot))
}

pub async fn ticket_statistics(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<TicketStatistics>, ApiError> {
    let window = resolve_window(&query, ReportWindow::default_ticket_stats())?;

    let stats = AnalyticsQueries::ticket_statistics(&state.db, window).await?;
    Ok(Json(stats))
}
