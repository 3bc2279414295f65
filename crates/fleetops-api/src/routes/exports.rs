use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap};
use axum::response::Response;
use chrono::Utc;
use tracing::info;

use fleetops_common::ReportWindow;
use fleetops_db::queries::analytics::DEFAULT_COMMON_REPAIRS_LIMIT;
use fleetops_db::queries::{AnalyticsQueries, DashboardQueries, MaintenanceQueries};
use fleetops_reports::csv::{write_maintenance_log, write_repair_analytics};
use fleetops_reports::{
    build_fleet_report, format_maintenance_rows, pdf, ReportError, ReportInputs, ScratchFile,
    ScratchFileStream,
};

use crate::auth::authorize_export;
use crate::error::ApiError;
use crate::params::{resolve_window, ReportQuery};
use crate::state::AppState;

/// The analytics export covers more categories than the interactive
/// report's default page.
const ANALYTICS_EXPORT_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        }
    }

    fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

/// The format parameter is checked before any query runs, so a bad
/// request never touches the store.
fn parse_format(query: &ReportQuery) -> Result<ExportFormat, ApiError> {
    match query.format.as_deref() {
        Some("csv") => Ok(ExportFormat::Csv),
        Some("pdf") => Ok(ExportFormat::Pdf),
        _ => Err(ApiError::Validation(
            "Invalid format. Use csv or pdf".to_string(),
        )),
    }
}

/// Spill the rendered bytes to a scratch file and stream it back as an
/// attachment. The stream owns the cleanup guard, so the file is removed
/// once the response completes, fails, or the client goes away.
async fn stream_attachment(
    report_name: &str,
    format: ExportFormat,
    contents: Vec<u8>,
) -> Result<Response, ApiError> {
    let scratch = ScratchFile::allocate(report_name, format.extension());
    scratch
        .write(&contents)
        .await
        .map_err(ReportError::from)?;

    let stream = ScratchFileStream::open(scratch)
        .await
        .map_err(ReportError::from)?;

    let filename = format!(
        "{}_{}.{}",
        report_name,
        Utc::now().timestamp_millis(),
        format.extension()
    );
    info!("Streaming export {} ({} bytes)", filename, contents.len());

    let response = Response::builder()
        .header(header::CONTENT_TYPE, format.content_type())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .body(Body::from_stream(stream))
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    Ok(response)
}

pub async fn export_maintenance_log(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ReportQuery>,
) -> Result<Response, ApiError> {
    authorize_export(&state, &headers)?;
    let format = parse_format(&query)?;
    let window = resolve_window(&query, ReportWindow::default_reports())?;

    let contents = match format {
        ExportFormat::Csv => {
            let records =
                MaintenanceQueries::history(&state.db, window, query.vehicle_id).await?;
            let rows = format_maintenance_rows(&records);

            let mut out = Vec::new();
            write_maintenance_log(&mut out, &rows)?;
            out
        }
        ExportFormat::Pdf => {
            let (summary, common_repairs, vehicle_performance, cost_analysis) = tokio::try_join!(
                DashboardQueries::snapshot(&state.db),
                AnalyticsQueries::common_repairs(&state.db, window, DEFAULT_COMMON_REPAIRS_LIMIT),
                AnalyticsQueries::repair_time_by_vehicle(&state.db, window),
                AnalyticsQueries::cost_analysis(&state.db, window),
            )?;

            let document = build_fleet_report(ReportInputs {
                summary: Some(summary),
                common_repairs,
                vehicle_performance,
                cost_analysis,
            });
            pdf::render(&document)?
        }
    };

    stream_attachment("maintenance_log", format, contents).await
}

pub async fn export_repair_analytics(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ReportQuery>,
) -> Result<Response, ApiError> {
    authorize_export(&state, &headers)?;
    if query.format.as_deref() != Some("csv") {
        return Err(ApiError::Validation(
            "Invalid format. Use csv".to_string(),
        ));
    }
    let window = resolve_window(&query, ReportWindow::default_reports())?;

    let rows = AnalyticsQueries::common_repairs(&state.db, window, ANALYTICS_EXPORT_LIMIT).await?;

    let mut out = Vec::new();
    write_repair_analytics(&mut out, &rows)?;

    stream_attachment("repair_analytics", ExportFormat::Csv, out).await
}
