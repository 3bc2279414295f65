use chrono::Local;
use fleetops_common::LABOR_RATE_PER_HOUR;
use fleetops_db::MaintenanceRecord;
use serde::Serialize;

/// A maintenance history row flattened into display-ready strings for the
/// CSV export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaintenanceExportRow {
    pub vehicle_id: i64,
    pub vin: String,
    pub make: String,
    pub model: String,
    pub date: String,
    pub category: String,
    pub description: String,
    pub fix: String,
    pub parts_cost: String,
    pub labor_hours: String,
    pub technician: String,
    pub total_cost: String,
}

/// Reshape joined maintenance records into export rows, preserving input
/// order. Missing repair notes become "N/A", a missing technician becomes
/// "Unassigned", and missing numeric values are treated as 0 before
/// formatting. Total cost is parts plus labor hours at the fixed rate.
pub fn format_maintenance_rows(records: &[MaintenanceRecord]) -> Vec<MaintenanceExportRow> {
    records
        .iter()
        .map(|record| {
            let parts_cost = record.total_parts_cost;
            let labor_hours = record.total_labor_hours.unwrap_or(0.0);
            let total_cost = parts_cost + labor_hours * LABOR_RATE_PER_HOUR;

            MaintenanceExportRow {
                vehicle_id: record.vehicle_id,
                vin: record.vin.clone(),
                make: record.make.clone(),
                model: record.model.clone(),
                date: record
                    .reported_at
                    .with_timezone(&Local)
                    .format("%Y-%m-%d")
                    .to_string(),
                category: record.category.clone(),
                description: record.description.clone(),
                fix: record.notes.clone().unwrap_or_else(|| "N/A".to_string()),
                parts_cost: format!("{:.2}", parts_cost),
                labor_hours: format!("{:.2}", labor_hours),
                technician: record
                    .technician_name
                    .clone()
                    .unwrap_or_else(|| "Unassigned".to_string()),
                total_cost: format!("{:.2}", total_cost),
            }
        })
        .collect()
}
