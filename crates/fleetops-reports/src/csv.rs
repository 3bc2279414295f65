use std::io::Write;

use fleetops_db::RepairCategoryStat;

use crate::error::ReportError;
use crate::format::MaintenanceExportRow;

/// Maintenance log schema: (field key, display label) pairs in column
/// order. The order is part of the export contract.
pub const MAINTENANCE_LOG_SCHEMA: &[(&str, &str)] = &[
    ("vehicle_id", "Vehicle ID"),
    ("vin", "VIN"),
    ("make", "Make"),
    ("model", "Model"),
    ("date", "Date"),
    ("category", "Issue Category"),
    ("description", "Description"),
    ("fix", "Fix Applied"),
    ("parts_cost", "Parts Cost"),
    ("labor_hours", "Labor Hours"),
    ("technician", "Technician"),
    ("total_cost", "Total Cost"),
];

/// Repair analytics schema, same contract as [`MAINTENANCE_LOG_SCHEMA`].
pub const REPAIR_ANALYTICS_SCHEMA: &[(&str, &str)] = &[
    ("category", "Repair Category"),
    ("occurrence_count", "Times Performed"),
    ("total_cost", "Total Cost"),
    ("avg_cost_per_repair", "Avg Cost Per Repair"),
    ("unique_tickets", "Unique Tickets"),
];

fn labels<'a>(schema: &[(&'a str, &'a str)]) -> Vec<&'a str> {
    schema.iter().map(|(_, label)| *label).collect()
}

/// Write the maintenance log CSV: header row once, then one row per input
/// record in input order.
pub fn write_maintenance_log<W: Write>(
    out: W,
    rows: &[MaintenanceExportRow],
) -> Result<(), ReportError> {
    let mut writer = ::csv::Writer::from_writer(out);
    writer.write_record(labels(MAINTENANCE_LOG_SCHEMA))?;

    for row in rows {
        writer.write_record([
            row.vehicle_id.to_string(),
            row.vin.clone(),
            row.make.clone(),
            row.model.clone(),
            row.date.clone(),
            row.category.clone(),
            row.description.clone(),
            row.fix.clone(),
            row.parts_cost.clone(),
            row.labor_hours.clone(),
            row.technician.clone(),
            row.total_cost.clone(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the repair analytics CSV with 2-decimal monetary columns.
pub fn write_repair_analytics<W: Write>(
    out: W,
    rows: &[RepairCategoryStat],
) -> Result<(), ReportError> {
    let mut writer = ::csv::Writer::from_writer(out);
    writer.write_record(labels(REPAIR_ANALYTICS_SCHEMA))?;

    for row in rows {
        writer.write_record([
            row.category.clone(),
            row.occurrence_count.to_string(),
            format!("{:.2}", row.total_cost),
            format!("{:.2}", row.avg_cost_per_repair),
            row.unique_tickets.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
