use crate::connection::Database;
use crate::error::{DbError, Result};
use crate::models::MaintenanceRecord;
use fleetops_common::ReportWindow;

pub struct MaintenanceQueries;

impl MaintenanceQueries {
    /// Maintenance history rows for the export path: one row per ticket
    /// (per work order where a ticket has several), joined with vehicle,
    /// technician, and the summed repair-item parts cost. Scoped by ticket
    /// creation time, optionally to a single vehicle, newest first.
    pub async fn history(
        db: &Database,
        window: ReportWindow,
        vehicle_id: Option<i64>,
    ) -> Result<Vec<MaintenanceRecord>> {
        let pool = db.pool()?;

        let base = r#"
            SELECT
                t.id as ticket_id,
                v.id as vehicle_id,
                v.vin,
                v.make,
                v.model,
                t.category,
                t.description,
                t.created_at as reported_at,
                wo.started_at,
                wo.completed_at,
                wo.total_labor_hours,
                wo.notes,
                u.name as technician_name,
                COALESCE(SUM(ri.parts_cost * ri.quantity), 0.0) as total_parts_cost
            FROM tickets t
            JOIN vehicles v ON t.vehicle_id = v.id
            LEFT JOIN work_orders wo ON t.id = wo.ticket_id
            LEFT JOIN users u ON wo.assigned_technician_id = u.id
            LEFT JOIN repair_items ri ON wo.id = ri.work_order_id
            WHERE t.created_at BETWEEN ? AND ?
        "#;

        let group_order = r#"
            GROUP BY t.id, wo.id, v.id, v.vin, v.make, v.model, t.category, t.description,
                     t.created_at, wo.started_at, wo.completed_at, wo.total_labor_hours,
                     wo.notes, u.name
            ORDER BY t.created_at DESC, t.id DESC
        "#;

        let rows = match vehicle_id {
            Some(id) => {
                let sql = format!("{} AND t.vehicle_id = ? {}", base, group_order);
                sqlx::query_as::<_, MaintenanceRecord>(&sql)
                    .bind(window.start)
                    .bind(window.end)
                    .bind(id)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let sql = format!("{} {}", base, group_order);
                sqlx::query_as::<_, MaintenanceRecord>(&sql)
                    .bind(window.start)
                    .bind(window.end)
                    .fetch_all(pool)
                    .await
            }
        };

        rows.map_err(DbError::Sqlx)
    }
}
