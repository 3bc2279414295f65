use chrono::{Duration, Utc};
use fleetops_common::{TicketPriority, TicketStatus, VehicleStatus, WorkOrderStatus};

use crate::connection::Database;
use crate::error::{DbError, Result};
use crate::models::DashboardSnapshot;

pub struct DashboardQueries;

impl DashboardQueries {
    /// The seven current-state dashboard counters, each computed from the
    /// full store in one round trip. The hour and parts-cost totals cover
    /// work orders completed in the trailing 30 days.
    pub async fn snapshot(db: &Database) -> Result<DashboardSnapshot> {
        let pool = db.pool()?;

        let cutoff = Utc::now() - Duration::days(30);

        sqlx::query_as::<_, DashboardSnapshot>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM vehicles WHERE status = ?) as active_vehicles,
                (SELECT COUNT(*) FROM tickets WHERE status = ?) as open_tickets,
                (SELECT COUNT(*) FROM work_orders WHERE status = ?) as active_repairs,
                (SELECT COUNT(*) FROM vehicles WHERE status = ?) as vehicles_in_maintenance,
                (SELECT COUNT(*) FROM tickets WHERE priority = ? AND status != ?) as critical_issues,
                (SELECT COALESCE(SUM(total_labor_hours), 0.0) FROM work_orders WHERE completed_at > ?) as total_hours_last_month,
                (SELECT COALESCE(SUM(ri.parts_cost * ri.quantity), 0.0)
                 FROM repair_items ri
                 JOIN work_orders wo ON ri.work_order_id = wo.id
                 WHERE wo.completed_at > ?) as total_parts_cost_last_month
            "#,
        )
        .bind(VehicleStatus::Active.as_str())
        .bind(TicketStatus::Open.as_str())
        .bind(WorkOrderStatus::InProgress.as_str())
        .bind(VehicleStatus::Maintenance.as_str())
        .bind(TicketPriority::Critical.as_str())
        .bind(TicketStatus::Closed.as_str())
        .bind(cutoff)
        .bind(cutoff)
        .fetch_one(pool)
        .await
        .map_err(DbError::Sqlx)
    }
}
