use chrono::{Duration, Utc};
use fleetops_common::{TicketStatus, VehicleStatus};
use sqlx::Row;

use crate::connection::Database;
use crate::error::Result;
use crate::models::HealthScoreSnapshot;

/// Tickets beyond this count zero out the ticket half of the score.
const OPEN_TICKET_CEILING: i64 = 20;

/// Derive the 0-100 fleet health score from current counts.
///
/// Half the score comes from vehicle availability (active / total), half
/// from recent open-ticket load capped at [`OPEN_TICKET_CEILING`]. An
/// empty fleet contributes nothing from the vehicle term rather than
/// dividing by zero.
pub fn health_score(total_vehicles: i64, active_vehicles: i64, open_recent_tickets: i64) -> f64 {
    let vehicle_term = if total_vehicles > 0 {
        active_vehicles as f64 / total_vehicles as f64 * 50.0
    } else {
        0.0
    };

    let capped = open_recent_tickets.min(OPEN_TICKET_CEILING) as f64;
    let ticket_term = (1.0 - capped / OPEN_TICKET_CEILING as f64) * 50.0;

    let score = ((vehicle_term + ticket_term) * 100.0).round() / 100.0;
    score.clamp(0.0, 100.0)
}

pub struct HealthQueries;

impl HealthQueries {
    /// Current fleet counts plus open tickets from the trailing 30 days,
    /// combined into the health score.
    pub async fn fleet_health_score(db: &Database) -> Result<HealthScoreSnapshot> {
        let pool = db.pool()?;

        let fleet = sqlx::query(
            r#"
            SELECT
                COUNT(*) as total_vehicles,
                COUNT(CASE WHEN status = ? THEN 1 END) as active_vehicles,
                COUNT(CASE WHEN status = ? THEN 1 END) as maintenance_vehicles
            FROM vehicles
            "#,
        )
        .bind(VehicleStatus::Active.as_str())
        .bind(VehicleStatus::Maintenance.as_str())
        .fetch_one(pool)
        .await?;

        let total_vehicles: i64 = fleet.get("total_vehicles");
        let active_vehicles: i64 = fleet.get("active_vehicles");
        let maintenance_vehicles: i64 = fleet.get("maintenance_vehicles");

        let cutoff = Utc::now() - Duration::days(30);
        let open_tickets: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM tickets WHERE status IN (?, ?) AND created_at > ?",
        )
        .bind(TicketStatus::Open.as_str())
        .bind(TicketStatus::InProgress.as_str())
        .bind(cutoff)
        .fetch_one(pool)
        .await?;

        Ok(HealthScoreSnapshot {
            total_vehicles,
            active_vehicles,
            maintenance_vehicles,
            open_tickets,
            health_score: health_score(total_vehicles, active_vehicles, open_tickets),
        })
    }
}
