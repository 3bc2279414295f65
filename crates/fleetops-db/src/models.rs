use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One repair category grouped over a report window, ordered by how often
/// it occurred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RepairCategoryStat {
    pub category: String,
    pub occurrence_count: i64,
    pub total_cost: f64,
    pub avg_cost_per_repair: f64,
    pub unique_tickets: i64,
}

/// Per-vehicle repair effort over a window of completed work orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct VehicleRepairStat {
    pub vehicle_id: i64,
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i64,
    pub total_work_orders: i64,
    pub total_hours: f64,
    pub avg_hours_per_repair: f64,
    pub total_parts_cost: f64,
}

/// Per-technician workload over a window of created work orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TechnicianStat {
    pub technician_id: i64,
    pub technician_name: String,
    pub total_work_orders: i64,
    pub total_hours: f64,
    pub avg_hours_per_repair: f64,
    pub completed_orders: i64,
    pub in_progress_orders: i64,
}

/// Share of the fleet currently in one vehicle status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StatusDistributionEntry {
    pub status: String,
    pub count: i64,
    pub percentage: f64,
}

/// Ticket counts for one calendar bucket. Buckets with no tickets are not
/// emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TrendPoint {
    pub period: String,
    pub total_tickets: i64,
    pub open_tickets: i64,
    pub in_progress_tickets: i64,
    pub closed_tickets: i64,
    pub critical_tickets: i64,
}

/// Parts and estimated labor spend for one repair category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CostCategoryStat {
    pub category: String,
    pub repair_count: i64,
    pub total_parts_cost: f64,
    pub avg_parts_cost: f64,
    pub total_labor_hours: f64,
    pub estimated_labor_cost: f64,
}

/// Fleet availability blended with recent open-ticket load, bounded to
/// [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthScoreSnapshot {
    pub total_vehicles: i64,
    pub active_vehicles: i64,
    pub maintenance_vehicles: i64,
    pub open_tickets: i64,
    pub health_score: f64,
}

/// Current-state counters backing the dashboard, each computed from the
/// full store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DashboardSnapshot {
    pub active_vehicles: i64,
    pub open_tickets: i64,
    pub active_repairs: i64,
    pub vehicles_in_maintenance: i64,
    pub critical_issues: i64,
    pub total_hours_last_month: f64,
    pub total_parts_cost_last_month: f64,
}

/// Ticket totals by status over a window, defaulting to the trailing
/// 30 days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TicketStatistics {
    pub total_tickets: i64,
    pub open_tickets: i64,
    pub in_progress_tickets: i64,
    pub closed_tickets: i64,
    pub critical_tickets: i64,
}

/// Denormalized maintenance history row: one per ticket, joined with its
/// work order, technician, and summed repair-item parts cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MaintenanceRecord {
    pub ticket_id: i64,
    pub vehicle_id: i64,
    pub vin: String,
    pub make: String,
    pub model: String,
    pub category: String,
    pub description: String,
    pub reported_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub total_labor_hours: Option<f64>,
    pub notes: Option<String>,
    pub technician_name: Option<String>,
    pub total_parts_cost: f64,
}
