use chrono::{DateTime, Utc};
use fleetops_common::{TicketPriority, TicketStatus, VehicleStatus, WorkOrderStatus};
use tempfile::tempdir;

use crate::connection::{Database, DatabaseConfig};

pub async fn setup_test_db() -> (Database, tempfile::TempDir) {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test.db");

    let config = DatabaseConfig {
        path: db_path.to_str().unwrap().to_string(),
    };

    let db = Database::new(config).await.unwrap();
    db.run_migrations().await.unwrap();
    (db, dir)
}

pub async fn insert_user(db: &Database, name: &str, role: &str) -> i64 {
    let email = format!("{}@fleetops.test", name.to_lowercase().replace(' ', "."));
    let result = sqlx::query(
        "INSERT INTO users (name, email, password_hash, role) VALUES (?, ?, 'x', ?)",
    )
    .bind(name)
    .bind(email)
    .bind(role)
    .execute(db.pool().unwrap())
    .await
    .unwrap();
    result.last_insert_rowid()
}

pub async fn insert_vehicle(
    db: &Database,
    vin: &str,
    make: &str,
    model: &str,
    status: VehicleStatus,
) -> i64 {
    let result = sqlx::query(
        "INSERT INTO vehicles (vin, make, model, year, status) VALUES (?, ?, ?, 2022, ?)",
    )
    .bind(vin)
    .bind(make)
    .bind(model)
    .bind(status.as_str())
    .execute(db.pool().unwrap())
    .await
    .unwrap();
    result.last_insert_rowid()
}

#[allow(clippy::too_many_arguments)]
pub async fn insert_ticket(
    db: &Database,
    vehicle_id: i64,
    submitted_by: i64,
    status: TicketStatus,
    priority: TicketPriority,
    category: &str,
    created_at: DateTime<Utc>,
) -> i64 {
    let result = sqlx::query(
        r#"
        INSERT INTO tickets (vehicle_id, submitted_by, status, priority, category, description, created_at)
        VALUES (?, ?, ?, ?, ?, 'test issue', ?)
        "#,
    )
    .bind(vehicle_id)
    .bind(submitted_by)
    .bind(status.as_str())
    .bind(priority.as_str())
    .bind(category)
    .bind(created_at)
    .execute(db.pool().unwrap())
    .await
    .unwrap();
    result.last_insert_rowid()
}

#[allow(clippy::too_many_arguments)]
pub async fn insert_work_order(
    db: &Database,
    ticket_id: i64,
    technician_id: Option<i64>,
    status: WorkOrderStatus,
    total_labor_hours: Option<f64>,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
) -> i64 {
    let result = sqlx::query(
        r#"
        INSERT INTO work_orders (ticket_id, assigned_technician_id, status, total_labor_hours, created_at, completed_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(ticket_id)
    .bind(technician_id)
    .bind(status.as_str())
    .bind(total_labor_hours)
    .bind(created_at)
    .bind(completed_at)
    .execute(db.pool().unwrap())
    .await
    .unwrap();
    result.last_insert_rowid()
}

pub async fn insert_repair_item(
    db: &Database,
    work_order_id: i64,
    category: &str,
    parts_cost: f64,
    quantity: i64,
) -> i64 {
    let result = sqlx::query(
        "INSERT INTO repair_items (work_order_id, category, parts_cost, quantity) VALUES (?, ?, ?, ?)",
    )
    .bind(work_order_id)
    .bind(category)
    .bind(parts_cost)
    .bind(quantity)
    .execute(db.pool().unwrap())
    .await
    .unwrap();
    result.last_insert_rowid()
}
