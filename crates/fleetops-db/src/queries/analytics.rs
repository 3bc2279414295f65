use crate::connection::Database;
use crate::error::{DbError, Result};
use crate::models::{
    CostCategoryStat, RepairCategoryStat, StatusDistributionEntry, TechnicianStat,
    TicketStatistics, TrendPoint, VehicleRepairStat,
};
use fleetops_common::{
    Granularity, ReportWindow, TicketPriority, TicketStatus, WorkOrderStatus, LABOR_RATE_PER_HOUR,
};

/// Default row cap for the common-repairs report.
pub const DEFAULT_COMMON_REPAIRS_LIMIT: i64 = 10;

/// Windowed, read-only aggregations over maintenance history. Every
/// operation is a pure function of the window and current store state;
/// empty result sets are valid and never an error.
pub struct AnalyticsQueries;

impl AnalyticsQueries {
    /// Most common repair categories for tickets created within the
    /// window, ordered by occurrence count descending. Equal counts are
    /// broken by category name ascending so the order is deterministic.
    pub async fn common_repairs(
        db: &Database,
        window: ReportWindow,
        limit: i64,
    ) -> Result<Vec<RepairCategoryStat>> {
        let pool = db.pool()?;

        sqlx::query_as::<_, RepairCategoryStat>(
            r#"
            SELECT
                ri.category,
                COUNT(*) as occurrence_count,
                COALESCE(SUM(ri.parts_cost * ri.quantity), 0.0) as total_cost,
                COALESCE(AVG(ri.parts_cost * ri.quantity), 0.0) as avg_cost_per_repair,
                COUNT(DISTINCT wo.ticket_id) as unique_tickets
            FROM repair_items ri
            JOIN work_orders wo ON ri.work_order_id = wo.id
            JOIN tickets t ON wo.ticket_id = t.id
            WHERE t.created_at BETWEEN ? AND ?
            GROUP BY ri.category
            ORDER BY occurrence_count DESC, ri.category ASC
            LIMIT ?
            "#,
        )
        .bind(window.start)
        .bind(window.end)
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(DbError::Sqlx)
    }

    /// Repair effort grouped by vehicle over work orders completed within
    /// the window, ordered by total labor hours descending (VIN ascending
    /// on ties). Parts cost is summed in a subquery so work orders with
    /// several repair items are not double counted.
    pub async fn repair_time_by_vehicle(
        db: &Database,
        window: ReportWindow,
    ) -> Result<Vec<VehicleRepairStat>> {
        let pool = db.pool()?;

        sqlx::query_as::<_, VehicleRepairStat>(
            r#"
            SELECT
                v.id as vehicle_id,
                v.vin,
                v.make,
                v.model,
                v.year,
                COUNT(DISTINCT wo.id) as total_work_orders,
                COALESCE(SUM(wo.total_labor_hours), 0.0) as total_hours,
                COALESCE(AVG(wo.total_labor_hours), 0.0) as avg_hours_per_repair,
                COALESCE((
                    SELECT SUM(ri.parts_cost * ri.quantity)
                    FROM repair_items ri
                    JOIN work_orders wo2 ON ri.work_order_id = wo2.id
                    JOIN tickets t2 ON wo2.ticket_id = t2.id
                    WHERE t2.vehicle_id = v.id
                      AND wo2.completed_at BETWEEN ? AND ?
                ), 0.0) as total_parts_cost
            FROM vehicles v
            JOIN tickets t ON v.id = t.vehicle_id
            JOIN work_orders wo ON t.id = wo.ticket_id
            WHERE wo.completed_at BETWEEN ? AND ?
            GROUP BY v.id, v.vin, v.make, v.model, v.year
            ORDER BY total_hours DESC, v.vin ASC
            "#,
        )
        .bind(window.start)
        .bind(window.end)
        .bind(window.start)
        .bind(window.end)
        .fetch_all(pool)
        .await
        .map_err(DbError::Sqlx)
    }

    /// Workload grouped by technician over work orders created within the
    /// window, ordered by total labor hours descending (name ascending on
    /// ties).
    pub async fn repair_time_by_technician(
        db: &Database,
        window: ReportWindow,
    ) -> Result<Vec<TechnicianStat>> {
        let pool = db.pool()?;

        sqlx::query_as::<_, TechnicianStat>(
            r#"
            SELECT
                u.id as technician_id,
                u.name as technician_name,
                COUNT(wo.id) as total_work_orders,
                COALESCE(SUM(wo.total_labor_hours), 0.0) as total_hours,
                COALESCE(AVG(wo.total_labor_hours), 0.0) as avg_hours_per_repair,
                COUNT(CASE WHEN wo.status = ? THEN 1 END) as completed_orders,
                COUNT(CASE WHEN wo.status = ? THEN 1 END) as in_progress_orders
            FROM users u
            JOIN work_orders wo ON u.id = wo.assigned_technician_id
            WHERE wo.created_at BETWEEN ? AND ?
            GROUP BY u.id, u.name
            ORDER BY total_hours DESC, u.name ASC
            "#,
        )
        .bind(WorkOrderStatus::Completed.as_str())
        .bind(WorkOrderStatus::InProgress.as_str())
        .bind(window.start)
        .bind(window.end)
        .fetch_all(pool)
        .await
        .map_err(DbError::Sqlx)
    }

    /// Share of the fleet in each vehicle status. An empty fleet yields an
    /// empty result rather than a division by zero.
    pub async fn vehicle_status_distribution(
        db: &Database,
    ) -> Result<Vec<StatusDistributionEntry>> {
        let pool = db.pool()?;

        sqlx::query_as::<_, StatusDistributionEntry>(
            r#"
            SELECT
                status,
                COUNT(*) as count,
                ROUND(COUNT(*) * 100.0 / SUM(COUNT(*)) OVER (), 2) as percentage
            FROM vehicles
            GROUP BY status
            ORDER BY count DESC, status ASC
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(DbError::Sqlx)
    }

    /// Ticket counts bucketed by creation date truncated to the given
    /// granularity, ascending by period. Buckets with no tickets are not
    /// emitted.
    pub async fn ticket_trends(
        db: &Database,
        window: ReportWindow,
        granularity: Granularity,
    ) -> Result<Vec<TrendPoint>> {
        let pool = db.pool()?;

        sqlx::query_as::<_, TrendPoint>(
            r#"
            SELECT
                strftime(?, created_at) as period,
                COUNT(*) as total_tickets,
                COUNT(CASE WHEN status = ? THEN 1 END) as open_tickets,
                COUNT(CASE WHEN status = ? THEN 1 END) as in_progress_tickets,
                COUNT(CASE WHEN status = ? THEN 1 END) as closed_tickets,
                COUNT(CASE WHEN priority = ? THEN 1 END) as critical_tickets
            FROM tickets
            WHERE created_at BETWEEN ? AND ?
            GROUP BY period
            ORDER BY period ASC
            "#,
        )
        .bind(granularity.period_format())
        .bind(TicketStatus::Open.as_str())
        .bind(TicketStatus::InProgress.as_str())
        .bind(TicketStatus::Closed.as_str())
        .bind(TicketPriority::Critical.as_str())
        .bind(window.start)
        .bind(window.end)
        .fetch_all(pool)
        .await
        .map_err(DbError::Sqlx)
    }

    /// Parts and labor spend grouped by repair category for tickets
    /// created within the window, ordered by total parts cost descending
    /// (category ascending on ties). Labor cost is estimated at the fixed
    /// hourly rate.
    pub async fn cost_analysis(
        db: &Database,
        window: ReportWindow,
    ) -> Result<Vec<CostCategoryStat>> {
        let pool = db.pool()?;

        sqlx::query_as::<_, CostCategoryStat>(
            r#"
            SELECT
                ri.category,
                COUNT(DISTINCT wo.id) as repair_count,
                COALESCE(SUM(ri.parts_cost * ri.quantity), 0.0) as total_parts_cost,
                COALESCE(AVG(ri.parts_cost * ri.quantity), 0.0) as avg_parts_cost,
                COALESCE(SUM(wo.total_labor_hours), 0.0) as total_labor_hours,
                COALESCE(SUM(wo.total_labor_hours * ?), 0.0) as estimated_labor_cost
            FROM repair_items ri
            JOIN work_orders wo ON ri.work_order_id = wo.id
            JOIN tickets t ON wo.ticket_id = t.id
            WHERE t.created_at BETWEEN ? AND ?
            GROUP BY ri.category
            ORDER BY total_parts_cost DESC, ri.category ASC
            "#,
        )
        .bind(LABOR_RATE_PER_HOUR)
        .bind(window.start)
        .bind(window.end)
        .fetch_all(pool)
        .await
        .map_err(DbError::Sqlx)
    }

    /// Ticket totals by status for tickets created within the window.
    pub async fn ticket_statistics(
        db: &Database,
        window: ReportWindow,
    ) -> Result<TicketStatistics> {
        let pool = db.pool()?;

        sqlx::query_as::<_, TicketStatistics>(
            r#"
            SELECT
                COUNT(*) as total_tickets,
                COUNT(CASE WHEN status = ? THEN 1 END) as open_tickets,
                COUNT(CASE WHEN status = ? THEN 1 END) as in_progress_tickets,
                COUNT(CASE WHEN status = ? THEN 1 END) as closed_tickets,
                COUNT(CASE WHEN priority = ? THEN 1 END) as critical_tickets
            FROM tickets
            WHERE created_at BETWEEN ? AND ?
            "#,
        )
        .bind(TicketStatus::Open.as_str())
        .bind(TicketStatus::InProgress.as_str())
        .bind(TicketStatus::Closed.as_str())
        .bind(TicketPriority::Critical.as_str())
        .bind(window.start)
        .bind(window.end)
        .fetch_one(pool)
        .await
        .map_err(DbError::Sqlx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::test_support::*;
    use chrono::{TimeZone, Utc};
    use fleetops_common::VehicleStatus;

    fn january() -> ReportWindow {
        ReportWindow::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_common_repairs_single_category() {
        let (db, _dir) = setup_test_db().await;
        let window = january();

        let user = insert_user(&db, "Dana Ops", "Admin").await;
        let vehicle = insert_vehicle(&db, "1FTSW21P", "Ford", "F-350", VehicleStatus::Active).await;

        // Three Brakes items of cost 100, 150, 200 on distinct tickets.
        for (cost, day) in [(100.0, 5), (150.0, 12), (200.0, 20)] {
            let created = Utc.with_ymd_and_hms(2024, 1, day, 8, 0, 0).unwrap();
            let ticket = insert_ticket(&db, vehicle, user, TicketStatus::Open, TicketPriority::Medium, "Brakes", created).await;
            let wo = insert_work_order(&db, ticket, None, WorkOrderStatus::Completed, Some(2.0), created, None).await;
            insert_repair_item(&db, wo, "Brakes", cost, 1).await;
        }

        let rows = AnalyticsQueries::common_repairs(&db, window, 10).await.unwrap();
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.category, "Brakes");
        assert_eq!(row.occurrence_count, 3);
        assert_eq!(row.total_cost, 450.0);
        assert_eq!(row.avg_cost_per_repair, 150.0);
        assert_eq!(row.unique_tickets, 3);
    }

    #[tokio::test]
    async fn test_common_repairs_ordering_and_tie_break() {
        let (db, _dir) = setup_test_db().await;
        let window = january();

        let user = insert_user(&db, "Dana Ops", "Admin").await;
        let vehicle = insert_vehicle(&db, "1FTSW21P", "Ford", "F-350", VehicleStatus::Active).await;
        let created = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();

        let ticket = insert_ticket(&db, vehicle, user, TicketStatus::Open, TicketPriority::Medium, "Misc", created).await;
        let wo = insert_work_order(&db, ticket, None, WorkOrderStatus::Completed, Some(1.0), created, None).await;

        // Tires appears three times; Brakes and Coolant once each.
        for _ in 0..3 {
            insert_repair_item(&db, wo, "Tires", 50.0, 1).await;
        }
        insert_repair_item(&db, wo, "Coolant", 30.0, 1).await;
        insert_repair_item(&db, wo, "Brakes", 40.0, 1).await;

        let rows = AnalyticsQueries::common_repairs(&db, window, 10).await.unwrap();
        let categories: Vec<&str> = rows.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(categories, vec!["Tires", "Brakes", "Coolant"]);
    }

    #[tokio::test]
    async fn test_common_repairs_respects_window_and_limit() {
        let (db, _dir) = setup_test_db().await;
        let window = january();

        let user = insert_user(&db, "Dana Ops", "Admin").await;
        let vehicle = insert_vehicle(&db, "1FTSW21P", "Ford", "F-350", VehicleStatus::Active).await;

        // In-window item plus one on a February ticket.
        let created = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();
        let ticket = insert_ticket(&db, vehicle, user, TicketStatus::Open, TicketPriority::Medium, "Brakes", created).await;
        let wo = insert_work_order(&db, ticket, None, WorkOrderStatus::Completed, Some(1.0), created, None).await;
        insert_repair_item(&db, wo, "Brakes", 100.0, 1).await;

        let late = Utc.with_ymd_and_hms(2024, 2, 2, 8, 0, 0).unwrap();
        let ticket2 = insert_ticket(&db, vehicle, user, TicketStatus::Open, TicketPriority::Medium, "Tires", late).await;
        let wo2 = insert_work_order(&db, ticket2, None, WorkOrderStatus::Completed, Some(1.0), late, None).await;
        insert_repair_item(&db, wo2, "Tires", 60.0, 1).await;

        let rows = AnalyticsQueries::common_repairs(&db, window, 10).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category, "Brakes");

        // Grouped consistency: occurrence counts sum to in-window items.
        let total: i64 = rows.iter().map(|r| r.occurrence_count).sum();
        assert_eq!(total, 1);

        let limited = AnalyticsQueries::common_repairs(&db, window, 0).await.unwrap();
        assert!(limited.is_empty());
    }

    #[tokio::test]
    async fn test_common_repairs_quantity_multiplies_cost() {
        let (db, _dir) = setup_test_db().await;
        let window = january();

        let user = insert_user(&db, "Dana Ops", "Admin").await;
        let vehicle = insert_vehicle(&db, "1FTSW21P", "Ford", "F-350", VehicleStatus::Active).await;
        let created = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();
        let ticket = insert_ticket(&db, vehicle, user, TicketStatus::Open, TicketPriority::Medium, "Brakes", created).await;
        let wo = insert_work_order(&db, ticket, None, WorkOrderStatus::Completed, Some(1.0), created, None).await;
        insert_repair_item(&db, wo, "Brakes", 25.0, 4).await;

        let rows = AnalyticsQueries::common_repairs(&db, window, 10).await.unwrap();
        assert_eq!(rows[0].total_cost, 100.0);
    }

    #[tokio::test]
    async fn test_repair_time_by_vehicle() {
        let (db, _dir) = setup_test_db().await;
        let window = january();

        let user = insert_user(&db, "Dana Ops", "Admin").await;
        let busy = insert_vehicle(&db, "AAA111", "Ford", "F-350", VehicleStatus::Active).await;
        let idle = insert_vehicle(&db, "BBB222", "Ram", "2500", VehicleStatus::Active).await;

        let created = Utc.with_ymd_and_hms(2024, 1, 5, 8, 0, 0).unwrap();
        let done = Utc.with_ymd_and_hms(2024, 1, 8, 17, 0, 0).unwrap();

        let t1 = insert_ticket(&db, busy, user, TicketStatus::Closed, TicketPriority::High, "Engine", created).await;
        let wo1 = insert_work_order(&db, t1, None, WorkOrderStatus::Completed, Some(6.0), created, Some(done)).await;
        insert_repair_item(&db, wo1, "Engine", 300.0, 1).await;
        insert_repair_item(&db, wo1, "Engine", 50.0, 2).await;

        let t2 = insert_ticket(&db, busy, user, TicketStatus::Closed, TicketPriority::Low, "Brakes", created).await;
        insert_work_order(&db, t2, None, WorkOrderStatus::Completed, Some(2.0), created, Some(done)).await;

        let t3 = insert_ticket(&db, idle, user, TicketStatus::Closed, TicketPriority::Low, "Tires", created).await;
        insert_work_order(&db, t3, None, WorkOrderStatus::Completed, Some(1.5), created, Some(done)).await;

        let rows = AnalyticsQueries::repair_time_by_vehicle(&db, window).await.unwrap();
        assert_eq!(rows.len(), 2);

        // Ordered by total hours descending.
        assert_eq!(rows[0].vin, "AAA111");
        assert_eq!(rows[0].total_work_orders, 2);
        assert_eq!(rows[0].total_hours, 8.0);
        assert_eq!(rows[0].avg_hours_per_repair, 4.0);
        assert_eq!(rows[0].total_parts_cost, 400.0);

        assert_eq!(rows[1].vin, "BBB222");
        assert_eq!(rows[1].total_hours, 1.5);
        assert_eq!(rows[1].total_parts_cost, 0.0);
    }

    #[tokio::test]
    async fn test_repair_time_by_vehicle_requires_completion_in_window() {
        let (db, _dir) = setup_test_db().await;
        let window = january();

        let user = insert_user(&db, "Dana Ops", "Admin").await;
        let vehicle = insert_vehicle(&db, "AAA111", "Ford", "F-350", VehicleStatus::Active).await;

        let created = Utc.with_ymd_and_hms(2024, 1, 5, 8, 0, 0).unwrap();
        let ticket = insert_ticket(&db, vehicle, user, TicketStatus::Open, TicketPriority::Low, "Engine", created).await;
        // Still in progress, no completion timestamp.
        insert_work_order(&db, ticket, None, WorkOrderStatus::InProgress, Some(3.0), created, None).await;

        let rows = AnalyticsQueries::repair_time_by_vehicle(&db, window).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_repair_time_by_technician() {
        let (db, _dir) = setup_test_db().await;
        let window = january();

        let admin = insert_user(&db, "Dana Ops", "Admin").await;
        let alice = insert_user(&db, "Alice Wrench", "Technician").await;
        let bob = insert_user(&db, "Bob Torque", "Technician").await;
        let vehicle = insert_vehicle(&db, "AAA111", "Ford", "F-350", VehicleStatus::Active).await;

        let created = Utc.with_ymd_and_hms(2024, 1, 5, 8, 0, 0).unwrap();

        let t1 = insert_ticket(&db, vehicle, admin, TicketStatus::InProgress, TicketPriority::High, "Engine", created).await;
        insert_work_order(&db, t1, Some(alice), WorkOrderStatus::Completed, Some(5.0), created, None).await;
        let t2 = insert_ticket(&db, vehicle, admin, TicketStatus::InProgress, TicketPriority::Low, "Brakes", created).await;
        insert_work_order(&db, t2, Some(alice), WorkOrderStatus::InProgress, Some(2.0), created, None).await;
        let t3 = insert_ticket(&db, vehicle, admin, TicketStatus::InProgress, TicketPriority::Low, "Tires", created).await;
        insert_work_order(&db, t3, Some(bob), WorkOrderStatus::Completed, Some(4.0), created, None).await;

        let rows = AnalyticsQueries::repair_time_by_technician(&db, window).await.unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].technician_name, "Alice Wrench");
        assert_eq!(rows[0].total_work_orders, 2);
        assert_eq!(rows[0].total_hours, 7.0);
        assert_eq!(rows[0].completed_orders, 1);
        assert_eq!(rows[0].in_progress_orders, 1);

        assert_eq!(rows[1].technician_name, "Bob Torque");
        assert_eq!(rows[1].completed_orders, 1);
        assert_eq!(rows[1].in_progress_orders, 0);
    }

    #[tokio::test]
    async fn test_vehicle_status_distribution() {
        let (db, _dir) = setup_test_db().await;

        insert_vehicle(&db, "A1", "Ford", "F-350", VehicleStatus::Active).await;
        insert_vehicle(&db, "A2", "Ford", "F-350", VehicleStatus::Active).await;
        insert_vehicle(&db, "A3", "Ford", "F-350", VehicleStatus::Active).await;
        insert_vehicle(&db, "M1", "Ram", "2500", VehicleStatus::Maintenance).await;

        let rows = AnalyticsQueries::vehicle_status_distribution(&db).await.unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].status, VehicleStatus::Active.as_str());
        assert_eq!(rows[0].count, 3);
        assert_eq!(rows[0].percentage, 75.0);
        assert_eq!(rows[1].status, VehicleStatus::Maintenance.as_str());
        assert_eq!(rows[1].percentage, 25.0);

        let total: f64 = rows.iter().map(|r| r.percentage).sum();
        assert!((total - 100.0).abs() < 0.01);
    }

    #[tokio::test]
    async fn test_vehicle_status_distribution_empty_fleet() {
        let (db, _dir) = setup_test_db().await;

        let rows = AnalyticsQueries::vehicle_status_distribution(&db).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_ticket_trends_daily_sparse() {
        let (db, _dir) = setup_test_db().await;
        let window = january();

        let user = insert_user(&db, "Dana Ops", "Admin").await;
        let vehicle = insert_vehicle(&db, "AAA111", "Ford", "F-350", VehicleStatus::Active).await;

        // Two tickets on the 5th, one on the 20th; the gap stays empty.
        let d5 = Utc.with_ymd_and_hms(2024, 1, 5, 8, 0, 0).unwrap();
        insert_ticket(&db, vehicle, user, TicketStatus::Open, TicketPriority::Critical, "Engine", d5).await;
        insert_ticket(&db, vehicle, user, TicketStatus::Closed, TicketPriority::Low, "Brakes", d5).await;
        let d20 = Utc.with_ymd_and_hms(2024, 1, 20, 8, 0, 0).unwrap();
        insert_ticket(&db, vehicle, user, TicketStatus::InProgress, TicketPriority::Medium, "Tires", d20).await;

        let rows = AnalyticsQueries::ticket_trends(&db, window, Granularity::Day)
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].period, "2024-01-05");
        assert_eq!(rows[0].total_tickets, 2);
        assert_eq!(rows[0].open_tickets, 1);
        assert_eq!(rows[0].closed_tickets, 1);
        assert_eq!(rows[0].critical_tickets, 1);

        assert_eq!(rows[1].period, "2024-01-20");
        assert_eq!(rows[1].in_progress_tickets, 1);
    }

    #[tokio::test]
    async fn test_ticket_trends_monthly() {
        let (db, _dir) = setup_test_db().await;
        let window = ReportWindow::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap(),
        )
        .unwrap();

        let user = insert_user(&db, "Dana Ops", "Admin").await;
        let vehicle = insert_vehicle(&db, "AAA111", "Ford", "F-350", VehicleStatus::Active).await;

        let jan = Utc.with_ymd_and_hms(2024, 1, 5, 8, 0, 0).unwrap();
        insert_ticket(&db, vehicle, user, TicketStatus::Open, TicketPriority::Low, "Engine", jan).await;
        let mar = Utc.with_ymd_and_hms(2024, 3, 15, 8, 0, 0).unwrap();
        insert_ticket(&db, vehicle, user, TicketStatus::Open, TicketPriority::Low, "Brakes", mar).await;

        let rows = AnalyticsQueries::ticket_trends(&db, window, Granularity::Month)
            .await
            .unwrap();
        let periods: Vec<&str> = rows.iter().map(|r| r.period.as_str()).collect();
        assert_eq!(periods, vec!["2024-01", "2024-03"]);
    }

    #[tokio::test]
    async fn test_cost_analysis() {
        let (db, _dir) = setup_test_db().await;
        let window = january();

        let user = insert_user(&db, "Dana Ops", "Admin").await;
        let vehicle = insert_vehicle(&db, "AAA111", "Ford", "F-350", VehicleStatus::Active).await;
        let created = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();

        let t1 = insert_ticket(&db, vehicle, user, TicketStatus::Closed, TicketPriority::High, "Engine", created).await;
        let wo1 = insert_work_order(&db, t1, None, WorkOrderStatus::Completed, Some(4.0), created, None).await;
        insert_repair_item(&db, wo1, "Engine", 500.0, 1).await;

        let t2 = insert_ticket(&db, vehicle, user, TicketStatus::Closed, TicketPriority::Low, "Brakes", created).await;
        let wo2 = insert_work_order(&db, t2, None, WorkOrderStatus::Completed, Some(2.0), created, None).await;
        insert_repair_item(&db, wo2, "Brakes", 120.0, 1).await;

        let rows = AnalyticsQueries::cost_analysis(&db, window).await.unwrap();
        assert_eq!(rows.len(), 2);

        // Ordered by parts cost descending.
        assert_eq!(rows[0].category, "Engine");
        assert_eq!(rows[0].repair_count, 1);
        assert_eq!(rows[0].total_parts_cost, 500.0);
        assert_eq!(rows[0].total_labor_hours, 4.0);
        assert_eq!(rows[0].estimated_labor_cost, 300.0);

        assert_eq!(rows[1].category, "Brakes");
        assert_eq!(rows[1].estimated_labor_cost, 150.0);
    }

    #[tokio::test]
    async fn test_ticket_statistics() {
        let (db, _dir) = setup_test_db().await;
        let window = january();

        let user = insert_user(&db, "Dana Ops", "Admin").await;
        let vehicle = insert_vehicle(&db, "AAA111", "Ford", "F-350", VehicleStatus::Active).await;
        let created = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();

        insert_ticket(&db, vehicle, user, TicketStatus::Open, TicketPriority::Critical, "Engine", created).await;
        insert_ticket(&db, vehicle, user, TicketStatus::InProgress, TicketPriority::Low, "Brakes", created).await;
        insert_ticket(&db, vehicle, user, TicketStatus::Closed, TicketPriority::Low, "Tires", created).await;
        insert_ticket(&db, vehicle, user, TicketStatus::Closed, TicketPriority::Low, "Tires", created).await;

        let stats = AnalyticsQueries::ticket_statistics(&db, window).await.unwrap();
        assert_eq!(stats.total_tickets, 4);
        assert_eq!(stats.open_tickets, 1);
        assert_eq!(stats.in_progress_tickets, 1);
        assert_eq!(stats.closed_tickets, 2);
        assert_eq!(stats.critical_tickets, 1);
    }

    #[tokio::test]
    async fn test_ticket_statistics_empty_window() {
        let (db, _dir) = setup_test_db().await;
        let window = january();

        let stats = AnalyticsQueries::ticket_statistics(&db, window).await.unwrap();
        assert_eq!(stats.total_tickets, 0);
        assert_eq!(stats.critical_tickets, 0);
    }
}
