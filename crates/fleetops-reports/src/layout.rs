use chrono::{DateTime, Utc};
use fleetops_db::{CostCategoryStat, DashboardSnapshot, RepairCategoryStat, VehicleRepairStat};

/// One row of the vehicle performance table, already formatted for
/// display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub vin: String,
    pub make_model: String,
    pub hours: String,
    pub orders: String,
    pub cost: String,
}

/// A laid-out portion of the report. Sections are built first so
/// inclusion logic can be tested without a rendering backend; the PDF
/// pass only draws.
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Header {
        title: String,
        generated_at: DateTime<Utc>,
    },
    /// Label/value lines for the dashboard snapshot.
    Summary {
        title: String,
        lines: Vec<(String, String)>,
    },
    /// Numbered lines, one per entry.
    List {
        title: String,
        lines: Vec<String>,
    },
    /// Fixed-column table, starts on a new page.
    Table {
        title: String,
        rows: Vec<TableRow>,
    },
    /// One paragraph per category, starts on a new page.
    Cost {
        title: String,
        lines: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub sections: Vec<Section>,
}

/// Inputs for the fleet report. Any empty collection (or absent snapshot)
/// drops its section from the document entirely.
#[derive(Debug, Clone, Default)]
pub struct ReportInputs {
    pub summary: Option<DashboardSnapshot>,
    pub common_repairs: Vec<RepairCategoryStat>,
    pub vehicle_performance: Vec<VehicleRepairStat>,
    pub cost_analysis: Vec<CostCategoryStat>,
}

/// Turn a snake_case field key into a display label: separators become
/// spaces, each word is title-cased.
fn title_case_label(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn summary_lines(snapshot: &DashboardSnapshot) -> Vec<(String, String)> {
    vec![
        (title_case_label("active_vehicles"), snapshot.active_vehicles.to_string()),
        (title_case_label("open_tickets"), snapshot.open_tickets.to_string()),
        (title_case_label("active_repairs"), snapshot.active_repairs.to_string()),
        (
            title_case_label("vehicles_in_maintenance"),
            snapshot.vehicles_in_maintenance.to_string(),
        ),
        (title_case_label("critical_issues"), snapshot.critical_issues.to_string()),
        (
            title_case_label("total_hours_last_month"),
            format!("{:.2}", snapshot.total_hours_last_month),
        ),
        (
            title_case_label("total_parts_cost_last_month"),
            format!("{:.2}", snapshot.total_parts_cost_last_month),
        ),
    ]
}

/// Build the multi-section fleet report document. Section order is fixed:
/// header, summary, common repairs, vehicle performance, cost analysis.
pub fn build_fleet_report(inputs: ReportInputs) -> ReportDocument {
    let mut sections = vec![Section::Header {
        title: "Fleet Management Report".to_string(),
        generated_at: Utc::now(),
    }];

    if let Some(snapshot) = &inputs.summary {
        sections.push(Section::Summary {
            title: "Fleet Summary".to_string(),
            lines: summary_lines(snapshot),
        });
    }

    if !inputs.common_repairs.is_empty() {
        let lines = inputs
            .common_repairs
            .iter()
            .enumerate()
            .map(|(i, repair)| {
                format!(
                    "{}. {} - {} occurrences (${:.2})",
                    i + 1,
                    repair.category,
                    repair.occurrence_count,
                    repair.total_cost
                )
            })
            .collect();
        sections.push(Section::List {
            title: "Most Common Repairs".to_string(),
            lines,
        });
    }

    if !inputs.vehicle_performance.is_empty() {
        let rows = inputs
            .vehicle_performance
            .iter()
            .map(|vehicle| TableRow {
                vin: vehicle.vin.clone(),
                make_model: format!("{} {}", vehicle.make, vehicle.model),
                hours: format!("{:.1}", vehicle.total_hours),
                orders: vehicle.total_work_orders.to_string(),
                cost: format!("${:.2}", vehicle.total_parts_cost),
            })
            .collect();
        sections.push(Section::Table {
            title: "Vehicle Performance".to_string(),
            rows,
        });
    }

    if !inputs.cost_analysis.is_empty() {
        let lines = inputs
            .cost_analysis
            .iter()
            .map(|category| {
                format!(
                    "{}: {} repairs | Parts: ${:.2} | Labor: ${:.2}",
                    category.category,
                    category.repair_count,
                    category.total_parts_cost,
                    category.estimated_labor_cost
                )
            })
            .collect();
        sections.push(Section::Cost {
            title: "Cost Analysis by Category".to_string(),
            lines,
        });
    }

    ReportDocument { sections }
}
