pub mod analytics;
pub mod dashboard;
pub mod health;
pub mod maintenance;

pub use analytics::AnalyticsQueries;
pub use dashboard::DashboardQueries;
pub use health::HealthQueries;
pub use maintenance::MaintenanceQueries;

#[cfg(test)]
pub(crate) mod test_support;
