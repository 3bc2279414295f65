pub mod csv;
pub mod error;
pub mod format;
pub mod layout;
pub mod pdf;
pub mod scratch;

pub use error::ReportError;
pub use format::{format_maintenance_rows, MaintenanceExportRow};
pub use layout::{build_fleet_report, ReportDocument, ReportInputs, Section};
pub use scratch::{ScratchFile, ScratchFileStream};
