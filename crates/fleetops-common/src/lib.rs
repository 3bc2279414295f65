pub mod types;
pub mod window;

pub use types::*;
pub use window::{ReportWindow, WindowError};
