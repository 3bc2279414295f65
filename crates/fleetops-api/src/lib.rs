pub mod auth;
pub mod config;
pub mod error;
pub mod params;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use state::AppState;
