use axum::http::HeaderMap;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the caller's role, populated by the authentication
/// layer in front of this service.
pub const ROLE_HEADER: &str = "x-user-role";

/// Action name checked for the export endpoints.
pub const EXPORT_ACTION: &str = "export";

/// Authorization capability consumed by the export endpoints. The real
/// policy lives outside this service; this trait is the seam it plugs
/// into.
pub trait Authorize: Send + Sync {
    fn is_authorized(&self, role: &str, action: &str) -> bool;
}

/// Default policy: exports are restricted to privileged roles.
pub struct RoleAuthorizer;

impl Authorize for RoleAuthorizer {
    fn is_authorized(&self, role: &str, action: &str) -> bool {
        match action {
            EXPORT_ACTION => matches!(role, "Admin" | "Technician"),
            _ => false,
        }
    }
}

/// Gate an export request on the caller's role header.
pub fn authorize_export(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let role = headers
        .get(ROLE_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if state.authorizer.is_authorized(role, EXPORT_ACTION) {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Insufficient permissions".to_string()))
    }
}
