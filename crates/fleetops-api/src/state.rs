use std::sync::Arc;

use fleetops_db::Database;

use crate::auth::{Authorize, RoleAuthorizer};

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub authorizer: Arc<dyn Authorize>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            db: Arc::new(db),
            authorizer: Arc::new(RoleAuthorizer),
        }
    }

    pub fn with_authorizer(db: Database, authorizer: Arc<dyn Authorize>) -> Self {
        Self {
            db: Arc::new(db),
            authorizer,
        }
    }
}
