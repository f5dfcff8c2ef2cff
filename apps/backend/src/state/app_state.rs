use std::fmt;
use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::domain::{HandSource, RandomHands};

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Database connection (absent only in tests that never touch the store)
    pub db: Option<DatabaseConnection>,
    /// Source of the computer's hands
    pub hands: Arc<dyn HandSource>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, hands: Arc<dyn HandSource>) -> Self {
        Self {
            db: Some(db),
            hands,
        }
    }

    pub fn without_db() -> Self {
        Self {
            db: None,
            hands: Arc::new(RandomHands::default()),
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    pub fn hands(&self) -> Arc<dyn HandSource> {
        Arc::clone(&self.hands)
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db.is_some())
            .finish_non_exhaustive()
    }
}
