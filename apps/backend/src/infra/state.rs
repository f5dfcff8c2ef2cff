use std::sync::Arc;

use crate::config::db::{DbKind, RuntimeEnv};
use crate::domain::{HandSource, RandomHands};
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    env: RuntimeEnv,
    db_kind: Option<DbKind>,
    hands: Option<Arc<dyn HandSource>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            env: RuntimeEnv::Prod,
            db_kind: None,
            hands: None,
        }
    }

    pub fn with_env(mut self, env: RuntimeEnv) -> Self {
        self.env = env;
        self
    }

    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db_kind = Some(kind);
        self
    }

    pub fn with_hands(mut self, hands: Arc<dyn HandSource>) -> Self {
        self.hands = Some(hands);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let hands = self
            .hands
            .unwrap_or_else(|| Arc::new(RandomHands::default()));
        match self.db_kind {
            Some(kind) => {
                // single entrypoint: connect + migrate
                let conn = bootstrap_db(kind, self.env).await?;
                Ok(AppState::new(conn, hands))
            }
            None => Ok(AppState {
                db: None,
                hands,
            }),
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
