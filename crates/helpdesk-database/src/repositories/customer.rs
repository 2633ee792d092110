//! Customer and priority rule repository.

use sqlx::PgPool;

use helpdesk_core::error::{AppError, ErrorKind};
use helpdesk_core::result::AppResult;
use helpdesk_core::types::CustomerId;
use helpdesk_entity::customer::{Customer, PriorityLevelRule};

/// Read access to customers and priority rules.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    /// Create a new customer repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a customer by ID.
    pub async fn find_by_id(&self, id: CustomerId) -> AppResult<Option<Customer>> {
        sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find customer", e))
    }

    /// All priority level rules.
    pub async fn find_priority_rules(&self) -> AppResult<Vec<PriorityLevelRule>> {
        sqlx::query_as::<_, PriorityLevelRule>("SELECT * FROM priority_level_rules ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list priority rules", e)
            })
    }
}
