use std::sync::Arc;
use std::time::Instant;

use crate::core::Config;
use crate::orders::OrderWorkflow;
use crate::store::{OrderStore, ProductStore};

/// Server state - shared references to all services
///
/// `ServerState` holds the in-memory repositories and the order workflow
/// engine behind `Arc`, so cloning is cheap and every handler sees the same
/// collections.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | config | Config | immutable configuration |
/// | products | Arc<ProductStore> | product records and stock counters |
/// | orders | Arc<OrderStore> | order records |
/// | workflow | Arc<OrderWorkflow> | order placement / status transitions |
/// | started_at | Instant | process start, for /health uptime |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub products: Arc<ProductStore>,
    pub orders: Arc<OrderStore>,
    pub workflow: Arc<OrderWorkflow>,
    pub started_at: Instant,
}

impl ServerState {
    /// Build the state graph: stores first, then the workflow engine that
    /// borrows both (no ambient/static state anywhere).
    pub fn initialize(config: &Config) -> Self {
        let products = Arc::new(ProductStore::new(config.restock_cap));
        let orders = Arc::new(OrderStore::new());
        let workflow = Arc::new(OrderWorkflow::new(products.clone(), orders.clone()));

        Self {
            config: config.clone(),
            products,
            orders,
            workflow,
            started_at: Instant::now(),
        }
    }

    /// Seconds since the server state was created
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
