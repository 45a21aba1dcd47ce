//! Storefront Server - product catalog and order placement service
//!
//! # Module structure
//!
//! ```text
//! store-server/src/
//! ├── core/          # Config, state, server, errors
//! ├── store/         # In-memory repositories (products, orders)
//! ├── orders/        # Order workflow engine (reservation, status machine, money)
//! ├── api/           # HTTP routes and handlers
//! ├── validation     # Shared input validation predicates
//! └── utils/         # Logger and re-exported error types
//! ```
//!
//! Control flow for order placement: request → validation → read-only
//! availability pass → all-or-none stock reservation → order persisted as
//! `pending`. Cancel/delete reverse the reservation.

pub mod api;
pub mod core;
pub mod orders;
pub mod store;
pub mod utils;
pub mod validation;

// Re-export public types
pub use core::{Config, Server, ServerState};
pub use orders::OrderWorkflow;
pub use store::{OrderStore, ProductStore};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env, then initialize logging from LOG_LEVEL / LOG_DIR
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let level = std::env::var("LOG_LEVEL").ok();
    let dir = std::env::var("LOG_DIR").ok();
    utils::logger::init_logger_with_file(level.as_deref(), dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   _____ __                  ____                 __
  / ___// /_____  ________  / __/________  ____  / /_
  \__ \/ __/ __ \/ ___/ _ \/ /_/ ___/ __ \/ __ \/ __/
 ___/ / /_/ /_/ / /  /  __/ __/ /  / /_/ / / / / /_
/____/\__/\____/_/   \___/_/ /_/   \____/_/ /_/\__/
"#
    );
}
