//! Business-rule and persistence core for the balance sheet service.
//!
//! The [`Engine`] owns a database connection and exposes the balance sheet
//! store operations; the `reconcile` module holds the creation-time
//! normalization and auto-balancing rule.

pub use balance_sheet::{BalanceSheet, LineItem};
pub use error::EngineError;
pub use money::Money;
pub use ops::{Engine, EngineBuilder};
pub use reconcile::{ADJUSTMENT_NAME, DEFAULT_COMPANY_NAME, normalize_company_name, reconcile};

mod balance_sheet;
mod error;
mod money;
mod ops;
pub mod reconcile;

pub(crate) mod assets;
pub(crate) mod equities;
pub(crate) mod liabilities;
pub(crate) mod sheets;

type ResultEngine<T> = Result<T, EngineError>;
