//! quantdesk - computational core of the quantdesk trading console
//!
//! This library provides:
//! - Compounding return projections for the profit calculator
//! - Strategy presets and parallel scenario sweeps
//! - The filter / search / sort / paginate pipeline behind every admin list page
//! - Typed console entities (users, orders, commissions, ...) and fixture loading

pub mod config;
pub mod error;
pub mod listing;
pub mod projection;
pub mod records;

// Re-export commonly used types
pub use config::ConsoleConfig;
pub use error::CoreError;
pub use listing::{compute_visible_page, ListQuery, Record, TabularListController, VisiblePage};
pub use projection::{project, ProjectionResult, ReturnProjector, StrategyPreset};
