//! Console entities, their form drafts, and fixture loading

mod draft;
mod entities;
pub mod loader;

pub use draft::{DraftError, OrderDraft, UserDraft};
pub use entities::{
    Commission, CommissionStatus, CommissionType, LogEntry, LogLevel, Order, OrderStatus, OrderType, Profit,
    ProfitStatus, ProfitType, User, UserRole, UserStatus, WithdrawalRequest,
};
pub use loader::{load_records, CsvRow, LoadError};
