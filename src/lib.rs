//! # pledge-finance
//!
//! Pledge classification and payout-account state for the finance
//! dashboard of an issue crowdfunding platform.
//!
//! ## Usage
//!
//! ```
//! use pledge_finance::core::accounts::{derive_account_state, AccountState};
//! use pledge_finance::core::pledges::{classify, BucketName, ViewMode};
//! use pledge_finance::money::format_cents;
//!
//! let classification = classify(&[], ViewMode::Current);
//! assert_eq!(format_cents(classification.total(BucketName::Open)), "0.00");
//! assert_eq!(derive_account_state(&[]), AccountState::NoAccount);
//! ```
//!
//! ## Modules
//!
//! - `core` - Pure classification and account state functions
//! - `money` - Cents to dollar-string formatting and parsing
//! - `abstractions` - Trait-based seam to the finance backend and payout provider
//! - `actions` - Payout link requests with view-scoped cancellation
//! - `view` - Fetch, validate and assemble a finance dashboard snapshot
//! - `config` - Configuration loading
//! - `error` - Error type with stable codes
//! - `logging` - Tracing subscriber setup
//! - `testing` - Fixture builders and a mock finance backend
pub mod abstractions;
pub mod actions;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod money;
pub mod view;

pub mod testing;

pub use actions::{perform_account_action, perform_banner_action, ViewGuard, ViewLifetime};
pub use error::{FinanceError, Result};
pub use view::{load_finance_view, FinanceView};
