//! Core business logic module with pure functions
//!
//! This module contains pure functions that implement the finance dashboard
//! rules without any I/O operations. Following the "functional core,
//! imperative shell" pattern, all functions here:
//! - Take snapshots and explicit context as inputs and return outputs
//! - Never mutate pledge or account state
//! - Don't perform network operations
//! - Are easily testable without mocks

pub mod accounts;
pub mod context;
pub mod pledges;
