//! API middleware stack.
//!
//! Execution order (outermost → innermost):
//! 1. Audit logger — logs every request with its final status
//! 2. Body limit — caps request size before JSON parsing

pub mod audit;
