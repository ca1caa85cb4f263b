//! Task ordering and workflow state management.
//!
//! Each owner's tasks are grouped into `todo`, `in_progress`, and `done`
//! columns. This module keeps every column at the contiguous positions
//! `0..n` across creation, deletion, reordering, and moves between columns,
//! and derives completion from the workflow status so the two can never
//! disagree. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
