//! Step definitions for task board BDD scenarios.

pub mod when;
