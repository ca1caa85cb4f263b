//! Taskflow: personal task tracking core.
//!
//! This crate provides the task ordering and state-transition logic behind a
//! personal Kanban-style tracker. Routing, rendering, sessions, and
//! authentication belong to the embedding application, which calls into
//! [`task::services::TaskService`] with an authenticated owner.
//!
//! # Architecture
//!
//! Taskflow follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, memory)
//!
//! # Modules
//!
//! - [`task`]: Task ordering, workflow transitions, and persistence
//! - [`config`]: Storage and service configuration

pub mod config;
pub mod task;
