//! # taskboard
//!
//! A small kanban task tracker: a REST API over a SQLite store, plus a
//! drag-and-drop browser client served as static assets.
//!
//! ```text
//!        ┌──────────────────────────────────┐
//!        │         Browser client           │
//!        │  (three columns, drag-and-drop)  │
//!        └────────────────┬─────────────────┘
//!                         │ JSON over HTTP
//!                         ▼
//!                ┌─────────────────┐
//!                │  axum API       │
//!                └────────┬────────┘
//!                         ▼
//!                ┌─────────────────┐
//!                │  SQLite store   │
//!                └─────────────────┘
//! ```
//!
//! ## Task Flow
//! 1. Client fetches the full task set and partitions it by status
//! 2. Mutations (create, move, delete) go through the REST API
//! 3. The store soft-deletes and never removes rows
//! 4. Client refetches everything after each mutation
//!
//! ## Modules
//! - `api`: HTTP routes and wire types
//! - `task`: domain model and validation
//! - `store`: SQLite persistence

pub mod api;
pub mod config;
pub mod store;
pub mod task;

pub use config::Config;
pub use task::{Task, TaskError, TaskStatus};
