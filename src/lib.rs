//! # STO Rust Backend
//!
//! Timetable conflict detection and resolution engine.
//!
//! This crate provides the Rust backend for the School Timetable
//! Optimization (STO) system: given the full set of scheduled class
//! sessions, it detects scheduling conflicts (double-booked teachers,
//! double-booked halls) and attempts automatic remediation (hall
//! reassignment, substitute-teacher assignment), recording every attempt
//! in an append-only audit log. The backend exposes a REST API via Axum
//! for the React dashboard.
//!
//! ## Features
//!
//! - **Conflict Detection**: Single-pass scan over all sessions, reporting
//!   every pairwise collision on (teacher, slot) or (hall, slot)
//! - **Conflict Resolution**: Greedy local repair with per-attempt audit
//!   records; failed attempts are terminal for the pass and rediscovered
//!   on the next one
//! - **Timetable Import**: Parse and validate bulk timetable documents
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Identifier newtypes and DTO re-exports for API responses
//! - [`models`]: Domain types (sessions, teachers, time slots) and import parsing
//! - [`routes`]: Serializable DTO types per API surface area
//! - [`db`]: Store operations, repository pattern, and persistence layer
//! - [`services`]: The optimizer core — detection, resolution, orchestration
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Concurrency
//!
//! The optimizer has no internal scheduler; a pass runs synchronously per
//! request and all blocking happens at the store boundary. Resolutions
//! that mutate a session hold that session's lock from
//! [`services::SessionLockRegistry`], so concurrent passes cannot commit
//! conflicting reassignments from stale availability reads.

pub mod api;

pub mod db;
pub mod models;

pub mod routes;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
