//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain services. Translates
//! requests into domain commands, domain results into the DTOs defined in
//! the `shared` crate, and domain errors into HTTP status codes.
//!
//! ## Supported Operations
//!
//! - **GET /api/members**: list the queue in rotation order
//! - **POST /api/members**: append a member, returning the recomputed queue
//! - **GET /api/payer/today**: queue with today's payer highlighted
//! - **GET /api/payer?date=YYYY-MM-DD**: same for any date since the anchor
//! - **GET /api/payer/upcoming?days=N&from=YYYY-MM-DD**: payers of the next business days
//! - **GET /api/health**: liveness probe

pub mod rest;

pub use rest::*;
