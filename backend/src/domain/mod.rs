//! # Domain Module
//!
//! Contains the business logic of the payer rotation.
//!
//! ## Module Organization
//!
//! - **business_days**: business-day arithmetic and locale day/month names
//! - **rotation**: the rotation scheduler, exemption rule and replay checkpoints
//! - **member_service**: validated access to the member queue
//! - **payer_service**: loads a member snapshot and computes who pays
//! - **commands**: internal command/result types used by the services
//! - **models**: domain entities (members, remote weekdays)
//! - **errors**: error taxonomy surfaced to the IO layer
//!
//! ## Business Rules
//!
//! - Only Monday to Friday take part in the rotation
//! - A member remote on the day of their turn is covered by the next member,
//!   and keeps the turn for the next business day
//! - New members join at the tail of the rotation
//! - The rotation is always replayed from a fixed anchor date, so the result
//!   for any day depends only on the member list and that date

pub mod business_days;
pub mod commands;
pub mod errors;
pub mod member_service;
pub mod models;
pub mod payer_service;
pub mod rotation;

pub use errors::QueueError;
pub use member_service::MemberService;
pub use payer_service::PayerService;
pub use rotation::{
    DayAssignment, RotationCheckpoint, RotationOutcome, RotationScheduler, RotationState,
};
