//! CodeQuest - Client Core for a Gamified Learning Platform
//!
//! Quest catalog, progress/leveling state machine, and persistence against
//! the CodeQuest backend, with a local fallback for anonymous guests.
//! Authentication, code execution and hint generation live behind the
//! backend API; this crate only speaks their contracts.

pub mod api;
pub mod catalog;
pub mod core;
pub mod identity;
pub mod progress;
