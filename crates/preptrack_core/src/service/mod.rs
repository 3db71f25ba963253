//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate pure mutations and snapshot persistence into session-level
//!   APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod tracker_store;
