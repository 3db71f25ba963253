//! Flutter-facing bindings for the PrepTrack core.

pub mod api;
