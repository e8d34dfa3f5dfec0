//! Application layer - Commands, Queries, and Handlers.
//!
//! Handlers orchestrate domain rules over the ports. Commands mutate,
//! queries read; each handler owns the ports it needs as trait objects.

pub mod handlers;
