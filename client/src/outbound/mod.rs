//! Outbound adapters.
//!
//! Implementations of the domain ports against concrete transports. The
//! only transport today is the reading-log REST API.

pub mod rest;
