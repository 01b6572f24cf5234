//! Client SDK for the reading-log service.
//!
//! Members of the service track books, publish reading posts, and manage a
//! profile. This crate owns the data-flow side of that client: typed REST
//! operations over an authenticated gateway, the duplicate-check gate that
//! guards registration, and the synchroniser that pages a member's posts
//! into a displayed collection. Rendering and routing belong to the
//! embedding application.

pub mod domain;
pub mod outbound;

pub use outbound::rest::{RestClient, RestGateway};
