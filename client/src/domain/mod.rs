//! Domain types, state machines, and ports.
//!
//! Everything in this module is transport agnostic: the REST adapters in
//! [`crate::outbound`] implement the ports declared here and map their wire
//! failures into the typed errors the domain exposes.

pub mod check_gate;
pub mod credential;
pub mod member;
pub mod ports;
pub mod post;
pub mod post_feed;
pub mod registration;

pub use check_gate::{
    CheckOutcome, CheckTicket, DuplicateCheckGate, FieldCheckState, IdentityField, Resolution,
};
pub use credential::{Credential, CredentialValidationError};
pub use member::{
    Email, ImageUrl, MemberValidationError, Nickname, Password, RegistrationDraft, Username,
};
pub use post::{MemberId, PlanId, Post, PostDraft, PostId, PostQuery, PostValidationError};
pub use post_feed::{FeedParams, FeedQuery, OwnerScope, PostFeed, SyncOutcome, PREVIEW_LIMIT};
pub use registration::RegistrationForm;
