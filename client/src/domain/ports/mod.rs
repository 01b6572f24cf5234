//! Domain ports and the operation errors they surface.
//!
//! Ports describe how the domain expects to reach the backend service.
//! Adapters map their wire failures into the typed errors declared here;
//! each error displays a fixed user-facing message and keeps the low-level
//! cause available for logs only.

mod availability_probe;
mod image_store;
mod member_registrar;
mod post_catalog;
mod post_directory;

pub use availability_probe::{
    AvailabilityCheckError, AvailabilityProbe, FixtureAvailabilityProbe,
};
#[cfg(test)]
pub use availability_probe::MockAvailabilityProbe;
pub use image_store::{FixtureImageStore, ImageStore, ImageUploadError, ProfileImage};
#[cfg(test)]
pub use image_store::MockImageStore;
pub use member_registrar::{MemberRegistrar, RegistrationError};
#[cfg(test)]
pub use member_registrar::MockMemberRegistrar;
pub use post_catalog::{
    PostCatalog, PostDeleteError, PostFetchError, PostLikeError, PostModifyError, PostWriteError,
};
#[cfg(test)]
pub use post_catalog::MockPostCatalog;
pub use post_directory::{FixturePostDirectory, PostDirectory, PostListError};
#[cfg(test)]
pub use post_directory::MockPostDirectory;

macro_rules! operation_error {
    ($(#[$meta:meta])* $name:ident => $message:literal) => {
        $(#[$meta])*
        ///
        /// Displays a fixed user-facing message; the underlying gateway
        /// failure is retained as an inspectable cause, never surfaced
        /// verbatim to the UI.
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        #[error($message)]
        pub struct $name {
            cause: String,
        }

        impl $name {
            /// Wrap a low-level failure summary.
            pub fn backend(cause: impl Into<String>) -> Self {
                Self {
                    cause: cause.into(),
                }
            }

            /// Low-level failure summary for logs and diagnostics.
            #[must_use]
            pub fn cause(&self) -> &str {
                self.cause.as_str()
            }
        }
    };
}

pub(crate) use operation_error;
