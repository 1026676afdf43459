//! Signup form state and submission flow.
//!
//! [`SignupController`] is host-agnostic: it talks to the auth provider,
//! the geolocation source and the navigator only through their traits. The
//! web handlers keep one controller per rendered form in a [`FormRegistry`].

mod controller;
mod draft;
mod registry;

pub use controller::{SignupController, SubmissionState, SubmitOutcome, CONFIRMATION_NOTICE};
pub use draft::RegistrationDraft;
pub use registry::{FormRegistry, FormSession, DEFAULT_MAX_FORMS};
