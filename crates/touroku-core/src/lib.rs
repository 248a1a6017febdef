//! touroku-core: Registration wizard domain logic (sans-IO).
//!
//! Models the multi-step registration flow: the mutable draft record,
//! per-step field validation, the wizard state machine, the payment
//! screenshot upload lifecycle, client-side screenshot re-encoding,
//! and outbound payload assembly.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! data and returns structured results. All browser/network interaction
//! lives in `touroku-io`.

pub mod config;
pub mod draft;
pub mod payload;
pub mod screenshot;
pub mod upload;
pub mod validate;
pub mod window;
pub mod wizard;

pub use config::FormConfig;
pub use draft::{Branch, Field, FieldEdit, Gender, RegistrationDraft, YearOfStudy, OTHER_COLLEGE};
pub use payload::{RegistrationPayload, RegistrationRecord, UploadSignature};
pub use screenshot::{CompressedScreenshot, ScreenshotError};
pub use upload::{TransitionError, UploadStatus, UploadTask};
pub use validate::{validate_step, ErrorMap};
pub use window::RegistrationWindow;
pub use wizard::{Step, SubmitPhase, Wizard};
