//! touroku-io: Browser I/O and Dioxus component library.
//!
//! Handles HTTP against the registration backend and the image host,
//! the payment-screenshot upload driver, submission orchestration,
//! persisted session stores, and the wizard UI components. All domain
//! logic lives in `touroku-core`; this crate is the glue between that
//! logic and the browser.

pub mod api;
pub mod components;
pub mod http;
pub mod session;
pub mod submit;
pub mod uploader;

pub use api::{ApiClient, ApiError};
pub use components::RegistrationWizard;
pub use http::AbortHandle;
pub use session::{LocalStorage, MemoryStorage, PersistedValue, StorageBackend};
