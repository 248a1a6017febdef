//! Dioxus components for the registration wizard.

pub mod academic;
pub mod confirm;
pub mod field;
pub mod handles;
pub mod payment;
pub mod personal;
pub mod progress;
pub mod upload;
pub mod wizard;

pub use upload::UploadPanel;
pub use wizard::RegistrationWizard;
