//! The payment-screenshot upload lifecycle.
//!
//! One [`UploadTask`] exists at a time per draft; picking a new file
//! supersedes it. The task progresses `Idle -> Uploading -> Uploaded`
//! with explicit cancel (`Uploading -> Idle`), failure
//! (`Uploading -> Failed`), retry (`Failed -> Uploading`, reusing the
//! already-compressed bytes), and remove (`Uploaded | Failed -> Idle`).
//!
//! The async driver in `touroku-io` sequences the actual network
//! stages; this type only guards the transitions and the progress
//! monotonicity so illegal interleavings are impossible to express.

use thiserror::Error;

/// Lifecycle status of the screenshot upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadStatus {
    /// No file selected, or the selection was cancelled/removed.
    #[default]
    Idle,
    /// Re-encode and network stages in progress.
    Uploading,
    /// Terminal: the hosted URL is recorded.
    Uploaded,
    /// A stage failed; the error message and last progress are kept
    /// for diagnostics and the retry affordance.
    Failed,
}

/// An operation was attempted from a status it is not valid in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("no upload is in progress")]
    NotUploading,
    #[error("retry is only valid after a failed upload")]
    NotFailed,
    #[error("nothing to remove")]
    NothingToRemove,
    #[error("no compressed image to retry with")]
    MissingImage,
}

/// The one-at-a-time upload task owned by the upload pipeline.
#[derive(Debug, Clone, Default)]
pub struct UploadTask {
    status: UploadStatus,
    filename: String,
    /// Client-side re-encoded JPEG, kept so retry can skip the
    /// decode/downscale stage.
    compressed: Option<Vec<u8>>,
    /// 0-100, monotonically non-decreasing within one attempt.
    progress: u8,
    error: Option<String>,
    url: Option<String>,
}

impl UploadTask {
    /// Current status.
    #[must_use]
    pub const fn status(&self) -> UploadStatus {
        self.status
    }

    /// Name of the selected file, for display.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Upload progress percentage, 0-100.
    #[must_use]
    pub const fn progress(&self) -> u8 {
        self.progress
    }

    /// Message from the most recent failure, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The hosted URL, present exactly while `Uploaded`.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// The re-encoded JPEG bytes, once stage 1 has run.
    #[must_use]
    pub fn compressed(&self) -> Option<&[u8]> {
        self.compressed.as_deref()
    }

    /// Begin an upload for a freshly accepted file.
    ///
    /// Valid from any status: a new selection supersedes whatever was
    /// in flight or recorded before (the driver aborts the old
    /// request separately). Everything is reset; progress starts at 0.
    pub fn start(&mut self, filename: String) {
        *self = Self {
            status: UploadStatus::Uploading,
            filename,
            ..Self::default()
        };
    }

    /// Record the stage-1 output so retry can reuse it.
    pub fn set_compressed(&mut self, bytes: Vec<u8>) {
        self.compressed = Some(bytes);
    }

    /// Report fractional progress. Clamped to 100; decreases are
    /// ignored so the displayed percentage never moves backward.
    /// A no-op outside `Uploading`.
    pub fn set_progress(&mut self, percent: u8) {
        if self.status == UploadStatus::Uploading {
            self.progress = self.progress.max(percent.min(100));
        }
    }

    /// The host acknowledged the upload; record the URL.
    ///
    /// # Errors
    ///
    /// [`TransitionError::NotUploading`] unless currently `Uploading`.
    pub fn complete(&mut self, url: String) -> Result<(), TransitionError> {
        if self.status != UploadStatus::Uploading {
            return Err(TransitionError::NotUploading);
        }
        self.status = UploadStatus::Uploaded;
        self.progress = 100;
        self.error = None;
        self.url = Some(url);
        Ok(())
    }

    /// A stage failed. Progress is left at its last value for
    /// diagnostic display.
    ///
    /// # Errors
    ///
    /// [`TransitionError::NotUploading`] unless currently `Uploading`.
    pub fn fail(&mut self, message: String) -> Result<(), TransitionError> {
        if self.status != UploadStatus::Uploading {
            return Err(TransitionError::NotUploading);
        }
        self.status = UploadStatus::Failed;
        self.error = Some(message);
        Ok(())
    }

    /// User-triggered abort. Back to `Idle` with no error recorded --
    /// cancellation is not a failure.
    ///
    /// # Errors
    ///
    /// [`TransitionError::NotUploading`] unless currently `Uploading`.
    pub fn cancel(&mut self) -> Result<(), TransitionError> {
        if self.status != UploadStatus::Uploading {
            return Err(TransitionError::NotUploading);
        }
        *self = Self::default();
        Ok(())
    }

    /// Client-side "forget" of an uploaded or failed task. The remote
    /// object, if any, is not deleted.
    ///
    /// # Errors
    ///
    /// [`TransitionError::NothingToRemove`] from `Idle` or `Uploading`.
    pub fn remove(&mut self) -> Result<(), TransitionError> {
        match self.status {
            UploadStatus::Uploaded | UploadStatus::Failed => {
                *self = Self::default();
                Ok(())
            }
            UploadStatus::Idle | UploadStatus::Uploading => Err(TransitionError::NothingToRemove),
        }
    }

    /// Re-enter `Uploading` after a failure, keeping the compressed
    /// bytes so the re-encode stage is not repeated.
    ///
    /// # Errors
    ///
    /// [`TransitionError::NotFailed`] unless currently `Failed`;
    /// [`TransitionError::MissingImage`] if stage 1 never completed.
    pub fn begin_retry(&mut self) -> Result<(), TransitionError> {
        if self.status != UploadStatus::Failed {
            return Err(TransitionError::NotFailed);
        }
        if self.compressed.is_none() {
            return Err(TransitionError::MissingImage);
        }
        self.status = UploadStatus::Uploading;
        self.progress = 0;
        self.error = None;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn uploading() -> UploadTask {
        let mut task = UploadTask::default();
        task.start("shot.png".into());
        task.set_compressed(vec![0xFF, 0xD8]);
        task
    }

    #[test]
    fn happy_path_reaches_uploaded_at_100() {
        let mut task = uploading();
        task.set_progress(40);
        task.set_progress(80);
        task.complete("https://host/shot.jpg".into()).unwrap();

        assert_eq!(task.status(), UploadStatus::Uploaded);
        assert_eq!(task.progress(), 100);
        assert_eq!(task.url().unwrap(), "https://host/shot.jpg");
        assert!(task.error().is_none());
    }

    #[test]
    fn uploaded_url_is_stable_until_removed() {
        let mut task = uploading();
        task.complete("https://host/a.jpg".into()).unwrap();
        for _ in 0..3 {
            assert_eq!(task.url().unwrap(), "https://host/a.jpg");
        }

        task.remove().unwrap();
        assert_eq!(task.status(), UploadStatus::Idle);
        assert!(task.url().is_none());
    }

    #[test]
    fn progress_never_decreases_and_clamps() {
        let mut task = uploading();
        task.set_progress(60);
        task.set_progress(30);
        assert_eq!(task.progress(), 60);
        task.set_progress(200);
        assert_eq!(task.progress(), 100);
    }

    #[test]
    fn failure_keeps_progress_and_message() {
        let mut task = uploading();
        task.set_progress(45);
        task.fail("Network error. Please check your connection.".into())
            .unwrap();

        assert_eq!(task.status(), UploadStatus::Failed);
        assert_eq!(task.progress(), 45);
        assert_eq!(
            task.error().unwrap(),
            "Network error. Please check your connection."
        );
    }

    #[test]
    fn cancel_is_silent() {
        let mut task = uploading();
        task.set_progress(70);
        task.cancel().unwrap();

        assert_eq!(task.status(), UploadStatus::Idle);
        assert_eq!(task.progress(), 0);
        assert!(task.error().is_none());
        assert!(task.cancel().is_err());
    }

    #[test]
    fn retry_reuses_the_compressed_bytes() {
        let mut task = uploading();
        task.fail("signature fetch failed".into()).unwrap();

        task.begin_retry().unwrap();
        assert_eq!(task.status(), UploadStatus::Uploading);
        assert_eq!(task.progress(), 0);
        assert!(task.error().is_none());
        assert_eq!(task.compressed().unwrap(), &[0xFF, 0xD8]);
    }

    #[test]
    fn retry_requires_failed_with_image() {
        let mut task = UploadTask::default();
        assert_eq!(task.begin_retry(), Err(TransitionError::NotFailed));

        task.start("shot.png".into());
        // No compressed bytes recorded: stage 1 failed.
        task.fail("decode failed".into()).unwrap();
        assert_eq!(task.begin_retry(), Err(TransitionError::MissingImage));
    }

    #[test]
    fn new_selection_supersedes_everything() {
        let mut task = uploading();
        task.complete("https://host/a.jpg".into()).unwrap();

        task.start("other.jpg".into());
        assert_eq!(task.status(), UploadStatus::Uploading);
        assert_eq!(task.filename(), "other.jpg");
        assert_eq!(task.progress(), 0);
        assert!(task.url().is_none());
        assert!(task.compressed().is_none());
    }

    #[test]
    fn complete_requires_uploading() {
        let mut task = UploadTask::default();
        assert_eq!(
            task.complete("https://host/a.jpg".into()),
            Err(TransitionError::NotUploading)
        );
    }
}
