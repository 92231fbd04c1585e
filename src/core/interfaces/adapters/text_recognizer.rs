use async_trait::async_trait;

use crate::core::errors::BackendError;
use crate::core::models::{ImageAsset, TextSource};

/// A backend able to read the problem statement out of an image.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    fn source(&self) -> TextSource;

    /// Whether the backend may be attempted at all, e.g. because its
    /// credential is configured.
    fn is_available(&self) -> bool {
        true
    }

    /// Dropping the returned future must stop any work it started; the
    /// orchestrator drops it on timeout before moving to the next backend.
    async fn recognize(&self, image: &ImageAsset) -> Result<String, BackendError>;
}
