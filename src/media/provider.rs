// SPDX-License-Identifier: MPL-2.0
//! Image provider boundary.
//!
//! The zoomable view resolves string identifiers through an [`ImageProvider`].
//! A request resolves exactly once, to a decoded bitmap or `None` on failure,
//! and never blocks the caller: the returned future is run by the Iced
//! executor and its output comes back into the view's update loop as a message.

use crate::media::image::{load_image, ImageData};
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::fmt;
use std::path::PathBuf;

/// Resolves an identifier to a decoded bitmap.
pub trait ImageProvider: fmt::Debug + Send + Sync {
    /// Starts resolving `identifier`.
    ///
    /// The future yields `None` when the image cannot be produced.
    fn fetch(&self, identifier: &str) -> BoxFuture<'static, Option<ImageData>>;
}

/// Provider treating identifiers as local file paths.
///
/// Decoding runs on the blocking thread pool so large files do not stall the
/// async executor.
#[derive(Debug, Clone, Default)]
pub struct FileProvider {
    base_dir: Option<PathBuf>,
}

impl FileProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves relative identifiers against `base_dir`.
    #[must_use]
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    fn resolve(&self, identifier: &str) -> PathBuf {
        let path = PathBuf::from(identifier);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path,
        }
    }
}

impl ImageProvider for FileProvider {
    fn fetch(&self, identifier: &str) -> BoxFuture<'static, Option<ImageData>> {
        let path = self.resolve(identifier);

        async move {
            let shown = path.display().to_string();
            match tokio::task::spawn_blocking(move || load_image(path)).await {
                Ok(Ok(image)) => Some(image),
                Ok(Err(err)) => {
                    tracing::warn!(path = %shown, error = %err, "failed to load image");
                    None
                }
                Err(err) => {
                    tracing::error!(path = %shown, error = %err, "image decode task failed");
                    None
                }
            }
        }
        .boxed()
    }
}
