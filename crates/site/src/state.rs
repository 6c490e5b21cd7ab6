//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::content::{ContentError, ContentStore};
use crate::services::{EmailJsError, SubmissionController};

/// Error building application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("content error: {0}")]
    Content(#[from] ContentError),
    #[error("email client error: {0}")]
    EmailJs(#[from] EmailJsError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// configuration, loaded page content, and the contact submission pipeline.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    content: ContentStore,
    submissions: SubmissionController,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Loads markdown pages from `config.content_dir` and builds the EmailJS
    /// client. Missing provider identifiers are logged here but do not fail
    /// startup; each submit reports them instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the content directory cannot be read or the HTTP
    /// client fails to build.
    pub fn new(config: SiteConfig) -> Result<Self, StateError> {
        let content = ContentStore::load(&config.content_dir)?;
        let submissions = SubmissionController::from_config(&config)?;

        if !submissions.missing_ids().is_empty() {
            tracing::error!(
                missing = ?submissions.missing_ids(),
                "EmailJS identifiers are not configured; contact submissions will fail"
            );
        }

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                content,
                submissions,
            }),
        })
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the loaded page content.
    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.inner.content
    }

    /// Get a reference to the contact submission controller.
    #[must_use]
    pub fn submissions(&self) -> &SubmissionController {
        &self.inner.submissions
    }
}
