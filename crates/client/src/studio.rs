//! Per-page controller for the compose and color-grading flows.
//!
//! A [`Studio`] owns the page's selection and its last result. `submit`
//! borrows the studio mutably, so at most one generation runs at a time;
//! other tasks observe it through a [`BusyIndicator`]. Tearing the page
//! down cancels whatever is in flight, and a cancelled request never
//! writes its result back.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use pixmorph_core::generation::{is_blank_prompt, GenerationRequest};
use pixmorph_core::preset::Preset;
use pixmorph_core::selection::{CandidateFile, SelectedImage, Selection};
use tokio_util::sync::CancellationToken;

use crate::dispatcher::ProxyClient;
use crate::encoder;
use crate::error::ClientError;
use crate::history::{HistoryClient, NewHistoryEntry};
use crate::session::{Session, SessionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudioMode {
    /// Up to four images combined by a free-text prompt.
    Compose,
    /// One image restyled by a preset or prompt.
    ColorGrade,
}

/// Original and generated image, side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison<'a> {
    pub original_url: String,
    pub generated_url: &'a str,
}

/// Read-only view of whether a studio has a generation in flight.
///
/// Cloned out of the studio before `submit` so a spinner or a disabled
/// button can follow the request from another task.
#[derive(Debug, Clone)]
pub struct BusyIndicator(Arc<AtomicBool>);

impl BusyIndicator {
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Clears the busy flag when the request ends, however it ends.
struct InFlight(Arc<AtomicBool>);

impl InFlight {
    fn start(flag: &Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::Release);
        Self(Arc::clone(flag))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct Studio {
    mode: StudioMode,
    selection: Selection,
    result: Option<String>,
    busy: Arc<AtomicBool>,
    teardown: CancellationToken,
    proxy: ProxyClient,
    history: HistoryClient,
    sessions: SessionStore,
}

impl Studio {
    pub fn new(
        mode: StudioMode,
        proxy: ProxyClient,
        history: HistoryClient,
        sessions: SessionStore,
    ) -> Self {
        let selection = match mode {
            StudioMode::Compose => Selection::default(),
            StudioMode::ColorGrade => Selection::single(),
        };
        Self {
            mode,
            selection,
            result: None,
            busy: Arc::new(AtomicBool::new(false)),
            teardown: CancellationToken::new(),
            proxy,
            history,
            sessions,
        }
    }

    pub fn mode(&self) -> StudioMode {
        self.mode
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn images(&self) -> &[SelectedImage] {
        self.selection.images()
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn busy_indicator(&self) -> BusyIndicator {
        BusyIndicator(Arc::clone(&self.busy))
    }

    /// Add picked files. A non-empty batch clears the previous result.
    pub fn add_files(&mut self, files: impl IntoIterator<Item = CandidateFile>) -> usize {
        let added = self.selection.add_batch(files);
        if added > 0 {
            self.result = None;
        }
        added
    }

    /// Remove one image. Removing an image clears the result it was
    /// generated from.
    pub fn remove(&mut self, index: usize) -> Option<SelectedImage> {
        let removed = self.selection.remove(index)?;
        self.result = None;
        Some(removed)
    }

    /// Drop the selection and the result.
    pub fn reset(&mut self) {
        self.selection.clear();
        self.result = None;
    }

    /// Handle that tears the page down when cancelled. Cancelling it stops
    /// the in-flight request and discards its result.
    pub fn teardown_handle(&self) -> CancellationToken {
        self.teardown.clone()
    }

    pub fn teardown(&self) {
        self.teardown.cancel();
    }

    /// The before/after pair once a result exists.
    pub fn comparison(&self) -> Option<Comparison<'_>> {
        let generated_url = self.result.as_deref()?;
        let original = self.selection.first()?;
        Some(Comparison {
            original_url: original.preview_url(),
            generated_url,
        })
    }

    /// Apply a color-grading preset to the selected image.
    pub async fn apply_preset(&mut self, preset_id: &str) -> Result<String, ClientError> {
        let preset = Preset::require(preset_id)?;
        tracing::info!(preset = preset.id, "Applying preset");
        self.submit(preset.prompt).await
    }

    /// Generate from the current selection and `prompt`.
    ///
    /// Input is checked before anything is read or sent. On success the
    /// result is stored and, for signed-in users, recorded in history. A
    /// failed history write is logged and does not fail the call.
    pub async fn submit(&mut self, prompt: &str) -> Result<String, ClientError> {
        if self.teardown.is_cancelled() {
            return Err(ClientError::Cancelled);
        }
        if is_blank_prompt(prompt) {
            return Err(ClientError::Validation("Please enter a prompt".into()));
        }
        if self.selection.is_empty() {
            return Err(ClientError::Validation(
                "Please upload at least one image first".into(),
            ));
        }

        let _in_flight = InFlight::start(&self.busy);

        let request_token = self.teardown.child_token();
        let session = self.sessions.current();

        let work = self.generate(prompt, session.as_ref());

        let image_url = tokio::select! {
            biased;
            () = request_token.cancelled() => {
                tracing::debug!("Generation cancelled; discarding result");
                return Err(ClientError::Cancelled);
            }
            outcome = work => outcome?,
        };

        self.result = Some(image_url.clone());
        tracing::info!("Image generated");

        if let Some(session) = session.filter(|_| !request_token.is_cancelled()) {
            let entry = NewHistoryEntry {
                original_image_url: None,
                generated_image_url: &image_url,
                prompt,
            };
            match self.history.insert(&session, &entry).await {
                Ok(saved) => tracing::debug!(history_id = %saved.id, "Saved to history"),
                Err(e) => tracing::warn!(error = %e, "Failed to save to history"),
            }
        }

        Ok(image_url)
    }

    async fn generate(
        &self,
        prompt: &str,
        session: Option<&Session>,
    ) -> Result<String, ClientError> {
        let images = encoder::encode_all(self.selection.images()).await?;
        let request = GenerationRequest::new(images, prompt);
        match self.mode {
            StudioMode::Compose => request.validate()?,
            StudioMode::ColorGrade => request.validate_for_grading()?,
        }
        self.proxy.generate(&request, session).await
    }
}

impl Drop for Studio {
    fn drop(&mut self) {
        self.teardown.cancel();
    }
}
