//! One-shot image request handler.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uplink_ai::{ImageBackend, ImageRequest};
use uplink_common::new_correlation_id;
use uplink_renderer::ImageSurface;

use super::control::{Control, ControlGuard};
use super::{with_locked, IgnoreReason, Shared, IMAGE_EMPTY_NOTICE, IMAGE_FAILURE_NOTICE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOutcome {
    Ignored(IgnoreReason),
    /// Number of images shown.
    Displayed(usize),
    /// The service answered without any image.
    Empty,
    Failed,
}

pub struct ImageHandler<G> {
    backend: Option<Arc<dyn ImageBackend>>,
    request: ImageRequest,
    control: Arc<Control>,
    gallery: Shared<G>,
}

impl<G: ImageSurface> ImageHandler<G> {
    pub fn new(
        backend: Option<Arc<dyn ImageBackend>>,
        request: ImageRequest,
        gallery: Shared<G>,
    ) -> Self {
        Self {
            backend,
            request,
            control: Arc::new(Control::new("image")),
            gallery,
        }
    }

    pub fn control(&self) -> &Arc<Control> {
        &self.control
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    fn render<R>(&self, f: impl FnOnce(&mut G) -> R) -> R {
        with_locked(&self.gallery, f)
    }

    fn fail(&self, notice: &str) {
        self.render(|g| g.show_notice(notice));
    }

    pub async fn submit(&self, input: &str) -> ImageOutcome {
        let prompt = input.trim();
        if prompt.is_empty() {
            return ImageOutcome::Ignored(IgnoreReason::Empty);
        }
        let Some(guard) = self.control.engage() else {
            debug!("Image input disabled; submission dropped");
            return ImageOutcome::Ignored(IgnoreReason::Busy);
        };
        self.run(guard, prompt).await
    }

    /// Submit with the control already engaged by the caller.
    pub async fn submit_engaged(&self, guard: ControlGuard, input: &str) -> ImageOutcome {
        if !guard.holds(&self.control) {
            warn!("Image submission carried a foreign control guard");
            return ImageOutcome::Ignored(IgnoreReason::Busy);
        }
        let prompt = input.trim();
        if prompt.is_empty() {
            return ImageOutcome::Ignored(IgnoreReason::Empty);
        }
        self.run(guard, prompt).await
    }

    async fn run(&self, _guard: ControlGuard, prompt: &str) -> ImageOutcome {
        let request_id = new_correlation_id();
        self.render(|g| g.clear());

        let Some(backend) = self.backend.as_ref() else {
            warn!(request = %request_id, "Image backend unavailable");
            self.fail(IMAGE_FAILURE_NOTICE);
            return ImageOutcome::Failed;
        };

        let response = match backend.generate(prompt, &self.request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(request = %request_id, model = backend.model(), "Image request failed: {e}");
                self.fail(IMAGE_FAILURE_NOTICE);
                return ImageOutcome::Failed;
            }
        };

        if response.is_empty() {
            warn!(request = %request_id, "Image request returned no payload");
            self.fail(IMAGE_EMPTY_NOTICE);
            return ImageOutcome::Empty;
        }

        let mut shown = 0usize;
        for part in &response.parts {
            let shown_ok = part
                .decode()
                .map_err(|e| e.to_string())
                .and_then(|artifact| {
                    self.render(|g| g.show_image(&artifact))
                        .map_err(|e| e.to_string())
                });
            if let Err(e) = shown_ok {
                warn!(request = %request_id, shown, "Image display failed: {e}");
                self.fail(IMAGE_FAILURE_NOTICE);
                return ImageOutcome::Failed;
            }
            shown += 1;
        }

        info!(request = %request_id, images = shown, "Image request complete");
        ImageOutcome::Displayed(shown)
    }
}
