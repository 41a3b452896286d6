//! Output traits the console handlers write to.

use uplink_common::{ChatRole, Citation, ImageArtifact, TurnHandle, UplinkError};

/// Append-only turn log.
///
/// Only the most recent responder turn may be rewritten; every other turn
/// is fixed once appended.
pub trait RenderSurface {
    fn append_turn(&mut self, role: ChatRole, text: &str) -> TurnHandle;

    /// Replace the whole displayed text of a live turn.
    fn update_text(&mut self, handle: TurnHandle, text: &str);

    /// Attach a citation block after the turn's final text.
    fn append_citations(&mut self, handle: TurnHandle, citations: &[Citation]);

    /// Close a live turn. Later writes to it are ignored; finishing a turn
    /// that is no longer live does nothing.
    fn finish(&mut self, handle: TurnHandle);

    /// Show an operator-facing notice outside any turn.
    fn append_notice(&mut self, text: &str);
}

/// Where generated images are shown.
pub trait ImageSurface {
    /// Drop whatever the previous request displayed.
    fn clear(&mut self);

    fn show_image(&mut self, image: &ImageArtifact) -> Result<(), UplinkError>;

    fn show_notice(&mut self, text: &str);
}
