//! Transcript view seam.
//!
//! The sync engine never touches a rendering surface directly — it talks to
//! a [`TranscriptView`], which the embedder implements over whatever surface
//! it has (terminal, GUI list widget, DOM bridge). [`Viewport`] is the scroll
//! model most implementations will want: a pixel window over the transcript
//! with a near-bottom threshold test.

use crate::model::Message;

/// Distance from the viewport's bottom edge to the content bottom, in
/// pixels, under which the reader still counts as "at the bottom".
pub const NEAR_BOTTOM_THRESHOLD_PX: f32 = 48.0;

/// Rendering collaborator consumed by the sync engine.
///
/// Implementations tag entries as own/other, answer the near-bottom query
/// *before* a batch is appended, and move the viewport on request.
pub trait TranscriptView {
    /// Append one transcript entry. `own` is true when the message was
    /// authored by the local identity.
    fn push(&mut self, message: &Message, own: bool);

    /// Whether the reader's scroll position is within the near-bottom
    /// threshold of the end of the transcript.
    fn near_bottom(&self) -> bool;

    /// Move the viewport to the end of the transcript.
    fn scroll_to_bottom(&mut self);

    /// Clear the outbound input affordance (called on send, before the
    /// network call resolves).
    fn clear_input(&mut self);
}

// -- Scroll model -----------------------------------------------------------

/// Pixel scroll window over the transcript.
///
/// `scroll_top` is the offset of the window's top edge from the start of the
/// content; the reader sees `[scroll_top, scroll_top + height)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_top: f32,
    pub height: f32,
    pub content_height: f32,
    pub threshold_px: f32,
}

impl Viewport {
    pub fn new(height: f32) -> Self {
        Viewport {
            scroll_top: 0.0,
            height,
            content_height: 0.0,
            threshold_px: NEAR_BOTTOM_THRESHOLD_PX,
        }
    }

    /// Distance between the window's bottom edge and the content bottom.
    /// Zero or negative when the content fits entirely in the window.
    pub fn distance_from_bottom(&self) -> f32 {
        self.content_height - (self.scroll_top + self.height)
    }

    pub fn near_bottom(&self) -> bool {
        self.distance_from_bottom() <= self.threshold_px
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_top = (self.content_height - self.height).max(0.0);
    }

    /// Extend the content by `px` (one appended entry's rendered height).
    pub fn grow(&mut self, px: f32) {
        self.content_height += px;
    }
}
