// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport dimensions and the scroll bound.
//!
//! A [`Viewport`] snapshot is taken once per layout pass and read by every
//! subsequent render until the next layout-invalidating event. In
//! particular `max_scroll_top` is **not** refreshed on scroll: a page whose
//! height changes without a resize keeps the stale bound until the next
//! layout pass.
//!
//! Browsers disagree on how to report the height of overflowing content, so
//! backends compute `document_height` as the maximum of several DOM
//! measurements before constructing a `Viewport`.

/// Viewport dimensions and derived scroll bound, in px.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
    /// Maximum meaningful scroll offset: `max(0, document_height - height)`.
    pub max_scroll_top: f64,
}

impl Viewport {
    /// Creates a viewport snapshot from window and document dimensions.
    #[must_use]
    pub fn new(width: f64, height: f64, document_height: f64) -> Self {
        Self {
            width,
            height,
            max_scroll_top: (document_height - height).max(0.0),
        }
    }

    /// Clamps a raw scroll offset to `[0, max_scroll_top]`.
    ///
    /// Momentum scrolling and rubber-banding can report offsets outside the
    /// scrollable range; rendering always uses the clamped value.
    #[must_use]
    pub fn clamp_scroll(&self, raw: f64) -> f64 {
        raw.max(0.0).min(self.max_scroll_top)
    }
}
