// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the layout/render loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! event wiring calls at each stage. All method bodies default to no-ops,
//! so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace`
//! feature is **off**, every `Tracer` method compiles to nothing (zero
//! overhead). When **on**, each method performs a single `Option` branch
//! before dispatching.

use crate::layer::LayoutChanges;
use crate::render::FrameChanges;
use crate::viewport::Viewport;

/// Emitted after a layout pass completes.
#[derive(Clone, Copy, Debug)]
pub struct LayoutPassEvent {
    /// Number of layers whose cached geometry was recomputed.
    pub layers_laid_out: usize,
    /// The viewport the pass ran against.
    pub viewport: Viewport,
}

impl LayoutPassEvent {
    /// Builds the event from a pass's inputs and outputs.
    #[must_use]
    pub fn new(viewport: &Viewport, changes: &LayoutChanges) -> Self {
        Self {
            layers_laid_out: changes.laid_out.len(),
            viewport: *viewport,
        }
    }
}

/// Emitted after a frame render completes.
#[derive(Clone, Copy, Debug)]
pub struct FrameEvent {
    /// The clamped scroll offset the frame rendered at.
    pub scroll_top: f64,
    /// Number of layers placed (visible) this frame.
    pub placed: usize,
    /// Number of layers that transitioned to hidden this frame.
    pub hidden: usize,
}

impl From<&FrameChanges> for FrameEvent {
    fn from(changes: &FrameChanges) -> Self {
        Self {
            scroll_top: changes.scroll_top,
            placed: changes.placed.len(),
            hidden: changes.hidden.len(),
        }
    }
}

/// Emitted when a render request is made.
#[derive(Clone, Copy, Debug)]
pub struct RenderRequestEvent {
    /// Whether the request was deduplicated into an in-flight render.
    pub coalesced: bool,
}

/// Receives trace events from the layout/render loop.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after a layout pass completes.
    fn on_layout_pass(&mut self, e: &LayoutPassEvent) {
        _ = e;
    }

    /// Called after a frame render completes.
    fn on_frame(&mut self, e: &FrameEvent) {
        _ = e;
    }

    /// Called when a render is requested.
    fn on_render_request(&mut self, e: &RenderRequestEvent) {
        _ = e;
    }
}

/// Zero-overhead dispatch wrapper around an optional [`TraceSink`].
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`LayoutPassEvent`].
    #[inline]
    pub fn layout_pass(&mut self, e: &LayoutPassEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_layout_pass(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FrameEvent`].
    #[inline]
    pub fn frame(&mut self, e: &FrameEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_frame(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RenderRequestEvent`].
    #[inline]
    pub fn render_request(&mut self, e: &RenderRequestEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_render_request(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}
