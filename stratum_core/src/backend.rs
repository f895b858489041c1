// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! Stratum splits platform-specific work into *backend* crates. Each
//! backend provides the following pieces:
//!
//! - **Event source** — Delivers `load` and `resize` notifications (which
//!   trigger layout-then-render) and `scroll` notifications (render only).
//!   This is backend-specific and not abstracted by a trait because the
//!   wiring differs fundamentally across platforms.
//!
//! - **Style probe** — Implements
//!   [`StyleProbe`](crate::capability::StyleProbe), answering whether a
//!   style property is recognized (resolving vendor-prefix variants) and
//!   running the empirical 3D-transform element check.
//!
//! - **Anchor provider** — Implements
//!   [`AnchorProvider`](crate::anchor::AnchorProvider), measuring the live
//!   document regions that layers attach to.
//!
//! - **Frame primitive** — Schedules a callback before the next repaint
//!   when the platform has such a facility; otherwise invokes the render
//!   synchronously. Either way the
//!   [`RenderScheduler`](crate::scheduler::RenderScheduler) guarantees
//!   coalescing.
//!
//! - **Presenter** — Implements the [`Presenter`] trait to apply layout
//!   and frame changes to the platform's styling surface.
//!
//! # Crate boundaries
//!
//! `stratum_core` owns the data model, the layout and render passes,
//! scheduling, and this contract module. Backend crates depend on
//! `stratum_core` and provide platform glue. Application code depends on
//! both and wires them together.

use crate::layer::{LayerStore, LayoutChanges};
use crate::render::FrameChanges;
use crate::viewport::Viewport;

/// Applies layout and frame changes to a platform styling surface.
///
/// Both DOM-based presenters and test doubles implement this trait,
/// enabling generic event wiring.
///
/// # Wiring pseudocode
///
/// ```rust,ignore
/// fn on_resize(viewport: Viewport) {
///     let changes = engine.layout_all(viewport, &anchors);
///     presenter.apply_layout(engine.store(), engine.viewport(), changes);
///     on_scroll(); // layout-affecting events render immediately after
/// }
///
/// fn on_scroll() {
///     if engine.request_render() == RenderRequest::Scheduled {
///         frame_primitive.schedule(|| {
///             // Scroll state is read here, at execution time.
///             let frame = engine.render_frame(current_scroll_top());
///             presenter.apply_frame(engine.store(), frame);
///             engine.render_complete();
///         });
///     }
/// }
/// ```
pub trait Presenter {
    /// Applies a layout pass's results: resizes each laid-out layer's
    /// container to `(viewport.width, anchor height)` and its image to the
    /// computed dimensions, and hides the container pending the next frame.
    fn apply_layout(&mut self, store: &LayerStore, viewport: &Viewport, changes: &LayoutChanges);

    /// Applies one rendered frame: styles every placed layer's container
    /// and image for the chosen transform tier, and hides layers that left
    /// the viewport.
    fn apply_frame(&mut self, store: &LayerStore, changes: &FrameChanges);
}
