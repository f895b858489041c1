// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays layer storage and the layout pass.
//!
//! One [`layer`](LayerId) is created per anchor region that declares a
//! background. Each layer caches the layout parameters derived from the
//! most recent layout pass:
//!
//! - `anchor_top` / `anchor_height` — the anchor's document-space extent.
//! - `image_width` / `image_height` — background sizing that covers the
//!   anchor at every reachable parallax displacement.
//! - `image_x_offset` — horizontal centering when the background had to be
//!   widened beyond the viewport.
//!
//! Cached fields are stale between passes; the render pass must never read
//! them after a geometry-affecting event without a layout pass having
//! completed first. Staleness is tracked per layer through a single
//! `understory_dirty` channel: [`invalidate_all`](LayerStore::invalidate_all)
//! marks every layer (resize, initial load), while
//! [`invalidate`](LayerStore::invalidate) marks one layer whose anchor
//! changed on its own (e.g. an image finished loading inside it). A layout
//! pass drains the channel and recomputes only what was marked.
//!
//! Layers are never destroyed individually; they live until the whole
//! engine is torn down.

use alloc::vec::Vec;
use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use understory_dirty::{Channel, CycleHandling, DirtyTracker};

use crate::anchor::{AnchorId, AnchorProvider, AnchorSpec, BackgroundSource};
use crate::render::LayerPlacement;
use crate::viewport::Viewport;

/// Cached layout fields are stale and need recomputation.
///
/// The only dirty channel: layers are a flat collection with no inherited
/// properties, so nothing propagates.
const GEOMETRY: Channel = Channel::new(0);

/// A handle to a layer in a [`LayerStore`].
///
/// Layers are allocated append-only and never freed, so a plain slot index
/// is sufficient; no generation counter is needed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(pub(crate) u32);

impl LayerId {
    /// Returns the raw slot index (for diagnostics and presenter storage).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LayerId({})", self.0)
    }
}

/// The set of layers whose cached layout fields were recomputed by a single
/// [`LayerStore::layout_pass`] call.
///
/// Raw slot indices rather than [`LayerId`] handles, so presenters can
/// index directly into the store's arrays via the `*_at()` accessors.
#[derive(Clone, Debug, Default)]
pub struct LayoutChanges {
    /// Layers that were laid out, in slot order. Each was reset to hidden;
    /// visibility is resolved by the next render frame.
    pub laid_out: Vec<u32>,
}

impl LayoutChanges {
    /// Clears the change list.
    pub fn clear(&mut self) {
        self.laid_out.clear();
    }
}

/// The minimum background height required so that, after applying a
/// parallax displacement bounded by `scroll_factor`, the background never
/// under-covers its anchor's vertical extent.
#[must_use]
pub fn min_background_height(viewport_height: f64, anchor_height: f64, scroll_factor: f64) -> f64 {
    viewport_height - (viewport_height - anchor_height) * scroll_factor
}

/// Struct-of-arrays storage for all parallax layers of one engine instance.
///
/// Layers are addressed by [`LayerId`] handles; internally each layer
/// occupies a slot in parallel arrays.
#[derive(Debug)]
pub struct LayerStore {
    // -- Registration data (set once) --
    pub(crate) anchor: Vec<AnchorId>,
    pub(crate) source: Vec<BackgroundSource>,
    pub(crate) bg_ratio: Vec<f64>,

    // -- Cached layout fields (written by layout_pass) --
    pub(crate) anchor_top: Vec<f64>,
    pub(crate) anchor_height: Vec<f64>,
    pub(crate) image_width: Vec<f64>,
    pub(crate) image_height: Vec<f64>,
    pub(crate) image_x_offset: Vec<f64>,

    // -- Per-frame state (written by render_frame) --
    pub(crate) visible: Vec<bool>,
    pub(crate) placement: Vec<LayerPlacement>,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,
}

impl Default for LayerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerStore {
    /// Creates an empty layer store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            anchor: Vec::new(),
            source: Vec::new(),
            bg_ratio: Vec::new(),
            anchor_top: Vec::new(),
            anchor_height: Vec::new(),
            image_width: Vec::new(),
            image_height: Vec::new(),
            image_x_offset: Vec::new(),
            visible: Vec::new(),
            placement: Vec::new(),
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
        }
    }

    /// Registers a layer for the given anchor and returns its handle.
    ///
    /// The layer starts hidden with zeroed layout fields and is marked for
    /// layout; it carries no meaningful geometry until the first layout
    /// pass runs.
    pub fn register(&mut self, spec: &AnchorSpec) -> LayerId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "layer counts are far below u32::MAX"
        )]
        let idx = self.anchor.len() as u32;
        self.anchor.push(spec.anchor);
        self.source.push(spec.source.clone());
        self.bg_ratio.push(spec.background_ratio());
        self.anchor_top.push(0.0);
        self.anchor_height.push(0.0);
        self.image_width.push(0.0);
        self.image_height.push(0.0);
        self.image_x_offset.push(0.0);
        self.visible.push(false);
        self.placement.push(LayerPlacement::default());
        self.dirty.mark(idx, GEOMETRY);
        LayerId(idx)
    }

    /// Returns the number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.anchor.len()
    }

    /// Returns `true` if no layers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchor.is_empty()
    }

    /// Marks one layer's cached layout fields stale.
    pub fn invalidate(&mut self, id: LayerId) {
        self.dirty.mark(id.0, GEOMETRY);
    }

    /// Marks every layer's cached layout fields stale.
    pub fn invalidate_all(&mut self) {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "layer counts are far below u32::MAX"
        )]
        for idx in 0..self.anchor.len() as u32 {
            self.dirty.mark(idx, GEOMETRY);
        }
    }

    /// Recomputes cached layout fields for every layer marked stale.
    ///
    /// For each marked layer, reads the anchor's current geometry from
    /// `provider` and derives background sizing per the covering rule: the
    /// candidate is `(viewport.width, ceil(width / ratio))`; if that is
    /// shorter than [`min_background_height`], the image is re-derived from
    /// height instead and centered horizontally. Laid-out layers are reset
    /// to hidden; visibility is resolved per frame by the renderer.
    ///
    /// Degenerate anchors (zero height, non-positive ratio) are a
    /// documented caller precondition and propagate as degenerate geometry.
    pub fn layout_pass(
        &mut self,
        viewport: &Viewport,
        provider: &impl AnchorProvider,
        scroll_factor: f64,
        changes: &mut LayoutChanges,
    ) {
        changes.clear();

        let stale: Vec<u32> = self.dirty.drain(GEOMETRY).deterministic().run().collect();
        for &idx in &stale {
            let i = idx as usize;
            let anchor_top = provider.offset_top(self.anchor[i]);
            let anchor_height = provider.rendered_height(self.anchor[i]);
            let min_height = min_background_height(viewport.height, anchor_height, scroll_factor);

            // Candidate sizing: fill the viewport width, derive height from
            // the background's intrinsic ratio.
            let mut image_width = viewport.width;
            let mut image_height = (image_width / self.bg_ratio[i]).ceil();
            let mut image_x_offset = 0.0;
            if image_height < min_height {
                // Too short to stay covered at maximum displacement:
                // re-derive from height and center the now-wider image.
                image_height = min_height;
                image_width = image_height * self.bg_ratio[i];
                image_x_offset = ((image_width - viewport.width) / 2.0).floor();
            }

            self.anchor_top[i] = anchor_top;
            self.anchor_height[i] = anchor_height;
            self.image_width[i] = image_width;
            self.image_height[i] = image_height;
            self.image_x_offset[i] = image_x_offset;
            self.visible[i] = false;
        }
        changes.laid_out = stale;
    }

    // -- Slot accessors (raw indices from change lists) --

    /// Returns the anchor handle for the given slot.
    #[must_use]
    pub fn anchor_at(&self, idx: u32) -> AnchorId {
        self.anchor[idx as usize]
    }

    /// Returns the background source for the given slot.
    #[must_use]
    pub fn source_at(&self, idx: u32) -> &BackgroundSource {
        &self.source[idx as usize]
    }

    /// Returns the anchor's cached document-space top for the given slot.
    #[must_use]
    pub fn anchor_top_at(&self, idx: u32) -> f64 {
        self.anchor_top[idx as usize]
    }

    /// Returns the anchor's cached rendered height for the given slot.
    ///
    /// This is also the layer container's height; its width is the
    /// viewport width.
    #[must_use]
    pub fn anchor_height_at(&self, idx: u32) -> f64 {
        self.anchor_height[idx as usize]
    }

    /// Returns the cached background image width for the given slot.
    #[must_use]
    pub fn image_width_at(&self, idx: u32) -> f64 {
        self.image_width[idx as usize]
    }

    /// Returns the cached background image height for the given slot.
    #[must_use]
    pub fn image_height_at(&self, idx: u32) -> f64 {
        self.image_height[idx as usize]
    }

    /// Returns the cached horizontal centering offset for the given slot.
    #[must_use]
    pub fn image_x_offset_at(&self, idx: u32) -> f64 {
        self.image_x_offset[idx as usize]
    }

    /// Returns whether the layer was visible as of the last rendered frame.
    #[must_use]
    pub fn is_visible_at(&self, idx: u32) -> bool {
        self.visible[idx as usize]
    }

    /// Returns the placement computed by the last rendered frame.
    ///
    /// Only meaningful for slots listed in
    /// [`FrameChanges::placed`](crate::render::FrameChanges::placed);
    /// culled layers keep their previous placement.
    #[must_use]
    pub fn placement_at(&self, idx: u32) -> &LayerPlacement {
        &self.placement[idx as usize]
    }
}
