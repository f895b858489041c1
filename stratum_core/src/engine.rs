// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The engine instance wiring layout, rendering, and scheduling together.
//!
//! One [`ParallaxEngine`] owns one layer collection, one capability
//! profile, the current viewport snapshot, and one
//! [`RenderScheduler`]. External event handlers drive it through exactly
//! two entry points:
//!
//! - `load` / `resize` → [`layout_all`](ParallaxEngine::layout_all)
//!   followed by a render (layout always completes synchronously before
//!   any render reads the refreshed geometry);
//! - `scroll` → [`request_render`](ParallaxEngine::request_render), then
//!   [`render_frame`](ParallaxEngine::render_frame) once the scheduling
//!   opportunity arrives.
//!
//! Everything runs on the environment's single event thread; no locking,
//! but re-entrant renders are suppressed by the scheduler's pending flag.

use crate::anchor::{AnchorProvider, AnchorSpec};
use crate::capability::{CapabilityProfile, TransformTier};
use crate::layer::{LayerId, LayerStore, LayoutChanges};
use crate::render::FrameChanges;
use crate::scheduler::{RenderRequest, RenderScheduler};
use crate::viewport::Viewport;

/// Engine construction parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    /// Ratio governing how fast a background image moves relative to page
    /// scroll: 0 is a fixed background, 1 scrolls with the page.
    pub scroll_factor: f64,
}

impl EngineConfig {
    /// The default scroll factor.
    pub const DEFAULT_SCROLL_FACTOR: f64 = 0.2;
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scroll_factor: Self::DEFAULT_SCROLL_FACTOR,
        }
    }
}

/// A parallax engine instance: layers, capability profile, viewport, and
/// render scheduling for one independent parallax group.
///
/// Change buffers are owned by the caller and reused across passes (the
/// `*_into` variants), so steady-state operation performs no per-frame
/// allocation beyond list growth.
#[derive(Debug)]
pub struct ParallaxEngine {
    config: EngineConfig,
    capability: CapabilityProfile,
    tier: TransformTier,
    viewport: Viewport,
    store: LayerStore,
    scheduler: RenderScheduler,
}

impl ParallaxEngine {
    /// Creates an engine with no layers and a zero-sized viewport.
    ///
    /// The capability profile is fixed for the engine's lifetime; detect it
    /// once (see [`CapabilityProfile::detect`]) and pass it in.
    #[must_use]
    pub fn new(config: EngineConfig, capability: CapabilityProfile) -> Self {
        Self {
            config,
            capability,
            tier: capability.tier(),
            viewport: Viewport::new(0.0, 0.0, 0.0),
            store: LayerStore::new(),
            scheduler: RenderScheduler::new(),
        }
    }

    /// Registers a layer for an anchor that declares a background.
    pub fn register(&mut self, spec: &AnchorSpec) -> LayerId {
        self.store.register(spec)
    }

    /// Runs a full layout pass against a fresh viewport snapshot, writing
    /// the results into a caller-owned buffer.
    ///
    /// Called for layout-invalidating events (initial load, resize). Every
    /// layer's cached geometry is recomputed and the scroll bound is
    /// refreshed. The caller applies the changes through its
    /// [`Presenter`](crate::backend::Presenter) and then renders.
    pub fn layout_all_into(
        &mut self,
        viewport: Viewport,
        provider: &impl AnchorProvider,
        changes: &mut LayoutChanges,
    ) {
        self.viewport = viewport;
        self.store.invalidate_all();
        self.store
            .layout_pass(&self.viewport, provider, self.config.scroll_factor, changes);
    }

    /// Allocating convenience for [`layout_all_into`](Self::layout_all_into).
    pub fn layout_all(
        &mut self,
        viewport: Viewport,
        provider: &impl AnchorProvider,
    ) -> LayoutChanges {
        let mut changes = LayoutChanges::default();
        self.layout_all_into(viewport, provider, &mut changes);
        changes
    }

    /// Relays out a single layer whose anchor changed on its own (e.g. its
    /// content finished loading), against the *current* viewport snapshot.
    pub fn relayout_into(
        &mut self,
        id: LayerId,
        provider: &impl AnchorProvider,
        changes: &mut LayoutChanges,
    ) {
        self.store.invalidate(id);
        self.store
            .layout_pass(&self.viewport, provider, self.config.scroll_factor, changes);
    }

    /// Renders one frame at the given raw scroll offset, writing the
    /// results into a caller-owned buffer.
    ///
    /// The offset is clamped to the viewport's scroll bound. Note the bound
    /// reflects the document height as of the last layout pass; pages whose
    /// height changes without a resize keep the stale bound until the next
    /// pass.
    pub fn render_frame_into(&mut self, scroll_top: f64, changes: &mut FrameChanges) {
        self.store.render_frame(
            &self.viewport,
            scroll_top,
            self.config.scroll_factor,
            changes,
        );
    }

    /// Allocating convenience for [`render_frame_into`](Self::render_frame_into).
    pub fn render_frame(&mut self, scroll_top: f64) -> FrameChanges {
        let mut changes = FrameChanges::default();
        self.render_frame_into(scroll_top, &mut changes);
        changes
    }

    /// Requests a frame render; see [`RenderScheduler::request`].
    pub fn request_render(&mut self) -> RenderRequest {
        self.scheduler.request()
    }

    /// Marks the in-flight render complete.
    pub fn render_complete(&mut self) {
        self.scheduler.complete();
    }

    /// Returns whether a render is currently in flight.
    #[must_use]
    pub fn render_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Returns the layer store (presenters read geometry through this).
    #[must_use]
    pub fn store(&self) -> &LayerStore {
        &self.store
    }

    /// Returns the engine's capability profile.
    #[must_use]
    pub fn capability(&self) -> CapabilityProfile {
        self.capability
    }

    /// Returns the transform tier selected for this engine's lifetime.
    #[must_use]
    pub fn tier(&self) -> TransformTier {
        self.tier
    }

    /// Returns the viewport as of the last layout pass.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Returns the engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::{AnchorId, BackgroundSource};
    use alloc::string::ToString;
    use alloc::vec::Vec;

    struct Anchors(Vec<(f64, f64)>);

    impl AnchorProvider for Anchors {
        fn offset_top(&self, anchor: AnchorId) -> f64 {
            self.0[anchor.0 as usize].0
        }

        fn rendered_height(&self, anchor: AnchorId) -> f64 {
            self.0[anchor.0 as usize].1
        }
    }

    fn engine_with_layer() -> ParallaxEngine {
        let capability = CapabilityProfile {
            supports_3d: true,
            supports_2d: true,
        };
        let mut engine = ParallaxEngine::new(EngineConfig::default(), capability);
        engine.register(&AnchorSpec {
            anchor: AnchorId(0),
            source: BackgroundSource::Image("bg.jpg".to_string()),
            declared_width: 1600.0,
            declared_height: 900.0,
        });
        engine
    }

    #[test]
    fn default_scroll_factor() {
        assert_eq!(EngineConfig::default().scroll_factor, 0.2);
    }

    #[test]
    fn layout_then_render_flow() {
        let mut engine = engine_with_layer();
        let anchors = Anchors(alloc::vec![(200.0, 400.0)]);

        let layout = engine.layout_all(Viewport::new(1000.0, 800.0, 3000.0), &anchors);
        assert_eq!(layout.laid_out, alloc::vec![0]);

        let frame = engine.render_frame(0.0);
        assert_eq!(frame.placed, alloc::vec![0]);
        assert_eq!(engine.store().placement_at(0).block_y, 200.0);
    }

    #[test]
    fn scroll_bound_is_stale_between_layout_passes() {
        let mut engine = engine_with_layer();
        let anchors = Anchors(alloc::vec![(0.0, 600.0)]);
        engine.layout_all(Viewport::new(1000.0, 800.0, 1200.0), &anchors);

        // The document grew after layout (say, injected content), but no
        // resize fired: the old bound of 400 still clamps.
        let frame = engine.render_frame(900.0);
        assert_eq!(frame.scroll_top, 400.0);

        // A layout pass picks up the new height.
        engine.layout_all(Viewport::new(1000.0, 800.0, 2000.0), &anchors);
        let frame = engine.render_frame(900.0);
        assert_eq!(frame.scroll_top, 900.0);
    }

    #[test]
    fn resize_relayouts_all_layers() {
        let mut engine = engine_with_layer();
        engine.register(&AnchorSpec {
            anchor: AnchorId(1),
            source: BackgroundSource::Tile("tile.png".to_string()),
            declared_width: 0.0,
            declared_height: 0.0,
        });
        let anchors = Anchors(alloc::vec![(200.0, 400.0), (1500.0, 300.0)]);

        engine.layout_all(Viewport::new(1000.0, 800.0, 3000.0), &anchors);
        let layout = engine.layout_all(Viewport::new(640.0, 480.0, 3000.0), &anchors);
        assert_eq!(layout.laid_out.len(), 2);
        // Tile layer sizes against the narrower viewport (ratio 1.0, no
        // anchor tall enough to force height derivation at factor 0.2).
        assert_eq!(engine.store().image_width_at(1), 640.0);
    }

    #[test]
    fn tier_is_fixed_at_construction() {
        let engine = ParallaxEngine::new(
            EngineConfig::default(),
            CapabilityProfile {
                supports_3d: false,
                supports_2d: true,
            },
        );
        assert_eq!(engine.tier(), TransformTier::Translate2d);
    }

    #[test]
    fn request_render_coalesces_until_complete() {
        let mut engine = engine_with_layer();
        assert_eq!(engine.request_render(), RenderRequest::Scheduled);
        assert_eq!(engine.request_render(), RenderRequest::Coalesced);
        assert!(engine.render_pending());
        engine.render_complete();
        assert_eq!(engine.request_render(), RenderRequest::Scheduled);
    }

    #[test]
    fn relayout_refreshes_one_layer_against_current_viewport() {
        let mut engine = engine_with_layer();
        let id = engine.register(&AnchorSpec {
            anchor: AnchorId(1),
            source: BackgroundSource::Image("other.jpg".to_string()),
            declared_width: 800.0,
            declared_height: 600.0,
        });
        let anchors = Anchors(alloc::vec![(200.0, 400.0), (900.0, 250.0)]);
        engine.layout_all(Viewport::new(1000.0, 800.0, 3000.0), &anchors);

        // The second anchor's image loaded and its height grew.
        let grown = Anchors(alloc::vec![(200.0, 400.0), (900.0, 500.0)]);
        let mut layout = LayoutChanges::default();
        engine.relayout_into(id, &grown, &mut layout);
        assert_eq!(layout.laid_out, alloc::vec![1]);
        assert_eq!(engine.store().anchor_height_at(1), 500.0);
        assert_eq!(engine.store().anchor_height_at(0), 400.0);
    }
}
