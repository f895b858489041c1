// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic, DOM-free harness for driving a parallax engine.
//!
//! The harness stands in for everything a platform backend provides:
//! [`ScriptedDocument`] plays the document (viewport, anchors, scroll
//! offset), [`RecordingPresenter`] plays the style sink (capturing every
//! patch that would be applied), and the harness itself plays the event
//! wiring and the frame-scheduling primitive — [`scroll`](Harness::scroll)
//! requests coalesced renders and [`pump_frame`](Harness::pump_frame)
//! stands in for the display-refresh callback.
//!
//! Used by stratum's own integration tests; also handy for embedders who
//! want to assert on the exact style output of a scroll timeline.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;

use stratum_core::anchor::{AnchorId, AnchorProvider, AnchorSpec};
use stratum_core::backend::Presenter;
use stratum_core::capability::{CapabilityProfile, TransformTier};
use stratum_core::engine::{EngineConfig, ParallaxEngine};
use stratum_core::layer::{LayerStore, LayoutChanges};
use stratum_core::render::FrameChanges;
use stratum_core::scheduler::RenderRequest;
use stratum_core::style::{self, StylePatch};
use stratum_core::trace::{FrameEvent, LayoutPassEvent, RenderRequestEvent, TraceSink, Tracer};
use stratum_core::viewport::Viewport;

/// One scripted anchor region's geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScriptedAnchor {
    /// Document-relative top, in px.
    pub top: f64,
    /// Rendered height, in px.
    pub height: f64,
}

/// A scripted document: anchor geometry the harness engine reads during
/// layout passes.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDocument {
    /// Anchor geometry, indexed by [`AnchorId`].
    pub anchors: Vec<ScriptedAnchor>,
}

impl AnchorProvider for ScriptedDocument {
    fn offset_top(&self, anchor: AnchorId) -> f64 {
        self.anchors[anchor.0 as usize].top
    }

    fn rendered_height(&self, anchor: AnchorId) -> f64 {
        self.anchors[anchor.0 as usize].height
    }
}

/// One layout batch as a presenter saw it.
#[derive(Clone, Debug)]
pub struct RecordedLayout {
    /// Slots that were laid out.
    pub laid_out: Vec<u32>,
    /// The viewport the pass ran against.
    pub viewport: Viewport,
    /// `(slot, image width, image height)` for each laid-out layer.
    pub image_sizes: Vec<(u32, f64, f64)>,
}

/// One rendered frame as a presenter saw it.
#[derive(Clone, Debug)]
pub struct RecordedFrame {
    /// The clamped scroll offset the frame rendered at.
    pub scroll_top: f64,
    /// `(slot, patch)` for each placed layer's container.
    pub block_patches: Vec<(u32, StylePatch)>,
    /// `(slot, patch)` for each placed layer's image.
    pub image_patches: Vec<(u32, StylePatch)>,
    /// Slots hidden this frame.
    pub hidden: Vec<u32>,
}

/// A [`Presenter`] that records what it would have styled.
#[derive(Debug)]
pub struct RecordingPresenter {
    tier: TransformTier,
    /// Every layout batch applied, oldest first.
    pub layouts: Vec<RecordedLayout>,
    /// Every frame applied, oldest first.
    pub frames: Vec<RecordedFrame>,
}

impl RecordingPresenter {
    /// Creates a recorder styling through the given tier.
    #[must_use]
    pub fn new(tier: TransformTier) -> Self {
        Self {
            tier,
            layouts: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// The most recent frame, if any frame has rendered.
    #[must_use]
    pub fn last_frame(&self) -> Option<&RecordedFrame> {
        self.frames.last()
    }
}

impl Presenter for RecordingPresenter {
    fn apply_layout(&mut self, store: &LayerStore, viewport: &Viewport, changes: &LayoutChanges) {
        self.layouts.push(RecordedLayout {
            laid_out: changes.laid_out.clone(),
            viewport: *viewport,
            image_sizes: changes
                .laid_out
                .iter()
                .map(|&idx| (idx, store.image_width_at(idx), store.image_height_at(idx)))
                .collect(),
        });
    }

    fn apply_frame(&mut self, store: &LayerStore, changes: &FrameChanges) {
        self.frames.push(RecordedFrame {
            scroll_top: changes.scroll_top,
            block_patches: changes
                .placed
                .iter()
                .map(|&idx| (idx, style::block_patch(self.tier, store.placement_at(idx))))
                .collect(),
            image_patches: changes
                .placed
                .iter()
                .map(|&idx| (idx, style::image_patch(self.tier, store.placement_at(idx))))
                .collect(),
            hidden: changes.hidden.clone(),
        });
    }
}

/// Deterministic engine driver: scripted document in, recorded style
/// output out.
pub struct Harness {
    engine: ParallaxEngine,
    /// The scripted document; mutate anchor geometry between passes.
    pub document: ScriptedDocument,
    /// The recording style sink.
    pub presenter: RecordingPresenter,
    /// Current raw scroll offset (unclamped, as the environment reports).
    pub scroll_top: f64,
    /// Number of scheduling opportunities consumed (frames pumped).
    pub frames_pumped: u64,
    layout_changes: LayoutChanges,
    frame_changes: FrameChanges,
    trace: Option<Box<dyn TraceSink>>,
}

impl core::fmt::Debug for Harness {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Harness")
            .field("document", &self.document)
            .field("scroll_top", &self.scroll_top)
            .field("frames_pumped", &self.frames_pumped)
            .finish_non_exhaustive()
    }
}

impl Harness {
    /// Creates a harness with one layer per `(spec, anchor)` pair.
    #[must_use]
    pub fn new(
        config: EngineConfig,
        capability: CapabilityProfile,
        layers: Vec<(AnchorSpec, ScriptedAnchor)>,
    ) -> Self {
        let mut engine = ParallaxEngine::new(config, capability);
        let mut document = ScriptedDocument::default();
        for (spec, anchor) in layers {
            engine.register(&spec);
            document.anchors.push(anchor);
        }
        let presenter = RecordingPresenter::new(engine.tier());
        Self {
            engine,
            document,
            presenter,
            scroll_top: 0.0,
            frames_pumped: 0,
            layout_changes: LayoutChanges::default(),
            frame_changes: FrameChanges::default(),
            trace: None,
        }
    }

    /// Installs a trace sink receiving layout and frame events.
    pub fn set_trace_sink(&mut self, sink: Box<dyn TraceSink>) {
        self.trace = Some(sink);
    }

    /// Borrows the engine (e.g. to inspect the store or tier).
    #[must_use]
    pub fn engine(&self) -> &ParallaxEngine {
        &self.engine
    }

    /// Delivers a layout-affecting event (`resize` or initial `load`):
    /// layout runs synchronously, then a render is requested.
    pub fn resize(&mut self, width: f64, height: f64, document_height: f64) {
        let viewport = Viewport::new(width, height, document_height);
        self.engine
            .layout_all_into(viewport, &self.document, &mut self.layout_changes);
        self.presenter.apply_layout(
            self.engine.store(),
            self.engine.viewport(),
            &self.layout_changes,
        );
        let event = LayoutPassEvent::new(self.engine.viewport(), &self.layout_changes);
        self.tracer().layout_pass(&event);
        self.request_render();
    }

    /// Delivers a scroll event at the given raw offset.
    ///
    /// Returns whether this request scheduled a frame or coalesced into a
    /// pending one.
    pub fn scroll(&mut self, raw_scroll_top: f64) -> RenderRequest {
        self.scroll_top = raw_scroll_top;
        self.request_render()
    }

    fn request_render(&mut self) -> RenderRequest {
        let request = self.engine.request_render();
        self.tracer().render_request(&RenderRequestEvent {
            coalesced: request == RenderRequest::Coalesced,
        });
        request
    }

    /// Fires the display-refresh callback: renders the pending frame (if
    /// any) against the *current* scroll offset and returns whether a
    /// frame ran.
    pub fn pump_frame(&mut self) -> bool {
        if !self.engine.render_pending() {
            return false;
        }
        self.engine
            .render_frame_into(self.scroll_top, &mut self.frame_changes);
        self.presenter
            .apply_frame(self.engine.store(), &self.frame_changes);
        self.engine.render_complete();
        self.frames_pumped += 1;
        let event = FrameEvent::from(&self.frame_changes);
        self.tracer().frame(&event);
        true
    }

    fn tracer(&mut self) -> Tracer<'_> {
        match &mut self.trace {
            Some(sink) => Tracer::new(sink.as_mut()),
            None => Tracer::none(),
        }
    }
}
