// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Window event wiring and the live frame loop.
//!
//! [`ParallaxController`] owns one engine instance plus its DOM glue and
//! connects the three window events to the engine's two entry points:
//!
//! - `load` / `resize` — re-measure the viewport, run a layout pass, apply
//!   it, then render (layout always completes synchronously before the
//!   render reads the refreshed geometry);
//! - `scroll` — request a render; bursts coalesce into one frame which
//!   reads the scroll offset at execution time.
//!
//! Everything runs on the browser's single event thread; the engine and
//! presenter live in `RefCell`s behind one `Rc` shared with the installed
//! closures.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Event, HtmlElement, Window};

use stratum_core::anchor::{AnchorId, AnchorProvider, AnchorSpec, BackgroundSource};
use stratum_core::capability::CapabilityProfile;
use stratum_core::engine::{EngineConfig, ParallaxEngine};
use stratum_core::layer::LayoutChanges;
use stratum_core::render::FrameChanges;
use stratum_core::scheduler::RenderRequest;
use stratum_core::viewport::Viewport;

use crate::presenter::DomPresenter;
use crate::probe::DomStyleProbe;
use crate::raf;

/// Anchor geometry read from live document elements.
///
/// Indexed by [`AnchorId`]; ids are assigned in the order anchors were
/// accepted by [`ParallaxController::attach`].
pub struct DomAnchors {
    window: Window,
    elements: Vec<HtmlElement>,
}

impl core::fmt::Debug for DomAnchors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomAnchors")
            .field("elements_len", &self.elements.len())
            .finish_non_exhaustive()
    }
}

impl AnchorProvider for DomAnchors {
    fn offset_top(&self, anchor: AnchorId) -> f64 {
        let el = &self.elements[anchor.0 as usize];
        // Document-relative top: client rect plus the current scroll.
        el.get_bounding_client_rect().top() + self.window.page_y_offset().unwrap_or(0.0)
    }

    fn rendered_height(&self, anchor: AnchorId) -> f64 {
        f64::from(self.elements[anchor.0 as usize].offset_height())
    }
}

/// Builds an [`AnchorSpec`] from an element's `data-image` / `data-tile`
/// declaration, or `None` when the element declares no background.
///
/// `data-width` / `data-height` supply the image's intrinsic ratio;
/// malformed or missing values propagate as degenerate geometry per the
/// engine's documented precondition.
#[must_use]
pub fn anchor_spec_from(element: &HtmlElement, anchor: AnchorId) -> Option<AnchorSpec> {
    let dimension = |name: &str| {
        element
            .get_attribute(name)
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(0.0)
    };
    let source = if let Some(url) = element.get_attribute("data-image") {
        BackgroundSource::Image(url)
    } else if let Some(url) = element.get_attribute("data-tile") {
        BackgroundSource::Tile(url)
    } else {
        return None;
    };
    Some(AnchorSpec {
        anchor,
        source,
        declared_width: dimension("data-width"),
        declared_height: dimension("data-height"),
    })
}

type EventClosure = Closure<dyn FnMut(Event)>;
type DrawClosure = Closure<dyn FnMut(f64)>;

struct ControllerInner {
    window: Window,
    document: Document,
    engine: RefCell<ParallaxEngine>,
    presenter: RefCell<DomPresenter>,
    anchors: DomAnchors,

    // Reused change buffers.
    layout_changes: RefCell<LayoutChanges>,
    frame_changes: RefCell<FrameChanges>,

    /// The rAF callback. Set once during attach, referenced on every
    /// scheduled render.
    draw_closure: RefCell<Option<DrawClosure>>,
    /// Handle of the most recent `requestAnimationFrame`, for cancellation
    /// on drop.
    raf_handle: Cell<i32>,
    /// Installed window listeners, kept alive until drop.
    listeners: RefCell<Vec<(&'static str, EventClosure)>>,
}

impl ControllerInner {
    fn measure_viewport(&self) -> Viewport {
        let width = self
            .window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        Viewport::new(width, height, self.document_height())
    }

    /// Document height as the maximum of the DOM's several opinions;
    /// browsers disagree on how overflowing content is reported.
    fn document_height(&self) -> f64 {
        let mut height: f64 = 0.0;
        if let Some(body) = self.document.body() {
            height = height
                .max(f64::from(body.scroll_height()))
                .max(f64::from(body.offset_height()));
        }
        if let Some(root) = self.document.document_element() {
            height = height
                .max(f64::from(root.client_height()))
                .max(f64::from(root.scroll_height()));
            if let Ok(root) = root.dyn_into::<HtmlElement>() {
                height = height.max(f64::from(root.offset_height()));
            }
        }
        height
    }

    /// Layout-affecting event: layout, apply, then render.
    fn reconfigure(self: &Rc<Self>) {
        let viewport = self.measure_viewport();
        {
            let mut engine = self.engine.borrow_mut();
            let mut changes = self.layout_changes.borrow_mut();
            engine.layout_all_into(viewport, &self.anchors, &mut changes);
            self.presenter
                .borrow_mut()
                .apply_layout(engine.store(), engine.viewport(), &changes);
        }
        self.request_render();
    }

    /// Scroll event: coalesce into at most one pending frame.
    fn request_render(self: &Rc<Self>) {
        if self.engine.borrow_mut().request_render() == RenderRequest::Coalesced {
            return;
        }
        let scheduled = self.draw_closure.borrow().as_ref().and_then(|closure| {
            raf::schedule_frame(&self.window, closure.as_ref().unchecked_ref())
        });
        match scheduled {
            Some(handle) => self.raf_handle.set(handle),
            // No frame primitive: render synchronously, same turn.
            None => self.draw(),
        }
    }

    /// The coalesced frame render. Reads scroll state at execution time.
    fn draw(&self) {
        let scroll_top = self.window.page_y_offset().unwrap_or(0.0);
        let mut engine = self.engine.borrow_mut();
        let mut frame = self.frame_changes.borrow_mut();
        engine.render_frame_into(scroll_top, &mut frame);
        self.presenter
            .borrow_mut()
            .apply_frame(engine.store(), &frame);
        engine.render_complete();
    }
}

/// Wires a [`ParallaxEngine`] to a live window: anchors enumerated from
/// elements, capability detected from the document, events installed, and
/// an initial layout+render performed.
///
/// Dropping the controller removes the installed listeners and cancels any
/// pending frame.
pub struct ParallaxController {
    inner: Rc<ControllerInner>,
}

impl core::fmt::Debug for ParallaxController {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParallaxController").finish_non_exhaustive()
    }
}

impl ParallaxController {
    /// Attaches an engine to the current window.
    ///
    /// Elements in `origins` that declare a `data-image` or `data-tile`
    /// background each get one parallax layer; the rest are skipped.
    /// Returns `None` when no window or document is available.
    pub fn attach(config: EngineConfig, origins: &[HtmlElement]) -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;

        let capability = CapabilityProfile::detect(&DomStyleProbe::new(document.clone()));
        let mut engine = ParallaxEngine::new(config, capability);

        let mut elements = Vec::new();
        for origin in origins {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "anchor counts are far below u32::MAX"
            )]
            let id = AnchorId(elements.len() as u32);
            if let Some(spec) = anchor_spec_from(origin, id) {
                engine.register(&spec);
                elements.push(origin.clone());
            }
        }

        let presenter = DomPresenter::new(document.clone(), engine.tier());
        let inner = Rc::new(ControllerInner {
            anchors: DomAnchors {
                window: window.clone(),
                elements,
            },
            window,
            document,
            engine: RefCell::new(engine),
            presenter: RefCell::new(presenter),
            layout_changes: RefCell::new(LayoutChanges::default()),
            frame_changes: RefCell::new(FrameChanges::default()),
            draw_closure: RefCell::new(None),
            raf_handle: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
        });

        Self::install_draw(&inner);
        Self::install_listeners(&inner);

        // Initial layout and render; the load listener repeats this once
        // late-loading content has settled the geometry.
        inner.reconfigure();

        Some(Self { inner })
    }

    fn install_draw(inner: &Rc<ControllerInner>) {
        let target = Rc::clone(inner);
        let draw = Closure::wrap(Box::new(move |_timestamp_ms: f64| {
            target.draw();
        }) as Box<dyn FnMut(f64)>);
        *inner.draw_closure.borrow_mut() = Some(draw);
    }

    fn install_listeners(inner: &Rc<ControllerInner>) {
        let mut listeners = inner.listeners.borrow_mut();
        for (name, layout_affecting) in [("load", true), ("resize", true), ("scroll", false)] {
            let target = Rc::clone(inner);
            let closure = Closure::wrap(Box::new(move |_event: Event| {
                if layout_affecting {
                    target.reconfigure();
                } else {
                    target.request_render();
                }
            }) as Box<dyn FnMut(Event)>);
            let _ = inner
                .window
                .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            listeners.push((name, closure));
        }
    }

    /// Returns whether a frame render is currently in flight.
    #[must_use]
    pub fn render_pending(&self) -> bool {
        self.inner.engine.borrow().render_pending()
    }
}

impl Drop for ParallaxController {
    fn drop(&mut self) {
        for (name, closure) in self.inner.listeners.borrow_mut().drain(..) {
            let _ = self
                .inner
                .window
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }
        raf::cancel_frame(&self.inner.window, self.inner.raf_handle.get());
        // Drop the JS closure so it doesn't leak.
        self.inner.draw_closure.borrow_mut().take();
    }
}
