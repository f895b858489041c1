// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core geometry and scheduling for scroll-driven parallax backgrounds.
//!
//! `stratum_core` computes and applies scroll-driven offsets to background
//! layers anchored to document regions, so each background appears to scroll
//! at a different rate than the page content. It is `no_std` compatible
//! (with `alloc`) and contains no platform glue: DOM access, style probing
//! mechanics, and event wiring live in backend crates.
//!
//! # Architecture
//!
//! The engine runs two passes over a flat collection of layers:
//!
//! ```text
//!   resize / load                      scroll
//!        │                                │
//!        ▼                                ▼
//!   LayerStore::layout_pass()   RenderScheduler::request()
//!        │                                │ (coalesced per frame)
//!        ▼                                ▼
//!   LayoutChanges            LayerStore::render_frame()
//!        │                                │
//!        └────────────┐      ┌────────────┘
//!                     ▼      ▼
//!              Presenter::apply_*() ──► style mutations
//! ```
//!
//! **[`capability`]** — Which transform tier the environment supports
//! (3D transform, 2D transform, or positional fallback), detected once
//! through an externally supplied style probe.
//!
//! **[`viewport`]** — Viewport dimensions and the scroll bound derived from
//! document height, refreshed only by layout passes.
//!
//! **[`anchor`]** — Handles and traits for the externally owned document
//! regions that layers attach to. Core reads anchor geometry, never
//! mutates it.
//!
//! **[`layer`]** — Struct-of-arrays layer storage with cached per-layer
//! layout fields, invalidated through a dirty channel and recomputed by
//! [`layout_pass`](layer::LayerStore::layout_pass).
//!
//! **[`render`]** — The per-frame pass: visibility culling and displacement
//! for each layer at the current scroll offset.
//!
//! **[`style`]** — Construction of the concrete style patches (including
//! vendor-prefixed transform properties) that presenters apply.
//!
//! **[`backend`]** — The [`Presenter`](backend::Presenter) trait that
//! platform backends implement to apply layout and frame changes.
//!
//! **[`scheduler`]** — Pending-flag render coalescing: at most one frame
//! render per scheduling opportunity, with the in-flight frame reading the
//! latest scroll state.
//!
//! **[`engine`]** — [`ParallaxEngine`](engine::ParallaxEngine), tying the
//! pieces together behind the two entry points backends call.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types
//! for pass instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod anchor;
pub mod backend;
pub mod capability;
pub mod engine;
pub mod layer;
pub mod render;
pub mod scheduler;
pub mod style;
pub mod trace;
pub mod viewport;
