// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for stratum.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`DomStyleProbe`]: style recognition and empirical 3D-transform probing
//! - [`DomPresenter`]: block/image DOM element management
//! - [`ParallaxController`]: event wiring and the rAF-coalesced frame loop
//!
//! # Usage
//!
//! ```rust,ignore
//! let origins: Vec<HtmlElement> = /* elements carrying data-image/data-tile */;
//! let controller = ParallaxController::attach(EngineConfig::default(), &origins)
//!     .expect("no window");
//! // Keep the controller alive; dropping it unwires the events.
//! ```

#![no_std]

extern crate alloc;

mod events;
mod presenter;
mod probe;
mod raf;

pub use events::{DomAnchors, ParallaxController, anchor_spec_from};
pub use presenter::DomPresenter;
pub use probe::DomStyleProbe;
pub use stratum_core::backend::Presenter;
