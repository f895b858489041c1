// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM element management.
//!
//! Translates [`LayerStore`] state into positioned block/image element
//! pairs by applying [`LayoutChanges`] and [`FrameChanges`].
//!
//! Each layer is presented as a `.parallax-block` `<div>` prepended to
//! `<body>`, containing one `.parallax-image` child: an `<img>` for image
//! backgrounds or a tiled `<div>` for tile backgrounds. Blocks sit in a
//! fixed plane behind the content; all motion comes from the per-frame
//! style patches.
//!
//! [`LayerStore`]: stratum_core::layer::LayerStore
//! [`LayoutChanges`]: stratum_core::layer::LayoutChanges
//! [`FrameChanges`]: stratum_core::render::FrameChanges

use alloc::format;
use alloc::vec::Vec;

use wasm_bindgen::JsCast as _;
use web_sys::{Document, HtmlElement, HtmlImageElement};

use stratum_core::anchor::BackgroundSource;
use stratum_core::backend::Presenter;
use stratum_core::capability::TransformTier;
use stratum_core::layer::{LayerStore, LayoutChanges};
use stratum_core::render::FrameChanges;
use stratum_core::style::{self, StylePatch};
use stratum_core::viewport::Viewport;

/// Maps a [`LayerStore`] to live DOM elements.
///
/// The presenter lazily creates a block/image element pair per layer slot
/// on first layout and keeps them until dropped. The transform tier is
/// fixed at construction, matching the engine's capability profile.
pub struct DomPresenter {
    document: Document,
    tier: TransformTier,
    blocks: Vec<Option<HtmlElement>>,
    images: Vec<Option<HtmlElement>>,
}

impl core::fmt::Debug for DomPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPresenter")
            .field("tier", &self.tier)
            .field("blocks_len", &self.blocks.len())
            .finish_non_exhaustive()
    }
}

impl DomPresenter {
    /// Creates a presenter that manages layer elements under `document`'s
    /// body, styling through the given tier.
    #[must_use]
    pub fn new(document: Document, tier: TransformTier) -> Self {
        Self {
            document,
            tier,
            blocks: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Returns the block element for the given slot, if it exists.
    #[must_use]
    pub fn block_at(&self, idx: u32) -> Option<&HtmlElement> {
        self.blocks.get(idx as usize).and_then(|slot| slot.as_ref())
    }

    /// Returns the image element for the given slot, if it exists.
    #[must_use]
    pub fn image_at(&self, idx: u32) -> Option<&HtmlElement> {
        self.images.get(idx as usize).and_then(|slot| slot.as_ref())
    }

    fn put(slots: &mut Vec<Option<HtmlElement>>, idx: u32, el: HtmlElement) {
        let slot = idx as usize;
        if slots.len() <= slot {
            slots.resize_with(slot + 1, || None);
        }
        slots[slot] = Some(el);
    }

    /// Creates the block/image pair for a slot on first layout.
    fn ensure_elements(&mut self, store: &LayerStore, idx: u32) {
        if self.block_at(idx).is_some() {
            return;
        }
        let Some(body) = self.document.body() else {
            return;
        };
        let Ok(block) = self.document.create_element("div") else {
            return;
        };
        let block: HtmlElement = block.unchecked_into();
        block.set_class_name("parallax-block");
        let s = block.style();
        let _ = s.set_property("position", "fixed");
        let _ = s.set_property("top", "0");
        let _ = s.set_property("left", "0");
        let _ = s.set_property("overflow", "hidden");
        let _ = s.set_property("z-index", "-1");
        let _ = s.set_property("visibility", "hidden");

        let image: HtmlElement = match store.source_at(idx) {
            BackgroundSource::Image(url) => {
                let Ok(el) = self.document.create_element("img") else {
                    return;
                };
                let img: HtmlImageElement = el.unchecked_into();
                img.set_src(url);
                img.unchecked_into()
            }
            BackgroundSource::Tile(url) => {
                let Ok(el) = self.document.create_element("div") else {
                    return;
                };
                let div: HtmlElement = el.unchecked_into();
                let _ = div
                    .style()
                    .set_property("background-image", &format!("url({url})"));
                let _ = div.style().set_property("background-repeat", "repeat");
                div
            }
        };
        image.set_class_name("parallax-image");
        let s = image.style();
        let _ = s.set_property("position", "absolute");
        let _ = s.set_property("top", "0");
        let _ = s.set_property("left", "0");

        let _ = block.append_child(&image);
        // Blocks go behind the content, first in the body.
        let _ = body.insert_before(&block, body.first_child().as_ref());

        Self::put(&mut self.blocks, idx, block);
        Self::put(&mut self.images, idx, image);
    }

    fn apply_patch(el: &HtmlElement, patch: &StylePatch) {
        let style = el.style();
        for (name, value) in patch.iter() {
            let _ = style.set_property(name, value);
        }
    }
}

impl Presenter for DomPresenter {
    fn apply_layout(&mut self, store: &LayerStore, viewport: &Viewport, changes: &LayoutChanges) {
        for &idx in &changes.laid_out {
            self.ensure_elements(store, idx);
            if let Some(image) = self.image_at(idx) {
                let s = image.style();
                let _ = s.set_property("width", &format!("{}px", store.image_width_at(idx)));
                let _ = s.set_property("height", &format!("{}px", store.image_height_at(idx)));
            }
            if let Some(block) = self.block_at(idx) {
                let s = block.style();
                let _ = s.set_property("width", &format!("{}px", viewport.width));
                let _ = s.set_property("height", &format!("{}px", store.anchor_height_at(idx)));
                let _ = s.set_property("visibility", "hidden");
            }
        }
    }

    fn apply_frame(&mut self, store: &LayerStore, changes: &FrameChanges) {
        for &idx in &changes.placed {
            let placement = store.placement_at(idx);
            if let Some(block) = self.block_at(idx) {
                Self::apply_patch(block, &style::block_patch(self.tier, placement));
            }
            if let Some(image) = self.image_at(idx) {
                Self::apply_patch(image, &style::image_patch(self.tier, placement));
            }
        }
        for &idx in &changes.hidden {
            if let Some(block) = self.block_at(idx) {
                Self::apply_patch(block, &style::hidden_patch());
            }
        }
    }
}
