// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame render pass: visibility culling and displacement.
//!
//! Given the clamped scroll offset and the cached layout fields, each frame
//! decides per layer:
//!
//! 1. **Visibility** — standard interval overlap between the anchor's
//!    document-space extent `[top, top + height)` and the viewport window
//!    `[scroll, scroll + viewport_height)`. An anchor whose top sits
//!    exactly at the viewport's bottom edge is *not* visible.
//! 2. **Displacement** — the layer container tracks its anchor 1:1
//!    (`block_y = anchor_top - scroll_top`), while the background image
//!    moves at `scroll_factor` relative to the page, which expressed
//!    relative to the container's own motion is
//!    `image_y = block_y * (scroll_factor - 1)`.
//!
//! Culling is an optimization, not just a visual no-op: an invisible layer
//! is hidden and skipped with no displacement math done for it that frame.
//!
//! All values are device-independent px; non-integer positions are
//! permitted.

use alloc::vec::Vec;

use crate::layer::LayerStore;
use crate::viewport::Viewport;

/// A visible layer's displacement for one frame, in px.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayerPlacement {
    /// Vertical offset of the layer container (tracks the anchor 1:1).
    pub block_y: f64,
    /// Vertical offset of the background image within the container.
    pub image_y: f64,
    /// Horizontal offset of the background image (negated centering
    /// offset; zero when the image was width-derived).
    pub image_x: f64,
}

/// The set of changes produced by a single
/// [`LayerStore::render_frame`] call.
#[derive(Clone, Debug, Default)]
pub struct FrameChanges {
    /// Layers visible this frame, in slot order. Every visible layer is
    /// restyled every frame; positions are not diffed.
    pub placed: Vec<u32>,
    /// Layers that transitioned from visible to hidden this frame.
    /// Already hidden layers are skipped entirely.
    pub hidden: Vec<u32>,
    /// The clamped scroll offset the frame was rendered at.
    pub scroll_top: f64,
}

impl FrameChanges {
    /// Clears the change lists.
    pub fn clear(&mut self) {
        self.placed.clear();
        self.hidden.clear();
        self.scroll_top = 0.0;
    }
}

impl LayerStore {
    /// Renders one frame at the given raw scroll offset.
    ///
    /// `scroll_top` is clamped to `[0, viewport.max_scroll_top]` before
    /// use, tolerating overscroll reported by the environment. Reads the
    /// cached layout fields of the most recent
    /// [`layout_pass`](Self::layout_pass); the caller guarantees a layout
    /// pass has completed since the last geometry-affecting event.
    pub fn render_frame(
        &mut self,
        viewport: &Viewport,
        scroll_top: f64,
        scroll_factor: f64,
        changes: &mut FrameChanges,
    ) {
        changes.clear();
        let scroll_top = viewport.clamp_scroll(scroll_top);
        changes.scroll_top = scroll_top;

        for i in 0..self.len() {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "layer counts are far below u32::MAX"
            )]
            let idx = i as u32;
            let top = self.anchor_top[i];
            let visible =
                top < scroll_top + viewport.height && top + self.anchor_height[i] > scroll_top;

            if visible {
                let block_y = top - scroll_top;
                self.placement[i] = LayerPlacement {
                    block_y,
                    image_y: block_y * (scroll_factor - 1.0),
                    image_x: -self.image_x_offset[i],
                };
                self.visible[i] = true;
                changes.placed.push(idx);
            } else {
                if self.visible[i] {
                    changes.hidden.push(idx);
                }
                self.visible[i] = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::{AnchorId, AnchorProvider, AnchorSpec, BackgroundSource};
    use crate::layer::LayoutChanges;
    use alloc::string::ToString;

    struct Anchors(Vec<(f64, f64)>);

    impl AnchorProvider for Anchors {
        fn offset_top(&self, anchor: AnchorId) -> f64 {
            self.0[anchor.0 as usize].0
        }

        fn rendered_height(&self, anchor: AnchorId) -> f64 {
            self.0[anchor.0 as usize].1
        }
    }

    /// Store with one laid-out image layer per `(top, height)` anchor.
    fn laid_out_store(anchors: &[(f64, f64)], vp: &Viewport, scroll_factor: f64) -> LayerStore {
        let mut store = LayerStore::new();
        #[expect(
            clippy::cast_possible_truncation,
            reason = "test anchor counts are tiny"
        )]
        for i in 0..anchors.len() as u32 {
            store.register(&AnchorSpec {
                anchor: AnchorId(i),
                source: BackgroundSource::Image("bg.jpg".to_string()),
                declared_width: 1600.0,
                declared_height: 900.0,
            });
        }
        let mut changes = LayoutChanges::default();
        store.layout_pass(vp, &Anchors(anchors.to_vec()), scroll_factor, &mut changes);
        store
    }

    #[test]
    fn placement_at_top_of_page() {
        // Viewport 1000x800, anchor at 200 with height 400, factor 0.2.
        let vp = Viewport::new(1000.0, 800.0, 3000.0);
        let mut store = laid_out_store(&[(200.0, 400.0)], &vp, 0.2);
        let mut frame = FrameChanges::default();

        store.render_frame(&vp, 0.0, 0.2, &mut frame);

        assert_eq!(frame.placed, alloc::vec![0]);
        let p = store.placement_at(0);
        assert_eq!(p.block_y, 200.0);
        assert_eq!(p.image_y, 200.0 * (0.2 - 1.0)); // -160
    }

    #[test]
    fn layer_scrolled_past_is_hidden() {
        let vp = Viewport::new(1000.0, 800.0, 3000.0);
        let mut store = laid_out_store(&[(200.0, 400.0)], &vp, 0.2);
        let mut frame = FrameChanges::default();

        // Make it visible first so the cull produces a hide transition.
        store.render_frame(&vp, 0.0, 0.2, &mut frame);
        store.render_frame(&vp, 1000.0, 0.2, &mut frame);

        assert!(frame.placed.is_empty());
        assert_eq!(frame.hidden, alloc::vec![0]);
    }

    #[test]
    fn anchor_top_at_viewport_bottom_edge_is_not_visible() {
        // Anchor top exactly at scroll + viewport height: boundary excluded.
        let vp = Viewport::new(1000.0, 800.0, 3000.0);
        let mut store = laid_out_store(&[(800.0, 400.0)], &vp, 0.2);
        let mut frame = FrameChanges::default();

        store.render_frame(&vp, 0.0, 0.2, &mut frame);
        assert!(frame.placed.is_empty());

        // One pixel earlier and it overlaps.
        store.render_frame(&vp, 0.5, 0.2, &mut frame);
        assert_eq!(frame.placed, alloc::vec![0]);
    }

    #[test]
    fn anchor_bottom_at_viewport_top_edge_is_not_visible() {
        let vp = Viewport::new(1000.0, 800.0, 3000.0);
        let mut store = laid_out_store(&[(0.0, 400.0)], &vp, 0.2);
        let mut frame = FrameChanges::default();

        // Anchor occupies [0, 400); at scroll 400 its bottom touches the
        // viewport top and it is culled.
        store.render_frame(&vp, 400.0, 0.2, &mut frame);
        assert!(frame.placed.is_empty());
    }

    #[test]
    fn overscroll_is_clamped_before_use() {
        let vp = Viewport::new(1000.0, 800.0, 1200.0); // max scroll 400
        let mut store = laid_out_store(&[(0.0, 600.0)], &vp, 0.2);
        let mut frame = FrameChanges::default();

        // Rubber-band past the end: rendered as if at the bound.
        store.render_frame(&vp, 1000.0, 0.2, &mut frame);
        assert_eq!(frame.scroll_top, 400.0);
        assert_eq!(store.placement_at(0).block_y, -400.0);

        // Negative overscroll renders as 0.
        store.render_frame(&vp, -30.0, 0.2, &mut frame);
        assert_eq!(frame.scroll_top, 0.0);
        assert_eq!(store.placement_at(0).block_y, 0.0);
    }

    #[test]
    fn hidden_is_transition_only() {
        let vp = Viewport::new(1000.0, 800.0, 5000.0);
        let mut store = laid_out_store(&[(3000.0, 400.0)], &vp, 0.2);
        let mut frame = FrameChanges::default();

        // Never visible: no transition, nothing to hide.
        store.render_frame(&vp, 0.0, 0.2, &mut frame);
        assert!(frame.hidden.is_empty());
        store.render_frame(&vp, 10.0, 0.2, &mut frame);
        assert!(frame.hidden.is_empty());
    }

    #[test]
    fn image_x_is_negated_centering_offset() {
        // Ratio 2.0 against a 1000px viewport with a tall anchor forces
        // height-derived sizing and a positive centering offset.
        let vp = Viewport::new(1000.0, 800.0, 3000.0);
        let mut store = LayerStore::new();
        store.register(&AnchorSpec {
            anchor: AnchorId(0),
            source: BackgroundSource::Image("wide.jpg".to_string()),
            declared_width: 2.0,
            declared_height: 1.0,
        });
        let mut changes = LayoutChanges::default();
        store.layout_pass(&vp, &Anchors(alloc::vec![(0.0, 300.0)]), 0.2, &mut changes);
        assert_eq!(store.image_x_offset_at(0), 200.0);

        let mut frame = FrameChanges::default();
        store.render_frame(&vp, 0.0, 0.2, &mut frame);
        assert_eq!(store.placement_at(0).image_x, -200.0);
    }

    #[test]
    fn multiple_layers_cull_independently() {
        let vp = Viewport::new(1000.0, 800.0, 5000.0);
        let mut store =
            laid_out_store(&[(0.0, 400.0), (2000.0, 400.0), (600.0, 400.0)], &vp, 0.2);
        let mut frame = FrameChanges::default();

        store.render_frame(&vp, 0.0, 0.2, &mut frame);
        assert_eq!(frame.placed, alloc::vec![0, 2]);

        store.render_frame(&vp, 1900.0, 0.2, &mut frame);
        assert_eq!(frame.placed, alloc::vec![1]);
        assert_eq!(frame.hidden, alloc::vec![0, 2]);
    }
}
