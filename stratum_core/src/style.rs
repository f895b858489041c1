// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style patch construction for layer containers and images.
//!
//! A [`StylePatch`] is an ordered mapping from concrete style property
//! names to string values; presenters apply patches verbatim to whichever
//! styling surface they manage. Patch construction switches once on the
//! [`TransformTier`] — exactly one tier's properties appear in any patch.
//!
//! Vendor prefixing is a style-sink concern, not a geometry concern: the
//! transform tiers write the same value under every name in
//! [`TRANSFORM_PROPERTIES`]. Property *probing* uses camel-cased prefixes
//! instead and lives with the backend's style probe.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::capability::TransformTier;
use crate::render::LayerPlacement;

/// Concrete property names a transform value is written under, bare name
/// first.
pub const TRANSFORM_PROPERTIES: [&str; 5] = [
    "transform",
    "-webkit-transform",
    "-moz-transform",
    "-o-transform",
    "-ms-transform",
];

/// An ordered set of style property assignments.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StylePatch {
    props: Vec<(&'static str, String)>,
}

impl StylePatch {
    /// Creates an empty patch.
    #[must_use]
    pub const fn new() -> Self {
        Self { props: Vec::new() }
    }

    /// Appends one property assignment.
    pub fn push(&mut self, property: &'static str, value: String) {
        self.props.push((property, value));
    }

    /// Iterates the assignments in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.props.iter().map(|(name, value)| (*name, value.as_str()))
    }

    /// Returns the number of assignments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.props.len()
    }

    /// Returns `true` if the patch assigns nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Returns the value assigned to `property`, if any.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.props
            .iter()
            .find(|(name, _)| *name == property)
            .map(|(_, value)| value.as_str())
    }

    /// Writes `value` under every name in [`TRANSFORM_PROPERTIES`].
    fn push_transform(&mut self, value: &str) {
        for name in TRANSFORM_PROPERTIES {
            self.push(name, String::from(value));
        }
    }
}

/// Builds the per-frame patch for a visible layer's container.
///
/// Visibility is re-asserted every frame; the vertical offset tracks the
/// anchor 1:1 through whichever primitive the tier provides. The container
/// never moves horizontally.
#[must_use]
pub fn block_patch(tier: TransformTier, placement: &LayerPlacement) -> StylePatch {
    let mut patch = StylePatch::new();
    patch.push("visibility", String::from("visible"));
    match tier {
        TransformTier::Translate3d => {
            patch.push_transform(&format!("translate3d(0px, {}px, 0px)", placement.block_y));
        }
        TransformTier::Translate2d => {
            patch.push_transform(&format!("translate(0px, {}px)", placement.block_y));
        }
        TransformTier::Positional => {
            patch.push("top", format!("{}px", placement.block_y));
            patch.push("left", String::from("0px"));
        }
    }
    patch
}

/// Builds the per-frame patch for a visible layer's background image.
#[must_use]
pub fn image_patch(tier: TransformTier, placement: &LayerPlacement) -> StylePatch {
    let mut patch = StylePatch::new();
    match tier {
        TransformTier::Translate3d => {
            patch.push_transform(&format!(
                "translate3d({}px, {}px, 0px)",
                placement.image_x, placement.image_y
            ));
        }
        TransformTier::Translate2d => {
            patch.push_transform(&format!(
                "translate({}px, {}px)",
                placement.image_x, placement.image_y
            ));
        }
        TransformTier::Positional => {
            patch.push("top", format!("{}px", placement.image_y));
            patch.push("left", format!("{}px", placement.image_x));
        }
    }
    patch
}

/// Builds the patch that hides a layer's container.
#[must_use]
pub fn hidden_patch() -> StylePatch {
    let mut patch = StylePatch::new();
    patch.push("visibility", String::from("hidden"));
    patch
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLACEMENT: LayerPlacement = LayerPlacement {
        block_y: 200.0,
        image_y: -160.0,
        image_x: -220.0,
    };

    #[test]
    fn tier_3d_writes_translate3d_under_all_prefixes() {
        let patch = block_patch(TransformTier::Translate3d, &PLACEMENT);
        assert_eq!(patch.get("visibility"), Some("visible"));
        for name in TRANSFORM_PROPERTIES {
            assert_eq!(patch.get(name), Some("translate3d(0px, 200px, 0px)"));
        }
        assert_eq!(patch.get("top"), None);
        assert_eq!(patch.len(), 1 + TRANSFORM_PROPERTIES.len());
    }

    #[test]
    fn tier_2d_writes_translate() {
        let patch = image_patch(TransformTier::Translate2d, &PLACEMENT);
        assert_eq!(patch.get("transform"), Some("translate(-220px, -160px)"));
        assert_eq!(patch.get("top"), None);
        assert_eq!(patch.get("left"), None);
    }

    #[test]
    fn positional_tier_writes_offsets_only() {
        let block = block_patch(TransformTier::Positional, &PLACEMENT);
        assert_eq!(block.get("top"), Some("200px"));
        assert_eq!(block.get("left"), Some("0px"));
        assert_eq!(block.get("transform"), None);

        let image = image_patch(TransformTier::Positional, &PLACEMENT);
        assert_eq!(image.get("top"), Some("-160px"));
        assert_eq!(image.get("left"), Some("-220px"));
        assert_eq!(image.get("transform"), None);
    }

    #[test]
    fn exactly_one_tier_per_patch() {
        for tier in [
            TransformTier::Translate3d,
            TransformTier::Translate2d,
            TransformTier::Positional,
        ] {
            let patch = image_patch(tier, &PLACEMENT);
            let has_transform = patch.get("transform").is_some();
            let has_positional = patch.get("top").is_some();
            assert_ne!(has_transform, has_positional, "tier {tier:?}");
        }
    }

    #[test]
    fn non_integer_positions_keep_their_fraction() {
        let placement = LayerPlacement {
            block_y: 150.5,
            image_y: -120.4,
            image_x: 0.0,
        };
        let patch = image_patch(TransformTier::Translate3d, &placement);
        assert_eq!(patch.get("transform"), Some("translate3d(0px, -120.4px, 0px)"));
        let block = block_patch(TransformTier::Positional, &placement);
        assert_eq!(block.get("top"), Some("150.5px"));
    }

    #[test]
    fn hidden_patch_only_touches_visibility() {
        let patch = hidden_patch();
        assert_eq!(patch.len(), 1);
        assert_eq!(patch.get("visibility"), Some("hidden"));
    }
}
