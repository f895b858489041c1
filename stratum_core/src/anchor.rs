// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchor region identity and geometry access.
//!
//! An *anchor region* is an existing document element whose position and
//! size drive a parallax layer's layout. Anchors are owned externally — by
//! the document — so core holds [`AnchorId`] handles and reads geometry
//! through an [`AnchorProvider`] rather than embedding live references.
//! Anchor geometry is only ever read, never mutated.

use alloc::string::String;
use core::fmt;

/// Identifies an anchor region.
///
/// Backends assign anchor IDs when they enumerate regions; core passes them
/// through without interpreting the value.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AnchorId(pub u32);

impl fmt::Debug for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnchorId({})", self.0)
    }
}

/// The background an anchor declares for its parallax layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum BackgroundSource {
    /// A single image, sized by the layout pass.
    Image(String),
    /// A repeating tile pattern. Tiles have no meaningful intrinsic aspect
    /// ratio and default to 1.0.
    Tile(String),
}

/// Everything a layer needs to know about its anchor at registration time.
///
/// Dynamic geometry (document offset, rendered height) is read through an
/// [`AnchorProvider`] during layout passes instead.
#[derive(Clone, Debug, PartialEq)]
pub struct AnchorSpec {
    /// Handle to the externally owned region.
    pub anchor: AnchorId,
    /// Declared background source.
    pub source: BackgroundSource,
    /// Declared intrinsic background width, in px. Ignored for tiles.
    pub declared_width: f64,
    /// Declared intrinsic background height, in px. Ignored for tiles.
    pub declared_height: f64,
}

impl AnchorSpec {
    /// Returns the width/height ratio used for background sizing.
    ///
    /// Callers must supply well-formed declarations: a zero or negative
    /// `declared_height` propagates as degenerate geometry rather than
    /// being validated here.
    #[must_use]
    pub fn background_ratio(&self) -> f64 {
        match self.source {
            BackgroundSource::Image(_) => self.declared_width / self.declared_height,
            BackgroundSource::Tile(_) => 1.0,
        }
    }
}

/// Read-only access to the current geometry of anchor regions.
///
/// Implemented by platform backends (measuring live document elements) and
/// by test harnesses (scripted values). Both methods return px.
pub trait AnchorProvider {
    /// The anchor's document-relative top position.
    fn offset_top(&self, anchor: AnchorId) -> f64;

    /// The anchor's current rendered (outer) height.
    fn rendered_height(&self, anchor: AnchorId) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn image_ratio_from_declared_dimensions() {
        let spec = AnchorSpec {
            anchor: AnchorId(0),
            source: BackgroundSource::Image("bg.jpg".to_string()),
            declared_width: 1600.0,
            declared_height: 900.0,
        };
        assert_eq!(spec.background_ratio(), 1600.0 / 900.0);
    }

    #[test]
    fn tile_ratio_defaults_to_one() {
        let spec = AnchorSpec {
            anchor: AnchorId(1),
            source: BackgroundSource::Tile("tile.png".to_string()),
            declared_width: 64.0,
            declared_height: 32.0,
        };
        assert_eq!(spec.background_ratio(), 1.0);
    }
}
