// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transform capability detection and tier selection.
//!
//! Environments differ in which rendering primitive is usable for moving a
//! layer: hardware-accelerated 3D transforms, 2D transforms, or plain
//! positional offsets. [`CapabilityProfile::detect`] determines this once,
//! at engine construction, from an externally supplied [`StyleProbe`];
//! the profile is immutable afterwards and shared by every layer.
//!
//! Absence of transform support is not an error. The positional fallback is
//! a fully defined tier, just the slowest one.

/// Realized geometry of the empirical 3D probe element.
///
/// Backends construct a hidden element styled only under a 3D-transform
/// media feature and report where the environment actually placed it. If
/// the media feature did not match, the rule never applied and the element
/// keeps its default geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProbeGeometry {
    /// Realized left offset of the probe element, in px.
    pub left: f64,
    /// Realized height of the probe element, in px.
    pub height: f64,
}

/// Left offset the probe rule assigns; see [`ProbeGeometry`].
pub const PROBE_LEFT_PX: f64 = 9.0;

/// Height the probe rule assigns; see [`ProbeGeometry`].
pub const PROBE_HEIGHT_PX: f64 = 5.0;

/// Style-capability queries supplied by a platform backend.
///
/// Both methods are synchronous, one-shot, and infallible: a property that
/// is not recognized is an answer, not a failure.
pub trait StyleProbe {
    /// Returns whether the environment recognizes the given style property,
    /// with or without vendor prefixing (prefix resolution is the probe's
    /// concern, not the caller's).
    fn supports_style(&self, property: &str) -> bool;

    /// Builds the throwaway element gated behind a 3D-transform media
    /// feature and returns its realized geometry.
    ///
    /// Only called when the `perspective` property probed positive, to
    /// reject environments that recognize the property without actually
    /// honoring 3D transforms.
    fn probe_3d(&self) -> ProbeGeometry;
}

/// The rendering primitive chosen for a whole profile lifetime.
///
/// Selected once per [`CapabilityProfile`], never per layer: every layer in
/// a given frame is styled through the same tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransformTier {
    /// `translate3d(...)` — hardware-accelerated path.
    Translate3d,
    /// `translate(...)` — 2D transform path.
    Translate2d,
    /// Absolute `top`/`left` offsets.
    Positional,
}

/// Which rendering primitives the environment supports.
///
/// Computed once at construction via [`detect`](Self::detect), immutable
/// thereafter. Tier precedence is strict: 3D > 2D > positional.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CapabilityProfile {
    /// 3D transforms are recognized and empirically honored.
    pub supports_3d: bool,
    /// 2D transforms are recognized.
    pub supports_2d: bool,
}

impl CapabilityProfile {
    /// Detects the profile through the given probe.
    ///
    /// `supports_2d` comes from probing the `transform` property.
    /// `supports_3d` comes from probing `perspective`, confirmed by the
    /// empirical element check — some environments recognize the property
    /// but cannot actually perform 3D transforms.
    #[must_use]
    pub fn detect<P: StyleProbe>(probe: &P) -> Self {
        let mut supports_3d = probe.supports_style("perspective");
        if supports_3d {
            let realized = probe.probe_3d();
            supports_3d = realized.height == PROBE_HEIGHT_PX && realized.left == PROBE_LEFT_PX;
        }
        let supports_2d = probe.supports_style("transform");
        Self {
            supports_3d,
            supports_2d,
        }
    }

    /// Returns the tier this profile selects.
    #[must_use]
    pub const fn tier(&self) -> TransformTier {
        if self.supports_3d {
            TransformTier::Translate3d
        } else if self.supports_2d {
            TransformTier::Translate2d
        } else {
            TransformTier::Positional
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeProbe {
        perspective: bool,
        transform: bool,
        realized: ProbeGeometry,
    }

    impl StyleProbe for FakeProbe {
        fn supports_style(&self, property: &str) -> bool {
            match property {
                "perspective" => self.perspective,
                "transform" => self.transform,
                _ => false,
            }
        }

        fn probe_3d(&self) -> ProbeGeometry {
            self.realized
        }
    }

    const HONORED: ProbeGeometry = ProbeGeometry {
        left: PROBE_LEFT_PX,
        height: PROBE_HEIGHT_PX,
    };

    #[test]
    fn full_support_selects_3d() {
        let profile = CapabilityProfile::detect(&FakeProbe {
            perspective: true,
            transform: true,
            realized: HONORED,
        });
        assert!(profile.supports_3d);
        assert!(profile.supports_2d);
        assert_eq!(profile.tier(), TransformTier::Translate3d);
    }

    #[test]
    fn empirical_check_rejects_false_positive() {
        // `perspective` probes positive but the media feature never matched,
        // so the element kept its default geometry.
        let profile = CapabilityProfile::detect(&FakeProbe {
            perspective: true,
            transform: true,
            realized: ProbeGeometry {
                left: 0.0,
                height: 0.0,
            },
        });
        assert!(!profile.supports_3d);
        assert_eq!(profile.tier(), TransformTier::Translate2d);
    }

    #[test]
    fn transform_only_selects_2d() {
        let profile = CapabilityProfile::detect(&FakeProbe {
            perspective: false,
            transform: true,
            realized: HONORED,
        });
        assert_eq!(profile.tier(), TransformTier::Translate2d);
    }

    #[test]
    fn no_support_falls_back_to_positional() {
        let profile = CapabilityProfile::detect(&FakeProbe {
            perspective: false,
            transform: false,
            realized: HONORED,
        });
        assert!(!profile.supports_3d);
        assert!(!profile.supports_2d);
        assert_eq!(profile.tier(), TransformTier::Positional);
    }

    #[test]
    fn tier_selection_is_total() {
        // Every support combination maps to exactly one tier.
        for (s3, s2) in [(true, true), (true, false), (false, true), (false, false)] {
            let profile = CapabilityProfile {
                supports_3d: s3,
                supports_2d: s2,
            };
            let tier = profile.tier();
            let expected = if s3 {
                TransformTier::Translate3d
            } else if s2 {
                TransformTier::Translate2d
            } else {
                TransformTier::Positional
            };
            assert_eq!(tier, expected);
        }
    }
}
