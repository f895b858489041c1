// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style-capability probing against a live document.
//!
//! [`DomStyleProbe`] implements
//! [`StyleProbe`](stratum_core::capability::StyleProbe) two ways:
//!
//! - **Property recognition** — A dummy element's `style` object is probed
//!   for the bare property key and for each camel-cased vendor-prefixed
//!   variant (`WebkitPerspective`, `MozPerspective`, ...). Environments
//!   report an empty string for a supported-but-unset property and
//!   `undefined` for an unsupported one, so key *existence* is the signal.
//! - **Empirical 3D check** — A throwaway element styled only under a
//!   3D-transform media feature is appended to the body; if the
//!   environment honors 3D transforms the rule applies and the element
//!   realizes the rule's `left: 9px; height: 5px`.

use alloc::format;
use alloc::string::String;

use js_sys::Reflect;
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{Document, HtmlElement};

use stratum_core::capability::{ProbeGeometry, StyleProbe};

/// Camel-cased vendor prefixes used when probing style object keys.
const PROBE_PREFIXES: [&str; 4] = ["Webkit", "Moz", "ms", "O"];

/// The rule the empirical probe element realizes only when the 3D-transform
/// media feature matches.
const PROBE_3D_MARKUP: &str = "<style type=\"text/css\">\
    @media (transform-3d),(-webkit-transform-3d) {\
    #stratum-3dtest {position: absolute;left: 9px;height: 5px;\
    margin: 0;padding: 0;border: 0;}}\
    </style><div id=\"stratum-3dtest\"></div>";

/// Probes style capabilities against a document.
pub struct DomStyleProbe {
    document: Document,
}

impl core::fmt::Debug for DomStyleProbe {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomStyleProbe").finish_non_exhaustive()
    }
}

impl DomStyleProbe {
    /// Creates a probe for the given document.
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Returns a dummy element whose `style` object keys are probed.
    fn dummy_element(&self) -> Option<HtmlElement> {
        self.document
            .create_element("stratum")
            .ok()?
            .dyn_into::<HtmlElement>()
            .ok()
    }

    fn style_has_key(element: &HtmlElement, key: &str) -> bool {
        let style: JsValue = element.style().into();
        // A supported property exists on the style object (possibly as an
        // empty string); an unsupported one is absent entirely.
        Reflect::has(&style, &JsValue::from_str(key)).unwrap_or(false)
    }
}

impl StyleProbe for DomStyleProbe {
    fn supports_style(&self, property: &str) -> bool {
        let Some(element) = self.dummy_element() else {
            return false;
        };
        if Self::style_has_key(&element, property) {
            return true;
        }
        // Camel-case the property for the prefixed variants.
        let mut chars = property.chars();
        let camel: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => return false,
        };
        PROBE_PREFIXES
            .iter()
            .any(|prefix| Self::style_has_key(&element, &format!("{prefix}{camel}")))
    }

    fn probe_3d(&self) -> ProbeGeometry {
        let fallback = ProbeGeometry {
            left: 0.0,
            height: 0.0,
        };
        let Some(body) = self.document.body() else {
            return fallback;
        };
        let Ok(wrapper) = self.document.create_element("div") else {
            return fallback;
        };
        wrapper.set_inner_html(PROBE_3D_MARKUP);
        if body.append_child(&wrapper).is_err() {
            return fallback;
        }

        let realized = self
            .document
            .get_element_by_id("stratum-3dtest")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .map_or(fallback, |el| ProbeGeometry {
                left: f64::from(el.offset_left()),
                height: f64::from(el.offset_height()),
            });

        wrapper.remove();
        realized
    }
}
