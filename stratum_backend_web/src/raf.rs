// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `requestAnimationFrame` as the frame-scheduling primitive.
//!
//! The browser provides frame pacing but no predicted present time: a
//! scheduled callback simply runs before the next repaint. The primitive
//! is optional by contract — when unavailable, callers invoke the render
//! synchronously instead, and the
//! [`RenderScheduler`](stratum_core::scheduler::RenderScheduler) still
//! guarantees coalescing either way.

use js_sys::Function;
use web_sys::Window;

/// Schedules `callback` before the next repaint.
///
/// Returns the cancellation handle, or `None` when the environment has no
/// frame-scheduling facility (the caller then renders synchronously).
pub(crate) fn schedule_frame(window: &Window, callback: &Function) -> Option<i32> {
    window.request_animation_frame(callback).ok()
}

/// Cancels a previously scheduled callback. Best effort.
pub(crate) fn cancel_frame(window: &Window, handle: i32) {
    let _ = window.cancel_animation_frame(handle);
}
