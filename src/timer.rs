//! Non-blocking waits between retry attempts.

use std::time::Duration;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
pub(crate) async fn sleep(delay: Duration) {
    if delay.is_zero() {
        return;
    }
    tokio::time::sleep(delay).await;
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = setTimeout)]
    fn set_timeout(handler: &js_sys::Function, millis: i32) -> JsValue;
}

/// Resolves a promise from the global `setTimeout`, so it works in windows,
/// workers and edge runtimes alike.
///
/// Browsers store the delay as a signed 32-bit value; longer waits are
/// clamped to `i32::MAX` milliseconds (about 24.8 days).
#[cfg(target_arch = "wasm32")]
pub(crate) async fn sleep(delay: Duration) {
    if delay.is_zero() {
        return;
    }
    let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        set_timeout(&resolve, millis);
    });
    // The promise only ever resolves.
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}
