// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoding of raw property payloads.
//!
//! These take whatever bytes the server handed back and never index past
//! them. Anything empty or odd-looking decodes to `None`.

use crate::window::WindowId;

/// Decodes a text property.
///
/// Stops at the first NUL. ICCCM says `STRING` is Latin-1, but plenty of
/// clients shove UTF-8 into `WM_NAME` anyway, so valid UTF-8 is taken as-is
/// and anything else is read as Latin-1.
pub fn decode_text(bytes: &[u8]) -> Option<String> {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    let bytes = &bytes[..end];
    if bytes.is_empty() {
        return None;
    }
    match std::str::from_utf8(bytes) {
        Ok(s) => Some(s.to_owned()),
        Err(_) => Some(bytes.iter().map(|&b| char::from(b)).collect()),
    }
}

/// Splits a `WM_CLASS` payload into `(instance, class)`.
///
/// The payload is two NUL-terminated strings, instance first. Either half may
/// be missing in practice.
pub fn decode_wm_class(bytes: &[u8]) -> (Option<String>, Option<String>) {
    let mut parts = bytes.split(|&b| b == 0);
    let instance = parts.next().and_then(decode_text);
    let class = parts.next().and_then(decode_text);
    (instance, class)
}

/// Decodes a window-typed property that should hold exactly one value.
pub fn decode_window(values: &[u32]) -> Option<WindowId> {
    values.first().copied().and_then(WindowId::new)
}
