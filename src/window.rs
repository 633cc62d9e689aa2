// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Window and atom identifiers, and the traits that stand between the
//! matching logic and the X server.
//!
//! Everything that talks to the server goes through [`PropertyReader`],
//! [`CursorControl`] or [`NotificationSource`]. The real implementation lives
//! in `x11`; the tests use in-memory fakes.

use std::fmt;

use anyhow::Result;

/// A window known to the X server. Never zero: X uses 0 to mean "no window",
/// which we represent as `None` instead.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct WindowId(u32);

impl WindowId {
    /// Wraps a raw resource id, returning `None` for the X `None` value.
    pub fn new(raw: u32) -> Option<Self> {
        if raw == 0 {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// A server-interned property name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AtomId(pub u32);

/// What happened at the server, reduced to what the event loop cares about.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    /// A property named `atom` changed on `window`.
    PropertyChanged { window: WindowId, atom: AtomId },
    /// Anything else. Carries nothing because nothing reads it.
    Other,
}

/// Single-property queries against the server.
///
/// A property that is unset, empty, or not in the shape we expect comes back
/// as `None`. Errors are reserved for the connection itself going away.
pub trait PropertyReader {
    fn title_of(&self, window: WindowId) -> Result<Option<String>>;

    /// Second half of `WM_CLASS`.
    fn class_of(&self, window: WindowId) -> Result<Option<String>>;

    /// First half of `WM_CLASS`.
    fn instance_of(&self, window: WindowId) -> Result<Option<String>>;

    /// Reads a window-typed property (in practice `_NET_ACTIVE_WINDOW`) off
    /// `root`.
    fn active_window_of(&self, root: WindowId, atom: AtomId) -> Result<Option<WindowId>>;
}

/// The server's pointer hide/show requests.
///
/// These stack: two hides need two shows before the pointer comes back. Use
/// [`crate::cursor::Cursor`] rather than calling these directly.
pub trait CursorControl {
    fn hide_cursor(&self) -> Result<()>;
    fn show_cursor(&self) -> Result<()>;
}

/// Blocking source of server events.
pub trait NotificationSource {
    fn next_notification(&self) -> Result<Notification>;
}
