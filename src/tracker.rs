// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use anyhow::Result;
use tracing::debug;

use crate::window::{AtomId, PropertyReader, WindowId};

/// Knows which window the window manager says is active.
///
/// The window manager publishes this as `_NET_ACTIVE_WINDOW` on the root.
/// Each refresh replaces the previous answer outright.
#[derive(Debug)]
pub struct ActiveWindowTracker {
    root: WindowId,
    atom: AtomId,
    current: Option<WindowId>,
}

impl ActiveWindowTracker {
    pub fn new(root: WindowId, atom: AtomId) -> Self {
        Self {
            root,
            atom,
            current: None,
        }
    }

    /// The property whose changes mean the active window moved.
    pub fn atom(&self) -> AtomId {
        self.atom
    }

    pub fn root(&self) -> WindowId {
        self.root
    }

    /// Result of the last refresh.
    #[cfg(test)]
    pub fn current(&self) -> Option<WindowId> {
        self.current
    }

    pub fn refresh(&mut self, reader: &impl PropertyReader) -> Result<Option<WindowId>> {
        self.current = reader.active_window_of(self.root, self.atom)?;
        match self.current {
            Some(w) => debug!("active window is {w}"),
            None => debug!("no active window"),
        }
        Ok(self.current)
    }
}
