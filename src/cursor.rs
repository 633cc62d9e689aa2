// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pointer visibility, tracked on our side.
//!
//! XFixes hide/show calls nest: every hide needs its own show. The server
//! won't tell us whether the pointer is currently hidden, so we keep our own
//! bool and only talk to the server when it actually flips. If we crash while
//! hidden the pointer stays hidden; there's no way to resync.

use anyhow::Result;
use tracing::info;

use crate::window::CursorControl;

/// Whether the pointer should be hidden for the active window.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Hide,
    Show,
}

#[derive(Debug, Default)]
pub struct Cursor {
    hidden: bool,
}

impl Cursor {
    /// Starts out visible, which is what we assume the server has too.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn hide(&mut self, server: &impl CursorControl) -> Result<()> {
        if !self.hidden {
            info!("hiding pointer");
            server.hide_cursor()?;
            self.hidden = true;
        }
        Ok(())
    }

    pub fn show(&mut self, server: &impl CursorControl) -> Result<()> {
        if self.hidden {
            info!("showing pointer");
            server.show_cursor()?;
            self.hidden = false;
        }
        Ok(())
    }

    pub fn apply(&mut self, decision: Decision, server: &impl CursorControl) -> Result<()> {
        match decision {
            Decision::Hide => self.hide(server),
            Decision::Show => self.show(server),
        }
    }
}
