// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The event loop and the state it drives.

use anyhow::{Context, Result};
use tracing::{debug, trace};

use crate::cursor::{Cursor, Decision};
use crate::matcher;
use crate::rules::RuleSet;
use crate::tracker::ActiveWindowTracker;
use crate::window::{CursorControl, Notification, NotificationSource, PropertyReader};

/// Everything the program knows, in one place. Owned by the event loop.
pub struct Agent<S> {
    server: S,
    rules: RuleSet,
    tracker: ActiveWindowTracker,
    cursor: Cursor,
}

impl<S> Agent<S>
where
    S: PropertyReader + CursorControl + NotificationSource,
{
    pub fn new(server: S, rules: RuleSet, tracker: ActiveWindowTracker) -> Self {
        Self {
            server,
            rules,
            tracker,
            cursor: Cursor::new(),
        }
    }

    #[cfg(test)]
    pub fn cursor_hidden(&self) -> bool {
        self.cursor.is_hidden()
    }

    /// Looks at whatever is focused right now. Needed once before the loop,
    /// since a matching window may already have focus when we start.
    pub fn start(&mut self) -> Result<Decision> {
        self.evaluate()
    }

    /// Handles one notification. Returns what we decided, if the notification
    /// was one we care about.
    pub fn handle(&mut self, notification: Notification) -> Result<Option<Decision>> {
        match notification {
            Notification::PropertyChanged { window, atom }
                if atom == self.tracker.atom() && window == self.tracker.root() =>
            {
                self.evaluate().map(Some)
            }
            other => {
                trace!("ignoring {other:?}");
                Ok(None)
            }
        }
    }

    /// Runs until the connection fails. Every relevant notification gets its
    /// own refresh; bursts are not coalesced.
    pub fn run(&mut self) -> Result<()> {
        self.start()?;
        loop {
            let notification = self
                .server
                .next_notification()
                .context("error in X event loop")?;
            self.handle(notification)?;
        }
    }

    fn evaluate(&mut self) -> Result<Decision> {
        let window = self.tracker.refresh(&self.server)?;
        let decision = matcher::decide(window, &self.rules, &self.server)?;
        self.cursor.apply(decision, &self.server)?;
        debug!(
            "decided {decision:?}, pointer hidden: {}",
            self.cursor.is_hidden()
        );
        Ok(decision)
    }
}
