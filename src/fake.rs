// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! An X server that lives in a few hash maps, for tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use anyhow::{bail, Result};

use crate::window::{
    AtomId, CursorControl, Notification, NotificationSource, PropertyReader, WindowId,
};

pub const ROOT: u32 = 0x100;
pub const NET_ACTIVE_WINDOW: AtomId = AtomId(301);
pub const WM_NAME: AtomId = AtomId(39);

/// Counts hide/show requests and tracks the server's nesting depth.
#[derive(Default)]
pub struct CountingCursor {
    pub hides: Cell<usize>,
    pub shows: Cell<usize>,
    pub fail: Cell<bool>,
}

impl CountingCursor {
    /// How many shows the server still wants before the pointer is back.
    pub fn depth(&self) -> isize {
        self.hides.get() as isize - self.shows.get() as isize
    }
}

impl CursorControl for CountingCursor {
    fn hide_cursor(&self) -> Result<()> {
        if self.fail.get() {
            bail!("connection lost");
        }
        self.hides.set(self.hides.get() + 1);
        Ok(())
    }

    fn show_cursor(&self) -> Result<()> {
        if self.fail.get() {
            bail!("connection lost");
        }
        self.shows.set(self.shows.get() + 1);
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Query {
    Title,
    Class,
    Instance,
    Active,
}

#[derive(Clone, Debug, Default)]
pub struct FakeWindow {
    pub title: Option<String>,
    pub instance: Option<String>,
    pub class: Option<String>,
}

#[derive(Default)]
pub struct FakeServer {
    pub active: Cell<Option<WindowId>>,
    pub windows: RefCell<HashMap<WindowId, FakeWindow>>,
    pub queries: RefCell<Vec<Query>>,
    pub cursor: CountingCursor,
    pub events: RefCell<VecDeque<Notification>>,
}

pub fn id(raw: u32) -> WindowId {
    WindowId::new(raw).unwrap()
}

pub fn root() -> WindowId {
    id(ROOT)
}

impl FakeServer {
    pub fn add_window(&self, raw: u32, window: FakeWindow) {
        self.windows.borrow_mut().insert(id(raw), window);
    }

    pub fn titled(&self, raw: u32, title: &str) {
        self.add_window(
            raw,
            FakeWindow {
                title: Some(title.into()),
                ..Default::default()
            },
        );
    }

    /// Makes `raw` the active window (0 for none) and queues the notification
    /// a window manager would send.
    pub fn focus(&self, raw: u32) {
        self.active.set(WindowId::new(raw));
        self.push(Notification::PropertyChanged {
            window: root(),
            atom: NET_ACTIVE_WINDOW,
        });
    }

    pub fn push(&self, n: Notification) {
        self.events.borrow_mut().push_back(n);
    }

    pub fn queries(&self) -> Vec<Query> {
        self.queries.borrow().clone()
    }

    pub fn clear_queries(&self) {
        self.queries.borrow_mut().clear();
    }

    fn record(&self, q: Query) {
        self.queries.borrow_mut().push(q);
    }

    fn window(&self, w: WindowId) -> FakeWindow {
        self.windows.borrow().get(&w).cloned().unwrap_or_default()
    }
}

impl PropertyReader for FakeServer {
    fn title_of(&self, window: WindowId) -> Result<Option<String>> {
        self.record(Query::Title);
        Ok(self.window(window).title)
    }

    fn class_of(&self, window: WindowId) -> Result<Option<String>> {
        self.record(Query::Class);
        Ok(self.window(window).class)
    }

    fn instance_of(&self, window: WindowId) -> Result<Option<String>> {
        self.record(Query::Instance);
        Ok(self.window(window).instance)
    }

    fn active_window_of(&self, root: WindowId, atom: AtomId) -> Result<Option<WindowId>> {
        self.record(Query::Active);
        if root.raw() != ROOT || atom != NET_ACTIVE_WINDOW {
            return Ok(None);
        }
        Ok(self.active.get())
    }
}

impl CursorControl for FakeServer {
    fn hide_cursor(&self) -> Result<()> {
        self.cursor.hide_cursor()
    }

    fn show_cursor(&self) -> Result<()> {
        self.cursor.show_cursor()
    }
}

impl NotificationSource for FakeServer {
    fn next_notification(&self) -> Result<Notification> {
        match self.events.borrow_mut().pop_front() {
            Some(n) => Ok(n),
            None => bail!("connection closed"),
        }
    }
}
