// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The real X server, over XCB.

use anyhow::{Context, Result};
use tracing::{debug, info};
use xcb::{x, xfixes, Connection, Extension, Xid, XidNew};

use crate::error::StartupError;
use crate::props;
use crate::window::{
    AtomId, CursorControl, Notification, NotificationSource, PropertyReader, WindowId,
};

const NET_ACTIVE_WINDOW: &str = "_NET_ACTIVE_WINDOW";

pub struct XServer {
    conn: Connection,
    root: x::Window,
}

/// A ready-to-use connection plus the bits of server state we looked up
/// while making it.
pub struct Session {
    pub server: XServer,
    pub root: WindowId,
    pub active_window_atom: AtomId,
}

/// Connects, checks that the server has what we need, and subscribes to
/// property changes on the root window.
pub fn connect(display: Option<&str>) -> Result<Session> {
    let (conn, screen_num) = Connection::connect_with_extensions(
        display,
        // Mandatory extensions
        &[Extension::XFixes],
        // Optional extensions
        &[],
    )
    .with_context(|| match display {
        Some(d) => format!("can't connect to X display {d}"),
        None => "can't connect to X display".to_string(),
    })?;

    // The root window is where both the active-window property and our
    // cursor requests live.
    let root = conn
        .get_setup()
        .roots()
        .nth(screen_num as usize)
        .with_context(|| format!("X server has no screen {screen_num}"))?
        .root();

    // XFixes calls fail without negotiating a version first.
    let xfvresp = conn.wait_for_reply(conn.send_request(&xfixes::QueryVersion {
        client_major_version: 4,
        client_minor_version: 0,
    }))?;
    if xfvresp.major_version() < 4 {
        return Err(StartupError::XFixesTooOld {
            major: xfvresp.major_version(),
            minor: xfvresp.minor_version(),
        }
        .into());
    }

    let atom = conn
        .wait_for_reply(conn.send_request(&x::InternAtom {
            only_if_exists: true,
            name: NET_ACTIVE_WINDOW.as_bytes(),
        }))?
        .atom();
    if atom == x::ATOM_NONE {
        return Err(StartupError::MissingAtom(NET_ACTIVE_WINDOW).into());
    }

    conn.send_and_check_request(&x::ChangeWindowAttributes {
        window: root,
        value_list: &[x::Cw::EventMask(x::EventMask::PROPERTY_CHANGE)],
    })
    .context("can't watch the root window for property changes")?;

    info!(
        "connected to screen {screen_num}, xfixes {}.{}",
        xfvresp.major_version(),
        xfvresp.minor_version(),
    );

    let root_id = WindowId::new(root.resource_id()).context("root window is None?")?;
    Ok(Session {
        server: XServer { conn, root },
        root: root_id,
        active_window_atom: AtomId(atom.resource_id()),
    })
}

impl XServer {
    /// Fetches one property. A protocol error, typically BadWindow because
    /// the window went away after focus moved, reads as no property.
    fn get_property(
        &self,
        window: x::Window,
        property: x::Atom,
        r#type: x::Atom,
        long_length: u32,
    ) -> Result<Option<x::GetPropertyReply>> {
        let cookie = self.conn.send_request(&x::GetProperty {
            delete: false,
            window,
            property,
            r#type,
            long_offset: 0,
            long_length,
        });
        match self.conn.wait_for_reply(cookie) {
            Ok(reply) => Ok(Some(reply)),
            Err(xcb::Error::Protocol(e)) => {
                debug!("property query on {:#x} failed: {e:?}", window.resource_id());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Raw bytes of an 8-bit property, or `None` if it's unset or some other
    /// format.
    fn bytes_of(
        &self,
        window: WindowId,
        property: x::Atom,
        r#type: x::Atom,
    ) -> Result<Option<Vec<u8>>> {
        let reply = self.get_property(xwindow(window), property, r#type, u32::MAX)?;
        Ok(reply
            .filter(|r| r.format() == 8)
            .map(|r| r.value::<u8>().to_vec()))
    }

    fn wm_class(&self, window: WindowId) -> Result<(Option<String>, Option<String>)> {
        let bytes = self.bytes_of(window, x::ATOM_WM_CLASS, x::ATOM_STRING)?;
        Ok(bytes
            .map(|b| props::decode_wm_class(&b))
            .unwrap_or((None, None)))
    }
}

impl PropertyReader for XServer {
    fn title_of(&self, window: WindowId) -> Result<Option<String>> {
        let bytes = self.bytes_of(window, x::ATOM_WM_NAME, x::ATOM_ANY)?;
        Ok(bytes.as_deref().and_then(props::decode_text))
    }

    fn class_of(&self, window: WindowId) -> Result<Option<String>> {
        Ok(self.wm_class(window)?.1)
    }

    fn instance_of(&self, window: WindowId) -> Result<Option<String>> {
        Ok(self.wm_class(window)?.0)
    }

    fn active_window_of(&self, root: WindowId, atom: AtomId) -> Result<Option<WindowId>> {
        let reply = self.get_property(xwindow(root), xatom(atom), x::ATOM_WINDOW, 1)?;
        Ok(reply
            .filter(|r| r.format() == 32)
            .and_then(|r| props::decode_window(r.value::<u32>())))
    }
}

impl CursorControl for XServer {
    fn hide_cursor(&self) -> Result<()> {
        self.conn
            .send_and_check_request(&xfixes::HideCursor { window: self.root })?;
        Ok(())
    }

    fn show_cursor(&self) -> Result<()> {
        self.conn
            .send_and_check_request(&xfixes::ShowCursor { window: self.root })?;
        Ok(())
    }
}

impl NotificationSource for XServer {
    fn next_notification(&self) -> Result<Notification> {
        let n = match self.conn.wait_for_event()? {
            xcb::Event::X(x::Event::PropertyNotify(e)) => {
                match WindowId::new(e.window().resource_id()) {
                    Some(window) => Notification::PropertyChanged {
                        window,
                        atom: AtomId(e.atom().resource_id()),
                    },
                    None => Notification::Other,
                }
            }
            _ => Notification::Other,
        };
        Ok(n)
    }
}

/// A stale id is fine here: the server answers with BadWindow, which
/// `get_property` absorbs.
fn xwindow(w: WindowId) -> x::Window {
    x::Window::new(w.raw())
}

fn xatom(atom: AtomId) -> x::Atom {
    x::Atom::new(atom.0)
}
