// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// The host X environment can't support us. Detected once, at startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("{0} atom not found; is an EWMH window manager running?")]
    MissingAtom(&'static str),

    #[error("XFixes version 4.0 or greater required, you have {major}.{minor}")]
    XFixesTooOld { major: u32, minor: u32 },
}
