// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Deciding whether a window gets the pointer hidden.
//!
//! Rules are checked in a fixed order: title, class, instance, window id. The
//! first kind with a hit wins. A property is only fetched if there is at least
//! one rule of that kind, so e.g. a window-id-only setup never asks the server
//! about titles.

use anyhow::Result;
use tracing::debug;

use crate::cursor::Decision;
use crate::rules::{RuleKind, RuleSet};
use crate::window::{PropertyReader, WindowId};

/// Checks `window` against `rules`. Returns the kind of rule that matched, or
/// `None` if nothing did.
///
/// Properties are fetched fresh each time; the same window id may well have a
/// different title than it did a moment ago.
pub fn matching_kind(
    window: WindowId,
    rules: &RuleSet,
    reader: &impl PropertyReader,
) -> Result<Option<RuleKind>> {
    if !rules.titles.is_empty() && any_equal(&rules.titles, reader.title_of(window)?) {
        return Ok(Some(RuleKind::Title));
    }
    if !rules.classes.is_empty() && any_equal(&rules.classes, reader.class_of(window)?) {
        return Ok(Some(RuleKind::Class));
    }
    if !rules.instances.is_empty() && any_equal(&rules.instances, reader.instance_of(window)?) {
        return Ok(Some(RuleKind::Instance));
    }
    if rules.window_ids.contains(&window) {
        return Ok(Some(RuleKind::WindowId));
    }
    Ok(None)
}

/// Hide or show for the (possibly absent) active window. No window means the
/// pointer is always shown.
pub fn decide(
    window: Option<WindowId>,
    rules: &RuleSet,
    reader: &impl PropertyReader,
) -> Result<Decision> {
    let Some(window) = window else {
        return Ok(Decision::Show);
    };

    let decision = match matching_kind(window, rules, reader)? {
        Some(kind) => {
            debug!("window {window} matched a {kind:?} rule");
            Decision::Hide
        }
        None => {
            debug!("window {window} matched nothing");
            Decision::Show
        }
    };
    Ok(decision)
}

/// An absent property matches nothing, not even an empty rule.
fn any_equal(values: &[String], property: Option<String>) -> bool {
    match property {
        Some(p) => values.iter().any(|v| *v == p),
        None => false,
    }
}
