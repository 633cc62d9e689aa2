// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The user's match rules, bucketed by what they match against.

use crate::window::WindowId;

/// Which window attribute a rule compares against.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RuleKind {
    Title,
    Class,
    Instance,
    WindowId,
}

/// One match condition from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rule {
    Title(String),
    Class(String),
    Instance(String),
    WindowId(WindowId),
}

/// All rules, split by kind, each bucket in the order given.
///
/// Built once at startup and never touched again. No dedup or case folding:
/// matching is exact.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleSet {
    pub titles: Vec<String>,
    pub classes: Vec<String>,
    pub instances: Vec<String>,
    pub window_ids: Vec<WindowId>,
}

impl RuleSet {
    pub fn len(&self) -> usize {
        self.titles.len() + self.classes.len() + self.instances.len() + self.window_ids.len()
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        let mut set = RuleSet::default();
        for rule in iter {
            match rule {
                Rule::Title(t) => set.titles.push(t),
                Rule::Class(c) => set.classes.push(c),
                Rule::Instance(i) => set.instances.push(i),
                Rule::WindowId(w) => set.window_ids.push(w),
            }
        }
        set
    }
}

/// Parses a window id the way `strtoul(s, NULL, 0)` would: `0x` for hex,
/// leading `0` for octal, otherwise decimal. Unlike strtoul, trailing junk is
/// an error, and so is 0, since that's X's "no window".
pub fn parse_window_id(s: &str) -> Result<WindowId, String> {
    let (digits, radix) = if let Some(hex) =
        s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))
    {
        (hex, 16)
    } else if s.len() > 1 && s.starts_with('0') {
        (&s[1..], 8)
    } else {
        (s, 10)
    };

    // from_str_radix tolerates a leading '+', strtoul-style, but we don't
    // want "0x+1" to sneak through.
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(format!("`{s}` is not a window id"));
    }

    let raw = u32::from_str_radix(digits, radix)
        .map_err(|e| format!("`{s}` is not a window id: {e}"))?;
    WindowId::new(raw).ok_or_else(|| "window id 0 means no window".to_string())
}
