// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A small program for hiding the X11 mouse pointer while particular windows
//! have focus.
//!
//! Watches `_NET_ACTIVE_WINDOW` on the root window and, every time it changes,
//! checks the newly focused window against the rules given on the command
//! line. Uses XCB, and checks property lengths before reading them.

mod agent;
mod cursor;
mod error;
#[cfg(test)]
mod fake;
mod logging;
mod matcher;
mod props;
mod rules;
mod tracker;
mod window;
mod x11;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{ArgAction, ArgGroup, CommandFactory, Parser};
use tracing::{debug, info};

use crate::agent::Agent;
use crate::rules::{parse_window_id, Rule, RuleSet};
use crate::tracker::ActiveWindowTracker;
use crate::window::WindowId;

/// Hide the X11 mouse pointer while certain windows have focus.
///
/// A window matches if any one rule matches it exactly. Rules are checked by
/// title, then class, then instance, then window id.
#[derive(Parser, Debug)]
#[command(
    version,
    group(ArgGroup::new("rules").required(true).multiple(true)),
)]
struct Rxwinbanish {
    /// Hide the pointer over windows with this title (WM_NAME).
    #[clap(short, long, value_name = "TITLE", group = "rules")]
    title: Vec<String>,

    /// Hide the pointer over windows of this class, i.e. the second half of
    /// WM_CLASS, like "Firefox".
    #[clap(short, long, value_name = "CLASS", group = "rules")]
    class: Vec<String>,

    /// Hide the pointer over windows with this instance name, i.e. the first
    /// half of WM_CLASS, like "Navigator".
    #[clap(short, long, value_name = "INSTANCE", group = "rules")]
    instance: Vec<String>,

    /// Hide the pointer over this specific window. Accepts decimal, 0x hex,
    /// or 0-prefixed octal, same as xprop and xwininfo print them.
    #[clap(
        short,
        long,
        value_name = "WINDOW_ID",
        value_parser = parse_window_id,
        group = "rules",
    )]
    window_id: Vec<WindowId>,

    /// X display to connect to, instead of $DISPLAY.
    #[clap(short, long)]
    display: Option<String>,

    /// Log more. Use twice for everything. RUST_LOG overrides this.
    #[clap(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors.
    #[clap(short, long)]
    quiet: bool,
}

impl Rxwinbanish {
    fn rules(&self) -> RuleSet {
        let titles = self.title.iter().cloned().map(Rule::Title);
        let classes = self.class.iter().cloned().map(Rule::Class);
        let instances = self.instance.iter().cloned().map(Rule::Instance);
        let ids = self.window_id.iter().copied().map(Rule::WindowId);
        titles.chain(classes).chain(instances).chain(ids).collect()
    }
}

/// Help and version are successes. Everything else clap complains about,
/// including missing rules, exits 1 rather than clap's usual 2.
fn exit_code(e: &clap::Error) -> i32 {
    if e.use_stderr() {
        1
    } else {
        0
    }
}

/// What to print for a failed parse. clap leaves the usage line off
/// bad-value errors, so a malformed `-w` gets it appended.
fn error_text(e: &clap::Error) -> String {
    let mut text = e.render().to_string();
    if e.kind() == ErrorKind::ValueValidation {
        text.push('\n');
        text.push_str(&Rxwinbanish::command().render_usage().to_string());
        text.push('\n');
    }
    text
}

fn main() -> Result<()> {
    let args = match Rxwinbanish::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = exit_code(&e);
            if e.use_stderr() {
                eprint!("{}", error_text(&e));
            } else {
                // Help and version, with whatever styling clap gives them.
                let _ = e.print();
            }
            std::process::exit(code);
        }
    };

    logging::init(logging::default_level(args.quiet, args.verbose));

    let rules = args.rules();
    info!("loaded {} rules", rules.len());
    debug!("{rules:?}");

    // Any failure from here on, including not reaching the display at all,
    // is fatal and exits 1.
    let session = x11::connect(args.display.as_deref())?;
    let tracker = ActiveWindowTracker::new(session.root, session.active_window_atom);

    let mut agent = Agent::new(session.server, rules, tracker);
    agent.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Rxwinbanish, clap::Error> {
        Rxwinbanish::try_parse_from(std::iter::once("rxwinbanish").chain(args.iter().copied()))
    }

    #[test]
    fn cli_is_well_formed() {
        Rxwinbanish::command().debug_assert();
    }

    #[test]
    fn repeated_flags_build_rules() {
        let args = parse(&[
            "-t", "Mail", "-c", "mpv", "-t", "Editor", "-i", "navigator", "-w", "0x1c00007",
            "--window-id", "12345",
        ])
        .unwrap();
        let rules = args.rules();

        assert_eq!(rules.titles, ["Mail", "Editor"]);
        assert_eq!(rules.classes, ["mpv"]);
        assert_eq!(rules.instances, ["navigator"]);
        assert_eq!(
            rules.window_ids,
            [WindowId::new(0x1c00007).unwrap(), WindowId::new(12345).unwrap()]
        );
        assert_eq!(args.display, None);
    }

    #[test]
    fn no_rules_is_an_error() {
        let e = parse(&[]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(exit_code(&e), 1);

        let e = parse(&["-d", ":1", "-v"]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn other_errors_already_carry_usage() {
        for args in [&[][..], &["-t", "Mail", "-z"][..]] {
            let text = error_text(&parse(args).unwrap_err());
            assert_eq!(text.matches("Usage:").count(), 1, "{text}");
        }
    }

    #[test]
    fn help_exits_zero() {
        let e = parse(&["-h"]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::DisplayHelp);
        assert_eq!(exit_code(&e), 0);
    }

    #[test]
    fn unknown_flag_exits_one() {
        let e = parse(&["-t", "Mail", "-z"]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::UnknownArgument);
        assert_eq!(exit_code(&e), 1);
    }

    #[test]
    fn bad_window_id_is_a_config_error() {
        for bad in ["banana", "0", "0x"] {
            let e = parse(&["-w", bad]).unwrap_err();
            assert_eq!(e.kind(), ErrorKind::ValueValidation, "{bad}");
            assert_eq!(exit_code(&e), 1);
            let text = error_text(&e);
            assert!(text.contains("is not a window id") || text.contains("no window"));
            assert!(text.contains("Usage:"), "{text}");
        }
    }

    #[test]
    fn verbosity_and_display() {
        let args = parse(&["-c", "mpv", "-vv", "--display", ":1"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert_eq!(args.display.as_deref(), Some(":1"));
        assert!(parse(&["-c", "mpv", "-v", "-q"]).is_err());
    }
}
