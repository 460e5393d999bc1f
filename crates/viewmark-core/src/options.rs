//! Tracker options: the `:set` layer.
//!
//! Parses `:set`-style directives and applies them to [`Options`]. The exempt
//! document kinds are not an option; hosts decide those through
//! [`Host::is_excluded`](crate::host::Host::is_excluded).
//!
//! # Supported syntax
//!
//! | Syntax             | Effect                        |
//! |--------------------|-------------------------------|
//! | `option`           | Enable                        |
//! | `nooption`         | Disable                       |
//! | `option!`          | Toggle                        |
//! | `option?`          | Query current value           |
//! | `option=v`         | Assign (`true/false/on/off/1/0`) |
//! | *(empty)*          | Show changed options          |
//! | `all`              | Show all options              |
//!
//! # Option names
//!
//! | Full name      | Abbrev | Default | Effect                                      |
//! |----------------|--------|---------|---------------------------------------------|
//! | `prunewindows` | `pw`   | true    | GC also drops markers of closed viewports   |
//! | `trackedits`   | `te`   | true    | Markers follow edits reported by the host   |

use crate::error::OptionError;

// ---------------------------------------------------------------------------
// Directives
// ---------------------------------------------------------------------------

/// A parsed `:set` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetDirective {
    /// `option`: enable.
    On(String),

    /// `nooption`: disable.
    Off(String),

    /// `option!`: toggle.
    Toggle(String),

    /// `option?`: query the current value.
    Query(String),

    /// `option=value`: assign a value.
    Assign(String, String),

    /// No arguments: show options that differ from their defaults.
    ShowChanged,

    /// `all`: show every option.
    ShowAll,
}

/// Parse the full `:set` argument string into directives.
///
/// Arguments are whitespace-separated. An empty string produces
/// [`SetDirective::ShowChanged`].
#[must_use]
pub fn parse_set(args: &str) -> Vec<SetDirective> {
    let trimmed = args.trim();
    if trimmed.is_empty() {
        return vec![SetDirective::ShowChanged];
    }
    trimmed.split_whitespace().map(parse_set_arg).collect()
}

/// Parse a single `:set` argument.
#[must_use]
pub fn parse_set_arg(arg: &str) -> SetDirective {
    if arg == "all" {
        return SetDirective::ShowAll;
    }

    if let Some((name, value)) = arg.split_once('=') {
        return SetDirective::Assign(name.to_string(), value.to_string());
    }

    if let Some(name) = arg.strip_suffix('?') {
        return SetDirective::Query(name.to_string());
    }

    if let Some(name) = arg.strip_suffix('!') {
        return SetDirective::Toggle(name.to_string());
    }

    // Only strip "no" when the rest is a real option name.
    if let Some(name) = arg.strip_prefix("no") {
        if OptionName::lookup(name).is_some() {
            return SetDirective::Off(name.to_string());
        }
    }

    SetDirective::On(arg.to_string())
}

// ---------------------------------------------------------------------------
// Option names
// ---------------------------------------------------------------------------

/// A known option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionName {
    PruneWindows,
    TrackEdits,
}

impl OptionName {
    /// Every option, in display order.
    pub const ALL: [Self; 2] = [Self::PruneWindows, Self::TrackEdits];

    /// Resolve a full name or abbreviation.
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        match name {
            "prunewindows" | "pw" => Some(Self::PruneWindows),
            "trackedits" | "te" => Some(Self::TrackEdits),
            _ => None,
        }
    }

    /// The full option name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PruneWindows => "prunewindows",
            Self::TrackEdits => "trackedits",
        }
    }
}

/// Parse an assigned boolean value.
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "on" | "1" | "yes" => Some(true),
        "false" | "off" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Format a boolean option for display: `"name"` or `"noname"`.
#[must_use]
pub fn format_bool(name: &str, value: bool) -> String {
    if value {
        name.to_string()
    } else {
        format!("no{name}")
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Tracker behavior switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Drop markers of viewports that are no longer live during GC.
    pub prune_windows: bool,

    /// Shift stored markers when the host reports an edit.
    pub track_edits: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            prune_windows: true,
            track_edits: true,
        }
    }
}

impl Options {
    /// Current value of an option.
    #[must_use]
    pub const fn get(&self, name: OptionName) -> bool {
        match name {
            OptionName::PruneWindows => self.prune_windows,
            OptionName::TrackEdits => self.track_edits,
        }
    }

    /// Set an option.
    pub const fn set(&mut self, name: OptionName, value: bool) {
        match name {
            OptionName::PruneWindows => self.prune_windows = value,
            OptionName::TrackEdits => self.track_edits = value,
        }
    }

    /// Apply one directive. Returns a line of output for queries and
    /// listings, `None` for silent changes.
    ///
    /// # Errors
    ///
    /// Returns [`OptionError`] for unknown names or unparsable values.
    pub fn apply(&mut self, directive: &SetDirective) -> Result<Option<String>, OptionError> {
        let resolve = |name: &str| {
            OptionName::lookup(name).ok_or_else(|| OptionError::Unknown(name.to_string()))
        };

        match directive {
            SetDirective::On(name) => {
                self.set(resolve(name)?, true);
                Ok(None)
            }
            SetDirective::Off(name) => {
                self.set(resolve(name)?, false);
                Ok(None)
            }
            SetDirective::Toggle(name) => {
                let opt = resolve(name)?;
                self.set(opt, !self.get(opt));
                Ok(None)
            }
            SetDirective::Query(name) => {
                let opt = resolve(name)?;
                Ok(Some(format_bool(opt.as_str(), self.get(opt))))
            }
            SetDirective::Assign(name, value) => {
                let opt = resolve(name)?;
                let parsed = parse_bool(value).ok_or_else(|| OptionError::InvalidValue {
                    option: name.clone(),
                    value: value.clone(),
                })?;
                self.set(opt, parsed);
                Ok(None)
            }
            SetDirective::ShowChanged => Ok(Some(self.describe(true))),
            SetDirective::ShowAll => Ok(Some(self.describe(false))),
        }
    }

    /// Parse and apply a whole `:set` argument string.
    ///
    /// Directives are applied left to right; the first error stops the run
    /// with earlier directives already applied.
    ///
    /// # Errors
    ///
    /// Returns the first [`OptionError`] encountered.
    pub fn apply_str(&mut self, args: &str) -> Result<Vec<String>, OptionError> {
        let mut output = Vec::new();
        for directive in parse_set(args) {
            if let Some(line) = self.apply(&directive)? {
                output.push(line);
            }
        }
        Ok(output)
    }

    /// Space-separated option listing, optionally only non-default values.
    #[must_use]
    pub fn describe(&self, only_changed: bool) -> String {
        let defaults = Self::default();
        OptionName::ALL
            .iter()
            .filter(|&&opt| !only_changed || self.get(opt) != defaults.get(opt))
            .map(|&opt| format_bool(opt.as_str(), self.get(opt)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ── parse_set_arg ────────────────────────────────────────────────────

    #[test]
    fn parse_on_off() {
        assert_eq!(parse_set_arg("pw"), SetDirective::On("pw".into()));
        assert_eq!(
            parse_set_arg("notrackedits"),
            SetDirective::Off("trackedits".into())
        );
        assert_eq!(parse_set_arg("note"), SetDirective::Off("te".into()));
    }

    #[test]
    fn parse_toggle_query_assign() {
        assert_eq!(parse_set_arg("te!"), SetDirective::Toggle("te".into()));
        assert_eq!(parse_set_arg("pw?"), SetDirective::Query("pw".into()));
        assert_eq!(
            parse_set_arg("pw=off"),
            SetDirective::Assign("pw".into(), "off".into())
        );
    }

    #[test]
    fn parse_no_prefix_needs_known_name() {
        assert_eq!(parse_set_arg("nothing"), SetDirective::On("nothing".into()));
    }

    #[test]
    fn parse_empty_and_all() {
        assert_eq!(parse_set(""), vec![SetDirective::ShowChanged]);
        assert_eq!(parse_set(" all "), vec![SetDirective::ShowAll]);
    }

    // ── apply ────────────────────────────────────────────────────────────

    #[test]
    fn defaults_are_on() {
        let o = Options::default();
        assert!(o.prune_windows);
        assert!(o.track_edits);
        assert_eq!(o.describe(true), "");
        assert_eq!(o.describe(false), "prunewindows trackedits");
    }

    #[test]
    fn apply_changes_values() {
        let mut o = Options::default();
        assert_eq!(o.apply_str("nopw te!").unwrap(), Vec::<String>::new());
        assert!(!o.prune_windows);
        assert!(!o.track_edits);
        assert_eq!(o.apply_str("").unwrap(), vec!["noprunewindows notrackedits"]);
        o.apply_str("pw=yes trackedits").unwrap();
        assert_eq!(o, Options::default());
    }

    #[test]
    fn query_reports_value() {
        let mut o = Options::default();
        o.prune_windows = false;
        assert_eq!(o.apply_str("pw?").unwrap(), vec!["noprunewindows"]);
    }

    #[test]
    fn unknown_option_is_an_error() {
        let mut o = Options::default();
        assert_eq!(
            o.apply_str("wrapscan"),
            Err(OptionError::Unknown("wrapscan".into()))
        );
    }

    #[test]
    fn bad_value_is_an_error() {
        let mut o = Options::default();
        assert_eq!(
            o.apply_str("te=maybe"),
            Err(OptionError::InvalidValue {
                option: "te".into(),
                value: "maybe".into()
            })
        );
        assert!(o.track_edits);
    }

    #[test]
    fn errors_stop_after_earlier_directives() {
        let mut o = Options::default();
        assert!(o.apply_str("nopw bogus note").is_err());
        assert!(!o.prune_windows);
        assert!(o.track_edits);
    }
}
