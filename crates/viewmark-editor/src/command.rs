//! Script commands: one line of a session script.
//!
//! Scripts drive a [`Session`](crate::session::Session) without a terminal.
//! Each non-blank line is one command; `#` starts a comment line.
//!
//! # Supported commands
//!
//! | Command                  | Action                                         |
//! |--------------------------|------------------------------------------------|
//! | `open NAME [TEXT]`       | Create a text document, show it in focus       |
//! | `listing NAME [TEXT]`    | Create a listing document, show it in focus    |
//! | `show NAME [VP]`         | Show a document in a viewport                  |
//! | `split [h\|v]`           | Split the focused viewport (default `h`)       |
//! | `close [VP]`             | Close a viewport                               |
//! | `only`                   | Close all other viewports in the frame         |
//! | `focus VP`               | Focus a viewport (and its frame)               |
//! | `frame`                  | Open a new frame                               |
//! | `goto OFF [VP]`          | Move a cursor to a char offset                 |
//! | `type TEXT`              | Insert at the focused cursor                   |
//! | `insert NAME AT TEXT`    | Insert into a document                         |
//! | `delete NAME START END`  | Delete a char range                            |
//! | `regen NAME [TEXT]`      | Replace a document's whole content             |
//! | `kill NAME`              | Close a document                               |
//! | `refresh`                | Fire a configuration event with no change      |
//! | `set ARGS`               | `:set`-style tracker options                   |
//! | `enable` / `disable`     | Toggle position memory                         |
//! | `print`                  | Report viewports and cursors                   |
//! | `marks`                  | Report remembered positions                    |
//! | `expect VP OFF`          | Fail unless the viewport's cursor is at `OFF`  |
//!
//! `VP` is written `vp3` or `3`. In `TEXT`, `\n`, `\t` and `\\` are escapes;
//! any other `\X` is kept as is.

use viewmark_core::ViewportId;

use crate::layout::Orientation;

// ---------------------------------------------------------------------------
// ScriptCommand
// ---------------------------------------------------------------------------

/// A parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Open { name: String, text: String },
    Listing { name: String, text: String },
    Show { name: String, viewport: Option<ViewportId> },
    Split(Orientation),
    Close(Option<ViewportId>),
    Only,
    Focus(ViewportId),
    Frame,
    Goto { offset: usize, viewport: Option<ViewportId> },
    Type(String),
    Insert { name: String, at: usize, text: String },
    Delete { name: String, start: usize, end: usize },
    Regen { name: String, text: String },
    Kill(String),
    Refresh,
    Set(String),
    Enable,
    Disable,
    Print,
    Marks,
    Expect { viewport: ViewportId, offset: usize },
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse one script line.
///
/// Returns `Ok(None)` for blank and comment lines.
///
/// # Errors
///
/// Returns a message describing what is wrong with the line.
pub fn parse_line(input: &str) -> Result<Option<ScriptCommand>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (cmd, rest) = split_word(trimmed);

    let command = match cmd {
        "open" | "listing" => {
            let (name, text) = split_word(rest);
            let name = required(name, "document name")?.to_string();
            let text = unescape(text);
            if cmd == "open" {
                ScriptCommand::Open { name, text }
            } else {
                ScriptCommand::Listing { name, text }
            }
        }
        "show" => {
            let (name, rest) = split_word(rest);
            let name = required(name, "document name")?.to_string();
            let viewport = optional_viewport(rest)?;
            ScriptCommand::Show { name, viewport }
        }
        "split" => match rest {
            "" | "h" => ScriptCommand::Split(Orientation::Horizontal),
            "v" => ScriptCommand::Split(Orientation::Vertical),
            other => return Err(format!("bad split direction '{other}' (use h or v)")),
        },
        "close" => ScriptCommand::Close(optional_viewport(rest)?),
        "only" => no_args(rest, ScriptCommand::Only)?,
        "focus" => ScriptCommand::Focus(parse_viewport(required(rest, "viewport")?)?),
        "frame" => no_args(rest, ScriptCommand::Frame)?,
        "goto" => {
            let (offset, rest) = split_word(rest);
            let offset = parse_offset(required(offset, "offset")?)?;
            let viewport = optional_viewport(rest)?;
            ScriptCommand::Goto { offset, viewport }
        }
        "type" => ScriptCommand::Type(unescape(required(rest, "text")?)),
        "insert" => {
            let (name, rest) = split_word(rest);
            let (at, text) = split_word(rest);
            ScriptCommand::Insert {
                name: required(name, "document name")?.to_string(),
                at: parse_offset(required(at, "offset")?)?,
                text: unescape(required(text, "text")?),
            }
        }
        "delete" => {
            let (name, rest) = split_word(rest);
            let (start, rest) = split_word(rest);
            let (end, rest) = split_word(rest);
            let command = ScriptCommand::Delete {
                name: required(name, "document name")?.to_string(),
                start: parse_offset(required(start, "start offset")?)?,
                end: parse_offset(required(end, "end offset")?)?,
            };
            no_args(rest, command)?
        }
        "regen" => {
            let (name, text) = split_word(rest);
            ScriptCommand::Regen {
                name: required(name, "document name")?.to_string(),
                text: unescape(text),
            }
        }
        "kill" => ScriptCommand::Kill(required(rest, "document name")?.to_string()),
        "refresh" => no_args(rest, ScriptCommand::Refresh)?,
        "set" => ScriptCommand::Set(rest.to_string()),
        "enable" => no_args(rest, ScriptCommand::Enable)?,
        "disable" => no_args(rest, ScriptCommand::Disable)?,
        "print" => no_args(rest, ScriptCommand::Print)?,
        "marks" => no_args(rest, ScriptCommand::Marks)?,
        "expect" => {
            let (viewport, rest) = split_word(rest);
            let (offset, rest) = split_word(rest);
            let command = ScriptCommand::Expect {
                viewport: parse_viewport(required(viewport, "viewport")?)?,
                offset: parse_offset(required(offset, "offset")?)?,
            };
            no_args(rest, command)?
        }
        other => return Err(format!("unknown command '{other}'")),
    };

    Ok(Some(command))
}

/// Split off the first whitespace-delimited word.
fn split_word(s: &str) -> (&str, &str) {
    s.find(char::is_whitespace)
        .map_or((s, ""), |pos| (&s[..pos], s[pos..].trim_start()))
}

fn required<'a>(value: &'a str, what: &str) -> Result<&'a str, String> {
    if value.is_empty() {
        Err(format!("missing {what}"))
    } else {
        Ok(value)
    }
}

fn reject_extra(rest: &str) -> Result<(), String> {
    if rest.is_empty() {
        Ok(())
    } else {
        Err(format!("unexpected argument '{rest}'"))
    }
}

fn no_args(rest: &str, command: ScriptCommand) -> Result<ScriptCommand, String> {
    reject_extra(rest).map(|()| command)
}

/// Parse `vp3` or `3`.
fn parse_viewport(s: &str) -> Result<ViewportId, String> {
    let digits = s.strip_prefix("vp").unwrap_or(s);
    digits
        .parse()
        .map(ViewportId)
        .map_err(|_| format!("bad viewport '{s}'"))
}

fn optional_viewport(rest: &str) -> Result<Option<ViewportId>, String> {
    let (word, rest) = split_word(rest);
    if word.is_empty() {
        return Ok(None);
    }
    let viewport = parse_viewport(word)?;
    reject_extra(rest)?;
    Ok(Some(viewport))
}

fn parse_offset(s: &str) -> Result<usize, String> {
    s.parse().map_err(|_| format!("bad offset '{s}'"))
}

/// Expand `\n`, `\t` and `\\`. Other escapes pass through unchanged.
fn unescape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            let replacement = match chars.peek() {
                Some('n') => Some('\n'),
                Some('t') => Some('\t'),
                Some('\\') => Some('\\'),
                _ => None,
            };
            if let Some(r) = replacement {
                result.push(r);
                chars.next();
                continue;
            }
        }
        result.push(ch);
    }
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
