//! Script runner: execute a script against a session and collect output.

use tracing::debug;

use crate::command::{ScriptCommand, parse_line};
use crate::error::{ScriptError, SessionError};
use crate::session::Session;

/// Run every line of `script` against `session`.
///
/// Returns the report lines produced by `print`, `marks` and `set` queries.
/// Execution stops at the first failing line.
///
/// # Errors
///
/// Returns a [`ScriptError`] carrying the 1-indexed line number.
pub fn run(session: &mut Session, script: &str) -> Result<Vec<String>, ScriptError> {
    let mut output = Vec::new();
    for (idx, raw) in script.lines().enumerate() {
        let line = idx + 1;
        let command = parse_line(raw).map_err(|message| ScriptError::Parse { line, message })?;
        let Some(command) = command else {
            continue;
        };
        debug!(line, ?command, "script: execute");
        output.extend(execute(session, command, line)?);
    }
    Ok(output)
}

/// Execute one parsed command. `line` is only used for error reporting.
///
/// # Errors
///
/// Returns a [`ScriptError`] if the session rejects the command or an
/// `expect` does not hold.
pub fn execute(
    session: &mut Session,
    command: ScriptCommand,
    line: usize,
) -> Result<Vec<String>, ScriptError> {
    let fail = |source: SessionError| ScriptError::Session { line, source };
    let lines = |text: String| text.lines().map(str::to_string).collect::<Vec<_>>();

    match command {
        ScriptCommand::Open { name, text } => {
            session.open(&name, &text).map_err(fail)?;
        }
        ScriptCommand::Listing { name, text } => {
            session.open_listing(&name, &text).map_err(fail)?;
        }
        ScriptCommand::Show { name, viewport } => {
            let document = session.find(&name).map_err(fail)?;
            let viewport = viewport.unwrap_or_else(|| session.focused());
            session.show(viewport, document).map_err(fail)?;
        }
        ScriptCommand::Split(orientation) => {
            session.split(orientation);
        }
        ScriptCommand::Close(viewport) => {
            let viewport = viewport.unwrap_or_else(|| session.focused());
            session.close(viewport).map_err(fail)?;
        }
        ScriptCommand::Only => {
            session.only();
        }
        ScriptCommand::Focus(viewport) => session.focus(viewport).map_err(fail)?,
        ScriptCommand::Frame => {
            session.new_frame();
        }
        ScriptCommand::Goto { offset, viewport } => {
            let viewport = viewport.unwrap_or_else(|| session.focused());
            session.goto(viewport, offset).map_err(fail)?;
        }
        ScriptCommand::Type(text) => session.type_text(&text).map_err(fail)?,
        ScriptCommand::Insert { name, at, text } => {
            let document = session.find(&name).map_err(fail)?;
            session.insert(document, at, &text).map_err(fail)?;
        }
        ScriptCommand::Delete { name, start, end } => {
            let document = session.find(&name).map_err(fail)?;
            session.delete(document, start, end).map_err(fail)?;
        }
        ScriptCommand::Regen { name, text } => {
            let document = session.find(&name).map_err(fail)?;
            session.regenerate(document, &text).map_err(fail)?;
        }
        ScriptCommand::Kill(name) => {
            let document = session.find(&name).map_err(fail)?;
            session.kill(document).map_err(fail)?;
        }
        ScriptCommand::Refresh => {
            session.refresh();
        }
        ScriptCommand::Set(args) => return session.set_options(&args).map_err(fail),
        ScriptCommand::Enable => {
            session.enable();
        }
        ScriptCommand::Disable => {
            session.disable();
        }
        ScriptCommand::Print => return Ok(lines(session.describe())),
        ScriptCommand::Marks => return Ok(lines(session.describe_marks())),
        ScriptCommand::Expect { viewport, offset } => {
            let found = session.cursor(viewport).map_err(fail)?;
            if found != offset {
                return Err(ScriptError::Expectation {
                    line,
                    viewport,
                    expected: offset,
                    found,
                });
            }
        }
    }

    Ok(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use viewmark_core::ViewportId;

    #[test]
    fn runs_and_collects_reports() {
        let mut session = Session::default();
        let output = run(
            &mut session,
            "# two viewports on one document\n\
             open notes abc\\ndef\n\
             goto 5\n\
             split\n\
             set pw?\n\
             print\n",
        )
        .unwrap();
        assert_eq!(
            output,
            vec![
                "prunewindows",
                "frame 0",
                "  vp1* notes 2:2 @5",
                "  vp2  notes 2:2 @5",
            ]
        );
    }

    #[test]
    fn errors_carry_line_numbers() {
        let mut session = Session::default();
        let err = run(&mut session, "open a\n\nbogus\n").unwrap_err();
        assert_eq!(
            err,
            ScriptError::Parse {
                line: 3,
                message: "unknown command 'bogus'".into()
            }
        );

        let err = run(&mut session, "show missing").unwrap_err();
        assert_eq!(err.line(), 1);
        assert!(matches!(
            err,
            ScriptError::Session {
                source: SessionError::NoSuchName(_),
                ..
            }
        ));
    }

    #[test]
    fn failed_expectation() {
        let mut session = Session::default();
        let err = run(&mut session, "open a hello\ngoto 2\nexpect vp1 3\n").unwrap_err();
        assert_eq!(
            err,
            ScriptError::Expectation {
                line: 3,
                viewport: ViewportId(1),
                expected: 3,
                found: 2
            }
        );
    }
}
