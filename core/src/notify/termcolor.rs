// Copyright 2026 the oitab developers and collaborators
// Licensed under the MIT License.

/*!
Colorized terminal output for notifications.

Notes are written to one stream and problems to another. With the default
constructors those are standard output and standard error, so a verification
report can be piped separately from the program's own output.

*/

use anyhow::Error;
use std::fmt::Arguments;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use super::{ChatterLevel, NotificationBackend, NotificationKind};

fn style(color: Color, underline: bool) -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(color)).set_bold(true).set_underline(underline);
    spec
}

fn style_for(kind: NotificationKind) -> ColorSpec {
    match kind {
        NotificationKind::Note => style(Color::Green, false),
        NotificationKind::Warning => style(Color::Yellow, false),
        NotificationKind::Severe => style(Color::Red, false),
        NotificationKind::Fatal => style(Color::Red, true),
    }
}

/// Writes notifications with a colored label, such as `warning: ...`.
///
/// Write failures are ignored: there is nowhere left to report them.
pub struct TermcolorNotificationBackend<W = StandardStream> {
    chatter: ChatterLevel,
    notes: W,
    problems: W,
}

impl TermcolorNotificationBackend<StandardStream> {
    /// Write to the standard streams, using color if they look like a terminal.
    pub fn new(chatter: ChatterLevel) -> Self {
        Self::with_color_choice(chatter, ColorChoice::Auto)
    }

    pub fn with_color_choice(chatter: ChatterLevel, choice: ColorChoice) -> Self {
        Self::from_writers(
            chatter,
            StandardStream::stdout(choice),
            StandardStream::stderr(choice),
        )
    }
}

impl<W: WriteColor> TermcolorNotificationBackend<W> {
    /// Send notes to `notes` and everything else to `problems`.
    pub fn from_writers(chatter: ChatterLevel, notes: W, problems: W) -> Self {
        TermcolorNotificationBackend {
            chatter,
            notes,
            problems,
        }
    }

    /// Give back the two writers, notes first.
    pub fn into_writers(self) -> (W, W) {
        (self.notes, self.problems)
    }

    fn shows(&self, kind: NotificationKind) -> bool {
        kind.is_problem() || self.chatter > ChatterLevel::Minimal
    }

    fn line(&mut self, kind: NotificationKind, label: &str, args: Arguments) -> io::Result<()> {
        let out = if kind.is_problem() {
            &mut self.problems
        } else {
            &mut self.notes
        };

        out.set_color(&style_for(kind))?;
        write!(out, "{label}:")?;
        out.reset()?;
        writeln!(out, " {args}")
    }

    fn emit(&mut self, kind: NotificationKind, label: &str, args: Arguments, cause: Option<Error>) {
        if !self.shows(kind) {
            return;
        }

        let _ = self.line(kind, label, args);

        if let Some(cause) = cause {
            for source in cause.chain() {
                let _ = self.line(kind, "caused by", format_args!("{source}"));
            }
        }
    }

    /// Report an error that ended the program, with its chain of causes.
    pub fn bare_error<E: Into<Error>>(&mut self, err: E) {
        let err = err.into();
        let mut chain = err.chain();

        if let Some(top) = chain.next() {
            let _ = self.line(NotificationKind::Severe, "error", format_args!("{top}"));
        }

        for source in chain {
            let _ = self.line(NotificationKind::Severe, "caused by", format_args!("{source}"));
        }
    }
}

impl<W: WriteColor> NotificationBackend for TermcolorNotificationBackend<W> {
    fn notify(&mut self, kind: NotificationKind, args: Arguments, cause: Option<Error>) {
        self.emit(kind, kind.label(), args, cause)
    }
}
