// Copyright 2026 the oitab developers and collaborators
// Licensed under the MIT License.

/*!
Reporting findings to whoever is driving the library.

Verification and merging never print. They hand each message to a
[`NotificationBackend`], and the caller decides whether it gets collected
([`BufferingNotificationBackend`]), thrown away
([`NoopNotificationBackend`]), or written to a terminal
([`termcolor::TermcolorNotificationBackend`]).

Messages are sent with the [`oi_note!`](crate::oi_note),
[`oi_warning!`](crate::oi_warning), [`oi_severe!`](crate::oi_severe) and
[`oi_fatal!`](crate::oi_fatal) macros. Each takes the backend, a format
string with its arguments, and optionally `; cause` where `cause` is anything
convertible into an [`anyhow::Error`]. The backend trait must be in scope:

```rust
use oitab_core::notify::{BufferingNotificationBackend, NotificationBackend};
use oitab_core::{oi_note, oi_severe};

let mut nb = BufferingNotificationBackend::new();
oi_note!(nb, "merged {} tables", 2);
oi_severe!(nb, "cannot cast column {}", "VIS2DATA"; anyhow::anyhow!("overflow"));
assert_eq!(nb.len(), 2);
```
*/

pub mod termcolor;

use anyhow::Error;
use std::fmt::{self, Arguments};

/// How much a terminal-facing backend should print.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChatterLevel {
    /// Problems only; notes are suppressed.
    Minimal,

    /// Everything, including notes about repairs and renumbering.
    #[default]
    Normal,
}

/// How serious a message is. Variants are ordered from least to most severe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NotificationKind {
    /// Something happened that the user may want to know about.
    Note,

    /// Something looks wrong but the operation went ahead.
    Warning,

    /// Something is wrong and was left as is.
    Severe,

    /// The operation gave up.
    Fatal,
}

impl NotificationKind {
    /// The word used to label this kind of message.
    pub fn label(self) -> &'static str {
        match self {
            NotificationKind::Note => "note",
            NotificationKind::Warning => "warning",
            NotificationKind::Severe => "severe",
            NotificationKind::Fatal => "fatal",
        }
    }

    /// Whether the message describes a problem rather than plain progress.
    pub fn is_problem(self) -> bool {
        self > NotificationKind::Note
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Something that accepts user-facing messages.
pub trait NotificationBackend {
    /// Accept one message. A `cause`, if given, should be reported along
    /// with the message, including its chain of sources.
    fn notify(&mut self, kind: NotificationKind, args: Arguments, cause: Option<Error>);
}

impl<B: NotificationBackend + ?Sized> NotificationBackend for &mut B {
    fn notify(&mut self, kind: NotificationKind, args: Arguments, cause: Option<Error>) {
        (**self).notify(kind, args, cause)
    }
}

impl<B: NotificationBackend + ?Sized> NotificationBackend for Box<B> {
    fn notify(&mut self, kind: NotificationKind, args: Arguments, cause: Option<Error>) {
        (**self).notify(kind, args, cause)
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __oi_notify {
    ($kind:ident, $dest:expr, $fmt:literal $(, $arg:expr)* ; $cause:expr) => {
        $dest.notify(
            $crate::notify::NotificationKind::$kind,
            format_args!($fmt $(, $arg)*),
            Some($cause.into()),
        )
    };
    ($kind:ident, $dest:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $dest.notify(
            $crate::notify::NotificationKind::$kind,
            format_args!($fmt $(, $arg)*),
            None,
        )
    };
}

/// Send a [`Note`](crate::notify::NotificationKind::Note) to a backend.
#[macro_export]
macro_rules! oi_note {
    ($($body:tt)+) => { $crate::__oi_notify!(Note, $($body)+) };
}

/// Send a [`Warning`](crate::notify::NotificationKind::Warning) to a backend.
#[macro_export]
macro_rules! oi_warning {
    ($($body:tt)+) => { $crate::__oi_notify!(Warning, $($body)+) };
}

/// Send a [`Severe`](crate::notify::NotificationKind::Severe) message to a backend.
#[macro_export]
macro_rules! oi_severe {
    ($($body:tt)+) => { $crate::__oi_notify!(Severe, $($body)+) };
}

/// Send a [`Fatal`](crate::notify::NotificationKind::Fatal) message to a backend.
#[macro_export]
macro_rules! oi_fatal {
    ($($body:tt)+) => { $crate::__oi_notify!(Fatal, $($body)+) };
}

/// Discards every message.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopNotificationBackend;

impl NoopNotificationBackend {
    pub fn new() -> Self {
        NoopNotificationBackend
    }
}

impl NotificationBackend for NoopNotificationBackend {
    fn notify(&mut self, _kind: NotificationKind, _args: Arguments, _cause: Option<Error>) {}
}

/// A message captured by [`BufferingNotificationBackend`].
#[derive(Debug)]
pub struct Notification {
    pub kind: NotificationKind,
    pub text: String,
    pub cause: Option<Error>,
}

/// Keeps messages in memory so they can be inspected or forwarded later.
#[derive(Debug, Default)]
pub struct BufferingNotificationBackend {
    held: Vec<Notification>,
}

impl BufferingNotificationBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.held.len()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// The captured messages, oldest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.held
    }

    /// Kind and text of each captured message, oldest first.
    pub fn messages(&self) -> impl Iterator<Item = (NotificationKind, &str)> {
        self.held.iter().map(|n| (n.kind, n.text.as_str()))
    }

    /// How many captured messages have the given kind.
    pub fn count(&self, kind: NotificationKind) -> usize {
        self.held.iter().filter(|n| n.kind == kind).count()
    }

    /// The most severe kind captured so far, if anything was captured.
    pub fn worst(&self) -> Option<NotificationKind> {
        self.held.iter().map(|n| n.kind).max()
    }

    /// Forward everything captured, in order, to another backend.
    pub fn drain<B: NotificationBackend + ?Sized>(self, other: &mut B) {
        for n in self.held {
            other.notify(n.kind, format_args!("{}", n.text), n.cause);
        }
    }
}

impl NotificationBackend for BufferingNotificationBackend {
    fn notify(&mut self, kind: NotificationKind, args: Arguments, cause: Option<Error>) {
        self.held.push(Notification {
            kind,
            text: args.to_string(),
            cause,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CoreError;

    #[test]
    fn buffer_keeps_order_and_causes() {
        let mut nb = BufferingNotificationBackend::new();
        oi_note!(nb, "merged {} tables", 3);
        oi_warning!(nb, "unit of {} fixed", "RAEP0",);
        oi_severe!(nb, "could not cast"; CoreError::UnfixedFindings(2));

        assert_eq!(nb.len(), 3);
        assert_eq!(nb.count(NotificationKind::Warning), 1);
        assert_eq!(nb.worst(), Some(NotificationKind::Severe));

        let texts: Vec<_> = nb.messages().map(|(_, t)| t).collect();
        assert_eq!(texts, ["merged 3 tables", "unit of RAEP0 fixed", "could not cast"]);

        let cause = nb.notifications()[2].cause.as_ref().unwrap();
        assert!(cause.to_string().contains('2'));
    }

    #[test]
    fn drain_through_a_reference() {
        let mut first = BufferingNotificationBackend::new();
        oi_fatal!(first, "giving up");
        oi_note!(first, "done");

        let mut second = BufferingNotificationBackend::new();
        {
            let mut by_ref = &mut second;
            first.drain(&mut by_ref);
        }
        assert_eq!(second.len(), 2);
        assert_eq!(second.count(NotificationKind::Fatal), 1);
    }

    #[test]
    fn kinds_are_ordered_by_severity() {
        assert!(NotificationKind::Note < NotificationKind::Warning);
        assert!(NotificationKind::Severe < NotificationKind::Fatal);
        assert!(!NotificationKind::Note.is_problem());
        assert!(NotificationKind::Warning.is_problem());
        assert_eq!(NotificationKind::Severe.to_string(), "severe");
        assert!(ChatterLevel::Minimal < ChatterLevel::default());
    }

    #[test]
    fn boxed_backends_forward() {
        let mut nb: Box<dyn NotificationBackend> = Box::new(NoopNotificationBackend::new());
        oi_note!(nb, "nothing to see");
        assert!(BufferingNotificationBackend::new().worst().is_none());
    }
}
