// Copyright 2026 the oitab developers and collaborators
// Licensed under the MIT License.

/*!
Checking tables against their schemas.

[`verify`] walks a table top to bottom and returns one [`Finding`] per
problem. In [`VerifyMode::Repair`] each fixable problem is fixed as soon as
it is found, so later checks see the repaired table; the one exception is
type conversion, which is batched and applied once at the end. Problems with
the data never produce an `Err`: a fix that turns out to be impossible is
reported as unfixed instead.

*/

use std::collections::BTreeSet;
use std::fmt;

use crate::errors::OiError;
use crate::schema::{ColumnDesc, Dim};
use crate::table::Table;
use crate::value::{cast_value, TypeTag};

/// Prefix that marks a column as not part of the standard.
pub const NON_STANDARD_PREFIX: &str = "NS_";

/// Whether verification may modify the table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VerifyMode {
    ReportOnly,
    Repair,
}

/// What to do about problems that remain after verification.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VerifyPolicy {
    /// Any unfixed problem fails the whole operation.
    Strict,

    /// Unfixed problems are reported and processing continues.
    Lenient,
}

/// Caller-facing verification settings.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VerifyOptions {
    pub mode: VerifyMode,
    pub policy: VerifyPolicy,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        VerifyOptions {
            mode: VerifyMode::Repair,
            policy: VerifyPolicy::Lenient,
        }
    }
}

impl VerifyOptions {
    pub fn report_only(mut self) -> Self {
        self.mode = VerifyMode::ReportOnly;
        self
    }

    pub fn repair(mut self) -> Self {
        self.mode = VerifyMode::Repair;
        self
    }

    pub fn strict(mut self) -> Self {
        self.policy = VerifyPolicy::Strict;
        self
    }

    pub fn lenient(mut self) -> Self {
        self.policy = VerifyPolicy::Lenient;
        self
    }
}

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Severity {
    /// Something that can be repaired automatically.
    Warning,

    /// Something that cannot.
    Error,
}

/// One schema-compliance problem.
#[derive(Clone, Debug, PartialEq)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
    pub fixable: bool,

    /// Set once a repair has actually been applied.
    pub fixed: bool,
}

impl Finding {
    pub fn fixable<S: Into<String>>(message: S) -> Self {
        Finding {
            severity: Severity::Warning,
            message: message.into(),
            fixable: true,
            fixed: false,
        }
    }

    pub fn unfixable<S: Into<String>>(message: S) -> Self {
        Finding {
            severity: Severity::Error,
            message: message.into(),
            fixable: false,
            fixed: false,
        }
    }

    /// Record that a repair was attempted and failed.
    fn downgrade(&mut self, reason: &OiError) {
        self.severity = Severity::Error;
        self.fixable = false;
        self.message = format!("{} (repair failed: {})", self.message, reason);
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.message)?;

        if self.fixed {
            f.write_str(" [fixed]")
        } else if self.fixable {
            f.write_str(" [fixable]")
        } else {
            f.write_str(" [unfixable]")
        }
    }
}

/// The number of findings that still need attention.
pub fn unfixed(findings: &[Finding]) -> usize {
    findings.iter().filter(|f| !f.fixed).count()
}

/// Whether a column name follows the non-standard naming convention: a
/// namespace tag followed by an underscore.
pub fn follows_naming_convention(name: &str) -> bool {
    name.find('_').map_or(false, |i| i > 0)
}

/// Check `table` against its schema.
///
/// `n_channels` resolves channel-shaped columns; with `None` their channel
/// axis may have any size.
pub fn verify(table: &mut Table, mode: VerifyMode, n_channels: Option<usize>) -> Vec<Finding> {
    let mut v = Verifier {
        table,
        repair: mode == VerifyMode::Repair,
        n_channels,
        findings: Vec::new(),
        casts: Vec::new(),
    };

    v.check_aliases();
    v.check_cards();
    v.check_required();
    v.check_identifiers();
    v.check_types();
    v.check_units();
    v.check_shapes();
    v.check_values();
    v.check_naming();
    v.apply_casts();
    v.findings
}

/// Check a table without modifying it.
pub fn report(table: &Table, n_channels: Option<usize>) -> Vec<Finding> {
    let mut scratch = table.clone();
    verify(&mut scratch, VerifyMode::ReportOnly, n_channels)
}

struct Verifier<'a> {
    table: &'a mut Table,
    repair: bool,
    n_channels: Option<usize>,
    findings: Vec<Finding>,
    casts: Vec<(usize, &'static str, TypeTag)>,
}

impl<'a> Verifier<'a> {
    fn push(&mut self, finding: Finding) -> usize {
        self.findings.push(finding);
        self.findings.len() - 1
    }

    fn unfixable(&mut self, message: String) {
        self.push(Finding::unfixable(message));
    }

    /// Report a fixable problem and, when repairing, fix it right away.
    fn fix<F>(&mut self, message: String, apply: F)
    where
        F: FnOnce(&mut Table) -> Result<(), OiError>,
    {
        let i = self.push(Finding::fixable(message));

        if self.repair {
            match apply(&mut *self.table) {
                Ok(()) => self.findings[i].fixed = true,
                Err(e) => self.findings[i].downgrade(&e),
            }
        }
    }

    fn declared_present(&self) -> Vec<&'static ColumnDesc> {
        self.table
            .schema()
            .columns()
            .filter(|d| self.table.has_column(d.name))
            .collect()
    }

    fn check_aliases(&mut self) {
        for &(old, new) in self.table.schema().aliases() {
            if self.table.has_column(old) && !self.table.has_column(new) {
                self.fix(format!("Column {old} is a deprecated name for {new}"), |t| {
                    t.rename_columns(&[(old, new)])
                });
            }
        }
    }

    fn check_cards(&mut self) {
        let extname = self.table.extname();
        let current = self.table.header().get_str("EXTNAME").map(|s| s.trim_end());

        if current != Some(extname) {
            self.fix(format!("Card EXTNAME should be {extname}"), |t| {
                t.header_mut().set("EXTNAME", extname);
                Ok(())
            });
        }

        for card in self.table.schema().cards() {
            let message = match self.table.header().get(card.name) {
                None if card.required => format!("Missing required card {}", card.name),
                None => continue,
                Some(v) => {
                    let valid = cast_value(v, card.type_).is_ok()
                        && card.validator.map_or(true, |test| test(v));

                    if valid {
                        continue;
                    }

                    format!("Invalid value for card {}: {}", card.name, v)
                }
            };

            match card.default_value() {
                Some(d) => self.fix(message, |t| {
                    t.header_mut().set_with_comment(card.name, d, card.comment);
                    Ok(())
                }),
                None => self.unfixable(message),
            }
        }
    }

    fn check_required(&mut self) {
        for name in self.table.schema().required_columns() {
            if !self.table.has_column(name) {
                self.unfixable(format!("Missing required column {name}"));
            }
        }
    }

    fn check_identifiers(&mut self) {
        let Some(id) = self.table.kind().identifier() else {
            return;
        };

        // a column of the wrong type is reported by the type check
        let Ok(values) = self.table.int_values(id) else {
            return;
        };

        if let Some(bad) = values.iter().find(|&&v| v < 1) {
            self.unfixable(format!("Column {id} holds invalid identifier {bad}"));
        }

        let mut seen = BTreeSet::new();
        let mut repeated = BTreeSet::new();

        for &v in values.iter() {
            if !seen.insert(v) {
                repeated.insert(v);
            }
        }

        if !repeated.is_empty() {
            let list: Vec<String> = repeated.iter().map(|v| v.to_string()).collect();
            self.unfixable(format!(
                "Column {id} holds duplicate identifiers: {}",
                list.join(", ")
            ));
        }
    }

    fn check_types(&mut self) {
        for desc in self.declared_present() {
            let Some(column) = self.table.get_column(desc.name) else {
                continue;
            };

            let found = column.data.type_tag();

            if found == desc.type_ {
                continue;
            }

            let message = format!(
                "Column {} has type {}, expected {}",
                desc.name, found, desc.type_
            );

            match column.data.cast(desc.type_) {
                Ok(_) => {
                    let i = self.push(Finding::fixable(message));

                    if self.repair {
                        self.casts.push((i, desc.name, desc.type_));
                    }
                }
                Err(e) => self.unfixable(format!("{message} ({e})")),
            }
        }
    }

    fn check_units(&mut self) {
        for desc in self.declared_present() {
            let Some(column) = self.table.get_column(desc.name) else {
                continue;
            };

            if desc.unit.accepts(column.unit()) {
                continue;
            }

            let message = format!(
                "Column {} has unit {}, expected {}",
                desc.name,
                column.unit().unwrap_or("None"),
                desc.unit
            );

            self.fix(message, |t| {
                t.column_mut(desc.name)?.unit = desc.unit.declared().map(|u| u.to_owned());
                Ok(())
            });
        }
    }

    fn check_shapes(&mut self) {
        for desc in self.declared_present() {
            let Some(column) = self.table.get_column(desc.name) else {
                continue;
            };

            let expected = desc.resolve_shape(self.n_channels);
            let found = column.data.cell_shape();

            let ok = expected.len() == found.len()
                && expected
                    .iter()
                    .zip(found)
                    .all(|(e, f)| e.map_or(true, |e| e == *f));

            if !ok {
                let message = format!(
                    "Column {} has cell shape {:?}, expected {}",
                    desc.name,
                    found,
                    describe_shape(desc.shape, self.n_channels)
                );
                self.unfixable(message);
            }
        }
    }

    fn check_values(&mut self) {
        let identifier = self.table.kind().identifier();

        for desc in self.declared_present() {
            let Some(test) = desc.validator else {
                continue;
            };

            // identifiers were already checked and have no default
            if Some(desc.name) == identifier {
                continue;
            }

            let Some(column) = self.table.get_column(desc.name) else {
                continue;
            };

            let values = column.data.to_values();
            let invalid = values.map(|v| !test(v));
            let count = invalid.iter().filter(|&&b| b).count();

            if count == 0 {
                continue;
            }

            let first = values
                .iter()
                .zip(invalid.iter())
                .find(|(_, &b)| b)
                .map(|(v, _)| v.to_string())
                .unwrap_or_default();

            let message = format!(
                "Column {} holds {} invalid value(s), first is {:?}",
                desc.name, count, first
            );

            let default = desc
                .default_value()
                .filter(|d| cast_value(d, desc.type_).is_ok());

            let Some(d) = default else {
                self.unfixable(message);
                continue;
            };

            // the default may only fit once the column has its declared type
            if let Some(k) = self.casts.iter().position(|&(_, n, _)| n == desc.name) {
                let (i, name, tag) = self.casts.remove(k);
                self.apply_cast(i, name, tag);
            }

            self.fix(message, |t| {
                t.column_mut(desc.name)?
                    .data
                    .set_where(&invalid, &d)
                    .map_err(|e| OiError::cast(desc.name, e))
            });
        }
    }

    fn check_naming(&mut self) {
        let names: Vec<String> = self.table.column_names().iter().map(|s| s.to_string()).collect();

        for name in names {
            if self.table.schema().is_declared(&name) || follows_naming_convention(&name) {
                continue;
            }

            let renamed = format!("{NON_STANDARD_PREFIX}{name}");

            if self.table.has_column(&renamed) {
                self.unfixable(format!(
                    "Non-standard column {name} cannot be renamed to {renamed}, which exists"
                ));
                continue;
            }

            let message = format!("Non-standard column {name} should be named {renamed}");
            self.fix(message, |t| t.rename_columns(&[(name.as_str(), renamed.as_str())]));
        }
    }

    fn apply_cast(&mut self, i: usize, name: &'static str, tag: TypeTag) {
        let result = self.table.column_mut(name).and_then(|c| {
            c.data = c.data.cast(tag).map_err(|e| OiError::cast(name, e))?;
            Ok(())
        });

        match result {
            Ok(()) => self.findings[i].fixed = true,
            Err(e) => self.findings[i].downgrade(&e),
        }
    }

    fn apply_casts(&mut self) {
        for (i, name, tag) in std::mem::take(&mut self.casts) {
            self.apply_cast(i, name, tag);
        }
    }
}

fn describe_shape(shape: &[Dim], n_channels: Option<usize>) -> String {
    let dims: Vec<String> = shape
        .iter()
        .map(|d| match (*d, n_channels) {
            (Dim::Fixed(n), _) => n.to_string(),
            (Dim::Channels, Some(n)) => n.to_string(),
            (Dim::Channels, None) => "NWAVE".to_owned(),
        })
        .collect();

    format!("[{}]", dims.join(", "))
}
