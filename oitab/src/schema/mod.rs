// Copyright 2026 the oitab developers and collaborators
// Licensed under the MIT License.

/*!
The schema registry.

A [`Schema`] describes one table kind at one revision of the OIFITS
standard: its columns and header cards, each with a declared type, shape,
unit, validity test and default. Schemas are plain `'static` data, looked up
by extension name and revision with [`lookup`]. A revision that builds on an
earlier one shares the earlier one's column and card groups instead of
inheriting from it.

*/

use std::fmt;

use crate::errors::{OiError, Result};
use crate::value::{Literal, TypeTag, Value};

pub mod defs;

/// A test that a single value must pass to be valid.
pub type Validator = fn(&Value) -> bool;

/// One dimension of a declared cell shape.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Dim {
    /// A fixed size.
    Fixed(usize),

    /// The number of spectral channels of the table's instrument setup,
    /// known only once the table is placed in a dataset.
    Channels,
}

/// Shorthand for the spectral-channel shape token.
pub const NW: Dim = Dim::Channels;

/// What unit a column must declare.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UnitSpec {
    /// No unit (or an empty one).
    Unitless,

    /// Exactly this unit.
    Exactly(&'static str),

    /// Any unit at all; the column is not checked.
    Any,
}

impl UnitSpec {
    pub fn accepts(&self, actual: Option<&str>) -> bool {
        match *self {
            UnitSpec::Unitless => actual.is_none(),
            UnitSpec::Exactly(u) => actual == Some(u),
            UnitSpec::Any => true,
        }
    }

    /// The unit to write into a column's metadata, if it is pinned down.
    pub fn declared(&self) -> Option<&'static str> {
        match *self {
            UnitSpec::Exactly(u) => Some(u),
            _ => None,
        }
    }
}

impl fmt::Display for UnitSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            UnitSpec::Unitless => f.write_str("None"),
            UnitSpec::Exactly(u) => f.write_str(u),
            UnitSpec::Any => f.write_str("any"),
        }
    }
}

/// The contract for one column.
#[derive(Clone, Copy, Debug)]
pub struct ColumnDesc {
    pub name: &'static str,
    pub required: bool,
    pub type_: TypeTag,
    pub shape: &'static [Dim],
    pub validator: Option<Validator>,
    pub default: Option<Literal>,
    pub unit: UnitSpec,
    pub comment: &'static str,
}

impl ColumnDesc {
    /// Positional constructor, so the schema tables read like tables.
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        name: &'static str,
        required: bool,
        type_: TypeTag,
        shape: &'static [Dim],
        validator: Option<Validator>,
        default: Option<Literal>,
        unit: UnitSpec,
        comment: &'static str,
    ) -> Self {
        ColumnDesc {
            name,
            required,
            type_,
            shape,
            validator,
            default,
            unit,
            comment,
        }
    }

    pub fn default_value(&self) -> Option<Value> {
        self.default.map(|d| d.to_value())
    }

    pub fn has_shape_token(&self, token: Dim) -> bool {
        self.shape.contains(&token)
    }

    /// Resolve the declared cell shape. A `Channels` dimension resolves to
    /// `n_channels`; `None` in the output means "any size".
    pub fn resolve_shape(&self, n_channels: Option<usize>) -> Vec<Option<usize>> {
        self.shape
            .iter()
            .map(|d| match *d {
                Dim::Fixed(n) => Some(n),
                Dim::Channels => n_channels,
            })
            .collect()
    }
}

/// The contract for one header card.
#[derive(Clone, Copy, Debug)]
pub struct CardDesc {
    pub name: &'static str,
    pub required: bool,
    pub type_: TypeTag,
    pub validator: Option<Validator>,
    pub default: Option<Literal>,
    pub comment: &'static str,
}

impl CardDesc {
    pub const fn new(
        name: &'static str,
        required: bool,
        type_: TypeTag,
        validator: Option<Validator>,
        default: Option<Literal>,
        comment: &'static str,
    ) -> Self {
        CardDesc {
            name,
            required,
            type_,
            validator,
            default,
            comment,
        }
    }

    pub fn default_value(&self) -> Option<Value> {
        self.default.map(|d| d.to_value())
    }
}

/// The version of the OIFITS standard a table revision belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum FormatVersion {
    V1,
    V2,
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FormatVersion::V1 => f.write_str("v1"),
            FormatVersion::V2 => f.write_str("v2"),
        }
    }
}

/// Cards through which a table names the array, instrument or correlation
/// setup it belongs to.
pub const LINKAGE_CARDS: [&str; 3] = ["ARRNAME", "INSNAME", "CORRNAME"];

/// The table kinds known to the registry.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum TableKind {
    /// `OI_TARGET`: the target catalog.
    Target,

    /// `OI_ARRAY`: station layout of an array.
    Array,

    /// `OI_WAVELENGTH`: a spectral setup.
    Wavelength,

    /// `OI_FLUX`: flux observables.
    Flux,
}

/// A relationship from a table to a reference table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Reference {
    /// The kind of table referred to.
    pub kind: TableKind,

    /// The foreign-key column, if the relationship goes through identifiers.
    pub column: Option<&'static str>,

    /// Whether a table of this kind must be able to find its reference.
    pub required: bool,
}

const NO_REFERENCES: &[Reference] = &[];

const FLUX_REFERENCES: &[Reference] = &[
    Reference {
        kind: TableKind::Target,
        column: Some("TARGET_ID"),
        required: true,
    },
    Reference {
        kind: TableKind::Array,
        column: Some("STA_INDEX"),
        required: false,
    },
    Reference {
        kind: TableKind::Wavelength,
        column: None,
        required: true,
    },
];

impl TableKind {
    pub const ALL: [TableKind; 4] = [
        TableKind::Target,
        TableKind::Array,
        TableKind::Wavelength,
        TableKind::Flux,
    ];

    pub fn extname(&self) -> &'static str {
        match *self {
            TableKind::Target => "OI_TARGET",
            TableKind::Array => "OI_ARRAY",
            TableKind::Wavelength => "OI_WAVELENGTH",
            TableKind::Flux => "OI_FLUX",
        }
    }

    pub fn from_extname(extname: &str) -> Option<TableKind> {
        TableKind::ALL
            .iter()
            .copied()
            .find(|k| k.extname() == extname)
    }

    /// The column whose values key the rows of this table, if others refer
    /// to it by identifier.
    pub fn identifier(&self) -> Option<&'static str> {
        match *self {
            TableKind::Target => Some("TARGET_ID"),
            TableKind::Array => Some("STA_INDEX"),
            _ => None,
        }
    }

    /// The card that referrers use to pick this table out of a dataset.
    /// `None` for a reference table that is unique in its dataset.
    pub fn linkage_card(&self) -> Option<&'static str> {
        match *self {
            TableKind::Array => Some("ARRNAME"),
            TableKind::Wavelength => Some("INSNAME"),
            _ => None,
        }
    }

    /// Whether other tables refer to tables of this kind.
    pub fn is_reference(&self) -> bool {
        matches!(
            *self,
            TableKind::Target | TableKind::Array | TableKind::Wavelength
        )
    }

    /// The reference tables that a table of this kind refers to.
    pub fn references(&self) -> &'static [Reference] {
        match *self {
            TableKind::Flux => FLUX_REFERENCES,
            _ => NO_REFERENCES,
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.extname())
    }
}

/// The description of one table kind at one revision.
#[derive(Debug)]
pub struct Schema {
    pub kind: TableKind,
    pub revision: u8,
    pub format: FormatVersion,
    column_groups: &'static [&'static [ColumnDesc]],
    card_groups: &'static [&'static [CardDesc]],
    aliases: &'static [(&'static str, &'static str)],
}

impl Schema {
    pub fn extname(&self) -> &'static str {
        self.kind.extname()
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static ColumnDesc> {
        self.column_groups.iter().flat_map(|g| g.iter())
    }

    pub fn cards(&self) -> impl Iterator<Item = &'static CardDesc> {
        self.card_groups.iter().flat_map(|g| g.iter())
    }

    pub fn column(&self, name: &str) -> Option<&'static ColumnDesc> {
        self.columns().find(|c| c.name == name)
    }

    pub fn card(&self, name: &str) -> Option<&'static CardDesc> {
        self.cards().find(|c| c.name == name)
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns().map(|c| c.name).collect()
    }

    pub fn required_columns(&self) -> Vec<&'static str> {
        self.columns().filter(|c| c.required).map(|c| c.name).collect()
    }

    pub fn columns_with_shape_token(&self, token: Dim) -> Vec<&'static ColumnDesc> {
        self.columns().filter(|c| c.has_shape_token(token)).collect()
    }

    /// Legacy column names and the standard names that replace them.
    pub fn aliases(&self) -> &'static [(&'static str, &'static str)] {
        self.aliases
    }
}

static REGISTRY: &[&Schema] = &[
    &defs::TARGET_1,
    &defs::TARGET_2,
    &defs::ARRAY_1,
    &defs::ARRAY_2,
    &defs::WAVELENGTH_1,
    &defs::WAVELENGTH_2,
    &defs::FLUX_1,
];

/// Every schema the registry knows about.
pub fn all_schemas() -> &'static [&'static Schema] {
    REGISTRY
}

/// Find the schema for an extension at a revision.
pub fn lookup(extname: &str, revision: u8) -> Result<&'static Schema> {
    REGISTRY
        .iter()
        .copied()
        .find(|s| s.extname() == extname && s.revision == revision)
        .ok_or_else(|| OiError::UnknownSchema {
            extname: extname.to_owned(),
            revision,
        })
}

/// The revisions known for an extension, in increasing order.
pub fn revisions(extname: &str) -> Vec<u8> {
    let mut revs: Vec<u8> = REGISTRY
        .iter()
        .filter(|s| s.extname() == extname)
        .map(|s| s.revision)
        .collect();
    revs.sort_unstable();
    revs
}

/// The names of the required columns of a schema.
pub fn required_columns(schema: &Schema) -> Vec<&'static str> {
    schema.required_columns()
}

/// The columns of a schema whose declared shape uses `token`.
pub fn columns_with_shape_token(schema: &Schema, token: Dim) -> Vec<&'static ColumnDesc> {
    schema.columns_with_shape_token(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::cast_value;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        for schema in all_schemas() {
            let mut seen = HashSet::new();
            for c in schema.columns() {
                assert!(seen.insert(c.name), "{} repeats {}", schema.extname(), c.name);
            }

            let mut seen = HashSet::new();
            for c in schema.cards() {
                assert!(seen.insert(c.name), "{} repeats {}", schema.extname(), c.name);
            }
        }
    }

    #[test]
    fn revisions_agree_on_shared_names() {
        for a in all_schemas() {
            for b in all_schemas() {
                if a.kind != b.kind {
                    continue;
                }

                for ca in a.columns() {
                    if let Some(cb) = b.column(ca.name) {
                        // string widths may grow between revisions; kinds may not change
                        let same_kind = match (ca.type_, cb.type_) {
                            (TypeTag::Text(_), TypeTag::Text(_)) => true,
                            (x, y) => x == y,
                        };
                        assert!(same_kind, "{} changes type across revisions", ca.name);
                    }
                }
            }
        }
    }

    #[test]
    fn defaults_are_valid() {
        for schema in all_schemas() {
            for c in schema.columns() {
                if let Some(d) = c.default_value() {
                    assert!(cast_value(&d, c.type_).is_ok(), "bad default for {}", c.name);
                    if let Some(test) = c.validator {
                        assert!(test(&d), "default for {} fails its own test", c.name);
                    }
                }
            }

            for c in schema.cards() {
                if let Some(d) = c.default_value() {
                    assert!(cast_value(&d, c.type_).is_ok(), "bad default for {}", c.name);
                    if let Some(test) = c.validator {
                        assert!(test(&d), "default for {} fails its own test", c.name);
                    }
                }
            }
        }
    }

    #[test]
    fn lookups() {
        let s = lookup("OI_TARGET", 2).unwrap();
        assert_eq!(s.kind, TableKind::Target);
        assert_eq!(s.format, FormatVersion::V2);
        assert!(s.is_declared("CATEGORY"));
        assert!(!lookup("OI_TARGET", 1).unwrap().is_declared("CATEGORY"));
        assert!(lookup("OI_TARGET", 3).is_err());
        assert!(lookup("OI_VIS9", 1).is_err());
        assert_eq!(revisions("OI_TARGET"), vec![1, 2]);
        assert_eq!(revisions("OI_FLUX"), vec![1]);
    }

    #[test]
    fn required_and_channel_columns() {
        let flux = lookup("OI_FLUX", 1).unwrap();
        let req = required_columns(flux);
        assert!(req.contains(&"FLUXDATA"));
        assert!(!req.contains(&"STA_INDEX"));

        let spec: Vec<_> = columns_with_shape_token(flux, NW)
            .iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(spec, vec!["FLUXDATA", "FLUXERR", "FLAG"]);

        let target = lookup("OI_TARGET", 1).unwrap();
        assert!(columns_with_shape_token(target, NW).is_empty());
    }

    #[test]
    fn shape_resolution() {
        let flux = lookup("OI_FLUX", 1).unwrap();
        let c = flux.column("FLUXDATA").unwrap();
        assert_eq!(c.resolve_shape(Some(7)), vec![Some(7)]);
        assert_eq!(c.resolve_shape(None), vec![None]);
    }

    #[test]
    fn kinds() {
        assert_eq!(TableKind::from_extname("OI_ARRAY"), Some(TableKind::Array));
        assert_eq!(TableKind::from_extname("OI_T3"), None);
        assert!(TableKind::Target.is_reference());
        assert!(!TableKind::Flux.is_reference());
        assert_eq!(TableKind::Flux.references().len(), 3);
    }

    #[test]
    fn units() {
        assert!(UnitSpec::Unitless.accepts(None));
        assert!(!UnitSpec::Unitless.accepts(Some("m")));
        assert!(UnitSpec::Exactly("deg").accepts(Some("deg")));
        assert!(UnitSpec::Any.accepts(Some("Jy")));
        assert_eq!(UnitSpec::Exactly("m").declared(), Some("m"));
    }
}
