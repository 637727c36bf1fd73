// Copyright 2026 the oitab developers and collaborators
// Licensed under the MIT License.

/*!
Dispatch between revisions of a table kind.

A table kind exists in one or more revisions, each tied to a version of the
OIFITS standard. [`resolve_class`] picks the concrete variant for a kind and
revision, [`revision_for`] finds the revision a format version uses, and
[`convert`] moves a table from one revision to another. Conversion goes
through the same column planning as a merge of a single input: columns the
target revision lacks are dropped, and columns it adds are filled with their
defaults.

*/

use crate::errors::{OiError, Result};
use crate::merge::{combine, never_equal};
use crate::schema::{all_schemas, lookup, FormatVersion, Schema, TableKind};
use crate::table::Table;

/// A table kind at a specific revision.
#[derive(Clone, Copy, Debug)]
pub struct Variant {
    pub kind: TableKind,
    pub schema: &'static Schema,
    pub format: FormatVersion,
}

impl Variant {
    pub fn revision(&self) -> u8 {
        self.schema.revision
    }

    pub fn extname(&self) -> &'static str {
        self.kind.extname()
    }

    /// An empty table of this variant.
    pub fn new_table(&self) -> Table {
        Table::new(self.schema)
    }
}

pub fn resolve_class(kind: TableKind, revision: u8) -> Result<Variant> {
    let schema = lookup(kind.extname(), revision)?;

    Ok(Variant {
        kind,
        schema,
        format: schema.format,
    })
}

/// All known variants of a kind, by increasing revision.
pub fn variants(kind: TableKind) -> Vec<Variant> {
    let mut out: Vec<Variant> = all_schemas()
        .iter()
        .filter(|s| s.kind == kind)
        .map(|&schema| Variant {
            kind,
            schema,
            format: schema.format,
        })
        .collect();
    out.sort_by_key(|v| v.revision());
    out
}

/// The revision of `kind` that a version of the standard uses.
pub fn revision_for(kind: TableKind, format: FormatVersion) -> Result<u8> {
    all_schemas()
        .iter()
        .filter(|s| s.kind == kind && s.format == format)
        .map(|s| s.revision)
        .max()
        .ok_or_else(|| OiError::NotInFormat {
            extname: kind.extname().to_owned(),
            format,
        })
}

/// Rewrite a table to follow another revision of its schema.
pub fn convert(table: &Table, target_revision: u8) -> Result<Table> {
    if target_revision == table.revision() {
        return Ok(table.clone());
    }

    let schema = lookup(table.extname(), target_revision)?;
    Ok(combine(&[table], schema, None, &mut never_equal)?.table)
}

/// Rewrite a table to the revision used by a version of the standard.
pub fn convert_to_format(table: &Table, format: FormatVersion) -> Result<Table> {
    convert(table, revision_for(table.kind(), format)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;
    use crate::testing::*;
    use crate::value::{TypeTag, Value};
    use crate::verify::report;

    #[test]
    fn dispatch() {
        let v = resolve_class(TableKind::Target, 2).unwrap();
        assert_eq!(v.format, FormatVersion::V2);
        assert_eq!(v.extname(), "OI_TARGET");
        assert!(resolve_class(TableKind::Flux, 2).is_err());

        assert_eq!(revision_for(TableKind::Target, FormatVersion::V1).unwrap(), 1);
        assert_eq!(revision_for(TableKind::Array, FormatVersion::V2).unwrap(), 2);
        assert_eq!(revision_for(TableKind::Flux, FormatVersion::V2).unwrap(), 1);
        assert!(matches!(
            revision_for(TableKind::Flux, FormatVersion::V1),
            Err(OiError::NotInFormat { .. })
        ));

        let revs: Vec<u8> = variants(TableKind::Wavelength).iter().map(|v| v.revision()).collect();
        assert_eq!(revs, vec![1, 2]);

        let t = v.new_table();
        assert_eq!(t.header().get("OI_REVN"), Some(&Value::Int(2)));
    }

    #[test]
    fn upcast_adds_defaults() {
        let t1 = target_table(1, &[(1, "alpha", 10., 20.), (2, "beta", 11., 21.)]);
        let t2 = convert(&t1, 2).unwrap();

        assert_eq!(t2.revision(), 2);
        assert_eq!(t2.header().get("OI_REVN"), Some(&Value::Int(2)));
        assert_eq!(t2.column("TARGET").unwrap().data.type_tag(), TypeTag::Text(32));
        assert!(t2.text_values("CATEGORY").unwrap().iter().all(|c| c == "SCI"));
        assert!(report(&t2, None).is_empty());
    }

    #[test]
    fn round_trip() {
        let t1 = target_table(1, &[(1, "alpha", 10., 20.)]);
        let back = convert(&convert(&t1, 2).unwrap(), 1).unwrap();
        assert!(back.same_content(&t1));
        assert!(!back.has_column("CATEGORY"));

        // a value outside the older revision does not survive the trip
        let mut t2 = target_table(2, &[(1, "alpha", 10., 20.)]);
        t2.push_column(Column::new("CATEGORY", vec!["CAL"])).unwrap();
        let again = convert(&convert(&t2, 1).unwrap(), 2).unwrap();
        assert_eq!(again.text_values("CATEGORY").unwrap()[[0]], "SCI");
        assert_eq!(again.text_values("TARGET").unwrap()[[0]], "alpha");
    }

    #[test]
    fn non_standard_columns_survive() {
        let mut t = array_table("VLTI", &[(1, "A0")]);
        t.push_column(Column::new("NS_COMMENT", vec!["ok"])).unwrap();

        let old = convert(&t, 1).unwrap();
        assert!(old.has_column("NS_COMMENT"));
        assert!(!old.has_column("FOV"));
        assert_eq!(old.header().get_str("ARRNAME"), Some("VLTI"));
        assert!(report(&old, None).is_empty());

        let v1 = convert_to_format(&t, FormatVersion::V1).unwrap();
        assert_eq!(v1.revision(), 1);
    }
}
