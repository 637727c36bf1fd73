// Copyright 2026 the oitab developers and collaborators
// Licensed under the MIT License.

/*!
Cross-matching foreign keys against reference tables.

Each function here looks up the key of every row of a dependent table in the
identifier column of the same name in a reference table. A key with no match
does not abort the lookup; that row gets [`Matched::NoReference`] so that
callers can enumerate every broken reference at once.

*/

use std::collections::{BTreeSet, HashMap};

use crate::errors::{OiError, Result};
use crate::table::Table;
use crate::value::Value;

/// The outcome of looking up one foreign key.
#[derive(Clone, Debug, PartialEq)]
pub enum Matched<T> {
    Found(T),

    /// The key is absent from the reference table.
    NoReference(i64),
}

impl<T> Matched<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Matched::Found(x) => Some(x),
            Matched::NoReference(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Matched::Found(_))
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Matched<U> {
        match self {
            Matched::Found(x) => Matched::Found(f(x)),
            Matched::NoReference(k) => Matched::NoReference(k),
        }
    }
}

/// Map each identifier of `reference` to its first row.
fn index(reference: &Table, key_column: &str) -> Result<HashMap<i64, usize>> {
    let mut map = HashMap::new();

    for (i, &k) in reference.int_values(key_column)?.iter().enumerate() {
        map.entry(k).or_insert(i);
    }

    Ok(map)
}

fn scalar_keys(dependent: &Table, key_column: &str) -> Result<Vec<i64>> {
    let keys = dependent.int_values(key_column)?;

    if keys.ndim() != 1 {
        return Err(OiError::ShapeMismatch {
            column: key_column.to_owned(),
            expected: Vec::new(),
            found: keys.shape()[1..].to_vec(),
        });
    }

    Ok(keys.iter().copied().collect())
}

/// For each row of `dependent`, the index of the matching row of
/// `reference`.
pub fn resolve_rows(
    dependent: &Table,
    reference: &Table,
    key_column: &str,
) -> Result<Vec<Matched<usize>>> {
    let index = index(reference, key_column)?;

    Ok(scalar_keys(dependent, key_column)?
        .into_iter()
        .map(|k| match index.get(&k) {
            Some(&row) => Matched::Found(row),
            None => Matched::NoReference(k),
        })
        .collect())
}

/// For each row of `dependent`, the value of `field` in the matching row of
/// `reference`.
pub fn resolve(
    dependent: &Table,
    reference: &Table,
    key_column: &str,
    field: &str,
) -> Result<Vec<Matched<Value>>> {
    let values = reference.column(field)?.data.to_values();

    if values.ndim() != 1 {
        return Err(OiError::ShapeMismatch {
            column: field.to_owned(),
            expected: Vec::new(),
            found: values.shape()[1..].to_vec(),
        });
    }

    Ok(resolve_rows(dependent, reference, key_column)?
        .into_iter()
        .map(|m| m.map(|row| values[[row]].clone()))
        .collect())
}

/// Like [`resolve`], but combine several fields of the matching row into a
/// single string key, joined with `-`. Text fields lose trailing blanks.
pub fn resolve_concatenated(
    dependent: &Table,
    reference: &Table,
    key_column: &str,
    fields: &[&str],
) -> Result<Vec<Matched<String>>> {
    let rows = resolve_rows(dependent, reference, key_column)?;
    let mut out = Vec::with_capacity(rows.len());

    for m in rows {
        out.push(match m {
            Matched::Found(row) => {
                let r = reference.row(row);
                let mut parts = Vec::with_capacity(fields.len());

                for &field in fields {
                    let value = r.get(field).ok_or_else(|| OiError::NoSuchColumn {
                        extname: reference.extname().to_owned(),
                        column: field.to_owned(),
                    })?;

                    parts.push(match value {
                        Value::Text(s) => s.trim_end().to_owned(),
                        v => v.to_string(),
                    });
                }

                Matched::Found(parts.join("-"))
            }
            Matched::NoReference(k) => Matched::NoReference(k),
        });
    }

    Ok(out)
}

/// Every key used by `dependent` that `reference` does not define, sorted.
/// Unlike the other lookups, this accepts key columns with any cell shape.
pub fn missing_keys(dependent: &Table, reference: &Table, key_column: &str) -> Result<Vec<i64>> {
    let index = index(reference, key_column)?;

    let missing: BTreeSet<i64> = dependent
        .int_values(key_column)?
        .iter()
        .copied()
        .filter(|k| !index.contains_key(k))
        .collect();

    Ok(missing.into_iter().collect())
}
