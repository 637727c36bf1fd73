// Copyright 2026 the oitab developers and collaborators
// Licensed under the MIT License.

/*!
Merging tables of the same kind.

[`merge`] concatenates the rows of several tables into one, dropping rows
that a caller-supplied predicate judges to be duplicates of rows already
taken from an earlier input. When an identifier column is named, kept rows
whose identifiers collide with ones already in use are renumbered, and each
input gets an [`IdMap`] describing how its identifiers moved. [`cascade`] and
[`cascade_into`] then apply those maps to the tables that refer to the
inputs.

The output takes the schema of the highest-revision input. Columns are
planned once for all inputs: a column the schema declares gets its declared
type (text widths grow as needed, never shrink below the data), and inputs
that lack a column get its default, or zero.

*/

use ndarray::{concatenate, Array1, ArrayD, ArrayView, Axis, IxDyn};
use std::collections::{BTreeMap, BTreeSet};

use crate::column::{Column, ColumnData};
use crate::errors::{OiError, Result};
use crate::header::Header;
use crate::schema::{Dim, Schema, LINKAGE_CARDS};
use crate::table::{same_linkage, Row, Table};
use crate::value::{cast_value, TypeTag, Value};

/// Old identifier to new identifier. Only identifiers that change appear.
pub type IdMap = BTreeMap<i64, i64>;

/// The result of a merge.
#[derive(Clone, Debug)]
pub struct Merged {
    pub table: Table,

    /// One map per input, in input order.
    pub id_maps: Vec<IdMap>,

    /// The number of input rows dropped as duplicates.
    pub duplicates: usize,
}

/// Settings for merging whole datasets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MergeOptions {
    /// Two catalog entries closer than this on both axes, in
    /// milliarcseconds, may be the same target.
    pub target_tolerance_mas: f64,

    /// Two stations closer than this on every axis, in meters, may be the
    /// same station.
    pub station_tolerance: f64,

    /// Whether to look for duplicate rows at all.
    pub deduplicate: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        MergeOptions {
            target_tolerance_mas: 10.,
            station_tolerance: 1e-3,
            deduplicate: true,
        }
    }
}

impl MergeOptions {
    pub fn target_tolerance_mas(mut self, mas: f64) -> Self {
        self.target_tolerance_mas = mas;
        self
    }

    pub fn station_tolerance(mut self, meters: f64) -> Self {
        self.station_tolerance = meters;
        self
    }

    pub fn deduplicate(mut self, on: bool) -> Self {
        self.deduplicate = on;
        self
    }

    /// The target tolerance in degrees, the unit of the catalog columns.
    pub fn target_tolerance_deg(&self) -> f64 {
        self.target_tolerance_mas / 3.6e6
    }
}

/// The default row equality: no two rows are ever duplicates.
pub fn never_equal(_: &Row, _: &Row) -> bool {
    false
}

fn within(a: Option<f64>, b: Option<f64>, tolerance: f64) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => (a - b).abs() <= tolerance,
        _ => false,
    }
}

/// Pin a closure to the row-predicate signature.
fn row_predicate<F: Fn(&Row, &Row) -> bool>(f: F) -> F {
    f
}

/// Catalog entries are the same target if they share a name and an
/// equinox, and their coordinates agree within `tolerance_deg` on each axis.
pub fn same_target(tolerance_deg: f64) -> impl Fn(&Row, &Row) -> bool {
    row_predicate(move |a, b| {
        let name = a.text("TARGET");

        name.is_some()
            && name == b.text("TARGET")
            && a.float("EQUINOX") == b.float("EQUINOX")
            && within(a.float("RAEP0"), b.float("RAEP0"), tolerance_deg)
            && within(a.float("DECEP0"), b.float("DECEP0"), tolerance_deg)
    })
}

/// Stations are the same if they share station and telescope names and
/// their positions agree within `tolerance` meters on each axis.
pub fn same_station(tolerance: f64) -> impl Fn(&Row, &Row) -> bool {
    row_predicate(move |a, b| {
        let name = a.text("STA_NAME");

        if name.is_none()
            || name != b.text("STA_NAME")
            || a.text("TEL_NAME") != b.text("TEL_NAME")
        {
            return false;
        }

        match (a.cell("STAXYZ"), b.cell("STAXYZ")) {
            (Some(p), Some(q)) if p.shape() == q.shape() => p
                .iter()
                .zip(q.iter())
                .all(|(x, y)| within(x.as_f64(), y.as_f64(), tolerance)),
            _ => false,
        }
    })
}

/// Merge tables of one kind.
///
/// Inputs are processed in order. Every row of the first input is kept with
/// its identifier. A row of a later input that `equal` matches against a
/// row kept from an earlier input is dropped, and its identifier maps to
/// that row's. Other rows are kept: they retain their identifier if it is
/// still unused, and otherwise get the smallest positive identifier that is
/// neither in use nor held by another row of the same input.
pub fn merge<F>(tables: &[&Table], identifier: Option<&str>, mut equal: F) -> Result<Merged>
where
    F: FnMut(&Row, &Row) -> bool,
{
    let first = tables.first().ok_or(OiError::NoInputs)?;

    for t in &tables[1..] {
        if t.extname() != first.extname() {
            return Err(OiError::KindMismatch(
                first.extname().to_owned(),
                t.extname().to_owned(),
            ));
        }
    }

    let schema = tables
        .iter()
        .map(|t| t.schema())
        .max_by_key(|s| s.revision)
        .ok_or(OiError::NoInputs)?;

    combine(tables, schema, identifier, &mut equal)
}

/// Rewrite the foreign keys in `column` of `referrer` according to `map`.
/// A referrer without that column has nothing to rewrite. Returns the number
/// of values changed.
pub fn cascade(referrer: &mut Table, column: &str, map: &IdMap) -> Result<usize> {
    if map.is_empty() || !referrer.has_column(column) {
        return Ok(0);
    }

    referrer.remap(column, map)
}

/// Apply the identifier map of one merge input to every table among
/// `tables` that refers to it.
pub fn cascade_into<'a, I>(tables: I, input: &Table, map: &IdMap) -> Result<usize>
where
    I: IntoIterator<Item = &'a mut Table>,
{
    let mut changed = 0;

    for t in tables {
        if !t.refers_to(input) {
            continue;
        }

        for r in t.kind().references() {
            if r.kind != input.kind() {
                continue;
            }

            if let Some(column) = r.column {
                changed += cascade(t, column, map)?;
            }
        }
    }

    Ok(changed)
}

/// How one output column is built.
struct Plan {
    name: String,
    tag: TypeTag,
    cell_shape: Vec<usize>,
    unit: Option<String>,
    fill: Value,
}

fn longest_text(columns: &[&Column]) -> usize {
    columns
        .iter()
        .filter_map(|c| match &c.data {
            ColumnData::Text { values, .. } => {
                values.iter().map(|s| s.trim_end().chars().count()).max()
            }
            _ => None,
        })
        .max()
        .unwrap_or(0)
}

fn plan_columns(tables: &[&Table], schema: &'static Schema) -> Result<Vec<Plan>> {
    let mut names: Vec<&str> = schema
        .columns()
        .filter(|d| {
            d.required || d.default.is_some() || tables.iter().any(|t| t.has_column(d.name))
        })
        .map(|d| d.name)
        .collect();

    // standard columns of an input's own revision that the output revision
    // lacks are dropped; anything else is carried along
    for t in tables {
        for c in t.columns() {
            let dropped = !schema.is_declared(&c.name)
                && tables.iter().any(|u| u.schema().is_declared(&c.name));

            if !dropped && !names.contains(&c.name.as_str()) {
                names.push(&c.name);
            }
        }
    }

    let n_channels = tables.iter().find_map(|t| t.n_channels());
    let mut plans = Vec::with_capacity(names.len());

    for name in names {
        let present: Vec<&Column> = tables.iter().filter_map(|t| t.get_column(name)).collect();
        let desc = schema.column(name);

        let tag = match (desc.map(|d| d.type_), present.first()) {
            (Some(TypeTag::Text(w)), _) => TypeTag::Text(w.max(longest_text(&present))),
            (Some(tag), _) => tag,
            (None, Some(c)) => match c.data.type_tag() {
                TypeTag::Text(_) => TypeTag::Text(longest_text(&present).max(1)),
                tag => tag,
            },
            (None, None) => continue,
        };

        let cell_shape = match present.first() {
            Some(c) => {
                let shape = c.data.cell_shape().to_vec();

                for other in &present[1..] {
                    if other.data.cell_shape() != &shape[..] {
                        return Err(OiError::ShapeMismatch {
                            column: name.to_owned(),
                            expected: shape,
                            found: other.data.cell_shape().to_vec(),
                        });
                    }
                }

                shape
            }
            None => desc
                .map(|d| {
                    d.shape
                        .iter()
                        .map(|dim| match *dim {
                            Dim::Fixed(n) => n,
                            Dim::Channels => n_channels.unwrap_or(1),
                        })
                        .collect()
                })
                .unwrap_or_default(),
        };

        let unit = present
            .iter()
            .find_map(|c| c.unit())
            .or_else(|| desc.and_then(|d| d.unit.declared()))
            .map(|u| u.to_owned());

        let fill = desc
            .and_then(|d| d.default_value())
            .filter(|v| cast_value(v, tag).is_ok())
            .unwrap_or_else(|| tag.zero());

        plans.push(Plan {
            name: name.to_owned(),
            tag,
            cell_shape,
            unit,
            fill,
        });
    }

    Ok(plans)
}

fn assemble(
    tables: &[&Table],
    kept: &[Vec<usize>],
    plans: &[Plan],
    identifier: Option<(&str, &[i64])>,
) -> Result<Vec<Column>> {
    let mut columns = Vec::with_capacity(plans.len());

    for plan in plans {
        let values = match identifier {
            Some((id, assigned)) if id == plan.name => {
                Array1::from_iter(assigned.iter().map(|&n| Value::Int(n))).into_dyn()
            }

            _ => {
                let mut parts: Vec<ArrayD<Value>> = Vec::with_capacity(tables.len());

                for (t, rows) in tables.iter().zip(kept) {
                    parts.push(match t.get_column(&plan.name) {
                        Some(c) => c.data.select_rows(rows).to_values(),
                        None => {
                            let mut shape = vec![rows.len()];
                            shape.extend_from_slice(&plan.cell_shape);
                            ArrayD::from_elem(IxDyn(&shape), plan.fill.clone())
                        }
                    });
                }

                let views: Vec<ArrayView<Value, IxDyn>> = parts.iter().map(|p| p.view()).collect();
                concatenate(Axis(0), &views)?
            }
        };

        let data =
            ColumnData::from_values(plan.tag, &values).map_err(|e| OiError::cast(&plan.name, e))?;

        columns.push(Column {
            name: plan.name.clone(),
            unit: plan.unit.clone(),
            data,
        });
    }

    Ok(columns)
}

fn merge_headers(tables: &[&Table], schema: &'static Schema) -> Result<Header> {
    let mut header = Header::new();
    header.set("EXTNAME", schema.extname());

    let revn_comment = schema.card("OI_REVN").map_or("", |c| c.comment);
    header.set_with_comment("OI_REVN", schema.revision as i64, revn_comment);

    for card in LINKAGE_CARDS {
        let mut first: Option<&Value> = None;

        for t in tables {
            if let Some(v) = t.header().get(card) {
                match first {
                    None => first = Some(v),
                    Some(f) if !same_linkage(f, v) => {
                        return Err(OiError::HeaderConflict {
                            card: card.to_owned(),
                            first: f.to_string(),
                            other: v.to_string(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }
    }

    for t in tables {
        for c in t.header().iter() {
            if c.name == "EXTNAME" || c.name == "OI_REVN" {
                continue;
            }

            if schema.card(&c.name).is_none() && t.schema().card(&c.name).is_some() {
                continue;
            }

            let default = schema.card(&c.name).and_then(|d| d.default_value());

            let replace = match header.get(&c.name) {
                None => true,
                Some(existing) => {
                    default.as_ref() == Some(existing) && default.as_ref() != Some(&c.value)
                }
            };

            if replace {
                header.set_with_comment(&c.name, c.value.clone(), &c.comment);
            }
        }
    }

    Ok(header)
}

/// Find the smallest identifier from `*cursor` on that is neither used nor
/// reserved, and advance the cursor past it.
fn next_free(
    cursor: &mut i64,
    used: &BTreeSet<i64>,
    reserved: &BTreeSet<i64>,
    max: i64,
) -> Option<i64> {
    while *cursor <= max {
        let candidate = *cursor;
        *cursor += 1;

        if !used.contains(&candidate) && !reserved.contains(&candidate) {
            return Some(candidate);
        }
    }

    None
}

/// Merge `tables` into a table following `schema`.
pub(crate) fn combine<F>(
    tables: &[&Table],
    schema: &'static Schema,
    identifier: Option<&str>,
    equal: &mut F,
) -> Result<Merged>
where
    F: FnMut(&Row, &Row) -> bool,
{
    let plans = plan_columns(tables, schema)?;

    let max_id = match identifier {
        Some(id) => plans
            .iter()
            .find(|p| p.name == id)
            .and_then(|p| p.tag.max_integer())
            .unwrap_or(i64::MAX),
        None => i64::MAX,
    };

    let mut used = BTreeSet::new();
    let mut accepted: Vec<(usize, usize, i64)> = Vec::new();
    let mut kept = Vec::with_capacity(tables.len());
    let mut assigned = Vec::new();
    let mut id_maps = Vec::with_capacity(tables.len());
    let mut duplicates = 0;

    for (k, t) in tables.iter().enumerate() {
        let ids: Option<Vec<i64>> = match identifier {
            Some(id) => Some(t.int_values(id)?.iter().copied().collect()),
            None => None,
        };

        let reserved: BTreeSet<i64> = match (&ids, k) {
            (Some(ids), k) if k > 0 => ids.iter().copied().collect(),
            _ => BTreeSet::new(),
        };

        let n_before = accepted.len();
        let mut cursor = 1;
        let mut map = IdMap::new();
        let mut rows = Vec::new();

        for r in 0..t.n_rows() {
            let row = t.row(r);
            let old = ids.as_ref().map_or(0, |ids| ids[r]);

            if k > 0 {
                let matched = accepted[..n_before]
                    .iter()
                    .find(|&&(ti, ri, _)| equal(&tables[ti].row(ri), &row));

                if let Some(&(_, _, id)) = matched {
                    duplicates += 1;

                    if ids.is_some() && id != old {
                        map.insert(old, id);
                    }

                    continue;
                }
            }

            let new = if ids.is_none() || k == 0 || (old >= 1 && !used.contains(&old)) {
                old
            } else {
                let name = identifier.unwrap_or_default();
                next_free(&mut cursor, &used, &reserved, max_id)
                    .ok_or_else(|| OiError::IdentifierExhausted(name.to_owned()))?
            };

            if ids.is_some() {
                used.insert(new);
                assigned.push(new);

                if new != old {
                    map.insert(old, new);
                }
            }

            accepted.push((k, r, new));
            rows.push(r);
        }

        kept.push(rows);
        id_maps.push(map);
    }

    let columns = assemble(
        tables,
        &kept,
        &plans,
        identifier.map(|id| (id, assigned.as_slice())),
    )?;

    let header = merge_headers(tables, schema)?;

    Ok(Merged {
        table: Table::from_parts(schema, header, columns),
        id_maps,
        duplicates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use crate::verify::{report, VerifyMode};

    fn same_name(a: &Row, b: &Row) -> bool {
        a.text("TARGET") == b.text("TARGET")
    }

    fn ids(t: &Table, column: &str) -> Vec<i64> {
        t.int_values(column).unwrap().iter().copied().collect()
    }

    #[test]
    fn duplicate_is_dropped() {
        let a = target_table(2, &[(1, "X", 10., 20.)]);
        let b = target_table(2, &[(1, "X", 10., 20.), (2, "Y", 30., 40.)]);

        let m = merge(&[&a, &b], Some("TARGET_ID"), same_name).unwrap();
        assert_eq!(m.table.n_rows(), 2);
        assert_eq!(m.duplicates, 1);
        assert!(m.id_maps[0].is_empty());
        assert!(m.id_maps[1].is_empty());
        assert_eq!(ids(&m.table, "TARGET_ID"), vec![1, 2]);
        assert_eq!(m.table.n_rows(), a.n_rows() + b.n_rows() - m.duplicates);
    }

    #[test]
    fn collision_is_renumbered() {
        let a = target_table(2, &[(1, "X", 10., 20.)]);
        let b = target_table(2, &[(1, "different", 10., 20.)]);

        let m = merge(&[&a, &b], Some("TARGET_ID"), never_equal).unwrap();
        assert_eq!(ids(&m.table, "TARGET_ID"), vec![1, 2]);
        assert_eq!(m.id_maps[1], [(1, 2)].into_iter().collect::<IdMap>());
    }

    #[test]
    fn renumbering_skips_own_identifiers() {
        let a = target_table(2, &[(1, "a", 0., 0.), (2, "b", 0., 0.)]);
        let b = target_table(2, &[(2, "c", 0., 0.), (3, "d", 0., 0.), (9, "e", 0., 0.)]);

        let m = merge(&[&a, &b], Some("TARGET_ID"), never_equal).unwrap();
        assert_eq!(ids(&m.table, "TARGET_ID"), vec![1, 2, 4, 3, 9]);
        assert_eq!(m.id_maps[1], [(2, 4)].into_iter().collect::<IdMap>());

        let unique: BTreeSet<i64> = ids(&m.table, "TARGET_ID").into_iter().collect();
        assert_eq!(unique.len(), m.table.n_rows());
    }

    #[test]
    fn duplicate_maps_to_kept_row() {
        let a = target_table(2, &[(4, "X", 10., 20.)]);
        let b = target_table(2, &[(1, "X", 10., 20.)]);

        let m = merge(&[&a, &b], Some("TARGET_ID"), same_name).unwrap();
        assert_eq!(m.table.n_rows(), 1);
        assert_eq!(m.id_maps[1], [(1, 4)].into_iter().collect::<IdMap>());
    }

    #[test]
    fn cascade_follows_maps() {
        // collision: the referrer's 1 becomes 2
        let a = target_table(2, &[(1, "X", 10., 20.)]);
        let b = target_table(2, &[(1, "different", 10., 20.)]);
        let mut fb = flux_table("SPEC", None, &[1, 1], None, 2);

        let m = merge(&[&a, &b], Some("TARGET_ID"), never_equal).unwrap();
        assert_eq!(cascade_into([&mut fb], &b, &m.id_maps[1]).unwrap(), 2);
        assert_eq!(ids(&fb, "TARGET_ID"), vec![2, 2]);

        // duplicate: the referrer keeps 1
        let b = target_table(2, &[(1, "X", 10., 20.)]);
        let mut fb = flux_table("SPEC", None, &[1], None, 2);
        let m = merge(&[&a, &b], Some("TARGET_ID"), same_name).unwrap();
        assert_eq!(cascade_into([&mut fb], &b, &m.id_maps[1]).unwrap(), 0);
        assert_eq!(ids(&fb, "TARGET_ID"), vec![1]);

        let merged_ids: BTreeSet<i64> = ids(&m.table, "TARGET_ID").into_iter().collect();
        assert!(ids(&fb, "TARGET_ID").iter().all(|k| merged_ids.contains(k)));
    }

    #[test]
    fn cascade_respects_linkage() {
        let a = array_table("VLTI", &[(1, "A0")]);
        let b = array_table("VLTI", &[(1, "B2")]);
        let mut linked = flux_table("SPEC", Some("VLTI"), &[1], Some(&[1]), 2);
        let mut other = flux_table("SPEC", Some("CHARA"), &[1], Some(&[1]), 2);

        let m = merge(&[&a, &b], Some("STA_INDEX"), never_equal).unwrap();
        let n = cascade_into([&mut linked, &mut other], &b, &m.id_maps[1]).unwrap();
        assert_eq!(n, 1);
        assert_eq!(ids(&linked, "STA_INDEX"), vec![2]);
        assert_eq!(ids(&other, "STA_INDEX"), vec![1]);
        assert_eq!(ids(&linked, "TARGET_ID"), vec![1]);
    }

    #[test]
    fn structural_errors() {
        let t = target_table(2, &[(1, "X", 10., 20.)]);
        let w = wavelength_table("SPEC", 2);

        assert!(matches!(merge(&[], None, never_equal), Err(OiError::NoInputs)));
        assert!(matches!(
            merge(&[&t, &w], None, never_equal),
            Err(OiError::KindMismatch(..))
        ));

        let mut u = t.clone();
        u.remove_column("TARGET_ID");
        assert!(merge(&[&t, &u], Some("TARGET_ID"), never_equal).is_err());

        let f1 = flux_table("SPEC", None, &[1], None, 2);
        let f2 = flux_table("OTHER", None, &[1], None, 2);
        assert!(matches!(
            merge(&[&f1, &f2], None, never_equal),
            Err(OiError::HeaderConflict { .. })
        ));

        let f3 = flux_table("SPEC", None, &[1], None, 3);
        assert!(matches!(
            merge(&[&f1, &f3], None, never_equal),
            Err(OiError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn highest_revision_wins() {
        let old = target_table(1, &[(1, "X", 10., 20.)]);
        let new = target_table(2, &[(2, "Y", 10., 20.)]);

        let m = merge(&[&old, &new], Some("TARGET_ID"), never_equal).unwrap();
        assert_eq!(m.table.revision(), 2);
        assert_eq!(m.table.header().get("OI_REVN"), Some(&Value::Int(2)));
        assert_eq!(
            m.table.column("TARGET").unwrap().data.type_tag(),
            TypeTag::Text(32)
        );

        let cats = m.table.text_values("CATEGORY").unwrap();
        assert!(cats.iter().all(|c| c == "SCI"));
        assert!(report(&m.table, None).is_empty());
    }

    #[test]
    fn text_never_truncated() {
        let long = "a target with a very long name, longer than thirty-two";
        let a = target_table(2, &[(1, long, 10., 20.)]);
        let b = target_table(2, &[(2, "short", 10., 20.)]);

        let m = merge(&[&a, &b], Some("TARGET_ID"), never_equal).unwrap();
        assert_eq!(m.table.text_values("TARGET").unwrap()[[0]], long);
    }

    #[test]
    fn headers_take_first_non_default() {
        let mut f1 = flux_table("SPEC", None, &[1], None, 2);
        let mut f2 = flux_table("SPEC", Some("VLTI"), &[2], None, 2);
        f1.header_mut().set("FOVTYPE", "FWHM");
        f2.header_mut().set("FOVTYPE", "RADIUS");
        f2.header_mut().set("FOV", 5.0);

        let m = merge(&[&f1, &f2], None, never_equal).unwrap();
        let h = m.table.header();
        assert_eq!(h.get_str("FOVTYPE"), Some("RADIUS"));
        assert_eq!(h.get("FOV"), Some(&Value::Float(5.)));
        assert_eq!(h.get_str("ARRNAME"), Some("VLTI"));
        assert_eq!(m.table.n_rows(), 2);
        assert!(m.id_maps.iter().all(|m| m.is_empty()));
    }

    #[test]
    fn linkage_ignores_trailing_blanks() {
        let f1 = flux_table("SPEC", Some("VLTI"), &[1], None, 2);
        let f2 = flux_table("SPEC    ", Some("VLTI    "), &[2], None, 2);

        let m = merge(&[&f1, &f2], None, never_equal).unwrap();
        assert_eq!(m.table.n_rows(), 2);
        assert_eq!(m.table.header().get_str("ARRNAME"), Some("VLTI"));
        assert_eq!(m.table.header().get_str("INSNAME"), Some("SPEC"));
    }

    #[test]
    fn undeclared_columns_are_carried() {
        let mut a = target_table(2, &[(1, "X", 10., 20.)]);
        a.push_column(Column::new("NS_NOTE", vec!["seen"])).unwrap();
        let b = target_table(2, &[(2, "Y", 10., 20.)]);

        let mut m = merge(&[&a, &b], Some("TARGET_ID"), never_equal).unwrap();
        let notes = m.table.text_values("NS_NOTE").unwrap();
        assert_eq!(notes.as_slice(), Some(&["seen".to_owned(), String::new()][..]));
        assert!(crate::verify::verify(&mut m.table, VerifyMode::Repair, None).is_empty());
    }

    #[test]
    fn equality_predicates() {
        let tol = MergeOptions::default().target_tolerance_deg();
        let near = 5. / 3.6e6;
        let far = 20. / 3.6e6;
        let t = target_table(
            2,
            &[
                (1, "X", 10., 20.),
                (2, "X", 10. + near, 20.),
                (3, "X", 10. + far, 20.),
                (4, "Y", 10., 20.),
            ],
        );

        let eq = same_target(tol);
        assert!(eq(&t.row(0), &t.row(1)));
        assert!(!eq(&t.row(0), &t.row(2)));
        assert!(!eq(&t.row(0), &t.row(3)));

        let a = array_table("VLTI", &[(1, "A0"), (2, "A0")]);
        let eq = same_station(1e-3);
        assert!(eq(&a.row(0), &a.row(0)));
        assert!(!eq(&a.row(0), &a.row(1)));
    }

    #[test]
    fn identifier_exhaustion() {
        let used: BTreeSet<i64> = [1, 2].into_iter().collect();
        let reserved: BTreeSet<i64> = [3].into_iter().collect();
        let mut cursor = 1;
        assert_eq!(next_free(&mut cursor, &used, &reserved, 4), Some(4));
        assert_eq!(next_free(&mut cursor, &used, &reserved, 4), None);
    }
}
