// Copyright 2026 the oitab developers and collaborators
// Licensed under the MIT License.

/*!
Datasets: the tables of one OIFITS file, taken together.

A [`Dataset`] is where cross-table relationships become concrete. Its
verification adds referential checks to the per-table ones and resolves the
channel count of each table from the spectral setup it names. Its merge
combines several datasets into one, cascading identifier changes into the
tables that refer to the merged reference tables.

*/

use oitab_core::notify::NotificationBackend;
use oitab_core::{oi_note, oi_severe, oi_warning, CoreError};

use crate::errors::{OiError, Result};
use crate::merge::{self, IdMap, MergeOptions, Merged};
use crate::schema::{Reference, TableKind, LINKAGE_CARDS};
use crate::table::{Row, Table};
use crate::value::Value;
use crate::verify::{self, Finding, VerifyOptions, VerifyPolicy};
use crate::xmatch;

/// The outcome of verifying a dataset: each finding with a label naming
/// the table it concerns.
#[derive(Clone, Debug, Default)]
pub struct DatasetReport {
    pub entries: Vec<(String, Finding)>,
}

impl DatasetReport {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn fixed(&self) -> usize {
        self.entries.iter().filter(|(_, f)| f.fixed).count()
    }

    pub fn unfixed(&self) -> usize {
        self.entries.len() - self.fixed()
    }

    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.entries.iter().map(|(_, f)| f)
    }
}

/// An ordered collection of tables.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    tables: Vec<Table>,
}

impl Dataset {
    pub fn new() -> Self {
        Dataset { tables: Vec::new() }
    }

    pub fn from_tables(tables: Vec<Table>) -> Self {
        Dataset { tables }
    }

    pub fn push(&mut self, table: Table) {
        self.tables.push(table);
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn tables_mut(&mut self) -> &mut [Table] {
        &mut self.tables
    }

    pub fn into_tables(self) -> Vec<Table> {
        self.tables
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn tables_of(&self, kind: TableKind) -> impl Iterator<Item = &Table> {
        self.tables.iter().filter(move |t| t.kind() == kind)
    }

    fn indices_of(&self, kind: TableKind) -> Vec<usize> {
        (0..self.tables.len())
            .filter(|&i| self.tables[i].kind() == kind)
            .collect()
    }

    pub fn target_table(&self) -> Option<&Table> {
        self.tables_of(TableKind::Target).next()
    }

    fn named(&self, kind: TableKind, card: &str, name: &str) -> Option<&Table> {
        self.tables_of(kind)
            .find(|t| t.header().get_str(card).map(|s| s.trim_end()) == Some(name.trim_end()))
    }

    pub fn array_table(&self, arrname: &str) -> Option<&Table> {
        self.named(TableKind::Array, "ARRNAME", arrname)
    }

    pub fn wavelength_table(&self, insname: &str) -> Option<&Table> {
        self.named(TableKind::Wavelength, "INSNAME", insname)
    }

    /// The table that `table` refers to through `reference`, if any. More
    /// than one candidate is an error.
    pub fn reference_for(&self, table: &Table, reference: &Reference) -> Result<Option<&Table>> {
        let candidates: Vec<&Table> = self
            .tables_of(reference.kind)
            .filter(|r| table.refers_to(r))
            .collect();

        match candidates.len() {
            0 => Ok(None),
            1 => Ok(Some(candidates[0])),
            n => Err(OiError::AmbiguousReference(format!(
                "{} matches {} {} tables",
                table,
                n,
                reference.kind.extname()
            ))),
        }
    }

    /// The number of spectral channels of `table`: the length of the
    /// spectral setup it names through `INSNAME`.
    pub fn n_channels(&self, table: &Table) -> Option<usize> {
        if table.kind() == TableKind::Wavelength {
            return Some(table.n_rows());
        }

        let insname = table.header().get_str("INSNAME")?;
        self.wavelength_table(insname).map(|w| w.n_rows())
    }

    /// Look up a field of the target of each row of `table`. Rows whose
    /// target is missing, or all rows if there is no target table, get
    /// `default`.
    pub fn target_field(&self, table: &Table, field: &str, default: Value) -> Result<Vec<Value>> {
        let Some(targets) = self.target_table() else {
            return Ok(vec![default; table.n_rows()]);
        };

        Ok(xmatch::resolve(table, targets, "TARGET_ID", field)?
            .into_iter()
            .map(|m| m.found().unwrap_or_else(|| default.clone()))
            .collect())
    }

    fn check_references(&self, entries: &mut Vec<(String, Finding)>) {
        let n_targets = self.tables_of(TableKind::Target).count();

        if n_targets > 1 {
            entries.push((
                "dataset".to_owned(),
                Finding::unfixable(format!("Dataset holds {n_targets} OI_TARGET tables")),
            ));
        }

        for t in &self.tables {
            for r in t.kind().references() {
                let problem = match self.reference_for(t, r) {
                    Err(e) => Some(e.to_string()),
                    Ok(None) if r.required => Some(format!("No {} table for this table", r.kind)),
                    Ok(None) => None,
                    Ok(Some(reference)) => match r.column {
                        Some(column) if t.has_column(column) => {
                            match xmatch::missing_keys(t, reference, column) {
                                Ok(missing) if missing.is_empty() => None,
                                Ok(missing) => {
                                    let list: Vec<String> =
                                        missing.iter().map(|k| k.to_string()).collect();
                                    Some(format!(
                                        "Column {} refers to values missing from {}: {}",
                                        column,
                                        reference.extname(),
                                        list.join(", ")
                                    ))
                                }
                                Err(e) => Some(e.to_string()),
                            }
                        }
                        _ => None,
                    },
                };

                if let Some(message) = problem {
                    entries.push((t.to_string(), Finding::unfixable(message)));
                }
            }
        }
    }

    /// Verify every table, then the references between them.
    ///
    /// Each finding is also sent to `nb`: repaired problems as notes,
    /// repairable ones as warnings, and the rest as severe. Under
    /// [`VerifyPolicy::Strict`], any problem left unrepaired is an error.
    pub fn verify(
        &mut self,
        options: &VerifyOptions,
        nb: &mut dyn NotificationBackend,
    ) -> Result<DatasetReport> {
        let mut entries = Vec::new();

        for i in 0..self.tables.len() {
            let n_channels = self.n_channels(&self.tables[i]);
            let label = self.tables[i].to_string();

            for f in verify::verify(&mut self.tables[i], options.mode, n_channels) {
                entries.push((label.clone(), f));
            }
        }

        self.check_references(&mut entries);

        for (label, f) in &entries {
            if f.fixed {
                oi_note!(nb, "{}: {}", label, f);
            } else if f.fixable {
                oi_warning!(nb, "{}: {}", label, f);
            } else {
                oi_severe!(nb, "{}: {}", label, f);
            }
        }

        let report = DatasetReport { entries };

        if options.policy == VerifyPolicy::Strict && report.unfixed() > 0 {
            return Err(CoreError::UnfixedFindings(report.unfixed()).into());
        }

        Ok(report)
    }

    /// Apply the identifier map of the reference table at `source` to the
    /// tables that refer to it.
    fn cascade_from(&mut self, source: usize, map: &IdMap) -> Result<usize> {
        if map.is_empty() {
            return Ok(0);
        }

        let reference = self.tables[source].clone();
        let others = self
            .tables
            .iter_mut()
            .enumerate()
            .filter(|(j, _)| *j != source)
            .map(|(_, t)| t);

        merge::cascade_into(others, &reference, map)
    }

    /// Merge several datasets into one. The inputs are not modified.
    ///
    /// Target tables merge into one, with duplicate targets detected by
    /// name and position. Array tables merge per `ARRNAME`, with duplicate
    /// stations detected by name and position. Spectral setups sharing an
    /// `INSNAME` must be identical, and one of them is kept. Identifier
    /// changes are cascaded into each input's referring tables, which are
    /// then concatenated per extension and linkage.
    pub fn merge(
        datasets: &[Dataset],
        options: &MergeOptions,
        nb: &mut dyn NotificationBackend,
    ) -> Result<Dataset> {
        if datasets.is_empty() {
            return Err(OiError::NoInputs);
        }

        let mut work = datasets.to_vec();
        let mut out = Dataset::new();

        // target catalogs

        let mut sources = Vec::new();

        for (k, d) in work.iter().enumerate() {
            let found = d.indices_of(TableKind::Target);

            if found.len() > 1 {
                return Err(OiError::AmbiguousReference(format!(
                    "input dataset {} holds {} OI_TARGET tables",
                    k,
                    found.len()
                )));
            }

            if let Some(&i) = found.first() {
                sources.push((k, i));
            }
        }

        if !sources.is_empty() {
            let merged = if options.deduplicate {
                let equal = merge::same_target(options.target_tolerance_deg());
                merge_group(&work, &sources, "TARGET_ID", equal)?
            } else {
                merge_group(&work, &sources, "TARGET_ID", merge::never_equal)?
            };

            out.push(finish_group(&mut work, &sources, merged, "TARGET_ID", nb)?);
        }

        // station arrays, per ARRNAME

        for (_, sources) in group_by_card(&work, TableKind::Array, "ARRNAME")? {
            let merged = if options.deduplicate {
                let equal = merge::same_station(options.station_tolerance);
                merge_group(&work, &sources, "STA_INDEX", equal)?
            } else {
                merge_group(&work, &sources, "STA_INDEX", merge::never_equal)?
            };

            out.push(finish_group(&mut work, &sources, merged, "STA_INDEX", nb)?);
        }

        // spectral setups, per INSNAME

        for (name, sources) in group_by_card(&work, TableKind::Wavelength, "INSNAME")? {
            let (k0, i0) = sources[0];
            let first = &work[k0].tables[i0];

            for &(k, i) in &sources[1..] {
                if !work[k].tables[i].same_content(first) {
                    return Err(OiError::InconsistentReference {
                        extname: first.extname().to_owned(),
                        name,
                    });
                }
            }

            // same content, so the richest revision is kept
            let kept = sources
                .iter()
                .rev()
                .map(|&(k, i)| &work[k].tables[i])
                .max_by_key(|t| t.revision())
                .unwrap_or(first);

            out.push(kept.clone());
        }

        // everything else, per extension and linkage

        let mut groups: Vec<(String, Vec<(usize, usize)>)> = Vec::new();

        for (k, d) in work.iter().enumerate() {
            for (i, t) in d.tables.iter().enumerate() {
                if t.kind().is_reference() {
                    continue;
                }

                let key = group_key(t);

                match groups.iter_mut().find(|(g, _)| *g == key) {
                    Some((_, members)) => members.push((k, i)),
                    None => groups.push((key, vec![(k, i)])),
                }
            }
        }

        for (_, sources) in groups {
            let inputs: Vec<&Table> = sources.iter().map(|&(k, i)| &work[k].tables[i]).collect();
            let merged = merge::merge(&inputs, None, merge::never_equal)?;

            oi_note!(
                nb,
                "concatenated {} {} tables into {} rows",
                inputs.len(),
                merged.table.extname(),
                merged.table.n_rows()
            );

            out.push(merged.table);
        }

        Ok(out)
    }
}

fn merge_group<F>(
    work: &[Dataset],
    sources: &[(usize, usize)],
    identifier: &str,
    equal: F,
) -> Result<Merged>
where
    F: FnMut(&Row, &Row) -> bool,
{
    let inputs: Vec<&Table> = sources.iter().map(|&(k, i)| &work[k].tables[i]).collect();
    merge::merge(&inputs, Some(identifier), equal)
}

/// Cascade the identifier maps of a merged group into each input dataset
/// and report what happened.
fn finish_group(
    work: &mut [Dataset],
    sources: &[(usize, usize)],
    merged: Merged,
    identifier: &str,
    nb: &mut dyn NotificationBackend,
) -> Result<Table> {
    for (&(k, i), map) in sources.iter().zip(&merged.id_maps) {
        let changed = work[k].cascade_from(i, map)?;

        if !map.is_empty() {
            oi_note!(
                nb,
                "input dataset {}: renumbered {} {} value(s), rewriting {} reference(s)",
                k,
                map.len(),
                identifier,
                changed
            );
        }
    }

    oi_note!(
        nb,
        "merged {} {} tables into {} rows ({} duplicate(s) dropped)",
        sources.len(),
        merged.table.extname(),
        merged.table.n_rows(),
        merged.duplicates
    );

    Ok(merged.table)
}

/// Group the tables of one kind across datasets by the value of a card, in
/// order of first appearance. A dataset may hold only one table per value.
fn group_by_card(
    work: &[Dataset],
    kind: TableKind,
    card: &str,
) -> Result<Vec<(String, Vec<(usize, usize)>)>> {
    let mut groups: Vec<(String, Vec<(usize, usize)>)> = Vec::new();

    for (k, d) in work.iter().enumerate() {
        for i in d.indices_of(kind) {
            let name = d.tables[i]
                .header()
                .get_str(card)
                .unwrap_or("")
                .trim_end()
                .to_owned();

            match groups.iter_mut().find(|(g, _)| *g == name) {
                Some((_, members)) => {
                    if members.iter().any(|&(j, _)| j == k) {
                        return Err(OiError::AmbiguousReference(format!(
                            "input dataset {k} holds several {} tables with {card} {name:?}",
                            kind.extname()
                        )));
                    }

                    members.push((k, i));
                }
                None => groups.push((name, vec![(k, i)])),
            }
        }
    }

    Ok(groups)
}

fn group_key(t: &Table) -> String {
    let mut key = t.extname().to_owned();

    for card in LINKAGE_CARDS {
        key.push('|');

        if let Some(v) = t.header().get_str(card) {
            key.push_str(v.trim_end());
        }
    }

    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;
    use crate::revision;
    use crate::testing::*;
    use oitab_core::notify::{BufferingNotificationBackend, NotificationKind};

    fn observation(
        targets: &[(i16, &str, f64, f64)],
        stations: &[(i16, &str)],
        target_ids: &[i16],
        sta: &[i16],
    ) -> Dataset {
        Dataset::from_tables(vec![
            target_table(2, targets),
            array_table("VLTI", stations),
            wavelength_table("SPEC", 3),
            flux_table("SPEC", Some("VLTI"), target_ids, Some(sta), 3),
        ])
    }

    fn ids(t: &Table, column: &str) -> Vec<i64> {
        t.int_values(column).unwrap().iter().copied().collect()
    }

    #[test]
    fn clean_dataset() {
        let mut d = observation(&[(1, "X", 10., 20.)], &[(1, "A0")], &[1, 1], &[1, 1]);
        let mut nb = BufferingNotificationBackend::new();

        let report = d.verify(&VerifyOptions::default().strict(), &mut nb).unwrap();
        assert!(report.is_empty());
        assert!(nb.is_empty());
        assert_eq!(d.n_channels(&d.tables()[3]), Some(3));
    }

    #[test]
    fn broken_references() {
        let mut d = observation(&[(1, "X", 10., 20.)], &[(1, "A0")], &[1, 9], &[1, 1]);
        let mut nb = BufferingNotificationBackend::new();

        let report = d.verify(&VerifyOptions::default(), &mut nb).unwrap();
        assert_eq!(report.unfixed(), 1);
        assert!(report.entries[0].1.message.contains("TARGET_ID"));
        assert!(report.entries[0].1.message.ends_with(": 9"));
        assert_eq!(nb.count(NotificationKind::Severe), 1);

        let mut nb = BufferingNotificationBackend::new();
        let r = d.verify(&VerifyOptions::default().strict(), &mut nb);
        assert!(matches!(r, Err(OiError::Core(CoreError::UnfixedFindings(1)))));
    }

    #[test]
    fn missing_setup_and_channel_count() {
        let mut d = Dataset::from_tables(vec![
            target_table(2, &[(1, "X", 10., 20.)]),
            flux_table("SPEC", None, &[1], None, 3),
        ]);
        let mut nb = BufferingNotificationBackend::new();
        let report = d.verify(&VerifyOptions::default(), &mut nb).unwrap();
        assert_eq!(report.unfixed(), 1);
        assert!(report.entries[0].1.message.contains("OI_WAVELENGTH"));

        d.push(wavelength_table("SPEC", 4));
        let report = d.verify(&VerifyOptions::default(), &mut nb).unwrap();
        assert_eq!(report.unfixed(), 3);
    }

    #[test]
    fn repairs_are_notes() {
        let mut d = observation(&[(1, "X", 10., 20.)], &[(1, "A0")], &[1], &[1]);
        d.tables_mut()[0]
            .push_column(Column::new("COMMENT", vec!["hi"]))
            .unwrap();
        let mut nb = BufferingNotificationBackend::new();

        let report = d.verify(&VerifyOptions::default(), &mut nb).unwrap();
        assert_eq!(report.fixed(), 1);
        assert_eq!(nb.count(NotificationKind::Note), 1);
        assert!(d.tables()[0].has_column("NS_COMMENT"));

        let mut nb = BufferingNotificationBackend::new();
        let mut d = observation(&[(1, "X", 10., 20.)], &[(1, "A0")], &[1], &[1]);
        d.tables_mut()[0]
            .push_column(Column::new("COMMENT", vec!["hi"]))
            .unwrap();
        let report = d.verify(&VerifyOptions::default().report_only(), &mut nb).unwrap();
        assert_eq!(report.fixed(), 0);
        assert_eq!(nb.count(NotificationKind::Warning), 1);
    }

    #[test]
    fn ambiguous_targets() {
        let mut d = observation(&[(1, "X", 10., 20.)], &[(1, "A0")], &[1], &[1]);
        d.push(target_table(2, &[(1, "Y", 10., 20.)]));
        let mut nb = BufferingNotificationBackend::new();

        let report = d.verify(&VerifyOptions::default(), &mut nb).unwrap();
        assert_eq!(report.unfixed(), 2);
        assert!(Dataset::merge(&[d], &MergeOptions::default(), &mut nb).is_err());
    }

    #[test]
    fn target_fields() {
        let d = observation(
            &[(1, "X", 10., 20.), (2, "Y", 30., 40.)],
            &[(1, "A0")],
            &[2, 1, 5],
            &[1, 1, 1],
        );
        let names = d
            .target_field(&d.tables()[3], "TARGET", Value::from("?"))
            .unwrap();
        assert_eq!(names, vec![Value::from("Y"), Value::from("X"), Value::from("?")]);

        let bare = Dataset::from_tables(vec![flux_table("SPEC", None, &[1, 2], None, 2)]);
        let ra = bare
            .target_field(&bare.tables()[0], "RAEP0", Value::Float(0.))
            .unwrap();
        assert_eq!(ra, vec![Value::Float(0.), Value::Float(0.)]);
    }

    #[test]
    fn merging_distinct_observations() {
        let a = observation(&[(1, "X", 10., 20.)], &[(1, "A0")], &[1, 1], &[1, 1]);
        let b = observation(&[(1, "Y", 30., 40.)], &[(1, "B2")], &[1], &[1]);
        let mut nb = BufferingNotificationBackend::new();

        let mut m =
            Dataset::merge(&[a.clone(), b.clone()], &MergeOptions::default(), &mut nb).unwrap();
        assert_eq!(m.len(), 4);

        let targets = m.target_table().unwrap();
        assert_eq!(ids(targets, "TARGET_ID"), vec![1, 2]);
        assert_eq!(ids(m.array_table("VLTI").unwrap(), "STA_INDEX"), vec![1, 2]);

        let flux = m.tables_of(TableKind::Flux).next().unwrap();
        assert_eq!(flux.n_rows(), 3);
        assert_eq!(ids(flux, "TARGET_ID"), vec![1, 1, 2]);
        assert_eq!(ids(flux, "STA_INDEX"), vec![1, 1, 2]);

        let report = m.verify(&VerifyOptions::default().strict(), &mut nb).unwrap();
        assert!(report.is_empty());

        // inputs are untouched
        assert_eq!(ids(&b.tables()[3], "TARGET_ID"), vec![1]);
    }

    #[test]
    fn merging_shared_targets() {
        let a = observation(&[(1, "X", 10., 20.)], &[(1, "A0")], &[1], &[1]);
        let b = observation(
            &[(3, "Y", 30., 40.), (4, "X", 10., 20.)],
            &[(1, "A0")],
            &[4, 3],
            &[1, 1],
        );
        let mut nb = BufferingNotificationBackend::new();

        let m = Dataset::merge(&[a, b], &MergeOptions::default(), &mut nb).unwrap();
        let targets = m.target_table().unwrap();
        assert_eq!(ids(targets, "TARGET_ID"), vec![1, 3]);
        assert_eq!(m.array_table("VLTI").unwrap().n_rows(), 1);

        let flux = m.tables_of(TableKind::Flux).next().unwrap();
        assert_eq!(ids(flux, "TARGET_ID"), vec![1, 1, 3]);
        assert!(nb.count(NotificationKind::Note) >= 3);

        let names = m.target_field(flux, "TARGET", Value::from("?")).unwrap();
        assert_eq!(names[1], Value::from("X"));
    }

    #[test]
    fn merging_without_deduplication() {
        let a = observation(&[(1, "X", 10., 20.)], &[(1, "A0")], &[1], &[1]);
        let b = observation(&[(1, "X", 10., 20.)], &[(1, "A0")], &[1], &[1]);
        let mut nb = BufferingNotificationBackend::new();

        let options = MergeOptions::default().deduplicate(false);
        let m = Dataset::merge(&[a, b], &options, &mut nb).unwrap();
        assert_eq!(ids(m.target_table().unwrap(), "TARGET_ID"), vec![1, 2]);

        let flux = m.tables_of(TableKind::Flux).next().unwrap();
        assert_eq!(ids(flux, "TARGET_ID"), vec![1, 2]);
        assert_eq!(ids(flux, "STA_INDEX"), vec![1, 2]);
    }

    #[test]
    fn conflicting_setups() {
        let a = observation(&[(1, "X", 10., 20.)], &[(1, "A0")], &[1], &[1]);
        let mut b = Dataset::from_tables(vec![
            target_table(2, &[(1, "X", 10., 20.)]),
            wavelength_table("SPEC", 4),
        ]);
        let mut nb = BufferingNotificationBackend::new();

        assert!(matches!(
            Dataset::merge(&[a.clone(), b.clone()], &MergeOptions::default(), &mut nb),
            Err(OiError::InconsistentReference { .. })
        ));

        b.tables_mut()[1] = wavelength_table("OTHER", 4);
        let m = Dataset::merge(&[a, b], &MergeOptions::default(), &mut nb).unwrap();
        assert_eq!(m.tables_of(TableKind::Wavelength).count(), 2);
        assert!(m.wavelength_table("OTHER").is_some());

        assert!(matches!(
            Dataset::merge(&[], &MergeOptions::default(), &mut nb),
            Err(OiError::NoInputs)
        ));
    }

    #[test]
    fn shared_setup_keeps_highest_revision() {
        let mut a = observation(&[(1, "X", 10., 20.)], &[(1, "A0")], &[1], &[1]);
        let b = observation(&[(1, "X", 10., 20.)], &[(1, "A0")], &[1], &[1]);
        a.tables_mut()[2] = revision::convert(&b.tables()[2], 1).unwrap();
        assert_eq!(a.tables()[2].revision(), 1);

        let mut nb = BufferingNotificationBackend::new();
        let m = Dataset::merge(&[a, b], &MergeOptions::default(), &mut nb).unwrap();
        let setups: Vec<_> = m.tables_of(TableKind::Wavelength).collect();
        assert_eq!(setups.len(), 1);
        assert_eq!(setups[0].revision(), 2);
    }

    #[test]
    fn padded_linkage_names_merge() {
        let a = observation(&[(1, "X", 10., 20.)], &[(1, "A0")], &[1], &[1]);
        let b = Dataset::from_tables(vec![
            target_table(2, &[(1, "X", 10., 20.)]),
            array_table("VLTI    ", &[(1, "A0")]),
            wavelength_table("SPEC", 3),
            flux_table("SPEC", Some("VLTI    "), &[1], Some(&[1]), 3),
        ]);

        let mut nb = BufferingNotificationBackend::new();
        let m = Dataset::merge(&[a, b], &MergeOptions::default(), &mut nb).unwrap();
        assert_eq!(m.tables_of(TableKind::Array).count(), 1);
        assert_eq!(m.tables_of(TableKind::Flux).count(), 1);
        assert_eq!(m.array_table("VLTI").unwrap().n_rows(), 1);
    }
}
