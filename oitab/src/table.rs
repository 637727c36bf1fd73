// Copyright 2026 the oitab developers and collaborators
// Licensed under the MIT License.

/*!
Tables: a schema, a header and a set of columns.

A [`Table`] owns its header and column data and holds a shared reference to
the immutable [`Schema`] that says what the table ought to look like. Nothing
here enforces the schema beyond basic structural sanity (unique column names,
a common row count); that is the job of [`crate::verify`].

*/

use ndarray::{ArrayD, IxDyn};
use oitab_core::CoreError;
use std::fmt;

use crate::column::{Column, ColumnData};
use crate::errors::{OiError, Result};
use crate::header::Header;
use crate::merge::IdMap;
use crate::schema::{self, Dim, Schema, TableKind, LINKAGE_CARDS};
use crate::value::{TypeTag, Value};

/// A table instance.
#[derive(Clone, Debug)]
pub struct Table {
    schema: &'static Schema,
    header: Header,
    columns: Vec<Column>,
}

impl Table {
    /// Create an empty table following `schema`, with its mandatory header
    /// cards filled in where the schema gives defaults.
    pub fn new(schema: &'static Schema) -> Table {
        let mut table = Table {
            schema,
            header: Header::new(),
            columns: Vec::new(),
        };
        table.synthesize_cards();
        table
    }

    /// Build a table from raw columns.
    ///
    /// `EXTNAME`, `OI_REVN` and any required card that has a default are
    /// added to the header if missing. A column whose storage type differs
    /// from its declared type is converted when that can be done without
    /// loss; otherwise it is kept as-is for verification to report. Columns
    /// without unit metadata take the declared unit.
    pub fn from_columns(
        extname: &str,
        revision: u8,
        header: Header,
        columns: Vec<Column>,
    ) -> Result<Table> {
        let schema = schema::lookup(extname, revision)?;
        let mut table = Table {
            schema,
            header,
            columns: Vec::with_capacity(columns.len()),
        };

        for mut column in columns {
            if let Some(desc) = schema.column(&column.name) {
                if column.data.type_tag() != desc.type_ {
                    if let Ok(data) = column.data.cast(desc.type_) {
                        column.data = data;
                    }
                }

                if column.unit.is_none() {
                    column.unit = desc.unit.declared().map(|u| u.to_owned());
                }
            }

            table.push_column(column)?;
        }

        table.synthesize_cards();
        Ok(table)
    }

    /// Assemble a table from parts that are already known to be consistent.
    pub(crate) fn from_parts(
        schema: &'static Schema,
        header: Header,
        columns: Vec<Column>,
    ) -> Table {
        Table {
            schema,
            header,
            columns,
        }
    }

    fn synthesize_cards(&mut self) {
        self.header.set("EXTNAME", self.schema.extname());

        for card in self.schema.cards() {
            if self.header.contains(card.name) {
                continue;
            }

            let value = if card.name == "OI_REVN" {
                Some(Value::Int(self.schema.revision as i64))
            } else if card.required {
                card.default_value()
            } else {
                None
            };

            if let Some(v) = value {
                self.header.set_with_comment(card.name, v, card.comment);
            }
        }
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    pub fn kind(&self) -> TableKind {
        self.schema.kind
    }

    pub fn extname(&self) -> &'static str {
        self.schema.extname()
    }

    pub fn revision(&self) -> u8 {
        self.schema.revision
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub(crate) fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.data.n_rows())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.get_column(name).is_some()
    }

    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Look up a column, failing if it does not exist.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.get_column(name).ok_or_else(|| OiError::NoSuchColumn {
            extname: self.extname().to_owned(),
            column: name.to_owned(),
        })
    }

    pub(crate) fn column_mut(&mut self, name: &str) -> Result<&mut Column> {
        let extname = self.extname();

        self.columns
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| OiError::NoSuchColumn {
                extname: extname.to_owned(),
                column: name.to_owned(),
            })
    }

    fn unexpected(&self, column: &Column, expected: &'static str) -> OiError {
        OiError::UnexpectedType {
            extname: self.extname().to_owned(),
            column: column.name.clone(),
            expected,
            found: column.data.type_tag(),
        }
    }

    /// The values of an integer column.
    pub fn int_values(&self, name: &str) -> Result<ArrayD<i64>> {
        let column = self.column(name)?;

        match &column.data {
            ColumnData::Int16(a) => Ok(a.mapv(i64::from)),
            ColumnData::Int32(a) => Ok(a.mapv(i64::from)),
            _ => Err(self.unexpected(column, "integer")),
        }
    }

    /// The values of a real-valued column. Integer columns are accepted too.
    pub fn float_values(&self, name: &str) -> Result<ArrayD<f64>> {
        let column = self.column(name)?;

        match &column.data {
            ColumnData::Float32(a) => Ok(a.mapv(f64::from)),
            ColumnData::Float64(a) => Ok(a.clone()),
            ColumnData::Int16(a) => Ok(a.mapv(f64::from)),
            ColumnData::Int32(a) => Ok(a.mapv(f64::from)),
            _ => Err(self.unexpected(column, "real")),
        }
    }

    pub fn text_values(&self, name: &str) -> Result<ArrayD<String>> {
        let column = self.column(name)?;

        match &column.data {
            ColumnData::Text { values, .. } => Ok(values.clone()),
            _ => Err(self.unexpected(column, "string")),
        }
    }

    /// Append a column. Its name must be new and its row count must match
    /// the table's.
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        if self.has_column(&column.name) {
            return Err(OiError::DuplicateColumn(column.name));
        }

        if !self.columns.is_empty() && column.data.n_rows() != self.n_rows() {
            return Err(OiError::RowCountMismatch {
                column: column.name,
                expected: self.n_rows(),
                found: column.data.n_rows(),
            });
        }

        self.columns.push(column);
        Ok(())
    }

    /// Replace a column of the same name, or append it if there is none.
    pub fn set_column(&mut self, column: Column) -> Result<()> {
        let expected = self
            .columns
            .iter()
            .find(|c| c.name != column.name)
            .map(|c| c.data.n_rows());

        if let Some(n) = expected {
            if n != column.data.n_rows() {
                return Err(OiError::RowCountMismatch {
                    column: column.name,
                    expected: n,
                    found: column.data.n_rows(),
                });
            }
        }

        match self.columns.iter_mut().find(|c| c.name == column.name) {
            Some(slot) => *slot = column,
            None => self.columns.push(column),
        }

        Ok(())
    }

    pub fn remove_column(&mut self, name: &str) -> Option<Column> {
        let index = self.columns.iter().position(|c| c.name == name)?;
        Some(self.columns.remove(index))
    }

    /// Rename columns, given `(old, new)` pairs. Either every rename happens
    /// or none does.
    pub fn rename_columns(&mut self, renames: &[(&str, &str)]) -> Result<()> {
        let mut names: Vec<String> = self.columns.iter().map(|c| c.name.clone()).collect();

        for &(old, new) in renames {
            let slot = names
                .iter_mut()
                .find(|n| n.as_str() == old)
                .ok_or_else(|| OiError::NoSuchColumn {
                    extname: self.extname().to_owned(),
                    column: old.to_owned(),
                })?;
            *slot = new.to_owned();
        }

        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(OiError::DuplicateColumn(name.clone()));
            }
        }

        for (column, name) in self.columns.iter_mut().zip(names) {
            column.name = name;
        }

        Ok(())
    }

    /// A view of one row.
    pub fn row(&self, index: usize) -> Row<'_> {
        Row { table: self, index }
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        (0..self.n_rows()).map(move |i| self.row(i))
    }

    /// The number of spectral channels, as seen from the channel-shaped
    /// columns present in the data.
    pub fn n_channels(&self) -> Option<usize> {
        self.schema.columns_with_shape_token(Dim::Channels).iter().find_map(|desc| {
            let column = self.get_column(desc.name)?;
            let axis = desc.shape.iter().position(|d| *d == Dim::Channels)?;
            column.data.cell_shape().get(axis).copied()
        })
    }

    /// Rows, then channels if the table has channel-shaped data.
    pub fn data_shape(&self) -> Vec<usize> {
        match self.n_channels() {
            Some(w) => vec![self.n_rows(), w],
            None => vec![self.n_rows()],
        }
    }

    /// Set every channel-shaped numeric column to zero. Flags are left
    /// alone.
    pub fn zero(&mut self) -> Result<()> {
        for desc in self.schema.columns_with_shape_token(Dim::Channels) {
            if desc.type_ == TypeTag::Logical {
                continue;
            }

            if let Some(column) = self.columns.iter_mut().find(|c| c.name == desc.name) {
                let tag = column.data.type_tag();
                let shape = column.data.shape().to_vec();
                column.data = ColumnData::filled(tag, &shape, &tag.zero())
                    .map_err(|e| OiError::cast(desc.name, e))?;
            }
        }

        Ok(())
    }

    /// Whether two tables hold the same data: same extension, same linkage
    /// cards, and the same columns with equal contents and units.
    pub fn same_content(&self, other: &Table) -> bool {
        if self.extname() != other.extname() || self.n_columns() != other.n_columns() {
            return false;
        }

        let linked = LINKAGE_CARDS
            .iter()
            .all(|card| match (self.header.get(card), other.header.get(card)) {
                (None, None) => true,
                (Some(a), Some(b)) => same_linkage(a, b),
                _ => false,
            });

        if !linked {
            return false;
        }

        self.columns
            .iter()
            .all(|c| other.get_column(&c.name).map_or(false, |o| o == c))
    }

    /// Whether both tables carry `card` with the same value.
    pub fn linkage_matches(&self, other: &Table, card: &str) -> bool {
        match (self.header.get_str(card), other.header.get_str(card)) {
            (Some(a), Some(b)) => a.trim_end() == b.trim_end(),
            _ => false,
        }
    }

    /// Whether this table refers to `reference`: the schema declares a
    /// relationship to its kind and, if that kind is picked out by a
    /// linkage card, the cards agree.
    pub fn refers_to(&self, reference: &Table) -> bool {
        self.kind().references().iter().any(|r| {
            r.kind == reference.kind()
                && match r.kind.linkage_card() {
                    Some(card) => self.linkage_matches(reference, card),
                    None => true,
                }
        })
    }

    pub fn is_referred_to_by(&self, other: &Table) -> bool {
        other.refers_to(self)
    }

    /// Repeat one value per row across the channel axis, giving an array of
    /// the table's data shape, or a flat one if `flatten` is set.
    pub fn broadcast_rows(&self, per_row: &[Value], flatten: bool) -> Result<ArrayD<Value>> {
        let n = self.n_rows();

        if per_row.len() != n {
            return Err(OiError::RowCountMismatch {
                column: "(broadcast)".to_owned(),
                expected: n,
                found: per_row.len(),
            });
        }

        let w = self.n_channels().unwrap_or(1);

        Ok(if flatten {
            ArrayD::from_shape_fn(IxDyn(&[n * w]), |ix| per_row[ix[0] / w].clone())
        } else {
            ArrayD::from_shape_fn(IxDyn(&[n, w]), |ix| per_row[ix[0]].clone())
        })
    }

    /// Broadcast a scalar column to the data shape.
    pub fn broadcast(&self, name: &str, flatten: bool) -> Result<ArrayD<Value>> {
        let column = self.column(name)?;
        let ndim = column.data.shape().len();

        if ndim != 1 {
            return Err(CoreError::DimensionMismatch {
                expected: 1,
                actual: ndim,
            }
            .into());
        }

        let values: Vec<Value> = column.data.to_values().into_iter().collect();
        self.broadcast_rows(&values, flatten)
    }

    /// Rewrite every value of an integer column that appears as a key of
    /// `map`. All rewrites happen at once, so chains such as `1→2, 2→3` do
    /// not compound. Returns the number of elements changed.
    pub fn remap(&mut self, name: &str, map: &IdMap) -> Result<usize> {
        fn apply<T>(a: &mut ArrayD<T>, map: &IdMap, name: &str) -> Result<usize>
        where
            T: Copy + Into<i64> + TryFrom<i64>,
        {
            let mut updates = Vec::new();

            for (i, &x) in a.iter().enumerate() {
                if let Some(&new) = map.get(&x.into()) {
                    let new = T::try_from(new)
                        .map_err(|_| OiError::IdentifierExhausted(name.to_owned()))?;
                    updates.push((i, new));
                }
            }

            // nothing is written until every new value is known to fit
            let changed = updates.len();
            let mut updates = updates.into_iter().peekable();

            for (i, x) in a.iter_mut().enumerate() {
                if let Some((_, new)) = updates.next_if(|&(j, _)| j == i) {
                    *x = new;
                }
            }

            Ok(changed)
        }

        if map.is_empty() {
            return Ok(0);
        }

        let extname = self.extname();
        let column = self.column_mut(name)?;
        let found = column.data.type_tag();

        match &mut column.data {
            ColumnData::Int16(a) => apply(a, map, name),
            ColumnData::Int32(a) => apply(a, map, name),
            _ => Err(OiError::UnexpectedType {
                extname: extname.to_owned(),
                column: name.to_owned(),
                expected: "integer",
                found,
            }),
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "<{} rev {} ({}C×{}R",
            self.extname(),
            self.revision(),
            self.n_columns(),
            self.n_rows()
        )?;

        if let Some(w) = self.n_channels() {
            write!(f, "×{w}W")?;
        }

        f.write_str(")>")
    }
}

/// Whether two linkage card values name the same thing. Trailing blanks
/// are not significant.
pub(crate) fn same_linkage(a: &Value, b: &Value) -> bool {
    match (a.as_str(), b.as_str()) {
        (Some(a), Some(b)) => a.trim_end() == b.trim_end(),
        _ => a == b,
    }
}

/// A view of one row of a table.
#[derive(Clone, Copy, Debug)]
pub struct Row<'a> {
    table: &'a Table,
    index: usize,
}

impl<'a> Row<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn table(&self) -> &'a Table {
        self.table
    }

    /// The cell in column `name`, with the cell's own shape.
    pub fn cell(&self, name: &str) -> Option<ArrayD<Value>> {
        self.table
            .get_column(name)
            .map(|c| c.data.cell(self.index))
    }

    /// The value in column `name`, if that column holds scalars.
    pub fn get(&self, name: &str) -> Option<Value> {
        let cell = self.cell(name)?;

        if cell.ndim() == 0 {
            cell.first().cloned()
        } else {
            None
        }
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name)?.as_i64()
    }

    pub fn float(&self, name: &str) -> Option<f64> {
        self.get(name)?.as_f64()
    }

    /// A text value with trailing blanks removed.
    pub fn text(&self, name: &str) -> Option<String> {
        match self.get(name)? {
            Value::Text(s) => Some(s.trim_end().to_owned()),
            _ => None,
        }
    }
}
