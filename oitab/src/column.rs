// Copyright 2026 the oitab developers and collaborators
// Licensed under the MIT License.

/*!
Column storage.

Each column is an `ndarray` array with a dynamic number of dimensions. The
first axis runs over table rows; the remaining axes are the shape of each
cell, so a scalar column is one-dimensional and a column with one value per
spectral channel is two-dimensional.

*/

use ndarray::{ArrayD, Axis, IxDyn, Zip};
use num_complex::Complex;

use crate::errors::CastError;
use crate::value::{cast_value, TypeTag, Value};

/// Typed storage for the contents of a column.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnData {
    Logical(ArrayD<bool>),
    Int16(ArrayD<i16>),
    Int32(ArrayD<i32>),
    Float32(ArrayD<f32>),
    Float64(ArrayD<f64>),
    Complex64(ArrayD<Complex<f32>>),
    Complex128(ArrayD<Complex<f64>>),
    Text { width: usize, values: ArrayD<String> },
}

/// Run an expression on the array inside any variant of ColumnData.
macro_rules! with_array {
    ($data:expr, $a:ident => $body:expr) => {
        match $data {
            ColumnData::Logical($a) => $body,
            ColumnData::Int16($a) => $body,
            ColumnData::Int32($a) => $body,
            ColumnData::Float32($a) => $body,
            ColumnData::Float64($a) => $body,
            ColumnData::Complex64($a) => $body,
            ColumnData::Complex128($a) => $body,
            ColumnData::Text { values: $a, .. } => $body,
        }
    };
}

/// An element type that can live in a column.
trait Element: Clone {
    fn to_value(&self) -> Value;

    /// Convert a value that has already been through [`cast_value`] for this
    /// element's type.
    fn from_cast(value: &Value) -> Self;

    fn placeholder() -> Self;
}

macro_rules! impl_element_int {
    ($ty:ty) => {
        impl Element for $ty {
            fn to_value(&self) -> Value {
                Value::Int(*self as i64)
            }

            fn from_cast(value: &Value) -> Self {
                value.as_i64().unwrap_or(0) as $ty
            }

            fn placeholder() -> Self {
                0
            }
        }
    };
}

macro_rules! impl_element_float {
    ($ty:ty) => {
        impl Element for $ty {
            fn to_value(&self) -> Value {
                Value::Float(*self as f64)
            }

            fn from_cast(value: &Value) -> Self {
                value.as_f64().unwrap_or(0.) as $ty
            }

            fn placeholder() -> Self {
                0.
            }
        }

        impl Element for Complex<$ty> {
            fn to_value(&self) -> Value {
                Value::Complex(Complex::new(self.re as f64, self.im as f64))
            }

            fn from_cast(value: &Value) -> Self {
                match *value {
                    Value::Complex(c) => Complex::new(c.re as $ty, c.im as $ty),
                    _ => Complex::new(0., 0.),
                }
            }

            fn placeholder() -> Self {
                Complex::new(0., 0.)
            }
        }
    };
}

impl_element_int! { i16 }
impl_element_int! { i32 }
impl_element_float! { f32 }
impl_element_float! { f64 }

impl Element for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_cast(value: &Value) -> Self {
        value.as_bool().unwrap_or(false)
    }

    fn placeholder() -> Self {
        false
    }
}

impl Element for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_cast(value: &Value) -> Self {
        value.as_str().unwrap_or("").to_owned()
    }

    fn placeholder() -> Self {
        String::new()
    }
}

fn typed_from<T: Element>(values: &ArrayD<Value>, to: TypeTag) -> Result<ArrayD<T>, CastError> {
    let mut failure = None;

    let typed = values.map(|v| match cast_value(v, to) {
        Ok(c) => T::from_cast(&c),
        Err(e) => {
            if failure.is_none() {
                failure = Some(e);
            }
            T::placeholder()
        }
    });

    match failure {
        Some(e) => Err(e),
        None => Ok(typed),
    }
}

fn set_where<T: Element>(a: &mut ArrayD<T>, mask: &ArrayD<bool>, value: &Value) {
    let v = T::from_cast(value);
    Zip::from(a).and(mask).for_each(|x, &m| {
        if m {
            *x = v.clone();
        }
    });
}

impl ColumnData {
    /// Build a column of type `tag` from an array of values, checking that
    /// every value converts losslessly.
    pub fn from_values(tag: TypeTag, values: &ArrayD<Value>) -> Result<ColumnData, CastError> {
        Ok(match tag {
            TypeTag::Logical => ColumnData::Logical(typed_from(values, tag)?),
            TypeTag::Int16 => ColumnData::Int16(typed_from(values, tag)?),
            TypeTag::Int32 => ColumnData::Int32(typed_from(values, tag)?),
            TypeTag::Float32 => ColumnData::Float32(typed_from(values, tag)?),
            TypeTag::Float64 => ColumnData::Float64(typed_from(values, tag)?),
            TypeTag::Complex64 => ColumnData::Complex64(typed_from(values, tag)?),
            TypeTag::Complex128 => ColumnData::Complex128(typed_from(values, tag)?),
            TypeTag::Text(width) => ColumnData::Text {
                width,
                values: typed_from(values, tag)?,
            },
        })
    }

    /// Build a column of the given full shape (rows first) with every element
    /// set to `fill`.
    pub fn filled(tag: TypeTag, shape: &[usize], fill: &Value) -> Result<ColumnData, CastError> {
        let values = ArrayD::from_elem(IxDyn(shape), fill.clone());
        Self::from_values(tag, &values)
    }

    /// Build a text column whose width is that of its longest string.
    pub fn text(values: ArrayD<String>) -> ColumnData {
        let width = values.iter().map(|s| s.chars().count()).max().unwrap_or(1).max(1);
        ColumnData::Text { width, values }
    }

    pub fn type_tag(&self) -> TypeTag {
        match self {
            ColumnData::Logical(_) => TypeTag::Logical,
            ColumnData::Int16(_) => TypeTag::Int16,
            ColumnData::Int32(_) => TypeTag::Int32,
            ColumnData::Float32(_) => TypeTag::Float32,
            ColumnData::Float64(_) => TypeTag::Float64,
            ColumnData::Complex64(_) => TypeTag::Complex64,
            ColumnData::Complex128(_) => TypeTag::Complex128,
            ColumnData::Text { width, .. } => TypeTag::Text(*width),
        }
    }

    /// The full shape, rows first.
    pub fn shape(&self) -> &[usize] {
        with_array!(self, a => a.shape())
    }

    pub fn n_rows(&self) -> usize {
        self.shape().first().copied().unwrap_or(0)
    }

    /// The shape of a single cell.
    pub fn cell_shape(&self) -> &[usize] {
        let shape = self.shape();
        if shape.is_empty() {
            shape
        } else {
            &shape[1..]
        }
    }

    /// All elements as values, keeping the shape.
    pub fn to_values(&self) -> ArrayD<Value> {
        with_array!(self, a => a.map(|x| x.to_value()))
    }

    /// The cell at row `row` as values.
    pub fn cell(&self, row: usize) -> ArrayD<Value> {
        with_array!(self, a => a.index_axis(Axis(0), row).map(|x| x.to_value()))
    }

    /// Convert to another column type without losing information.
    pub fn cast(&self, to: TypeTag) -> Result<ColumnData, CastError> {
        Self::from_values(to, &self.to_values())
    }

    /// A new column holding only the given rows, in the given order.
    pub fn select_rows(&self, rows: &[usize]) -> ColumnData {
        match self {
            ColumnData::Logical(a) => ColumnData::Logical(a.select(Axis(0), rows)),
            ColumnData::Int16(a) => ColumnData::Int16(a.select(Axis(0), rows)),
            ColumnData::Int32(a) => ColumnData::Int32(a.select(Axis(0), rows)),
            ColumnData::Float32(a) => ColumnData::Float32(a.select(Axis(0), rows)),
            ColumnData::Float64(a) => ColumnData::Float64(a.select(Axis(0), rows)),
            ColumnData::Complex64(a) => ColumnData::Complex64(a.select(Axis(0), rows)),
            ColumnData::Complex128(a) => ColumnData::Complex128(a.select(Axis(0), rows)),
            ColumnData::Text { width, values } => ColumnData::Text {
                width: *width,
                values: values.select(Axis(0), rows),
            },
        }
    }

    /// Overwrite the elements where `mask` is true. `value` must already be
    /// castable to this column's type.
    pub fn set_where(&mut self, mask: &ArrayD<bool>, value: &Value) -> Result<(), CastError> {
        let value = cast_value(value, self.type_tag())?;
        with_array!(self, a => set_where(a, mask, &value));
        Ok(())
    }
}

macro_rules! impl_from_array {
    ($ty:ty, $variant:ident) => {
        impl From<ArrayD<$ty>> for ColumnData {
            fn from(a: ArrayD<$ty>) -> Self {
                ColumnData::$variant(a)
            }
        }

        impl From<Vec<$ty>> for ColumnData {
            fn from(v: Vec<$ty>) -> Self {
                ColumnData::$variant(ndarray::Array1::from(v).into_dyn())
            }
        }
    };
}

impl_from_array! { bool, Logical }
impl_from_array! { i16, Int16 }
impl_from_array! { i32, Int32 }
impl_from_array! { f32, Float32 }
impl_from_array! { f64, Float64 }
impl_from_array! { Complex<f32>, Complex64 }
impl_from_array! { Complex<f64>, Complex128 }

impl From<Vec<&str>> for ColumnData {
    fn from(v: Vec<&str>) -> Self {
        let strings: Vec<String> = v.into_iter().map(|s| s.to_owned()).collect();
        ColumnData::text(ndarray::Array1::from(strings).into_dyn())
    }
}

/// A named column with its unit metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub name: String,
    pub unit: Option<String>,
    pub data: ColumnData,
}

impl Column {
    pub fn new<D: Into<ColumnData>>(name: &str, data: D) -> Self {
        Column {
            name: name.to_owned(),
            unit: None,
            data: data.into(),
        }
    }

    /// Builder-style unit setter.
    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_owned());
        self
    }

    /// The unit, with an empty string treated as no unit.
    pub fn unit(&self) -> Option<&str> {
        match self.unit.as_deref() {
            Some("") | None => None,
            Some(u) => Some(u),
        }
    }
}
