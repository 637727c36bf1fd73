// Copyright 2026 the oitab developers and collaborators
// Licensed under the MIT License.

/*!
Scalar values and the primitive column types of the container format.

A [`TypeTag`] names one of the binary-table storage types. A [`Value`] is a
single scalar as seen by validators, header cards, defaults and row views.
Conversions between them are lossless or fail: [`cast_value`] never rounds
or truncates.

*/

use num_complex::Complex;
use std::fmt;

use crate::errors::CastError;

/// A binary-table column storage type.
///
/// Two tags are equal only if both the kind and the size agree, so that a
/// 4-byte float column does not satisfy a schema asking for 8-byte floats.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TypeTag {
    /// Boolean (FITS `L`).
    Logical,

    /// 2-byte signed integer (FITS `I`).
    Int16,

    /// 4-byte signed integer (FITS `J`).
    Int32,

    /// 4-byte float (FITS `E`).
    Float32,

    /// 8-byte float (FITS `D`).
    Float64,

    /// 8-byte complex, a pair of 4-byte floats (FITS `C`).
    Complex64,

    /// 16-byte complex, a pair of 8-byte floats (FITS `M`).
    Complex128,

    /// Fixed-width character string (FITS `A`), width in characters.
    Text(usize),
}

impl TypeTag {
    /// Get the size of a single element of this type, in bytes.
    pub fn size(&self) -> usize {
        match *self {
            TypeTag::Logical => 1,
            TypeTag::Int16 => 2,
            TypeTag::Int32 => 4,
            TypeTag::Float32 => 4,
            TypeTag::Float64 => 8,
            TypeTag::Complex64 => 8,
            TypeTag::Complex128 => 16,
            TypeTag::Text(width) => width,
        }
    }

    /// The FITS binary table format letter.
    pub fn format_code(&self) -> char {
        match *self {
            TypeTag::Logical => 'L',
            TypeTag::Int16 => 'I',
            TypeTag::Int32 => 'J',
            TypeTag::Float32 => 'E',
            TypeTag::Float64 => 'D',
            TypeTag::Complex64 => 'C',
            TypeTag::Complex128 => 'M',
            TypeTag::Text(_) => 'A',
        }
    }

    /// The FITS `TFORM` value for a column of this type with the given
    /// cell shape.
    pub fn tform(&self, cell_shape: &[usize]) -> String {
        let n: usize = cell_shape.iter().product();

        match *self {
            TypeTag::Text(width) => format!("{}A", width * n),
            _ => format!("{}{}", n, self.format_code()),
        }
    }

    /// The largest integer this type can hold, if it is an integer type.
    pub fn max_integer(&self) -> Option<i64> {
        match *self {
            TypeTag::Int16 => Some(i16::MAX as i64),
            TypeTag::Int32 => Some(i32::MAX as i64),
            _ => None,
        }
    }

    /// The value used to fill cells that have no better default.
    pub fn zero(&self) -> Value {
        match *self {
            TypeTag::Logical => Value::Bool(false),
            TypeTag::Int16 | TypeTag::Int32 => Value::Int(0),
            TypeTag::Float32 | TypeTag::Float64 => Value::Float(0.),
            TypeTag::Complex64 | TypeTag::Complex128 => Value::Complex(Complex::new(0., 0.)),
            TypeTag::Text(_) => Value::Text(String::new()),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            TypeTag::Logical => f.pad("boolean"),
            TypeTag::Int16 | TypeTag::Int32 => f.pad(&format!("{}-bytes int", self.size())),
            TypeTag::Float32 | TypeTag::Float64 => {
                f.pad(&format!("{}-bytes float", self.size()))
            }
            TypeTag::Complex64 | TypeTag::Complex128 => {
                f.pad(&format!("{}-bytes complex", self.size()))
            }
            TypeTag::Text(1) => f.pad("1-byte string"),
            TypeTag::Text(w) => f.pad(&format!("{w}-bytes string")),
        }
    }
}

/// A single scalar value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Complex(Complex<f64>),
    Text(String),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Int(n) => Some(n),
            _ => None,
        }
    }

    /// Get a real number out of a numeric value. Booleans and complex
    /// numbers are not considered numeric here.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Int(n) => Some(n as f64),
            Value::Float(x) => Some(x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The integer this value denotes exactly, if any.
    fn exact_integer(&self) -> Option<i64> {
        match *self {
            Value::Bool(b) => Some(b as i64),
            Value::Int(n) => Some(n),
            Value::Float(x) => float_to_integer(x),
            Value::Complex(c) if c.im == 0. => float_to_integer(c.re),
            _ => None,
        }
    }

    /// The real number this value denotes exactly, if any.
    fn exact_real(&self) -> Option<f64> {
        match *self {
            Value::Bool(b) => Some(b as i64 as f64),
            Value::Int(n) => {
                let x = n as f64;
                if float_to_integer(x) == Some(n) {
                    Some(x)
                } else {
                    None
                }
            }
            Value::Float(x) => Some(x),
            Value::Complex(c) if c.im == 0. => Some(c.re),
            _ => None,
        }
    }

    fn exact_complex(&self) -> Option<Complex<f64>> {
        match *self {
            Value::Complex(c) => Some(c),
            _ => self.exact_real().map(|re| Complex::new(re, 0.)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Bool(true) => f.write_str("T"),
            Value::Bool(false) => f.write_str("F"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Complex(c) => write!(f, "{}{:+}j", c.re, c.im),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// A compile-time constant value, used for defaults in static schema data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(&'static str),
}

impl Literal {
    pub fn to_value(&self) -> Value {
        match *self {
            Literal::Bool(b) => Value::Bool(b),
            Literal::Int(n) => Value::Int(n),
            Literal::Float(x) => Value::Float(x),
            Literal::Text(s) => Value::Text(s.to_owned()),
        }
    }
}

fn float_to_integer(x: f64) -> Option<i64> {
    // 2^63 is exactly representable; anything at or beyond it is not an i64.
    if x.is_finite() && x.fract() == 0. && x.abs() < 9_223_372_036_854_775_808. {
        Some(x as i64)
    } else {
        None
    }
}

fn fits_f32(x: f64) -> bool {
    x.is_nan() || (x as f32) as f64 == x
}

/// Convert a value so that it can be stored in a column of type `to`.
///
/// The conversion succeeds only if no information is lost: integers must be
/// in range, floats must be exactly representable, complex numbers must have
/// a zero imaginary part to become real, and strings must fit in the column
/// width once trailing blanks are ignored.
pub fn cast_value(value: &Value, to: TypeTag) -> Result<Value, CastError> {
    let fail = || CastError {
        value: value.to_string(),
        to,
    };

    match to {
        TypeTag::Logical => match *value {
            Value::Bool(b) => Ok(Value::Bool(b)),
            Value::Int(0) => Ok(Value::Bool(false)),
            Value::Int(1) => Ok(Value::Bool(true)),
            _ => Err(fail()),
        },

        TypeTag::Int16 | TypeTag::Int32 => {
            let n = value.exact_integer().ok_or_else(fail)?;
            let max = to.max_integer().unwrap_or(i64::MAX);

            if n > max || n < -max - 1 {
                return Err(fail());
            }

            Ok(Value::Int(n))
        }

        TypeTag::Float32 => match value.exact_real() {
            Some(x) if fits_f32(x) => Ok(Value::Float(x)),
            _ => Err(fail()),
        },

        TypeTag::Float64 => value.exact_real().map(Value::Float).ok_or_else(fail),

        TypeTag::Complex64 => match value.exact_complex() {
            Some(c) if fits_f32(c.re) && fits_f32(c.im) => Ok(Value::Complex(c)),
            _ => Err(fail()),
        },

        TypeTag::Complex128 => value.exact_complex().map(Value::Complex).ok_or_else(fail),

        TypeTag::Text(width) => match value {
            Value::Text(s) if s.chars().count() <= width => Ok(Value::Text(s.clone())),
            Value::Text(s) if s.trim_end().chars().count() <= width => {
                Ok(Value::Text(s.trim_end().to_owned()))
            }
            _ => Err(fail()),
        },
    }
}
