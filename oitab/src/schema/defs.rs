// Copyright 2026 the oitab developers and collaborators
// Licensed under the MIT License.

//! Column and card tables for the known OIFITS extensions.

use super::{CardDesc, ColumnDesc, Dim, FormatVersion, Schema, TableKind, UnitSpec, NW};
use crate::value::{Literal, TypeTag, Value};

use TypeTag::{Float32 as E, Float64 as D, Int16 as I, Int32 as J, Logical as L};
use UnitSpec::{Any, Exactly, Unitless};

/// Header card strings can hold up to 68 characters.
const CARD_TEXT: TypeTag = TypeTag::Text(68);

const SCALAR: &[Dim] = &[];
const SPECTRAL: &[Dim] = &[NW];
const XYZ: &[Dim] = &[Dim::Fixed(3)];

// Validators

fn is_strictpos(v: &Value) -> bool {
    v.as_f64().map_or(false, |x| x > 0.)
}

fn is_pos(v: &Value) -> bool {
    v.as_f64().map_or(false, |x| x >= 0.)
}

fn is_nonempty(v: &Value) -> bool {
    v.as_str().map_or(false, |s| !s.trim().is_empty())
}

fn is_one_of(v: &Value, allowed: &[&str]) -> bool {
    v.as_str().map_or(false, |s| allowed.contains(&s.trim_end()))
}

fn is_veltyp(v: &Value) -> bool {
    is_one_of(
        v,
        &["LSR", "HELIOCEN", "BARYCENT", "GEOCENTR", "TOPOCENT", "UNKNOWN"],
    )
}

fn is_veldef(v: &Value) -> bool {
    is_one_of(v, &["OPTICAL", "RADIO"])
}

fn is_category(v: &Value) -> bool {
    is_one_of(v, &["SCI", "CAL"])
}

fn is_calstat(v: &Value) -> bool {
    is_one_of(v, &["C", "U"])
}

fn is_fovtype(v: &Value) -> bool {
    is_one_of(v, &["FWHM", "RADIUS"])
}

fn is_frame(v: &Value) -> bool {
    is_one_of(v, &["GEOCENTRIC", "SKY"])
}

fn is_one(v: &Value) -> bool {
    v.as_i64() == Some(1)
}

fn is_two(v: &Value) -> bool {
    v.as_i64() == Some(2)
}

// Revision cards

const REVN_1: &[CardDesc] = &[CardDesc::new(
    "OI_REVN",
    true,
    J,
    Some(is_one),
    Some(Literal::Int(1)),
    "Revision number of the table definition",
)];

const REVN_2: &[CardDesc] = &[CardDesc::new(
    "OI_REVN",
    true,
    J,
    Some(is_two),
    Some(Literal::Int(2)),
    "Revision number of the table definition",
)];

// OI_TARGET

#[rustfmt::skip]
const TARGET_COLUMNS: &[ColumnDesc] = &[
    ColumnDesc::new("TARGET_ID", true, I, SCALAR, Some(is_strictpos), None, Unitless, "Index number"),
    ColumnDesc::new("RAEP0", true, D, SCALAR, None, None, Exactly("deg"), "RA at mean equinox"),
    ColumnDesc::new("DECEP0", true, D, SCALAR, None, None, Exactly("deg"), "Dec at mean equinox"),
    ColumnDesc::new("EQUINOX", true, E, SCALAR, None, None, Exactly("yr"), "Equinox"),
    ColumnDesc::new("RA_ERR", true, D, SCALAR, None, Some(Literal::Float(0.)), Exactly("deg"), "Error in RA at mean equinox"),
    ColumnDesc::new("DEC_ERR", true, D, SCALAR, None, Some(Literal::Float(0.)), Exactly("deg"), "Error in Dec at mean equinox"),
    ColumnDesc::new("SYSVEL", true, D, SCALAR, None, None, Exactly("m/s"), "Systemic radial velocity"),
    ColumnDesc::new("VELTYP", true, TypeTag::Text(8), SCALAR, Some(is_veltyp), None, Unitless, "Reference for radial velocity"),
    ColumnDesc::new("VELDEF", true, TypeTag::Text(8), SCALAR, Some(is_veldef), None, Unitless, "Definition of radial velocity"),
    ColumnDesc::new("PMRA", true, D, SCALAR, None, Some(Literal::Float(0.)), Exactly("deg/yr"), "Proper motion in RA"),
    ColumnDesc::new("PMDEC", true, D, SCALAR, None, Some(Literal::Float(0.)), Exactly("deg/yr"), "Proper motion in Dec"),
    ColumnDesc::new("PMRA_ERR", true, D, SCALAR, None, Some(Literal::Float(0.)), Exactly("deg/yr"), "Error of proper motion in RA"),
    ColumnDesc::new("PMDEC_ERR", true, D, SCALAR, None, Some(Literal::Float(0.)), Exactly("deg/yr"), "Error of proper motion in Dec"),
    ColumnDesc::new("PARALLAX", true, E, SCALAR, None, None, Exactly("deg"), "Parallax"),
    ColumnDesc::new("PARA_ERR", true, E, SCALAR, None, Some(Literal::Float(0.)), Exactly("deg"), "Error in parallax"),
];

#[rustfmt::skip]
const TARGET_COLUMNS_1: &[ColumnDesc] = &[
    ColumnDesc::new("TARGET", true, TypeTag::Text(16), SCALAR, Some(is_nonempty), None, Unitless, "Target name"),
    ColumnDesc::new("SPECTYP", true, TypeTag::Text(16), SCALAR, None, None, Unitless, "Spectral type"),
];

#[rustfmt::skip]
const TARGET_COLUMNS_2: &[ColumnDesc] = &[
    ColumnDesc::new("TARGET", true, TypeTag::Text(32), SCALAR, Some(is_nonempty), None, Unitless, "Target name"),
    ColumnDesc::new("SPECTYP", true, TypeTag::Text(32), SCALAR, None, None, Unitless, "Spectral type"),
    ColumnDesc::new("CATEGORY", false, TypeTag::Text(3), SCALAR, Some(is_category), Some(Literal::Text("SCI")), Unitless, "CAL[ibrator] or SCI[ence] target"),
];

pub static TARGET_1: Schema = Schema {
    kind: TableKind::Target,
    revision: 1,
    format: FormatVersion::V1,
    column_groups: &[TARGET_COLUMNS, TARGET_COLUMNS_1],
    card_groups: &[REVN_1],
    aliases: &[],
};

pub static TARGET_2: Schema = Schema {
    kind: TableKind::Target,
    revision: 2,
    format: FormatVersion::V2,
    column_groups: &[TARGET_COLUMNS, TARGET_COLUMNS_2],
    card_groups: &[REVN_2],
    aliases: &[],
};

// OI_ARRAY

#[rustfmt::skip]
const ARRAY_CARDS: &[CardDesc] = &[
    CardDesc::new("ARRNAME", true, CARD_TEXT, Some(is_nonempty), None, "Array name for cross-referencing"),
    CardDesc::new("FRAME", true, CARD_TEXT, Some(is_frame), Some(Literal::Text("GEOCENTRIC")), "Coordinate frame"),
    CardDesc::new("ARRAYX", true, D, None, None, "Array centre x coordinate (m)"),
    CardDesc::new("ARRAYY", true, D, None, None, "Array centre y coordinate (m)"),
    CardDesc::new("ARRAYZ", true, D, None, None, "Array centre z coordinate (m)"),
];

#[rustfmt::skip]
const ARRAY_COLUMNS: &[ColumnDesc] = &[
    ColumnDesc::new("TEL_NAME", true, TypeTag::Text(16), SCALAR, Some(is_nonempty), None, Unitless, "Telescope name"),
    ColumnDesc::new("STA_NAME", true, TypeTag::Text(16), SCALAR, Some(is_nonempty), None, Unitless, "Station name"),
    ColumnDesc::new("STA_INDEX", true, I, SCALAR, Some(is_strictpos), None, Unitless, "Station number"),
    ColumnDesc::new("DIAMETER", true, E, SCALAR, Some(is_strictpos), None, Exactly("m"), "Element diameter"),
    ColumnDesc::new("STAXYZ", true, D, XYZ, None, None, Exactly("m"), "Station coordinates relative to array centre"),
];

#[rustfmt::skip]
const ARRAY_COLUMNS_2: &[ColumnDesc] = &[
    ColumnDesc::new("FOV", true, D, SCALAR, Some(is_pos), None, Exactly("arcsec"), "Photometric field of view"),
    ColumnDesc::new("FOVTYPE", true, TypeTag::Text(6), SCALAR, Some(is_fovtype), Some(Literal::Text("FWHM")), Unitless, "Model for FOV: FWHM or RADIUS"),
];

pub static ARRAY_1: Schema = Schema {
    kind: TableKind::Array,
    revision: 1,
    format: FormatVersion::V1,
    column_groups: &[ARRAY_COLUMNS],
    card_groups: &[REVN_1, ARRAY_CARDS],
    aliases: &[],
};

pub static ARRAY_2: Schema = Schema {
    kind: TableKind::Array,
    revision: 2,
    format: FormatVersion::V2,
    column_groups: &[ARRAY_COLUMNS, ARRAY_COLUMNS_2],
    card_groups: &[REVN_2, ARRAY_CARDS],
    aliases: &[],
};

// OI_WAVELENGTH

const WAVELENGTH_CARDS: &[CardDesc] = &[CardDesc::new(
    "INSNAME",
    true,
    CARD_TEXT,
    Some(is_nonempty),
    None,
    "Name of detector for cross-referencing",
)];

#[rustfmt::skip]
const WAVELENGTH_COLUMNS: &[ColumnDesc] = &[
    ColumnDesc::new("EFF_WAVE", true, E, SCALAR, Some(is_strictpos), None, Exactly("m"), "Effective wavelength of channel"),
    ColumnDesc::new("EFF_BAND", true, E, SCALAR, Some(is_strictpos), None, Exactly("m"), "Effective bandpass of channel"),
];

pub static WAVELENGTH_1: Schema = Schema {
    kind: TableKind::Wavelength,
    revision: 1,
    format: FormatVersion::V1,
    column_groups: &[WAVELENGTH_COLUMNS],
    card_groups: &[REVN_1, WAVELENGTH_CARDS],
    aliases: &[],
};

pub static WAVELENGTH_2: Schema = Schema {
    kind: TableKind::Wavelength,
    revision: 2,
    format: FormatVersion::V2,
    column_groups: &[WAVELENGTH_COLUMNS],
    card_groups: &[REVN_2, WAVELENGTH_CARDS],
    aliases: &[],
};

// OI_FLUX

#[rustfmt::skip]
const FLUX_CARDS: &[CardDesc] = &[
    CardDesc::new("DATE-OBS", true, CARD_TEXT, Some(is_nonempty), None, "UTC start date of observations"),
    CardDesc::new("INSNAME", true, CARD_TEXT, Some(is_nonempty), None, "Name of corresponding detector"),
    CardDesc::new("ARRNAME", false, CARD_TEXT, Some(is_nonempty), None, "Name of corresponding array"),
    CardDesc::new("CORRNAME", false, CARD_TEXT, Some(is_nonempty), None, "Name of corresponding correlation table"),
    CardDesc::new("CALSTAT", true, CARD_TEXT, Some(is_calstat), None, "Calibration status: C[alibrated] or U[ncalibrated]"),
    CardDesc::new("FOV", false, D, Some(is_pos), None, "Area on sky over which flux is integrated (arcsec)"),
    CardDesc::new("FOVTYPE", false, CARD_TEXT, Some(is_fovtype), Some(Literal::Text("FWHM")), "Model for FOV: FWHM or RADIUS"),
];

#[rustfmt::skip]
const FLUX_COLUMNS: &[ColumnDesc] = &[
    ColumnDesc::new("TARGET_ID", true, I, SCALAR, Some(is_strictpos), None, Unitless, "Target number as index into OI_TARGET table"),
    ColumnDesc::new("MJD", true, D, SCALAR, None, None, Exactly("day"), "Modified Julian day"),
    ColumnDesc::new("INT_TIME", true, D, SCALAR, None, None, Exactly("s"), "Integration time"),
    ColumnDesc::new("FLUXDATA", true, D, SPECTRAL, None, None, Any, "Flux"),
    ColumnDesc::new("FLUXERR", true, D, SPECTRAL, None, None, Any, "Flux error"),
    ColumnDesc::new("FLAG", true, L, SPECTRAL, None, None, Unitless, "Flag"),
    ColumnDesc::new("STA_INDEX", false, I, SCALAR, Some(is_strictpos), None, Unitless, "Station number contributing to the data"),
    ColumnDesc::new("CORRINDX_FLUXDATA", false, J, SCALAR, Some(is_strictpos), None, Unitless, "Index into correlation matrix for first FLUXDATA element"),
];

pub static FLUX_1: Schema = Schema {
    kind: TableKind::Flux,
    revision: 1,
    format: FormatVersion::V2,
    column_groups: &[FLUX_COLUMNS],
    card_groups: &[REVN_1, FLUX_CARDS],
    aliases: &[("FLUX", "FLUXDATA")],
};
