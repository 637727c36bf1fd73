// Copyright 2026 the oitab developers and collaborators
// Licensed under the MIT License.

//! Small, valid tables for the unit tests.

use ndarray::{Array1, Array2};

use crate::column::{Column, ColumnData};
use crate::header::Header;
use crate::table::Table;

fn text<S: AsRef<str>>(values: &[S]) -> ColumnData {
    let owned: Vec<String> = values.iter().map(|s| s.as_ref().to_owned()).collect();
    ColumnData::text(Array1::from(owned).into_dyn())
}

/// A target catalog with rows of `(TARGET_ID, TARGET, RAEP0, DECEP0)`.
pub fn target_table(revision: u8, rows: &[(i16, &str, f64, f64)]) -> Table {
    let n = rows.len();
    let zeros = || vec![0.0f64; n];

    let columns = vec![
        Column::new("TARGET_ID", rows.iter().map(|r| r.0).collect::<Vec<_>>()),
        Column::new("TARGET", text(&rows.iter().map(|r| r.1).collect::<Vec<_>>())),
        Column::new("RAEP0", rows.iter().map(|r| r.2).collect::<Vec<_>>()),
        Column::new("DECEP0", rows.iter().map(|r| r.3).collect::<Vec<_>>()),
        Column::new("EQUINOX", vec![2000.0f32; n]),
        Column::new("RA_ERR", zeros()),
        Column::new("DEC_ERR", zeros()),
        Column::new("SYSVEL", zeros()),
        Column::new("VELTYP", text(&vec!["UNKNOWN"; n])),
        Column::new("VELDEF", text(&vec!["OPTICAL"; n])),
        Column::new("PMRA", zeros()),
        Column::new("PMDEC", zeros()),
        Column::new("PMRA_ERR", zeros()),
        Column::new("PMDEC_ERR", zeros()),
        Column::new("PARALLAX", vec![0.0f32; n]),
        Column::new("PARA_ERR", vec![0.0f32; n]),
        Column::new("SPECTYP", text(&vec!["UNKNOWN"; n])),
    ];

    Table::from_columns("OI_TARGET", revision, Header::new(), columns).unwrap()
}

/// A revision 2 array table with stations `(STA_INDEX, STA_NAME)`.
pub fn array_table(arrname: &str, stations: &[(i16, &str)]) -> Table {
    let n = stations.len();
    let mut header = Header::new();
    header.set("ARRNAME", arrname);

    for card in ["ARRAYX", "ARRAYY", "ARRAYZ"] {
        header.set(card, 0.0);
    }

    let staxyz = Array2::from_shape_fn((n, 3), |(i, j)| {
        if j == 0 {
            stations[i].0 as f64
        } else {
            0.
        }
    });

    let columns = vec![
        Column::new(
            "TEL_NAME",
            text(&stations.iter().map(|s| format!("T{}", s.0)).collect::<Vec<_>>()),
        ),
        Column::new("STA_NAME", text(&stations.iter().map(|s| s.1).collect::<Vec<_>>())),
        Column::new("STA_INDEX", stations.iter().map(|s| s.0).collect::<Vec<_>>()),
        Column::new("DIAMETER", vec![8.0f32; n]),
        Column::new("STAXYZ", staxyz.into_dyn()),
        Column::new("FOV", vec![1.0f64; n]),
        Column::new("FOVTYPE", text(&vec!["FWHM"; n])),
    ];

    Table::from_columns("OI_ARRAY", 2, header, columns).unwrap()
}

/// A revision 2 spectral setup with `n` channels.
pub fn wavelength_table(insname: &str, n: usize) -> Table {
    let waves: Vec<f32> = (0..n).map(|i| (2.0 + 0.125 * i as f32) * 1e-6).collect();

    Table::from_columns(
        "OI_WAVELENGTH",
        2,
        [("INSNAME", insname)].into_iter().collect(),
        vec![
            Column::new("EFF_WAVE", waves),
            Column::new("EFF_BAND", vec![1e-8f32; n]),
        ],
    )
    .unwrap()
}

/// A calibrated flux table, one row per entry of `target_ids`.
pub fn flux_table(
    insname: &str,
    arrname: Option<&str>,
    target_ids: &[i16],
    sta_index: Option<&[i16]>,
    n_channels: usize,
) -> Table {
    let n = target_ids.len();

    let mut header: Header = [
        ("DATE-OBS", "2026-01-01"),
        ("INSNAME", insname),
        ("CALSTAT", "C"),
    ]
    .into_iter()
    .collect();

    if let Some(a) = arrname {
        header.set("ARRNAME", a);
    }

    let flux = Array2::from_shape_fn((n, n_channels), |(i, j)| (1 + i + j) as f64);

    let mut columns = vec![
        Column::new("TARGET_ID", target_ids.to_vec()),
        Column::new("MJD", vec![60000.0f64; n]),
        Column::new("INT_TIME", vec![1.0f64; n]),
        Column::new("FLUXDATA", flux.into_dyn()),
        Column::new("FLUXERR", Array2::from_elem((n, n_channels), 0.5f64).into_dyn()),
        Column::new("FLAG", Array2::from_elem((n, n_channels), false).into_dyn()),
    ];

    if let Some(s) = sta_index {
        columns.push(Column::new("STA_INDEX", s.to_vec()));
    }

    Table::from_columns("OI_FLUX", 1, header, columns).unwrap()
}
