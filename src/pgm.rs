// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Serializes a finished grid as a Portable Gray Map.
//!
//! The plain (`P2`) form is written by hand because its layout is part
//! of the contract: the magic number, the dimensions and the maximum
//! gray value on lines of their own, then one text line per image row.
//! The raw (`P5`) form goes through the `image` crate's encoder.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use image::pnm::PNMEncoder;
use image::pnm::{PNMSubtype, SampleEncoding};
use image::ColorType;
use itertools::Itertools;

use errors::{Error, Result};
use grid::IterationGrid;

/// The largest gray value a plain PGM may declare.
pub const PLAIN_MAXVAL: u32 = 65_535;

/// The largest gray value the raw encoder can carry.
pub const RAW_MAXVAL: u32 = 255;

/// Which flavor of PGM to produce.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Encoding {
    /// `P2`: decimal samples, one text line per row.
    Plain,
    /// `P5`: one byte per sample.
    Raw,
}

impl Default for Encoding {
    fn default() -> Self {
        Encoding::Plain
    }
}

fn check_plain(grid: &IterationGrid, maxval: u32) -> Result<()> {
    if maxval == 0 || maxval > PLAIN_MAXVAL {
        return Err(Error::Encoding(format!(
            "maximum gray value {} is outside 1..={}",
            maxval, PLAIN_MAXVAL
        )));
    }
    let brightest = grid.max_value();
    if brightest > maxval {
        return Err(Error::Encoding(format!(
            "sample {} exceeds the declared maximum {}",
            brightest, maxval
        )));
    }
    Ok(())
}

fn check_raw(grid: &IterationGrid) -> Result<()> {
    let brightest = grid.max_value();
    if brightest > RAW_MAXVAL {
        return Err(Error::Encoding(format!(
            "sample {} does not fit in a single byte",
            brightest
        )));
    }
    Ok(())
}

fn plain<W: Write>(out: &mut W, grid: &IterationGrid, maxval: u32) -> io::Result<()> {
    writeln!(out, "P2")?;
    writeln!(out, "{} {}", grid.width(), grid.height())?;
    writeln!(out, "{}", maxval)?;
    for row in grid.rows() {
        writeln!(out, "{}", row.iter().join(" "))?;
    }
    Ok(())
}

fn raw<W: Write>(out: &mut W, grid: &IterationGrid) -> io::Result<()> {
    let pixels: Vec<u8> = grid.cells().iter().map(|&c| c as u8).collect();
    let mut encoder =
        PNMEncoder::new(out).with_subtype(PNMSubtype::Graymap(SampleEncoding::Binary));
    encoder.encode(
        &pixels[..],
        grid.width() as u32,
        grid.height() as u32,
        ColorType::Gray(8),
    )
}

/// Write `grid` as a plain PGM declaring `maxval` as its maximum gray
/// value.  Fails without writing anything if a sample exceeds `maxval`.
pub fn write_plain<W: Write>(out: &mut W, grid: &IterationGrid, maxval: u32) -> Result<()> {
    check_plain(grid, maxval)?;
    plain(out, grid, maxval).map_err(|e| Error::io("output stream", e))
}

/// Write `grid` as a raw PGM.  Every sample must fit in a byte.
pub fn write_raw<W: Write>(out: &mut W, grid: &IterationGrid) -> Result<()> {
    check_raw(grid)?;
    raw(out, grid).map_err(|e| Error::io("output stream", e))
}

/// Write `grid` to a file at `path`.  The encoding is validated before
/// the file is created, so a grid that cannot be encoded leaves the
/// filesystem untouched.
pub fn save<P: AsRef<Path>>(
    path: P,
    grid: &IterationGrid,
    maxval: u32,
    encoding: Encoding,
) -> Result<()> {
    let path = path.as_ref();
    match encoding {
        Encoding::Plain => check_plain(grid, maxval)?,
        Encoding::Raw => check_raw(grid)?,
    }
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut out = BufWriter::new(file);
    match encoding {
        Encoding::Plain => plain(&mut out, grid, maxval),
        Encoding::Raw => raw(&mut out, grid),
    }
    .and_then(|_| out.flush())
    .map_err(|e| Error::io(path, e))?;
    info!("wrote {}x{} image to {}", grid.width(), grid.height(), path.display());
    Ok(())
}

/// Read a plain PGM back into a grid, returning the grid and its
/// declared maximum gray value.  Comments are accepted wherever the
/// format allows whitespace.
pub fn parse_plain(text: &str) -> Result<(IterationGrid, u32)> {
    let mut tokens = text
        .lines()
        .map(|line| match line.find('#') {
            Some(index) => &line[..index],
            None => line,
        })
        .flat_map(|line| line.split_whitespace());

    match tokens.next() {
        Some("P2") => (),
        Some(magic) => return Err(Error::Parse(format!("unexpected magic number '{}'", magic))),
        None => return Err(Error::Parse("empty raster".to_string())),
    }

    let mut header = |name: &str| -> Result<u32> {
        let token = tokens
            .next()
            .ok_or_else(|| Error::Parse(format!("missing {}", name)))?;
        token
            .parse::<u32>()
            .map_err(|_| Error::Parse(format!("bad {} '{}'", name, token)))
    };
    let width = header("width")? as usize;
    let height = header("height")? as usize;
    let maxval = header("maximum gray value")?;
    if maxval == 0 || maxval > PLAIN_MAXVAL {
        return Err(Error::Parse(format!("maximum gray value {} out of range", maxval)));
    }

    let mut cells = Vec::new();
    for token in tokens {
        let value = token
            .parse::<u32>()
            .map_err(|_| Error::Parse(format!("bad sample '{}'", token)))?;
        if value > maxval {
            return Err(Error::Parse(format!(
                "sample {} exceeds the declared maximum {}",
                value, maxval
            )));
        }
        cells.push(value);
    }
    let grid = IterationGrid::from_cells(width, height, cells)?;
    Ok((grid, maxval))
}
