// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The image buffer: one iteration count per pixel, stored row-major in
//! a single heap allocation.

use std::slice::{Chunks, ChunksMut};

use errors::{Error, Result};

/// A `width` x `height` grid of iteration counts, indexed
/// `row * width + column`.
#[derive(Clone, Debug, PartialEq)]
pub struct IterationGrid {
    width: usize,
    height: usize,
    cells: Vec<u32>,
}

impl IterationGrid {
    /// Reserve a zeroed grid.  The reservation is fallible so that an
    /// oversized request is reported instead of aborting the process
    /// from inside the allocator.
    pub fn new(width: usize, height: usize) -> Result<IterationGrid> {
        if width == 0 || height == 0 {
            return Err(Error::Config(format!(
                "image dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        let cells = width
            .checked_mul(height)
            .ok_or(Error::Allocation { cells: usize::max_value() })?;
        let mut buffer: Vec<u32> = Vec::new();
        buffer
            .try_reserve_exact(cells)
            .map_err(|_| Error::Allocation { cells })?;
        buffer.resize(cells, 0);
        Ok(IterationGrid {
            width,
            height,
            cells: buffer,
        })
    }

    /// Wrap an existing row-major buffer.  Fails if the buffer does not
    /// hold exactly `width * height` cells.
    pub fn from_cells(width: usize, height: usize, cells: Vec<u32>) -> Result<IterationGrid> {
        if width == 0 || height == 0 {
            return Err(Error::Parse(format!("empty {}x{} grid", width, height)));
        }
        if Some(cells.len()) != width.checked_mul(height) {
            return Err(Error::Parse(format!(
                "a {}x{} grid cannot be built from {} cells",
                width,
                height,
                cells.len()
            )));
        }
        Ok(IterationGrid {
            width,
            height,
            cells,
        })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The value at (row, column), if that cell exists.
    pub fn get(&self, row: usize, column: usize) -> Option<u32> {
        if row < self.height && column < self.width {
            Some(self.cells[row * self.width + column])
        } else {
            None
        }
    }

    /// One row of the grid.
    pub fn row(&self, row: usize) -> &[u32] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    /// The rows of the grid, top to bottom.
    pub fn rows(&self) -> Chunks<u32> {
        self.cells.chunks(self.width)
    }

    /// Disjoint mutable rows, top to bottom.  Each slice can be handed to
    /// a different thread.
    pub fn rows_mut(&mut self) -> ChunksMut<u32> {
        self.cells.chunks_mut(self.width)
    }

    /// Disjoint mutable bands of `rows` consecutive rows each; the last
    /// band may be shorter.
    pub fn bands_mut(&mut self, rows: usize) -> ChunksMut<u32> {
        self.cells.chunks_mut(rows.max(1) * self.width)
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// The largest value present, or zero for a fresh grid.
    pub fn max_value(&self) -> u32 {
        self.cells.iter().cloned().max().unwrap_or(0)
    }

    /// Consume the grid, returning the row-major buffer.
    pub fn into_cells(self) -> Vec<u32> {
        self.cells
    }
}
