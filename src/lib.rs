#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parallel Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane for
//! which the orbit of zero under `z <- z*z + c` stays bounded.  The
//! escape-time picture of it counts, for each pixel, how many steps the
//! orbit takes to leave the disk of radius two, giving up at a fixed
//! limit.  Points that reach the limit are drawn as "in the set."
//!
//! This crate renders that picture over a fixed window of the plane,
//! four units on a side and centered on the origin, into a grid of
//! iteration counts.  Because per-pixel cost ranges from a couple of
//! iterations to the full limit, rows are handed to worker threads one
//! at a time, so that no worker sits idle while another is stuck with
//! the slow rows through the middle of the set.  The finished grid is
//! written out as a grayscale PGM, and the whole render can be repeated
//! and timed.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;

pub mod config;
pub mod errors;
pub mod escape;
pub mod grid;
pub mod pgm;
pub mod planes;
pub mod render;
pub mod trials;

pub use config::{run, Config};
pub use errors::{Error, Result};
pub use escape::escape_time;
pub use grid::IterationGrid;
pub use pgm::Encoding;
pub use planes::{Pixel, Viewport};
pub use render::{Renderer, Schedule};
pub use trials::{run_trials, TrialReport};
