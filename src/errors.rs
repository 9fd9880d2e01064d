// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The one error type shared by the renderer, the serializer and the
//! trial harness.  The escape-time kernel itself cannot fail; every
//! variant here originates at a boundary: configuration, memory, the
//! filesystem, or a worker thread that died.

use std::io;
use std::path::PathBuf;

/// Everything that can go wrong while producing an image.
#[derive(Debug, Fail)]
pub enum Error {
    /// The destination could not be created or written.
    #[fail(display = "could not write {}: {}", path, cause)]
    Io {
        /// Where we were trying to write.
        path: String,
        /// What the operating system said.
        #[cause]
        cause: io::Error,
    },

    /// The image buffer could not be reserved.
    #[fail(display = "could not allocate an image buffer of {} cells", cells)]
    Allocation {
        /// The number of cells requested.
        cells: usize,
    },

    /// A configuration value is out of range.
    #[fail(display = "invalid configuration: {}", _0)]
    Config(String),

    /// A plain-text raster could not be read back.
    #[fail(display = "malformed raster: {}", _0)]
    Parse(String),

    /// The buffer cannot be represented in the requested encoding.
    #[fail(display = "cannot encode image: {}", _0)]
    Encoding(String),

    /// A render worker panicked before finishing its rows.
    #[fail(display = "a render worker panicked; the image is incomplete")]
    Worker,
}

impl Error {
    pub(crate) fn io<P: Into<PathBuf>>(path: P, cause: io::Error) -> Error {
        Error::Io {
            path: path.into().display().to_string(),
            cause,
        }
    }
}

/// Shorthand used throughout the crate.
pub type Result<T> = ::std::result::Result<T, Error>;
