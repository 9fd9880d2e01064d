// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time kernel.

use num::Complex;

/// The squared radius beyond which an orbit is considered escaped.
pub const ESCAPE_RADIUS_SQR: f64 = 4.0;

/// Iterate `z <- z*z + c` from zero and count the steps taken before the
/// orbit leaves the disk of radius two, up to `limit`.
///
/// The escape test looks at the squared magnitude of `z` as it was
/// *before* the step that was just counted, so the count is one past the
/// step at which `z` first left the disk, and never less than one.  A
/// point that has not escaped after `limit` steps returns `limit`; that
/// is an approximation of membership in the set, not a proof of it.
///
/// Pure: no allocation, no shared state, deterministic for any finite `c`.
#[inline]
pub fn escape_time(c: Complex<f64>, limit: u32) -> u32 {
    let (mut z_re, mut z_im) = (0.0_f64, 0.0_f64);
    let mut count = 0;
    loop {
        let re_sqr = z_re * z_re;
        let im_sqr = z_im * z_im;
        z_im = 2.0 * z_re * z_im + c.im;
        z_re = re_sqr - im_sqr + c.re;
        count += 1;
        if count >= limit || re_sqr + im_sqr >= ESCAPE_RADIUS_SQR {
            return count;
        }
    }
}
