// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Integer square root.
//!
//! Binary digit-by-digit method, rounded to the nearest integer on the final residual. The
//! triangulation engine depends on these results being bit-exact, so this must not be swapped for
//! a floating-point approximation.

/// Square root of `x`, rounded to the nearest integer.
///
/// The result can be `65536` for inputs above `65535.5²`, so it does not fit a `u16`.
pub const fn isqrt(x: u32) -> u32 {
    let mut op = x;
    let mut res: u32 = 0;

    // Highest power of four <= the argument.
    let mut one: u32 = 1 << 30;
    while one > op {
        one >>= 2;
    }

    while one != 0 {
        if op >= res + one {
            op -= res + one;
            res += 2 * one;
        }
        res >>= 1;
        one >>= 2;
    }

    // op = x - res², round up when x > res² + res.
    if op > res {
        res += 1;
    }

    res
}

/// Square of a small value, widened so the product cannot overflow.
#[inline]
pub const fn squared(x: u16) -> u32 {
    (x as u32) * (x as u32)
}
