// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Locates an object inside the sensor triangle from three edge distances.
//!
//! The three rangefinders sit at the vertices of an equilateral triangle with side length `SL`.
//! For position `i`, the distances measured from its `left` and `right` neighbours together with
//! the side between them form a triangle whose apex is the object. From that:
//!
//! - altitude height `Ah[i]`: perpendicular distance from the object to side `i` (Heron). These
//!   are the trilinear coordinates of the object.
//! - altitude base `Ab[i]`: where the foot of that perpendicular lands along the side.
//! - collinear base `Cb[i]`: where the cevian from the opposite vertex through the object crosses
//!   side `i`.
//! - collinear height `Ch[i]`: distance from that crossing to the object.
//! - area `Area[i]`: barycentric coordinate, in 255ths, of the sub-triangle above side `i`.
//!
//! Everything is integer arithmetic. Degenerate readings produce zeros, never errors.

use crate::geometry::isqrt::{isqrt, squared};
use crate::geometry::slot::{SlotIndex, N_CORNERS};
use crate::protocol::SlotReading;

/// Slot group used for the per-corner geometry arrays.
pub const GEOMETRY_GROUP: u8 = 0;

/// Residual below which the Vivani correction is applied to a single height.
const SMALL_RESIDUAL: i16 = 3;

/// One solved update. All arrays are indexed by slot position.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Geometry {
    /// Raw edge distances `D`.
    pub distance: [u8; N_CORNERS],
    /// `Ah`, after the Vivani correction.
    pub altitude_height: [u8; N_CORNERS],
    /// `Ab`
    pub altitude_base: [u8; N_CORNERS],
    /// `Cb`
    pub collinear_base: [u8; N_CORNERS],
    /// `Ch`
    pub collinear_height: [u8; N_CORNERS],
    /// `Area`, fraction of 255.
    pub area: [u8; N_CORNERS],
}

impl Geometry {
    /// Values a corner publishes for its own slot.
    pub fn reading(&self, slot: SlotIndex) -> SlotReading {
        let i = slot.index();
        SlotReading {
            distance: self.distance[i] as u16,
            intercept: self.collinear_base[i] as u16,
            range: self.area[i] as u16,
        }
    }
}

/// Fixed sensor triangle.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Triangle {
    side_length: u8,
    height: u8,
}

impl Triangle {
    /// Equilateral triangle with the given side length. The total height `HL` is derived from it.
    ///
    /// Returns `None` for a zero side length.
    pub const fn new(side_length: u8) -> Option<Self> {
        if side_length == 0 {
            return None;
        }
        let sl = side_length as u32;
        Some(Self {
            side_length,
            height: isqrt(3 * sl * sl / 4) as u8,
        })
    }

    #[inline]
    pub const fn side_length(&self) -> u8 {
        self.side_length
    }

    /// Total height `HL` the three altitude heights must sum to.
    #[inline]
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// Run the full pipeline on one set of distances.
    pub fn solve(&self, distance: [u8; N_CORNERS]) -> Geometry {
        let slots = SlotIndex::group(GEOMETRY_GROUP);
        let mut g = Geometry {
            distance,
            ..Geometry::default()
        };

        for slot in slots {
            g.altitude_height[slot.index()] = self.altitude_height(&g.distance, slot);
        }

        self.correct_altitude_heights(&mut g.altitude_height);

        for slot in slots {
            g.altitude_base[slot.index()] = self.altitude_base(&g, slot);
        }
        for slot in slots {
            g.collinear_base[slot.index()] = self.collinear_base(&g, slot);
        }
        for slot in slots {
            g.collinear_height[slot.index()] = self.collinear_height(&g, slot);
        }
        for slot in slots {
            g.area[slot.index()] = self.area(&g, slot);
        }

        g
    }

    /// `(SL + D[left] + D[right]) / 2`
    pub fn semi_perimeter(&self, distance: &[u8; N_CORNERS], slot: SlotIndex) -> u32 {
        (self.side_length as u32
            + distance[slot.left().index()] as u32
            + distance[slot.right().index()] as u32)
            / 2
    }

    /// Altitude of the object above side `slot`, before correction.
    ///
    /// Zero when the two distances cannot reach across the side.
    pub fn altitude_height(&self, distance: &[u8; N_CORNERS], slot: SlotIndex) -> u8 {
        let sl = self.side_length as u32;
        let dl = distance[slot.left().index()] as u32;
        let dr = distance[slot.right().index()] as u32;
        if dl + dr < sl {
            return 0;
        }

        let s = self.semi_perimeter(distance, slot);
        let part1 = isqrt(s * s.saturating_sub(dl));
        let part2 = isqrt((s - sl) * s.saturating_sub(dr));

        clamp_u8(2 * part1 * part2 / sl)
    }

    /// Vivani: the three altitude heights of an interior point sum to `HL`. Push the rounding
    /// residual back into the heights until they do.
    ///
    /// Heights stay within `0..=255` throughout. A share a height cannot take is left in the
    /// residual for the next pass, and a small residual goes to the smallest height that can
    /// absorb it (lowest index on ties), so the result always sums to exactly `HL`.
    pub fn correct_altitude_heights(&self, heights: &mut [u8; N_CORNERS]) {
        const MAX: i16 = u8::MAX as i16;
        let mut h = heights.map(i16::from);

        loop {
            let delta = self.height as i16 - h.iter().sum::<i16>();
            if delta == 0 {
                break;
            }

            if delta.abs() < SMALL_RESIDUAL {
                let mut order = [0, 1, 2];
                order.sort_unstable_by_key(|&i| (h[i], i));
                if let Some(i) = order.into_iter().find(|&i| (0..=MAX).contains(&(h[i] + delta))) {
                    h[i] += delta;
                }
                break;
            }

            // Every pass moves at least one height, so |delta| shrinks without changing sign.
            let share = delta / 3;
            for v in h.iter_mut() {
                *v = (*v + share).clamp(0, MAX);
            }
        }

        for (out, v) in heights.iter_mut().zip(h) {
            *out = v as u8;
        }
    }

    /// Distance along side `slot` from its left end to the foot of the altitude.
    fn altitude_base(&self, g: &Geometry, slot: SlotIndex) -> u8 {
        let dl = g.distance[slot.left().index()] as u16;
        let ah = g.altitude_height[slot.index()] as u16;
        if dl < ah {
            return 0;
        }
        clamp_u8(isqrt(squared(dl) - squared(ah)))
    }

    /// Where the cevian through the object crosses side `slot`, from the trilinear coordinates of
    /// the other two sides.
    fn collinear_base(&self, g: &Geometry, slot: SlotIndex) -> u8 {
        let ah_right = g.altitude_height[slot.right().index()] as u32;
        let ah_left = g.altitude_height[slot.left().index()] as u32;
        let denominator = ah_right + ah_left;
        if denominator == 0 {
            return 0;
        }
        clamp_u8(ah_right * self.side_length as u32 / denominator)
    }

    fn collinear_height(&self, g: &Geometry, slot: SlotIndex) -> u8 {
        let i = slot.index();
        let ah = g.altitude_height[i] as u16;
        let offset = g.collinear_base[i].abs_diff(g.altitude_base[i]) as u16;
        clamp_u8(isqrt(squared(ah) + squared(offset)))
    }

    fn area(&self, g: &Geometry, slot: SlotIndex) -> u8 {
        let ah = g.altitude_height[slot.index()] as u32;
        clamp_u8(u8::MAX as u32 * ah / self.side_length as u32)
    }
}

#[inline]
fn clamp_u8(v: u32) -> u8 {
    v.min(u8::MAX as u32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SIDE_LENGTH;

    fn triangle() -> Triangle {
        Triangle::new(SIDE_LENGTH).expect("non-zero side")
    }

    #[test]
    fn derives_total_height() {
        assert_eq!(Triangle::new(200).map(|t| t.height()), Some(173));
        assert_eq!(Triangle::new(100).map(|t| t.height()), Some(87));
    }

    #[test]
    fn zero_side_is_rejected() {
        assert_eq!(Triangle::new(0), None);
    }

    #[test]
    fn semi_perimeter_uses_neighbours() {
        let t = triangle();
        let [s0, _, _] = SlotIndex::group(GEOMETRY_GROUP);
        // Left of 0 is 1, right of 0 is 2; D[0] is not involved.
        assert_eq!(t.semi_perimeter(&[255, 100, 51], s0), (200 + 100 + 51) / 2);
    }

    #[test]
    fn triangle_inequality_violation_gives_zero_height() {
        let t = triangle();
        let [s0, _, _] = SlotIndex::group(GEOMETRY_GROUP);
        assert_eq!(t.altitude_height(&[0, 99, 100], s0), 0);
    }

    #[test]
    fn overlong_distance_does_not_underflow() {
        let t = triangle();
        let [s0, _, _] = SlotIndex::group(GEOMETRY_GROUP);
        // D[1] exceeds SL + D[2]; no real triangle exists.
        assert_eq!(t.altitude_height(&[0, 255, 10], s0), 0);
    }

    #[test]
    fn correction_small_residual_goes_to_first_smallest() {
        let t = triangle();
        let mut h = [60, 55, 56];
        t.correct_altitude_heights(&mut h);
        assert_eq!(h, [60, 57, 56]);

        let mut tie = [57, 57, 57];
        t.correct_altitude_heights(&mut tie);
        assert_eq!(tie, [59, 57, 57]);

        let mut negative = [58, 59, 58];
        t.correct_altitude_heights(&mut negative);
        assert_eq!(negative, [56, 59, 58]);
    }

    #[test]
    fn correction_large_residual_spreads_then_finishes() {
        let t = triangle();
        let mut h = [0, 0, 0];
        t.correct_altitude_heights(&mut h);
        assert_eq!(h, [59, 57, 57]);
        assert_eq!(h.iter().map(|&v| v as u16).sum::<u16>(), 173);
    }

    #[test]
    fn correction_sums_to_height_for_any_heights() {
        let t = triangle();
        for a in (0..=255u8).step_by(5) {
            for b in (0..=255u8).step_by(5) {
                for c in (0..=255u8).step_by(5) {
                    let mut h = [a, b, c];
                    t.correct_altitude_heights(&mut h);
                    let sum: u16 = h.iter().map(|&v| v as u16).sum();
                    assert_eq!(sum, 173, "from {:?} got {:?}", [a, b, c], h);
                }
            }
        }
    }

    #[test]
    fn correction_skips_heights_that_cannot_absorb() {
        let t = triangle();
        // -1 cannot go to either zero.
        let mut h = [0, 0, 174];
        t.correct_altitude_heights(&mut h);
        assert_eq!(h, [0, 0, 173]);

        // Shares that would go negative are carried into later passes.
        let mut h = [0, 0, 213];
        t.correct_altitude_heights(&mut h);
        assert_eq!(h, [0, 0, 173]);
    }

    #[test]
    fn object_on_corner() {
        let g = triangle().solve([0, 200, 202]);
        assert_eq!(g.altitude_height, [173, 0, 0]);
    }

    #[test]
    fn distances_at_range_limit() {
        let g = triangle().solve([255, 255, 55]);
        assert_eq!(g.altitude_height, [0, 0, 173]);
    }

    #[test]
    fn all_zero_distances() {
        let g = triangle().solve([0, 0, 0]);
        assert_eq!(g.altitude_height, [59, 57, 57]);
        assert_eq!(g.altitude_base, [0, 0, 0]);
        let (lo, hi) = (g.area.iter().min().unwrap(), g.area.iter().max().unwrap());
        assert!(hi - lo <= 3, "areas {:?}", g.area);
    }

    #[test]
    fn object_on_edge_midpoint() {
        // Midpoint of the side opposite corner 0.
        let g = triangle().solve([173, 100, 100]);
        assert_eq!(g.altitude_height, [1, 86, 86]);
        assert_eq!(g.area, [1, 109, 109]);
        assert_eq!(g.collinear_base[0], 100);
    }

    #[test]
    fn centroid_is_symmetric() {
        let g = triangle().solve([115, 115, 115]);
        assert_eq!(g.altitude_height, [59, 57, 57]);
        assert_eq!(g.area, [75, 72, 72]);
    }

    #[test]
    fn collinear_base_of_degenerate_heights_is_zero() {
        let t = triangle();
        let g = Geometry {
            altitude_height: [0, 0, 0],
            ..Geometry::default()
        };
        let [s0, _, _] = SlotIndex::group(GEOMETRY_GROUP);
        assert_eq!(t.collinear_base(&g, s0), 0);
    }

    #[test]
    fn reading_picks_own_slot() {
        let g = triangle().solve([173, 100, 100]);
        let [_, s1, _] = SlotIndex::group(GEOMETRY_GROUP);
        let r = g.reading(s1);
        assert_eq!(r.distance, 100);
        assert_eq!(r.intercept, g.collinear_base[1] as u16);
        assert_eq!(r.range, 109);
    }
}
