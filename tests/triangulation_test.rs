// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Triangulation checked against floating-point geometry.
//!
//! Corner 0 sits at the apex, corners 1 and 2 on the base, side length 200. Each corner reports
//! its rounded distance to the object.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use shadows::config::SIDE_LENGTH;
use shadows::geometry::{SlotIndex, Triangle};

const CORNERS: [(f64, f64); 3] = [(100.0, 173.205_080_756_887_7), (0.0, 0.0), (200.0, 0.0)];
const TRUE_HEIGHT: f64 = 173.205_080_756_887_7;
/// Keep points this far from every side.
const MARGIN: f64 = 20.0;

fn triangle() -> Triangle {
    Triangle::new(SIDE_LENGTH).expect("non-zero side")
}

/// Random interior point as barycentric weights.
fn interior_point(rng: &mut StdRng) -> [f64; 3] {
    loop {
        let u: f64 = rng.gen();
        let v: f64 = rng.gen();
        let w = 1.0 - u - v;
        if u.min(v).min(w) * TRUE_HEIGHT >= MARGIN {
            return [u, v, w];
        }
    }
}

fn distances(weights: [f64; 3]) -> [u8; 3] {
    let x: f64 = (0..3).map(|i| weights[i] * CORNERS[i].0).sum();
    let y: f64 = (0..3).map(|i| weights[i] * CORNERS[i].1).sum();
    CORNERS.map(|(cx, cy)| (x - cx).hypot(y - cy).round() as u8)
}

#[test]
fn test_altitudes_sum_to_height_for_interior_points() {
    let triangle = triangle();
    let mut rng = StdRng::seed_from_u64(0x5AAD_0515);

    for _ in 0..20_000 {
        let d = distances(interior_point(&mut rng));
        let g = triangle.solve(d);
        let sum: u32 = g.altitude_height.iter().map(|&h| h as u32).sum();
        assert_eq!(sum, triangle.height() as u32, "distances {:?}", d);
    }
}

#[test]
fn test_altitudes_track_true_position() {
    let triangle = triangle();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..20_000 {
        let weights = interior_point(&mut rng);
        let g = triangle.solve(distances(weights));
        for i in 0..3 {
            let expected = weights[i] * TRUE_HEIGHT;
            let got = g.altitude_height[i] as f64;
            assert!(
                (got - expected).abs() <= 6.0,
                "corner {} expected {:.1} got {} for {:?}",
                i,
                expected,
                got,
                weights
            );
            assert!(g.collinear_base[i] <= SIDE_LENGTH);
        }
    }
}

#[test]
fn test_reading_carries_own_slot() {
    let triangle = triangle();
    let g = triangle.solve([173, 100, 100]);

    let expected = [(173, 100, 1), (100, 2, 109), (100, 197, 109)];
    for (slot, (distance, intercept, range)) in SlotIndex::group(0).into_iter().zip(expected) {
        let r = g.reading(slot);
        assert_eq!(r.distance, distance);
        assert_eq!(r.intercept, intercept);
        assert_eq!(r.range, range);
    }
}

/// Every distance triple that can come from a point in the closed triangle: each pair of
/// distances reaches across the side between them.
fn reachable(d: [u8; 3]) -> bool {
    let sl = SIDE_LENGTH as u16;
    (0..3).all(|i| d[i] as u16 + d[(i + 1) % 3] as u16 >= sl)
}

fn assert_sums_to_height(triangle: &Triangle, d: [u8; 3]) {
    let g = triangle.solve(d);
    let sum: u32 = g.altitude_height.iter().map(|&h| h as u32).sum();
    assert_eq!(sum, triangle.height() as u32, "distances {:?} gave {:?}", d, g.altitude_height);
}

#[test]
fn test_altitudes_sum_to_height_across_full_range() {
    let triangle = triangle();
    for a in (0..=255u8).step_by(3) {
        for b in (0..=255u8).step_by(3) {
            for c in (0..=255u8).step_by(3) {
                if reachable([a, b, c]) {
                    assert_sums_to_height(&triangle, [a, b, c]);
                }
            }
        }
    }
}

#[test]
fn test_altitudes_sum_to_height_on_range_limits() {
    let triangle = triangle();
    for edge in [0u8, 1, 2, 254, 255] {
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                for d in [[edge, a, b], [a, edge, b], [a, b, edge]] {
                    if reachable(d) {
                        assert_sums_to_height(&triangle, d);
                    }
                }
            }
        }
    }
}

#[test]
fn test_object_at_corner() {
    let g = triangle().solve([0, 200, 202]);
    assert_eq!(g.altitude_height, [173, 0, 0]);
}
