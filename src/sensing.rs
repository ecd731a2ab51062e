// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Rangefinder sampling.
//!
//! The three ultrasonic rangefinders run as a free-running chain and each holds an analog output
//! proportional to range (Vcc/512 per inch). Readings are averaged, scaled to half inches and
//! clamped into a byte.

use crate::geometry::slot::N_CORNERS;

/// Samples averaged per channel on each update.
pub const SAMPLES: u32 = 10;

/// Trait for reading a single channel from an ADC peripheral.
pub trait AdcRead {
    fn read_channel(&mut self, ch: u8) -> u16;
}

/// Three rangefinders on three ADC channels.
pub struct Rangefinders<A> {
    adc: A,
    channels: [u8; N_CORNERS],
    /// Right shift from ADC counts to half inches. 0 for a 10-bit ADC at Vcc, 2 for 12-bit.
    shift: u8,
    distance: [u8; N_CORNERS],
}

impl<A: AdcRead> Rangefinders<A> {
    pub fn new(adc: A, channels: [u8; N_CORNERS], shift: u8) -> Self {
        Self {
            adc,
            channels,
            shift,
            distance: [0; N_CORNERS],
        }
    }

    /// Take a fresh averaged reading on every channel.
    ///
    /// Returns `true` if any clamped distance changed.
    pub fn update(&mut self) -> bool {
        let mut sum = [0u32; N_CORNERS];
        for _ in 0..SAMPLES {
            for (acc, &ch) in sum.iter_mut().zip(&self.channels) {
                *acc += self.adc.read_channel(ch) as u32;
            }
        }

        let mut changed = false;
        for (d, acc) in self.distance.iter_mut().zip(sum) {
            let reading = ((acc / SAMPLES) >> self.shift).min(u8::MAX as u32) as u8;
            changed |= *d != reading;
            *d = reading;
        }
        changed
    }

    /// Latest clamped distances, indexed by corner position.
    #[inline]
    pub fn distances(&self) -> [u8; N_CORNERS] {
        self.distance
    }

    pub fn free(self) -> A {
        self.adc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns a fixed value per channel, plus a per-read wobble.
    struct FakeAdc {
        levels: [u16; 16],
        wobble: [i16; 2],
        reads: usize,
    }

    impl AdcRead for FakeAdc {
        fn read_channel(&mut self, ch: u8) -> u16 {
            let w = self.wobble[self.reads % 2];
            self.reads += 1;
            (self.levels[ch as usize] as i16 + w) as u16
        }
    }

    fn adc(levels: &[(u8, u16)]) -> FakeAdc {
        let mut l = [0u16; 16];
        for &(ch, v) in levels {
            l[ch as usize] = v;
        }
        FakeAdc {
            levels: l,
            wobble: [0, 0],
            reads: 0,
        }
    }

    #[test]
    fn averages_and_maps_channels() {
        let mut r = Rangefinders::new(adc(&[(3, 40), (10, 120), (13, 7)]), [3, 10, 13], 0);
        assert!(r.update());
        assert_eq!(r.distances(), [40, 120, 7]);
        assert_eq!(r.free().reads, 30);
    }

    #[test]
    fn clamps_to_byte() {
        let mut r = Rangefinders::new(adc(&[(0, 1023), (1, 256), (2, 255)]), [0, 1, 2], 0);
        r.update();
        assert_eq!(r.distances(), [255, 255, 255]);
    }

    #[test]
    fn twelve_bit_scaling() {
        let mut r = Rangefinders::new(adc(&[(0, 4000), (1, 400), (2, 3)]), [0, 1, 2], 2);
        r.update();
        assert_eq!(r.distances(), [255, 100, 0]);
    }

    #[test]
    fn noise_averages_out_and_reports_no_change() {
        let mut a = adc(&[(0, 50), (1, 60), (2, 70)]);
        a.wobble = [-3, 3];
        let mut r = Rangefinders::new(a, [0, 1, 2], 0);
        assert!(r.update());
        assert!(!r.update());
        assert_eq!(r.distances(), [50, 60, 70]);
    }
}
