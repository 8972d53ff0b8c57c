//! Particle palette and weighted color sampling

use super::random::RandomSource;

/// One of the six particle colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleColor {
    LightGray,
    Yellow,
    Green,
    Blue,
    Red,
    Gold,
}

impl ParticleColor {
    /// All colors in sampling order
    pub const ALL: [ParticleColor; 6] = [
        ParticleColor::LightGray,
        ParticleColor::Yellow,
        ParticleColor::Green,
        ParticleColor::Blue,
        ParticleColor::Red,
        ParticleColor::Gold,
    ];

    /// Map a percentile draw in [0, 100) to a color.
    ///
    /// Gray and the four accents get 15% each, gold takes the remaining 25%.
    /// Values >= 100 land on gold.
    pub fn from_percentile(u: u32) -> Self {
        match u {
            0..15 => ParticleColor::LightGray,
            15..30 => ParticleColor::Yellow,
            30..45 => ParticleColor::Green,
            45..60 => ParticleColor::Blue,
            60..75 => ParticleColor::Red,
            _ => ParticleColor::Gold,
        }
    }

    /// Draw a color from the weighted palette
    pub fn sample<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        Self::from_percentile(rng.next_percentile())
    }

    /// Packed 0xRRGGBB value
    pub fn hex(&self) -> u32 {
        match self {
            ParticleColor::LightGray => 0xD3D3D3,
            ParticleColor::Yellow => 0xFBBC05,
            ParticleColor::Green => 0x34A853,
            ParticleColor::Blue => 0x4285F4,
            ParticleColor::Red => 0xEA4335,
            ParticleColor::Gold => 0xFFD700,
        }
    }

    /// Opaque RGBA in [0, 1]
    pub fn rgba(&self) -> [f32; 4] {
        let hex = self.hex();
        let channel = |shift: u32| ((hex >> shift) & 0xFF) as f32 / 255.0;
        [channel(16), channel(8), channel(0), 1.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_percentile_boundaries() {
        assert_eq!(ParticleColor::from_percentile(0), ParticleColor::LightGray);
        assert_eq!(ParticleColor::from_percentile(14), ParticleColor::LightGray);
        assert_eq!(ParticleColor::from_percentile(15), ParticleColor::Yellow);
        assert_eq!(ParticleColor::from_percentile(29), ParticleColor::Yellow);
        assert_eq!(ParticleColor::from_percentile(30), ParticleColor::Green);
        assert_eq!(ParticleColor::from_percentile(45), ParticleColor::Blue);
        assert_eq!(ParticleColor::from_percentile(60), ParticleColor::Red);
        assert_eq!(ParticleColor::from_percentile(74), ParticleColor::Red);
        assert_eq!(ParticleColor::from_percentile(75), ParticleColor::Gold);
        assert_eq!(ParticleColor::from_percentile(99), ParticleColor::Gold);
    }

    #[test]
    fn test_weighted_frequencies() {
        const DRAWS: usize = 100_000;
        let mut rng = Pcg32::seed_from_u64(2024);
        let mut counts = [0usize; 6];
        for _ in 0..DRAWS {
            let color = ParticleColor::sample(&mut rng);
            let idx = ParticleColor::ALL.iter().position(|c| *c == color).unwrap();
            counts[idx] += 1;
        }

        let expected = [0.15, 0.15, 0.15, 0.15, 0.15, 0.25];
        for (count, p) in counts.iter().zip(expected) {
            let observed = *count as f64 / DRAWS as f64;
            // Several standard deviations at this sample size
            assert!(
                (observed - p).abs() < 0.008,
                "observed {observed} expected {p}"
            );
        }
    }

    #[test]
    fn test_rgba() {
        assert_eq!(ParticleColor::Gold.rgba(), [1.0, 215.0 / 255.0, 0.0, 1.0]);
        assert_eq!(ParticleColor::Blue.hex(), 0x4285F4);
    }
}
