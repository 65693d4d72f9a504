use crate::pixel_buffer::PixelBuffer;

/// Color thresholds for flame-like pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireConfig {
    /// Red must be strictly above this.
    pub min_red: u8,
    /// Green must be strictly below this.
    pub max_green: u8,
    /// Blue must be strictly below this.
    pub max_blue: u8,
    /// Fraction of fire pixels that must be exceeded.
    pub min_ratio: f64,
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            min_red: 200,
            max_green: 140,
            max_blue: 40,
            min_ratio: 0.01,
        }
    }
}

impl FireConfig {
    #[inline]
    pub fn is_fire_pixel(&self, rgba: &[u8]) -> bool {
        rgba[0] > self.min_red && rgba[1] < self.max_green && rgba[2] < self.max_blue
    }
}

/// Share of pixels that look like flame, in `[0, 1]`. Empty buffers give 0.
pub fn fire_ratio(buffer: &PixelBuffer, config: &FireConfig) -> f64 {
    let total = buffer.pixel_count();
    if total == 0 {
        return 0.0;
    }
    let fire = buffer.pixels().filter(|px| config.is_fire_pixel(px)).count();
    fire as f64 / total as f64
}

pub fn detect_fire(buffer: &PixelBuffer, config: &FireConfig) -> bool {
    fire_ratio(buffer, config) > config.min_ratio
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLAME: [u8; 4] = [250, 100, 10, 255];
    const GRASS: [u8; 4] = [40, 160, 40, 255];

    /// 10x10 buffer with the first `fire_pixels` pixels flame-colored.
    fn scene(fire_pixels: usize) -> PixelBuffer {
        let mut data = Vec::with_capacity(400);
        for i in 0..100 {
            data.extend_from_slice(if i < fire_pixels { &FLAME } else { &GRASS });
        }
        PixelBuffer::new(10, 10, data).unwrap()
    }

    #[test]
    fn test_uniform_black_and_white_are_not_fire() {
        let config = FireConfig::default();
        assert!(!detect_fire(&PixelBuffer::filled(8, 8, [0, 0, 0, 255]), &config));
        assert!(!detect_fire(&PixelBuffer::filled(8, 8, [255, 255, 255, 255]), &config));
    }

    #[test]
    fn test_ratio_must_exceed_one_percent() {
        let config = FireConfig::default();
        assert_eq!(fire_ratio(&scene(1), &config), 0.01);
        assert!(!detect_fire(&scene(1), &config));
        assert!(detect_fire(&scene(2), &config));
    }

    #[test]
    fn test_thresholds_are_strict() {
        let config = FireConfig::default();
        assert!(config.is_fire_pixel(&[201, 139, 39, 0]));
        assert!(!config.is_fire_pixel(&[200, 100, 10, 255]));
        assert!(!config.is_fire_pixel(&[250, 140, 10, 255]));
        assert!(!config.is_fire_pixel(&[250, 100, 40, 255]));
    }

    #[test]
    fn test_alpha_is_ignored() {
        let config = FireConfig::default();
        let transparent_flame = PixelBuffer::filled(4, 4, [250, 100, 10, 0]);
        assert!(detect_fire(&transparent_flame, &config));
    }

    #[test]
    fn test_empty_buffer_has_no_fire() {
        let config = FireConfig::default();
        assert_eq!(fire_ratio(&PixelBuffer::empty(), &config), 0.0);
        assert!(!detect_fire(&PixelBuffer::empty(), &config));
    }

    #[test]
    fn test_custom_ratio() {
        let config = FireConfig {
            min_ratio: 0.5,
            ..FireConfig::default()
        };
        assert!(!detect_fire(&scene(50), &config));
        assert!(detect_fire(&scene(51), &config));
    }
}
