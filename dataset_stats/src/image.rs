//! Raw 8-bit pixel buffers as handed over by a dataset.

use thiserror::Error;

/// Number of channels statistics are reported for.
pub const STAT_CHANNELS: usize = 3;

/// Largest 8-bit intensity; statistics are computed on `value / MAX_INTENSITY`.
pub const MAX_INTENSITY: f64 = 255.0;

/// Shape of an image: `(height, width)` or `(height, width, channels)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub height: usize,
    pub width: usize,
    /// `None` for a 2-D buffer without a channel axis.
    pub channels: Option<usize>,
}

impl ImageSize {
    pub fn gray(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            channels: None,
        }
    }

    pub fn with_channels(height: usize, width: usize, channels: usize) -> Self {
        Self {
            height,
            width,
            channels: Some(channels),
        }
    }

    /// Number of spatial samples (the channel axis is not counted).
    pub fn pixel_count(&self) -> usize {
        self.height * self.width
    }

    /// Channel stride of the interleaved buffer.
    pub fn channel_count(&self) -> usize {
        self.channels.unwrap_or(1)
    }

    /// Total number of values in the buffer.
    pub fn value_count(&self) -> usize {
        self.pixel_count() * self.channel_count()
    }

    /// Maps each statistic channel to a source channel of the buffer.
    ///
    /// The first three channels are used as present. Statistic channels past
    /// the last present one repeat it, so a gray image feeds all three from
    /// channel 0 and a 2-channel image maps to `[0, 1, 1]`.
    pub fn source_channels(&self) -> [usize; STAT_CHANNELS] {
        let last = self.channel_count().min(STAT_CHANNELS) - 1;
        std::array::from_fn(|stat| stat.min(last))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("image has no pixels ({height}x{width})")]
    EmptyImage { height: usize, width: usize },

    #[error("channel axis is present but has zero channels")]
    ZeroChannels,

    #[error("pixel buffer has {actual} values, size descriptor requires {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },
}

/// Interleaved (HWC) 8-bit image.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    size: ImageSize,
    pixels: Vec<u8>,
}

impl Image {
    pub fn new(size: ImageSize, pixels: Vec<u8>) -> Result<Self, ImageError> {
        if size.height == 0 || size.width == 0 {
            return Err(ImageError::EmptyImage {
                height: size.height,
                width: size.width,
            });
        }
        if size.channels == Some(0) {
            return Err(ImageError::ZeroChannels);
        }
        if pixels.len() != size.value_count() {
            return Err(ImageError::BufferSizeMismatch {
                expected: size.value_count(),
                actual: pixels.len(),
            });
        }

        Ok(Self { size, pixels })
    }

    /// Image of the given shape with every value set to `value`.
    pub fn filled(size: ImageSize, value: u8) -> Result<Self, ImageError> {
        Self::new(size, vec![value; size.value_count()])
    }

    pub fn size(&self) -> ImageSize {
        self.size
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Iterates the values of one buffer channel.
    pub fn channel(&self, channel: usize) -> impl Iterator<Item = u8> + Clone + '_ {
        debug_assert!(channel < self.size.channel_count());
        self.pixels
            .iter()
            .skip(channel)
            .step_by(self.size.channel_count())
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_buffer_length() {
        let size = ImageSize::with_channels(2, 3, 3);
        assert!(Image::new(size, vec![0; 18]).is_ok());
        assert_eq!(
            Image::new(size, vec![0; 17]),
            Err(ImageError::BufferSizeMismatch {
                expected: 18,
                actual: 17
            })
        );
    }

    #[test]
    fn test_new_rejects_empty_shapes() {
        assert!(matches!(
            Image::new(ImageSize::gray(0, 5), vec![]),
            Err(ImageError::EmptyImage { .. })
        ));
        assert_eq!(
            Image::new(ImageSize::with_channels(1, 1, 0), vec![]),
            Err(ImageError::ZeroChannels)
        );
    }

    #[test]
    fn test_pixel_count_ignores_channel_axis() {
        let size = ImageSize::with_channels(4, 5, 4);
        assert_eq!(size.pixel_count(), 20);
        assert_eq!(size.value_count(), 80);
        assert_eq!(ImageSize::gray(4, 5).value_count(), 20);
    }

    #[test]
    fn test_source_channels() {
        assert_eq!(ImageSize::gray(1, 1).source_channels(), [0, 0, 0]);
        assert_eq!(ImageSize::with_channels(1, 1, 1).source_channels(), [0, 0, 0]);
        assert_eq!(ImageSize::with_channels(1, 1, 2).source_channels(), [0, 1, 1]);
        assert_eq!(ImageSize::with_channels(1, 1, 3).source_channels(), [0, 1, 2]);
        assert_eq!(ImageSize::with_channels(1, 1, 4).source_channels(), [0, 1, 2]);
    }

    #[test]
    fn test_channel_iterates_interleaved_values() {
        let image = Image::new(
            ImageSize::with_channels(1, 2, 4),
            vec![1, 2, 3, 4, 5, 6, 7, 8],
        )
        .unwrap();
        assert_eq!(image.channel(0).collect::<Vec<_>>(), vec![1, 5]);
        assert_eq!(image.channel(3).collect::<Vec<_>>(), vec![4, 8]);
    }
}
