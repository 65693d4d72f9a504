//! In-memory store of captured stills.

use crate::error::Result;
use crate::pixel_buffer::PixelBuffer;
use crate::traits::StillCodec;
use chrono::{DateTime, Local};
use std::sync::Arc;
use std::time::Instant;

/// One encoded still and when it was taken.
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    encoded_image: Arc<[u8]>,
    captured_at: Instant,
    wall_clock: DateTime<Local>,
}

impl CapturedFrame {
    pub fn new(encoded_image: Vec<u8>, captured_at: Instant, wall_clock: DateTime<Local>) -> Self {
        Self {
            encoded_image: encoded_image.into(),
            captured_at,
            wall_clock,
        }
    }

    pub fn encoded_image(&self) -> &[u8] {
        &self.encoded_image
    }

    pub fn captured_at(&self) -> Instant {
        self.captured_at
    }

    pub fn wall_clock(&self) -> DateTime<Local> {
        self.wall_clock
    }
}

/// Append-only list of captured frames, in capture order.
///
/// There is no upper bound; the store is emptied when monitoring stops.
#[derive(Debug, Default)]
pub struct CaptureStore {
    frames: Vec<CapturedFrame>,
}

impl CaptureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encodes `buffer` and appends it. Spacing between captures is the
    /// caller's job.
    pub fn capture(
        &mut self,
        buffer: &PixelBuffer,
        codec: &dyn StillCodec,
        at: Instant,
    ) -> Result<&CapturedFrame> {
        let encoded = codec.encode(buffer)?;
        self.frames
            .push(CapturedFrame::new(encoded, at, Local::now()));
        Ok(&self.frames[self.frames.len() - 1])
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[CapturedFrame] {
        &self.frames
    }

    pub fn last(&self) -> Option<&CapturedFrame> {
        self.frames.last()
    }

    /// Copy of the list for a background consumer. Images are shared.
    pub fn snapshot(&self) -> Vec<CapturedFrame> {
        self.frames.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingCodec, RawCodec};
    use std::time::Duration;

    #[test]
    fn test_capture_appends_in_order() {
        let mut store = CaptureStore::new();
        let codec = RawCodec;
        let t0 = Instant::now();

        store
            .capture(&PixelBuffer::filled(2, 2, [1, 1, 1, 255]), &codec, t0)
            .unwrap();
        store
            .capture(
                &PixelBuffer::filled(2, 2, [2, 2, 2, 255]),
                &codec,
                t0 + Duration::from_secs(1),
            )
            .unwrap();

        assert_eq!(store.len(), 2);
        let decoded = codec.decode(store.frames()[1].encoded_image()).unwrap();
        assert_eq!(decoded.pixel(0, 0), Some([2, 2, 2, 255]));
        assert_eq!(store.last().unwrap().captured_at(), t0 + Duration::from_secs(1));
    }

    #[test]
    fn test_failed_encode_stores_nothing() {
        let mut store = CaptureStore::new();
        let result = store.capture(&PixelBuffer::filled(1, 1, [0; 4]), &FailingCodec, Instant::now());

        assert!(result.is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_snapshot_survives_clear() {
        let mut store = CaptureStore::new();
        store
            .capture(&PixelBuffer::filled(1, 1, [9; 4]), &RawCodec, Instant::now())
            .unwrap();

        let snapshot = store.snapshot();
        store.clear();

        assert!(store.is_empty());
        assert_eq!(snapshot.len(), 1);
        assert!(!snapshot[0].encoded_image().is_empty());
    }
}
