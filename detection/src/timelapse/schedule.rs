use std::ops::Range;
use std::time::Duration;

/// Encoder ticks on which display slot `slot` is visible.
///
/// Slot `i` covers `[i * hold, (i + 1) * hold)` of video time and the
/// encoder emits a frame every `1 / fps`; the returned range holds every
/// tick whose timestamp falls inside the slot. With a 100 ms hold at 25 fps
/// this yields 3, 2, 3, 2, ... ticks per slot.
pub fn ticks_for_slot(slot: u64, hold: Duration, fps: u32) -> Range<u64> {
    let first_tick = |slot: u64| -> u64 {
        let numerator = slot as u128 * hold.as_micros() * fps as u128;
        numerator.div_ceil(1_000_000) as u64
    };
    first_tick(slot)..first_tick(slot + 1)
}

/// Ticks actually emitted for `slot` when the encoder's next free tick is
/// `next_free`.
///
/// Same as [`ticks_for_slot`] while the hold spans at least one tick. A
/// shorter hold would leave the slot empty, so the still gets the next free
/// tick instead and the video runs slightly longer than scheduled.
pub fn emitted_ticks(slot: u64, hold: Duration, fps: u32, next_free: u64) -> Range<u64> {
    let scheduled = ticks_for_slot(slot, hold, fps);
    let start = scheduled.start.max(next_free);
    let end = scheduled.end.max(start + 1);
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOLD: Duration = Duration::from_millis(100);

    #[test]
    fn test_default_pattern() {
        let counts: Vec<u64> = (0..6)
            .map(|slot| {
                let r = ticks_for_slot(slot, HOLD, 25);
                r.end - r.start
            })
            .collect();
        assert_eq!(counts, vec![3, 2, 3, 2, 3, 2]);
    }

    #[test]
    fn test_slots_are_contiguous() {
        for slot in 0..50 {
            assert_eq!(
                ticks_for_slot(slot, HOLD, 25).end,
                ticks_for_slot(slot + 1, HOLD, 25).start
            );
        }
    }

    #[test]
    fn test_total_length_matches_hold() {
        // 10 slots of 100 ms at 25 fps: one second, 25 ticks.
        assert_eq!(ticks_for_slot(9, HOLD, 25).end, 25);
    }

    #[test]
    fn test_hold_shorter_than_tick_can_be_empty() {
        let hold = Duration::from_millis(10);
        assert!(ticks_for_slot(1, hold, 25).is_empty());
    }

    #[test]
    fn test_emitted_matches_schedule_for_default_hold() {
        let mut next = 0;
        for slot in 0..10 {
            let emitted = emitted_ticks(slot, HOLD, 25, next);
            assert_eq!(emitted, ticks_for_slot(slot, HOLD, 25));
            next = emitted.end;
        }
    }

    #[test]
    fn test_short_hold_still_gets_one_tick_each() {
        let hold = Duration::from_millis(10);
        let mut next = 0;
        let mut emitted = Vec::new();
        for slot in 0..3 {
            let ticks = emitted_ticks(slot, hold, 25, next);
            next = ticks.end;
            emitted.push(ticks);
        }
        assert_eq!(emitted, vec![0..1, 1..2, 2..3]);
    }
}
