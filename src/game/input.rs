//! Input State and Recording
//!
//! Four held directions packed into one byte, sampled once per tick.
//! No press-edge semantics: a direction either is or is not held.

use std::sync::atomic::{AtomicU8, Ordering};
use serde::{Serialize, Deserialize};

use crate::core::hash::{StateHash, StateHasher};

// =============================================================================
// KEY CODES
// =============================================================================

/// Key code for A (left).
pub const KEY_A: u32 = 65;
/// Key code for D (right).
pub const KEY_D: u32 = 68;
/// Key code for S (down).
pub const KEY_S: u32 = 83;
/// Key code for W (up).
pub const KEY_W: u32 = 87;

// =============================================================================
// INPUT TYPES
// =============================================================================

/// One of the four logical directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Up the screen
    Up,
    /// Down the screen
    Down,
    /// Left
    Left,
    /// Right
    Right,
}

impl Direction {
    /// Bit for this direction in `InputState::flags`.
    #[inline]
    pub const fn flag(self) -> u8 {
        match self {
            Direction::Up => InputState::FLAG_UP,
            Direction::Down => InputState::FLAG_DOWN,
            Direction::Left => InputState::FLAG_LEFT,
            Direction::Right => InputState::FLAG_RIGHT,
        }
    }

    /// Map a keyboard code (WASD) to a direction.
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            KEY_A => Some(Direction::Left),
            KEY_W => Some(Direction::Up),
            KEY_D => Some(Direction::Right),
            KEY_S => Some(Direction::Down),
            _ => None,
        }
    }
}

/// Held directions for a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputState {
    /// Direction flags (packed bits):
    /// - Bit 0: up
    /// - Bit 1: down
    /// - Bit 2: left
    /// - Bit 3: right
    /// - Bit 4-7: Reserved
    pub flags: u8,
}

impl InputState {
    /// Up flag bit
    pub const FLAG_UP: u8 = 0x01;

    /// Down flag bit
    pub const FLAG_DOWN: u8 = 0x02;

    /// Left flag bit
    pub const FLAG_LEFT: u8 = 0x04;

    /// Right flag bit
    pub const FLAG_RIGHT: u8 = 0x08;

    /// All direction bits
    pub const FLAG_MASK: u8 = 0x0f;

    /// No direction held.
    pub const fn new() -> Self {
        Self { flags: 0 }
    }

    /// Build from raw flags; reserved bits are dropped.
    pub const fn from_flags(flags: u8) -> Self {
        Self { flags: flags & Self::FLAG_MASK }
    }

    /// Build from the four booleans.
    pub const fn from_bools(up: bool, down: bool, left: bool, right: bool) -> Self {
        let mut flags = 0;
        if up {
            flags |= Self::FLAG_UP;
        }
        if down {
            flags |= Self::FLAG_DOWN;
        }
        if left {
            flags |= Self::FLAG_LEFT;
        }
        if right {
            flags |= Self::FLAG_RIGHT;
        }
        Self { flags }
    }

    /// Check a direction.
    #[inline]
    pub fn is_held(&self, direction: Direction) -> bool {
        self.flags & direction.flag() != 0
    }

    /// Set or clear a direction.
    #[inline]
    pub fn set(&mut self, direction: Direction, held: bool) {
        if held {
            self.flags |= direction.flag();
        } else {
            self.flags &= !direction.flag();
        }
    }

    /// Apply a key press or release. Returns false for unmapped keys.
    pub fn handle_key(&mut self, code: u32, pressed: bool) -> bool {
        match Direction::from_key_code(code) {
            Some(direction) => {
                self.set(direction, pressed);
                true
            }
            None => false,
        }
    }

    /// Up held.
    #[inline]
    pub fn up(&self) -> bool {
        self.is_held(Direction::Up)
    }

    /// Down held.
    #[inline]
    pub fn down(&self) -> bool {
        self.is_held(Direction::Down)
    }

    /// Left held.
    #[inline]
    pub fn left(&self) -> bool {
        self.is_held(Direction::Left)
    }

    /// Right held.
    #[inline]
    pub fn right(&self) -> bool {
        self.is_held(Direction::Right)
    }

    /// Check if no direction is held.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.flags == 0
    }
}

// =============================================================================
// SHARED INPUT
// =============================================================================

/// Input flags written by an event source on another thread and read by
/// the simulation once per tick.
///
/// Each flag is independent, so relaxed atomics are enough: a tick sees
/// every press or release that happened before its `snapshot`, or the
/// next tick does.
#[derive(Debug, Default)]
pub struct SharedInput {
    flags: AtomicU8,
}

impl SharedInput {
    /// Nothing held.
    pub const fn new() -> Self {
        Self { flags: AtomicU8::new(0) }
    }

    /// Set or clear a direction.
    pub fn set(&self, direction: Direction, held: bool) {
        if held {
            self.flags.fetch_or(direction.flag(), Ordering::Relaxed);
        } else {
            self.flags.fetch_and(!direction.flag(), Ordering::Relaxed);
        }
    }

    /// Apply a key press or release. Returns false for unmapped keys.
    pub fn handle_key(&self, code: u32, pressed: bool) -> bool {
        match Direction::from_key_code(code) {
            Some(direction) => {
                self.set(direction, pressed);
                true
            }
            None => false,
        }
    }

    /// Read the held directions for this tick.
    pub fn snapshot(&self) -> InputState {
        InputState::from_flags(self.flags.load(Ordering::Relaxed))
    }

    /// Release everything.
    pub fn clear(&self) {
        self.flags.store(0, Ordering::Relaxed);
    }
}

// =============================================================================
// INPUT RECORDING
// =============================================================================

/// Input change at a given tick.
///
/// Only stored when input CHANGES, not every tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDelta {
    /// Tick when this input state began
    pub tick: u32,
    /// The new input state
    pub input: InputState,
}

impl InputDelta {
    /// Create new delta entry.
    pub fn new(tick: u32, input: InputState) -> Self {
        Self { tick, input }
    }
}

/// Delta-compressed input for one session, used for replay.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InputRecording {
    /// Starting tick (usually 0)
    pub start_tick: u32,

    /// Last recorded tick, `None` while nothing has been recorded
    pub end_tick: Option<u32>,

    /// Only ticks where input changed.
    deltas: Vec<InputDelta>,

    /// Last recorded input (for delta comparison)
    #[serde(skip)]
    last_input: InputState,
}

impl InputRecording {
    /// Create an empty recording.
    pub fn new() -> Self {
        Self {
            start_tick: 0,
            end_tick: None,
            deltas: Vec::with_capacity(64),
            last_input: InputState::new(),
        }
    }

    /// Record input for a tick. Stored only if it changed.
    pub fn record(&mut self, tick: u32, input: InputState) {
        self.end_tick = Some(tick);

        if input != self.last_input {
            self.deltas.push(InputDelta::new(tick, input));
            self.last_input = input;
        }
    }

    /// Input in effect at `tick`.
    pub fn input_at(&self, tick: u32) -> InputState {
        // Last delta at or before this tick
        let idx = self.deltas.partition_point(|d| d.tick <= tick);

        if idx == 0 {
            InputState::new()
        } else {
            self.deltas[idx - 1].input
        }
    }

    /// All deltas.
    pub fn deltas(&self) -> &[InputDelta] {
        &self.deltas
    }

    /// Ticks covered, `start_tick..=end_tick`. Zero when empty.
    pub fn tick_count(&self) -> u32 {
        match self.end_tick {
            Some(end) if end >= self.start_tick => end - self.start_tick + 1,
            _ => 0,
        }
    }

    /// Number of delta entries.
    pub fn delta_count(&self) -> usize {
        self.deltas.len()
    }

    /// Finalize the recording.
    pub fn finalize(&mut self, end_tick: u32) {
        self.end_tick = Some(end_tick);
    }

    /// Iterate `(tick, input)` for every tick from `start_tick` to
    /// `end_tick` inclusive. Yields nothing for an empty recording.
    pub fn replay_iter(&self) -> ReplayIterator<'_> {
        ReplayIterator {
            recording: self,
            next_tick: self.end_tick.map(|_| self.start_tick),
            delta_idx: 0,
            current: InputState::new(),
        }
    }

    /// Hash of the recorded deltas.
    pub fn compute_hash(&self) -> StateHash {
        let mut hasher = StateHasher::for_input_recording();
        hasher.update_u32(self.start_tick);
        match self.end_tick {
            Some(end) => {
                hasher.update_u8(1);
                hasher.update_u32(end);
            }
            None => hasher.update_u8(0),
        }
        for delta in &self.deltas {
            hasher.update_u32(delta.tick);
            hasher.update_u8(delta.input.flags);
        }
        hasher.finalize()
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        let mut recording: Self = serde_json::from_str(s)?;
        recording.last_input = recording
            .deltas
            .last()
            .map(|d| d.input)
            .unwrap_or_default();
        Ok(recording)
    }
}

/// Iterator for replaying inputs tick-by-tick.
pub struct ReplayIterator<'a> {
    recording: &'a InputRecording,
    next_tick: Option<u32>,
    delta_idx: usize,
    current: InputState,
}

impl<'a> Iterator for ReplayIterator<'a> {
    type Item = (u32, InputState);

    fn next(&mut self) -> Option<Self::Item> {
        let tick = self.next_tick?;
        match self.recording.end_tick {
            Some(end) if tick <= end => {}
            _ => return None,
        }

        while let Some(delta) = self.recording.deltas.get(self.delta_idx) {
            if delta.tick > tick {
                break;
            }
            self.current = delta.input;
            self.delta_idx += 1;
        }

        self.next_tick = tick.checked_add(1);
        Some((tick, self.current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_input_flags() {
        let mut input = InputState::new();
        assert!(input.is_idle());

        input.set(Direction::Up, true);
        assert!(input.up());
        assert!(!input.down());

        input.set(Direction::Right, true);
        assert!(input.up() && input.right());

        input.set(Direction::Up, false);
        assert!(!input.up());
        assert!(input.right());
    }

    #[test]
    fn test_from_bools_matches_set() {
        let a = InputState::from_bools(true, false, true, false);
        let mut b = InputState::new();
        b.set(Direction::Up, true);
        b.set(Direction::Left, true);
        assert_eq!(a, b);
        assert_eq!(InputState::from_flags(0xff).flags, InputState::FLAG_MASK);
    }

    #[test]
    fn test_handle_key_wasd() {
        let mut input = InputState::new();
        assert!(input.handle_key(KEY_W, true));
        assert!(input.handle_key(KEY_D, true));
        assert!(input.up() && input.right());

        assert!(input.handle_key(KEY_W, false));
        assert!(!input.up());

        // Arrow keys are not mapped
        assert!(!input.handle_key(37, true));
        assert_eq!(input, InputState::from_bools(false, false, false, true));
    }

    #[test]
    fn test_shared_input_across_threads() {
        let shared = Arc::new(SharedInput::new());
        let writer = Arc::clone(&shared);

        std::thread::spawn(move || {
            writer.handle_key(KEY_A, true);
            writer.handle_key(KEY_S, true);
            writer.handle_key(KEY_S, false);
        })
        .join()
        .unwrap();

        let snapshot = shared.snapshot();
        assert!(snapshot.left());
        assert!(!snapshot.down());

        shared.clear();
        assert!(shared.snapshot().is_idle());
    }

    #[test]
    fn test_recording_delta_compression() {
        let mut recording = InputRecording::new();
        let right = InputState::from_bools(false, false, false, true);

        recording.record(0, right);
        recording.record(1, right);
        recording.record(2, right);
        assert_eq!(recording.delta_count(), 1);

        recording.record(3, InputState::new());
        assert_eq!(recording.delta_count(), 2);
    }

    #[test]
    fn test_recording_input_at() {
        let mut recording = InputRecording::new();
        let up = InputState::from_bools(true, false, false, false);
        let left = InputState::from_bools(false, false, true, false);

        recording.record(10, up);
        recording.record(20, left);

        assert!(recording.input_at(5).is_idle());
        assert_eq!(recording.input_at(10), up);
        assert_eq!(recording.input_at(15), up);
        assert_eq!(recording.input_at(20), left);
        assert_eq!(recording.input_at(100), left);
    }

    #[test]
    fn test_replay_iterator() {
        let mut recording = InputRecording::new();
        let down = InputState::from_bools(false, true, false, false);
        let right = InputState::from_bools(false, false, false, true);

        recording.record(0, down);
        recording.record(3, right);
        recording.finalize(5);

        let frames: Vec<_> = recording.replay_iter().collect();
        assert_eq!(frames.len(), 6);
        assert_eq!(frames[2], (2, down));
        assert_eq!(frames[3], (3, right));
        assert_eq!(frames[5], (5, right));
    }

    #[test]
    fn test_empty_recording_replays_nothing() {
        let recording = InputRecording::new();
        assert_eq!(recording.end_tick, None);
        assert_eq!(recording.tick_count(), 0);
        assert_eq!(recording.replay_iter().count(), 0);

        // A single recorded tick is not the same as an empty recording
        let mut one = InputRecording::new();
        one.record(0, InputState::new());
        assert_eq!(one.tick_count(), 1);
        assert_eq!(one.replay_iter().collect::<Vec<_>>(), vec![(0, InputState::new())]);
        assert_ne!(one.compute_hash(), recording.compute_hash());
    }

    #[test]
    fn test_replay_iterator_stops_at_last_tick() {
        let mut recording = InputRecording::new();
        recording.start_tick = u32::MAX - 1;
        recording.finalize(u32::MAX);
        assert_eq!(recording.tick_count(), 2);
        assert_eq!(recording.replay_iter().count(), 2);
    }

    #[test]
    fn test_recording_json_round_trip_keeps_compression() {
        let mut recording = InputRecording::new();
        let up = InputState::from_bools(true, false, false, false);
        recording.record(0, up);
        recording.finalize(4);

        let json = recording.to_json().unwrap();
        let mut restored = InputRecording::from_json(&json).unwrap();
        assert_eq!(restored.compute_hash(), recording.compute_hash());

        // Same input again must not add a delta after restore
        restored.record(5, up);
        assert_eq!(restored.delta_count(), 1);
    }
}
