//! Hand module - the player's piece slots
//!
//! A hand has a fixed number of ordered slots. Each slot is empty or holds one
//! piece; pieces leave the hand only by being placed.

use crate::shapes::PieceShape;
use crate::types::HAND_SIZE;

/// A catalog shape dealt into a hand slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    /// Monotonic id, unique within a session
    pub id: u32,
    pub shape: PieceShape,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    slots: [Option<Piece>; HAND_SIZE],
}

impl Hand {
    /// Create an empty hand
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a hand from explicit slot contents
    pub fn from_slots(slots: [Option<Piece>; HAND_SIZE]) -> Self {
        Self { slots }
    }

    pub fn slots(&self) -> &[Option<Piece>; HAND_SIZE] {
        &self.slots
    }

    /// Piece in `slot`; None if the slot is empty or out of range
    pub fn get(&self, slot: usize) -> Option<&Piece> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Remove and return the piece in `slot`
    pub fn take(&mut self, slot: usize) -> Option<Piece> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    /// Put a piece into an empty slot.
    /// Returns false if the slot is occupied or out of range.
    pub fn put(&mut self, slot: usize, piece: Piece) -> bool {
        match self.slots.get_mut(slot) {
            Some(entry) if entry.is_none() => {
                *entry = Some(piece);
                true
            }
            _ => false,
        }
    }

    /// True when every slot is empty
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Occupied slots as `(slot_index, piece)`
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &Piece)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|p| (i, p)))
    }

    /// Empty every slot
    pub fn clear(&mut self) {
        self.slots = [None; HAND_SIZE];
    }
}
