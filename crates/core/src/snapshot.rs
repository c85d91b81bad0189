use crate::types::{Rgb, ShapeId, BOARD_SIZE, HAND_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotSnapshot {
    pub piece_id: u32,
    pub shape: ShapeId,
    pub color: Rgb,
    /// Whether the piece fits anywhere on the current board
    pub placeable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionSnapshot {
    pub board: [[bool; BOARD_SIZE as usize]; BOARD_SIZE as usize],
    pub hand: [Option<SlotSnapshot>; HAND_SIZE],
    pub score: u32,
    pub high_score: u32,
    pub game_over: bool,
    pub episode_id: u32,
    pub piece_id: u32,
}

impl SessionSnapshot {
    pub fn clear(&mut self) {
        self.board = [[false; BOARD_SIZE as usize]; BOARD_SIZE as usize];
        self.hand = [None; HAND_SIZE];
        self.score = 0;
        self.high_score = 0;
        self.game_over = false;
        self.episode_id = 0;
        self.piece_id = 0;
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }

    pub fn filled_count(&self) -> usize {
        self.board.iter().flatten().filter(|&&filled| filled).count()
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            board: [[false; BOARD_SIZE as usize]; BOARD_SIZE as usize],
            hand: [None; HAND_SIZE],
            score: 0,
            high_score: 0,
            game_over: false,
            episode_id: 0,
            piece_id: 0,
        }
    }
}
