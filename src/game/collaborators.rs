//! Interfaces to the services the rules engine talks to but does not own:
//! an external move search for the classic board and game persistence.

use std::collections::BTreeMap;

use crate::chess_errors::{ChessErrors, ChessResult};

/// External move search. Receives a FEN and a depth, answers with one
/// coordinate move such as `e2e4` or `e7e8q`.
pub trait MoveSearchService {
    fn best_move(&self, fen: &str, depth: u8) -> ChessResult<String>;
}

/// What the persistence layer stores for one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub initial_notation: String,
    /// Coordinate move strings in play order.
    pub move_history: Vec<String>,
    pub current_notation: String,
}

pub trait GameStore {
    fn create(&mut self, record: GameRecord) -> ChessResult<u64>;
    fn load(&self, id: u64) -> ChessResult<GameRecord>;
    fn save(&mut self, id: u64, record: GameRecord) -> ChessResult<()>;
}

/// Process-local store, handy for tests.
#[derive(Debug, Default)]
pub struct InMemoryGameStore {
    records: BTreeMap<u64, GameRecord>,
    next_id: u64,
}

impl InMemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameStore for InMemoryGameStore {
    fn create(&mut self, record: GameRecord) -> ChessResult<u64> {
        self.next_id += 1;
        self.records.insert(self.next_id, record);
        Ok(self.next_id)
    }

    fn load(&self, id: u64) -> ChessResult<GameRecord> {
        self.records.get(&id).cloned().ok_or(ChessErrors::RecordNotFound(id))
    }

    fn save(&mut self, id: u64, record: GameRecord) -> ChessResult<()> {
        match self.records.get_mut(&id) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(ChessErrors::RecordNotFound(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(current: &str) -> GameRecord {
        GameRecord {
            initial_notation: "start".to_owned(),
            move_history: Vec::new(),
            current_notation: current.to_owned(),
        }
    }

    #[test]
    fn store_hands_out_fresh_ids_and_overwrites_on_save() {
        let mut store = InMemoryGameStore::new();
        let a = store.create(record("a")).expect("create");
        let b = store.create(record("b")).expect("create");
        assert_ne!(a, b);

        store.save(a, record("a2")).expect("save");
        assert_eq!(store.load(a).expect("load").current_notation, "a2");
        assert_eq!(store.load(b).expect("load").current_notation, "b");
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut store = InMemoryGameStore::new();
        assert_eq!(store.load(9), Err(ChessErrors::RecordNotFound(9)));
        assert_eq!(store.save(9, record("x")), Err(ChessErrors::RecordNotFound(9)));
    }
}
