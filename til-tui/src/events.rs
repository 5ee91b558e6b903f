//! Event types for the TUI event loop.
//!
//! Store calls run in spawned tasks and report back through these events;
//! errors cross the channel as strings so every variant stays `Clone`.

use crossterm::event::KeyEvent;
use til_core::{Fact, FactId};

#[derive(Debug, Clone)]
pub enum TuiEvent {
    Input(KeyEvent),
    Resize { width: u16, height: u16 },
    /// A fetch finished. `seq` identifies which issued fetch this answers;
    /// anything but the latest is discarded as stale.
    FactsLoaded {
        seq: u64,
        result: Result<Vec<Fact>, String>,
    },
    FactInserted {
        result: Result<Fact, String>,
    },
    VoteApplied {
        fact_id: FactId,
        result: Result<Fact, String>,
    },
}
