//! Japanese mahjong hand evaluation: shanten, tile acceptance and win
//! scoring.
//!
//! Shanten queries are answered from lookup tables built once per process.
//! Call [`init`] early to build them in the background, or [`ensure_init`]
//! to build them on the spot; queries made before the tables exist get an
//! approximate answer instead of blocking.

pub mod analysis;
pub mod backend;
pub mod errors;
pub mod meld;
pub mod rule;
pub mod scoring;
pub mod shanten;
pub mod tile;

#[cfg(feature = "python")]
mod python;

pub use analysis::{
    best_acceptance_tiles, calculate_acceptance, can_declare_ready, can_declare_ready_with_melds,
    fourth_tile_opportunities, is_self_wait_violation, is_winning_hand, shanten, shanten_with_melds,
    tile_remaining_count, useful_tiles, useful_tiles_with_melds, AcceptanceInfo,
};
pub use backend::{ensure_init, init, is_ready};
pub use errors::{EvalError, EvalResult};
pub use meld::{Meld, MeldKind};
pub use rule::ScoringRule;
pub use scoring::points::Payment;
pub use scoring::{basic_yaku, score, score_with_rule, ScoringResult, WinContext, YakuEntry};
pub use tile::{dora_from_indicator, tile_from_index, tile_index, Suit, Tile, TileCounts};
