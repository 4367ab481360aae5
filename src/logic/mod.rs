//! Competition logic: ranking-round bout orders, seeding, and direct-elimination brackets.

mod bout_order;
mod bracket;
mod groups;
mod seeding;

pub use bout_order::{
    curated_bout_order, exhaustive_bout_order, generate_bout_order, BoutOrder, BoutPair,
    MAX_CURATED_POOL, MIN_CURATED_POOL,
};
pub use bracket::{
    advance_winner, calculate_final_placements, deserialize_bracket, generate_de_bracket,
    is_bracket_complete, retract_result, seeding_order, serialize_bracket,
};
pub use groups::BracketBook;
pub use seeding::seeds_from_ranking;
