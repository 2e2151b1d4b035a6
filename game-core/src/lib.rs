pub mod errors;
pub mod game_state;
pub mod scoring;
pub mod turn_timer;
pub mod word_validation;
pub mod game_events;

// Re-export main components
pub use errors::*;
pub use game_state::*;
pub use scoring::*;
pub use turn_timer::*;
pub use word_validation::*;
pub use game_events::*;
