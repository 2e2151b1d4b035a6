pub mod game;
pub mod messages;
pub mod user;
pub mod errors;

pub type PlayerId = uuid::Uuid;

// Re-export all types
pub use game::*;
pub use messages::*;
pub use user::*;
pub use errors::*;
