use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Player intents accepted by a game session, independent of the front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ClientMessage {
    StartGame,
    SubmitWord { word: String },
    ResetGame,
}
