pub mod guards;
pub mod router;
pub mod routes;

pub use router::{BotState, Presence, bot_router};
