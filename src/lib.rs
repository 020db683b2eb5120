// Ticket verification and near-miss matching for published lottery draws
pub mod checker;
pub mod close_miss;
pub mod feed;
pub mod provider;
pub mod types;
pub mod utils;

pub use checker::*;
pub use close_miss::*;
pub use feed::*;
pub use provider::*;
pub use types::*;
pub use utils::*;
