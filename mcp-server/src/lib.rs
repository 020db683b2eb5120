// JSON-RPC stdio surface over the ticket engine
pub mod config;
pub mod mcp_handler;
pub mod source;
pub mod use_cases;

pub use mcp_handler::*;
pub use use_cases::*;
