pub mod config;
pub mod script;
pub mod task;

pub use config::*;
pub use script::*;
pub use task::*;
