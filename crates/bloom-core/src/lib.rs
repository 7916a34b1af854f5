pub mod actions;
pub mod config;
pub mod error;
pub mod export;
pub mod fallback;
pub mod model;
pub mod reducer;
pub mod state;
pub mod workflow;

pub use actions::*;
pub use error::*;
pub use model::*;
pub use reducer::*;
pub use state::*;
