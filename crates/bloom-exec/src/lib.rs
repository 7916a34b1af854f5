pub mod assistant;
pub mod client;
pub mod contracts;
pub mod driver;
pub mod http;
pub mod orchestrator;
pub mod portfolio;
pub mod simulated;

pub use assistant::*;
pub use client::*;
pub use driver::*;
pub use http::HttpAnalysisClient;
pub use orchestrator::*;
pub use portfolio::*;
pub use simulated::SimulatedAnalysisClient;
