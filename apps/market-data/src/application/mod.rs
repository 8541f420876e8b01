//! Application Layer
//!
//! Orchestrates domain values through the exchange port:
//!
//! - **Ports**: the exchange client collaborator ([`ports::ExchangePort`])
//! - **Services**: the market data facade
//! - **Tools**: named, JSON-facing wrappers handed to trading agents

pub mod ports;
pub mod services;
pub mod tools;

pub use ports::*;
pub use services::*;
