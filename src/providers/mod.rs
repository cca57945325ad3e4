//! Providers - external data sources
//!
//! The core never performs raw networking; these clients gather chain
//! probes, verified source text, and price data, then hand plain values to
//! the engine.

pub mod etherscan;
pub mod rpc;
pub mod subgraph;

pub use etherscan::SourceClient;
pub use rpc::RpcClient;
pub use subgraph::PriceClient;
