//! JSON-RPC API Layer
//!
//! Implements the JSON-RPC 2.0 server for the Waitline queue service. The
//! transport only parses requests and maps errors; all queue semantics live
//! in waitline-core.

pub mod error;
pub mod handler;
pub mod server;
pub mod types;

pub use server::RpcServer;
