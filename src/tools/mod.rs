//! Agent tools.
//!
//! Every tool returns text-bearing JSON and degrades instead of failing:
//! an unreachable backend becomes an error marker in the result, so the
//! tool-calling loop (and ultimately the model) always has something to
//! work with.

pub mod knowledge;
pub mod registry;
pub mod search;
pub mod slack;
pub mod support;

pub use registry::{Tool, ToolRegistry};
