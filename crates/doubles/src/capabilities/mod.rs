//! Capability traits implemented both by real types and by their doubles

mod list;

pub use list::ListCapability;
