//! MCP server surface: wire types, tool catalog, handlers, stdio loop

pub mod handlers;
pub mod protocol;
pub mod stdio;
pub mod tools;
