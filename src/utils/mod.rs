// Shared utilities

pub mod encoding;
pub mod io;
