pub mod launcher;
pub mod runtime;
pub mod server;
