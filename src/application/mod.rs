pub mod cli;
pub mod context;
pub mod repl;
pub mod views;
