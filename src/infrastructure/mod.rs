pub mod backends;
pub mod renderers;
pub mod speech;
pub mod storage;
