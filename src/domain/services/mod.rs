mod auth;
mod biometrics;
mod catalog;
mod chat;
mod sessions;
pub mod ticker;

#[cfg(test)]
pub mod testing;

pub use auth::*;
pub use biometrics::*;
pub use catalog::*;
pub use chat::*;
pub use sessions::*;
