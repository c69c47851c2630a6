mod antidoping;
mod auth;
mod backend;
mod biometrics;
mod calendar;
mod catalog;
mod clock;
mod dental;
mod document;
mod form;
mod image;
mod labs;
mod language;
mod library;
mod message;
mod ophthalmology;
mod prescription;
mod session;
mod slash_commands;
mod speech;
mod storage;
mod vitals;

pub use antidoping::*;
pub use auth::*;
pub use backend::*;
pub use biometrics::*;
pub use calendar::*;
pub use catalog::*;
pub use clock::*;
pub use dental::*;
pub use document::*;
pub use form::*;
pub use image::*;
pub use labs::*;
pub use language::*;
pub use library::*;
pub use message::*;
pub use ophthalmology::*;
pub use prescription::*;
pub use session::*;
pub use slash_commands::*;
pub use speech::*;
pub use storage::*;
pub use vitals::*;
