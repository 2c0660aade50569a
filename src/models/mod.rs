pub mod book;
pub mod user;

pub use book::{Book, BookChanges, BookInput, BookPatch, BookQuery, NewBook};
pub use user::{NewUser, User};
