pub mod books;

pub use books::{BookError, BookListing, BookLookup, BookService};
