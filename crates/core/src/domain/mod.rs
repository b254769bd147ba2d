pub mod accounts;
pub mod library;
pub mod search;
pub mod statistics;

pub use library::{LibraryService, LibrarySnapshot, PlayerVerification};
pub use search::GameFilter;
pub use statistics::{breakdown, merge, summarize};
