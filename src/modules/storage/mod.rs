//! Object storage for uploaded documents (stage reports, CVs, publication
//! attachments).

mod object_store;

pub use object_store::{FileVisibility, ObjectStore};
