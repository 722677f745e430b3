pub mod report_handler;
pub mod timeline_handler;

pub use report_handler::*;
pub use timeline_handler::*;
