pub mod report_type_handler;

pub use report_type_handler::*;
