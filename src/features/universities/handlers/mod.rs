pub mod university_handler;

pub use university_handler::*;
