pub mod department_handler;

pub use department_handler::*;
