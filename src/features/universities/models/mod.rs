mod university;

pub use university::University;
