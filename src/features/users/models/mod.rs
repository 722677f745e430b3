mod user;

pub use user::{StageKind, StudentLevel, User, UserRole};
