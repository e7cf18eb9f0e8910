mod user;

pub use user::{NewUser, Role, Status, User, UserPatch};
