mod user;

pub(crate) use user::User;
pub use user::UserKey;
