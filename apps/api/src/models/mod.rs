pub mod account;
pub mod item;
pub mod user;

pub use item::{Amount, DerogatoryItem, ItemKind};
pub use user::UserData;
