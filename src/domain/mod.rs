pub mod contact;
pub mod maidenhead;
pub mod pagination;
pub mod types;
pub mod user;
