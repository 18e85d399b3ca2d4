pub mod account;
pub mod blogs;
pub mod comments;
