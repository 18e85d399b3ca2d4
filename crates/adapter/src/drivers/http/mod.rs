mod driver;
mod handlers;

pub use driver::{HttpConfig, HttpDriver};
