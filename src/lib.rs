pub mod app;
pub mod cart;
pub mod catalog;
pub mod client;
pub mod config;
pub mod contact;
pub mod errors;
pub mod state;
pub mod storage;
pub mod users;

#[cfg(test)]
mod test_support;
