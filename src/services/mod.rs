pub mod clean;
pub mod encoding;
pub mod file_sync;
pub mod filter;
pub mod normalize;
pub mod rebuild;
pub mod session;
pub mod store;
