pub mod board;
pub mod response;
pub mod thread;
