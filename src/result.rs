use crate::error::Error as JbbsErr;

/// Shorthand for results carrying the crate's [`Error`](crate::error::Error).
pub type Result<T> = std::result::Result<T, JbbsErr>;
