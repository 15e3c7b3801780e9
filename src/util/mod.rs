pub mod colors;
pub mod format;
pub mod log;
pub mod task;
