pub mod files;

pub use files::{atomic_write, config_file, ensure_dir, log_dir, read_file};
