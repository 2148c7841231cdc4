/// Default server host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_PORT: &str = "3001";

/// Default maximum size of one image part in bytes
pub use common::DEFAULT_MAX_FILE_SIZE;

/// Default maximum size of a whole create request in bytes (50 MiB)
pub const DEFAULT_MAX_TOTAL_SIZE: usize = 50 * 1024 * 1024;
