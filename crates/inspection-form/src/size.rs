//! File size limit shared by slot selection and validation

use std::fmt;

pub use common::DEFAULT_MAX_FILE_SIZE;

const MIB: u64 = 1024 * 1024;
const KIB: u64 = 1024;

/// Maximum accepted byte length of a single image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileSizeLimit(u64);

impl FileSizeLimit {
    pub const fn new(max_bytes: u64) -> Self {
        Self(max_bytes)
    }

    pub const fn max_bytes(self) -> u64 {
        self.0
    }

    /// A file passes when its length is at most the limit
    pub const fn allows(self, len: u64) -> bool {
        len <= self.0
    }
}

impl Default for FileSizeLimit {
    fn default() -> Self {
        Self(DEFAULT_MAX_FILE_SIZE)
    }
}

impl fmt::Display for FileSizeLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 >= MIB && self.0 % MIB == 0 {
            write!(f, "{}MB", self.0 / MIB)
        } else if self.0 >= KIB && self.0 % KIB == 0 {
            write!(f, "{}KB", self.0 / KIB)
        } else {
            write!(f, "{} bytes", self.0)
        }
    }
}
