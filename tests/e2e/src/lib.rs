//! End-to-end harness: a real server on a loopback port driven by the form crate

pub mod test_utils;
