//! Fakes and helpers shared by the editor's tests.

pub mod fakes;
pub mod fixtures;

/// Send log output to the test harness. Safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
