use chrono::Utc;

/// Clock seam: reminder evaluation and delivery only ever read time
/// through this trait, so tests can pin the clock.
pub trait ISys: Send + Sync {
    /// Current timestamp in millis
    fn get_timestamp_millis(&self) -> i64;
}

/// Wall clock used outside of tests
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
