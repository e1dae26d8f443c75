use ibc_core::primitives::Timestamp;

/// Returns a `Timestamp` representation of beginning of year 2023.
///
/// Every [`MockContext`](crate::context::MockContext) starts from this
/// timestamp by default, so that two contexts built one after the other can
/// accept each other's headers. A custom timestamp can still be set via
/// [`MockContextConfig`](crate::fixtures::core::context::MockContextConfig).
pub fn year_2023() -> Timestamp {
    // Sun Jan 01 2023 00:00:00 GMT+0000
    Timestamp::from_unix_timestamp(1_672_531_200, 0).expect("should be a valid time")
}
