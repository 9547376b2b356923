use lc3b_pipe_core::soc::memory::controller::LatencyModel;
use mockall::mock;

mock! {
    pub Latency {}
    impl LatencyModel for Latency {
        fn is_ready(&mut self, cycle: u64) -> bool;
    }
}

/// A latency model that misses on exactly the listed cycles.
pub fn missing_on(cycles: &'static [u64]) -> MockLatency {
    let mut mock = MockLatency::new();
    let _ = mock
        .expect_is_ready()
        .returning(move |cycle| !cycles.contains(&cycle));
    mock
}

/// A latency model that misses on the first `n` accesses, whatever the cycle.
pub fn missing_first(n: usize) -> MockLatency {
    let mut mock = MockLatency::new();
    let mut calls = 0usize;
    let _ = mock.expect_is_ready().returning(move |_| {
        calls += 1;
        calls > n
    });
    mock
}
