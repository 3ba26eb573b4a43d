/// Poll an async condition until it yields `Some`
macro_rules! eventually {
    ($what:expr, $check:expr) => {{
        let deadline = tokio::time::Instant::now() + std::time::Duration::from_secs(2);
        loop {
            if let Some(found) = $check {
                break found;
            }
            if tokio::time::Instant::now() > deadline {
                panic!("Timeout - {}", $what);
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
    }};
}

mod support;

mod immersive_tests;
mod lookup_tests;
mod summary_tests;
