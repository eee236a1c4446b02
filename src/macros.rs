/// Evaluates `$code` and records its wall time in the histogram `$metric`.
/// The observation is made even when the block returns early.
#[macro_export]
macro_rules! measure {
    ($metric:expr, $code:block) => {{
        let _timer = $metric.start_timer();
        $code
    }};
}
