use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, TextEncoder,
};

const NAMESPACE: &str = "coffer";

// Registration only fails on a duplicate or malformed name, which is a programming error.

pub fn counter(name: &str, help: &str) -> IntCounter {
    let counter = IntCounter::with_opts(Opts::new(name, help).namespace(NAMESPACE))
        .expect("valid counter options");
    prometheus::register(Box::new(counter.clone())).expect("counter registered once");
    counter
}

pub fn counter_vec(name: &str, help: &str, labels: &[&str]) -> IntCounterVec {
    let counter = IntCounterVec::new(Opts::new(name, help).namespace(NAMESPACE), labels)
        .expect("valid counter options");
    prometheus::register(Box::new(counter.clone())).expect("counter registered once");
    counter
}

fn histogram(name: &str, help: &str, buckets: Vec<f64>) -> Histogram {
    let opts = HistogramOpts::new(name, help)
        .namespace(NAMESPACE)
        .buckets(buckets);
    let histogram = Histogram::with_opts(opts).expect("valid histogram options");
    prometheus::register(Box::new(histogram.clone())).expect("histogram registered once");
    histogram
}

/// In-memory work: tens of microseconds to a few milliseconds.
pub fn histogram_fast_ops(name: &str, help: &str) -> Histogram {
    histogram(
        name,
        help,
        vec![0.00005, 0.0001, 0.00025, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.05],
    )
}

/// Work with multi-statement writes: up to about a second.
pub fn histogram_slow_ops(name: &str, help: &str) -> Histogram {
    histogram(
        name,
        help,
        vec![0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0],
    )
}

/// Renders the default registry in the prometheus text format.
pub fn render() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&prometheus::gather(), &mut buffer)?;

    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

#[cfg(test)]
mod tests {
    use {super::*, crate::metrics::OPERATIONS_PROCESSED_TOTAL};

    #[test]
    fn test_render_includes_registered_metrics() {
        OPERATIONS_PROCESSED_TOTAL
            .with_label_values(&["render_test"])
            .inc();

        let text = render().unwrap();

        assert!(text.contains("coffer_operations_processed_total"));
        assert!(text.contains("render_test"));
    }
}
