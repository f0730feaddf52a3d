#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Shared test setup for the cfgdiff workspace.
//!
//! Call [`setup`] at the top of an integration test to get `tracing`
//! output on stderr. Verbosity is controlled with the `CFGDIFF_LOG`
//! environment variable, e.g. `CFGDIFF_LOG=cfgdiff_core=trace`.

use std::sync::LazyLock;
use std::time::Instant;

use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

struct Uptime;

impl FormatTime for Uptime {
    fn format_time(&self, w: &mut Writer<'_>) -> core::fmt::Result {
        let elapsed = START_TIME.elapsed();
        write!(w, "{:4}.{:03}s", elapsed.as_secs(), elapsed.subsec_millis())
    }
}

/// Lazy initialization of the global tracing subscriber.
///
/// Ensures the subscriber is set up exactly once, regardless of how many
/// tests run in the same process.
static SUBSCRIBER_INIT: LazyLock<()> = LazyLock::new(|| {
    // Force start time initialization
    let _ = *START_TIME;

    let filter = std::env::var("CFGDIFF_LOG")
        .ok()
        .and_then(|spec| spec.parse::<Targets>().ok())
        .unwrap_or_else(|| Targets::new().with_default(LevelFilter::WARN));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(Uptime)
                .with_writer(std::io::stderr),
        )
        .init();
});

/// Install the test tracing subscriber (idempotent).
pub fn setup() {
    LazyLock::force(&SUBSCRIBER_INIT);
}
