// Copyright 2023-2025 Irreducible Inc.

use crate::env::boolean_env_flag_set;

/// Installs a global `tracing` subscriber printing to stderr.
///
/// Directives are read from `RUST_LOG` and default to `warn`. When `LINQUAD_TRACE_SPANS` is set,
/// span close events are printed as well, which reports the time spent in each instrumented
/// array operation. Calling this more than once is harmless.
pub fn init_tracing() {
	use tracing_subscriber::{
		fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
	};

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
	let span_events = if boolean_env_flag_set("LINQUAD_TRACE_SPANS") {
		FmtSpan::CLOSE
	} else {
		FmtSpan::NONE
	};

	let _ = tracing_subscriber::registry()
		.with(filter)
		.with(
			tracing_subscriber::fmt::layer()
				.with_writer(std::io::stderr)
				.with_span_events(span_events),
		)
		.try_init();
}
