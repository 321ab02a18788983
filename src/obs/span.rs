// crates.io
use tracing::{Instrument, instrument::Instrumented};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
// self
use crate::{_prelude::*, obs::Stage};

const DEFAULT_DIRECTIVES: &str = "storefront_catalog=info";

/// Output format for the global subscriber.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
	/// Single-line human readable output.
	#[default]
	Compact,
	/// One JSON object per event.
	Json,
}
impl FromStr for LogFormat {
	type Err = crate::error::ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"" | "compact" | "text" => Ok(Self::Compact),
			"json" => Ok(Self::Json),
			_ => Err(crate::error::ConfigError::InvalidValue {
				name: "LOG_FORMAT",
				value: s.to_owned(),
				reason: "expected `compact` or `json`",
			}),
		}
	}
}

/// Installs the global `tracing` subscriber.
///
/// Filtering follows `RUST_LOG` and falls back to `storefront_catalog=info`. Calling this
/// twice is harmless; the second installation is ignored.
pub fn init_tracing(format: LogFormat) {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
	let registry = tracing_subscriber::registry().with(filter);
	let result = match format {
		LogFormat::Compact => registry
			.with(tracing_subscriber::fmt::layer().with_target(false).compact())
			.try_init(),
		LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).try_init(),
	};

	if result.is_err() {
		tracing::debug!("Global tracing subscriber already installed.");
	}
}

/// A span builder used by catalog stages.
#[derive(Clone, Debug)]
pub struct StageSpan {
	span: tracing::Span,
}
impl StageSpan {
	/// Creates a new span tagged with the provided stage.
	pub fn new(stage: Stage) -> Self {
		Self { span: tracing::info_span!("storefront_catalog.stage", stage = stage.as_str()) }
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn in_span<Fut>(&self, fut: Fut) -> Instrumented<Fut>
	where
		Fut: Future,
	{
		fut.instrument(self.span.clone())
	}
}
