//! Storefront catalog server binary.

// std
use std::process::ExitCode;
// self
use storefront_catalog::{config::AppConfig, obs, server};

#[tokio::main]
async fn main() -> ExitCode {
	let config = match AppConfig::from_env() {
		Ok(config) => config,
		Err(e) => {
			obs::init_tracing(Default::default());
			tracing::error!(error = %e, "Invalid configuration.");

			return ExitCode::FAILURE;
		},
	};

	obs::init_tracing(config.log_format);
	config.log_summary();

	match server::serve(config).await {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			tracing::error!(error = %e, "Storefront catalog failed.");

			ExitCode::FAILURE
		},
	}
}
