//! Observability helpers for the catalog pipeline.
//!
//! - Every stage runs inside a span named `storefront_catalog.stage` carrying a `stage` field.
//! - Enable `metrics` to increment the `storefront_catalog_stage_total` counter for every
//!   attempt/success/failure, labeled by `stage` + `outcome`.

mod counter;
mod span;

pub use counter::*;
pub use span::*;

// self
use crate::_prelude::*;

/// Pipeline stages observed by the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
	/// Client-credentials exchange against the identity endpoint.
	TokenExchange,
	/// Seller-scoped item search.
	InventorySearch,
	/// Full token + search chain for one inbound request.
	CatalogLoad,
}
impl Stage {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Stage::TokenExchange => "token_exchange",
			Stage::InventorySearch => "inventory_search",
			Stage::CatalogLoad => "catalog_load",
		}
	}
}
impl Display for Stage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StageOutcome {
	/// Entry to a stage.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl StageOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			StageOutcome::Attempt => "attempt",
			StageOutcome::Success => "success",
			StageOutcome::Failure => "failure",
		}
	}
}
impl Display for StageOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Runs `fut` inside the span for `stage`, recording attempt and outcome.
pub async fn observe<T, Fut>(stage: Stage, fut: Fut) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	let span = StageSpan::new(stage);

	record_stage_outcome(stage, StageOutcome::Attempt);

	let result = span.in_span(fut).await;

	match &result {
		Ok(_) => record_stage_outcome(stage, StageOutcome::Success),
		Err(_) => record_stage_outcome(stage, StageOutcome::Failure),
	}

	result
}
