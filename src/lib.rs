//! Read-only storefront catalog that mirrors a seller's marketplace inventory.
//!
//! Every inbound request runs the same two-step chain: a client-credentials token exchange
//! against the marketplace identity endpoint, then one seller-scoped search whose item
//! records are normalized into [`catalog::CatalogItem`] values. Nothing is cached or
//! persisted between requests.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod http;
pub mod inventory;
pub mod marketplace;
pub mod obs;
pub mod page;
pub mod server;
pub mod service;
pub mod token;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
