//! Configuration for the scout binary.
//!
//! Configuration is TOML. Every key is optional:
//!
//! ```toml
//! [search]
//! delay-ms = 400
//!
//! [listing]
//! kind = "current"   # or "shared"
//! page-size = 20
//!
//! [mock]
//! list-delay-ms = 800
//! detail-delay-ms = 500
//! ```
//!
//! Lookup order: `--config PATH`, then `$XDG_CONFIG_HOME/scout/config.toml`
//! (or the platform config dir), then built-in defaults. Command line flags
//! override whatever the file says.

pub mod error;

use std::path::{Path, PathBuf};
use std::time::Duration;

pub use error::{ConfigError, Result};
use scout_mock::{Catalog, MockConfig, MockLatency};
use scout_project::ProjectKind;
use serde::Deserialize;

/// Parsed configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
	pub search: SearchConfig,
	pub listing: ListingConfig,
	pub mock: MockSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SearchConfig {
	/// Debounce quiet period.
	pub delay_ms: u64,
}

impl Default for SearchConfig {
	fn default() -> Self {
		Self { delay_ms: 400 }
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ListingConfig {
	pub kind: ProjectKind,
	pub page_size: u32,
}

impl Default for ListingConfig {
	fn default() -> Self {
		Self {
			kind: ProjectKind::Current,
			page_size: 20,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct MockSection {
	pub list_delay_ms: u64,
	pub detail_delay_ms: u64,
}

impl Default for MockSection {
	fn default() -> Self {
		Self {
			list_delay_ms: 800,
			detail_delay_ms: 500,
		}
	}
}

impl Config {
	/// Parse a TOML string into a validated [`Config`].
	pub fn parse(input: &str) -> Result<Self> {
		let config: Config = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	/// Load configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		Self::parse(&content)
	}

	/// `$XDG_CONFIG_HOME/scout/config.toml` or the platform equivalent.
	pub fn default_path() -> Option<PathBuf> {
		dirs::config_dir().map(|dir| dir.join("scout").join("config.toml"))
	}

	/// Loads `explicit` when given, else the default path when it exists,
	/// else the built-in defaults.
	pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
		if let Some(path) = explicit {
			return Self::load(path);
		}
		match Self::default_path() {
			Some(path) if path.is_file() => {
				tracing::debug!(path = %path.display(), "loading config");
				Self::load(&path)
			}
			_ => Ok(Self::default()),
		}
	}

	/// Applies command line overrides on top of file values.
	pub fn apply_overrides(&mut self, kind: Option<ProjectKind>, delay_ms: Option<u64>) {
		if let Some(kind) = kind {
			self.listing.kind = kind;
		}
		if let Some(delay_ms) = delay_ms {
			self.search.delay_ms = delay_ms;
		}
	}

	pub fn search_delay(&self) -> Duration {
		Duration::from_millis(self.search.delay_ms)
	}

	pub fn mock_config(&self) -> MockConfig {
		MockConfig {
			latency: MockLatency {
				project_list: Duration::from_millis(self.mock.list_delay_ms),
				project_detail: Duration::from_millis(self.mock.detail_delay_ms),
				..MockLatency::default()
			},
			catalog: Catalog::default(),
		}
	}

	/// Upper bound for a search typed just before stdin closes to finish.
	pub fn settle_time(&self) -> Duration {
		let slowest = self.mock.list_delay_ms.max(self.mock.detail_delay_ms);
		Duration::from_millis(self.search.delay_ms.saturating_add(slowest).saturating_add(100))
	}

	fn validate(&self) -> Result<()> {
		if self.listing.page_size == 0 {
			return Err(ConfigError::Invalid {
				field: "listing.page-size",
				reason: "must be greater than zero".to_owned(),
			});
		}
		Ok(())
	}
}
