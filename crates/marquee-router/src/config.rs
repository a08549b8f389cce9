//! Router configuration.

use std::time::Duration;

/// Navigation controller configuration.
#[derive(Debug, Clone)]
pub struct RouterConfig {
	/// Route entered by `start`.
	pub default_route: String,
	/// Whether content swaps are paced by a fade transition.
	pub enable_transitions: bool,
	/// Total duration of the fade transition.
	pub transition_duration: Duration,
	/// Fraction of the duration spent faded out before the swap; the
	/// remainder is waited after it. The pacing is fixed regardless of how
	/// long the swap itself takes.
	pub fade_split: f64,
	/// Appended to every committed page title when set.
	pub title_suffix: Option<String>,
}

impl Default for RouterConfig {
	fn default() -> Self {
		Self {
			default_route: "home".to_string(),
			enable_transitions: true,
			transition_duration: Duration::from_millis(300),
			fade_split: 0.5,
			title_suffix: None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = RouterConfig::default();
		assert_eq!(config.default_route, "home");
		assert!(config.enable_transitions);
		assert_eq!(config.transition_duration, Duration::from_millis(300));
		assert_eq!(config.fade_split, 0.5);
		assert!(config.title_suffix.is_none());
	}
}
