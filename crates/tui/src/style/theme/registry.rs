use super::builtins;
use super::types::Theme;

/// Look up a built-in theme by name or alias.
#[must_use]
pub fn by_name(name: &str) -> Option<Theme> {
	builtins::registrations()
		.into_iter()
		.find(|registration| registration.answers_to(name))
		.map(|registration| registration.theme)
}

/// Names of all built-in themes, sorted.
#[must_use]
pub fn names() -> Vec<String> {
	let mut names: Vec<String> = builtins::registrations()
		.into_iter()
		.map(|registration| registration.name)
		.collect();
	names.sort();
	names
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_builtin_is_reachable_by_name() {
		for name in names() {
			assert!(by_name(&name).is_some(), "theme {name} not found");
		}
	}

	#[test]
	fn lookup_ignores_case_and_accepts_aliases() {
		assert!(by_name("SLATE").is_some());
		assert!(by_name("dark").is_some());
		assert!(by_name("no-such-theme").is_none());
	}
}
