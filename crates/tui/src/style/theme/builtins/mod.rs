mod loader;
mod palette;

use std::sync::OnceLock;

use include_dir::{Dir, include_dir};
use loader::{BuiltinThemes, load_builtin_themes};

use crate::style::theme::types::{Theme, ThemeRegistration};

const BUILTIN_THEME_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/style/theme/builtins/themes");

/// Get the default built-in theme.
pub fn default_theme() -> Theme {
	builtin_themes().default_theme
}

pub(super) fn registrations() -> Vec<ThemeRegistration> {
	builtin_themes().registrations.clone()
}

fn builtin_themes() -> &'static BuiltinThemes {
	static BUILTINS: OnceLock<BuiltinThemes> = OnceLock::new();
	BUILTINS.get_or_init(|| {
		load_builtin_themes(&BUILTIN_THEME_DIR)
			.unwrap_or_else(|error| panic!("failed to load built-in themes: {error:#}"))
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bundled_themes_load_with_slate_as_default() {
		let themes = load_builtin_themes(&BUILTIN_THEME_DIR).expect("bundled themes parse");
		let names: Vec<_> = themes
			.registrations
			.iter()
			.map(|registration| registration.name.as_str())
			.collect();
		assert_eq!(names, ["paper", "slate", "terminal"]);

		let slate = &themes.registrations[1];
		assert_eq!(themes.default_theme.marker, slate.theme.marker);
	}
}
