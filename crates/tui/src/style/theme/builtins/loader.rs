use anyhow::{Context, Result, bail};
use include_dir::{Dir, File};
use ratatui::style::Style;
use serde::Deserialize;

use super::palette::StyleSpec;
use crate::style::theme::types::{Theme, ThemeRegistration};

pub(super) struct BuiltinThemes {
	pub(super) registrations: Vec<ThemeRegistration>,
	pub(super) default_theme: Theme,
}

/// One `themes/*.toml` document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ThemeFile {
	name: String,
	#[serde(default)]
	aliases: Vec<String>,
	#[serde(default)]
	default: bool,
	ui: UiStyles,
	map: MapStyles,
}

/// Styles for the prompt, the list and the notices.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct UiStyles {
	header: StyleSpec,
	row_highlight: StyleSpec,
	prompt: StyleSpec,
	empty: StyleSpec,
	highlight: StyleSpec,
	alert: StyleSpec,
}

/// Styles for the map surface.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MapStyles {
	#[serde(default)]
	land: StyleSpec,
	marker: StyleSpec,
	selected: StyleSpec,
	center: StyleSpec,
}

impl ThemeFile {
	fn theme(&self) -> Theme {
		let (ui, map) = (&self.ui, &self.map);
		Theme {
			header: Style::from(&ui.header),
			row_highlight: Style::from(&ui.row_highlight),
			prompt: Style::from(&ui.prompt),
			empty: Style::from(&ui.empty),
			highlight: Style::from(&ui.highlight),
			alert: Style::from(&ui.alert),
			land: Style::from(&map.land),
			marker: Style::from(&map.marker),
			selected_marker: Style::from(&map.selected),
			center_marker: Style::from(&map.center),
		}
	}

	fn into_registration(self) -> ThemeRegistration {
		let theme = self.theme();
		self.aliases
			.into_iter()
			.map(|alias| alias.trim().to_string())
			.filter(|alias| !alias.is_empty())
			.fold(ThemeRegistration::new(self.name, theme), ThemeRegistration::alias)
	}
}

pub(super) fn load_builtin_themes(dir: &Dir) -> Result<BuiltinThemes> {
	let mut files: Vec<&File> = dir.files().collect();
	files.sort_by(|a, b| a.path().cmp(b.path()));

	let mut registrations = Vec::with_capacity(files.len());
	let mut default: Option<(String, Theme)> = None;

	for file in files {
		let document = parse_theme_file(file)?;
		let is_default = document.default;
		let registration = document.into_registration();

		if is_default {
			if let Some((existing, _)) = &default {
				bail!(
					"themes `{existing}` and `{}` are both marked as default",
					registration.name
				);
			}
			default = Some((registration.name.clone(), registration.theme));
		}
		registrations.push(registration);
	}

	let Some(default_theme) = default
		.map(|(_, theme)| theme)
		.or_else(|| registrations.first().map(|registration| registration.theme))
	else {
		bail!("no built-in theme definitions were found");
	};

	Ok(BuiltinThemes {
		registrations,
		default_theme,
	})
}

fn parse_theme_file(file: &File) -> Result<ThemeFile> {
	let path = file.path().display();
	let contents = file
		.contents_utf8()
		.with_context(|| format!("theme {path} is not valid UTF-8"))?;
	toml::from_str(contents).with_context(|| format!("failed to parse theme {path}"))
}

#[cfg(test)]
mod tests {
	use ratatui::style::{Color, Modifier};

	use super::*;

	const SAMPLE: &str = r##"
name = "sample"
aliases = [" night ", ""]

[ui]
header = { fg = "white" }
row_highlight = { modifiers = ["reversed"] }
prompt = {}
empty = { fg = "dark_gray" }
highlight = { fg = "yellow" }
alert = { fg = "white", bg = "#b91c1c" }

[map]
marker = { fg = "red" }
selected = { fg = "yellow", modifiers = ["bold"] }
center = { fg = "cyan" }
"##;

	#[test]
	fn theme_file_maps_sections_onto_the_theme() {
		let file: ThemeFile = toml::from_str(SAMPLE).unwrap();
		let registration = file.into_registration();
		let theme = registration.theme;

		assert_eq!(registration.name, "sample");
		assert_eq!(registration.aliases, ["night"]);
		assert_eq!(theme.alert.bg, Some(Color::Rgb(0xb9, 0x1c, 0x1c)));
		assert!(theme.selected_marker.add_modifier.contains(Modifier::BOLD));
		assert_eq!(theme.land, Style::new());
		assert_eq!(theme.land_color(), Color::DarkGray);
	}

	#[test]
	fn missing_sections_are_rejected() {
		let without_map = SAMPLE.split("[map]").next().unwrap_or_default();
		assert!(toml::from_str::<ThemeFile>(without_map).is_err());
	}

	#[test]
	fn unknown_style_keys_are_rejected() {
		let typo = SAMPLE.replace("center = ", "centre = ");
		assert!(toml::from_str::<ThemeFile>(&typo).is_err());
	}
}
