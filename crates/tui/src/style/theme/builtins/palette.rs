//! Colour and modifier notations accepted in theme documents.

use std::str::FromStr;

use anyhow::{Context, Error, Result, anyhow, bail};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const NAMED_COLORS: &[(&str, Color)] = &[
	("reset", Color::Reset),
	("none", Color::Reset),
	("default", Color::Reset),
	("black", Color::Black),
	("red", Color::Red),
	("green", Color::Green),
	("yellow", Color::Yellow),
	("blue", Color::Blue),
	("magenta", Color::Magenta),
	("cyan", Color::Cyan),
	("gray", Color::Gray),
	("grey", Color::Gray),
	("dark_gray", Color::DarkGray),
	("dark_grey", Color::DarkGray),
	("light_red", Color::LightRed),
	("light_green", Color::LightGreen),
	("light_yellow", Color::LightYellow),
	("light_blue", Color::LightBlue),
	("light_magenta", Color::LightMagenta),
	("light_cyan", Color::LightCyan),
	("white", Color::White),
];

const NAMED_MODIFIERS: &[(&str, Modifier)] = &[
	("bold", Modifier::BOLD),
	("dim", Modifier::DIM),
	("italic", Modifier::ITALIC),
	("underline", Modifier::UNDERLINED),
	("underlined", Modifier::UNDERLINED),
	("reverse", Modifier::REVERSED),
	("reversed", Modifier::REVERSED),
	("hidden", Modifier::HIDDEN),
	("strikethrough", Modifier::CROSSED_OUT),
	("crossed_out", Modifier::CROSSED_OUT),
];

/// A colour written as `#rgb`, `#rrggbb`, `rgb(r, g, b)`, `ansi(n)`, a bare
/// palette index or a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub(super) struct ColorSpec(pub(super) Color);

impl FromStr for ColorSpec {
	type Err = Error;

	fn from_str(input: &str) -> Result<Self> {
		let value = input.trim();
		let color = if let Some(hex) = value.strip_prefix('#') {
			hex_color(hex)?
		} else if let Some(body) = call_body(value, "rgb") {
			rgb_color(body)?
		} else if let Some(body) = call_body(value, "ansi") {
			Color::Indexed(body.trim().parse().context("ANSI index must be 0-255")?)
		} else if let Ok(index) = value.parse::<u8>() {
			Color::Indexed(index)
		} else {
			lookup(NAMED_COLORS, value).ok_or_else(|| anyhow!("unknown colour `{value}`"))?
		};
		Ok(Self(color))
	}
}

impl TryFrom<String> for ColorSpec {
	type Error = Error;

	fn try_from(value: String) -> Result<Self> {
		value.parse()
	}
}

/// A text modifier such as `bold` or `reversed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub(super) struct ModifierSpec(pub(super) Modifier);

impl TryFrom<String> for ModifierSpec {
	type Error = Error;

	fn try_from(value: String) -> Result<Self> {
		lookup(NAMED_MODIFIERS, &value)
			.map(Self)
			.ok_or_else(|| anyhow!("unknown modifier `{}`", value.trim()))
	}
}

/// One styled element in a theme document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct StyleSpec {
	#[serde(default)]
	pub(super) fg: Option<ColorSpec>,
	#[serde(default)]
	pub(super) bg: Option<ColorSpec>,
	#[serde(default)]
	pub(super) modifiers: Vec<ModifierSpec>,
}

impl From<&StyleSpec> for Style {
	fn from(spec: &StyleSpec) -> Self {
		let mut style = Style::new();
		if let Some(ColorSpec(fg)) = spec.fg {
			style = style.fg(fg);
		}
		if let Some(ColorSpec(bg)) = spec.bg {
			style = style.bg(bg);
		}
		spec.modifiers
			.iter()
			.fold(style, |style, ModifierSpec(modifier)| style.add_modifier(*modifier))
	}
}

fn call_body<'a>(value: &'a str, name: &str) -> Option<&'a str> {
	value
		.strip_prefix(name)?
		.strip_prefix('(')?
		.strip_suffix(')')
}

fn hex_color(hex: &str) -> Result<Color> {
	let digits: String = match hex.len() {
		3 => hex.chars().flat_map(|ch| [ch, ch]).collect(),
		6 => hex.to_string(),
		_ => bail!("hex colours must be 3 or 6 digits, got `#{hex}`"),
	};
	let packed = u32::from_str_radix(&digits, 16).with_context(|| format!("`#{hex}` is not hex"))?;
	let [_, r, g, b] = packed.to_be_bytes();
	Ok(Color::Rgb(r, g, b))
}

fn rgb_color(body: &str) -> Result<Color> {
	let channels = body
		.split(',')
		.map(|part| {
			part.trim()
				.parse::<u8>()
				.with_context(|| format!("rgb channel `{}` must be 0-255", part.trim()))
		})
		.collect::<Result<Vec<_>>>()?;
	match channels.as_slice() {
		&[r, g, b] => Ok(Color::Rgb(r, g, b)),
		other => bail!("rgb() takes three channels, got {}", other.len()),
	}
}

fn lookup<T: Copy>(table: &[(&str, T)], name: &str) -> Option<T> {
	let key: String = name
		.trim()
		.chars()
		.map(|ch| match ch {
			'-' | ' ' => '_',
			other => other.to_ascii_lowercase(),
		})
		.collect();
	table
		.iter()
		.find(|(candidate, _)| *candidate == key)
		.map(|(_, value)| *value)
}
