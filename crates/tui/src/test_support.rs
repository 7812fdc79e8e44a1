//! Helpers for rendering assertions against `TestBackend` buffers.

use ratatui::buffer::Buffer;
use unicode_width::UnicodeWidthStr;

/// Rows of `buffer` as text. Cells hidden behind a wide grapheme are skipped,
/// so `⭐4.5` reads back exactly as it was written.
pub(crate) fn buffer_lines(buffer: &Buffer) -> Vec<String> {
	(0..buffer.area.height)
		.map(|y| {
			let mut line = String::new();
			let mut x = 0;
			while x < buffer.area.width {
				let symbol = buffer[(x, y)].symbol();
				line.push_str(symbol);
				x += (symbol.width() as u16).max(1);
			}
			line
		})
		.collect()
}

pub(crate) fn buffer_text(buffer: &Buffer) -> String {
	buffer_lines(buffer).join("\n")
}
