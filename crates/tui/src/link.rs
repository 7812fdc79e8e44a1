//! Opening a place's outbound link from the terminal.

use std::io::Write;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};

use anyhow::{Result, bail};
use base64::Engine;
use tracing::{debug, warn};

/// What happened to the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LinkAction {
	Opened,
	Copied,
}

impl LinkAction {
	pub(crate) fn notice(self) -> &'static str {
		match self {
			Self::Opened => "Opened link in browser",
			Self::Copied => "Link copied to clipboard",
		}
	}
}

/// Open `url` with the platform opener, falling back to an OSC 52 clipboard
/// copy when no opener can be started.
pub(crate) fn open_or_copy(url: &str) -> Result<LinkAction> {
	for &(program, args) in OPENERS {
		match spawn_detached(program, args, url) {
			Ok(()) => {
				debug!(program, url, "opened link");
				return Ok(LinkAction::Opened);
			}
			Err(err) => debug!(program, %err, "opener unavailable"),
		}
	}

	warn!(url, "no link opener available, copying instead");
	copy_osc52(url)?;
	Ok(LinkAction::Copied)
}

/// Program and leading arguments; the URL is appended.
type Opener = (&'static str, &'static [&'static str]);

#[cfg(target_os = "macos")]
const OPENERS: &[Opener] = &[("open", &[])];
#[cfg(windows)]
const OPENERS: &[Opener] = &[("cmd", &["/C", "start", ""])];
#[cfg(not(any(target_os = "macos", windows)))]
const OPENERS: &[Opener] = &[("xdg-open", &[]), ("gio", &["open"])];

fn spawn_detached(program: &str, args: &[&str], url: &str) -> std::io::Result<()> {
	let child = Command::new(program)
		.args(args)
		.arg(url)
		.stdin(Stdio::null())
		.stdout(Stdio::null())
		.stderr(Stdio::null())
		.spawn()?;
	reap_in_background(program, child);
	Ok(())
}

/// Wait on `child` off the UI thread so its exit status is collected.
fn reap_in_background(program: &str, mut child: Child) -> Option<JoinHandle<()>> {
	let program = program.to_string();
	let spawned = thread::Builder::new()
		.name("nearby-link-reaper".to_string())
		.spawn(move || match child.wait() {
			Ok(status) => debug!(program = %program, %status, "link opener exited"),
			Err(err) => warn!(program = %program, %err, "could not reap link opener"),
		});
	match spawned {
		Ok(handle) => Some(handle),
		Err(err) => {
			warn!(%err, "could not start link reaper");
			None
		}
	}
}

fn copy_osc52(text: &str) -> Result<()> {
	let sequence = osc52_sequence(text, std::env::var_os("TMUX").is_some());
	let mut stdout = std::io::stdout().lock();
	if stdout.write_all(sequence.as_bytes()).is_err() || stdout.flush().is_err() {
		bail!("terminal rejected the clipboard sequence");
	}
	Ok(())
}

/// OSC 52 "set clipboard" sequence, wrapped for tmux passthrough if needed.
fn osc52_sequence(text: &str, tmux: bool) -> String {
	let encoded = base64::engine::general_purpose::STANDARD.encode(text);
	if tmux {
		format!("\x1bPtmux;\x1b\x1b]52;c;{encoded}\x07\x1b\\")
	} else {
		format!("\x1b]52;c;{encoded}\x07")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn osc52_encodes_payload() {
		assert_eq!(osc52_sequence("hi", false), "\x1b]52;c;aGk=\x07");
		assert!(osc52_sequence("hi", true).starts_with("\x1bPtmux;"));
	}

	#[test]
	fn missing_opener_is_an_error() {
		assert!(spawn_detached("nearby-no-such-opener", &[], "https://example.com").is_err());
	}

	#[cfg(target_os = "linux")]
	#[test]
	fn finished_opener_is_reaped() {
		let child = Command::new("true").spawn().unwrap();
		let pid = child.id();
		reap_in_background("true", child).unwrap().join().unwrap();
		assert!(!std::path::Path::new(&format!("/proc/{pid}")).exists());
	}
}
