//! Application runtime and event loop.

use std::collections::VecDeque;
use std::io::stdout;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use nearby_core::SessionOutcome;
use ratatui::crossterm::event::{
	self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind,
};
use ratatui::crossterm::execute;
use ratatui::layout::Margin;
use tracing::{debug, info};

use crate::App;
use crate::components::render_notice;
use crate::style::Theme;

const INPUT_POLL: Duration = Duration::from_millis(50);
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Run `app` to completion and return the final session state.
pub fn run(mut app: App<'_>) -> Result<SessionOutcome> {
	app.run()
}

/// Show a blocking configuration notice until any key is pressed.
pub fn show_missing_config(headline: &str, details: &[String]) -> Result<()> {
	let mut terminal = ratatui::init();
	let style = Theme::default().alert;
	let result = (|| -> Result<()> {
		loop {
			terminal.draw(|frame| {
				let area = frame.area().inner(Margin {
					vertical: 1,
					horizontal: 2,
				});
				render_notice(frame, area, headline, details, style);
			})?;
			if let Event::Key(key) = event::read()?
				&& key.kind == KeyEventKind::Press
			{
				return Ok(());
			}
		}
	})();
	ratatui::restore();
	result
}

impl<'a> App<'a> {
	/// Pump the terminal event loop until the user exits.
	pub fn run(&mut self) -> Result<SessionOutcome> {
		let mut terminal = ratatui::init();
		terminal.clear()?;
		execute!(stdout(), EnableMouseCapture)?;

		let (event_tx, event_rx) = mpsc::channel();
		let event_loop_running = Arc::new(AtomicBool::new(true));
		let event_loop_flag = Arc::clone(&event_loop_running);

		let event_thread = thread::spawn(move || -> Result<()> {
			while event_loop_flag.load(Ordering::Relaxed) {
				if event::poll(INPUT_POLL)? {
					let event = event::read()?;
					if event_tx.send(event).is_err() {
						break;
					}
				}
			}
			Ok(())
		});

		let mut pending_events = VecDeque::new();

		let result: Result<SessionOutcome> = 'event_loop: loop {
			loop {
				match event_rx.try_recv() {
					Ok(Event::Resize(width, height)) => {
						debug!(width, height, "terminal resized");
					}
					Ok(event) => pending_events.push_back(event),
					Err(mpsc::TryRecvError::Empty) => break,
					Err(mpsc::TryRecvError::Disconnected) => {
						break 'event_loop Err(anyhow!("input event channel disconnected"));
					}
				}
			}

			let mut maybe_outcome = None;
			while let Some(event) = pending_events.pop_front() {
				match event {
					Event::Key(key) if key.kind == KeyEventKind::Press => {
						if let Some(outcome) = self.handle_key(key)? {
							maybe_outcome = Some(outcome);
							break;
						}
					}
					Event::Mouse(mouse) => {
						self.handle_mouse(mouse);
					}
					_ => {}
				}
			}

			if let Some(outcome) = maybe_outcome {
				break Ok(outcome);
			}

			self.tick(Instant::now());
			terminal.draw(|frame| self.draw(frame))?;

			thread::sleep(FRAME_INTERVAL);
		};

		ratatui::restore();
		execute!(stdout(), DisableMouseCapture)?;

		event_loop_running.store(false, Ordering::Relaxed);
		match event_thread.join() {
			Ok(join_result) => join_result?,
			Err(err) => std::panic::resume_unwind(err),
		}

		if let Some(search) = self.search.take() {
			search.shutdown();
		}
		match &result {
			Ok(outcome) => info!(
				query = %outcome.query,
				selected = outcome.selected.as_ref().map(|place| place.name.as_str()),
				"session ended"
			),
			Err(err) => debug!(%err, "session aborted"),
		}
		result
	}

	/// Background work due before the next frame.
	pub(crate) fn tick(&mut self, now: Instant) {
		self.pump_session_events();
		self.pump_search_results();
		self.pump_autocomplete(now);
		self.throbber_state.calc_next();
	}
}
