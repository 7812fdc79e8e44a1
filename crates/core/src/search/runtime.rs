//! Background search worker and request sequencing.
//!
//! The [`SearchRuntime`] owns the channels to a single worker thread. Every
//! request carries an id from a per-kind counter; the worker skips requests
//! that are already superseded when it dequeues them, and [`SearchRuntime::accept`]
//! drops responses that are not for the latest request. An older response can
//! therefore never overwrite a newer one.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use tracing::{debug, error, trace, warn};

use super::{SearchOutcome, outcome_from_response};
use crate::place::PlaceResult;
use crate::provider::{AutocompleteRequest, NearbyRequest, PlacesProvider, ProviderError};

/// Commands understood by the background search worker.
#[derive(Debug)]
pub enum SearchCommand {
	/// Run a nearby search.
	Nearby { id: u64, request: NearbyRequest },
	/// Fetch autocomplete candidates.
	Autocomplete {
		id: u64,
		request: AutocompleteRequest,
	},
	/// Stop the worker thread.
	Shutdown,
}

/// Responses emitted by the worker, tagged with the originating request id.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult {
	Nearby {
		id: u64,
		outcome: SearchOutcome,
	},
	Candidates {
		id: u64,
		candidates: Result<Vec<PlaceResult>, ProviderError>,
	},
}

impl SearchResult {
	#[must_use]
	pub fn id(&self) -> u64 {
		match self {
			Self::Nearby { id, .. } | Self::Candidates { id, .. } => *id,
		}
	}
}

/// Latest issued ids, shared with the worker.
#[derive(Debug, Default)]
struct LatestIds {
	nearby: AtomicU64,
	candidates: AtomicU64,
}

/// Channels to one running worker thread.
struct Worker {
	tx: Sender<SearchCommand>,
	rx: Receiver<SearchResult>,
	latest: Arc<LatestIds>,
}

impl Worker {
	fn spawn(provider: Arc<dyn PlacesProvider>) -> Self {
		let (command_tx, command_rx) = mpsc::channel();
		let (result_tx, result_rx) = mpsc::channel();
		let latest = Arc::new(LatestIds::default());
		let thread_latest = Arc::clone(&latest);

		// On failure the closure is dropped with `command_rx`, so the first
		// send reports the worker as stopped.
		let spawned = thread::Builder::new()
			.name("nearby-search".into())
			.spawn(move || worker_loop(provider.as_ref(), &command_rx, &result_tx, &thread_latest));
		if let Err(err) = spawned {
			error!(%err, "failed to start search worker");
		}

		Self {
			tx: command_tx,
			rx: result_rx,
			latest,
		}
	}
}

/// What [`SearchRuntime::drain`] collected in one pass.
#[derive(Debug, Default)]
pub struct Drained {
	/// Responses to the latest requests, in arrival order.
	pub results: Vec<SearchResult>,
	/// The worker went away while a nearby search was outstanding.
	pub lost_nearby: bool,
	/// The worker went away while a candidate lookup was outstanding.
	pub lost_candidates: bool,
}

/// Owns the search worker and sequences requests to it.
///
/// A worker that has gone away is replaced on the next drain or issue, so a
/// failed search never leaves later searches without an answer.
pub struct SearchRuntime {
	provider: Arc<dyn PlacesProvider>,
	worker: Worker,
	next_nearby_id: u64,
	next_candidates_id: u64,
	nearby_in_flight: bool,
	candidates_in_flight: bool,
}

impl SearchRuntime {
	/// Start the worker thread for `provider`.
	pub fn spawn(provider: Arc<dyn PlacesProvider>) -> Self {
		Self {
			worker: Worker::spawn(Arc::clone(&provider)),
			provider,
			next_nearby_id: 0,
			next_candidates_id: 0,
			nearby_in_flight: false,
			candidates_in_flight: false,
		}
	}

	/// Queue a nearby search, superseding any earlier one. Returns its id.
	pub fn issue_nearby(&mut self, request: NearbyRequest) -> Result<u64, ProviderError> {
		self.next_nearby_id = self.next_nearby_id.saturating_add(1);
		let id = self.next_nearby_id;
		self.worker.latest.nearby.store(id, Ordering::Release);
		debug!(id, keyword = %request.keyword, "issue nearby search");
		if self.worker.tx.send(SearchCommand::Nearby { id, request }).is_err() {
			self.restart();
			return Err(ProviderError::WorkerStopped);
		}
		self.nearby_in_flight = true;
		Ok(id)
	}

	/// Queue a candidate lookup, superseding any earlier one. Returns its id.
	pub fn issue_autocomplete(&mut self, request: AutocompleteRequest) -> Result<u64, ProviderError> {
		self.next_candidates_id = self.next_candidates_id.saturating_add(1);
		let id = self.next_candidates_id;
		self.worker.latest.candidates.store(id, Ordering::Release);
		trace!(id, input = %request.input, "issue autocomplete");
		if self
			.worker
			.tx
			.send(SearchCommand::Autocomplete { id, request })
			.is_err()
		{
			self.restart();
			return Err(ProviderError::WorkerStopped);
		}
		self.candidates_in_flight = true;
		Ok(id)
	}

	/// Whether `result` answers the most recent request of its kind.
	#[must_use]
	pub fn matches_latest(&self, result: &SearchResult) -> bool {
		match result {
			SearchResult::Nearby { id, .. } => *id == self.next_nearby_id,
			SearchResult::Candidates { id, .. } => *id == self.next_candidates_id,
		}
	}

	/// Keep `result` only if it is current, retiring the in-flight flag.
	pub fn accept(&mut self, result: SearchResult) -> Option<SearchResult> {
		if !self.matches_latest(&result) {
			debug!(id = result.id(), "discarding stale search response");
			return None;
		}
		match result {
			SearchResult::Nearby { .. } => self.nearby_in_flight = false,
			SearchResult::Candidates { .. } => self.candidates_in_flight = false,
		}
		Some(result)
	}

	/// Collect every current response without blocking.
	///
	/// If the worker has gone away, the requests it still owed are reported
	/// as lost and a fresh worker takes over.
	pub fn drain(&mut self) -> Drained {
		let mut drained = Drained::default();
		loop {
			match self.worker.rx.try_recv() {
				Ok(result) => drained.results.extend(self.accept(result)),
				Err(TryRecvError::Empty) => break,
				Err(TryRecvError::Disconnected) => {
					drained.lost_nearby = self.nearby_in_flight;
					drained.lost_candidates = self.candidates_in_flight;
					self.restart();
					break;
				}
			}
		}
		drained
	}

	fn restart(&mut self) {
		warn!(
			nearby_in_flight = self.nearby_in_flight,
			candidates_in_flight = self.candidates_in_flight,
			"search worker stopped, restarting"
		);
		self.nearby_in_flight = false;
		self.candidates_in_flight = false;
		self.worker = Worker::spawn(Arc::clone(&self.provider));
	}

	#[must_use]
	pub fn is_in_flight(&self) -> bool {
		self.nearby_in_flight
	}

	#[must_use]
	pub fn candidates_in_flight(&self) -> bool {
		self.candidates_in_flight
	}

	pub fn shutdown(&self) {
		let _ = self.worker.tx.send(SearchCommand::Shutdown);
	}
}

impl Drop for SearchRuntime {
	fn drop(&mut self) {
		self.shutdown();
	}
}

fn worker_loop(
	provider: &dyn PlacesProvider,
	command_rx: &Receiver<SearchCommand>,
	result_tx: &Sender<SearchResult>,
	latest: &LatestIds,
) {
	while let Ok(command) = command_rx.recv() {
		let result = match command {
			SearchCommand::Nearby { id, request } => {
				if id < latest.nearby.load(Ordering::Acquire) {
					trace!(id, "skipping superseded nearby search");
					continue;
				}
				let response = guarded(|| provider.nearby_search(&request));
				SearchResult::Nearby {
					id,
					outcome: outcome_from_response(response),
				}
			}
			SearchCommand::Autocomplete { id, request } => {
				if id < latest.candidates.load(Ordering::Acquire) {
					trace!(id, "skipping superseded autocomplete");
					continue;
				}
				let candidates = guarded(|| provider.autocomplete(&request));
				SearchResult::Candidates { id, candidates }
			}
			SearchCommand::Shutdown => break,
		};

		if result_tx.send(result).is_err() {
			break;
		}
	}
}

/// Run a provider call, turning a panic into [`ProviderError::Panicked`].
fn guarded<T>(call: impl FnOnce() -> Result<T, ProviderError>) -> Result<T, ProviderError> {
	panic::catch_unwind(AssertUnwindSafe(call)).unwrap_or_else(|payload| {
		let message = payload
			.downcast_ref::<&str>()
			.map(|message| (*message).to_string())
			.or_else(|| payload.downcast_ref::<String>().cloned())
			.unwrap_or_else(|| "unknown panic".to_string());
		error!(%message, "places provider panicked");
		Err(ProviderError::Panicked(message))
	})
}

#[cfg(test)]
mod tests {
	use std::sync::Mutex;
	use std::time::Duration;

	use super::*;
	use crate::geo::Coordinate;
	use crate::place::PlaceResult;
	use crate::provider::{SearchResponse, SearchStatus};
	use crate::search::SearchFailure;

	/// Provider that answers from a fixed script and can be held on a gate.
	struct ScriptedProvider {
		nearby: Mutex<Vec<SearchResponse>>,
		gate: Mutex<Option<Receiver<()>>>,
	}

	impl ScriptedProvider {
		fn new(responses: Vec<SearchResponse>) -> Self {
			Self {
				nearby: Mutex::new(responses),
				gate: Mutex::new(None),
			}
		}
	}

	impl PlacesProvider for ScriptedProvider {
		fn nearby_search(&self, _request: &NearbyRequest) -> Result<SearchResponse, ProviderError> {
			if let Some(gate) = self.gate.lock().unwrap().take() {
				let _ = gate.recv_timeout(Duration::from_secs(2));
			}
			let mut responses = self.nearby.lock().unwrap();
			if responses.is_empty() {
				return Ok(SearchResponse::with_status(SearchStatus::UnknownError));
			}
			Ok(responses.remove(0))
		}

		fn autocomplete(
			&self,
			request: &AutocompleteRequest,
		) -> Result<Vec<PlaceResult>, ProviderError> {
			Ok(vec![PlaceResult::new("c1", request.input.clone())])
		}
	}

	fn request(keyword: &str) -> NearbyRequest {
		NearbyRequest {
			center: Coordinate::new(35.0, 139.0).unwrap(),
			radius_m: 5_000,
			keyword: keyword.into(),
		}
	}

	fn recv(runtime: &SearchRuntime) -> SearchResult {
		let deadline = std::time::Instant::now() + Duration::from_secs(2);
		loop {
			match runtime.worker.rx.try_recv() {
				Ok(result) => return result,
				Err(TryRecvError::Empty) if std::time::Instant::now() < deadline => {
					thread::sleep(Duration::from_millis(5));
				}
				Err(err) => panic!("no search result: {err:?}"),
			}
		}
	}

	#[test]
	fn nearby_search_round_trip() {
		let provider = ScriptedProvider::new(vec![SearchResponse::ok(vec![PlaceResult::new(
			"p1", "Cafe A",
		)])]);
		let mut runtime = SearchRuntime::spawn(Arc::new(provider));

		let id = runtime.issue_nearby(request("coffee")).unwrap();
		assert!(runtime.is_in_flight());

		let result = runtime.accept(recv(&runtime)).expect("current result");
		assert_eq!(result.id(), id);
		assert!(!runtime.is_in_flight());
		match result {
			SearchResult::Nearby { outcome, .. } => assert_eq!(outcome.unwrap().len(), 1),
			SearchResult::Candidates { .. } => panic!("unexpected candidates"),
		}
	}

	#[test]
	fn non_ok_status_is_reported_as_failure() {
		let provider =
			ScriptedProvider::new(vec![SearchResponse::with_status(SearchStatus::ZeroResults)]);
		let mut runtime = SearchRuntime::spawn(Arc::new(provider));

		runtime.issue_nearby(request("nothing")).unwrap();
		let result = runtime.accept(recv(&runtime)).unwrap();
		assert_eq!(
			result,
			SearchResult::Nearby {
				id: 1,
				outcome: Err(SearchFailure::Status(SearchStatus::ZeroResults)),
			}
		);
	}

	#[test]
	fn superseded_responses_are_discarded() {
		let (gate_tx, gate_rx) = mpsc::channel();
		let provider = ScriptedProvider::new(vec![
			SearchResponse::ok(vec![PlaceResult::new("old", "Old")]),
			SearchResponse::ok(vec![PlaceResult::new("new", "New")]),
		]);
		*provider.gate.lock().unwrap() = Some(gate_rx);
		let mut runtime = SearchRuntime::spawn(Arc::new(provider));

		// The first request is held inside the provider while the second is issued.
		let first = runtime.issue_nearby(request("old")).unwrap();
		thread::sleep(Duration::from_millis(20));
		let second = runtime.issue_nearby(request("new")).unwrap();
		gate_tx.send(()).unwrap();

		let stale = recv(&runtime);
		assert_eq!(stale.id(), first);
		assert!(runtime.accept(stale).is_none());
		assert!(runtime.is_in_flight());

		let fresh = runtime.accept(recv(&runtime)).expect("latest result");
		assert_eq!(fresh.id(), second);
		assert!(!runtime.is_in_flight());
	}

	#[test]
	fn candidates_use_their_own_sequence() {
		let provider = ScriptedProvider::new(Vec::new());
		let mut runtime = SearchRuntime::spawn(Arc::new(provider));

		let id = runtime
			.issue_autocomplete(AutocompleteRequest {
				input: "ramen".into(),
				bias: None,
			})
			.unwrap();
		assert_eq!(id, 1);
		let result = runtime.accept(recv(&runtime)).unwrap();
		assert!(matches!(
			result,
			SearchResult::Candidates { id: 1, candidates: Ok(ref list) } if list[0].name == "ramen"
		));
		assert!(!runtime.candidates_in_flight());
	}

	/// Wait until the worker thread has dropped its end of the channels.
	fn wait_for_exit(runtime: &SearchRuntime) {
		let deadline = std::time::Instant::now() + Duration::from_secs(2);
		while matches!(runtime.worker.rx.try_recv(), Err(TryRecvError::Empty))
			&& std::time::Instant::now() < deadline
		{
			thread::sleep(Duration::from_millis(5));
		}
		assert!(matches!(
			runtime.worker.rx.try_recv(),
			Err(TryRecvError::Disconnected)
		));
	}

	#[test]
	fn shutdown_stops_worker() {
		let runtime = SearchRuntime::spawn(Arc::new(ScriptedProvider::new(Vec::new())));
		runtime.shutdown();
		wait_for_exit(&runtime);
	}

	#[test]
	fn issuing_to_a_stopped_worker_fails_and_restarts_it() {
		let provider = ScriptedProvider::new(vec![SearchResponse::ok(vec![PlaceResult::new(
			"p1", "Cafe A",
		)])]);
		let mut runtime = SearchRuntime::spawn(Arc::new(provider));
		runtime.shutdown();
		wait_for_exit(&runtime);

		assert_eq!(
			runtime.issue_nearby(request("coffee")),
			Err(ProviderError::WorkerStopped)
		);
		assert!(!runtime.is_in_flight());

		let id = runtime.issue_nearby(request("coffee")).unwrap();
		let result = runtime.accept(recv(&runtime)).expect("answer from the new worker");
		assert_eq!(result.id(), id);
		assert!(!runtime.is_in_flight());
	}

	#[test]
	fn requests_owed_by_a_stopped_worker_are_reported_lost() {
		let (gate_tx, gate_rx) = mpsc::channel();
		let provider = ScriptedProvider::new(vec![SearchResponse::ok(Vec::new())]);
		*provider.gate.lock().unwrap() = Some(gate_rx);
		let mut runtime = SearchRuntime::spawn(Arc::new(provider));

		// The worker is held inside the first search, so the shutdown and the
		// second search queue up behind it and the second is never answered.
		runtime.issue_nearby(request("held")).unwrap();
		thread::sleep(Duration::from_millis(20));
		runtime.shutdown();
		runtime.issue_nearby(request("orphaned")).unwrap();
		gate_tx.send(()).unwrap();

		let deadline = std::time::Instant::now() + Duration::from_secs(2);
		let drained = loop {
			let drained = runtime.drain();
			if drained.lost_nearby || std::time::Instant::now() > deadline {
				break drained;
			}
			thread::sleep(Duration::from_millis(5));
		};
		assert!(drained.lost_nearby);
		assert!(drained.results.is_empty());
		assert!(!runtime.is_in_flight());
	}

	struct PanickingProvider;

	impl PlacesProvider for PanickingProvider {
		fn nearby_search(&self, request: &NearbyRequest) -> Result<SearchResponse, ProviderError> {
			if request.keyword == "boom" {
				panic!("provider exploded");
			}
			Ok(SearchResponse::ok(vec![PlaceResult::new("p1", "Cafe A")]))
		}

		fn autocomplete(
			&self,
			_request: &AutocompleteRequest,
		) -> Result<Vec<PlaceResult>, ProviderError> {
			Ok(Vec::new())
		}
	}

	#[test]
	fn provider_panic_becomes_a_failed_search() {
		let mut runtime = SearchRuntime::spawn(Arc::new(PanickingProvider));

		runtime.issue_nearby(request("boom")).unwrap();
		let result = runtime.accept(recv(&runtime)).unwrap();
		assert_eq!(
			result,
			SearchResult::Nearby {
				id: 1,
				outcome: Err(SearchFailure::Provider(ProviderError::Panicked(
					"provider exploded".into()
				))),
			}
		);
		assert!(!runtime.is_in_flight());

		// The same worker keeps serving.
		runtime.issue_nearby(request("coffee")).unwrap();
		let result = runtime.accept(recv(&runtime)).unwrap();
		assert!(matches!(result, SearchResult::Nearby { id: 2, outcome: Ok(ref places) } if places.len() == 1));
	}
}
