use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use super::*;
use crate::fetcher_fn;

const DELAY: Duration = Duration::from_millis(400);
const LATENCY: Duration = Duration::from_millis(100);

fn ms(n: u64) -> Duration {
	Duration::from_millis(n)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
	Success(Vec<String>, String),
	Error(String),
	Clear,
}

fn success(rows: &[&str], keyword: &str) -> Event {
	Event::Success(rows.iter().map(|r| r.to_string()).collect(), keyword.to_owned())
}

#[derive(Clone, Default)]
struct Log {
	events: Arc<Mutex<Vec<Event>>>,
	calls: Arc<Mutex<Vec<String>>>,
	tokens: Arc<Mutex<Vec<(String, CancellationToken)>>>,
}

impl Log {
	fn events(&self) -> Vec<Event> {
		self.events.lock().clone()
	}

	fn calls(&self) -> Vec<String> {
		self.calls.lock().clone()
	}

	fn token(&self, keyword: &str) -> CancellationToken {
		self.tokens
			.lock()
			.iter()
			.find(|(k, _)| k == keyword)
			.map(|(_, t)| t.clone())
			.expect("no fetch recorded for keyword")
	}

	fn options(&self) -> SearchOptions<String, String> {
		let on_success = Arc::clone(&self.events);
		let on_error = Arc::clone(&self.events);
		let on_clear = Arc::clone(&self.events);
		SearchOptions::new()
			.delay(DELAY)
			.on_success(move |rows, keyword| on_success.lock().push(Event::Success(rows, keyword.to_owned())))
			.on_error(move |error| on_error.lock().push(Event::Error(error)))
			.on_clear(move || on_clear.lock().push(Event::Clear))
	}
}

struct Reply {
	latency: Duration,
	outcome: Result<Vec<String>, String>,
}

/// Fetcher with per-keyword latency and outcome. Unknown keywords answer
/// `["<keyword>:1"]` after [`LATENCY`].
struct ScriptedFetcher {
	log: Log,
	replies: HashMap<String, Reply>,
	cooperative: bool,
}

impl ScriptedFetcher {
	fn new(log: &Log) -> Self {
		Self {
			log: log.clone(),
			replies: HashMap::new(),
			cooperative: true,
		}
	}

	fn reply(mut self, keyword: &str, latency: Duration, outcome: Result<Vec<String>, String>) -> Self {
		self.replies.insert(keyword.to_owned(), Reply { latency, outcome });
		self
	}

	/// Ignores the cancellation token and always runs to completion.
	fn stubborn(mut self) -> Self {
		self.cooperative = false;
		self
	}
}

#[async_trait]
impl Fetcher<String> for ScriptedFetcher {
	type Error = String;

	async fn fetch(&self, keyword: String, cancel: CancellationToken) -> Result<Vec<String>, FetchError<String>> {
		self.log.calls.lock().push(keyword.clone());
		self.log.tokens.lock().push((keyword.clone(), cancel.clone()));

		let (latency, outcome) = match self.replies.get(&keyword) {
			Some(reply) => (reply.latency, reply.outcome.clone()),
			None => (LATENCY, Ok(vec![format!("{keyword}:1")])),
		};

		if self.cooperative {
			tokio::select! {
				_ = cancel.cancelled() => return Err(FetchError::Cancelled),
				_ = sleep(latency) => {}
			}
		} else {
			sleep(latency).await;
		}
		outcome.map_err(FetchError::Failed)
	}
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn debounced_search_delivers_once_after_quiet_period() {
	let log = Log::default();
	let calls = Arc::clone(&log.calls);
	let fetcher = fetcher_fn(move |keyword: String, _cancel: CancellationToken| {
		let calls = Arc::clone(&calls);
		async move {
			calls.lock().push(keyword);
			sleep(LATENCY).await;
			Ok::<_, FetchError<String>>(vec!["a".to_owned(), "b".to_owned()])
		}
	});
	let controller = SearchController::new(fetcher, log.options());

	controller.search("x");

	sleep(DELAY - ms(1)).await;
	assert!(log.calls().is_empty());

	sleep(ms(2)).await;
	assert_eq!(log.calls(), ["x"]);
	assert!(log.events().is_empty());

	sleep(LATENCY).await;
	assert_eq!(log.events(), [success(&["a", "b"], "x")]);

	sleep(Duration::from_secs(5)).await;
	assert_eq!(log.events().len(), 1);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn burst_of_searches_runs_only_the_last() {
	let log = Log::default();
	let controller = SearchController::new(ScriptedFetcher::new(&log), log.options());

	controller.search("r");
	sleep(ms(100)).await;
	controller.search("ru");
	sleep(ms(100)).await;
	controller.search("rus");

	sleep(DELAY - ms(1)).await;
	assert!(log.calls().is_empty(), "quiet period restarts on every call");

	sleep(ms(2)).await;
	assert_eq!(log.calls(), ["rus"]);

	sleep(LATENCY).await;
	assert_eq!(log.events(), [success(&["rus:1"], "rus")]);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn second_debounced_search_within_quiet_period_wins() {
	let log = Log::default();
	let controller = SearchController::new(ScriptedFetcher::new(&log), log.options());

	controller.search("x");
	sleep(ms(100)).await;
	controller.search("y");
	sleep(Duration::from_secs(2)).await;

	assert_eq!(log.calls(), ["y"]);
	assert_eq!(log.events(), [success(&["y:1"], "y")]);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn newer_search_supersedes_in_flight_request() {
	let log = Log::default();
	let fetcher = ScriptedFetcher::new(&log)
		.reply("x", ms(300), Ok(vec!["old".to_owned()]))
		.reply("y", ms(50), Ok(vec!["new".to_owned()]));
	let controller = SearchController::new(fetcher, log.options());

	controller.search_now("x");
	sleep(ms(10)).await;
	controller.search_now("y");
	sleep(Duration::from_secs(1)).await;

	assert_eq!(log.calls(), ["x", "y"]);
	assert!(log.token("x").is_cancelled());
	assert!(!log.token("y").is_cancelled());
	assert_eq!(log.events(), [success(&["new"], "y")]);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn out_of_order_responses_keep_the_newest() {
	let log = Log::default();
	let fetcher = ScriptedFetcher::new(&log)
		.reply("x", ms(50), Ok(vec!["old".to_owned()]))
		.reply("y", ms(300), Ok(vec!["new".to_owned()]))
		.stubborn();
	let controller = SearchController::new(fetcher, log.options());

	controller.search_now("y");
	sleep(ms(10)).await;
	controller.search_now("x");
	sleep(ms(100)).await;
	assert_eq!(log.events(), [success(&["old"], "x")]);

	// "y" finishes later but started earlier.
	sleep(Duration::from_secs(1)).await;
	assert_eq!(log.events(), [success(&["old"], "x")]);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn stubborn_fetch_is_still_dropped_when_superseded() {
	let log = Log::default();
	let fetcher = ScriptedFetcher::new(&log)
		.reply("x", ms(300), Ok(vec!["old".to_owned()]))
		.reply("y", ms(500), Ok(vec!["new".to_owned()]))
		.stubborn();
	let controller = SearchController::new(fetcher, log.options());

	controller.search_now("x");
	sleep(ms(10)).await;
	controller.search_now("y");

	sleep(ms(400)).await;
	assert!(log.events().is_empty());

	sleep(ms(200)).await;
	assert_eq!(log.events(), [success(&["new"], "y")]);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn cancel_discards_pending_search() {
	let log = Log::default();
	let controller = SearchController::new(ScriptedFetcher::new(&log), log.options());

	controller.search("x");
	controller.cancel();
	sleep(Duration::from_secs(2)).await;

	assert!(log.calls().is_empty());
	assert!(log.events().is_empty());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn cancel_ignores_in_flight_response() {
	let log = Log::default();
	let controller = SearchController::new(ScriptedFetcher::new(&log).stubborn(), log.options());

	controller.search("x");
	sleep(DELAY + ms(10)).await;
	assert_eq!(log.calls(), ["x"]);

	controller.cancel();
	sleep(Duration::from_secs(2)).await;

	assert!(log.token("x").is_cancelled());
	assert!(log.events().is_empty());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn blank_keyword_clears_without_fetching() {
	let log = Log::default();
	let controller = SearchController::new(ScriptedFetcher::new(&log), log.options());

	controller.search_now("   ");
	assert_eq!(log.events(), [Event::Clear]);

	controller.search("\t");
	sleep(DELAY + ms(1)).await;
	assert_eq!(log.events(), [Event::Clear, Event::Clear]);
	assert!(log.calls().is_empty());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn blank_keyword_invalidates_in_flight_request() {
	let log = Log::default();
	let controller = SearchController::new(ScriptedFetcher::new(&log), log.options());

	controller.search_now("x");
	sleep(ms(10)).await;
	controller.search_now("");
	sleep(Duration::from_secs(1)).await;

	assert!(log.token("x").is_cancelled());
	assert_eq!(log.events(), [Event::Clear]);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn keyword_is_trimmed_before_fetch() {
	let log = Log::default();
	let controller = SearchController::new(ScriptedFetcher::new(&log), log.options());

	controller.search_now("  rust \n");
	sleep(Duration::from_secs(1)).await;

	assert_eq!(log.calls(), ["rust"]);
	assert_eq!(log.events(), [success(&["rust:1"], "rust")]);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn search_now_bypasses_debounce() {
	let log = Log::default();
	let controller = SearchController::new(ScriptedFetcher::new(&log), log.options());

	controller.search("x");
	sleep(ms(10)).await;
	controller.search_now("y");
	sleep(ms(1)).await;
	assert_eq!(log.calls(), ["y"]);

	sleep(Duration::from_secs(2)).await;
	assert_eq!(log.calls(), ["y"], "pending debounced search must not fire");
	assert_eq!(log.events(), [success(&["y:1"], "y")]);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn current_failure_reaches_on_error_and_controller_recovers() {
	let log = Log::default();
	let fetcher = ScriptedFetcher::new(&log).reply("boom", ms(50), Err("backend down".to_owned()));
	let controller = SearchController::new(fetcher, log.options());

	controller.search_now("boom");
	sleep(ms(100)).await;
	assert_eq!(log.events(), [Event::Error("backend down".to_owned())]);

	controller.search_now("x");
	sleep(ms(200)).await;
	assert_eq!(log.events(), [Event::Error("backend down".to_owned()), success(&["x:1"], "x")]);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn stale_failure_is_dropped() {
	let log = Log::default();
	let fetcher = ScriptedFetcher::new(&log)
		.reply("boom", ms(300), Err("late failure".to_owned()))
		.stubborn();
	let controller = SearchController::new(fetcher, log.options());

	controller.search_now("boom");
	sleep(ms(10)).await;
	controller.search_now("x");
	sleep(Duration::from_secs(1)).await;

	assert_eq!(log.events(), [success(&["x:1"], "x")]);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn cleanup_is_idempotent_and_advances_epoch() {
	let log = Log::default();
	let controller = SearchController::new(ScriptedFetcher::new(&log), log.options());

	controller.search_now("x");
	assert_eq!(controller.epoch(), 1);

	controller.cleanup();
	controller.cleanup();
	assert_eq!(controller.epoch(), 3);

	sleep(Duration::from_secs(1)).await;
	assert!(log.events().is_empty());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn dropping_controller_tears_down_work() {
	let log = Log::default();
	let controller = SearchController::new(ScriptedFetcher::new(&log), log.options());

	controller.search_now("x");
	sleep(ms(10)).await;
	controller.search("y");
	drop(controller);
	sleep(Duration::from_secs(2)).await;

	assert_eq!(log.calls(), ["x"]);
	assert!(log.token("x").is_cancelled());
	assert!(log.events().is_empty());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn callback_can_start_the_next_search() {
	let log = Log::default();
	let slot: Arc<OnceLock<SearchController<String, ScriptedFetcher>>> = Arc::default();

	let hook = Arc::clone(&slot);
	let events = Arc::clone(&log.events);
	let options = SearchOptions::new().on_success(move |rows, keyword| {
		events.lock().push(Event::Success(rows, keyword.to_owned()));
		if keyword == "x"
			&& let Some(controller) = hook.get()
		{
			controller.search_now("y");
		}
	});
	assert!(slot.set(SearchController::new(ScriptedFetcher::new(&log), options)).is_ok());

	slot.get().expect("controller installed").search_now("x");
	sleep(Duration::from_secs(1)).await;

	assert_eq!(log.events(), [success(&["x:1"], "x"), success(&["y:1"], "y")]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn rapid_searches_on_multi_thread_runtime_deliver_only_the_last() {
	let log = Log::default();
	let fetcher = ScriptedFetcher::new(&log).stubborn();
	let controller = SearchController::new(fetcher, log.options());

	for i in 0..50 {
		controller.search_now(format!("k{i}"));
	}
	sleep(ms(500)).await;

	assert_eq!(log.events(), [success(&["k49:1"], "k49")]);
}

#[test]
fn default_options_use_400ms_delay() {
	let options = SearchOptions::<String, String>::default();
	assert_eq!(options.debounce(), crate::DEFAULT_DELAY);
	assert_eq!(crate::DEFAULT_DELAY, ms(400));
}
