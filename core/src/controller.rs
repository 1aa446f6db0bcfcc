//! The UI state controller.
//!
//! # Design
//! `Controller` is the single owner of [`UiState`] and [`Page`]. Hosts feed it
//! [`Event`]s; events that need the network come back as a [`Command`]
//! carrying a ready-built request. The host runs that request on a
//! [`Transport`] (see [`perform`]) and returns the outcome through
//! [`Controller::complete`]. The controller itself never awaits, so a second
//! submission that arrives while a search is in flight sees `is_loading` and
//! is rejected instead of queued.
//!
//! Time is passed in explicitly. Every shown error schedules its own hide
//! five seconds later; hosts call [`Controller::fire_timers`] when
//! [`Controller::next_deadline`] elapses. Deadlines are never cancelled, so a
//! stale timer may hide a newer error early.

use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::client::OmdbClient;
use crate::config::Config;
use crate::error::{ApiError, ClientError, ConfigError, NetworkError};
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::render::{render_detail, render_results, Markup, RenderOptions};
use crate::state::{stats_line, Focus, Page, UiState};
use crate::types::SearchQuery;

/// How long an error stays on screen.
pub const ERROR_DISPLAY: Duration = Duration::from_secs(5);

pub const DETAIL_API_FAILURE: &str = "Unable to load movie details. Please try again.";
pub const DETAIL_NETWORK_FAILURE: &str =
    "Unable to load movie details. Please check your connection.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Other,
}

/// User interaction delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The search input now holds this text.
    InputChanged(String),
    SearchClicked,
    /// Key pressed while the search input has focus.
    InputKeyPressed(Key),
    CardClicked(String),
    CardKeyPressed { imdb_id: String, key: Key },
    ModalCloseClicked,
    /// Click on the modal overlay outside its content.
    ModalBackgroundClicked,
    /// Key pressed anywhere in the document.
    DocumentKeyDown(Key),
}

#[derive(Debug, Clone)]
pub struct SearchTicket {
    pub query: SearchQuery,
    pub request: HttpRequest,
}

#[derive(Debug, Clone)]
pub struct DetailTicket {
    pub imdb_id: String,
    pub request: HttpRequest,
}

/// Work the host must carry out after an event.
#[derive(Debug, Clone)]
pub enum Command {
    None,
    Search(SearchTicket),
    FetchDetail(DetailTicket),
}

impl Command {
    pub fn request(&self) -> Option<&HttpRequest> {
        match self {
            Command::None => None,
            Command::Search(ticket) => Some(&ticket.request),
            Command::FetchDetail(ticket) => Some(&ticket.request),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Command::None)
    }
}

/// A finished request, handed back to [`Controller::complete`].
#[derive(Debug)]
pub enum Completion {
    Search {
        ticket: SearchTicket,
        outcome: Result<HttpResponse, NetworkError>,
    },
    Detail {
        ticket: DetailTicket,
        outcome: Result<HttpResponse, NetworkError>,
    },
}

/// Execute `command` on `transport`. `Command::None` yields `None`.
pub async fn perform<T: Transport>(transport: &T, command: Command) -> Option<Completion> {
    match command {
        Command::None => None,
        Command::Search(ticket) => {
            let outcome = transport.execute(ticket.request.clone()).await;
            Some(Completion::Search { ticket, outcome })
        }
        Command::FetchDetail(ticket) => {
            let outcome = transport.execute(ticket.request.clone()).await;
            Some(Completion::Detail { ticket, outcome })
        }
    }
}

#[derive(Debug)]
pub struct Controller {
    /// `None` once bootstrap has failed; every event is then ignored.
    client: Option<OmdbClient>,
    render: RenderOptions,
    state: UiState,
    page: Page,
    error_deadlines: Vec<Instant>,
}

impl Controller {
    pub fn new(client: OmdbClient, render: RenderOptions) -> Self {
        Self {
            client: Some(client),
            render,
            state: UiState::default(),
            page: Page::default(),
            error_deadlines: Vec::new(),
        }
    }

    /// Validate the loaded configuration and build the controller.
    ///
    /// On failure the controller is inert and shows the setup message until
    /// the process restarts.
    pub fn bootstrap(config: Result<Config, ConfigError>) -> Self {
        let ready = config.and_then(|config| {
            let key = config.validate()?.to_string();
            let client = OmdbClient::new(config.base_url.trim(), &key);
            Ok((client, config.render_options()))
        });
        match ready {
            Ok((client, render)) => {
                info!(base_url = client.base_url(), "movie search initialized");
                Self::new(client, render)
            }
            Err(err) => {
                error!(error = %err, "configuration error, search disabled");
                Self::disabled(&err)
            }
        }
    }

    fn disabled(err: &ConfigError) -> Self {
        Self {
            client: None,
            render: RenderOptions::default(),
            state: UiState {
                error_visible: true,
                ..UiState::default()
            },
            page: Page {
                error_text: err.setup_message(),
                ..Page::default()
            },
            error_deadlines: Vec::new(),
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.client.is_some()
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Banner text if the banner is currently shown.
    pub fn visible_error(&self) -> Option<&str> {
        self.state.error_visible.then_some(self.page.error_text.as_str())
    }

    pub fn handle(&mut self, event: Event, now: Instant) -> Command {
        if self.client.is_none() {
            debug!(?event, "ignoring event, search is not configured");
            return Command::None;
        }
        match event {
            Event::InputChanged(text) => {
                self.input_changed(text);
                Command::None
            }
            Event::SearchClicked if self.page.search_button.disabled => {
                debug!("search button is disabled");
                Command::None
            }
            Event::SearchClicked | Event::InputKeyPressed(Key::Enter) => self.submit(now),
            Event::CardClicked(imdb_id)
            | Event::CardKeyPressed {
                imdb_id,
                key: Key::Enter | Key::Space,
            } => self.request_detail(imdb_id),
            Event::ModalCloseClicked
            | Event::ModalBackgroundClicked
            | Event::DocumentKeyDown(Key::Escape) => {
                if self.state.modal_open {
                    self.close_modal();
                }
                Command::None
            }
            Event::InputKeyPressed(_)
            | Event::CardKeyPressed { .. }
            | Event::DocumentKeyDown(_) => Command::None,
        }
    }

    /// Apply the outcome of a request started by an earlier [`Command`].
    pub fn complete(&mut self, completion: Completion, now: Instant) {
        match completion {
            Completion::Search { ticket, outcome } => self.finish_search(ticket, outcome, now),
            Completion::Detail { ticket, outcome } => self.finish_detail(ticket, outcome, now),
        }
    }

    /// Handle an event and, if it needs the network, run the request to
    /// completion before returning.
    pub async fn dispatch<T: Transport>(&mut self, event: Event, transport: &T, now: Instant) {
        let command = self.handle(event, now);
        if let Some(completion) = perform(transport, command).await {
            self.complete(completion, now);
        }
    }

    /// Earliest pending error-hide deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.error_deadlines.iter().min().copied()
    }

    /// Fire every deadline at or before `now`. Returns whether any fired.
    pub fn fire_timers(&mut self, now: Instant) -> bool {
        let pending = self.error_deadlines.len();
        self.error_deadlines.retain(|deadline| *deadline > now);
        let fired = self.error_deadlines.len() != pending;
        if fired {
            self.hide_error();
        }
        fired
    }

    /// Hide the banner. Idempotent; the setup message cannot be hidden.
    pub fn hide_error(&mut self) {
        if self.client.is_some() {
            self.state.error_visible = false;
        }
    }

    fn show_error(&mut self, message: String, now: Instant) {
        self.page.error_text = message;
        self.state.error_visible = true;
        self.error_deadlines.retain(|deadline| *deadline > now);
        self.error_deadlines.push(now + ERROR_DISPLAY);
    }

    fn input_changed(&mut self, text: String) {
        self.page.search_input = text;
        if !self.input_is_blank() && self.state.error_visible {
            self.hide_error();
        }
        self.update_search_button();
    }

    fn input_is_blank(&self) -> bool {
        self.page.search_input.trim().is_empty()
    }

    fn update_search_button(&mut self) {
        self.page.search_button.disabled = self.state.is_loading || self.input_is_blank();
    }

    fn set_loading(&mut self, loading: bool) {
        self.state.is_loading = loading;
        self.page.spinner_visible = loading;
        self.page.search_button.loading = loading;
        if loading {
            self.page.search_button.disabled = true;
        } else {
            self.update_search_button();
        }
    }

    fn submit(&mut self, now: Instant) -> Command {
        if self.state.is_loading {
            debug!("search already in flight, submission rejected");
            return Command::None;
        }
        let query = match SearchQuery::parse(&self.page.search_input) {
            Ok(query) => query,
            Err(err) => {
                debug!(%err, "query rejected");
                self.page.focus = Focus::SearchInput;
                self.show_error(err.to_string(), now);
                return Command::None;
            }
        };
        let Some(client) = &self.client else {
            return Command::None;
        };
        let request = client.build_search(&query);

        self.set_loading(true);
        self.hide_error();
        self.state.last_query = query.as_str().to_string();
        debug!(query = query.as_str(), "searching");
        Command::Search(SearchTicket { query, request })
    }

    fn finish_search(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<HttpResponse, NetworkError>,
        now: Instant,
    ) {
        let Some(client) = &self.client else {
            return;
        };
        let parsed = outcome
            .map_err(ClientError::from)
            .and_then(|response| client.parse_search(response));
        let query = ticket.query.as_str();

        match parsed {
            Ok(results) => {
                info!(query, count = results.len(), "search succeeded");
                self.page.grid = render_results(&results, &self.render);
                self.page.card_labels = results
                    .iter()
                    .map(|r| format!("{} ({})", r.title, r.year))
                    .collect();
                self.page.card_ids = results.into_iter().map(|r| r.imdb_id).collect();
                self.page.stats = stats_line(self.page.card_ids.len(), query);
            }
            Err(ClientError::Api(err)) => {
                warn!(query, error = %err, "search rejected by provider");
                if matches!(err, ApiError::NotFound) {
                    self.page.grid = Markup::empty();
                    self.page.card_ids.clear();
                    self.page.card_labels.clear();
                }
                self.page.stats.clear();
                self.show_error(err.search_message(query), now);
            }
            Err(ClientError::Network(err)) => {
                warn!(query, error = %err, "search failed");
                self.show_error(err.search_message(), now);
            }
        }
        self.set_loading(false);
    }

    fn request_detail(&mut self, imdb_id: String) -> Command {
        let Some(client) = &self.client else {
            return Command::None;
        };
        if imdb_id.is_empty() {
            return Command::None;
        }
        debug!(imdb_id, "fetching details");
        let request = client.build_detail(&imdb_id);
        Command::FetchDetail(DetailTicket { imdb_id, request })
    }

    fn finish_detail(
        &mut self,
        ticket: DetailTicket,
        outcome: Result<HttpResponse, NetworkError>,
        now: Instant,
    ) {
        let Some(client) = &self.client else {
            return;
        };
        let parsed = outcome
            .map_err(ClientError::from)
            .and_then(|response| client.parse_detail(response));

        match parsed {
            Ok(detail) => {
                debug!(imdb_id = ticket.imdb_id, "details loaded");
                self.page.modal = render_detail(&detail, &self.render);
                self.open_modal();
            }
            Err(ClientError::Api(err)) => {
                warn!(imdb_id = ticket.imdb_id, error = %err, "detail lookup rejected");
                self.show_error(DETAIL_API_FAILURE.to_string(), now);
            }
            Err(ClientError::Network(err)) => {
                warn!(imdb_id = ticket.imdb_id, error = %err, "detail lookup failed");
                self.show_error(DETAIL_NETWORK_FAILURE.to_string(), now);
            }
        }
    }

    fn open_modal(&mut self) {
        self.state.modal_open = true;
        self.page.scroll_locked = true;
        self.page.focus = Focus::ModalClose;
    }

    fn close_modal(&mut self) {
        self.state.modal_open = false;
        self.page.modal = Markup::empty();
        self.page.scroll_locked = false;
        self.page.focus = Focus::SearchInput;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::http::HttpMethod;
    use crate::state::Phase;

    const BATMAN_SEARCH: &str = r#"{"Response":"True","totalResults":"1","Search":[
        {"Title":"Batman","Year":"1989","imdbID":"tt0096895","Type":"movie","Poster":"N/A"}]}"#;

    const BATMAN_DETAIL: &str = r#"{"Response":"True","Title":"Batman","Year":"1989",
        "Rated":"PG-13","Runtime":"126 min","Genre":"Action, Adventure","Director":"Tim Burton",
        "Writer":"Bob Kane","Actors":"Michael Keaton","Plot":"Gotham's protector.",
        "Language":"English","Country":"United States","Awards":"Won 1 Oscar",
        "Poster":"N/A","imdbRating":"7.5","imdbID":"tt0096895","Type":"movie"}"#;

    fn controller() -> Controller {
        Controller::new(
            OmdbClient::new("https://www.omdbapi.com/", "k3y"),
            RenderOptions::default(),
        )
    }

    fn ok(body: &str) -> Result<HttpResponse, NetworkError> {
        Ok(HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    fn type_and_submit(c: &mut Controller, text: &str, now: Instant) -> Command {
        c.handle(Event::InputChanged(text.to_string()), now);
        c.handle(Event::InputKeyPressed(Key::Enter), now)
    }

    fn search_ticket(command: Command) -> SearchTicket {
        match command {
            Command::Search(ticket) => ticket,
            other => panic!("expected a search command, got {other:?}"),
        }
    }

    fn detail_ticket(command: Command) -> DetailTicket {
        match command {
            Command::FetchDetail(ticket) => ticket,
            other => panic!("expected a detail command, got {other:?}"),
        }
    }

    fn run_search(c: &mut Controller, text: &str, body: &str, now: Instant) {
        let ticket = search_ticket(type_and_submit(c, text, now));
        c.complete(
            Completion::Search {
                ticket,
                outcome: ok(body),
            },
            now,
        );
    }

    struct FakeTransport {
        calls: RefCell<Vec<String>>,
        body: &'static str,
    }

    impl Transport for FakeTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, NetworkError> {
            self.calls.borrow_mut().push(request.url);
            ok(self.body)
        }
    }

    #[test]
    fn starts_idle_with_disabled_button() {
        let c = controller();
        assert_eq!(c.state().phase(), Phase::Idle);
        assert!(!c.state().modal_open);
        assert!(c.page().search_button.disabled);
        assert!(c.visible_error().is_none());
    }

    #[test]
    fn blank_query_shows_validation_message() {
        let mut c = controller();
        let now = Instant::now();
        let command = type_and_submit(&mut c, "   ", now);
        assert!(command.is_none());
        assert_eq!(c.visible_error(), Some("Please enter a movie title to search"));
        assert_eq!(c.page().focus, Focus::SearchInput);
        assert!(!c.state().is_loading);
    }

    #[test]
    fn short_query_shows_validation_message() {
        let mut c = controller();
        let now = Instant::now();
        c.handle(Event::InputChanged(" x ".to_string()), now);
        assert!(!c.page().search_button.disabled);
        let command = c.handle(Event::SearchClicked, now);
        assert!(command.is_none());
        assert_eq!(c.visible_error(), Some("Please enter at least 2 characters"));
        assert_eq!(c.state().phase(), Phase::ErrorShown);
    }

    #[test]
    fn disabled_button_ignores_clicks() {
        let mut c = controller();
        assert!(c.handle(Event::SearchClicked, Instant::now()).is_none());
        assert!(c.visible_error().is_none());
    }

    #[test]
    fn valid_query_enters_loading() {
        let mut c = controller();
        let command = type_and_submit(&mut c, "  batman ", Instant::now());
        let request = command.request().unwrap();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url, "https://www.omdbapi.com/?s=batman&apikey=k3y");
        assert_eq!(c.state().phase(), Phase::Loading);
        assert_eq!(c.state().last_query, "batman");
        assert!(c.page().spinner_visible);
        assert!(c.page().search_button.disabled);
        assert!(c.page().search_button.loading);
    }

    #[test]
    fn second_submit_while_loading_is_rejected() {
        let mut c = controller();
        let now = Instant::now();
        let ticket = search_ticket(type_and_submit(&mut c, "batman", now));

        assert!(c.handle(Event::InputKeyPressed(Key::Enter), now).is_none());
        c.handle(Event::InputChanged("superman".to_string()), now);
        assert!(c.page().search_button.disabled);
        assert!(c.handle(Event::SearchClicked, now).is_none());
        assert!(c.handle(Event::InputKeyPressed(Key::Enter), now).is_none());
        assert!(c.state().is_loading);

        c.complete(
            Completion::Search {
                ticket,
                outcome: ok(BATMAN_SEARCH),
            },
            now,
        );
        assert!(!c.state().is_loading);
        assert!(!c.page().search_button.disabled);
        let next = c.handle(Event::SearchClicked, now);
        assert_eq!(
            next.request().unwrap().url,
            "https://www.omdbapi.com/?s=superman&apikey=k3y"
        );
    }

    #[test]
    fn batman_search_renders_one_card() {
        let mut c = controller();
        run_search(&mut c, "batman", BATMAN_SEARCH, Instant::now());

        assert_eq!(c.state().phase(), Phase::Idle);
        assert_eq!(c.page().card_ids, vec!["tt0096895".to_string()]);
        assert_eq!(c.page().card_labels, vec!["Batman (1989)".to_string()]);
        let grid = c.page().grid.as_str();
        assert_eq!(grid.matches(r#"class="movie-card""#).count(), 1);
        assert!(grid.contains(r#"src="/public/images/cinema.webp""#));
        assert_eq!(c.page().stats, "Found 1 result for \"batman\"");
        assert!(!c.page().spinner_visible);
        assert!(!c.page().search_button.loading);
    }

    #[test]
    fn stats_pluralise_for_many_results() {
        let body = r#"{"Response":"True","Search":[
            {"Title":"A","Year":"1","imdbID":"tt1","Type":"movie","Poster":"N/A"},
            {"Title":"B","Year":"2","imdbID":"tt2","Type":"movie","Poster":"N/A"},
            {"Title":"C","Year":"3","imdbID":"tt3","Type":"series","Poster":"N/A"}]}"#;
        let mut c = controller();
        run_search(&mut c, "abc", body, Instant::now());
        assert_eq!(c.page().card_ids.len(), 3);
        assert_eq!(c.page().stats, "Found 3 results for \"abc\"");
    }

    #[test]
    fn not_found_clears_grid_and_names_query() {
        let mut c = controller();
        let now = Instant::now();
        run_search(&mut c, "batman", BATMAN_SEARCH, now);
        run_search(
            &mut c,
            "zzzznomatch",
            r#"{"Response":"False","Error":"Movie not found!"}"#,
            now,
        );

        assert!(c.page().grid.is_empty());
        assert!(c.page().card_ids.is_empty());
        assert!(c.page().card_labels.is_empty());
        assert_eq!(c.page().stats, "");
        assert!(c.visible_error().unwrap().contains("zzzznomatch"));
        assert_eq!(c.state().phase(), Phase::ErrorShown);
    }

    #[test]
    fn invalid_key_keeps_grid() {
        let mut c = controller();
        let now = Instant::now();
        run_search(&mut c, "batman", BATMAN_SEARCH, now);
        run_search(
            &mut c,
            "robin",
            r#"{"Response":"False","Error":"Invalid API key!"}"#,
            now,
        );
        assert_eq!(c.page().card_ids.len(), 1);
        assert_eq!(c.page().stats, "");
        assert_eq!(
            c.visible_error(),
            Some("Invalid API key. Please check your OMDb API key configuration.")
        );
    }

    #[test]
    fn other_provider_error_is_echoed() {
        let mut c = controller();
        run_search(
            &mut c,
            "ab",
            r#"{"Response":"False","Error":"Too many results."}"#,
            Instant::now(),
        );
        assert_eq!(c.visible_error(), Some("Search error: Too many results."));
    }

    #[test]
    fn network_failure_keeps_grid_and_stats() {
        let mut c = controller();
        let now = Instant::now();
        run_search(&mut c, "batman", BATMAN_SEARCH, now);

        let ticket = search_ticket(type_and_submit(&mut c, "joker", now));
        c.complete(
            Completion::Search {
                ticket,
                outcome: Err(NetworkError::Offline("dns error".to_string())),
            },
            now,
        );
        assert_eq!(c.page().card_ids.len(), 1);
        assert_eq!(c.page().stats, "Found 1 result for \"batman\"");
        assert_eq!(
            c.visible_error(),
            Some("Unable to search movies. Please check your internet connection.")
        );
        assert!(!c.state().is_loading);
    }

    #[test]
    fn server_error_status_is_generic() {
        let mut c = controller();
        let now = Instant::now();
        let ticket = search_ticket(type_and_submit(&mut c, "batman", now));
        c.complete(
            Completion::Search {
                ticket,
                outcome: Ok(HttpResponse {
                    status: 502,
                    headers: Vec::new(),
                    body: String::new(),
                }),
            },
            now,
        );
        assert_eq!(
            c.visible_error(),
            Some("Unable to search movies. Please try again later.")
        );
    }

    #[test]
    fn typing_hides_visible_error() {
        let mut c = controller();
        let now = Instant::now();
        type_and_submit(&mut c, "", now);
        assert!(c.visible_error().is_some());

        c.handle(Event::InputChanged("   ".to_string()), now);
        assert!(c.visible_error().is_some());

        c.handle(Event::InputChanged("b".to_string()), now);
        assert!(c.visible_error().is_none());
    }

    #[test]
    fn errors_hide_after_five_seconds() {
        let mut c = controller();
        let t0 = Instant::now();
        type_and_submit(&mut c, "", t0);
        assert_eq!(c.next_deadline(), Some(t0 + ERROR_DISPLAY));

        assert!(!c.fire_timers(t0 + Duration::from_millis(4_999)));
        assert!(c.visible_error().is_some());

        assert!(c.fire_timers(t0 + ERROR_DISPLAY));
        assert!(c.visible_error().is_none());
        assert!(c.next_deadline().is_none());
    }

    #[test]
    fn stale_timer_still_hides_newer_error() {
        let mut c = controller();
        let t0 = Instant::now();
        type_and_submit(&mut c, "", t0);
        let t3 = t0 + Duration::from_secs(3);
        c.handle(Event::InputKeyPressed(Key::Enter), t3);

        c.fire_timers(t0 + ERROR_DISPLAY);
        assert!(c.visible_error().is_none());
        assert_eq!(c.next_deadline(), Some(t3 + ERROR_DISPLAY));
        assert!(c.fire_timers(t3 + ERROR_DISPLAY));
        assert!(c.visible_error().is_none());
    }

    #[test]
    fn expired_deadlines_are_dropped_when_a_new_error_shows() {
        let mut c = controller();
        let t0 = Instant::now();
        for n in 0..10 {
            type_and_submit(&mut c, "", t0 + ERROR_DISPLAY * n);
        }
        let last = t0 + ERROR_DISPLAY * 9;
        assert_eq!(c.error_deadlines, vec![last + ERROR_DISPLAY]);
        assert_eq!(c.next_deadline(), Some(last + ERROR_DISPLAY));
        assert!(c.visible_error().is_some());
    }

    #[test]
    fn hide_error_is_idempotent() {
        let mut c = controller();
        let before = c.state().clone();
        c.hide_error();
        c.hide_error();
        assert_eq!(c.state(), &before);
        assert!(c.visible_error().is_none());
    }

    #[test]
    fn card_click_opens_modal() {
        let mut c = controller();
        let now = Instant::now();
        run_search(&mut c, "batman", BATMAN_SEARCH, now);

        let ticket = detail_ticket(c.handle(Event::CardClicked("tt0096895".to_string()), now));
        assert_eq!(
            ticket.request.url,
            "https://www.omdbapi.com/?i=tt0096895&apikey=k3y"
        );
        c.complete(
            Completion::Detail {
                ticket,
                outcome: ok(BATMAN_DETAIL),
            },
            now,
        );

        assert!(c.state().modal_open);
        assert!(c.page().scroll_locked);
        assert_eq!(c.page().focus, Focus::ModalClose);
        let modal = c.page().modal.as_str();
        assert!(modal.contains("<h2>Batman</h2>"));
        assert!(modal.contains("Gotham&#039;s protector."));
        assert!(!modal.contains("Box Office"));
    }

    #[test]
    fn keyboard_activation_uses_enter_and_space() {
        let mut c = controller();
        let now = Instant::now();
        for key in [Key::Enter, Key::Space] {
            let command = c.handle(
                Event::CardKeyPressed {
                    imdb_id: "tt0096895".to_string(),
                    key,
                },
                now,
            );
            assert!(matches!(command, Command::FetchDetail(_)));
        }
        let command = c.handle(
            Event::CardKeyPressed {
                imdb_id: "tt0096895".to_string(),
                key: Key::Other,
            },
            now,
        );
        assert!(command.is_none());
        assert!(c.handle(Event::CardClicked(String::new()), now).is_none());
    }

    #[test]
    fn detail_failures_show_generic_messages() {
        let mut c = controller();
        let now = Instant::now();

        let ticket = detail_ticket(c.handle(Event::CardClicked("tt0".to_string()), now));
        c.complete(
            Completion::Detail {
                ticket,
                outcome: ok(r#"{"Response":"False","Error":"Incorrect IMDb ID."}"#),
            },
            now,
        );
        assert_eq!(c.visible_error(), Some(DETAIL_API_FAILURE));
        assert!(!c.state().modal_open);

        let ticket = detail_ticket(c.handle(Event::CardClicked("tt0".to_string()), now));
        c.complete(
            Completion::Detail {
                ticket,
                outcome: Err(NetworkError::FetchFailed("refused".to_string())),
            },
            now,
        );
        assert_eq!(c.visible_error(), Some(DETAIL_NETWORK_FAILURE));
        assert!(!c.state().modal_open);
    }

    fn open_modal(c: &mut Controller, now: Instant) {
        let ticket = detail_ticket(c.handle(Event::CardClicked("tt0096895".to_string()), now));
        c.complete(
            Completion::Detail {
                ticket,
                outcome: ok(BATMAN_DETAIL),
            },
            now,
        );
        assert!(c.state().modal_open);
    }

    #[test]
    fn modal_closes_three_ways() {
        let now = Instant::now();
        for event in [
            Event::ModalCloseClicked,
            Event::ModalBackgroundClicked,
            Event::DocumentKeyDown(Key::Escape),
        ] {
            let mut c = controller();
            open_modal(&mut c, now);
            c.handle(event, now);
            assert!(!c.state().modal_open);
            assert!(!c.page().scroll_locked);
            assert!(c.page().modal.is_empty());
            assert_eq!(c.page().focus, Focus::SearchInput);
        }
    }

    #[test]
    fn other_keys_leave_modal_open() {
        let mut c = controller();
        let now = Instant::now();
        open_modal(&mut c, now);
        c.handle(Event::DocumentKeyDown(Key::Enter), now);
        assert!(c.state().modal_open);
    }

    #[test]
    fn escape_without_modal_does_nothing() {
        let mut c = controller();
        let before = c.page().clone();
        c.handle(Event::DocumentKeyDown(Key::Escape), Instant::now());
        assert_eq!(c.page(), &before);
    }

    #[test]
    fn placeholder_key_disables_everything() {
        let config = Config {
            api_key: Some("YOUR_API_KEY_HERE".to_string()),
            ..Config::default()
        };
        let mut c = Controller::bootstrap(Ok(config));
        assert!(!c.is_interactive());
        let message = c.visible_error().unwrap().to_string();
        assert!(message.contains("configure your OMDb API key"));

        let now = Instant::now();
        assert!(type_and_submit(&mut c, "batman", now).is_none());
        assert!(c.handle(Event::CardClicked("tt0096895".to_string()), now).is_none());
        c.hide_error();
        c.fire_timers(now + Duration::from_secs(60));
        assert_eq!(c.visible_error(), Some(message.as_str()));
        assert!(c.next_deadline().is_none());
    }

    #[test]
    fn config_read_failure_disables_search() {
        let err = ConfigError::Read(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let c = Controller::bootstrap(Err(err));
        assert!(!c.is_interactive());
        assert!(c.visible_error().is_some());
    }

    #[test]
    fn valid_config_bootstraps() {
        let config = Config {
            api_key: Some("abc123".to_string()),
            base_url: "http://127.0.0.1:3000/".to_string(),
            ..Config::default()
        };
        let mut c = Controller::bootstrap(Ok(config));
        assert!(c.is_interactive());
        assert!(c.visible_error().is_none());
        let command = type_and_submit(&mut c, "batman", Instant::now());
        assert_eq!(
            command.request().unwrap().url,
            "http://127.0.0.1:3000/?s=batman&apikey=abc123"
        );
    }

    #[tokio::test]
    async fn dispatch_runs_one_request_per_search() {
        let transport = FakeTransport {
            calls: RefCell::new(Vec::new()),
            body: BATMAN_SEARCH,
        };
        let mut c = controller();
        let now = Instant::now();

        c.dispatch(Event::InputChanged("batman".to_string()), &transport, now)
            .await;
        c.dispatch(Event::InputKeyPressed(Key::Enter), &transport, now)
            .await;
        c.dispatch(Event::InputChanged("b".to_string()), &transport, now)
            .await;
        c.dispatch(Event::InputKeyPressed(Key::Enter), &transport, now)
            .await;

        assert_eq!(
            *transport.calls.borrow(),
            vec!["https://www.omdbapi.com/?s=batman&apikey=k3y".to_string()]
        );
        assert_eq!(c.page().stats, "Found 1 result for \"batman\"");
        assert_eq!(c.visible_error(), Some("Please enter at least 2 characters"));
    }
}
