use std::{sync::Arc, time::Duration};

use tokio::sync::{mpsc, oneshot, watch};

use crate::{
    engines::ProductSearch,
    error::SearchError,
    models::SearchResultItem,
    routing::{Navigator, Route},
};

pub(crate) mod debounce;
pub mod dropdown;

use debounce::Debouncer;
pub use dropdown::{Dropdown, DropdownEvent};

#[derive(Clone, Debug)]
pub struct SearchBoxSettings {
    /// Quiet period before a query is looked up
    pub debounce: Duration,
    /// Delay between losing focus and closing the dropdown
    pub blur_grace: Duration,
    /// Page size sent with every lookup
    pub limit: usize,
}

impl Default for SearchBoxSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(350),
            blur_grace: Duration::from_millis(200),
            limit: 8,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub query: String,
    pub loading: bool,
    pub results: Vec<SearchResultItem>,
    pub dropdown: Dropdown,
    pub last_error: Option<String>,
}

impl Snapshot {
    pub fn is_visible(&self) -> bool {
        self.dropdown.is_visible(self.results.len())
    }
}

#[derive(Debug)]
enum Event {
    Input(String),
    Focus,
    Blur,
    PointerDown,
    Select(usize),
}

struct Command {
    event: Event,
    ack: oneshot::Sender<()>,
}

struct Completion {
    generation: u64,
    query: String,
    result: Result<Vec<SearchResultItem>, SearchError>,
}

/// Owns all search box state; runs as a single task fed by [`SearchBoxHandle`].
pub struct SearchBox {
    settings: SearchBoxSettings,
    engine: Arc<dyn ProductSearch>,
    navigator: Arc<dyn Navigator>,

    commands: mpsc::Receiver<Command>,
    completions_tx: mpsc::Sender<Completion>,
    completions: mpsc::Receiver<Completion>,

    debounce: Debouncer<String>,
    blur: Debouncer<()>,
    /// Latest issued lookup, completions from older ones are dropped
    generation: u64,

    state: Snapshot,
    publisher: watch::Sender<Snapshot>,
}

impl SearchBox {
    pub fn spawn(
        settings: SearchBoxSettings,
        engine: Arc<dyn ProductSearch>,
        navigator: Arc<dyn Navigator>,
    ) -> SearchBoxHandle {
        let (commands_tx, commands) = mpsc::channel(32);
        let (completions_tx, completions) = mpsc::channel(32);
        let (publisher, state) = watch::channel(Snapshot::default());

        let search_box = SearchBox {
            debounce: Debouncer::new(settings.debounce),
            blur: Debouncer::new(settings.blur_grace),
            settings,
            engine,
            navigator,
            commands,
            completions_tx,
            completions,
            generation: 0,
            state: Snapshot::default(),
            publisher,
        };

        tokio::spawn(search_box.run());

        SearchBoxHandle {
            commands: commands_tx,
            state,
        }
    }

    async fn run(mut self) {
        log::info!(
            "Search box started using {} (debounce {:?}, blur grace {:?}, limit {})",
            self.engine.name(),
            self.settings.debounce,
            self.settings.blur_grace,
            self.settings.limit
        );

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(Command { event, ack }) => {
                        self.handle(event);
                        self.publish();
                        let _ = ack.send(());
                    }
                    None => break,
                },
                query = self.debounce.fired() => {
                    self.issue(query);
                    self.publish();
                }
                () = self.blur.fired() => {
                    log::debug!("Blur grace elapsed");
                    self.transition(DropdownEvent::BlurElapsed);
                    self.publish();
                }
                Some(completion) = self.completions.recv() => {
                    self.complete(completion);
                    self.publish();
                }
            }
        }

        log::info!("Search box stopped");
    }

    fn handle(&mut self, event: Event) {
        log::debug!("Event {:?}", event);
        match event {
            Event::Input(query) => self.input(query),
            Event::Focus => {
                self.blur.cancel();
                let has_query = !self.state.query.is_empty();
                self.transition(DropdownEvent::Focused { has_query });
            }
            Event::Blur => {
                self.blur.schedule(());
            }
            Event::PointerDown => {
                // Restart the grace period so a following select lands first
                if self.blur.is_pending() {
                    log::debug!("Pointer down inside results, restarting blur grace");
                    self.blur.schedule(());
                }
            }
            Event::Select(index) => self.select(index),
        }
    }

    fn input(&mut self, query: String) {
        if query.is_empty() {
            if let Some(pending) = self.debounce.cancel() {
                log::debug!("Dropped pending lookup for {:?}", pending);
            }
            self.reset();
            self.transition(DropdownEvent::Cleared);
            return;
        }

        if self.debounce.is_pending() {
            log::debug!("Rescheduled lookup for {:?}", query);
        }
        self.state.query = query.clone();
        self.debounce.schedule(query);
    }

    fn issue(&mut self, query: String) {
        self.generation += 1;
        self.state.loading = true;

        let generation = self.generation;
        let limit = self.settings.limit;
        let engine = Arc::clone(&self.engine);
        let tx = self.completions_tx.clone();

        log::debug!("Issuing lookup #{} for {:?}", generation, query);
        tokio::spawn(async move {
            let result = engine.search(&query, limit).await;
            let _ = tx
                .send(Completion {
                    generation,
                    query,
                    result,
                })
                .await;
        });
    }

    fn complete(&mut self, completion: Completion) {
        if completion.generation != self.generation {
            log::warn!(
                "Discarding stale results for {:?} (lookup #{}, latest #{})",
                completion.query,
                completion.generation,
                self.generation
            );
            return;
        }

        self.state.loading = false;
        match completion.result {
            Ok(items) => {
                log::info!("{} results for {:?}", items.len(), completion.query);
                self.state.results = items;
                self.state.last_error = None;
                self.transition(DropdownEvent::Resolved);
            }
            Err(e) => {
                log::error!("Search for {:?} failed: {}", completion.query, e);
                self.state.last_error = Some(e.to_string());
            }
        }
    }

    fn select(&mut self, index: usize) {
        if !self.state.is_visible() {
            log::warn!("Ignoring selection #{} while results are hidden", index);
            return;
        }

        let Some(item) = self.state.results.get(index) else {
            log::warn!(
                "Ignoring selection #{} of {} results",
                index,
                self.state.results.len()
            );
            return;
        };

        let route = Route::for_item(item);
        if !route.is_well_formed() {
            log::warn!("Unit {} has no parent course, route is malformed", item.id);
        }
        log::info!("Selected {:?} -> {}", item.title, route);
        self.navigator.navigate(&route);

        self.blur.cancel();
        self.debounce.cancel();
        self.reset();
        self.transition(DropdownEvent::Selected);
    }

    /// Clears the query and results, and invalidates any lookup in flight.
    fn reset(&mut self) {
        self.generation += 1;
        self.state.query.clear();
        self.state.results.clear();
        self.state.loading = false;
    }

    fn transition(&mut self, event: DropdownEvent) {
        self.state.dropdown = self.state.dropdown.on(event);
    }

    fn publish(&self) {
        let state = &self.state;
        self.publisher.send_if_modified(|current| {
            if current != state {
                *current = state.clone();
                true
            } else {
                false
            }
        });
    }
}

/// Cloneable front of a running [`SearchBox`]. Every event call returns once
/// the search box has applied it. The task stops when all handles are gone.
#[derive(Clone)]
pub struct SearchBoxHandle {
    commands: mpsc::Sender<Command>,
    state: watch::Receiver<Snapshot>,
}

impl SearchBoxHandle {
    /// Sets the full input value.
    pub async fn input(&self, query: impl Into<String>) -> Result<(), SearchError> {
        self.send(Event::Input(query.into())).await
    }

    pub async fn focus(&self) -> Result<(), SearchError> {
        self.send(Event::Focus).await
    }

    pub async fn blur(&self) -> Result<(), SearchError> {
        self.send(Event::Blur).await
    }

    pub async fn pointer_down(&self) -> Result<(), SearchError> {
        self.send(Event::PointerDown).await
    }

    pub async fn select(&self, index: usize) -> Result<(), SearchError> {
        self.send(Event::Select(index)).await
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.state.clone()
    }

    async fn send(&self, event: Event) -> Result<(), SearchError> {
        let (ack, applied) = oneshot::channel();
        self.commands
            .send(Command { event, ack })
            .await
            .map_err(|_| SearchError::Closed)?;
        applied.await.map_err(|_| SearchError::Closed)
    }
}
