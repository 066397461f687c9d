//! Picker session: everything that lives between open and confirm/cancel.
//!
//! ```text
//!   edit ──► Debouncer ──(delay)──► source.search() ──► mpsc ──► process_pending()
//!                                                                   │
//!                     token == latest? ──no──► dropped              ▼
//!                                      └─yes─► results + tree + expand-all
//! ```
//!
//! Nice group titles load the same way: a spawned task posts `GroupsLoaded`
//! and nothing waits on it.
//!
//! The session is owned by one picker; dropping it aborts the pending query
//! and any group load still running.

use std::sync::Arc;
use std::time::Duration;

use ipms_types::{
    is_valid_nice_group, Classified, ExpandKey, NiceGroup, TaxonomyEntry, TaxonomyKind,
    TaxonomyQuery,
};
use taxonomy_client::{SourceError, TaxonomySource};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::debounce::Debouncer;
use super::expand::ExpandState;
use super::grouping::ResultTree;
use super::selection::SelectionSet;
use crate::error::PickerError;

/// Observable phase of an open picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerPhase {
    /// No query yet, or the last one produced nothing to show.
    Idle,
    /// A debounced query is in flight.
    Searching,
    /// Results are displayed.
    Results,
}

/// Filter values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryCriteria {
    pub group: Option<u32>,
    pub text: String,
}

impl QueryCriteria {
    pub fn to_query(&self, kind: TaxonomyKind) -> TaxonomyQuery {
        TaxonomyQuery::new(kind, self.group, Some(&self.text))
    }
}

#[derive(Debug)]
enum SessionEvent {
    QueryStarted {
        token: u64,
    },
    QueryFinished {
        token: u64,
        outcome: Result<Vec<TaxonomyEntry>, SourceError>,
    },
    GroupsLoaded(Result<Vec<NiceGroup>, SourceError>),
}

pub struct PickerSession {
    id: Uuid,
    kind: TaxonomyKind,
    source: Arc<dyn TaxonomySource>,
    criteria: QueryCriteria,
    results: Vec<TaxonomyEntry>,
    tree: ResultTree,
    expand: ExpandState,
    selection: SelectionSet,
    phase: PickerPhase,
    debouncer: Debouncer,
    latest_token: u64,
    queries_issued: u64,
    nice_groups: Vec<NiceGroup>,
    groups_task: Option<JoinHandle<()>>,
    groups_pending: bool,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
}

impl PickerSession {
    pub fn new(
        kind: TaxonomyKind,
        source: Arc<dyn TaxonomySource>,
        debounce: Duration,
        already_selected: &[TaxonomyEntry],
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let session = Self {
            id: Uuid::new_v4(),
            kind,
            source,
            criteria: QueryCriteria::default(),
            results: Vec::new(),
            tree: ResultTree::Empty,
            expand: ExpandState::new(),
            selection: SelectionSet::seeded(already_selected),
            phase: PickerPhase::Idle,
            debouncer: Debouncer::new(debounce),
            latest_token: 0,
            queries_issued: 0,
            nice_groups: Vec::new(),
            groups_task: None,
            groups_pending: false,
            events_tx,
            events_rx,
        };
        tracing::debug!(
            session = %session.id,
            kind = %kind,
            seeded = session.selection.len(),
            "Picker session opened"
        );
        session
    }

    // ── Accessors ──

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> TaxonomyKind {
        self.kind
    }

    pub fn phase(&self) -> PickerPhase {
        self.phase
    }

    pub fn criteria(&self) -> &QueryCriteria {
        &self.criteria
    }

    pub fn results(&self) -> &[TaxonomyEntry] {
        &self.results
    }

    pub fn tree(&self) -> &ResultTree {
        &self.tree
    }

    pub fn expand_state(&self) -> &ExpandState {
        &self.expand
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Queries that actually fired (after the debounce elapsed).
    pub fn queries_issued(&self) -> u64 {
        self.queries_issued
    }

    /// Nice groups from the last completed load; empty until it arrives.
    pub fn nice_groups(&self) -> &[NiceGroup] {
        &self.nice_groups
    }

    /// True from `load_nice_groups` until its result has been applied.
    pub fn groups_pending(&self) -> bool {
        self.groups_pending
    }

    pub fn into_selection(mut self) -> Vec<TaxonomyEntry> {
        std::mem::take(&mut self.selection).into_vec()
    }

    /// Start fetching the Nice group list in the background.
    ///
    /// Returns immediately; the result is applied by `process_pending` or
    /// `settle`. A failed load is logged and leaves the list empty.
    /// Must be called from within a tokio runtime.
    pub fn load_nice_groups(&mut self) {
        if let Some(previous) = self.groups_task.take() {
            previous.abort();
        }
        let source = Arc::clone(&self.source);
        let tx = self.events_tx.clone();
        self.groups_pending = true;
        self.groups_task = Some(tokio::spawn(async move {
            let outcome = source.list_nice_groups().await;
            let _ = tx.send(SessionEvent::GroupsLoaded(outcome));
        }));
    }

    // ── Filters ──

    /// Replace the Nice group filter; `None` removes it.
    pub fn set_group(&mut self, group: Option<u32>) -> Result<(), PickerError> {
        if !self.kind.supports_group_filter() {
            return Err(PickerError::GroupFilterUnsupported(self.kind));
        }
        if let Some(group) = group {
            if !is_valid_nice_group(group) {
                return Err(PickerError::InvalidGroup(group));
            }
        }
        self.criteria.group = group;
        self.schedule_query();
        Ok(())
    }

    /// Replace the free-text filter.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.criteria.text = text.into();
        self.schedule_query();
    }

    fn schedule_query(&mut self) {
        self.latest_token += 1;
        let token = self.latest_token;
        let query = self.criteria.to_query(self.kind);

        if query.is_unconstrained() {
            // Nothing to look for: never fetch the whole taxonomy
            self.debouncer.cancel();
            self.clear_results();
            self.phase = PickerPhase::Idle;
            return;
        }

        let source = Arc::clone(&self.source);
        let tx = self.events_tx.clone();
        let session = self.id;
        self.debouncer.schedule(async move {
            tracing::debug!(session = %session, token, ?query, "Issuing taxonomy query");
            // Send failures mean the session is gone; nothing left to update
            let _ = tx.send(SessionEvent::QueryStarted { token });
            let outcome = source.search(&query).await;
            let _ = tx.send(SessionEvent::QueryFinished { token, outcome });
        });
    }

    // ── Completion handling ──

    /// Apply every query event that has arrived, without waiting.
    /// Returns the number of events applied.
    pub fn process_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Wait for the pending debounced query and group load (if any) to
    /// finish, then apply their events.
    pub async fn settle(&mut self) {
        self.debouncer.flush().await;
        if let Some(task) = self.groups_task.take() {
            let _ = task.await;
        }
        self.process_pending();
    }

    fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::QueryStarted { token } => {
                self.queries_issued += 1;
                if token == self.latest_token {
                    self.phase = PickerPhase::Searching;
                }
            }
            SessionEvent::QueryFinished { token, outcome } => {
                if token != self.latest_token {
                    tracing::debug!(
                        session = %self.id,
                        token,
                        latest = self.latest_token,
                        "Ignoring superseded query response"
                    );
                    return;
                }
                match outcome {
                    Ok(entries) if entries.is_empty() => {
                        self.clear_results();
                        self.phase = PickerPhase::Idle;
                    }
                    Ok(entries) => self.show_results(entries),
                    Err(err) => {
                        tracing::warn!(session = %self.id, error = %err, "Taxonomy query failed");
                        self.clear_results();
                        self.phase = PickerPhase::Idle;
                    }
                }
            }
            SessionEvent::GroupsLoaded(outcome) => {
                self.groups_pending = false;
                match outcome {
                    Ok(groups) => {
                        tracing::debug!(
                            session = %self.id,
                            groups = groups.len(),
                            "Nice groups loaded"
                        );
                        self.nice_groups = groups;
                    }
                    Err(err) => {
                        tracing::warn!(
                            session = %self.id,
                            error = %err,
                            "Failed to load Nice groups"
                        );
                        self.nice_groups.clear();
                    }
                }
            }
        }
    }

    fn show_results(&mut self, entries: Vec<TaxonomyEntry>) {
        self.tree = ResultTree::build(&entries);
        self.expand.reset_to(entries.iter().flat_map(|e| e.expand_keys()));
        tracing::debug!(
            session = %self.id,
            hits = entries.len(),
            expanded = self.expand.len(),
            "Taxonomy results applied"
        );
        self.results = entries;
        self.phase = PickerPhase::Results;
    }

    fn clear_results(&mut self) {
        self.results.clear();
        self.tree = ResultTree::Empty;
        self.expand.clear();
    }

    // ── Selection & presentation ──

    /// Toggle the entry with `id`, looking it up in the current results
    /// first and then in the selection itself.
    pub fn toggle_entry(&mut self, id: &str) -> Result<bool, PickerError> {
        let entry = self
            .results
            .iter()
            .find(|e| e.id() == id)
            .or_else(|| self.selection.get(id))
            .cloned()
            .ok_or_else(|| PickerError::UnknownEntry(id.to_string()))?;
        Ok(self.selection.toggle(&entry))
    }

    pub fn toggle_expand(&mut self, key: ExpandKey) -> bool {
        self.expand.toggle(key)
    }

    /// Reset filters, results, expand state and the selection.
    pub fn clear(&mut self) {
        self.debouncer.cancel();
        // Any response still in flight is now stale
        self.latest_token += 1;
        self.criteria = QueryCriteria::default();
        self.clear_results();
        self.selection.clear();
        self.phase = PickerPhase::Idle;
    }
}

impl Drop for PickerSession {
    fn drop(&mut self) {
        if let Some(task) = self.groups_task.take() {
            task.abort();
        }
        tracing::debug!(session = %self.id, "Picker session closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ipms_types::{NiceEntry, NiceGroup};
    use std::sync::Mutex;

    const DEBOUNCE: Duration = Duration::from_millis(500);

    #[derive(Default)]
    struct FakeSource {
        entries: Vec<TaxonomyEntry>,
        calls: Mutex<Vec<TaxonomyQuery>>,
        fail: bool,
    }

    #[async_trait]
    impl TaxonomySource for FakeSource {
        async fn list_nice_groups(&self) -> taxonomy_client::Result<Vec<NiceGroup>> {
            Ok(Vec::new())
        }

        async fn search(
            &self,
            query: &TaxonomyQuery,
        ) -> taxonomy_client::Result<Vec<TaxonomyEntry>> {
            self.calls.lock().unwrap().push(query.clone());
            if self.fail {
                return Err(SourceError::Status(500, "boom".into()));
            }
            let text = query.text.as_deref().unwrap_or("").to_lowercase();
            Ok(self
                .entries
                .iter()
                .filter(|e| {
                    query
                        .group
                        .map_or(true, |g| e.as_nice().map(|n| n.group) == Some(g))
                })
                .filter(|e| e.description().to_lowercase().contains(&text))
                .cloned()
                .collect())
        }
    }

    fn nice(id: &str, group: u32, description: &str) -> TaxonomyEntry {
        TaxonomyEntry::Nice(NiceEntry {
            id: id.to_string(),
            group,
            code: id.to_string(),
            description: description.to_string(),
            description_en: None,
        })
    }

    fn source() -> Arc<FakeSource> {
        Arc::new(FakeSource {
            entries: vec![
                nice("n1", 9, "software"),
                nice("n2", 9, "hardware"),
                nice("n3", 35, "advertising software"),
            ],
            ..Default::default()
        })
    }

    fn session(source: Arc<FakeSource>) -> PickerSession {
        PickerSession::new(TaxonomyKind::Nice, source, DEBOUNCE, &[])
    }

    #[tokio::test(start_paused = true)]
    async fn test_phase_progression() {
        let mut s = session(source());
        assert_eq!(s.phase(), PickerPhase::Idle);

        s.set_text("software");
        // Still inside the debounce window
        tokio::time::sleep(Duration::from_millis(100)).await;
        s.process_pending();
        assert_eq!(s.phase(), PickerPhase::Idle);

        s.settle().await;
        assert_eq!(s.phase(), PickerPhase::Results);
        assert_eq!(s.results().len(), 2);
        assert_eq!(s.queries_issued(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_is_ignored() {
        let src = source();
        let mut s = session(Arc::clone(&src));

        s.set_text("hardware");
        // Let the first query complete without applying its events
        tokio::time::sleep(DEBOUNCE * 2).await;
        assert_eq!(src.calls.lock().unwrap().len(), 1);

        s.set_text("advertising");
        s.process_pending();
        assert!(s.results().is_empty(), "superseded response must not be shown");

        s.settle().await;
        assert_eq!(s.results().len(), 1);
        assert_eq!(s.results()[0].id(), "n3");
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_discards_in_flight_results() {
        let src = source();
        let mut s = PickerSession::new(
            TaxonomyKind::Nice,
            src.clone(),
            DEBOUNCE,
            &[nice("n2", 9, "hardware")],
        );

        s.set_text("software");
        tokio::time::sleep(DEBOUNCE * 2).await;
        s.clear();
        s.process_pending();

        assert!(s.results().is_empty());
        assert!(s.expand_state().is_empty());
        assert!(s.selection().is_empty());
        assert_eq!(s.criteria(), &QueryCriteria::default());
        assert_eq!(s.phase(), PickerPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_clears_results_keeps_selection() {
        let mut s = session(source());
        s.set_text("software");
        s.settle().await;
        s.toggle_entry("n1").unwrap();

        let failing: Arc<dyn TaxonomySource> = Arc::new(FakeSource {
            fail: true,
            ..Default::default()
        });
        s.source = failing;
        s.set_text("softwar");
        s.settle().await;

        assert!(s.results().is_empty());
        assert!(s.tree().is_empty());
        assert_eq!(s.phase(), PickerPhase::Idle);
        assert_eq!(s.selection().ids(), vec!["n1"]);
        assert_eq!(s.criteria().text, "softwar");
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_result_resets_expand_not_selection() {
        let mut s = session(source());
        s.set_text("software");
        s.settle().await;
        s.toggle_entry("n3").unwrap();
        assert!(!s.expand_state().is_empty());

        s.set_text("no such thing");
        s.settle().await;
        assert!(s.results().is_empty());
        assert!(s.expand_state().is_empty());
        assert_eq!(s.selection().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_unknown_entry() {
        let mut s = session(source());
        assert_eq!(
            s.toggle_entry("missing"),
            Err(PickerError::UnknownEntry("missing".into()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_seeded_entry_can_be_removed_without_results() {
        let mut s = PickerSession::new(
            TaxonomyKind::Nice,
            source(),
            DEBOUNCE,
            &[nice("n9", 9, "seeded")],
        );
        assert_eq!(s.toggle_entry("n9"), Ok(false));
        assert!(s.selection().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_group_filter_validation() {
        let mut s = session(source());
        assert_eq!(s.set_group(Some(0)), Err(PickerError::InvalidGroup(0)));
        assert_eq!(s.set_group(Some(46)), Err(PickerError::InvalidGroup(46)));

        let mut v = PickerSession::new(TaxonomyKind::Vienna, source(), DEBOUNCE, &[]);
        assert_eq!(
            v.set_group(Some(1)),
            Err(PickerError::GroupFilterUnsupported(TaxonomyKind::Vienna))
        );
    }
}
