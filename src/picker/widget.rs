//! Classification picker: the caller-facing widget.
//!
//! Lifecycle mirrors a modal dialog:
//!
//! ```text
//! Closed ──open(selected)──► Open(session) ──confirm()──► Closed  (on_select called)
//!                                          └──cancel()───► Closed  (nothing called)
//! ```

use std::sync::Arc;

use ipms_types::{
    ExpandKey, NiceGroup, TaxonomyEntry, TaxonomyKind, NICE_GROUP_MAX, NICE_GROUP_MIN,
};
use taxonomy_client::TaxonomySource;

use super::session::PickerSession;
use crate::config::PickerConfig;
use crate::error::PickerError;

/// Receives the confirmed selection.
pub type OnSelect = Box<dyn FnMut(Vec<TaxonomyEntry>) + Send>;

pub struct ClassificationPicker {
    kind: TaxonomyKind,
    source: Arc<dyn TaxonomySource>,
    config: PickerConfig,
    on_select: OnSelect,
    session: Option<PickerSession>,
}

impl ClassificationPicker {
    pub fn new(
        kind: TaxonomyKind,
        source: Arc<dyn TaxonomySource>,
        config: PickerConfig,
        on_select: OnSelect,
    ) -> Self {
        Self {
            kind,
            source,
            config,
            on_select,
            session: None,
        }
    }

    pub fn kind(&self) -> TaxonomyKind {
        self.kind
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Open with a fresh session seeded from `already_selected`.
    ///
    /// Returns without waiting on the gateway. Nice pickers start a group
    /// list reload that lands through `process_pending`; a failed reload is
    /// logged and leaves the list empty. Opening an open picker starts over.
    /// Must be called from within a tokio runtime.
    pub fn open(&mut self, already_selected: &[TaxonomyEntry]) {
        let mut session = PickerSession::new(
            self.kind,
            Arc::clone(&self.source),
            self.config.debounce,
            already_selected,
        );
        if self.kind == TaxonomyKind::Nice {
            session.load_nice_groups();
        }
        self.session = Some(session);
    }

    /// Nice groups of the open session; empty while closed or still loading.
    pub fn nice_groups(&self) -> &[NiceGroup] {
        match &self.session {
            Some(session) => session.nice_groups(),
            None => &[],
        }
    }

    /// Options for the group selector: `(n, "Group n")` for 1-45.
    pub fn group_options(&self) -> Vec<(u32, String)> {
        if !self.kind.supports_group_filter() {
            return Vec::new();
        }
        (NICE_GROUP_MIN..=NICE_GROUP_MAX)
            .map(|n| (n, format!("Group {n}")))
            .collect()
    }

    pub fn session(&self) -> Result<&PickerSession, PickerError> {
        self.session.as_ref().ok_or(PickerError::NotOpen)
    }

    fn session_mut(&mut self) -> Result<&mut PickerSession, PickerError> {
        self.session.as_mut().ok_or(PickerError::NotOpen)
    }

    // ── Session operations ──

    pub fn set_group(&mut self, group: Option<u32>) -> Result<(), PickerError> {
        self.session_mut()?.set_group(group)
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> Result<(), PickerError> {
        self.session_mut()?.set_text(text);
        Ok(())
    }

    pub fn toggle_entry(&mut self, id: &str) -> Result<bool, PickerError> {
        self.session_mut()?.toggle_entry(id)
    }

    pub fn toggle_expand(&mut self, key: ExpandKey) -> Result<bool, PickerError> {
        Ok(self.session_mut()?.toggle_expand(key))
    }

    pub fn clear(&mut self) -> Result<(), PickerError> {
        self.session_mut()?.clear();
        Ok(())
    }

    /// Apply arrived query results; call once per UI frame.
    pub fn process_pending(&mut self) -> Result<usize, PickerError> {
        Ok(self.session_mut()?.process_pending())
    }

    pub async fn settle(&mut self) -> Result<(), PickerError> {
        self.session_mut()?.settle().await;
        Ok(())
    }

    // ── Termination ──

    /// Hand the selection to `on_select` and close. Also returns it.
    pub fn confirm(&mut self) -> Result<Vec<TaxonomyEntry>, PickerError> {
        let session = self.session.take().ok_or(PickerError::NotOpen)?;
        let selection = session.into_selection();
        tracing::info!(kind = %self.kind, selected = selection.len(), "Picker confirmed");
        (self.on_select)(selection.clone());
        Ok(selection)
    }

    /// Close without calling `on_select`; the session selection is dropped.
    pub fn cancel(&mut self) -> Result<(), PickerError> {
        self.session.take().ok_or(PickerError::NotOpen)?;
        tracing::debug!(kind = %self.kind, "Picker cancelled");
        Ok(())
    }
}
