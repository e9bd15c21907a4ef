//! State of one list view: records, filters, search, sort and window
//!
//! Wire field names are translated here and nowhere else; the store,
//! filters and export see internal names only.

use super::api::{ApiError, RecordApi};
use super::export::{export_csv, CsvExport, ExportError};
use super::filter::{compose, CompositeFilter};
use super::list_view::{sort_records, view, SortKey, VisibleWindow, DEFAULT_VISIBLE_COUNT};
use super::normalize::normalize;
use super::store::{CommitAction, CommitOutcome, MutationRequest, RecordStore, StoreError};
use contracts::domain::common::Resource;
use contracts::shared::filter::{FieldFilter, FilterState};
use contracts::shared::record::{Record, RecordId};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Column total over the filtered records
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnTotal {
    pub field: &'static str,
    pub sum: f64,
}

pub struct ListController<R: Resource, A: RecordApi> {
    api: A,
    store: RecordStore<R>,
    filters: FilterState,
    search: String,
    sort: SortKey,
    window: VisibleWindow,
    page_step: usize,
}

impl<R: Resource, A: RecordApi> ListController<R, A> {
    pub fn new(api: A, page_step: usize) -> Self {
        Self {
            api,
            store: RecordStore::new(),
            filters: FilterState::new(),
            search: String::new(),
            sort: SortKey::default(),
            window: VisibleWindow::new(DEFAULT_VISIBLE_COUNT, page_step),
            page_step,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &RecordStore<R> {
        &self.store
    }

    // ============================================================================
    // Loading
    // ============================================================================

    /// Fetch the whole collection and replace the local copy
    pub async fn load(&mut self) -> Result<usize, ControllerError> {
        let envelope = self.api.fetch_all(R::endpoint()).await?;
        if let Some(total) = envelope.total() {
            debug!(collection = R::collection_name(), total, "server reports total");
        }
        let mapping = R::mapping();
        let records: Vec<Record> = envelope
            .into_records()
            .iter()
            .map(|r| mapping.from_wire(r))
            .collect();
        let count = records.len();
        self.store.replace_all(records);
        self.reset_window();
        Ok(count)
    }

    // ============================================================================
    // Filters, search and sort
    // ============================================================================

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn set_filter(&mut self, field: impl Into<String>, filter: FieldFilter) {
        self.filters.set(field, filter);
        self.reset_window();
    }

    /// Replace the whole filter state, e.g. a restored one
    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
        self.reset_window();
    }

    pub fn clear_filter(&mut self, field: &str) {
        self.filters.clear_field(field);
        self.reset_window();
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.search.clear();
        self.reset_window();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
        self.reset_window();
    }

    pub fn sort_key(&self) -> &SortKey {
        &self.sort
    }

    pub fn set_sort(&mut self, key: SortKey) {
        self.sort = key;
    }

    pub fn toggle_sort(&mut self, field: &str) {
        self.sort.toggle(field);
        debug!(field = %self.sort.field, ascending = self.sort.ascending, "sort changed");
    }

    fn reset_window(&mut self) {
        self.window = VisibleWindow::new(DEFAULT_VISIBLE_COUNT, self.page_step);
    }

    fn composite(&self) -> CompositeFilter {
        compose(&self.filters, R::fields()).with_search(&self.search, R::fields())
    }

    // ============================================================================
    // Projections
    // ============================================================================

    /// Records passing every filter, in store order
    pub fn filtered(&self) -> Vec<&Record> {
        self.composite().apply(self.store.records())
    }

    /// Filtered, sorted records in full
    pub fn sorted(&self) -> Vec<&Record> {
        sort_records(&self.filtered(), &self.sort, R::fields())
    }

    /// The bounded slice shown to the user
    pub fn visible(&self) -> Vec<&Record> {
        view(&self.filtered(), &self.sort, R::fields(), &self.window)
    }

    pub fn window(&self) -> &VisibleWindow {
        &self.window
    }

    pub fn has_more(&self) -> bool {
        self.window.has_more(self.filtered().len())
    }

    pub fn load_more(&mut self) {
        self.window.load_more();
    }

    /// Sums of the summable columns over the filtered records; values
    /// that do not parse are skipped
    pub fn totals(&self) -> Vec<ColumnTotal> {
        let filtered = self.filtered();
        R::fields()
            .iter()
            .filter(|f| f.kind.is_summable())
            .map(|f| ColumnTotal {
                field: f.name,
                sum: filtered
                    .iter()
                    .map(|r| normalize(r, f).as_number())
                    .filter(|v| !v.is_nan())
                    .sum(),
            })
            .collect()
    }

    // ============================================================================
    // Editing
    // ============================================================================

    pub fn add_draft(&mut self) -> RecordId {
        self.store.add_draft()
    }

    pub fn begin_edit(&mut self, id: &RecordId) -> Result<(), ControllerError> {
        Ok(self.store.begin_edit(id)?)
    }

    pub fn set_field(&mut self, id: &RecordId, field: &str, value: Value) -> Result<(), ControllerError> {
        Ok(self.store.set_field(id, field, value)?)
    }

    pub fn discard_edit(&mut self, id: &RecordId) -> Result<(), ControllerError> {
        Ok(self.store.discard_edit(id)?)
    }

    pub fn commit(&mut self, id: &RecordId, action: CommitAction) -> Result<CommitOutcome, ControllerError> {
        Ok(self.store.commit(id, action)?)
    }

    pub fn cancel_pending(&mut self) -> Result<RecordId, ControllerError> {
        Ok(self.store.cancel_pending()?)
    }

    /// Issue the confirmed change and reconcile with the server's answer.
    /// On failure the edits stay in place and the record is `SaveFailed`
    /// until it is edited again or saved.
    pub async fn confirm_pending(&mut self) -> Result<RecordId, ControllerError> {
        let request = self.store.confirm()?;
        let mapping = R::mapping();
        let endpoint = R::endpoint();

        let result = match &request {
            MutationRequest::Create { payload, .. } => self
                .api
                .create(endpoint, &mapping.to_wire(payload))
                .await
                .map(Some),
            MutationRequest::Update { id, payload } => self
                .api
                .update(endpoint, id, &mapping.to_wire(payload))
                .await
                .map(Some),
            MutationRequest::Delete { id } => self.api.delete(endpoint, id).await.map(|_| None),
        };

        match result {
            Ok(server) => {
                let server = server.map(|r| mapping.from_wire(&r));
                Ok(self.store.resolve_success(server)?)
            }
            Err(e) => {
                self.store.resolve_failure(e.to_string())?;
                Err(e.into())
            }
        }
    }

    // ============================================================================
    // Export
    // ============================================================================

    /// CSV of the filtered records in the current sort order
    pub fn export_csv(&self) -> Result<CsvExport, ControllerError> {
        let records = self.sorted();
        Ok(export_csv(&records, &R::export_filename())?)
    }
}
