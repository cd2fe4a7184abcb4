//! View-state shared by every resource hook.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use crate::error::{ApiError, ApiResult};
use crate::models::Identified;

/// What a view renders for one resource: the list, whether a call is
/// outstanding, and the message of the last failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

impl<T> ResourceState<T> {
    /// Fetched, not loading, and nothing came back.
    pub fn is_empty(&self) -> bool {
        !self.loading && self.error.is_none() && self.items.is_empty()
    }
}

/// Sequence number handed out by [`Resource::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug)]
struct Shared<T> {
    state: ResourceState<T>,
    issued: u64,
    /// Most recently issued list fetch.
    latest_fetch: u64,
    outstanding: BTreeSet<u64>,
    detached: bool,
    /// Tickets at or below this were issued before the last detach.
    floor: u64,
}

impl<T> Shared<T> {
    fn ignores(&self, ticket: Ticket) -> bool {
        self.detached || ticket.0 <= self.floor
    }

    fn settle(&mut self, ticket: Ticket) {
        self.outstanding.remove(&ticket.0);
        self.state.loading = !self.outstanding.is_empty();
    }
}

/// Loading/error bookkeeping plus list splicing for one resource.
///
/// A list fetch applies only when it is the most recently issued fetch, so an
/// older response resolving late cannot overwrite a newer one. `loading`
/// stays on while any call is outstanding. Once
/// [`detach`](Resource::detach)ed, results are handed back to the caller but
/// no longer recorded.
#[derive(Debug)]
pub struct Resource<T> {
    shared: Arc<Mutex<Shared<T>>>,
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                state: ResourceState::default(),
                issued: 0,
                latest_fetch: 0,
                outstanding: BTreeSet::new(),
                detached: false,
                floor: 0,
            })),
        }
    }
}

impl<T: Identified + Clone> Resource<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> ResourceState<T> {
        self.with(|shared| shared.state.clone())
    }

    /// Mark a call as started: `loading` on, `error` cleared.
    pub fn begin(&self) -> Ticket {
        self.start(false)
    }

    /// Like [`begin`](Resource::begin), for a call whose result replaces the
    /// whole list.
    pub fn begin_fetch(&self) -> Ticket {
        self.start(true)
    }

    fn start(&self, fetch: bool) -> Ticket {
        self.with(|shared| {
            shared.issued += 1;
            if fetch {
                shared.latest_fetch = shared.issued;
            }
            if !shared.detached {
                shared.outstanding.insert(shared.issued);
                shared.state.loading = true;
                shared.state.error = None;
            }
            Ticket(shared.issued)
        })
    }

    /// Stop recording results; the owning view went away.
    pub fn detach(&self) {
        self.with(|shared| {
            shared.detached = true;
            shared.floor = shared.issued;
            shared.outstanding.clear();
            shared.state.loading = false;
        })
    }

    /// Forget fetched items and the last error.
    pub fn clear(&self) {
        self.with(|shared| {
            shared.state.items.clear();
            shared.state.error = None;
        })
    }

    /// Resume recording results for a view that came back.
    pub fn attach(&self) {
        self.with(|shared| shared.detached = false)
    }

    pub fn is_detached(&self) -> bool {
        self.with(|shared| shared.detached)
    }

    /// Replace the list with the result of the fetch `ticket` was issued for.
    pub fn finish_list(&self, ticket: Ticket, result: ApiResult<Vec<T>>) -> ApiResult<Vec<T>> {
        self.with(|shared| {
            if shared.ignores(ticket) {
                return;
            }
            shared.settle(ticket);
            if ticket.0 != shared.latest_fetch {
                tracing::debug!(ticket = ticket.0, "Discarding superseded list result");
                return;
            }
            match &result {
                Ok(items) => shared.state.items = items.clone(),
                Err(e) => shared.state.error = Some(e.user_message()),
            }
        });
        result
    }

    /// Append a record the server created.
    pub fn finish_insert(&self, ticket: Ticket, result: ApiResult<T>) -> ApiResult<T> {
        self.finish_mutation(ticket, result, |items, record| items.push(record.clone()))
    }

    /// Swap in the server's copy of an updated record.
    pub fn finish_replace(&self, ticket: Ticket, result: ApiResult<T>) -> ApiResult<T> {
        self.finish_mutation(ticket, result, |items, record| {
            if let Some(slot) = items.iter_mut().find(|item| item.id() == record.id()) {
                *slot = record.clone();
            }
        })
    }

    /// Drop `id` once the server has confirmed the delete.
    pub fn finish_remove(&self, ticket: Ticket, id: i64, result: ApiResult<()>) -> ApiResult<()> {
        self.finish_mutation(ticket, result, |items, _| items.retain(|item| item.id() != id))
    }

    /// Record the outcome of a call that does not touch the list.
    pub fn finish<R>(&self, ticket: Ticket, result: ApiResult<R>) -> ApiResult<R> {
        self.finish_mutation(ticket, result, |_, _| {})
    }

    fn finish_mutation<R>(
        &self,
        ticket: Ticket,
        result: ApiResult<R>,
        apply: impl FnOnce(&mut Vec<T>, &R),
    ) -> ApiResult<R> {
        self.with(|shared| {
            if shared.ignores(ticket) {
                return;
            }
            shared.settle(ticket);
            match &result {
                Ok(value) => apply(&mut shared.state.items, value),
                Err(e) => shared.state.error = Some(e.user_message()),
            }
        });
        result
    }

    /// Record a failure that happened before any request, such as a local
    /// validation error.
    pub fn fail<R>(&self, error: ApiError) -> ApiResult<R> {
        let ticket = self.begin();
        self.finish(ticket, Err(error))
    }

    fn with<R>(&self, f: impl FnOnce(&mut Shared<T>) -> R) -> R {
        let mut shared = self.shared.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut shared)
    }
}
