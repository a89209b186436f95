//! Narrow interfaces to the bookmark API
//!
//! The core never talks to the network. Search surfaces produce
//! [`SearchRequest`] values; integrations run them through the collaborator
//! traits below and push the results to a [`ResultSink`].
//!
//! # Core Traits
//!
//! - **`SearchService`** - one entry point per search mode
//! - **`DefaultResultService`** - the unfiltered bookmark list
//! - **`TagResolver`** - tag titles to persisted tags (bookmark form only)
//! - **`ResultSink`** - receives "replace displayed results" events
//!
//! Requests may overlap. Wrap the sink in [`LatestResults`] to drop results
//! that arrive after a newer request was issued.

pub mod error;

pub use error::ServiceError;

use crate::models::{Bookmark, Tag};
use crate::reconcile::{SearchQuery, SearchRequest};
use tracing::{debug, warn};

/// Search entry points, one per mode
pub trait SearchService {
    /// Bookmarks whose title matches any of `keywords`
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the call fails.
    fn search_by_title(&self, keywords: &[&str]) -> Result<Vec<Bookmark>, ServiceError>;

    /// Bookmarks whose content matches `text`
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the call fails.
    fn search_by_text(&self, text: &str) -> Result<Vec<Bookmark>, ServiceError>;

    /// Bookmarks carrying the given tags
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the call fails.
    fn search_by_tags(&self, tags: &[String]) -> Result<Vec<Bookmark>, ServiceError>;
}

/// Source of the unfiltered result set
pub trait DefaultResultService {
    /// # Errors
    ///
    /// Returns `ServiceError` if the call fails.
    fn all_bookmarks(&self) -> Result<Vec<Bookmark>, ServiceError>;
}

/// Resolves tag titles to persisted tags, creating missing ones
pub trait TagResolver {
    /// Tags for `titles`, in the same order
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the call fails.
    fn resolve_tags(&self, titles: &[String]) -> Result<Vec<Tag>, ServiceError>;
}

/// Replacement of the displayed result list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEvent {
    /// Generation of the request that produced these results
    pub generation: u64,
    pub bookmarks: Vec<Bookmark>,
}

/// Receiver of result events
pub trait ResultSink {
    fn replace_results(&mut self, event: ResultEvent);
}

impl<F> ResultSink for F
where
    F: FnMut(ResultEvent),
{
    fn replace_results(&mut self, event: ResultEvent) {
        self(event);
    }
}

/// Runs search requests against the collaborators
///
/// Every mode forwards its results to the sink, full-text search included.
pub struct Dispatcher<'a, S, D> {
    search: &'a S,
    defaults: &'a D,
}

impl<'a, S, D> Dispatcher<'a, S, D>
where
    S: SearchService,
    D: DefaultResultService,
{
    #[must_use]
    pub const fn new(search: &'a S, defaults: &'a D) -> Self {
        Self { search, defaults }
    }

    /// Fetch results for `request`
    ///
    /// A tag query without tags matches nothing and is not sent.
    ///
    /// # Errors
    ///
    /// Returns the collaborator's `ServiceError` unchanged.
    pub fn fetch(&self, request: &SearchRequest) -> Result<Vec<Bookmark>, ServiceError> {
        match &request.query {
            SearchQuery::Default => self.defaults.all_bookmarks(),
            SearchQuery::Title(_) => self.search.search_by_title(&request.query.keywords()),
            SearchQuery::Text(text) => self.search.search_by_text(text),
            SearchQuery::Tags(tags) if tags.is_empty() => Ok(Vec::new()),
            SearchQuery::Tags(tags) => self.search.search_by_tags(tags),
        }
    }

    /// Fetch results for `request` and emit them to `sink`
    ///
    /// Returns the number of results emitted. On failure nothing is emitted.
    ///
    /// # Errors
    ///
    /// Returns the collaborator's `ServiceError` unchanged.
    pub fn dispatch<K: ResultSink + ?Sized>(
        &self,
        request: &SearchRequest,
        sink: &mut K,
    ) -> Result<usize, ServiceError> {
        let bookmarks = self.fetch(request).inspect_err(|e| {
            warn!(generation = request.generation, error = %e, "search failed");
        })?;
        let count = bookmarks.len();
        debug!(generation = request.generation, count, "search results ready");
        sink.replace_results(ResultEvent {
            generation: request.generation,
            bookmarks,
        });
        Ok(count)
    }
}

/// Sink wrapper that only lets the newest generation through
///
/// Call [`issued`](Self::issued) for every request as it is sent; results
/// for older generations are dropped when they arrive.
#[derive(Debug)]
pub struct LatestResults<K> {
    inner: K,
    latest: u64,
}

impl<K: ResultSink> LatestResults<K> {
    #[must_use]
    pub const fn new(inner: K) -> Self {
        Self { inner, latest: 0 }
    }

    /// Record that `request` was sent
    pub fn issued(&mut self, request: &SearchRequest) {
        self.latest = self.latest.max(request.generation);
    }

    /// Newest generation issued or applied
    #[must_use]
    pub const fn latest(&self) -> u64 {
        self.latest
    }

    #[must_use]
    pub const fn inner(&self) -> &K {
        &self.inner
    }

    #[must_use]
    pub fn into_inner(self) -> K {
        self.inner
    }
}

impl<K: ResultSink> ResultSink for LatestResults<K> {
    fn replace_results(&mut self, event: ResultEvent) {
        if event.generation < self.latest {
            debug!(
                generation = event.generation,
                latest = self.latest,
                "dropping stale results"
            );
            return;
        }
        self.latest = event.generation;
        self.inner.replace_results(event);
    }
}
