//! Parallel discovery over a remote enumeration interface.
//!
//! A source lists opaque entries and can classify each one with a
//! separate remote call. [`discover`] lists once, classifies every entry
//! concurrently and keeps the entries whose class matches the target.
//!
//! Classifications are joined back to entries through a map keyed by
//! entry, so the result does not depend on the order in which the
//! concurrent calls complete.

use async_trait::async_trait;
use futures::future::try_join_all;
use log::debug;
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::time::Duration;

use crate::Result;
use crate::api::models::SetupError;
use crate::util::timeout::with_timeout;

/// A remote collection whose entries can be classified one by one.
#[async_trait]
pub trait EntrySource: Sync {
    /// Opaque reference to one remote object.
    type Entry: Clone + Eq + Hash + Display + Send + Sync;
    /// Service-defined category of an entry.
    type Class: PartialEq + Send;

    /// Name of the enumeration call, used in timeout errors.
    const LIST_OPERATION: &'static str = "list entries";
    /// Name of the classification call, used in timeout errors.
    const CLASSIFY_OPERATION: &'static str = "classify entry";

    /// Enumerates every entry, in the order the service reports them.
    async fn list_entries(&self) -> Result<Vec<Self::Entry>>;

    /// Fetches the class of a single entry.
    async fn classify_entry(&self, entry: &Self::Entry) -> Result<Self::Class>;
}

/// Returns the entries of `source` whose class equals `target`.
///
/// Issues one enumeration call, then one classification call per entry,
/// all in flight at once. Every call is bounded by `call_timeout`.
///
/// The result keeps enumeration order and may be empty. An empty
/// enumeration returns immediately without classifying anything.
///
/// # Errors
///
/// - the enumeration error as-is, if listing fails
/// - `SetupError::Classification` naming the entry, on the first
///   classification failure; the remaining calls are dropped
pub async fn discover<S>(
    source: &S,
    target: &S::Class,
    call_timeout: Duration,
) -> Result<Vec<S::Entry>>
where
    S: EntrySource,
{
    let entries = with_timeout(S::LIST_OPERATION, call_timeout, source.list_entries()).await?;
    debug!("Enumerated {} entries", entries.len());

    if entries.is_empty() {
        return Ok(Vec::new());
    }

    let lookups = entries.iter().map(|entry| async move {
        let class = with_timeout(
            S::CLASSIFY_OPERATION,
            call_timeout,
            source.classify_entry(entry),
        )
        .await
        .map_err(|e| SetupError::Classification {
            entry: entry.to_string(),
            source: Box::new(e),
        })?;
        Ok::<_, SetupError>((entry.clone(), class))
    });

    let classes: HashMap<S::Entry, S::Class> = try_join_all(lookups).await?.into_iter().collect();

    let matches: Vec<S::Entry> = entries
        .into_iter()
        .filter(|entry| classes.get(entry) == Some(target))
        .collect();

    debug!("{} of {} entries matched", matches.len(), classes.len());
    Ok(matches)
}
