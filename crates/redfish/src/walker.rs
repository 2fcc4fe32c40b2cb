//! Collection resource traversal.
//!
//! A Redfish collection names its members by address; each member is a
//! separate fetch. The walker fetches the collection envelope, then every
//! member, and yields normalized records in collection order; the order is
//! observable (boot order, firmware lists) and must be reproducible.
//! Member fetches run concurrently up to a fixed width; `buffered`
//! reassembles results in input order, so the ordering guarantee survives
//! the fan-out. Any member failure fails the whole walk: no partial
//! results. Every call re-fetches; nothing is cached.

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, warn};

use crate::error::RedfishError;
use crate::model::{decode_json, Collection, CollectionEnvelope, NormalizedRecord};
use crate::transport::Transport;

/// Upper bound on concurrent member fetches.
const WALK_CONCURRENCY: usize = 8;

/// Fetch and decode a collection resource.
///
/// A declared count that disagrees with the member list is tolerated (the
/// list wins) but logged.
///
/// # Errors
/// Transport errors, status classification errors, and `Decode` when the
/// resource is not a collection.
pub async fn fetch_envelope(
    transport: &Transport,
    path: &str,
) -> Result<CollectionEnvelope, RedfishError> {
    let body = transport.get(path).await?.into_body()?;
    let collection: Collection = decode_json(path, &body)?;
    let envelope = CollectionEnvelope::from(collection);

    if let Some(count) = envelope.declared_count {
        if count != envelope.members.len() {
            warn!(
                path = %path,
                declared = count,
                actual = envelope.members.len(),
                "collection count disagrees with member list"
            );
        }
    }
    debug!(path = %path, members = envelope.members.len(), "collection fetched");

    Ok(envelope)
}

/// Fetch and decode an explicit list of member addresses, preserving the
/// list order in the output.
///
/// # Errors
/// The first member failure (transport, status, or decode) fails the whole
/// walk.
pub async fn walk_refs<F>(
    transport: &Transport,
    members: Vec<String>,
    decode: F,
) -> Result<Vec<NormalizedRecord>, RedfishError>
where
    F: Fn(&str, &[u8]) -> Result<NormalizedRecord, RedfishError>,
{
    let decode = &decode;
    stream::iter(members)
        .map(|member| async move {
            let body = transport.get(&member).await?.into_body()?;
            decode(&member, &body)
        })
        .buffered(WALK_CONCURRENCY)
        .try_collect()
        .await
}

/// Walk a collection: fetch the envelope, then every member.
///
/// # Errors
/// Envelope errors, or the first member failure.
pub async fn walk<F>(
    transport: &Transport,
    collection_path: &str,
    decode: F,
) -> Result<Vec<NormalizedRecord>, RedfishError>
where
    F: Fn(&str, &[u8]) -> Result<NormalizedRecord, RedfishError>,
{
    let envelope = fetch_envelope(transport, collection_path).await?;
    walk_refs(transport, envelope.members, decode).await
}

/// Walk a collection, dropping member addresses the predicate rejects.
///
/// The predicate is pure and runs before any member fetch, so rejected
/// members are never requested.
///
/// # Errors
/// Envelope errors, or the first failure among the kept members.
pub async fn walk_filtered<P, F>(
    transport: &Transport,
    collection_path: &str,
    keep: P,
    decode: F,
) -> Result<Vec<NormalizedRecord>, RedfishError>
where
    P: Fn(&str) -> bool,
    F: Fn(&str, &[u8]) -> Result<NormalizedRecord, RedfishError>,
{
    let envelope = fetch_envelope(transport, collection_path).await?;
    let members = envelope
        .members
        .into_iter()
        .filter(|member| keep(member))
        .collect();
    walk_refs(transport, members, decode).await
}
