//! Time-bounded single-document primitives over a MongoDB collection.
//!
//! Every call runs under its own budget. When the budget elapses the driver
//! future is dropped and [`DocumentStoreError::Timeout`] is returned; no call
//! here ever waits indefinitely and none of them retry.

use std::future::Future;
use std::time::Duration;

use futures_util::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::{Bson, Document, doc};
use mongodb::error::ErrorKind;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::time::timeout;

/// Default per-call budget for document operations.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Failures surfaced by the document primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentStoreError {
    /// The call did not complete within its budget.
    #[error("{operation} exceeded its {budget:?} budget")]
    Timeout {
        operation: &'static str,
        budget: Duration,
    },

    /// `find_one` matched no document.
    #[error("no document matched the filter")]
    NotFound,

    /// A stored document could not be decoded into the target type.
    #[error("failed to decode document: {message}")]
    Decode { message: String },

    /// The store could not be reached.
    #[error("{operation} could not reach the store: {message}")]
    Unavailable {
        operation: &'static str,
        message: String,
    },

    /// Any other driver failure, such as a constraint violation.
    #[error("{operation} failed: {message}")]
    Driver {
        operation: &'static str,
        message: String,
    },
}

/// Counts reported by [`update_one`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateSummary {
    /// Documents matching the filter (0 or 1).
    pub matched_count: u64,
    /// Documents whose contents changed.
    pub modified_count: u64,
}

fn classify(operation: &'static str, error: &mongodb::error::Error) -> DocumentStoreError {
    match error.kind.as_ref() {
        ErrorKind::BsonDeserialization(inner) => DocumentStoreError::Decode {
            message: inner.to_string(),
        },
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::DnsResolve { .. } => DocumentStoreError::Unavailable {
            operation,
            message: error.to_string(),
        },
        _ => DocumentStoreError::Driver {
            operation,
            message: error.to_string(),
        },
    }
}

async fn bounded<T, F>(
    operation: &'static str,
    budget: Duration,
    call: F,
) -> Result<T, DocumentStoreError>
where
    F: Future<Output = mongodb::error::Result<T>>,
{
    match timeout(budget, call).await {
        Ok(result) => result.map_err(|error| classify(operation, &error)),
        Err(_) => Err(DocumentStoreError::Timeout { operation, budget }),
    }
}

/// Insert exactly one document and return the id the store recorded.
///
/// # Errors
///
/// Fails on constraint violations, connectivity loss, or timeout.
pub async fn insert_one<T>(
    collection: &Collection<T>,
    document: &T,
    budget: Duration,
) -> Result<Bson, DocumentStoreError>
where
    T: Serialize + Send + Sync,
{
    let result = bounded("insert_one", budget, async {
        collection.insert_one(document).await
    })
    .await?;
    Ok(result.inserted_id)
}

/// Return the first document matching `filter`.
///
/// # Errors
///
/// Returns [`DocumentStoreError::NotFound`] when nothing matches and
/// [`DocumentStoreError::Decode`] when the match cannot be decoded.
pub async fn find_one<T>(
    collection: &Collection<T>,
    filter: Document,
    budget: Duration,
) -> Result<T, DocumentStoreError>
where
    T: DeserializeOwned + Send + Sync,
{
    bounded("find_one", budget, async { collection.find_one(filter).await })
        .await?
        .ok_or(DocumentStoreError::NotFound)
}

/// Set `fields` on the first document matching `filter`.
///
/// Zero matches is not an error; inspect [`UpdateSummary::matched_count`].
///
/// # Errors
///
/// Fails on connectivity loss, driver errors, or timeout.
pub async fn update_one<T>(
    collection: &Collection<T>,
    filter: Document,
    fields: Document,
    budget: Duration,
) -> Result<UpdateSummary, DocumentStoreError>
where
    T: Send + Sync,
{
    let update = doc! { "$set": fields };
    let result = bounded("update_one", budget, async {
        collection.update_one(filter, update).await
    })
    .await?;
    Ok(UpdateSummary {
        matched_count: result.matched_count,
        modified_count: result.modified_count,
    })
}

/// Delete the first document matching `filter`, returning the deleted count.
///
/// # Errors
///
/// Fails on connectivity loss, driver errors, or timeout.
pub async fn delete_one<T>(
    collection: &Collection<T>,
    filter: Document,
    budget: Duration,
) -> Result<u64, DocumentStoreError>
where
    T: Send + Sync,
{
    let result = bounded("delete_one", budget, async {
        collection.delete_one(filter).await
    })
    .await?;
    Ok(result.deleted_count)
}

/// Drain every document matching `filter`, decoding each in store order.
///
/// The budget covers the query and the whole drain. The cursor is owned by
/// the drain future, so it is dropped (and closed on the server) on success,
/// on the first decode error, and when the budget elapses.
///
/// # Errors
///
/// Fails on query errors, decode errors, or timeout.
pub async fn find<T>(
    collection: &Collection<T>,
    filter: Document,
    budget: Duration,
) -> Result<Vec<T>, DocumentStoreError>
where
    T: DeserializeOwned + Unpin + Send + Sync,
{
    bounded("find", budget, async {
        let mut cursor = collection.find(filter).await?;
        let mut documents = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            documents.push(document);
        }
        Ok::<_, mongodb::error::Error>(documents)
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn bounded_times_out_slow_calls() {
        let budget = Duration::from_millis(10);
        let result = bounded("find_one", budget, async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, mongodb::error::Error>(())
        })
        .await;

        assert_eq!(
            result,
            Err(DocumentStoreError::Timeout {
                operation: "find_one",
                budget
            })
        );
    }

    #[rstest]
    #[tokio::test]
    async fn bounded_passes_through_fast_results() {
        let result = bounded("insert_one", DEFAULT_OPERATION_TIMEOUT, async {
            Ok::<_, mongodb::error::Error>(7_u8)
        })
        .await;

        assert_eq!(result, Ok(7));
    }

    fn decode_failure() -> mongodb::error::Error {
        let err = mongodb::bson::from_bson::<u32>(Bson::String("not a number".to_owned()))
            .expect_err("strings are not integers");
        mongodb::error::Error::from(err)
    }

    #[rstest]
    #[case::refused(std::io::ErrorKind::ConnectionRefused)]
    #[case::reset(std::io::ErrorKind::ConnectionReset)]
    fn io_failures_mean_the_store_is_unavailable(#[case] kind: std::io::ErrorKind) {
        let err = mongodb::error::Error::from(kind);

        assert!(matches!(
            classify("find", &err),
            DocumentStoreError::Unavailable { operation: "find", .. }
        ));
    }

    #[rstest]
    fn deserialisation_failures_are_decode_errors() {
        assert!(matches!(
            classify("find_one", &decode_failure()),
            DocumentStoreError::Decode { .. }
        ));
    }

    #[rstest]
    fn other_driver_failures_keep_the_operation() {
        let err = mongodb::error::Error::custom("duplicate key");

        assert!(matches!(
            classify("insert_one", &err),
            DocumentStoreError::Driver { operation: "insert_one", .. }
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn bounded_classifies_driver_errors() {
        let result = bounded("find", DEFAULT_OPERATION_TIMEOUT, async {
            Err::<(), _>(decode_failure())
        })
        .await;

        assert!(matches!(result, Err(DocumentStoreError::Decode { .. })));
    }

    #[rstest]
    fn timeout_display_names_operation() {
        let err = DocumentStoreError::Timeout {
            operation: "update_one",
            budget: Duration::from_secs(10),
        };
        assert_eq!(err.to_string(), "update_one exceeded its 10s budget");
    }
}
