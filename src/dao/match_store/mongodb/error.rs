//! Error types shared by the MongoDB storage implementation.

use thiserror::Error;
use uuid::Uuid;

/// Convenient result alias returning [`MongoDaoError`] failures.
pub type MongoResult<T> = Result<T, MongoDaoError>;

/// Failures that can occur while interacting with MongoDB.
#[derive(Debug, Error)]
pub enum MongoDaoError {
    /// The connection string could not be parsed.
    #[error("invalid MongoDB URI `{uri}`")]
    InvalidUri {
        /// Offending URI.
        uri: String,
        /// Driver error.
        #[source]
        source: mongodb::error::Error,
    },
    /// Building the client from parsed options failed.
    #[error("failed to construct MongoDB client")]
    ClientConstruction {
        /// Driver error.
        #[source]
        source: mongodb::error::Error,
    },
    /// The server never answered the initial ping.
    #[error("MongoDB did not answer initial ping after {attempts} attempts")]
    InitialPing {
        /// Number of connection attempts made.
        attempts: u32,
        /// Last driver error.
        #[source]
        source: mongodb::error::Error,
    },
    /// Health-check ping failed on an established connection.
    #[error("MongoDB health ping failed")]
    HealthPing {
        /// Driver error.
        #[source]
        source: mongodb::error::Error,
    },
    /// Index creation failed during bootstrap.
    #[error("failed to ensure index `{index}` on collection `{collection}`")]
    EnsureIndex {
        /// Collection the index targets.
        collection: &'static str,
        /// Index key description.
        index: &'static str,
        /// Driver error.
        #[source]
        source: mongodb::error::Error,
    },
    /// A document write was rejected.
    #[error("failed to write `{entity}` document `{id}`")]
    Write {
        /// Kind of entity being written.
        entity: &'static str,
        /// Entity identifier.
        id: Uuid,
        /// Driver error.
        #[source]
        source: mongodb::error::Error,
    },
    /// A batch insert was rejected; nothing from the batch was kept.
    #[error("failed to insert match batch for event `{event_id}`")]
    InsertBatch {
        /// Event the batch belongs to.
        event_id: Uuid,
        /// Driver error.
        #[source]
        source: mongodb::error::Error,
    },
    /// A read query failed.
    #[error("failed to load `{entity}` documents")]
    Load {
        /// Kind of entity being read.
        entity: &'static str,
        /// Driver error.
        #[source]
        source: mongodb::error::Error,
    },
    /// A delete query failed.
    #[error("failed to delete `{entity}` documents")]
    Delete {
        /// Kind of entity being deleted.
        entity: &'static str,
        /// Driver error.
        #[source]
        source: mongodb::error::Error,
    },
}
