use mongodb::options::ClientOptions;

use super::error::{MongoDaoError, MongoResult};

/// Parsed connection options plus the target database name.
#[derive(Clone)]
pub struct MongoConfig {
    /// Driver client options parsed from the URI.
    pub options: ClientOptions,
    /// Database holding the tournament collections.
    pub database_name: String,
}

impl MongoConfig {
    /// Parse a URI, defaulting the database name when none is supplied.
    pub async fn from_uri(uri: &str, db_name: Option<&str>) -> MongoResult<Self> {
        let database_name = db_name.unwrap_or("courtside").to_owned();
        let options =
            ClientOptions::parse(uri)
                .await
                .map_err(|source| MongoDaoError::InvalidUri {
                    uri: uri.to_owned(),
                    source,
                })?;

        Ok(Self {
            options,
            database_name,
        })
    }
}
