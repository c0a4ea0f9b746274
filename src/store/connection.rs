use std::sync::Arc;

use mongodb::bson::doc;
use mongodb::sync::{Client, Collection};

use crate::recipe::Recipe;
use crate::settings::MongoSettings;
use crate::store::StoreError;

/// Creates the process-wide client and checks that the server answers.
pub fn connect(uri: &str) -> Result<Arc<Client>, StoreError> {
    let uri = uri.trim();
    if uri.is_empty() {
        return Err(StoreError::Connection(String::from("MongoDB URI is not configured")));
    }

    let client =
        Client::with_uri_str(uri).map_err(|err| StoreError::Connection(err.to_string()))?;
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .run()
        .map_err(|err| StoreError::Connection(err.to_string()))?;

    log::info!("Connected to MongoDB at {}", redact_uri(uri));
    Ok(Arc::new(client))
}

pub fn resolve_collection(client: &Client, settings: &MongoSettings) -> Collection<Recipe> {
    log::debug!("Using collection {}.{}", settings.database, settings.collection);
    client.database(&settings.database).collection::<Recipe>(&settings.collection)
}

fn redact_uri(uri: &str) -> String {
    let Some((scheme, rest)) = uri.split_once("://") else {
        return uri.to_string();
    };
    let authority_end = rest.find('/').unwrap_or(rest.len());
    match rest[..authority_end].rfind('@') {
        Some(at) => format!("{scheme}://***@{}", &rest[at + 1..]),
        None => uri.to_string(),
    }
}
