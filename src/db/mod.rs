//! MongoDB bootstrap: connection, database resolution and schema
//! enforcement on the `users` collection.

pub mod users;

use anyhow::{Context, Result};
use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Client, Database, IndexModel,
};
use tracing::{debug, info, instrument};

use self::users::{user_schema, USERS_COLLECTION};

/// Database used when the connection string does not name one.
pub const DEFAULT_DATABASE: &str = "pordisto";

/// Connect to MongoDB and resolve the working database.
///
/// # Errors
/// Returns an error if the connection string is invalid or the server does
/// not answer a ping.
pub async fn connect(dsn: &str) -> Result<(Client, Database)> {
    let client = Client::with_uri_str(dsn)
        .await
        .context("Failed to connect to database")?;

    let database = client
        .default_database()
        .unwrap_or_else(|| client.database(DEFAULT_DATABASE));

    database
        .run_command(doc! { "ping": 1 })
        .await
        .context("Failed to ping database")?;

    info!("Connected to MongoDB, database: {}", database.name());

    Ok((client, database))
}

/// Enforce the `users` rules: collection validator plus the unique email
/// index. Email uniqueness lives here, in the persistence layer; request
/// handling never checks it.
#[instrument(skip(database))]
pub async fn ensure_user_schema(database: &Database) -> Result<()> {
    let schema = user_schema();

    let collections = database.list_collection_names().await?;

    if collections.iter().any(|name| name == USERS_COLLECTION) {
        database
            .run_command(doc! { "collMod": USERS_COLLECTION, "validator": schema })
            .await?;

        debug!("Updated validator on {}", USERS_COLLECTION);
    } else {
        database
            .create_collection(USERS_COLLECTION)
            .validator(schema)
            .await?;

        debug!("Created {} with validator", USERS_COLLECTION);
    }

    let email_index = IndexModel::builder()
        .keys(doc! { "email": 1 })
        .options(IndexOptions::builder().unique(true).build())
        .build();

    database
        .collection::<Document>(USERS_COLLECTION)
        .create_index(email_index)
        .await
        .context("Failed to create unique email index")?;

    Ok(())
}
