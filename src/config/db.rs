use std::sync::Arc;

use mongodb::{Client, Database};

use crate::config::settings::Settings;

pub async fn init_database(settings: &Settings) -> mongodb::error::Result<Arc<Database>> {
    let client = Client::with_uri_str(&settings.mongo_uri).await?;
    let database = client.database(&settings.database_name);

    Ok(Arc::new(database))
}
