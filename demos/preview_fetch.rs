// Endpoint preview demo
// Author: Gabriel Demetrios Lafis

use std::collections::HashMap;

use api_ingestion_engine::{
    request::ApiClient,
    utils::{init_logging, Config},
};

#[tokio::main]
async fn main() {
    let config = Config::default();

    if let Err(err) = init_logging(config.log_level_filter()) {
        eprintln!("Error initializing logger: {}", err);
    }

    let client = ApiClient::new(config);

    let result = client
        .test_api_endpoint("https://jsonplaceholder.typicode.com/posts", HashMap::new())
        .await;

    println!("success: {}", result.success);
    println!("message: {}", result.message);

    if let Some(count) = result.record_count {
        println!("records: {}", count);
    }

    if let Some(schema) = &result.schema {
        println!("schema type: {}", schema.type_name());
    }

    for suggestion in &result.suggestions {
        println!("hint: {}", suggestion);
    }
}
