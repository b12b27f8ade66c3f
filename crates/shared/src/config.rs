use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// DynamoDB table holding the todo rows.
    pub table_name: String,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            table_name: env::var("TABLE_NAME").unwrap_or_else(|_| "todo-app-table".to_string()),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()),
        }
    }
}
