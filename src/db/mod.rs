use sqlx::mysql::MySqlPool;
use tracing::warn;

pub mod active_currency;

/// Initialize the MySQL connection pool and create tables
pub async fn init_db(database_url: &str) -> Result<MySqlPool, sqlx::Error> {
    let pool = MySqlPool::connect(database_url).await?;

    // Create all tables
    create_tables(&pool).await?;

    Ok(pool)
}

/// Read and execute SQL file for creating tables
async fn execute_sql_file(pool: &MySqlPool, file_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let sql_content = std::fs::read_to_string(file_path)
        .map_err(|e| format!("Failed to read {}: {}", file_path, e))?;

    for statement in split_statements(&sql_content) {
        sqlx::raw_sql(statement)
            .execute(pool)
            .await
            .ok(); // Ignore errors if tables already exist
    }

    Ok(())
}

/// Statements in a migration file are terminated by `//` after a
/// `DELIMITER //` line
fn split_statements(sql_content: &str) -> Vec<&str> {
    sql_content
        .split("//")
        .skip(1)
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "DELIMITER ;")
        .collect()
}

/// Create all database tables
async fn create_tables(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    if let Err(e) = execute_sql_file(pool, "migrations/create_tables.sql").await {
        warn!("Failed to create tables: {}", e);
    }

    Ok(())
}
