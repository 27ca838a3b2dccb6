use sqlx::mysql::MySqlPool;

/// Stored active list for a user, in display order - returns (code, is_focused)
pub async fn get_active_currencies(
    pool: &MySqlPool,
    user_id: u64,
) -> Result<Vec<(String, bool)>, sqlx::Error> {
    sqlx::query_as::<_, (String, bool)>(
        "SELECT code, is_focused FROM active_currency WHERE user_id = ? ORDER BY position ASC"
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Replace a user's stored active list
pub async fn replace_active_currencies(
    pool: &MySqlPool,
    user_id: u64,
    codes: &[String],
    focused: Option<&str>,
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM active_currency WHERE user_id = ?")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    for (position, code) in codes.iter().enumerate() {
        sqlx::query(
            "INSERT INTO active_currency (user_id, position, code, is_focused) VALUES (?, ?, ?, ?)"
        )
        .bind(user_id)
        .bind(position as u32)
        .bind(code)
        .bind(focused == Some(code.as_str()))
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await
}
