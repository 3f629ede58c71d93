use crate::{Db, types::TagId};
use catalog_core::{models::TagRecord, ports::TagRepository};
use sqlx::SqliteConnection;

impl TagRepository for Db {
    async fn get_or_create_tag(&self, name: &str) -> Result<TagRecord<Self::TagId>, Self::Error> {
        let mut tx = self.writer.begin().await?;
        let record = resolve_tag(&mut *tx, name).await?;
        tx.commit().await?;
        Ok(record)
    }

    async fn get_tag(&self, name: &str) -> Result<Option<TagRecord<Self::TagId>>, Self::Error> {
        let row = sqlx::query_as::<_, (TagId, String)>(
            r#"
            select
                id, name
            from
                tag
            where
                name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.reader)
        .await?;

        Ok(row.map(|(id, name)| TagRecord { id, name }))
    }
}

/// Find the tag with this exact name, inserting it first if it is missing.
///
/// Runs on the caller's connection so that it joins the caller's transaction.
/// A concurrent insert of the same name is absorbed by the `on conflict`
/// clause and the subsequent lookup returns the surviving row.
pub(super) async fn resolve_tag(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<TagRecord<TagId>, sqlx::Error> {
    sqlx::query(
        r#"
        insert into
            tag (name)
        values
            ($1)
        on conflict (name)
            do nothing
        "#,
    )
    .bind(name)
    .execute(&mut *conn)
    .await?;

    let (id, name) = sqlx::query_as::<_, (TagId, String)>(
        r#"
        select
            id, name
        from
            tag
        where
            name = $1
        "#,
    )
    .bind(name)
    .fetch_one(&mut *conn)
    .await?;

    Ok(TagRecord { id, name })
}
