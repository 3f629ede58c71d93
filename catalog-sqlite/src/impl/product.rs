use super::{is_unique_violation, predicate::push_predicate, tag::resolve_tag};
use crate::{
    Db,
    types::{DateTime, ProductId, ProductRow, price_text},
};
use catalog_core::{
    models::{ProductData, ProductQuery, ProductRecord, ProductUpdate},
    ports::{ProductFailure, ProductRepository},
};
use rustc_hash::FxHashMap;
use sqlx::SqliteConnection;

const PRODUCT_COLUMNS: &str = r#"
    select
        product.id as id,
        product.title as title,
        product.distribution as distribution,
        product.format as format,
        product.currency as currency,
        product.price as price,
        product.release_date as release_date,
        product.store_name as store_name,
        product.product_group_title as product_group_title,
        product.product_group_release_date as product_group_release_date
    from
        product
"#;

impl ProductRepository for Db {
    async fn create_product(
        &self,
        data: ProductData,
    ) -> Result<Result<ProductRecord<Self::ProductId>, ProductFailure>, Self::Error> {
        let mut tx = self.writer.begin().await?;

        let inserted = sqlx::query_scalar::<_, ProductId>(
            r#"
            insert into
                product (
                    title,
                    distribution,
                    format,
                    currency,
                    price,
                    release_date,
                    store_name,
                    product_group_title,
                    product_group_release_date
                )
            values
                ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            returning
                id
            "#,
        )
        .bind(&data.title)
        .bind(data.distribution.as_str())
        .bind(data.format.as_str())
        .bind(data.currency.as_str())
        .bind(price_text(&data.price))
        .bind(DateTime::from(data.release_date))
        .bind(&data.store_name)
        .bind(&data.product_group_title)
        .bind(DateTime::from(data.product_group_release_date))
        .fetch_one(&mut *tx)
        .await;

        // Dropping the transaction rolls it back, so a refused write leaves no rows
        let product_id = match inserted {
            Ok(product_id) => product_id,
            Err(err) if is_unique_violation(&err) => return Ok(Err(ProductFailure::TitleConflict)),
            Err(err) => return Err(err),
        };

        link_tags(&mut *tx, product_id, &data.tags).await?;
        let record = fetch_product(&mut *tx, product_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        tx.commit().await?;

        Ok(Ok(record))
    }

    async fn get_product(
        &self,
        product_id: Self::ProductId,
    ) -> Result<Option<ProductRecord<Self::ProductId>>, Self::Error> {
        let mut conn = self.reader.acquire().await?;
        fetch_product(&mut *conn, product_id).await
    }

    async fn update_product(
        &self,
        product_id: Self::ProductId,
        update: ProductUpdate,
    ) -> Result<Result<ProductRecord<Self::ProductId>, ProductFailure>, Self::Error> {
        // Read through the writer so no other write lands between load and merge
        let mut tx = self.writer.begin().await?;

        let Some(ProductRecord { data: mut product, .. }) =
            fetch_product(&mut *tx, product_id).await?
        else {
            return Ok(Err(ProductFailure::DoesNotExist));
        };
        let retag = update.tags.is_present();
        update.apply(&mut product);

        let updated = sqlx::query(
            r#"
            update
                product
            set
                title = $2,
                distribution = $3,
                format = $4,
                currency = $5,
                price = $6,
                release_date = $7,
                store_name = $8,
                product_group_title = $9,
                product_group_release_date = $10
            where
                id = $1
            "#,
        )
        .bind(product_id)
        .bind(&product.title)
        .bind(product.distribution.as_str())
        .bind(product.format.as_str())
        .bind(product.currency.as_str())
        .bind(price_text(&product.price))
        .bind(DateTime::from(product.release_date))
        .bind(&product.store_name)
        .bind(&product.product_group_title)
        .bind(DateTime::from(product.product_group_release_date))
        .execute(&mut *tx)
        .await;

        match updated {
            Ok(_) => {}
            Err(err) if is_unique_violation(&err) => return Ok(Err(ProductFailure::TitleConflict)),
            Err(err) => return Err(err),
        }

        if retag {
            // The tag list is replaced wholesale
            sqlx::query(
                r#"
                delete from
                    product_tag
                where
                    product_id = $1
                "#,
            )
            .bind(product_id)
            .execute(&mut *tx)
            .await?;

            link_tags(&mut *tx, product_id, &product.tags).await?;
        }

        let record = fetch_product(&mut *tx, product_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        tx.commit().await?;

        Ok(Ok(record))
    }

    async fn query_products(
        &self,
        query: &ProductQuery,
    ) -> Result<Vec<ProductRecord<Self::ProductId>>, Self::Error> {
        let mut builder = sqlx::QueryBuilder::new(PRODUCT_COLUMNS);
        push_predicate(&mut builder, "product", &query.predicate());
        builder
            .push(" order by product.id limit ")
            .push_bind(i64::try_from(query.limit()).unwrap_or(i64::MAX))
            .push(" offset ")
            .push_bind(i64::try_from(query.offset()).unwrap_or(i64::MAX));

        let mut conn = self.reader.acquire().await?;
        let rows = builder
            .build_query_as::<ProductRow>()
            .fetch_all(&mut *conn)
            .await?;

        let product_ids = rows.iter().map(|row| row.id).collect::<Vec<_>>();
        let mut tags = fetch_tags(&mut *conn, &product_ids).await?;

        rows.into_iter()
            .map(|row| {
                let names = tags.remove(&row.id).unwrap_or_default();
                row.into_record(names)
            })
            .collect()
    }

    async fn delete_product(&self, product_id: Self::ProductId) -> Result<bool, Self::Error> {
        // product_tag rows go with the product via `on delete cascade`
        let result = sqlx::query(
            r#"
            delete from
                product
            where
                id = $1
            "#,
        )
        .bind(product_id)
        .execute(&self.writer)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Associate the named tags with a product, creating missing tags on the way.
async fn link_tags(
    conn: &mut SqliteConnection,
    product_id: ProductId,
    tags: &[String],
) -> Result<(), sqlx::Error> {
    for (position, name) in tags.iter().enumerate() {
        let tag = resolve_tag(&mut *conn, name).await?;
        sqlx::query(
            r#"
            insert into
                product_tag (product_id, tag_id, position)
            values
                ($1, $2, $3)
            on conflict
                do nothing
            "#,
        )
        .bind(product_id)
        .bind(tag.id)
        .bind(position as i64)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

async fn fetch_product(
    conn: &mut SqliteConnection,
    product_id: ProductId,
) -> Result<Option<ProductRecord<ProductId>>, sqlx::Error> {
    let row = sqlx::query_as::<_, ProductRow>(&format!("{PRODUCT_COLUMNS} where product.id = $1"))
        .bind(product_id)
        .fetch_optional(&mut *conn)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let names = fetch_tags(&mut *conn, &[row.id])
        .await?
        .remove(&row.id)
        .unwrap_or_default();
    row.into_record(names).map(Some)
}

/// Load the tag names of several products at once, in their stored order.
async fn fetch_tags(
    conn: &mut SqliteConnection,
    product_ids: &[ProductId],
) -> Result<FxHashMap<ProductId, Vec<String>>, sqlx::Error> {
    let mut tags = FxHashMap::<ProductId, Vec<String>>::default();
    if product_ids.is_empty() {
        return Ok(tags);
    }

    let rows = sqlx::query_as::<_, (ProductId, String)>(
        r#"
        select
            product_tag.product_id,
            tag.name
        from
            product_tag
        join
            tag
        on
            tag.id = product_tag.tag_id
        where
            product_tag.product_id in (select value from json_each($1))
        order by
            product_tag.product_id,
            product_tag.position
        "#,
    )
    .bind(sqlx::types::Json(product_ids))
    .fetch_all(&mut *conn)
    .await?;

    for (product_id, name) in rows {
        tags.entry(product_id).or_default().push(name);
    }
    Ok(tags)
}
