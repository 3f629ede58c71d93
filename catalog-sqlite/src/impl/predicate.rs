//! Folding a [`Predicate`] into a SQL `where` clause.

use crate::types::DateTime;
use catalog_core::models::{Condition, DateField, Predicate, TextField};
use sqlx::{QueryBuilder, Sqlite};

fn text_column(field: TextField) -> &'static str {
    match field {
        TextField::StoreName => "store_name",
        TextField::Title => "title",
        TextField::ProductGroupTitle => "product_group_title",
    }
}

fn date_column(field: DateField) -> &'static str {
    match field {
        DateField::ReleaseDate => "release_date",
        DateField::ProductGroupReleaseDate => "product_group_release_date",
    }
}

/// Append ` where ...` to `builder`, with one conjunct per condition, all
/// evaluated against the table aliased as `scope`.
///
/// Substring matches use `instr`, which is case-sensitive where `like` is not.
/// Tag membership is an `exists` subquery, so a product carrying several of
/// the requested tags still yields a single row.
pub(crate) fn push_predicate<'args>(
    builder: &mut QueryBuilder<'args, Sqlite>,
    scope: &str,
    predicate: &Predicate,
) {
    builder.push(" where 1");
    for condition in predicate.conditions() {
        builder.push(" and ");
        match condition {
            Condition::Contains { field, needle } => {
                builder
                    .push(format_args!("instr({scope}.{}, ", text_column(*field)))
                    .push_bind(needle.clone())
                    .push(") > 0");
            }
            Condition::AtLeast { field, bound } => {
                builder
                    .push(format_args!("{scope}.{} >= ", date_column(*field)))
                    .push_bind(DateTime::from(bound));
            }
            Condition::AtMost { field, bound } => {
                builder
                    .push(format_args!("{scope}.{} <= ", date_column(*field)))
                    .push_bind(DateTime::from(bound));
            }
            Condition::TaggedWithAny(names) => {
                builder
                    .push(format_args!(
                        "exists (select 1 from product_tag join tag on tag.id = product_tag.tag_id \
                         where product_tag.product_id = {scope}.id \
                         and tag.name in (select value from json_each("
                    ))
                    .push_bind(sqlx::types::Json(names.clone()))
                    .push(")))");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Db, config::SqliteConfig, types::ProductId};
    use catalog_core::{
        models::{Currency, Distribution, MediaFormat, PredicateBuilder, ProductData},
        ports::ProductRepository,
    };
    use time::{OffsetDateTime, macros::datetime};

    fn product(title: &str, released: OffsetDateTime, tags: &[&str]) -> ProductData {
        ProductData {
            title: title.to_owned(),
            distribution: Distribution::Physical,
            format: MediaFormat::Vinyl,
            currency: Currency::Gbp,
            price: "19.99".parse().unwrap(),
            release_date: released,
            store_name: "Rough Trade".to_owned(),
            product_group_title: "Jive".to_owned(),
            product_group_release_date: released,
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
        }
    }

    async fn matching(db: &Db, predicate: &Predicate) -> Vec<ProductId> {
        let mut builder = QueryBuilder::new("select product.id from product");
        push_predicate(&mut builder, "product", predicate);
        builder.push(" order by product.id");
        builder
            .build_query_scalar::<ProductId>()
            .fetch_all(&db.reader)
            .await
            .unwrap()
    }

    async fn seeded() -> (Db, Vec<ProductId>) {
        let db = Db::open(&SqliteConfig::default()).await.unwrap();
        let mut ids = Vec::new();
        for data in [
            product(
                "A Tribe Called Quest - Midnight Marauders",
                datetime!(1993-11-09 00:00 UTC),
                &["Hip Hop", "Jazz"],
            ),
            product(
                "Wu Tang Clan - 36 Chambers",
                datetime!(1993-11-09 00:00 UTC),
                &["Hip Hop"],
            ),
            product(
                "Kanye West - Late Registration",
                datetime!(2005-08-30 00:00 UTC),
                &["Hip Hop", "Classical"],
            ),
        ] {
            ids.push(db.create_product(data).await.unwrap().unwrap().id);
        }
        (db, ids)
    }

    #[tokio::test]
    async fn test_empty_predicate_is_unconstrained() {
        let (db, ids) = seeded().await;
        assert_eq!(matching(&db, &Predicate::default()).await, ids);
    }

    #[tokio::test]
    async fn test_tag_condition_executes() {
        let (db, ids) = seeded().await;

        let classical = vec!["Classical".to_string()];
        let predicate = PredicateBuilder::new()
            .tagged_with_any(Some(classical.as_slice()))
            .build();
        assert_eq!(matching(&db, &predicate).await, vec![ids[2]]);

        let jazz = vec!["Jazz".to_string()];
        let predicate = PredicateBuilder::new()
            .tagged_with_any(Some(jazz.as_slice()))
            .build();
        assert_eq!(matching(&db, &predicate).await, vec![ids[0]]);

        let unknown = vec!["Grime".to_string()];
        let predicate = PredicateBuilder::new()
            .tagged_with_any(Some(unknown.as_slice()))
            .build();
        assert!(matching(&db, &predicate).await.is_empty());
    }

    #[tokio::test]
    async fn test_conditions_are_conjoined() {
        let (db, ids) = seeded().await;
        let tags = vec!["Hip Hop".to_string(), "Classical".to_string()];
        let predicate = PredicateBuilder::new()
            .title_contains(Some("Chambers"))
            .released_on_or_before(Some(datetime!(2000-01-01 00:00 UTC)))
            .tagged_with_any(Some(tags.as_slice()))
            .build();

        assert_eq!(matching(&db, &predicate).await, vec![ids[1]]);
    }
}
