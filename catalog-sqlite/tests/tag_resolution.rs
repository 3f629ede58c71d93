mod common;

use catalog_core::ports::{ProductRepository, TagRepository};
use common::{open, product};

#[tokio::test]
async fn test_get_or_create_is_idempotent() -> anyhow::Result<()> {
    let db = open().await?;

    assert!(db.get_tag("Hip Hop").await?.is_none());
    let created = db.get_or_create_tag("Hip Hop").await?;
    let found = db.get_or_create_tag("Hip Hop").await?;
    assert_eq!(created, found);
    assert_eq!(db.get_tag("Hip Hop").await?, Some(created));
    Ok(())
}

#[tokio::test]
async fn test_names_are_case_sensitive() -> anyhow::Result<()> {
    let db = open().await?;

    let upper = db.get_or_create_tag("Hip Hop").await?;
    let lower = db.get_or_create_tag("hip hop").await?;
    assert_ne!(upper.id, lower.id);
    Ok(())
}

#[tokio::test]
async fn test_products_reuse_existing_tags() -> anyhow::Result<()> {
    let db = open().await?;

    let tag = db.get_or_create_tag("Hip Hop").await?;
    db.create_product(product("Wu Tang Clan - 36 Chambers", &["Hip Hop"]))
        .await?
        .unwrap();
    db.create_product(product("De La Soul = 3 Foot High", &["Hip Hop"]))
        .await?
        .unwrap();

    let count: i64 = sqlx::query_scalar("select count(*) from tag")
        .fetch_one(&db.reader)
        .await?;
    assert_eq!(count, 1);
    assert_eq!(db.get_tag("Hip Hop").await?.unwrap().id, tag.id);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_resolution_yields_one_tag() -> anyhow::Result<()> {
    let db = open().await?;

    let (a, b) = tokio::try_join!(db.get_or_create_tag("Jazz"), db.get_or_create_tag("Jazz"))?;
    assert_eq!(a, b);
    Ok(())
}
