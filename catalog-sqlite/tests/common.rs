use catalog_core::models::{Currency, Distribution, MediaFormat, ProductData};
use catalog_sqlite::{Db, config::SqliteConfig};
use time::{OffsetDateTime, macros::datetime};

pub async fn open() -> anyhow::Result<Db> {
    Ok(Db::open(&SqliteConfig::default()).await?)
}

pub fn product(title: &str, tags: &[&str]) -> ProductData {
    ProductData {
        title: title.to_owned(),
        distribution: Distribution::Digital,
        format: MediaFormat::Mp3,
        currency: Currency::Usd,
        price: "15.50".parse().unwrap(),
        release_date: datetime!(1993-11-09 00:00 UTC),
        store_name: "Wu shop".to_owned(),
        product_group_title: "Wu tang records".to_owned(),
        product_group_release_date: datetime!(1993-01-01 00:00 UTC),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
    }
}

#[allow(dead_code)]
pub fn released(mut data: ProductData, release_date: OffsetDateTime) -> ProductData {
    data.release_date = release_date;
    data
}
