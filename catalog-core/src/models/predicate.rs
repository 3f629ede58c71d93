//! Composable filters over products.
//!
//! A [`PredicateBuilder`] accumulates one [`Condition`] per supplied filter
//! criterion. The resulting [`Predicate`] is the conjunction of its conditions
//! and is handed to a storage adapter, which folds it into its own query
//! language against a single product scope.

use super::ProductData;
use time::OffsetDateTime;

/// A textual product attribute that supports substring matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    /// The store selling the product
    StoreName,
    /// The product's own title
    Title,
    /// The title of the product's group
    ProductGroupTitle,
}

impl TextField {
    fn get(self, product: &ProductData) -> &str {
        match self {
            Self::StoreName => &product.store_name,
            Self::Title => &product.title,
            Self::ProductGroupTitle => &product.product_group_title,
        }
    }
}

/// A temporal product attribute that supports range bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    /// The product's own release date
    ReleaseDate,
    /// The release date of the product's group
    ProductGroupReleaseDate,
}

impl DateField {
    fn get(self, product: &ProductData) -> OffsetDateTime {
        match self {
            Self::ReleaseDate => product.release_date,
            Self::ProductGroupReleaseDate => product.product_group_release_date,
        }
    }
}

/// A single filter condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// The field contains `needle` as a case-sensitive substring
    Contains {
        /// The attribute to search
        field: TextField,
        /// The text that must occur in the attribute
        needle: String,
    },
    /// The field is on or after `bound`
    AtLeast {
        /// The attribute to compare
        field: DateField,
        /// The inclusive lower bound
        bound: OffsetDateTime,
    },
    /// The field is on or before `bound`
    AtMost {
        /// The attribute to compare
        field: DateField,
        /// The inclusive upper bound
        bound: OffsetDateTime,
    },
    /// The product carries at least one tag whose name is in the set
    TaggedWithAny(Vec<String>),
}

impl Condition {
    /// Evaluate this condition against a product.
    pub fn matches(&self, product: &ProductData) -> bool {
        match self {
            Self::Contains { field, needle } => field.get(product).contains(needle.as_str()),
            Self::AtLeast { field, bound } => field.get(product) >= *bound,
            Self::AtMost { field, bound } => field.get(product) <= *bound,
            Self::TaggedWithAny(names) => product.tags.iter().any(|tag| names.contains(tag)),
        }
    }
}

/// The conjunction of zero or more conditions.
///
/// An empty predicate matches every product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    conditions: Vec<Condition>,
}

impl Predicate {
    /// The conditions in the order they were added.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Returns true if no condition constrains the result.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Evaluate the predicate against a product.
    pub fn matches(&self, product: &ProductData) -> bool {
        self.conditions
            .iter()
            .all(|condition| condition.matches(product))
    }
}

/// Incrementally assemble a [`Predicate`].
///
/// Every method accepts an optional criterion and is a no-op when it is `None`,
/// so callers can pass their filter fields through unconditionally. Methods may
/// be chained in any order.
///
/// ```
/// use catalog_core::models::PredicateBuilder;
///
/// let predicate = PredicateBuilder::new()
///     .title_contains(Some("36 Chambers"))
///     .store_name_contains(None)
///     .build();
/// assert_eq!(predicate.conditions().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct PredicateBuilder {
    conditions: Vec<Condition>,
}

impl PredicateBuilder {
    /// Start with no conditions.
    pub fn new() -> Self {
        Self::default()
    }

    fn contains(mut self, field: TextField, needle: Option<&str>) -> Self {
        if let Some(needle) = needle {
            self.conditions.push(Condition::Contains {
                field,
                needle: needle.to_owned(),
            });
        }
        self
    }

    fn at_least(mut self, field: DateField, bound: Option<OffsetDateTime>) -> Self {
        if let Some(bound) = bound {
            self.conditions.push(Condition::AtLeast { field, bound });
        }
        self
    }

    fn at_most(mut self, field: DateField, bound: Option<OffsetDateTime>) -> Self {
        if let Some(bound) = bound {
            self.conditions.push(Condition::AtMost { field, bound });
        }
        self
    }

    /// Require the store name to contain `needle`.
    pub fn store_name_contains(self, needle: Option<&str>) -> Self {
        self.contains(TextField::StoreName, needle)
    }

    /// Require the title to contain `needle`.
    pub fn title_contains(self, needle: Option<&str>) -> Self {
        self.contains(TextField::Title, needle)
    }

    /// Require the product group title to contain `needle`.
    pub fn group_title_contains(self, needle: Option<&str>) -> Self {
        self.contains(TextField::ProductGroupTitle, needle)
    }

    /// Require the release date to be on or after `bound`.
    pub fn released_on_or_after(self, bound: Option<OffsetDateTime>) -> Self {
        self.at_least(DateField::ReleaseDate, bound)
    }

    /// Require the release date to be on or before `bound`.
    pub fn released_on_or_before(self, bound: Option<OffsetDateTime>) -> Self {
        self.at_most(DateField::ReleaseDate, bound)
    }

    /// Require the group release date to be on or after `bound`.
    pub fn group_released_on_or_after(self, bound: Option<OffsetDateTime>) -> Self {
        self.at_least(DateField::ProductGroupReleaseDate, bound)
    }

    /// Require the group release date to be on or before `bound`.
    pub fn group_released_on_or_before(self, bound: Option<OffsetDateTime>) -> Self {
        self.at_most(DateField::ProductGroupReleaseDate, bound)
    }

    /// Require at least one of the product's tags to be named in `names`.
    ///
    /// An empty list places no constraint, the same as `None`.
    pub fn tagged_with_any(mut self, names: Option<&[String]>) -> Self {
        if let Some(names) = names.filter(|names| !names.is_empty()) {
            self.conditions
                .push(Condition::TaggedWithAny(super::distinct_tags(names.to_vec())));
        }
        self
    }

    /// Combine the accumulated conditions with logical AND.
    pub fn build(self) -> Predicate {
        Predicate {
            conditions: self.conditions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Currency, Distribution, MediaFormat};
    use time::macros::datetime;

    fn product(title: &str, store_name: &str, tags: &[&str]) -> ProductData {
        ProductData {
            title: title.into(),
            distribution: Distribution::Digital,
            format: MediaFormat::Mp3,
            currency: Currency::Usd,
            price: "15.50".parse().unwrap(),
            release_date: datetime!(1993-11-09 00:00 UTC),
            store_name: store_name.into(),
            product_group_title: "Native Tongues".into(),
            product_group_release_date: datetime!(1988-01-01 00:00 UTC),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_empty_matches_everything() {
        let predicate = PredicateBuilder::new()
            .store_name_contains(None)
            .title_contains(None)
            .group_title_contains(None)
            .released_on_or_after(None)
            .released_on_or_before(None)
            .group_released_on_or_after(None)
            .group_released_on_or_before(None)
            .tagged_with_any(None)
            .build();
        assert!(predicate.is_empty());
        assert!(predicate.matches(&product("Midnight Marauders", "Tribal", &[])));
    }

    #[test]
    fn test_one_condition_per_criterion() {
        let tags = vec!["Hip Hop".to_string()];
        let predicate = PredicateBuilder::new()
            .store_name_contains(Some("Wu"))
            .title_contains(Some("36"))
            .released_on_or_after(Some(datetime!(1990-01-01 00:00 UTC)))
            .tagged_with_any(Some(&tags))
            .build();
        assert_eq!(predicate.conditions().len(), 4);
        assert_eq!(
            predicate.conditions()[3],
            Condition::TaggedWithAny(vec!["Hip Hop".into()])
        );
    }

    #[test]
    fn test_call_order_is_irrelevant() {
        let a = PredicateBuilder::new()
            .title_contains(Some("Chambers"))
            .released_on_or_before(Some(datetime!(2000-01-01 00:00 UTC)))
            .build();
        let b = PredicateBuilder::new()
            .released_on_or_before(Some(datetime!(2000-01-01 00:00 UTC)))
            .title_contains(Some("Chambers"))
            .build();

        for candidate in [
            product("Wu Tang Clan - 36 Chambers", "Wu Store", &[]),
            product("De La Soul - 3 Feet High", "Soul", &[]),
        ] {
            assert_eq!(a.matches(&candidate), b.matches(&candidate));
        }
    }

    #[test]
    fn test_substring_is_case_sensitive() {
        let wu = product("Wu Tang Clan - 36 Chambers", "Wu Store", &[]);
        assert!(
            PredicateBuilder::new()
                .title_contains(Some("36 Chambers"))
                .build()
                .matches(&wu)
        );
        assert!(
            !PredicateBuilder::new()
                .title_contains(Some("36 chambers"))
                .build()
                .matches(&wu)
        );
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let release = datetime!(1993-11-09 00:00 UTC);
        let candidate = product("Midnight Marauders", "Tribal", &[]);
        let predicate = PredicateBuilder::new()
            .released_on_or_after(Some(release))
            .released_on_or_before(Some(release))
            .build();
        assert!(predicate.matches(&candidate));

        let later = PredicateBuilder::new()
            .released_on_or_after(Some(datetime!(1993-11-09 00:00:01 UTC)))
            .build();
        assert!(!later.matches(&candidate));
    }

    #[test]
    fn test_tags_match_any() {
        let wanted = vec!["Hip Hop".to_string(), "Jazz".to_string()];
        let predicate = PredicateBuilder::new()
            .tagged_with_any(Some(&wanted))
            .build();
        assert!(predicate.matches(&product("Late Registration", "Good", &["Hip Hop", "Classical"])));
        assert!(predicate.matches(&product("Kind of Blue", "Columbia", &["Jazz"])));
        assert!(!predicate.matches(&product("Four Seasons", "DG", &["Classical"])));
    }

    #[test]
    fn test_empty_tag_list_is_unconstrained() {
        let predicate = PredicateBuilder::new().tagged_with_any(Some(&[])).build();
        assert!(predicate.is_empty());
    }
}
