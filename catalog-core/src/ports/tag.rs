use crate::models::TagRecord;

/// Repository interface for the tag vocabulary.
pub trait TagRepository: super::Repository {
    /// Look up a tag by its exact name, creating it if absent.
    ///
    /// Concurrent callers with the same name observe a single tag.
    fn get_or_create_tag(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<TagRecord<Self::TagId>, Self::Error>> + Send;

    /// Look up a tag by its exact name.
    fn get_tag(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<TagRecord<Self::TagId>>, Self::Error>> + Send;
}
