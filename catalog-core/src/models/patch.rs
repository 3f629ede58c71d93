/// A field of a partial update: either a replacement value, or nothing.
///
/// Unlike a bare `Option`, the intent is explicit at every use site. An absent
/// field always means "leave the stored value unchanged"; there is no variant
/// for clearing a field, because no product field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    /// The request did not mention this field
    #[default]
    Absent,
    /// The request supplies a new value for this field
    Present(T),
}

impl<T> Patch<T> {
    /// Returns true if the patch carries a value.
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Overwrite `target` with the carried value, if any.
    pub fn apply_to(self, target: &mut T) {
        if let Self::Present(value) = self {
            *target = value;
        }
    }

    /// Transform the carried value, if any.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Self::Absent => Patch::Absent,
            Self::Present(value) => Patch::Present(f(value)),
        }
    }

    /// Transform the carried value with a fallible function, if any.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Patch<U>, E> {
        match self {
            Self::Absent => Ok(Patch::Absent),
            Self::Present(value) => f(value).map(Patch::Present),
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Present(value),
            None => Self::Absent,
        }
    }
}
