use super::ValidationError;

/// Bounded integer type with compile-time constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BoundedU32<const MIN: u32, const MAX: u32>(u32);

impl<const MIN: u32, const MAX: u32> BoundedU32<MIN, MAX> {
    /// Create a new bounded integer
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if !(MIN..=MAX).contains(&value) {
            return Err(ValidationError::OutOfBounds {
                value,
                min: MIN,
                max: MAX,
            });
        }
        Ok(Self(value))
    }

    /// Clamp any value into range
    pub fn saturating(value: u32) -> Self {
        Self(value.clamp(MIN, MAX))
    }

    /// Get the inner value
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl<const MIN: u32, const MAX: u32> Default for BoundedU32<MIN, MAX> {
    fn default() -> Self {
        Self(MAX)
    }
}

/// Number of results requested per listing page.
///
/// The API accepts 1..=100 and defaults to 100 when the parameter is absent.
pub type PageSize = BoundedU32<1, { crate::constants::NOTION_API_PAGE_SIZE_MAX }>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_bounds() {
        assert_eq!(PageSize::new(50).unwrap().get(), 50);
        assert!(PageSize::new(0).is_err());
        assert!(PageSize::new(101).is_err());
        assert_eq!(PageSize::default().get(), 100);
    }

    #[test]
    fn test_saturating() {
        assert_eq!(PageSize::saturating(0).get(), 1);
        assert_eq!(PageSize::saturating(500).get(), 100);
        assert_eq!(PageSize::saturating(42).get(), 42);
    }
}
