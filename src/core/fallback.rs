//! Values an operation answers with when the provider says 404.

use crate::utils::error::Result;

pub trait Fallback<T> {
    /// `None` instead of `ResourceNotFound`.
    fn null_on_not_found(self) -> Result<Option<T>>;

    /// `T::default()` (an empty collection) instead of `ResourceNotFound`.
    fn empty_on_not_found(self) -> Result<T>
    where
        T: Default;

    /// `false` instead of `ResourceNotFound`, `true` on success.
    fn false_on_not_found(self) -> Result<bool>;

    /// Swallows `ResourceNotFound` for deletes of already absent resources.
    fn void_on_not_found(self) -> Result<()>;
}

impl<T> Fallback<T> for Result<T> {
    fn null_on_not_found(self) -> Result<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn empty_on_not_found(self) -> Result<T>
    where
        T: Default,
    {
        match self {
            Err(e) if e.is_not_found() => Ok(T::default()),
            other => other,
        }
    }

    fn false_on_not_found(self) -> Result<bool> {
        match self {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn void_on_not_found(self) -> Result<()> {
        match self {
            Ok(_) => Ok(()),
            Err(e) if e.is_not_found() => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::CloudError;

    fn not_found<T>() -> Result<T> {
        Err(CloudError::ResourceNotFound {
            message: "gone".to_string(),
        })
    }

    fn denied<T>() -> Result<T> {
        Err(CloudError::Authorization {
            message: "nope".to_string(),
        })
    }

    #[test]
    fn test_not_found_fallbacks() {
        assert_eq!(not_found::<u32>().null_on_not_found().unwrap(), None);
        assert_eq!(not_found::<Vec<u32>>().empty_on_not_found().unwrap(), Vec::<u32>::new());
        assert!(!not_found::<()>().false_on_not_found().unwrap());
        assert!(not_found::<()>().void_on_not_found().is_ok());
    }

    #[test]
    fn test_success_passes_through() {
        assert_eq!(Ok::<_, CloudError>(3).null_on_not_found().unwrap(), Some(3));
        assert!(Ok::<_, CloudError>(()).false_on_not_found().unwrap());
    }

    #[test]
    fn test_other_errors_propagate() {
        assert!(denied::<u32>().null_on_not_found().unwrap_err().is_authorization());
        assert!(denied::<Vec<u32>>().empty_on_not_found().is_err());
        assert!(denied::<()>().false_on_not_found().is_err());
        assert!(denied::<()>().void_on_not_found().is_err());
    }
}
