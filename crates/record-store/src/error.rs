//! # Store Errors
//!
//! Transport and lookup failures shared by every table and client.

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Table closed")]
    TableClosed,
    #[error("Table dropped response channel")]
    TableDropped,
    #[error("Row not found: {0}")]
    NotFound(String),
    #[error("Record error: {0}")]
    Record(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Recovers the record's own error type from a [`StoreError::Record`].
    ///
    /// Returns the original error unchanged when it is a transport failure or
    /// wraps a different type.
    pub fn into_record_error<E>(self) -> Result<E, StoreError>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            StoreError::Record(inner) => inner
                .downcast::<E>()
                .map(|e| *e)
                .map_err(StoreError::Record),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("out of stock")]
    struct OutOfStock;

    #[test]
    fn record_errors_downcast_to_their_type() {
        let err = StoreError::Record(Box::new(OutOfStock));
        assert_eq!(err.into_record_error::<OutOfStock>().unwrap(), OutOfStock);
    }

    #[test]
    fn transport_errors_are_returned_unchanged() {
        let err = StoreError::TableClosed;
        assert!(matches!(
            err.into_record_error::<OutOfStock>(),
            Err(StoreError::TableClosed)
        ));
    }
}
