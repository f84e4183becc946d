//! Error definitions for catalog queries.

use thiserror::Error;

/// Failure of a catalog lookup.
///
/// Selections normally come from the list the front-end itself presents, so
/// hitting this means the caller passed an identifier it never got from
/// `ProtocolCatalog::list_layers`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown layer '{0}' (expected one of the 8 catalog layers)")]
    UnknownLayer(String),
}

/// Result type alias for catalog queries.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_layer_display_names_the_selection() {
        let err = CatalogError::UnknownLayer("NotALayer".to_string());
        assert_eq!(
            format!("{}", err),
            "unknown layer 'NotALayer' (expected one of the 8 catalog layers)"
        );
    }
}
