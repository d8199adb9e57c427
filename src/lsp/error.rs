//! Catalog construction errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate keyword in {catalog} catalog: '{keyword}'")]
    DuplicateKeyword {
        catalog: &'static str,
        keyword: &'static str,
    },

    #[error("insert template for '{keyword}' does not start with its keyword: {template:?}")]
    TemplateMismatch {
        keyword: &'static str,
        template: &'static str,
    },

    #[error("empty keyword in {0} catalog")]
    EmptyKeyword(&'static str),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
