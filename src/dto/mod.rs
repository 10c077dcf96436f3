//! JSON shapes returned by the HTTP API.

use serde::Serialize;

use crate::services::ServiceError;

pub mod collections;
pub mod images;
pub mod users;

/// One page of a listing together with the total number of items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageDto<T> {
    pub total: usize,
    pub page: usize,
    pub pages: usize,
    pub items: Vec<T>,
}

impl<T> PageDto<T> {
    pub fn new(items: Vec<T>, total: usize, page: usize, per_page: usize) -> Self {
        Self {
            total,
            page,
            pages: total.div_ceil(per_page.max(1)),
            items,
        }
    }
}

/// Body of every non-internal error response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorDto {
    pub code: u32,
    pub kind: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<i32>,
}

impl ErrorDto {
    /// `None` for [`ServiceError::Internal`], which is never described to clients.
    pub fn from_error(error: &ServiceError) -> Option<Self> {
        let code = error.code()?;
        let ids = match error {
            ServiceError::NotFound { ids, .. } => ids.clone(),
            _ => Vec::new(),
        };
        Some(Self {
            code,
            kind: error.kind(),
            message: error.to_string(),
            ids,
        })
    }
}
