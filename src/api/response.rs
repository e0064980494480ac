//! # Response Envelopes
//!
//! Success envelopes mirroring the failure contract: every body carries a
//! `success` flag.

use serde::Serialize;

/// Single-record response.
#[derive(Debug, Clone, Serialize)]
pub struct SingleResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> SingleResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Paged list response.
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub success: bool,
    pub data: Vec<T>,
    pub count: usize,
    pub page: i64,
    pub limit: i64,
}

impl<T: Serialize> ListResponse<T> {
    pub fn new(data: Vec<T>, page: i64, limit: i64) -> Self {
        let count = data.len();
        Self {
            success: true,
            data,
            count,
            page,
            limit,
        }
    }
}

/// Soft-delete acknowledgement.
#[derive(Debug, Clone, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub deactivated: bool,
}

impl DeletedResponse {
    pub fn new() -> Self {
        Self {
            success: true,
            deactivated: true,
        }
    }
}

impl Default for DeletedResponse {
    fn default() -> Self {
        Self::new()
    }
}
