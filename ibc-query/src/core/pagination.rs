//! Offset pagination over listed store entries.

use alloc::vec::Vec;

use ibc_proto::cosmos::base::query::v1beta1::{PageRequest, PageResponse};

use crate::error::QueryError;

/// Page size when the request leaves the limit at zero.
pub const DEFAULT_LIMIT: u64 = 100;

/// Cuts the requested page out of `items`, given in store order.
///
/// A missing request, or a zero limit, yields the first [`DEFAULT_LIMIT`]
/// entries and counts the total. Only offsets are supported: `next_key` is
/// left empty, and a request carrying a `key` is rejected.
pub(crate) fn paginate<T>(
    mut items: Vec<T>,
    request: Option<&PageRequest>,
) -> Result<(Vec<T>, PageResponse), QueryError> {
    let default_request = PageRequest::default();
    let request = request.unwrap_or(&default_request);

    if !request.key.is_empty() {
        return Err(QueryError::invalid_pagination(
            "key-based pagination is not supported; use an offset",
        ));
    }

    let (limit, count_total) = match request.limit {
        0 => (DEFAULT_LIMIT, true),
        limit => (limit, request.count_total),
    };

    let total = items.len() as u64;
    if request.reverse {
        items.reverse();
    }

    let offset = usize::try_from(request.offset).unwrap_or(usize::MAX);
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    let page = items.into_iter().skip(offset).take(limit).collect();

    Ok((
        page,
        PageResponse {
            next_key: Vec::new(),
            total: if count_total { total } else { 0 },
        },
    ))
}
