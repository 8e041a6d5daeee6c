/// Pagination and sort-order parsing for list endpoints.
///
/// `page` and `limit` arrive as optional integers and are clamped rather
/// than trusted; sort fields go through a whitelist so the dynamic ORDER BY
/// can never carry user-controlled SQL.
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Raw query parameters, as deserialized from the request.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Clamped pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    pub fn from_query(query: &PageQuery) -> Self {
        let page = query.page.unwrap_or(DEFAULT_PAGE).max(DEFAULT_PAGE);
        let limit = query
            .limit
            .unwrap_or(DEFAULT_LIMIT)
            .clamp(1, MAX_LIMIT);
        Self { page, limit }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// One page of a list view.
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub items: Vec<T>,
    pub page: i64,
    pub limit: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

impl<T: Serialize> Page<T> {
    pub fn new(items: Vec<T>, pagination: Pagination, total_items: i64) -> Self {
        let total_pages = if total_items == 0 {
            0
        } else {
            (total_items + pagination.limit - 1) / pagination.limit
        };
        Self {
            items,
            page: pagination.page,
            limit: pagination.limit,
            total_items,
            total_pages,
        }
    }
}

/// Sortable columns for the video list. Anything unrecognized falls back to
/// creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoSortKey {
    CreatedAt,
    Views,
    Duration,
    Title,
}

impl VideoSortKey {
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("views") => VideoSortKey::Views,
            Some("duration") => VideoSortKey::Duration,
            Some("title") => VideoSortKey::Title,
            _ => VideoSortKey::CreatedAt,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            VideoSortKey::CreatedAt => "v.created_at",
            VideoSortKey::Views => "v.views",
            VideoSortKey::Duration => "v.duration_secs",
            VideoSortKey::Title => "v.title",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Direction defaults to descending when absent or unrecognized.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some(p) if p.eq_ignore_ascii_case("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_absent() {
        let p = Pagination::from_query(&PageQuery::default());
        assert_eq!(p, Pagination { page: 1, limit: 10 });
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn negative_and_oversized_input_is_clamped() {
        let p = Pagination::from_query(&PageQuery {
            page: Some(-3),
            limit: Some(0),
        });
        assert_eq!(p, Pagination { page: 1, limit: 1 });

        let p = Pagination::from_query(&PageQuery {
            page: Some(2),
            limit: Some(10_000),
        });
        assert_eq!(p, Pagination { page: 2, limit: MAX_LIMIT });
    }

    #[test]
    fn offset_is_page_minus_one_times_limit() {
        let p = Pagination::from_query(&PageQuery {
            page: Some(4),
            limit: Some(25),
        });
        assert_eq!(p.offset(), 75);
    }

    #[test]
    fn page_math_covers_the_result_set_exactly() {
        let pagination = Pagination { page: 1, limit: 10 };
        let page = Page::new(vec![1; 10], pagination, 35);
        assert_eq!(page.total_pages, 4);

        let empty: Page<i32> = Page::new(vec![], pagination, 0);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn sort_key_whitelist_falls_back_to_created_at() {
        assert_eq!(VideoSortKey::from_param(Some("views")), VideoSortKey::Views);
        assert_eq!(
            VideoSortKey::from_param(Some("views; DROP TABLE videos")),
            VideoSortKey::CreatedAt
        );
        assert_eq!(VideoSortKey::from_param(None), VideoSortKey::CreatedAt);
    }

    #[test]
    fn sort_direction_defaults_to_desc() {
        assert_eq!(SortDirection::from_param(Some("asc")), SortDirection::Asc);
        assert_eq!(SortDirection::from_param(Some("ASC")), SortDirection::Asc);
        assert_eq!(SortDirection::from_param(Some("sideways")), SortDirection::Desc);
        assert_eq!(SortDirection::from_param(None), SortDirection::Desc);
    }
}
