//! Lenient parsing of paging query parameters.
//!
//! Nothing here fails: missing or malformed input falls back to a default.

/// Page-size range and fallback for one kind of listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    pub min: i64,
    pub max: i64,
    pub default: i64,
}

/// Table dumps: `[10, 500]`, default 100.
pub const DUMP_PAGE_BOUNDS: PageBounds = PageBounds {
    min: 10,
    max: 500,
    default: 100,
};

/// Log polling: `[1, 500]`, default 100. Page sizes are 32-bit.
pub const POLL_PAGE_BOUNDS: PageBounds = PageBounds {
    min: 1,
    max: 500,
    default: 100,
};

impl PageBounds {
    /// Unparsable input takes the default, then everything is clamped.
    pub fn page_size(&self, raw: Option<&str>) -> i64 {
        self.clamp_or_default(parse_i64(raw))
    }

    /// Same as [`PageBounds::page_size`] for 32-bit page sizes: anything
    /// outside `i32` counts as unparsable and takes the default.
    pub fn page_size_i32(&self, raw: Option<&str>) -> i64 {
        self.clamp_or_default(parse_i32(raw).map(i64::from))
    }

    fn clamp_or_default(&self, parsed: Option<i64>) -> i64 {
        parsed.unwrap_or(self.default).clamp(self.min, self.max)
    }
}

/// Integer parse tolerant of surrounding whitespace; `None` on anything else.
pub fn parse_i64(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
}

pub fn parse_i32(raw: Option<&str>) -> Option<i32> {
    raw.and_then(|s| s.trim().parse::<i32>().ok())
}

/// `PageRequest` for offset-based paging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Blank or unparsable offsets disable offset filtering.
    pub offset: Option<i64>,
    pub page_size: i64,
}

impl PageRequest {
    pub fn parse(offset: Option<&str>, page_size: Option<&str>, bounds: PageBounds) -> Self {
        Self {
            offset: parse_i64(offset),
            page_size: bounds.page_size(page_size),
        }
    }
}
