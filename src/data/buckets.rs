// ---------------------------------------------------------------------------
// Static bucket tables for histogram-style views
// ---------------------------------------------------------------------------
//
// A BucketSpec is an ordered, exhaustive and disjoint partition of a numeric
// range; a CategorySpec partitions a small enumerated string domain. Both
// are static configuration, never derived from the data.

/// One histogram bucket: matches values up to `upper` (strictly below when
/// `inclusive` is false). `upper: None` is the unbounded tail.
#[derive(Debug, Clone, Copy)]
pub struct Bucket {
    pub label: &'static str,
    pub upper: Option<f64>,
    pub inclusive: bool,
}

impl Bucket {
    fn contains(&self, value: f64) -> bool {
        match self.upper {
            Some(u) if self.inclusive => value <= u,
            Some(u) => value < u,
            None => true,
        }
    }
}

/// An ordered list of buckets resolved by first match. The last bucket must
/// be unbounded so every value lands somewhere.
#[derive(Debug, Clone, Copy)]
pub struct BucketSpec {
    pub name: &'static str,
    pub buckets: &'static [Bucket],
}

impl BucketSpec {
    /// Index of the first bucket containing `value`, in declared order.
    pub fn bucket_index(&self, value: f64) -> usize {
        self.buckets
            .iter()
            .position(|b| b.contains(value))
            .unwrap_or(self.buckets.len() - 1)
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.buckets.iter().map(|b| b.label)
    }
}

/// Transaction size (number of shares) distribution.
pub const SHARE_BUCKETS: BucketSpec = BucketSpec {
    name: "shares",
    buckets: &[
        Bucket { label: "< 1,000 Shares", upper: Some(1_000.0), inclusive: false },
        Bucket { label: "1,000-10,000 Shares", upper: Some(10_000.0), inclusive: true },
        Bucket { label: "10,001-50,000 Shares", upper: Some(50_000.0), inclusive: true },
        Bucket { label: "50,001-250,000 Shares", upper: Some(250_000.0), inclusive: true },
        Bucket { label: "> 250,000 Shares", upper: None, inclusive: false },
    ],
};

/// Price-per-share distribution.
pub const PRICE_BUCKETS: BucketSpec = BucketSpec {
    name: "price per share",
    buckets: &[
        Bucket { label: "< $10", upper: Some(10.0), inclusive: false },
        Bucket { label: "$10-$50", upper: Some(50.0), inclusive: true },
        Bucket { label: "$50.01-$100", upper: Some(100.0), inclusive: true },
        Bucket { label: "$100.01-$500", upper: Some(500.0), inclusive: true },
        Bucket { label: "> $500", upper: None, inclusive: false },
    ],
};

// ---------------------------------------------------------------------------
// Enumerated string domains
// ---------------------------------------------------------------------------

/// One enumerated category with the normalized codes it accepts.
#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub label: &'static str,
    /// Accepted values after trim + uppercase normalization.
    pub codes: &'static [&'static str],
}

/// Ordered categories plus an explicit catch-all for anything unmatched.
#[derive(Debug, Clone, Copy)]
pub struct CategorySpec {
    pub categories: &'static [Category],
    pub fallback: &'static str,
}

impl CategorySpec {
    /// Index of the category matching a normalized code; unmatched codes map
    /// to the fallback slot at `categories.len()`.
    pub fn category_index(&self, code: &str) -> usize {
        self.categories
            .iter()
            .position(|c| c.codes.contains(&code))
            .unwrap_or(self.categories.len())
    }

    /// All output labels in declared order, fallback last.
    pub fn labels(&self) -> Vec<&'static str> {
        self.categories
            .iter()
            .map(|c| c.label)
            .chain(std::iter::once(self.fallback))
            .collect()
    }
}

/// Ownership Type domain: filings record it as D/I (or spelled out).
pub const OWNERSHIP_CATEGORIES: CategorySpec = CategorySpec {
    categories: &[
        Category { label: "Direct", codes: &["D", "DIRECT"] },
        Category { label: "Indirect", codes: &["I", "INDIRECT"] },
    ],
    fallback: "Other/Unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_buckets_first_match_boundaries() {
        assert_eq!(SHARE_BUCKETS.bucket_index(500.0), 0);
        assert_eq!(SHARE_BUCKETS.bucket_index(999.0), 0);
        assert_eq!(SHARE_BUCKETS.bucket_index(1_000.0), 1);
        assert_eq!(SHARE_BUCKETS.bucket_index(10_000.0), 1);
        assert_eq!(SHARE_BUCKETS.bucket_index(15_000.0), 2);
        assert_eq!(SHARE_BUCKETS.bucket_index(50_000.0), 2);
        assert_eq!(SHARE_BUCKETS.bucket_index(250_000.0), 3);
        assert_eq!(SHARE_BUCKETS.bucket_index(1_000_000.0), 4);
    }

    #[test]
    fn price_buckets_cover_everything() {
        assert_eq!(PRICE_BUCKETS.bucket_index(9.99), 0);
        assert_eq!(PRICE_BUCKETS.bucket_index(10.0), 1);
        assert_eq!(PRICE_BUCKETS.bucket_index(50.0), 1);
        assert_eq!(PRICE_BUCKETS.bucket_index(50.01), 2);
        assert_eq!(PRICE_BUCKETS.bucket_index(600.0), 4);
    }

    #[test]
    fn ownership_categories_fall_back() {
        assert_eq!(OWNERSHIP_CATEGORIES.category_index("D"), 0);
        assert_eq!(OWNERSHIP_CATEGORIES.category_index("DIRECT"), 0);
        assert_eq!(OWNERSHIP_CATEGORIES.category_index("I"), 1);
        assert_eq!(OWNERSHIP_CATEGORIES.category_index("TRUST"), 2);
        assert_eq!(OWNERSHIP_CATEGORIES.category_index("Unknown"), 2);
        assert_eq!(
            OWNERSHIP_CATEGORIES.labels(),
            vec!["Direct", "Indirect", "Other/Unknown"]
        );
    }
}
