use provchain_core::ProductId;

/// Monotonic product id allocator.
///
/// Issues the dense sequence `1, 2, 3, ...`: `next()` returns the current
/// counter value and advances it by one, so no id is ever repeated or
/// skipped. The allocator lives inside the store's locked state, which makes
/// allocate+insert a single atomic unit; the store performs every fallible
/// check *before* calling `next()`, so a rejected creation never advances
/// the counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierAllocator {
    next: ProductId,
}

impl IdentifierAllocator {
    pub fn new() -> Self {
        Self {
            next: ProductId::FIRST,
        }
    }

    /// Issue the next id and advance the counter.
    pub fn next(&mut self) -> ProductId {
        let id = self.next;
        self.next = id.successor();
        id
    }

    /// The id the next successful allocation will return.
    ///
    /// Equivalently: one past the highest allocated id, the value the
    /// external surface exposes as the product count.
    pub fn peek(&self) -> ProductId {
        self.next
    }
}

impl Default for IdentifierAllocator {
    fn default() -> Self {
        Self::new()
    }
}
