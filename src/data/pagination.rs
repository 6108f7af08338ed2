use serde::{Deserialize, Serialize};

use crate::data::creature::Creature;
use crate::provider::records::PokemonListRecord;

/// Position in the remote paged collection, as last reported by the provider.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageCursor {
    count: u32,
    offset: u32,
    limit: u32,
    has_next: bool,
    has_previous: bool,
}

impl PageCursor {
    /// `limit` is clamped to at least 1.
    pub fn new(count: u32, offset: u32, limit: u32, has_next: bool, has_previous: bool) -> Self {
        Self {
            count,
            offset,
            limit: limit.max(1),
            has_next,
            has_previous,
        }
    }

    /// The "no results" cursor: zero count, no links.
    pub fn empty(offset: u32, limit: u32) -> Self {
        Self::new(0, offset, limit, false, false)
    }

    pub fn from_record(record: &PokemonListRecord, offset: u32, limit: u32) -> Self {
        Self::new(
            record.count,
            offset,
            limit,
            record.next.is_some(),
            record.previous.is_some(),
        )
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn has_previous(&self) -> bool {
        self.has_previous
    }

    /// 1-based.
    pub fn current_page(&self) -> u32 {
        self.offset / self.limit + 1
    }

    pub fn total_pages(&self) -> u32 {
        self.count.div_ceil(self.limit)
    }

    /// Offset of the following page, or `None` when the provider reported none.
    pub fn next_offset(&self) -> Option<u32> {
        if self.has_next {
            Some(self.offset.saturating_add(self.limit))
        } else {
            None
        }
    }

    /// Offset of the preceding page, clamped at 0; `None` when already at 0.
    pub fn previous_offset(&self) -> Option<u32> {
        if self.offset == 0 {
            None
        } else {
            Some(self.offset.saturating_sub(self.limit))
        }
    }
}

/// One loaded page: the composed creatures plus the cursor they came with.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Page {
    pub creatures: Vec<Creature>,
    pub cursor: PageCursor,
}

impl Page {
    pub fn new(creatures: Vec<Creature>, cursor: PageCursor) -> Self {
        Self { creatures, cursor }
    }

    /// No creatures, cursor unchanged. Returned by no-op navigation.
    pub fn unchanged(cursor: &PageCursor) -> Self {
        Self {
            creatures: Vec::new(),
            cursor: cursor.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }
}
