use crate::data::pagination::{Page, PageCursor};
use crate::service::CreatureService;

/// One user's walk through the paged collection.
pub struct BrowseSession {
    service: CreatureService,
    page_size: u32,
    cursor: PageCursor,
}

impl BrowseSession {
    pub fn new(service: CreatureService, page_size: u32) -> Self {
        let page_size = page_size.max(1);
        Self {
            service,
            page_size,
            cursor: PageCursor::empty(0, page_size),
        }
    }

    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Loads the page at `offset`, or at the current offset when `None`, and
    /// replaces the cursor with what the provider reported.
    pub async fn load_page(&mut self, offset: Option<u32>) -> Page {
        let offset = offset.unwrap_or_else(|| self.cursor.offset());
        let page = self.service.compose_page(offset, self.page_size).await;
        self.cursor = page.cursor.clone();
        page
    }

    /// No-op (empty page, same cursor) when there is no next page.
    pub async fn next_page(&mut self) -> Page {
        match self.cursor.next_offset() {
            Some(offset) => self.load_page(Some(offset)).await,
            None => Page::unchanged(&self.cursor),
        }
    }

    /// No-op (empty page, same cursor) at offset 0.
    pub async fn previous_page(&mut self) -> Page {
        match self.cursor.previous_offset() {
            Some(offset) => self.load_page(Some(offset)).await,
            None => Page::unchanged(&self.cursor),
        }
    }
}
