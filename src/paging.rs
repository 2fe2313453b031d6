use tracing::debug;

use crate::client::PageClient;
use crate::error::{ParseError, Result};
use crate::transport::Transport;

/// The physical listing page fetched last.
#[derive(Debug)]
struct PageCache {
    page: u64,
    ids: Vec<String>,
}

/// Where a global listing index lives: `(page_number, offset_within_page)`.
pub fn locate(index: u64, page_size: u64) -> (u64, u64) {
    (index / page_size, index % page_size)
}

/// Lazy `(index, inscription id)` walk over `start..stop` in explorer order.
///
/// Fetches each listing page once while the index stays on it. The first
/// error is yielded and ends the walk.
pub struct Inscriptions<'a, T> {
    client: &'a PageClient<T>,
    next: u64,
    stop: u64,
    cache: Option<PageCache>,
}

impl<'a, T: Transport> Inscriptions<'a, T> {
    pub(crate) fn new(client: &'a PageClient<T>, start: u64, stop: u64) -> Self {
        Inscriptions {
            client,
            next: start,
            stop: stop.max(start),
            cache: None,
        }
    }

    fn lookup(&mut self, index: u64) -> Result<String> {
        let (page, offset) = locate(index, self.client.page_size());

        let cached = matches!(&self.cache, Some(c) if c.page == page);
        if !cached {
            debug!(page, "fetching listing page");
            let ids = self.client.inscription_page(page)?;
            self.cache = Some(PageCache { page, ids });
        }

        let ids = self.cache.as_ref().map(|c| c.ids.as_slice()).unwrap_or_default();
        let id = usize::try_from(offset).ok().and_then(|o| ids.get(o));
        id.cloned().ok_or_else(|| {
            ParseError::ShortPage {
                page,
                offset,
                found: ids.len(),
            }
            .into()
        })
    }
}

impl<T: Transport> Iterator for Inscriptions<'_, T> {
    type Item = Result<(u64, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.stop {
            return None;
        }
        let index = self.next;
        match self.lookup(index) {
            Ok(id) => {
                self.next += 1;
                Some(Ok((index, id)))
            }
            Err(e) => {
                self.next = self.stop;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.stop - self.next).unwrap_or(usize::MAX);
        (0, Some(remaining))
    }
}

impl<T: Transport> std::iter::FusedIterator for Inscriptions<'_, T> {}
