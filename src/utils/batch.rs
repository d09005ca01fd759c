use crate::utils::error::{Result, SteamWebApiError};

/// Iterator returned by [`as_chunks`].
#[derive(Debug, Clone)]
pub struct Chunks<I> {
    inner: I,
    size: usize,
}

impl<I: Iterator> Iterator for Chunks<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let batch: Vec<_> = self.inner.by_ref().take(self.size).collect();
        if batch.is_empty() {
            None
        } else {
            Some(batch)
        }
    }
}

/// Batches `iterable` into vectors of up to `n` items. The last batch may be short.
pub fn as_chunks<I: IntoIterator>(iterable: I, n: usize) -> Result<Chunks<I::IntoIter>> {
    if n < 1 {
        return Err(SteamWebApiError::Validation {
            message: "n must be at least one".to_string(),
        });
    }
    Ok(Chunks {
        inner: iterable.into_iter(),
        size: n,
    })
}
