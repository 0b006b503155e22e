use thiserror::Error;

/// Most media a post or reply may carry.
pub const MEDIA_CHUNK_SIZE: usize = 4;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("Chunk size must be positive")]
pub struct InvalidChunkSizeError;

/// Splits `items` into consecutive groups of at most `size` elements, keeping order.
///
/// An empty input yields no groups at all.
pub fn split<T: Clone>(items: &[T], size: usize) -> Result<Vec<Vec<T>>, InvalidChunkSizeError> {
    if size == 0 {
        return Err(InvalidChunkSizeError);
    }

    Ok(items.chunks(size).map(<[T]>::to_vec).collect())
}
