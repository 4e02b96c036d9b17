//! Block partitioning
//!
//! Splits a channel into 8x8 blocks in row-major band order (left to right,
//! then top to bottom) and lays them back out again. Dimensions must be exact
//! multiples of 8 unless the caller opts into [`PaddingPolicy::EdgeReplicate`].

use crate::consts::{DCTSIZE, DCTSIZE2};
use crate::error::Error;
use crate::types::{Block, Channel};
use crate::Result;

/// How to handle dimensions that are not a multiple of the block size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaddingPolicy {
    /// Reject the input with [`Error::ShapeMismatch`]
    #[default]
    Strict,
    /// Repeat the last row and column out to the next multiple of 8,
    /// and crop them off again on decode
    EdgeReplicate,
}

/// Round a dimension up to a whole number of blocks, `None` if that overflows.
#[inline]
pub fn padded_dim(dim: usize) -> Option<usize> {
    dim.div_ceil(DCTSIZE).checked_mul(DCTSIZE)
}

/// (height, width) rounded up to whole blocks, saturating at `usize::MAX`.
/// Only for error reporting.
pub(crate) fn padded_shape(height: usize, width: usize) -> (usize, usize) {
    (
        padded_dim(height).unwrap_or(usize::MAX),
        padded_dim(width).unwrap_or(usize::MAX),
    )
}

/// Number of (block rows, block columns) covering a `height` x `width` plane.
#[inline]
pub fn block_grid(height: usize, width: usize) -> (usize, usize) {
    (height.div_ceil(DCTSIZE), width.div_ceil(DCTSIZE))
}

/// Blocks per plane for a `height` x `width` shape.
///
/// Fails with [`Error::ShapeMismatch`] when the padded plane would hold more
/// than `usize::MAX` samples, so callers can multiply block rows, columns and
/// `DCTSIZE` freely afterwards.
pub fn block_count(height: usize, width: usize) -> Result<usize> {
    let (rows, cols) = block_grid(height, width);
    rows.checked_mul(cols)
        .filter(|n| n.checked_mul(DCTSIZE2).is_some())
        .ok_or(Error::ShapeMismatch {
            expected: (rows, cols),
            actual: (height, width),
            reason: "block grid for the declared shape overflows usize",
        })
}

fn check_block_multiple(height: usize, width: usize) -> Result<()> {
    if height % DCTSIZE != 0 || width % DCTSIZE != 0 {
        return Err(Error::ShapeMismatch {
            expected: padded_shape(height, width),
            actual: (height, width),
            reason: "dimensions must be multiples of the 8x8 block size",
        });
    }
    Ok(())
}

/// Cut a channel into 8x8 blocks, row-band by row-band.
pub fn split(channel: &Channel) -> Result<Vec<Block>> {
    let (height, width) = channel.shape();
    check_block_multiple(height, width)?;

    let (rows, cols) = (height / DCTSIZE, width / DCTSIZE);
    let data = channel.data();
    let mut blocks = Vec::with_capacity(rows * cols);

    for by in 0..rows {
        for bx in 0..cols {
            let mut values = [0.0f64; DCTSIZE2];
            for y in 0..DCTSIZE {
                let src = (by * DCTSIZE + y) * width + bx * DCTSIZE;
                values[y * DCTSIZE..(y + 1) * DCTSIZE]
                    .copy_from_slice(&data[src..src + DCTSIZE]);
            }
            blocks.push(Block::new(by, bx, values));
        }
    }

    Ok(blocks)
}

/// Reassemble blocks produced by [`split`] into a `height` x `width` channel.
///
/// Blocks are placed by their index in the slice, in the same row-major
/// order `split` emits them.
pub fn combine(blocks: &[Block], height: usize, width: usize) -> Result<Channel> {
    check_block_multiple(height, width)?;

    let count = block_count(height, width)?;
    let cols = width / DCTSIZE;
    if blocks.len() != count {
        return Err(Error::ShapeMismatch {
            expected: (count, 1),
            actual: (blocks.len(), 1),
            reason: "block count does not match the declared shape",
        });
    }

    let mut data = vec![0.0f64; count * DCTSIZE2];
    for (i, block) in blocks.iter().enumerate() {
        let (by, bx) = (i / cols, i % cols);
        for y in 0..DCTSIZE {
            let dst = (by * DCTSIZE + y) * width + bx * DCTSIZE;
            data[dst..dst + DCTSIZE].copy_from_slice(&block.data[y * DCTSIZE..(y + 1) * DCTSIZE]);
        }
    }

    Ok(Channel::from_parts(width, height, data))
}

/// Extend a channel to whole blocks by repeating its last row and column.
///
/// Returns the channel unchanged when it already fits.
pub fn pad_to_block_multiple(channel: &Channel) -> Result<Channel> {
    let (height, width) = channel.shape();
    if height == 0 || width == 0 {
        return Ok(channel.clone());
    }
    block_count(height, width)?;
    let (rows, cols) = block_grid(height, width);
    let (ph, pw) = (rows * DCTSIZE, cols * DCTSIZE);
    if (ph, pw) == (height, width) {
        return Ok(channel.clone());
    }

    let mut data = Vec::with_capacity(ph * pw);
    for y in 0..ph {
        let row = &channel.data()[y.min(height - 1) * width..][..width];
        data.extend_from_slice(row);
        let last = row[width - 1];
        data.extend(std::iter::repeat(last).take(pw - width));
    }

    Ok(Channel::from_parts(pw, ph, data))
}

/// Run `f` over every item, in parallel when enabled, keeping input order.
pub(crate) fn map_blocks<T, U, F>(items: &[T], parallel: bool, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    if parallel {
        use rayon::prelude::*;
        return items.par_iter().map(f).collect();
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    items.iter().map(f).collect()
}

/// Keep the top-left `height` x `width` region of a channel.
pub fn crop(channel: &Channel, height: usize, width: usize) -> Result<Channel> {
    let (ch, cw) = channel.shape();
    if height > ch || width > cw {
        return Err(Error::ShapeMismatch {
            expected: (ch, cw),
            actual: (height, width),
            reason: "crop region exceeds channel bounds",
        });
    }
    if (height, width) == (ch, cw) {
        return Ok(channel.clone());
    }

    let data = channel
        .data()
        .chunks_exact(cw)
        .take(height)
        .flat_map(|row| row[..width].iter().copied())
        .collect();
    Ok(Channel::from_parts(width, height, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(width: usize, height: usize) -> Channel {
        let data = (0..width * height).map(|v| v as f64).collect();
        Channel::new(width, height, data).unwrap()
    }

    #[test]
    fn test_split_order_and_positions() {
        let ch = ramp(16, 16);
        let blocks = split(&ch).unwrap();
        assert_eq!(blocks.len(), 4);

        // Row-major over block bands: (0,0), (0,1), (1,0), (1,1)
        let positions: Vec<_> = blocks.iter().map(|b| (b.row, b.col)).collect();
        assert_eq!(positions, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);

        // Top-left sample of block (0,1) is pixel (row 0, col 8)
        assert_eq!(blocks[1].get(0, 0), 8.0);
        // Top-left sample of block (1,0) is pixel (row 8, col 0)
        assert_eq!(blocks[2].get(0, 0), 128.0);
        assert_eq!(blocks[3].get(7, 7), 255.0);
    }

    #[test]
    fn test_split_combine_identity() {
        let ch = ramp(24, 16);
        let blocks = split(&ch).unwrap();
        let back = combine(&blocks, 16, 24).unwrap();
        assert_eq!(back, ch);
    }

    #[test]
    fn test_split_rejects_partial_blocks() {
        let ch = ramp(10, 10);
        let err = split(&ch).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_combine_rejects_wrong_count() {
        let blocks = split(&ramp(16, 8)).unwrap();
        assert!(matches!(
            combine(&blocks, 16, 16),
            Err(Error::ShapeMismatch { .. })
        ));
        assert!(matches!(
            combine(&blocks, 8, 12),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_pad_replicates_edges_and_crop_restores() {
        let ch = ramp(10, 9);
        let padded = pad_to_block_multiple(&ch).unwrap();
        assert_eq!(padded.shape(), (16, 16));
        // Right edge repeats column 9
        assert_eq!(padded.get(0, 15), ch.get(0, 9));
        // Bottom edge repeats row 8
        assert_eq!(padded.get(15, 3), ch.get(8, 3));
        assert_eq!(padded.get(15, 15), ch.get(8, 9));

        let cropped = crop(&padded, 9, 10).unwrap();
        assert_eq!(cropped, ch);
    }

    #[test]
    fn test_block_grid() {
        assert_eq!(block_grid(16, 24), (2, 3));
        assert_eq!(block_grid(10, 1), (2, 1));
        assert_eq!(padded_dim(8), Some(8));
        assert_eq!(padded_dim(9), Some(16));
        assert_eq!(padded_dim(usize::MAX), None);
        assert_eq!(block_count(16, 24), Ok(6));
    }

    #[test]
    fn test_oversized_grid_is_shape_mismatch() {
        assert!(matches!(
            block_count(usize::MAX, 16),
            Err(Error::ShapeMismatch { .. })
        ));
        // Block multiples, but the padded plane holds more than usize::MAX samples
        let huge = 1usize << (usize::BITS / 2 + 2);
        assert!(matches!(
            combine(&[], huge, huge),
            Err(Error::ShapeMismatch { .. })
        ));
        assert!(matches!(
            combine(&[], usize::MAX, 8),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_map_blocks_keeps_order() {
        let items: Vec<usize> = (0..500).collect();
        let seq = map_blocks(&items, false, |v| v * 2);
        let par = map_blocks(&items, true, |v| v * 2);
        assert_eq!(seq, par);
        assert_eq!(par[499], 998);
    }
}
