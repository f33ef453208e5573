//! 16-byte cache of one 128-bit hardware output.
//!
//! `pos == 0` means empty. A refill replaces all 16 bytes at once and bytes
//! are handed out from index 0 upward, so every refilled word is consumed in
//! full before the next refill.

pub const FIFO_BYTES: usize = 16;

#[derive(Debug, Default)]
pub struct Fifo {
    bytes: [u8; FIFO_BYTES],
    pos: usize,
}

impl Fifo {
    pub const fn new() -> Self {
        Fifo {
            bytes: [0; FIFO_BYTES],
            pos: 0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    /// Cursor of the next byte to hand out
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Store a fresh 128-bit word, words in order, each little-endian
    pub fn refill(&mut self, words: [u32; 4]) {
        for (chunk, word) in self.bytes.chunks_exact_mut(4).zip(words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
    }

    /// Hand out the byte at the cursor and advance, wrapping at 16
    pub fn take(&mut self) -> u8 {
        let byte = self.bytes[self.pos];
        self.pos = (self.pos + 1) % FIFO_BYTES;
        byte
    }

    /// Drop whatever is left; the next byte forces a refill
    pub fn invalidate(&mut self) {
        self.pos = 0;
    }
}
