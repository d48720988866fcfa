use chacha20::ChaCha20;
use chacha20::cipher::{KeyIvInit, StreamCipher};
use rand::RngCore;
use rand::rngs::OsRng;
use zeroize::Zeroizing;

pub const SEED_LEN: usize = 32;

const BUFFER_LEN: usize = 1024;

/// Source of uniformly distributed indices.
pub trait RandomSource {
    /// Returns an index in `0..bound`. `bound` must be non-zero.
    fn next_index(&mut self, bound: usize) -> usize;
}

/// ChaCha20 keystream sampled with rejection so every index is equally likely.
pub struct KeystreamSource {
    cipher: ChaCha20,
    buffer: Zeroizing<Vec<u8>>,
    pos: usize,
}

impl KeystreamSource {
    pub fn from_seed(seed: &[u8; SEED_LEN]) -> Self {
        let mut cipher = ChaCha20::new(seed.into(), &[0u8; 12].into());

        let mut buffer = Zeroizing::new(vec![0u8; BUFFER_LEN]);
        cipher.apply_keystream(&mut buffer);

        Self {
            cipher,
            buffer,
            pos: 0,
        }
    }

    pub fn from_entropy() -> Self {
        let mut seed = Zeroizing::new([0u8; SEED_LEN]);
        OsRng.fill_bytes(&mut seed[..]);
        Self::from_seed(&seed)
    }

    fn refill(&mut self) {
        self.buffer.fill(0);
        self.cipher.apply_keystream(&mut self.buffer);
        self.pos = 0;
    }

    fn next_byte(&mut self) -> u8 {
        if self.pos >= self.buffer.len() {
            self.refill();
        }

        let byte = self.buffer[self.pos];
        self.pos += 1;
        byte
    }

    fn next_u32(&mut self) -> u32 {
        if self.pos + 3 >= self.buffer.len() {
            self.refill();
        }

        let value = u32::from_le_bytes([
            self.buffer[self.pos],
            self.buffer[self.pos + 1],
            self.buffer[self.pos + 2],
            self.buffer[self.pos + 3],
        ]);
        self.pos += 4;
        value
    }
}

impl RandomSource for KeystreamSource {
    fn next_index(&mut self, bound: usize) -> usize {
        assert!(bound > 0, "bound must be non-zero");

        if bound <= 256 {
            let rejection_threshold = 256 - (256 % bound);
            loop {
                let random_byte = self.next_byte() as usize;
                if random_byte < rejection_threshold {
                    return random_byte % bound;
                }
            }
        }

        let bound = bound as u64;
        assert!(bound <= 1 << 32, "bound must fit in 32 bits");
        let rejection_threshold = (1u64 << 32) - ((1u64 << 32) % bound);
        loop {
            let random_u32 = u64::from(self.next_u32());
            if random_u32 < rejection_threshold {
                return (random_u32 % bound) as usize;
            }
        }
    }
}
