//! MurmurHash3 (x86, 32-bit).
//!
//! Bucket assignment depends on every bit of this output, so the mixing
//! sequence must stay identical to the reference implementation.

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;
const COMBINE: u32 = 0xe654_6b64;

/// Hash `data` with MurmurHash3 x86_32.
pub fn murmur3_32(data: &[u8], seed: u32) -> u32 {
    let mut h1 = seed;

    let mut blocks = data.chunks_exact(4);
    for block in &mut blocks {
        let k1 = u32::from_le_bytes([block[0], block[1], block[2], block[3]]);
        h1 ^= mix_k1(k1);
        h1 = h1.rotate_left(13);
        h1 = h1.wrapping_mul(5).wrapping_add(COMBINE);
    }

    let tail = blocks.remainder();
    if !tail.is_empty() {
        let mut k1 = 0u32;
        if tail.len() == 3 {
            k1 ^= u32::from(tail[2]) << 16;
        }
        if tail.len() >= 2 {
            k1 ^= u32::from(tail[1]) << 8;
        }
        k1 ^= u32::from(tail[0]);
        h1 ^= mix_k1(k1);
    }

    // Length is folded in modulo 2^32, same as the reference.
    h1 ^= data.len() as u32;
    fmix32(h1)
}

/// Hash the UTF-8 bytes of `text` with seed 0.
pub fn murmur3_32_str(text: &str) -> u32 {
    murmur3_32(text.as_bytes(), 0)
}

fn mix_k1(k1: u32) -> u32 {
    k1.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2)
}

fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}
