//! Core identifiers and bit-level membership state.
//!
//! This module defines the **fundamental types, identifiers, and bitset
//! layout** shared across the runtime: entity identification, processing-unit
//! identification, and the fixed-width bitmask used to answer "which units
//! currently claim this entity" in O(words) time.
//!
//! ## Design Philosophy
//!
//! The runtime is designed around:
//!
//! - **Stable numeric identifiers** for entities and units,
//! - **Bitset-based membership** so interest checks are bitwise AND tests,
//! - **Centrally allocated bit indices** owned by the world, never by a
//!   process-wide static.
//!
//! ## Membership Representation
//!
//! Every entity carries a [`SystemBits`] value. Each processing unit is
//! assigned one [`SystemBit`] at registration time; the unit is a *member* of
//! an entity exactly when that bit is set in the entity's mask. Bit widths
//! are fixed at compile time and validated with static assertions.

/// Globally unique entity identifier, allocated monotonically per world.
pub type EntityId = u64;
/// Unique identifier for a processing unit within one world.
pub type SystemId = u16;

/// Maximum number of processing units one world may register.
pub const SYSTEM_CAP: usize = 1024;
/// Number of `u64` words required to represent a full membership mask.
pub const SYSTEM_BITS_WORDS: usize = (SYSTEM_CAP + 63) / 64;

const _: [(); 1] = [(); (SYSTEM_CAP > 0) as usize];
const _: [(); 1] = [(); (SYSTEM_BITS_WORDS * 64 >= SYSTEM_CAP) as usize];

/// One allocated membership bit identifying a processing unit.
///
/// ## Invariants
/// - The wrapped index is `< SYSTEM_CAP`.
/// - Bits are allocated centrally by the world and never reused while the
///   world is alive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SystemBit(pub(crate) u16);

impl SystemBit {
    /// Returns the raw bit index in `[0, SYSTEM_CAP)`.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Bitset recording which processing units currently claim an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SystemBits {
    /// Packed membership bitset.
    pub words: [u64; SYSTEM_BITS_WORDS],
}

impl Default for SystemBits {
    fn default() -> Self {
        Self {
            words: [0u64; SYSTEM_BITS_WORDS],
        }
    }
}

impl SystemBits {
    /// Sets the bit for `bit`.
    #[inline]
    pub fn set(&mut self, bit: SystemBit) {
        let index = bit.index() / 64;
        let offset = bit.index() % 64;
        self.words[index] |= 1u64 << offset;
    }

    /// Clears the bit for `bit`.
    #[inline]
    pub fn clear(&mut self, bit: SystemBit) {
        let index = bit.index() / 64;
        let offset = bit.index() % 64;
        self.words[index] &= !(1u64 << offset);
    }

    /// Returns `true` if the bit for `bit` is set.
    #[inline]
    pub fn has(&self, bit: SystemBit) -> bool {
        let index = bit.index() / 64;
        let offset = bit.index() % 64;
        (self.words[index] >> offset) & 1 == 1
    }

    /// Returns `true` if every bit set in `other` is also set here.
    #[inline]
    pub fn contains_all(&self, other: &SystemBits) -> bool {
        for (word_a, word_b) in self.words.iter().zip(other.words.iter()) {
            if (word_a & word_b) != *word_b {
                return false;
            }
        }
        true
    }

    /// Returns `true` if no bit is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&word| word == 0)
    }

    /// Iterates over all set bit indices, ascending.
    pub fn iterate_over_bits(&self) -> impl Iterator<Item = usize> + '_ {
        self.words
            .iter()
            .enumerate()
            .flat_map(|(word_index, &word)| {
                let base = word_index * 64;
                let mut bits = word;
                std::iter::from_fn(move || {
                    if bits == 0 {
                        return None;
                    }
                    let tz = bits.trailing_zeros() as usize;
                    bits &= bits - 1;
                    Some(base + tz)
                })
            })
    }
}
