//! Hit-test ids. Built by hashing a path of parts, so the same widget gets the same id every
//! frame without any registry.

use std::fmt;
use std::hash::Hasher;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Id(pub u64);

impl Id {
    pub const fn raw(v: u64) -> Self {
        Self(v)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:016x}", self.0)
    }
}

/// FNV-1a 64. `std`'s `DefaultHasher` makes no stability promise, so it is not used for ids.
#[derive(Clone, Copy, Debug)]
struct Fnv64(u64);

impl Fnv64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    fn new() -> Self {
        Self(Self::OFFSET_BASIS)
    }
}

impl Hasher for Fnv64 {
    fn write(&mut self, bytes: &[u8]) {
        self.0 = bytes.iter().fold(self.0, |h, &b| {
            (h ^ u64::from(b)).wrapping_mul(Self::PRIME)
        });
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug)]
pub struct IdPath {
    hasher: Fnv64,
}

impl IdPath {
    pub fn root(ns: &'static str) -> Self {
        let mut hasher = Fnv64::new();
        hasher.write(ns.as_bytes());
        Self { hasher }
    }

    pub fn push_str(self, s: &str) -> Self {
        self.push_bytes(s.as_bytes())
    }

    pub fn push_u64(self, v: u64) -> Self {
        self.push_bytes(&v.to_le_bytes())
    }

    fn push_bytes(mut self, bytes: &[u8]) -> Self {
        self.hasher.write(bytes);
        // Terminator keeps ("ab", "c") apart from ("a", "bc").
        self.hasher.write_u8(0xff);
        self
    }

    pub fn finish(self) -> Id {
        Id(self.hasher.finish())
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/id.rs"]
mod tests;
