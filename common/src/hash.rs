use rustc_hash::FxHasher;
use std::hash::{BuildHasher, Hash, Hasher};

#[inline]
pub fn hash_u64<T>(obj: T) -> u64
where
    T: Hash,
{
    let mut hasher = FxHasher::default();
    obj.hash(&mut hasher);
    hasher.finish()
}

pub type FastMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// Map for keys that are already hashes, like prototype ids.
pub type TransparentMap<K, V> = std::collections::HashMap<K, V, TransparentHasherU64>;

#[derive(Default)]
pub struct TransparentHasherU64(u64);

impl Hasher for TransparentHasherU64 {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, _: &[u8]) {
        panic!("can only use u64 for transparenthasher")
    }

    fn write_u64(&mut self, i: u64) {
        self.0 = i;
    }
}

impl BuildHasher for TransparentHasherU64 {
    type Hasher = TransparentHasherU64;

    fn build_hasher(&self) -> Self::Hasher {
        TransparentHasherU64(self.0)
    }
}
