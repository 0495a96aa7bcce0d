//! Sharded map used to accumulate relevance from many threads at once.
//!
//! Keys are spread over a fixed number of buckets, each behind its own
//! mutex, so writers touching different buckets never wait on each other.

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

pub const DEFAULT_BUCKET_COUNT: usize = 50;

pub struct ConcurrentMap<K, V> {
    buckets: Vec<Mutex<BTreeMap<K, V>>>,
}

impl<K, V> ConcurrentMap<K, V>
where
    K: Ord + Hash + Copy,
    V: Default,
{
    /// A zero bucket count is clamped to one.
    pub fn new(bucket_count: usize) -> Self {
        let buckets = (0..bucket_count.max(1)).map(|_| Mutex::new(BTreeMap::new())).collect();
        Self { buckets }
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    fn bucket_index(&self, key: &K) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() % self.buckets.len() as u64) as usize
    }

    /// Lock the owning bucket and hand out the value, inserting a default first if absent.
    /// The bucket stays locked until the returned guard is dropped.
    pub fn access(&self, key: K) -> MappedMutexGuard<'_, V> {
        let bucket = self.buckets[self.bucket_index(&key)].lock();
        MutexGuard::map(bucket, |dict| dict.entry(key).or_default())
    }

    pub fn update<R>(&self, key: K, op: impl FnOnce(&mut V) -> R) -> R {
        let mut value = self.access(key);
        op(&mut *value)
    }

    pub fn erase(&self, key: &K) -> Option<V> {
        self.buckets[self.bucket_index(key)].lock().remove(key)
    }

    /// Drain every bucket, in bucket order, into one ordered map.
    ///
    /// Only meaningful once all writers have finished; entries written
    /// concurrently with the drain may land in either map.
    pub fn build_ordinary_map(&self) -> BTreeMap<K, V> {
        let mut ordinary = BTreeMap::new();
        for bucket in &self.buckets {
            ordinary.append(&mut bucket.lock());
        }
        ordinary
    }
}

impl<K, V> Default for ConcurrentMap<K, V>
where
    K: Ord + Hash + Copy,
    V: Default,
{
    fn default() -> Self {
        Self::new(DEFAULT_BUCKET_COUNT)
    }
}
