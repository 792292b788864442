use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::config::Config;
use crate::config::ConfigError;

const LIVE_NODE: &str = "occupied entry must point at a live node";

type Link<V> = Option<Box<Node<V>>>;

/// One element of a bucket chain.
///
/// The hash is computed by the caller once, at insertion, and reused for every
/// later rehash.
struct Node<V> {
    hash: u64,
    value: V,
    next: Link<V>,
}

/// Maps a hash onto a bucket.
///
/// The hash is reduced as an unsigned 64-bit value, so every bit pattern
/// (including `1 << 63`) lands in `0..buckets`.
#[inline(always)]
fn bucket_index(hash: u64, buckets: usize) -> usize {
    (hash % buckets as u64) as usize
}

fn empty_buckets<V>(len: usize) -> Box<[Link<V>]> {
    let mut buckets = Vec::with_capacity(len);
    buckets.resize_with(len, || None);
    buckets.into_boxed_slice()
}

/// Appends `node` behind the last node of the chain rooted at `slot`.
fn link_tail<V>(mut slot: &mut Link<V>, node: Box<Node<V>>) -> &mut Node<V> {
    while let Some(existing) = slot {
        slot = &mut existing.next;
    }
    slot.insert(node)
}

/// Drops a chain node by node instead of recursively through `Box`.
fn free_chain<V>(mut link: Link<V>) {
    while let Some(mut node) = link {
        link = node.next.take();
    }
}

/// Debug statistics for hash table analysis.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of elements currently in the table
    pub populated: usize,
    /// Length of the bucket array
    pub buckets: usize,
    /// Number of buckets holding at least one element
    pub occupied_buckets: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// Current ratio of elements to buckets
    pub load_factor: f64,
    /// Ratio of occupied buckets to all buckets
    pub bucket_utilization: f64,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Debug Statistics ===");
        println!(
            "Population: {}/{} buckets ({:.2}% load factor)",
            self.populated,
            self.buckets,
            self.load_factor * 100.0
        );
        println!(
            "Bucket Usage: {}/{} ({:.2}% utilization)",
            self.occupied_buckets,
            self.buckets,
            self.bucket_utilization * 100.0
        );
        println!("Longest chain: {}", self.longest_chain);
    }
}

/// A hash table using separate chaining.
///
/// `HashTable<V>` stores values of type `V` in a bucket array where every
/// bucket owns a singly linked chain. Like other raw tables, it requires you to
/// provide both the hash value and an equality predicate for each operation;
/// [`HashMap`](crate::HashMap) and [`HashSet`](crate::HashSet) do that for
/// you.
///
/// The table doubles its bucket array as soon as the number of elements
/// exceeds `capacity * load_factor`. It never shrinks.
///
/// The table is not synchronized. Callers that share it between threads must
/// wrap the whole table in their own lock.
///
/// ## Example
///
/// ```rust
/// use chain_hash::hash_table::Entry;
/// use chain_hash::hash_table::HashTable;
///
/// #[derive(Debug, PartialEq)]
/// struct Person {
///     id: u64,
///     name: String,
/// }
///
/// let mut table = HashTable::new();
/// let hash = 123;
///
/// match table.entry(hash, |p: &Person| p.id == 123) {
///     Entry::Vacant(entry) => {
///         entry.insert(Person {
///             id: 123,
///             name: "Alice".to_string(),
///         });
///     }
///     Entry::Occupied(_) => {
///         println!("Person already exists");
///     }
/// }
/// assert_eq!(table.len(), 1);
/// ```
pub struct HashTable<V> {
    buckets: Box<[Link<V>]>,
    populated: usize,
    load_factor: f32,
    initial_capacity: usize,
}

impl<V> Debug for HashTable<V>
where
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let chains = self
            .buckets
            .iter()
            .enumerate()
            .filter(|(_, head)| head.is_some())
            .map(|(index, head)| {
                let mut chain = Vec::new();
                let mut link = head.as_deref();
                while let Some(node) = link {
                    chain.push(&node.value);
                    link = node.next.as_deref();
                }
                (index, chain)
            })
            .collect::<Vec<_>>();

        f.debug_struct("HashTable")
            .field("populated", &self.populated)
            .field("capacity", &self.buckets.len())
            .field("load_factor", &self.load_factor)
            .field("chains", &chains)
            .finish()
    }
}

impl<V> Clone for HashTable<V>
where
    V: Clone,
{
    fn clone(&self) -> Self {
        let mut buckets = empty_buckets(self.buckets.len());

        for (source, target) in self.buckets.iter().zip(buckets.iter_mut()) {
            let mut slot = target;
            let mut link = source.as_deref();
            while let Some(node) = link {
                let copy = slot.insert(Box::new(Node {
                    hash: node.hash,
                    value: node.value.clone(),
                    next: None,
                }));
                slot = &mut copy.next;
                link = node.next.as_deref();
            }
        }

        Self {
            buckets,
            populated: self.populated,
            load_factor: self.load_factor,
            initial_capacity: self.initial_capacity,
        }
    }
}

impl<V> Drop for HashTable<V> {
    fn drop(&mut self) {
        for head in self.buckets.iter_mut() {
            free_chain(head.take());
        }
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> HashTable<V> {
    /// Creates an empty table with 16 buckets and a load factor of 0.75.
    pub fn new() -> Self {
        Self::from_valid_config(Config::default())
    }

    /// Creates an empty table with `capacity` buckets and the default load
    /// factor.
    ///
    /// A capacity of zero is rounded up to a single bucket.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let table: HashTable<String> = HashTable::with_capacity(100);
    /// assert_eq!(table.capacity(), 100);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_valid_config(Config::default().with_initial_capacity(capacity.max(1)))
    }

    /// Creates an empty table from explicit construction options.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the options fail
    /// [`Config::validate`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::Config;
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let config = Config::default().with_initial_capacity(4).with_load_factor(0.5);
    /// let table: HashTable<u64> = HashTable::with_config(config).unwrap();
    /// assert_eq!(table.capacity(), 4);
    /// assert_eq!(table.load_factor(), 0.5);
    ///
    /// assert!(HashTable::<u64>::with_config(Config::default().with_load_factor(0.0)).is_err());
    /// ```
    pub fn with_config(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: Config) -> Self {
        Self {
            buckets: empty_buckets(config.initial_capacity()),
            populated: 0,
            load_factor: config.load_factor(),
            initial_capacity: config.initial_capacity(),
        }
    }

    /// Returns the number of elements in the table.
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns `true` if the table contains no elements.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Returns the length of the bucket array.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the configured load-factor threshold.
    pub fn load_factor(&self) -> f32 {
        self.load_factor
    }

    /// Returns the bucket count the table was created with, which is also the
    /// bucket count restored by [`clear`](Self::clear).
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Removes all elements and replaces the bucket array with a fresh one of
    /// the initial capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(2);
    /// for n in 0..10u64 {
    ///     table.entry(n, |&v: &u64| v == n).or_insert(n);
    /// }
    /// assert!(table.capacity() > 2);
    ///
    /// table.clear();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), 2);
    /// ```
    pub fn clear(&mut self) {
        let old = core::mem::replace(&mut self.buckets, empty_buckets(self.initial_capacity));
        for head in old.into_vec() {
            free_chain(head);
        }
        self.populated = 0;

        #[cfg(feature = "tracing")]
        tracing::trace!(capacity = self.initial_capacity, "cleared hash table");
    }

    /// Returns a reference to the first value in the chain for `hash` that
    /// satisfies `eq`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.entry(7, |&n: &u64| n == 7).or_insert(7);
    ///
    /// assert_eq!(table.find(7, |&n| n == 7), Some(&7));
    /// assert_eq!(table.find(8, |&n| n == 8), None);
    /// ```
    pub fn find(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&V> {
        let mut link = self.buckets[bucket_index(hash, self.buckets.len())].as_deref();
        while let Some(node) = link {
            if node.hash == hash && eq(&node.value) {
                return Some(&node.value);
            }
            link = node.next.as_deref();
        }
        None
    }

    /// Returns a mutable reference to the first value in the chain for `hash`
    /// that satisfies `eq`.
    pub fn find_mut(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&mut V> {
        let index = bucket_index(hash, self.buckets.len());
        let mut link = self.buckets[index].as_deref_mut();
        while let Some(node) = link {
            if node.hash == hash && eq(&node.value) {
                return Some(&mut node.value);
            }
            link = node.next.as_deref_mut();
        }
        None
    }

    /// Gets an entry for the given hash and equality predicate.
    ///
    /// Scanning stops at the first matching value, so a table filled only
    /// through this method never holds two values the predicate considers
    /// equal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::Entry;
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// let hash = 99;
    ///
    /// match table.entry(hash, |s: &String| s == "hello") {
    ///     Entry::Vacant(entry) => {
    ///         entry.insert("hello".to_string());
    ///     }
    ///     Entry::Occupied(mut entry) => {
    ///         *entry.get_mut() = "updated".to_string();
    ///     }
    /// }
    ///
    /// table
    ///     .entry(hash, |s: &String| s == "hello")
    ///     .or_insert("ignored".to_string());
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn entry(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Entry<'_, V> {
        match self.locate(hash, eq) {
            Some((bucket, depth)) => Entry::Occupied(OccupiedEntry {
                table: self,
                bucket,
                depth,
            }),
            None => Entry::Vacant(VacantEntry { table: self, hash }),
        }
    }

    /// Removes and returns the first value in the chain for `hash` that
    /// satisfies `eq`.
    ///
    /// The bucket array is left untouched; removal never shrinks the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.entry(42, |&n: &u64| n == 42).or_insert(42);
    ///
    /// assert_eq!(table.remove(42, |&n| n == 42), Some(42));
    /// assert!(table.is_empty());
    /// assert_eq!(table.remove(99, |&n| n == 99), None);
    /// ```
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<V> {
        let index = bucket_index(hash, self.buckets.len());
        let mut slot = &mut self.buckets[index];
        while slot
            .as_deref()
            .is_some_and(|node| node.hash != hash || !eq(&node.value))
        {
            slot = &mut slot.as_mut()?.next;
        }

        let mut removed = slot.take()?;
        *slot = removed.next.take();
        self.populated -= 1;
        Some(removed.value)
    }

    /// Keeps only the values for which `f` returns `true`.
    pub fn retain(&mut self, mut f: impl FnMut(&mut V) -> bool) {
        let mut removed = 0;
        for head in self.buckets.iter_mut() {
            let mut slot = head;
            loop {
                let keep = match slot.as_deref_mut() {
                    Some(node) => f(&mut node.value),
                    None => break,
                };

                if keep {
                    match slot {
                        Some(node) => slot = &mut node.next,
                        None => break,
                    }
                } else if let Some(mut node) = slot.take() {
                    *slot = node.next.take();
                    removed += 1;
                }
            }
        }
        self.populated -= removed;
    }

    /// Returns an iterator over all values in the table.
    ///
    /// Values are yielded bucket by bucket and, within a bucket, in chain
    /// order. That order is not part of the contract.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            buckets: self.buckets.iter(),
            node: None,
            remaining: self.populated,
        }
    }

    /// Returns an iterator yielding mutable references to all values.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            remaining: self.populated,
            buckets: self.buckets.iter_mut(),
            node: None,
        }
    }

    /// Returns an iterator that removes and yields all values from the table.
    ///
    /// The bucket array keeps its current length.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.entry(1, |&n: &u64| n == 1).or_insert(1);
    /// table.entry(2, |&n: &u64| n == 2).or_insert(2);
    ///
    /// let mut values: Vec<u64> = table.drain().collect();
    /// values.sort();
    /// assert_eq!(values, [1, 2]);
    /// assert!(table.is_empty());
    /// ```
    pub fn drain(&mut self) -> Drain<'_, V> {
        Drain {
            table: self,
            bucket_index: 0,
            chain: None,
        }
    }

    /// Finds the bucket and chain depth of the first value matching `eq`.
    fn locate(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<(usize, usize)> {
        let bucket = bucket_index(hash, self.buckets.len());
        let mut link = self.buckets[bucket].as_deref();
        let mut depth = 0;
        while let Some(node) = link {
            if node.hash == hash && eq(&node.value) {
                return Some((bucket, depth));
            }
            link = node.next.as_deref();
            depth += 1;
        }
        None
    }

    fn node_at(&self, bucket: usize, depth: usize) -> Option<&Node<V>> {
        let mut node = self.buckets[bucket].as_deref()?;
        for _ in 0..depth {
            node = node.next.as_deref()?;
        }
        Some(node)
    }

    fn node_at_mut(&mut self, bucket: usize, depth: usize) -> Option<&mut Node<V>> {
        let mut node = self.buckets[bucket].as_deref_mut()?;
        for _ in 0..depth {
            node = node.next.as_deref_mut()?;
        }
        Some(node)
    }

    fn unlink(&mut self, bucket: usize, depth: usize) -> Option<V> {
        let mut slot = &mut self.buckets[bucket];
        for _ in 0..depth {
            slot = &mut slot.as_mut()?.next;
        }

        let mut removed = slot.take()?;
        *slot = removed.next.take();
        self.populated -= 1;
        Some(removed.value)
    }

    #[inline]
    fn exceeds_load_factor(&self, len: usize) -> bool {
        (self.buckets.len() as f64) * (self.load_factor as f64) < len as f64
    }

    /// Doubles the bucket array and relinks every node by its cached hash.
    #[cold]
    fn grow(&mut self) {
        let old_capacity = self.buckets.len();
        let new_capacity = old_capacity.checked_mul(2).expect("capacity overflow");

        let old = core::mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        for mut link in old.into_vec() {
            while let Some(mut node) = link {
                link = node.next.take();
                let index = bucket_index(node.hash, new_capacity);
                link_tail(&mut self.buckets[index], node);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            from = old_capacity,
            to = new_capacity,
            len = self.populated,
            "grew bucket array"
        );
    }

    /// Computes a histogram of chain lengths for the current table state.
    ///
    /// Index `n` of the result holds the number of buckets whose chain has
    /// exactly `n` elements, so index 0 counts empty buckets.
    #[cfg(any(test, feature = "stats"))]
    pub fn chain_histogram(&self) -> Vec<usize> {
        let mut hist = alloc::vec![0usize; 1];
        for head in self.buckets.iter() {
            let mut length = 0;
            let mut link = head.as_deref();
            while let Some(node) = link {
                length += 1;
                link = node.next.as_deref();
            }
            if hist.len() <= length {
                hist.resize(length + 1, 0);
            }
            hist[length] += 1;
        }
        hist
    }

    /// Returns occupancy statistics for debugging.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats {
        let hist = self.chain_histogram();
        let buckets = self.buckets.len();
        let occupied_buckets = buckets - hist[0];

        DebugStats {
            populated: self.populated,
            buckets,
            occupied_buckets,
            longest_chain: hist.len() - 1,
            load_factor: self.populated as f64 / buckets as f64,
            bucket_utilization: occupied_buckets as f64 / buckets as f64,
        }
    }

    /// Pretty-prints the chain-length histogram horizontally using stdout.
    #[cfg(all(any(test, feature = "stats"), feature = "std"))]
    pub fn print_chain_histogram(&self) {
        let hist = self.chain_histogram();
        let max = *hist.iter().max().unwrap_or(&0);
        if max == 0 {
            println!("chain histogram: empty");
            return;
        }

        let max_bar = 60usize;
        println!(
            "chain histogram ({} entries, {} buckets):",
            self.populated,
            self.buckets.len()
        );
        for (length, &count) in hist.iter().enumerate() {
            let width = (count * max_bar).div_ceil(max);
            println!("{:>3} | {} ({})", length, "█".repeat(width), count);
        }
    }
}

/// A view into a single entry in the hash table, which may be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`HashTable`].
///
/// [`entry`]: HashTable::entry
pub enum Entry<'a, V> {
    /// A vacant entry - no value in the table matched
    Vacant(VacantEntry<'a, V>),
    /// An occupied entry - a matching value is present in the table
    Occupied(OccupiedEntry<'a, V>),
}

impl<'a, V> Entry<'a, V> {
    /// Inserts `default` if the entry is vacant and returns a mutable
    /// reference to the stored value.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts a value computed from a closure if the entry is vacant and
    /// returns a mutable reference to the stored value.
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    ///
    /// let value = table
    ///     .entry(5, |s: &String| s == "key")
    ///     .or_insert_with(|| "key".to_string());
    /// assert_eq!(value, "key");
    ///
    /// // The closure is not called for an occupied entry.
    /// let existing = table
    ///     .entry(5, |s: &String| s == "key")
    ///     .or_insert_with(|| panic!("should not be called"));
    /// assert_eq!(existing, "key");
    /// ```
    pub fn or_insert_with(self, default: impl FnOnce() -> V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Applies `f` to an occupied entry's value and returns it, or returns
    /// `None` without inserting when the entry is vacant.
    pub fn and_modify(self, f: impl FnOnce(&mut V)) -> Option<&'a mut V> {
        match self {
            Entry::Occupied(entry) => {
                let value = entry.into_mut();
                f(value);
                Some(value)
            }
            Entry::Vacant(_) => None,
        }
    }

    /// Inserts `V::default()` if the entry is vacant and returns a mutable
    /// reference to the stored value.
    pub fn or_default(self) -> &'a mut V
    where
        V: Default,
    {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant entry in the hash table.
///
/// Created by [`HashTable::entry`] when no value in the chain matched.
pub struct VacantEntry<'a, V> {
    table: &'a mut HashTable<V>,
    hash: u64,
}

impl<'a, V> VacantEntry<'a, V> {
    /// Inserts a value as the new tail of its chain and returns a mutable
    /// reference to it.
    ///
    /// If the table would then hold more than `capacity * load_factor`
    /// elements, the bucket array is doubled first and the value is linked
    /// into the grown array. The length only changes once the node is linked.
    pub fn insert(self, value: V) -> &'a mut V {
        let table = self.table;
        if table.exceeds_load_factor(table.populated + 1) {
            table.grow();
        }

        let index = bucket_index(self.hash, table.buckets.len());
        let node = Box::new(Node {
            hash: self.hash,
            value,
            next: None,
        });
        let linked = link_tail(&mut table.buckets[index], node);
        table.populated += 1;
        &mut linked.value
    }

    /// Returns the hash this entry was looked up with.
    pub fn hash(&self) -> u64 {
        self.hash
    }
}

/// A view into an occupied entry in the hash table.
///
/// Created by [`HashTable::entry`] when a value in the chain matched.
pub struct OccupiedEntry<'a, V> {
    table: &'a mut HashTable<V>,
    bucket: usize,
    depth: usize,
}

impl<'a, V> OccupiedEntry<'a, V> {
    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        &self.table.node_at(self.bucket, self.depth).expect(LIVE_NODE).value
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self
            .table
            .node_at_mut(self.bucket, self.depth)
            .expect(LIVE_NODE)
            .value
    }

    /// Converts the entry into a mutable reference to the value with the
    /// lifetime of the table borrow.
    pub fn into_mut(self) -> &'a mut V {
        &mut self
            .table
            .node_at_mut(self.bucket, self.depth)
            .expect(LIVE_NODE)
            .value
    }

    /// Splices the entry out of its chain and returns the value.
    pub fn remove(self) -> V {
        self.table.unlink(self.bucket, self.depth).expect(LIVE_NODE)
    }
}

/// An iterator over the values in a [`HashTable`].
///
/// Created by [`HashTable::iter`].
pub struct Iter<'a, V> {
    buckets: core::slice::Iter<'a, Link<V>>,
    node: Option<&'a Node<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.node {
                self.node = node.next.as_deref();
                self.remaining -= 1;
                return Some(&node.value);
            }
            self.node = self.buckets.next()?.as_deref();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

/// A mutable iterator over the values in a [`HashTable`].
///
/// Created by [`HashTable::iter_mut`].
pub struct IterMut<'a, V> {
    buckets: core::slice::IterMut<'a, Link<V>>,
    node: Option<&'a mut Node<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.node.take() {
                self.node = node.next.as_deref_mut();
                self.remaining -= 1;
                return Some(&mut node.value);
            }
            self.node = self.buckets.next()?.as_deref_mut();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IterMut<'_, V> {}

/// A draining iterator over the values in a [`HashTable`].
///
/// Created by [`HashTable::drain`]. Values left unconsumed are dropped when
/// the iterator is.
pub struct Drain<'a, V> {
    table: &'a mut HashTable<V>,
    bucket_index: usize,
    chain: Link<V>,
}

impl<V> Iterator for Drain<'_, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(mut node) = self.chain.take() {
                self.chain = node.next.take();
                self.table.populated -= 1;
                return Some(node.value);
            }
            let head = self.table.buckets.get_mut(self.bucket_index)?;
            self.chain = head.take();
            self.bucket_index += 1;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.table.populated, Some(self.table.populated))
    }
}

impl<V> ExactSizeIterator for Drain<'_, V> {}

impl<V> Drop for Drain<'_, V> {
    fn drop(&mut self) {
        for _ in &mut *self {}
    }
}

/// An owning iterator over the values of a [`HashTable`].
pub struct IntoIter<V> {
    buckets: alloc::vec::IntoIter<Link<V>>,
    chain: Link<V>,
    remaining: usize,
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(mut node) = self.chain.take() {
                self.chain = node.next.take();
                self.remaining -= 1;
                return Some(node.value);
            }
            self.chain = self.buckets.next()?;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}

impl<V> Drop for IntoIter<V> {
    fn drop(&mut self) {
        for _ in &mut *self {}
    }
}

impl<V> IntoIterator for HashTable<V> {
    type IntoIter = IntoIter<V>;
    type Item = V;

    fn into_iter(mut self) -> Self::IntoIter {
        let remaining = core::mem::take(&mut self.populated);
        IntoIter {
            buckets: core::mem::take(&mut self.buckets).into_vec().into_iter(),
            chain: None,
            remaining,
        }
    }
}

impl<'a, V> IntoIterator for &'a HashTable<V> {
    type IntoIter = Iter<'a, V>;
    type Item = &'a V;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
