use std::collections::HashMap as ModelMap;
use std::hash::BuildHasherDefault;
use std::hash::DefaultHasher;

use chain_hash::Config;
use chain_hash::HashMap;
use proptest::prelude::*;

type TestMap<V> = HashMap<u8, V, BuildHasherDefault<DefaultHasher>>;

#[derive(Debug, Clone)]
enum Op {
    Insert(u8, u32),
    Remove(u8),
    Get(u8),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        8 => (any::<u8>(), any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        4 => any::<u8>().prop_map(Op::Remove),
        4 => any::<u8>().prop_map(Op::Get),
        1 => Just(Op::Clear),
    ]
}

proptest! {
    #[test]
    #[cfg_attr(miri, ignore)]
    fn prop_behaves_like_std_hashmap(
        ops in prop::collection::vec(op_strategy(), 0..400),
        initial_capacity in 1usize..40,
        load_factor in 0.25f32..4.0,
    ) {
        let config = Config::default()
            .with_initial_capacity(initial_capacity)
            .with_load_factor(load_factor);
        let mut map: TestMap<u32> =
            HashMap::with_config_and_hasher(config, BuildHasherDefault::default()).unwrap();
        let mut model = ModelMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    prop_assert_eq!(map.insert(key, value), model.insert(key, value));
                }
                Op::Remove(key) => {
                    prop_assert_eq!(map.remove(&key), model.remove(&key));
                }
                Op::Get(key) => {
                    prop_assert_eq!(map.get(&key), model.get(&key));
                    prop_assert_eq!(map.contains_key(&key), model.contains_key(&key));
                }
                Op::Clear => {
                    map.clear();
                    model.clear();
                    prop_assert_eq!(map.capacity(), initial_capacity);
                }
            }

            prop_assert_eq!(map.len(), model.len());
            prop_assert!(map.capacity() >= initial_capacity);
        }

        let mut entries = map.entry_set();
        entries.sort_unstable();
        let mut expected: Vec<_> = model.into_iter().collect();
        expected.sort_unstable();
        prop_assert_eq!(entries, expected);
    }
}

proptest! {
    #[test]
    fn prop_capacity_only_grows_by_doubling(keys in prop::collection::vec(any::<u8>(), 0..300)) {
        let mut map: TestMap<()> = HashMap::with_capacity_and_hasher(3, BuildHasherDefault::default());
        let mut capacity = map.capacity();

        for key in keys {
            map.insert(key, ());
            let grown = map.capacity();
            prop_assert!(grown == capacity || grown == capacity * 2);
            capacity = grown;
        }
    }
}

proptest! {
    #[test]
    fn prop_snapshots_match_contents(pairs in prop::collection::vec((any::<u8>(), 0u32..8), 0..200)) {
        let mut map: TestMap<u32> = HashMap::with_hasher(BuildHasherDefault::default());
        map.put_all(pairs.iter().copied());

        let keys = map.key_set();
        let values = map.value_list();
        prop_assert_eq!(keys.len(), map.len());
        prop_assert_eq!(values.len(), map.len());
        prop_assert_eq!(map.entry_set().len(), map.len());

        for key in map.keys() {
            prop_assert!(keys.contains(key));
        }

        let rebuilt: TestMap<u32> = map.entry_set().into_iter().collect();
        prop_assert_eq!(rebuilt, map);
    }
}
