use std::collections::hash_map::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;

use chain_hash::Config;
use chain_hash::HashTable;
use chain_hash::hash_table::Entry;
use clap::Parser;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "initial_capacity", default_value_t = 16)]
    initial_capacity: usize,

    #[arg(short = 'l', long = "load_factor", default_value_t = 0.75)]
    load_factor: f32,

    #[arg(short = 'n', long = "count", default_value_t = 1000)]
    count: u64,
}

fn hash_u64(value: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn main() {
    let args = Args::parse();

    let config = Config::default()
        .with_initial_capacity(args.initial_capacity)
        .with_load_factor(args.load_factor);
    let mut table: HashTable<u64> = match HashTable::with_config(config) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("invalid table options: {err}");
            std::process::exit(2);
        }
    };

    println!(
        "Created HashTable with {} buckets, load factor {}",
        table.capacity(),
        table.load_factor()
    );
    println!("Filling table with {} u64 values...", args.count);

    let mut growths = 0;
    for value in 0..args.count {
        let before = table.capacity();
        match table.entry(hash_u64(value), |&v| v == value) {
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
            Entry::Occupied(_) => {
                panic!("Value already exists in table: {}", value);
            }
        }
        if table.capacity() != before {
            growths += 1;
        }
    }

    println!("Inserted {} values into table", table.len());
    println!(
        "Bucket array grew {} times to {} buckets",
        growths,
        table.capacity()
    );

    table.print_chain_histogram();
    table.debug_stats().print();
}
