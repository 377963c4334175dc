#[cfg(test)]
mod tests {
    use bloomset::{BloomFilter, Filter, FilterError, HashFamily, Murmur3Family, XxHashFamily};
    use proptest::prelude::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::collections::HashSet;

    #[test]
    fn test_equal_values_of_different_types_agree() {
        let mut bloom = BloomFilter::new(1_000, 0.001).expect("couldn't construct Bloom filter.");

        bloom.insert("a");
        bloom.insert(vec![true, false]);
        bloom.insert([0u32; 2]);

        // `str`, `String` and references to them write the same bytes.
        let a = String::from("a");
        assert!(bloom.contains(&a));
        assert!(bloom.contains(a.as_str()));
        assert!(bloom.might_contain(a));

        // Vectors and arrays hash as the slice they hold.
        assert!(bloom.contains([true, false]));
        assert!(bloom.contains(&[true, false][..]));
        assert!(bloom.contains(vec![0u32, 0]));

        // Distinct integer widths write distinct bytes.
        let mut numbers = BloomFilter::new(1_000, 0.001).unwrap();
        numbers.insert(7u8);
        assert!(numbers.contains(7u8));
        assert!(!numbers.contains(7u64));
    }

    #[test]
    fn test_fruit_basket() {
        let mut bloom = BloomFilter::new(1_000, 0.001).expect("couldn't construct Bloom filter.");

        bloom.insert("apple");
        bloom.insert("banana");
        bloom.insert("orange");

        assert!(bloom.contains("apple"));
        assert!(bloom.contains(String::from("banana")));
        // Positions are deterministic with the default hash family.
        assert!(!bloom.contains("grape"));

        for i in 0..1_000 {
            bloom.insert(format!("item{i}"));
        }
        assert!(bloom.contains("apple"));
        assert!(bloom.contains("orange"));
    }

    #[test]
    fn test_invalid_construction() {
        assert!(matches!(
            BloomFilter::new(0, 0.01),
            Err(FilterError::InvalidCapacity { found: 0 })
        ));
        assert!(matches!(
            BloomFilter::new(1_000, 0.0),
            Err(FilterError::InvalidErrorRate { .. })
        ));
        assert!(matches!(
            BloomFilter::new(1_000, 1.0),
            Err(FilterError::InvalidErrorRate { .. })
        ));
    }

    #[test]
    fn test_sizing_is_deterministic() {
        for _ in 0..3 {
            let bloom = BloomFilter::new(1_000, 0.001).unwrap();
            assert_eq!(14_378, bloom.size());
            assert_eq!(10, bloom.hash_count());
        }
    }

    #[test]
    fn test_display_lists_properties() {
        let bloom = BloomFilter::new(1_000, 0.001).unwrap();
        let summary = bloom.to_string();

        assert!(summary.contains("size=14378"));
        assert!(summary.contains("hash_functions=10"));
        assert!(summary.contains("capacity=1000"));
        assert!(summary.contains("error_rate=0.001"));
    }

    /// Inserts `capacity` random items and queries 10,000 others.
    fn false_positive_fraction<H: HashFamily>(hash_family: H) -> f64 {
        let capacity = 1_000;
        let mut bloom = BloomFilter::with_hasher(capacity, 0.01, hash_family)
            .expect("couldn't construct Bloom filter.");
        let mut rng = StdRng::seed_from_u64(7);

        let mut inserted = HashSet::new();
        while inserted.len() < capacity {
            inserted.insert(rng.gen::<u64>());
        }
        bloom.extend(inserted.iter());

        let mut queried = 0;
        let mut false_positives = 0;
        while queried < 10_000 {
            let item = rng.gen::<u64>();
            if inserted.contains(&item) {
                continue;
            }
            queried += 1;
            if bloom.contains(item) {
                false_positives += 1;
            }
        }

        false_positives as f64 / queried as f64
    }

    #[test]
    fn test_false_positive_rate_xxhash() {
        assert!(false_positive_fraction(XxHashFamily::new()) < 0.02);
    }

    #[test]
    fn test_false_positive_rate_murmur3() {
        assert!(false_positive_fraction(Murmur3Family::new()) < 0.02);
    }

    #[test]
    fn test_random_salt_keeps_membership() {
        let mut bloom = BloomFilter::with_hasher(100, 0.01, XxHashFamily::random()).unwrap();
        bloom.insert("apple");

        assert!(bloom.contains("apple"));
    }

    #[test]
    fn test_load_beyond_capacity_degrades_gracefully() {
        let mut bloom = BloomFilter::new(100, 0.01).unwrap();
        for i in 0..10_000u32 {
            bloom.insert(i);
        }
        for i in 0..10_000u32 {
            assert!(bloom.contains(i));
        }
    }

    proptest! {
        #[test]
        fn prop_no_false_negatives(
            items in prop::collection::vec(any::<String>(), 1..100),
            others in prop::collection::vec(any::<u64>(), 0..100),
        ) {
            let mut bloom = BloomFilter::new(100, 0.01).unwrap();
            for item in &items {
                bloom.insert(item);
            }
            for other in &others {
                bloom.insert(other);
            }
            for item in &items {
                prop_assert!(bloom.contains(item));
            }
        }

        #[test]
        fn prop_insert_is_idempotent(
            prefix in prop::collection::vec(any::<u32>(), 0..50),
            item in any::<String>(),
        ) {
            let mut once = BloomFilter::new(50, 0.05).unwrap();
            once.extend(&prefix);
            let mut twice = once.clone();

            once.insert(&item);
            twice.insert(&item).insert(&item);

            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_set_bits_never_decrease(
            operations in prop::collection::vec((any::<bool>(), any::<u16>()), 1..200),
        ) {
            let mut bloom = BloomFilter::new(64, 0.1).unwrap();
            let mut previous = bloom.set_bits();
            for (is_insert, item) in operations {
                if is_insert {
                    bloom.insert(item);
                    prop_assert!(bloom.set_bits() >= previous);
                } else {
                    bloom.contains(item);
                    prop_assert_eq!(bloom.set_bits(), previous);
                }
                previous = bloom.set_bits();
            }
        }

        #[test]
        fn prop_sizing_never_under_provisions(
            capacity in 1usize..100_000,
            error_rate in 0.0001f64..0.5,
        ) {
            let (size, hash_count) = bloomset::optimal_parameters(capacity, error_rate).unwrap();
            let ideal_size = -(capacity as f64) * error_rate.ln() / 2f64.ln().powi(2);

            prop_assert!(size >= 1 && hash_count >= 1);
            prop_assert!(size as f64 >= ideal_size);
            prop_assert!(hash_count as f64 >= size as f64 / capacity as f64 * 2f64.ln());
        }
    }
}
