use std::thread;

use intcode_core::Channel;
use proptest::prelude::*;

proptest! {
    #[test]
    fn single_writer_order_is_preserved(values in proptest::collection::vec(any::<i64>(), 0..200)) {
        let ch = Channel::new();
        let writer = {
            let ch = ch.clone();
            let values = values.clone();
            thread::spawn(move || {
                for v in values {
                    ch.write(v);
                }
                ch.close();
            })
        };
        let seen = ch.drain();
        writer.join().unwrap();
        prop_assert_eq!(seen, values);
    }

    #[test]
    fn concurrent_writers_keep_their_own_order(
        counts in proptest::collection::vec(0usize..60, 1..5),
    ) {
        let ch = Channel::new();
        thread::scope(|s| {
            for (w, &count) in counts.iter().enumerate() {
                let ch = ch.clone();
                s.spawn(move || {
                    for i in 0..count {
                        ch.write((w * 1000 + i) as i64);
                    }
                });
            }
        });
        ch.close();
        let seen = ch.drain();
        prop_assert_eq!(seen.len(), counts.iter().sum::<usize>());
        for (w, &count) in counts.iter().enumerate() {
            let mine: Vec<i64> = seen
                .iter()
                .copied()
                .filter(|v| (*v / 1000) as usize == w)
                .collect();
            let expected: Vec<i64> = (0..count).map(|i| (w * 1000 + i) as i64).collect();
            prop_assert_eq!(mine, expected);
        }
    }

    #[test]
    fn close_keeps_queued_values(values in proptest::collection::vec(any::<i64>(), 0..50)) {
        let ch = Channel::with_values(values.clone());
        ch.close();
        for v in &values {
            prop_assert_eq!(ch.read(), Some(*v));
        }
        prop_assert_eq!(ch.read(), None);
        prop_assert_eq!(ch.try_read(), None);
    }
}
