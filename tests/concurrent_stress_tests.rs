//! Concurrent stress tests for the topic registry
//! Tests focused on lost updates, torn reads and generation ordering

use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Barrier, Mutex,
    },
    thread,
    time::Instant,
};

use monet::{
    topic::{CopyOutcome, TopicDescriptor},
    TopicRegistry,
};

const RECORD_SIZE: usize = 64;

#[cfg(test)]
mod concurrent_stress_tests {
    use super::*;

    /// Test: concurrent publishers never duplicate or skip generations
    #[test]
    fn stress_publish_generations_are_unique() {
        const TOPIC: TopicDescriptor<'static> =
            TopicDescriptor::new("stress_generations", RECORD_SIZE);
        let registry = Arc::new(TopicRegistry::new());
        assert!(registry.advertise(&TOPIC));

        let thread_count = 4;
        let publishes_per_thread = 250;
        let barrier = Arc::new(Barrier::new(thread_count));
        let seen = Arc::new(Mutex::new(Vec::new()));

        let mut handles = Vec::new();
        for thread_id in 0..thread_count {
            let registry = registry.clone();
            let barrier = barrier.clone();
            let seen = seen.clone();

            handles.push(thread::spawn(move || {
                let record = [thread_id as u8; RECORD_SIZE];
                let mut local = Vec::with_capacity(publishes_per_thread);

                barrier.wait();
                for _ in 0..publishes_per_thread {
                    local.push(registry.try_publish(&TOPIC, &record).unwrap());
                }

                seen.lock().unwrap().extend(local);
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let total = (thread_count * publishes_per_thread) as u64;
        let generations: HashSet<u64> = seen.lock().unwrap().iter().copied().collect();
        assert_eq!(generations.len() as u64, total);
        assert_eq!(generations, (1..=total).collect::<HashSet<u64>>());
        assert_eq!(registry.generation(&TOPIC), Some(total));
    }

    /// Test: readers never observe a half-written record
    #[test]
    fn stress_no_torn_reads() {
        const TOPIC: TopicDescriptor<'static> =
            TopicDescriptor::new("stress_torn", RECORD_SIZE);
        let registry = Arc::new(TopicRegistry::new());
        assert!(registry.advertise(&TOPIC));

        let writer_count = 2;
        let reader_count = 2;
        let barrier = Arc::new(Barrier::new(writer_count + reader_count));
        let done = Arc::new(AtomicBool::new(false));
        let torn = Arc::new(AtomicUsize::new(0));
        let reads = Arc::new(AtomicUsize::new(0));

        let mut writers = Vec::new();
        for writer_id in 0..writer_count {
            let registry = registry.clone();
            let barrier = barrier.clone();

            writers.push(thread::spawn(move || {
                barrier.wait();
                for i in 0..500usize {
                    let fill = ((writer_id * 100 + i) % 251) as u8;
                    assert!(registry.publish(&TOPIC, &[fill; RECORD_SIZE]));
                }
            }));
        }

        let mut readers = Vec::new();
        for _ in 0..reader_count {
            let registry = registry.clone();
            let barrier = barrier.clone();
            let done = done.clone();
            let torn = torn.clone();
            let reads = reads.clone();

            readers.push(thread::spawn(move || {
                let mut dst = [0u8; RECORD_SIZE];
                let mut generation = 0;
                let mut last_generation = 0;

                barrier.wait();
                while !done.load(Ordering::Acquire) {
                    if registry.copy(&TOPIC, &mut dst, &mut generation, true) {
                        if dst.iter().any(|&b| b != dst[0]) {
                            torn.fetch_add(1, Ordering::Relaxed);
                        }
                        // Generations observed by one reader never go backwards
                        assert!(generation >= last_generation);
                        last_generation = generation;
                        reads.fetch_add(1, Ordering::Relaxed);
                    }
                    thread::yield_now();
                }
            }));
        }

        let start = Instant::now();
        for writer in writers {
            writer.join().unwrap();
        }
        done.store(true, Ordering::Release);
        for reader in readers {
            reader.join().unwrap();
        }

        println!(
            "torn-read stress: {} reads in {:?}",
            reads.load(Ordering::Relaxed),
            start.elapsed()
        );
        assert_eq!(torn.load(Ordering::Relaxed), 0);
        assert_eq!(registry.generation(&TOPIC), Some(1000));
    }

    /// Test: the generation handed back by a copy always belongs to the bytes
    #[test]
    fn stress_copied_bytes_match_generation() {
        const TOPIC: TopicDescriptor<'static> =
            TopicDescriptor::new("stress_stamped", RECORD_SIZE);
        const WORDS: usize = RECORD_SIZE / 8;
        const PUBLISHES: u64 = 2000;

        fn stamp(generation: u64) -> [u8; RECORD_SIZE] {
            let mut record = [0u8; RECORD_SIZE];
            for word in record.chunks_exact_mut(8) {
                word.copy_from_slice(&generation.to_le_bytes());
            }
            record
        }

        let registry = Arc::new(TopicRegistry::new());
        assert!(registry.advertise(&TOPIC));

        let reader_count = 3;
        let barrier = Arc::new(Barrier::new(reader_count + 1));
        let done = Arc::new(AtomicBool::new(false));
        let mismatched = Arc::new(AtomicUsize::new(0));
        let copies = Arc::new(AtomicUsize::new(0));

        let writer = {
            let registry = registry.clone();
            let barrier = barrier.clone();

            thread::spawn(move || {
                barrier.wait();
                // Single writer: the k-th publish is generation k
                for expected in 1..=PUBLISHES {
                    let generation = registry.try_publish(&TOPIC, &stamp(expected)).unwrap();
                    assert_eq!(generation, expected);
                }
            })
        };

        let mut readers = Vec::new();
        for _ in 0..reader_count {
            let registry = registry.clone();
            let barrier = barrier.clone();
            let done = done.clone();
            let mismatched = mismatched.clone();
            let copies = copies.clone();

            readers.push(thread::spawn(move || {
                let mut dst = [0u8; RECORD_SIZE];
                let mut generation = 0;

                barrier.wait();
                while !done.load(Ordering::Acquire) {
                    let outcome = registry.try_copy(&TOPIC, &mut dst, &mut generation, true);
                    if let Ok(CopyOutcome::Copied(copied_at)) = outcome {
                        let words: Vec<u64> = dst
                            .chunks_exact(8)
                            .map(|word| u64::from_le_bytes(word.try_into().unwrap()))
                            .collect();
                        assert_eq!(words.len(), WORDS);
                        if words.iter().any(|&word| word != copied_at) || copied_at != generation {
                            mismatched.fetch_add(1, Ordering::Relaxed);
                        }
                        copies.fetch_add(1, Ordering::Relaxed);
                    }
                }
            }));
        }

        writer.join().unwrap();
        done.store(true, Ordering::Release);
        for reader in readers {
            reader.join().unwrap();
        }

        println!(
            "stamped stress: {} copies checked",
            copies.load(Ordering::Relaxed)
        );
        assert_eq!(mismatched.load(Ordering::Relaxed), 0);

        // Last record carries the final generation
        let mut dst = [0u8; RECORD_SIZE];
        let mut generation = 0;
        assert!(registry.copy(&TOPIC, &mut dst, &mut generation, false));
        assert_eq!(generation, PUBLISHES);
        assert_eq!(dst, stamp(PUBLISHES));
    }

    /// Test: concurrent advertise/unadvertise loses no updates
    #[test]
    fn stress_advertise_counts_balance() {
        const TOPIC: TopicDescriptor<'static> = TopicDescriptor::new("stress_counts", 8);
        let registry = Arc::new(TopicRegistry::new());

        // One long-lived producer keeps the topic alive throughout
        assert!(registry.advertise(&TOPIC));

        let thread_count = 4;
        let rounds = 200;
        let barrier = Arc::new(Barrier::new(thread_count));

        let mut handles = Vec::new();
        for _ in 0..thread_count {
            let registry = registry.clone();
            let barrier = barrier.clone();

            handles.push(thread::spawn(move || {
                barrier.wait();
                for _ in 0..rounds {
                    assert!(registry.advertise(&TOPIC));
                }
                for _ in 0..rounds {
                    assert!(registry.unadvertise(&TOPIC));
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let info = registry.topic_info("stress_counts").unwrap();
        assert_eq!(info.publisher_count, 1);
        assert!(registry.unadvertise(&TOPIC));
        assert!(!registry.unadvertise(&TOPIC));
    }

    /// Test: racing first advertisements create exactly one entry
    #[test]
    fn stress_concurrent_topic_creation() {
        let registry = Arc::new(TopicRegistry::new());
        let thread_count = 8;
        let barrier = Arc::new(Barrier::new(thread_count));

        let mut handles = Vec::new();
        for _ in 0..thread_count {
            let registry = registry.clone();
            let barrier = barrier.clone();

            handles.push(thread::spawn(move || {
                let topic = TopicDescriptor::new("stress_creation", 16);
                barrier.wait();
                assert!(registry.advertise(&topic));
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.topic_count(), 1);
        assert_eq!(registry.stats().snapshot().topics_created, 1);
        assert_eq!(
            registry.topic_info("stress_creation").unwrap().publisher_count,
            thread_count as u32
        );
    }

    /// Test: independent topics progress without interfering
    #[test]
    fn stress_independent_topics() {
        let registry = Arc::new(TopicRegistry::new());
        let names: [&'static str; 4] = ["indep_a", "indep_b", "indep_c", "indep_d"];

        let mut handles = Vec::new();
        for (i, &name) in names.iter().enumerate() {
            let registry = registry.clone();
            let topic = TopicDescriptor::new(name, 4);

            handles.push(thread::spawn(move || {
                assert!(registry.advertise(&topic));
                for n in 0..(100 * (i + 1)) as u32 {
                    assert!(registry.publish(&topic, &n.to_le_bytes()));
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        for (i, &name) in names.iter().enumerate() {
            let topic = TopicDescriptor::new(name, 4);
            let expected = (100 * (i + 1)) as u64;
            assert_eq!(registry.generation(&topic), Some(expected));

            let mut dst = [0u8; 4];
            let mut generation = 0;
            assert!(registry.copy(&topic, &mut dst, &mut generation, false));
            assert_eq!(u32::from_le_bytes(dst), expected as u32 - 1);
        }
    }
}
