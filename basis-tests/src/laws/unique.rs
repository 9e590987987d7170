#[cfg(test)]
use basis::{Unique, UniqueSource};
#[cfg(test)]
use proptest::prelude::*;

#[cfg(test)]
proptest! {
    #[test]
    fn each_source_issues_increasing_tokens(count in 1..256usize) {
        let source = UniqueSource::new();
        let issued: Vec<Unique> = (0..count).map(|_| source.next()).collect();
        prop_assert!(issued.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert_eq!(issued[0].value(), 1);
        prop_assert_eq!(issued[count - 1].value(), count as u64);
    }
}

#[test]
fn shared_source_never_repeats_across_threads() {
    use std::collections::HashSet;

    let source = UniqueSource::new();
    let per_thread: Vec<Vec<Unique>> = std::thread::scope(|scope| {
        let workers: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| (0..500).map(|_| source.next()).collect::<Vec<_>>()))
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    let distinct: HashSet<Unique> = per_thread.into_iter().flatten().collect();
    assert_eq!(distinct.len(), 2000);
}

#[test]
fn json_shape_is_the_bare_integer() {
    let source = UniqueSource::new();
    let token = source.next();
    assert_eq!(serde_json::to_string(&token).unwrap(), "1");
    assert_eq!(serde_json::from_str::<Unique>("1").unwrap(), token);
}
