use super::*;

#[test]
fn three_document_interval_corpus_matches_known_results() {
    let mut idx = IntervalIndex::new();
    idx.add_document(0, 10, 20).unwrap();
    idx.add_document(1, 15, 25).unwrap();
    idx.add_document(2, 100, 200).unwrap();

    assert_eq!(idx.find_docs_by_interval(18, 22).ids(), vec![0, 1]);
    assert_eq!(idx.find_docs_by_time_point(150).ids(), vec![2]);
    assert!(idx.find_docs_by_interval(0, 9).ids().is_empty());
}

#[test]
fn containment_matches_the_brute_force_definition() {
    let intervals = [
        (10u32, 20u32),
        (15, 25),
        (100, 200),
        (0, 0),
        (u32::MAX, u32::MAX),
    ];
    let mut idx = IntervalIndex::new();
    for (id, (b, e)) in intervals.iter().enumerate() {
        idx.add_document(id, *b, *e).unwrap();
    }

    for &(l, r) in &[
        (18u32, 22u32),
        (0, 0),
        (5, 9),
        (0, u32::MAX),
        (u32::MAX, u32::MAX),
    ] {
        let got = idx.find_docs_by_interval(l, r).ids();
        let expected: Vec<usize> = intervals
            .iter()
            .enumerate()
            .filter(|(_, (b, e))| *b <= r && *e >= l)
            .map(|(id, _)| id)
            .collect();
        assert_eq!(got, expected, "mismatch for range [{l}, {r}]");
    }
}

#[test]
fn predicates_cover_the_request_range_exactly_with_no_overlap() {
    for &(l, r) in &[
        (18u32, 22u32),
        (0, 0),
        (0, u32::MAX),
        (12345, 67890),
        (1, 1),
    ] {
        let preds = predicates(l, r);
        assert!(!preds.is_empty());

        let mut ranges: Vec<(u64, u64)> = preds.iter().map(|p| path_to_range(p)).collect();
        ranges.sort_unstable();

        // disjoint and contiguous
        for w in ranges.windows(2) {
            assert!(
                w[0].1 < w[1].0,
                "overlapping predicates: {:?} and {:?}",
                w[0],
                w[1]
            );
        }
        assert_eq!(ranges.first().unwrap().0, l as u64);
        assert_eq!(ranges.last().unwrap().1, r as u64);
    }
}

#[test]
fn single_point_range_decomposes_to_one_predicate_of_full_depth() {
    let preds = predicates(42, 42);
    assert_eq!(preds.len(), 1);
    assert_eq!(preds[0].len(), 32);
}

fn path_to_range(path: &[bool]) -> (u64, u64) {
    let mut cl = 0u64;
    let mut cr = u32::MAX as u64;
    for &bit in path {
        let mid = cl + (cr - cl) / 2;
        if bit {
            cl = mid + 1;
        } else {
            cr = mid;
        }
    }
    (cl, cr)
}
