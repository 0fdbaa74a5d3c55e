use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        let span = (end_exclusive - start) as u64;
        start + (self.next_u64() % span) as usize
    }
}

fn fixed(count: usize, size: f64) -> SizeAndPositionManager {
    SizeAndPositionManager::from_item_size(count, &ItemSize::Fixed(size), None)
}

fn counting(count: usize, size: f64, calls: Arc<AtomicUsize>) -> SizeAndPositionManager {
    let item_size = ItemSize::computed(move |_| {
        calls.fetch_add(1, Ordering::SeqCst);
        size
    });
    SizeAndPositionManager::from_item_size(count, &item_size, Some(size))
}

fn expected_offsets(sizes: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(sizes.len());
    let mut off = 0.0;
    for &s in sizes {
        out.push(off);
        off += s;
    }
    out
}

#[test]
fn fixed_size_total_equals_count_times_size() {
    let m = fixed(1_000, 25.0);
    assert_eq!(m.last_measured_index(), None);
    assert_eq!(m.get_total_size(), 25_000.0);
}

#[test]
fn total_size_mixes_measured_prefix_and_estimate() {
    let mut m = SizeAndPositionManager::from_item_size(
        10,
        &ItemSize::from(alloc::vec![
            10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0,
        ]),
        Some(5.0),
    );
    assert_eq!(m.get_total_size(), 50.0);

    m.get_size_and_position_for_index(2).unwrap();
    // 10 + 20 + 30 measured, 7 items estimated at 5.
    assert_eq!(m.get_total_size(), 60.0 + 35.0);
}

#[test]
fn measures_forward_contiguously() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut m = counting(100, 10.0, Arc::clone(&calls));

    let sp = m.get_size_and_position_for_index(9).unwrap();
    assert_eq!(sp, SizeAndPosition { offset: 90.0, size: 10.0 });
    assert_eq!(m.last_measured_index(), Some(9));
    assert_eq!(calls.load(Ordering::SeqCst), 10);

    // Already measured: no getter calls.
    m.get_size_and_position_for_index(4).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 10);

    m.get_size_and_position_for_index(12).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 13);
}

#[test]
fn repeated_queries_are_idempotent() {
    let mut m = SizeAndPositionManager::from_item_size(
        50,
        &ItemSize::computed(|i| (i % 7) as f64 + 1.0),
        None,
    );
    let a = m.get_size_and_position_for_index(30).unwrap();
    let frontier = m.last_measured_index();
    let b = m.get_size_and_position_for_index(30).unwrap();
    assert_eq!(a, b);
    assert_eq!(m.last_measured_index(), frontier);

    m.get_size_and_position_for_index(3).unwrap();
    assert_eq!(m.last_measured_index(), frontier);
}

#[test]
fn offsets_are_monotonic_and_contiguous() {
    let mut rng = Lcg::new(7);
    for _case in 0..20 {
        let count = rng.gen_range_usize(1, 300);
        let sizes: Vec<f64> = (0..count)
            .map(|_| rng.gen_range_usize(0, 80) as f64)
            .collect();
        let expected = expected_offsets(&sizes);
        let mut m =
            SizeAndPositionManager::from_item_size(count, &ItemSize::from(sizes.clone()), None);

        // Query in random order so both cached and fresh paths are exercised.
        for _ in 0..count {
            let i = rng.gen_range_usize(0, count);
            let sp = m.get_size_and_position_for_index(i).unwrap();
            assert_eq!(sp.offset, expected[i]);
            assert_eq!(sp.size, sizes[i]);
        }

        let last = m.last_measured_index().unwrap();
        for i in 0..last {
            let a = m.get_size_and_position_for_index(i).unwrap();
            let b = m.get_size_and_position_for_index(i + 1).unwrap();
            assert!(b.offset >= a.offset + a.size);
        }
    }
}

#[test]
fn out_of_range_index_is_an_error() {
    let mut m = fixed(3, 10.0);
    assert_eq!(
        m.get_size_and_position_for_index(3),
        Err(Error::IndexOutOfRange { index: 3, count: 3 })
    );

    let mut empty = fixed(0, 10.0);
    assert!(matches!(
        empty.get_size_and_position_for_index(0),
        Err(Error::IndexOutOfRange { .. })
    ));
}

#[test]
fn non_numeric_size_is_an_error() {
    let mut m = SizeAndPositionManager::from_item_size(
        5,
        &ItemSize::computed(|i| if i == 3 { f64::NAN } else { 10.0 }),
        None,
    );
    assert_eq!(m.get_size_and_position_for_index(2).unwrap().offset, 20.0);
    match m.get_size_and_position_for_index(4) {
        Err(Error::InvalidSize { index, size }) => {
            assert_eq!(index, 3);
            assert!(size.is_nan());
        }
        other => panic!("unexpected: {other:?}"),
    }
    // The valid prefix stays measured.
    assert_eq!(m.last_measured_index(), Some(2));
}

#[test]
fn short_table_reports_invalid_size() {
    let table = ItemSize::from(alloc::vec![1.0, 2.0]);
    let mut m = SizeAndPositionManager::from_item_size(4, &table, None);
    assert!(matches!(
        m.get_size_and_position_for_index(3),
        Err(Error::InvalidSize { index: 2, .. })
    ));
}

#[test]
fn negative_and_infinite_sizes_are_rejected() {
    let mut m = SizeAndPositionManager::from_item_size(2, &ItemSize::computed(|_| -1.0), None);
    assert!(matches!(
        m.get_size_and_position_for_index(0),
        Err(Error::InvalidSize { index: 0, .. })
    ));

    let mut m =
        SizeAndPositionManager::from_item_size(2, &ItemSize::computed(|_| f64::INFINITY), None);
    assert!(m.get_size_and_position_for_index(1).is_err());
}

#[test]
fn reset_item_moves_frontier_back_and_remeasures() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut m = counting(100, 10.0, Arc::clone(&calls));
    m.get_size_and_position_for_index(20).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 21);

    m.reset_item(15);
    assert_eq!(m.last_measured_index(), Some(14));

    // Entries before the reset point survive.
    m.get_size_and_position_for_index(14).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 21);

    m.get_size_and_position_for_index(15).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 22);

    // Resetting past the frontier is a no-op.
    m.reset_item(90);
    assert_eq!(m.last_measured_index(), Some(15));

    m.reset_item(0);
    assert_eq!(m.last_measured_index(), None);
}

#[test]
fn reset_picks_up_new_size_getter() {
    let mut m = fixed(10, 10.0);
    m.get_size_and_position_for_index(9).unwrap();
    assert_eq!(m.get_total_size(), 100.0);

    let item_size = ItemSize::Fixed(20.0);
    m.update_config(
        ManagerUpdate::default()
            .with_item_size_getter(item_size.getter())
            .with_estimated_size_getter(estimated_size_getter(None, &item_size)),
    );
    // Still the old measurements until the frontier is reset.
    assert_eq!(m.get_total_size(), 100.0);

    m.reset_item(5);
    assert_eq!(m.get_total_size(), 50.0 + 5.0 * 20.0);
    assert_eq!(m.get_size_and_position_for_index(6).unwrap().offset, 70.0);
}

#[test]
fn shrinking_count_ignores_stale_entries() {
    let mut m = fixed(10, 10.0);
    m.get_size_and_position_for_index(9).unwrap();
    m.update_config(ManagerUpdate::default().with_item_count(4));
    assert_eq!(m.get_total_size(), 40.0);
    assert_eq!(m.last_measured_index(), Some(3));
    assert_eq!(m.find_nearest_index(1_000.0).unwrap(), 3);
}

#[test]
fn visible_range_fills_viewport_exactly() {
    let mut m = fixed(100, 50.0);
    let r = m.get_visible_range(0.0, 500.0, 0).unwrap().unwrap();
    assert_eq!(r, VisibleRange { start: 0, end: 9 });
    assert_eq!(r.count(), 10);
}

#[test]
fn visible_range_applies_overscan_within_bounds() {
    let mut m = fixed(100, 50.0);
    assert_eq!(
        m.get_visible_range(0.0, 500.0, 3).unwrap(),
        Some(VisibleRange { start: 0, end: 12 })
    );
    assert_eq!(
        m.get_visible_range(1_000.0, 500.0, 3).unwrap(),
        Some(VisibleRange { start: 17, end: 32 })
    );
    assert_eq!(
        m.get_visible_range(4_800.0, 500.0, 3).unwrap(),
        Some(VisibleRange { start: 93, end: 99 })
    );
}

#[test]
fn visible_range_includes_partially_visible_items() {
    let mut m = fixed(100, 50.0);
    let r = m.get_visible_range(25.0, 500.0, 0).unwrap().unwrap();
    assert_eq!(r, VisibleRange { start: 0, end: 10 });
}

#[test]
fn visible_range_clamps_negative_offset() {
    let mut m = fixed(100, 50.0);
    assert_eq!(
        m.get_visible_range(-300.0, 100.0, 0).unwrap(),
        Some(VisibleRange { start: 0, end: 1 })
    );
}

#[test]
fn visible_range_is_empty_without_extent() {
    let mut m = fixed(0, 50.0);
    assert_eq!(m.get_visible_range(0.0, 500.0, 3).unwrap(), None);

    let mut m = fixed(10, 50.0);
    assert_eq!(m.get_visible_range(0.0, 0.0, 3).unwrap(), None);
}

#[test]
fn nan_offsets_are_rejected() {
    let mut m = fixed(10, 50.0);
    assert!(matches!(
        m.find_nearest_index(f64::NAN),
        Err(Error::InvalidOffset { .. })
    ));
    assert!(matches!(
        m.get_visible_range(f64::NAN, 100.0, 0),
        Err(Error::InvalidOffset { .. })
    ));
}

#[test]
fn find_nearest_index_far_past_frontier() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut m = counting(10_000, 10.0, Arc::clone(&calls));

    assert_eq!(m.find_nearest_index(50_005.0).unwrap(), 5_000);
    // Measurement stops at the bracketing step instead of running to the end of the list.
    let measured = calls.load(Ordering::SeqCst);
    assert!(measured < 10_000, "measured {measured}");
    assert!(m.last_measured_index().unwrap() >= 5_000);
}

#[test]
fn find_nearest_index_matches_linear_scan() {
    let mut rng = Lcg::new(42);
    let sizes: Vec<f64> = (0..500).map(|_| rng.gen_range_usize(1, 60) as f64).collect();
    let offsets = expected_offsets(&sizes);
    let total: f64 = sizes.iter().sum();

    for _ in 0..200 {
        let target = rng.gen_range_usize(0, total as usize) as f64;
        let expected = offsets.iter().rposition(|&o| o <= target).unwrap();

        // Fresh manager: exercises the exponential path.
        let mut fresh =
            SizeAndPositionManager::from_item_size(500, &ItemSize::from(sizes.clone()), None);
        assert_eq!(fresh.find_nearest_index(target).unwrap(), expected);

        // Fully measured: exercises the bisection path.
        let mut warm =
            SizeAndPositionManager::from_item_size(500, &ItemSize::from(sizes.clone()), None);
        warm.get_size_and_position_for_index(499).unwrap();
        assert_eq!(warm.find_nearest_index(target).unwrap(), expected);
    }
}

#[test]
fn updated_offset_per_alignment() {
    let mut m = fixed(100, 50.0);
    // Item 20 spans 1000..1050; container 200.
    let mut offset_for = |align, current| {
        m.get_updated_offset_for_index(align, 20, current, 200.0)
            .unwrap()
    };
    assert_eq!(offset_for(Align::Start, 0.0), 1_000.0);
    assert_eq!(offset_for(Align::End, 0.0), 850.0);
    assert_eq!(offset_for(Align::Center, 0.0), 925.0);

    // Auto: scroll forward just enough, backward just enough, or not at all.
    assert_eq!(offset_for(Align::Auto, 0.0), 850.0);
    assert_eq!(offset_for(Align::Auto, 2_000.0), 1_000.0);
    assert_eq!(offset_for(Align::Auto, 900.0), 900.0);
}

#[test]
fn updated_offset_is_clamped_to_scrollable_extent() {
    let mut m = fixed(100, 50.0);
    let max = m.get_total_size() - 300.0;
    for align in [Align::Start, Align::Center, Align::End, Align::Auto] {
        for index in [0, 1, 50, 98, 99] {
            let off = m.get_updated_offset_for_index(align, index, 0.0, 300.0).unwrap();
            assert!((0.0..=max).contains(&off), "{align:?} {index} -> {off}");
        }
    }
    assert_eq!(m.get_updated_offset_for_index(Align::Start, 99, 0.0, 300.0).unwrap(), max);
    assert_eq!(m.get_updated_offset_for_index(Align::End, 0, 0.0, 300.0).unwrap(), 0.0);
}

#[test]
fn updated_offset_without_container_is_zero() {
    let mut m = fixed(100, 50.0);
    assert_eq!(m.get_updated_offset_for_index(Align::Start, 40, 10.0, 0.0).unwrap(), 0.0);
    // Not even validated: there is nothing to scroll.
    assert_eq!(m.get_updated_offset_for_index(Align::Start, 400, 10.0, -5.0).unwrap(), 0.0);
}

#[test]
fn measured_mode_reads_cell_cache_then_estimate() {
    let mut m = SizeAndPositionManager::new(
        5,
        SizeGetter::Measured(Axis::Vertical),
        estimated_size_getter(Some(40.0), &ItemSize::default()),
    );
    assert_eq!(m.get_total_size(), 200.0);

    m.cell_cache_mut().set(1, CellSize::new(300.0, 90.0));
    m.reset_item(1);
    assert_eq!(m.get_size_and_position_for_index(1).unwrap().size, 90.0);
    assert_eq!(m.get_size_and_position_for_index(2).unwrap().offset, 130.0);

    let mut h = SizeAndPositionManager::new(
        5,
        SizeGetter::Measured(Axis::Horizontal),
        estimated_size_getter(Some(40.0), &ItemSize::default()),
    );
    h.cell_cache_mut().set(0, CellSize::new(300.0, 90.0));
    assert_eq!(h.get_size_and_position_for_index(0).unwrap().size, 300.0);
}

#[test]
fn estimate_falls_back_to_fixed_size_then_default() {
    assert_eq!(estimated_size_getter(Some(12.0), &ItemSize::Fixed(30.0))(), 12.0);
    assert_eq!(estimated_size_getter(None, &ItemSize::Fixed(30.0))(), 30.0);
    assert_eq!(estimated_size_getter(Some(0.0), &ItemSize::Fixed(30.0))(), 30.0);
    assert_eq!(
        estimated_size_getter(None, &ItemSize::computed(|_| 7.0))(),
        DEFAULT_ITEM_SIZE
    );
}

#[test]
fn item_size_equality() {
    let f = ItemSize::computed(|i| i as f64);
    assert_eq!(f, f.clone());
    assert_ne!(f, ItemSize::computed(|i| i as f64));
    assert_eq!(ItemSize::Fixed(3.0), ItemSize::from(3.0));
    assert_eq!(ItemSize::from(alloc::vec![1.0, 2.0]), ItemSize::from(&[1.0, 2.0][..]));
    assert_ne!(ItemSize::Fixed(3.0), ItemSize::from(alloc::vec![3.0]));
}

#[test]
fn cell_cache_basics() {
    let mut cache = CellCache::new();
    assert!(cache.is_empty());
    cache.set(3, CellSize::new(10.0, 20.0));
    cache.set(3, CellSize::new(11.0, 21.0));
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(3), Some(CellSize::new(11.0, 21.0)));
    assert_eq!(cache.get(4), None);
    assert_eq!(cache.remove(3), Some(CellSize::new(11.0, 21.0)));
    cache.set(1, CellSize::default());
    cache.clear();
    assert!(cache.is_empty());
}
