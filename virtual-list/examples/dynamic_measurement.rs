// Example: dynamic sizes.
//
// Items start at the estimate. As the view reports real sizes, the frontier is moved back to the
// measured index and everything after it shifts on the next query.
use virtual_list::{Axis, CellSize, DEFAULT_ITEM_SIZE, SizeAndPositionManager, SizeGetter};

fn main() -> Result<(), virtual_list::Error> {
    let estimate = 40.0;
    let mut m = SizeAndPositionManager::new(
        1_000,
        SizeGetter::Measured(Axis::Vertical),
        virtual_list::estimated_size_getter(Some(estimate), &DEFAULT_ITEM_SIZE.into()),
    );

    let range = m.get_visible_range(0.0, 300.0, 0)?;
    println!("initial range={range:?} total={}", m.get_total_size());

    // Pretend the view rendered the range and measured every other row taller.
    if let Some(range) = range {
        for i in range.iter().filter(|i| i % 2 == 0) {
            m.cell_cache_mut().set(i, CellSize::new(320.0, 75.0));
            m.reset_item(i);
        }
    }

    let range = m.get_visible_range(0.0, 300.0, 0)?;
    println!("measured range={range:?} total={}", m.get_total_size());
    for i in 0..4 {
        println!("item {i}: {:?}", m.get_size_and_position_for_index(i)?);
    }
    Ok(())
}
