// Example: visible range and scroll-to for a million fixed-size rows.
use virtual_list::{Align, ItemSize, SizeAndPositionManager};

fn main() -> Result<(), virtual_list::Error> {
    let mut m = SizeAndPositionManager::from_item_size(1_000_000, &ItemSize::Fixed(20.0), None);
    println!("total_size={}", m.get_total_size());

    let range = m.get_visible_range(123_456.0, 400.0, 3)?;
    println!("visible_range={range:?}");
    println!("last_measured_index={:?}", m.last_measured_index());

    let off = m.get_updated_offset_for_index(Align::End, 999_999, 123_456.0, 400.0)?;
    println!("after scroll_to_index: offset={off}");
    Ok(())
}
