// Example: a grouped list with pinned section headers.
//
// Headers are 30 tall, rows 18. The view renders the current section's header pinned on top of
// the visible rows.
use virtual_list::{Align, ItemSize, SizeAndPositionManager};

fn main() -> Result<(), virtual_list::Error> {
    let headers = [0usize, 25, 60, 120];
    let size = ItemSize::computed(move |i| if headers.contains(&i) { 30.0 } else { 18.0 });
    let mut m = SizeAndPositionManager::from_item_size(200, &size, Some(18.0));

    let section_offset = m.get_updated_offset_for_index(Align::Start, 60, 0.0, 240.0)?;
    let Some(range) = m.get_visible_range(section_offset + 100.0, 240.0, 0)? else {
        return Ok(());
    };

    let pinned = headers.iter().copied().rev().find(|&h| h <= range.start);
    println!("range={range:?} pinned_header={pinned:?}");
    for i in range.iter().take(5) {
        println!("  {i}: {:?}", m.get_size_and_position_for_index(i)?);
    }
    Ok(())
}
