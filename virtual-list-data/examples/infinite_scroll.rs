// Example: infinite scrolling with a loading row.
//
// A host would call `tick()` once per turn of its event loop; here the loop is simulated.
use virtual_list_data::{
    DataCoordinator, ItemData, ListOptions, ListWindow, RowItem, StatusKind, WindowOptions,
};

fn print_window(items: &[ItemData<String>]) {
    let first = items.first().map(|it| it.index);
    let last = items.last().map(|it| it.index);
    let loading = items
        .iter()
        .any(|it| matches!(&it.item, RowItem::Single(entry) if entry.is_status()));
    println!("render {first:?}..={last:?} ({} slots, loading row: {loading})", items.len());
}

fn main() -> Result<(), virtual_list_data::Error> {
    let options = ListOptions::new()
        .with_item_size(48.0)
        .with_on_change(print_window);
    let mut list = DataCoordinator::new(options, ListWindow::new(WindowOptions::new(480.0)))?;

    list.set((0..20).map(|i| format!("row {i}")));
    list.tick()?;

    for page in 1..=3 {
        // The user reached the bottom: show a loading row while the next page is fetched.
        let offset = list.total_size() - list.updater().container_size();
        list.set_scroll_offset(offset);
        let mut loading = list.set_load_status(StatusKind::Loading);
        list.tick()?;

        let next = (page * 20..(page + 1) * 20).map(|i| format!("row {i}"));
        loading.clear_and_add_data(&mut list, next);
        list.tick()?;
        println!("page {page}: {} rows, total_size={}", list.get().len(), list.total_size());
    }

    let _end = list.set_load_status(StatusKind::End);
    list.tick()?;
    list.destroy();
    Ok(())
}
