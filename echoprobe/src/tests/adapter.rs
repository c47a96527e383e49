use crate::{Adapter, Faulty, MemoryCell};

#[test]
fn test_memory_cell_echoes_last_write() {
    let mut cell = MemoryCell::new();
    cell.write(&3).unwrap();
    cell.write(&9).unwrap();
    assert_eq!(cell.read().unwrap(), 9);
    assert_eq!(cell.get(), Some(&9));
}

#[test]
fn test_memory_cell_read_before_write_fails() {
    let mut cell: MemoryCell<i64> = MemoryCell::new();
    let err = cell.read().unwrap_err();
    assert_eq!(err.cause, "no value written");
}

#[test]
fn test_memory_cell_with_initial_value() {
    let mut cell = MemoryCell::with_value(5i64);
    assert_eq!(cell.read().unwrap(), 5);
}

#[test]
fn test_faulty_drop_write_keeps_previous_value() {
    let mut adapter = Faulty::new(MemoryCell::new()).drop_write(1);
    adapter.write(&1i64).unwrap();
    adapter.write(&2i64).unwrap();
    assert_eq!(adapter.read().unwrap(), 1);

    adapter.write(&3i64).unwrap();
    assert_eq!(adapter.read().unwrap(), 3);
    assert_eq!(adapter.writes(), 3);
    assert_eq!(adapter.reads(), 2);
}

#[test]
fn test_faulty_fail_write_and_read() {
    let mut adapter = Faulty::new(MemoryCell::new()).fail_write(0).fail_read(1);

    let err = adapter.write(&1i64).unwrap_err();
    assert!(err.cause.contains("injected write failure"));

    adapter.write(&2i64).unwrap();
    assert_eq!(adapter.read().unwrap(), 2);

    let err = adapter.read().unwrap_err();
    assert!(err.cause.contains("injected read failure"));
    assert_eq!(adapter.into_inner().get(), Some(&2));
}

#[test]
fn test_adapter_through_mutable_reference_and_box() {
    fn write_through<A: Adapter<i64>>(mut adapter: A) {
        adapter.write(&4).unwrap();
    }

    let mut cell = MemoryCell::new();
    write_through(&mut cell);
    assert_eq!(cell.get(), Some(&4));

    let mut boxed: Box<dyn Adapter<i64>> = Box::new(MemoryCell::new());
    boxed.write(&8).unwrap();
    assert_eq!(boxed.read().unwrap(), 8);
}
