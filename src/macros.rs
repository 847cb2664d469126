#![allow(unused_macros)]

/// Helper macro for reading locked items
///
/// ```rust, ignore
///  let table = read_lock!(registry.table);
///  if table.is_some() { ... }
/// ```
macro_rules! read_lock {
    ($arc_rwlock:expr) => {
        $arc_rwlock.read().expect("Failed to acquire read lock")
    };
}

/// Helper macro for writing to locked items
///
/// ```rust, ignore
///  let mut table = write_lock!(registry.table);
///  *table = Some(built);
/// ```
macro_rules! write_lock {
    ($arc_rwlock:expr) => {
        $arc_rwlock.write().expect("Failed to acquire write lock")
    };
}
