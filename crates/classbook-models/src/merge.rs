/// Appends the incoming values that are not already present.
///
/// Keeps the original order and drops duplicates inside `incoming` too, so
/// applying the same patch twice leaves the list unchanged.
pub(crate) fn append_unique<T: PartialEq>(existing: &mut Vec<T>, incoming: Vec<T>) {
    for value in incoming {
        if !existing.contains(&value) {
            existing.push(value);
        }
    }
}

/// Returns the first value that appears more than once.
pub fn first_duplicate<T: PartialEq>(values: &[T]) -> Option<&T> {
    values
        .iter()
        .enumerate()
        .find(|(i, value)| values[..*i].contains(value))
        .map(|(_, value)| value)
}
