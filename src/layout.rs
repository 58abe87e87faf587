//! Grid row planning.
//!
//! A layout schedule is a list of column counts, one per row. Targets are
//! consumed left to right; anything left once the schedule runs out lands in
//! a single overflow row.

/// Column count used when a hosts file has an empty `cols` list.
pub const DEFAULT_SCHEDULE: [i64; 1] = [3];

/// One contiguous run of targets laid out side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<T> {
    items: Vec<T>,
}

impl<T> Row<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> From<Vec<T>> for Row<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

/// Partition `targets` into rows following `schedule`.
///
/// A schedule entry of zero or less produces an empty row and consumes
/// nothing. Schedule entries left over once every target is placed are
/// ignored.
pub fn plan_rows<T>(targets: Vec<T>, schedule: &[i64]) -> Vec<Row<T>> {
    let mut rows = Vec::new();
    let mut remaining = targets.into_iter().peekable();

    for &cols in schedule {
        if remaining.peek().is_none() {
            break;
        }
        if cols <= 0 {
            rows.push(Row::from(Vec::new()));
            continue;
        }
        let take = usize::try_from(cols).unwrap_or(usize::MAX);
        rows.push(Row::from(remaining.by_ref().take(take).collect::<Vec<_>>()));
    }

    let overflow: Vec<T> = remaining.collect();
    if !overflow.is_empty() {
        rows.push(Row::from(overflow));
    }
    rows
}
