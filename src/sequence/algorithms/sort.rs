use crate::sequence::{Link, Sequence};
use log::trace;

const INSERTION_SORT_THRESHOLD: usize = 8;

/// Stable merge sort that relinks nodes in place; no element is moved or
/// cloned.
pub(crate) fn merge_sort<T, F>(list: &mut Sequence<T>, mut less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    let (start, end) = (list.front_node(), None);
    let len = list.len();
    trace!("sorting a sequence of {} nodes", len);
    if len < 2 {
    } else if len <= INSERTION_SORT_THRESHOLD {
        insertion_sort_range(list, start, end, &mut less);
    } else {
        merge_sort_range(list, start, end, &mut less);
    }
}

/// Compare the elements at `a` and `b`. Links are never the ghost position
/// here; a ghost compares as not less.
fn less_at<T, F>(list: &Sequence<T>, less: &mut F, a: Link, b: Link) -> bool
where
    F: FnMut(&T, &T) -> bool,
{
    match (a, b) {
        (Some(a), Some(b)) => less(&list.nodes[a].element, &list.nodes[b].element),
        _ => false,
    }
}

fn mid_of_range<T>(list: &Sequence<T>, mut start: Link, end: Link) -> (Link, usize) {
    let mut mid = start;
    let mut len = 0;
    while start != end {
        len += 1;
        start = list.next_of(start);
        if start != end {
            len += 1;
            start = list.next_of(start);
            mid = list.next_of(mid);
        }
    }
    (mid, len)
}

fn merge_sort_range<T, F>(list: &mut Sequence<T>, mut start: Link, end: Link, less: &mut F) -> Link
where
    F: FnMut(&T, &T) -> bool,
{
    let (mut mid, len) = mid_of_range(list, start, end);
    if len <= INSERTION_SORT_THRESHOLD {
        return insertion_sort_range(list, start, end, less);
    }

    if start != mid && list.next_of(start) != mid {
        start = merge_sort_range(list, start, mid, less);
    }
    if mid != end && list.next_of(mid) != end {
        mid = merge_sort_range(list, mid, end, less);
    }

    if start != mid && mid != end {
        start = merge_range(list, start, mid, end, less);
    }
    start
}

fn merge_range<T, F>(
    list: &mut Sequence<T>,
    mut start: Link,
    mid: Link,
    end: Link,
    less: &mut F,
) -> Link
where
    F: FnMut(&T, &T) -> bool,
{
    // The range is logically partitioned into two sub-ranges, both of
    // which are internally sorted:
    // - merged range: `start..mid`,
    // - unmerged range: `mid..end`.
    //
    // Runs of the unmerged range are then moved one by one into the
    // merged range.
    let (mut merged, merged_back, mut to_merge) = (start, list.prev_of(mid), mid);
    // If the back of merged range <= the front of unmerged range,
    // it is fully sorted.
    while to_merge != end && less_at(list, less, to_merge, merged_back) {
        // Find `merged` in the merged range, where `*to_merge < *merged`.
        while merged != to_merge && !less_at(list, less, to_merge, merged) {
            merged = list.next_of(merged);
        }
        if merged == to_merge {
            break;
        }

        // Find a run `to_merge..next_to_merge` in the unmerged range,
        // where every element is < `*merged`.
        let mut next_to_merge = list.next_of(to_merge);
        while next_to_merge != end && less_at(list, less, next_to_merge, merged) {
            next_to_merge = list.next_of(next_to_merge);
        }
        if merged == start {
            start = to_merge;
        }
        // Move the run to the node before `merged`.
        if let (Some(front), Some(back)) = (to_merge, list.prev_of(next_to_merge)) {
            list.move_nodes(front, back, merged);
        }
        to_merge = next_to_merge;
    }
    start
}

fn insertion_sort_range<T, F>(
    list: &mut Sequence<T>,
    mut start: Link,
    end: Link,
    less: &mut F,
) -> Link
where
    F: FnMut(&T, &T) -> bool,
{
    let (mut sorted_back, mut to_sort) = (start, list.next_of(start));
    loop {
        // Skip nodes that are already in place.
        while to_sort != end && !less_at(list, less, to_sort, sorted_back) {
            sorted_back = to_sort;
            to_sort = list.next_of(to_sort);
        }
        let Some(key) = to_sort.filter(|_| to_sort != end) else {
            break;
        };
        // Find `sorted` in the sorted range, where `*to_sort < *sorted`.
        let mut sorted = start;
        while sorted != to_sort && !less_at(list, less, to_sort, sorted) {
            sorted = list.next_of(sorted);
        }
        if sorted == start {
            start = to_sort;
        }
        to_sort = list.next_of(to_sort);
        list.move_node(key, sorted);
    }
    start
}
