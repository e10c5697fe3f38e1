//! Mapping a drawn ticket back to the item that owns it.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::DrawError;
use crate::item::{DrawResult, TicketRange};

/// What to do when a ticket lands outside every range.
///
/// This happens when chances sum below 100 or the ticket is outside
/// `[0, 99999]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissPolicy {
    /// Award the first item and log a warning.
    #[default]
    FailOpen,
    /// Return [`DrawError::NoMatch`].
    FailClosed,
}

/// Index of the first range containing `ticket`, scanning in input order.
///
/// Overlapping ranges are not detected; the earliest one wins.
pub fn find_range(ticket: i64, ranges: &[TicketRange]) -> Option<usize> {
    ranges.iter().position(|range| range.contains(ticket))
}

/// Resolve `ticket` against `ranges` under `policy`.
///
/// # Errors
/// * [`DrawError::Empty`] if `ranges` is empty.
/// * [`DrawError::NoMatch`] on a miss under [`MissPolicy::FailClosed`].
pub fn resolve_ticket(
    ticket: i64,
    ranges: &[TicketRange],
    policy: MissPolicy,
) -> Result<DrawResult, DrawError> {
    if ranges.is_empty() {
        return Err(DrawError::Empty);
    }
    let index = match (find_range(ticket, ranges), policy) {
        (Some(index), _) => index,
        (None, MissPolicy::FailOpen) => {
            warn!(
                ticket,
                ranges = ranges.len(),
                "ticket outside every range, awarding first item"
            );
            0
        }
        (None, MissPolicy::FailClosed) => return Err(DrawError::NoMatch { ticket }),
    };
    Ok(DrawResult {
        index,
        range: ranges[index].clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::allocate;
    use crate::item::WeightedItem;

    fn ranges(pairs: &[(&str, f64)]) -> Vec<TicketRange> {
        let items: Vec<_> = pairs
            .iter()
            .map(|&(name, chance)| WeightedItem::new(name, chance))
            .collect();
        allocate(&items).unwrap()
    }

    #[test]
    fn resolves_inside_each_range() {
        let ranges = ranges(&[("A", 1.0), ("B", 99.0)]);

        let a = resolve_ticket(500, &ranges, MissPolicy::FailOpen).unwrap();
        assert_eq!(a.index, 0);
        assert_eq!(a.range, ranges[0]);

        let b = resolve_ticket(50_000, &ranges, MissPolicy::FailOpen).unwrap();
        assert_eq!(b.index, 1);
        assert_eq!(b.range.item, "B");

        // boundaries
        assert_eq!(resolve_ticket(999, &ranges, MissPolicy::FailClosed).unwrap().index, 0);
        assert_eq!(resolve_ticket(1000, &ranges, MissPolicy::FailClosed).unwrap().index, 1);
        assert_eq!(resolve_ticket(99_999, &ranges, MissPolicy::FailClosed).unwrap().index, 1);
    }

    #[test]
    fn empty_range_never_matches() {
        let ranges = ranges(&[("A", 0.0), ("B", 100.0)]);
        let result = resolve_ticket(0, &ranges, MissPolicy::FailOpen).unwrap();
        assert_eq!(result.index, 1);
        assert_eq!(result.range.item, "B");
    }

    #[test]
    fn miss_fails_open_to_first_item() {
        let ranges = ranges(&[("A", 10.0), ("B", 20.0)]);
        for ticket in [30_000, 99_999, -1, 100_000] {
            let result = resolve_ticket(ticket, &ranges, MissPolicy::FailOpen).unwrap();
            assert_eq!(result.index, 0, "ticket={ticket}");
            assert_eq!(result.range.item, "A");
        }
    }

    #[test]
    fn miss_fails_closed_with_no_match() {
        let ranges = ranges(&[("A", 10.0), ("B", 20.0)]);
        assert_eq!(
            resolve_ticket(30_000, &ranges, MissPolicy::FailClosed),
            Err(DrawError::NoMatch { ticket: 30_000 })
        );
    }

    #[test]
    fn overlapping_ranges_prefer_earliest() {
        let mut ranges = ranges(&[("A", 50.0), ("B", 50.0)]);
        ranges[1].start_ticket = 0;
        assert_eq!(find_range(10, &ranges), Some(0));
        assert_eq!(find_range(60_000, &ranges), Some(1));
    }

    #[test]
    fn empty_list_is_an_error() {
        assert_eq!(
            resolve_ticket(0, &[], MissPolicy::FailOpen),
            Err(DrawError::Empty)
        );
    }
}
