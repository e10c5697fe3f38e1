//! Ticket range allocation over a fixed 100,000 ticket space.

use crate::error::DrawError;
use crate::item::{TicketRange, WeightedItem};

/// Lowest valid ticket.
pub const TICKET_MIN: i64 = 0;
/// Highest valid ticket.
pub const TICKET_MAX: i64 = 99_999;
/// Size of the ticket space.
pub const TICKET_SPACE: u64 = 100_000;
/// Tickets per percentage point of chance.
pub const TICKETS_PER_PERCENT: f64 = 1_000.0;
/// Largest chance a single item may carry, in percentage points.
pub const MAX_CHANCE: f64 = 100.0;

// Slack for binary float noise, e.g. 1.001 * 1000 = 1000.9999999999999.
const FRACTION_TOLERANCE: f64 = 1e-6;

/// Whole ticket count for a chance, or `None` if it is not integral.
///
/// `chance` must already be checked against `0..=MAX_CHANCE`, which keeps
/// the count at or below [`TICKET_SPACE`].
fn ticket_count(chance: f64) -> Option<u64> {
    let tickets = chance * TICKETS_PER_PERCENT;
    let rounded = tickets.round();
    ((tickets - rounded).abs() <= FRACTION_TOLERANCE).then_some(rounded as u64)
}

/// Assign each item a contiguous inclusive ticket range, in input order.
///
/// Item `i` receives `chance * 1000` tickets starting right after item
/// `i - 1`. Zero-chance items get an empty range (`start == end + 1`) and
/// the next item starts at the same offset. Chances are not normalized:
/// a total below 100 leaves the top of the space unowned and a total above
/// 100 runs past [`TICKET_MAX`].
///
/// # Errors
/// * [`DrawError::Empty`] if there are no items.
/// * [`DrawError::NonFinite`] for `NaN`/∞ chances.
/// * [`DrawError::Negative`] for negative chances.
/// * [`DrawError::ChanceTooLarge`] for a single chance above 100.
/// * [`DrawError::TicketOverflow`] if the running offset leaves `i64`.
/// * [`DrawError::FractionalTickets`] if `chance * 1000` is not a whole number.
///
/// # Complexity
/// O(n) time / O(n) space.
pub fn allocate(items: &[WeightedItem]) -> Result<Vec<TicketRange>, DrawError> {
    if items.is_empty() {
        return Err(DrawError::Empty);
    }

    let mut counts = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let chance = item.chance;
        if !chance.is_finite() {
            return Err(DrawError::NonFinite { index, value: chance });
        }
        if chance < 0.0 {
            return Err(DrawError::Negative { index, value: chance });
        }
        if chance > MAX_CHANCE {
            return Err(DrawError::ChanceTooLarge { index, value: chance });
        }
        let count = ticket_count(chance).ok_or(DrawError::FractionalTickets {
            index,
            chance,
            tickets: chance * TICKETS_PER_PERCENT,
        })?;
        counts.push(i64::try_from(count).map_err(|_| DrawError::TicketOverflow { index })?);
    }

    let mut offset = TICKET_MIN;
    let mut ranges = Vec::with_capacity(items.len());
    for (index, (item, count)) in items.iter().zip(counts).enumerate() {
        let start_ticket = offset;
        offset = offset
            .checked_add(count)
            .ok_or(DrawError::TicketOverflow { index })?;
        ranges.push(TicketRange {
            item: item.name.clone(),
            start_ticket,
            end_ticket: offset - 1,
            chance: item.chance,
            value: item.value,
            rarity: item.rarity.clone(),
            color: item.color.clone(),
            id: item.id.clone(),
        });
    }

    Ok(ranges)
}
