//! # fairdraw
//!
//! Ticket-range draws for case openings and similar weighted outcomes.
//!
//! Items carry a chance in percentage points. Each percentage point buys
//! 1,000 tickets out of a fixed space of 100,000 (`0..=99_999`). A draw
//! picks a ticket, ideally from random.org so the number can be audited,
//! and the item whose range holds the ticket wins.
//!
//! The moving parts:
//!
//! 1. [`allocate`] turns a [`WeightedItem`] list into contiguous [`TicketRange`]s.
//! 2. [`resolve_ticket`] / [`TicketTable::resolve`] map a ticket to a [`DrawResult`].
//! 3. A [`RandomSource`] supplies tickets: [`RandomOrgClient`] for the external
//!    service with local fallback, or [`LocalSource`] for local randomness only.
//!    Every value comes back as a [`Drawn`] tagged with its [`Source`].
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use fairdraw::{RandomOrgClient, RandomOrgConfig, TicketTable, WeightedItem};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let table = TicketTable::from_items(&[
//!     WeightedItem::new("Knife", 1.0),
//!     WeightedItem::new("Gloves", 4.0),
//!     WeightedItem::new("Sticker", 95.0),
//! ])?;
//!
//! let client = RandomOrgClient::new(RandomOrgConfig::from_env())?;
//! let drawn = table.draw(&client).await?;
//! println!("{} via {:?}", drawn.value.range.item, drawn.source);
//! # Ok(()) }
//! ```
//!
//! ## Quick start (enum + macro)
//!
//! ```rust,ignore
//! use fairdraw::{LocalSource, TicketEnum};
//!
//! #[derive(Copy, Clone, Debug, TicketEnum)]
//! enum Case {
//!     #[chance(0.5)] Knife,
//!     #[chance(4.5)] Gloves,
//!     #[chance(95)]  Sticker,
//! }
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let table = Case::ticket_table()?;
//! let drawn = table.draw(&LocalSource).await?;
//! let item = Case::from_draw(&drawn.value);
//! # Ok(()) }
//! ```
//!
//! ## Performance
//! * **Allocate**: O(n).
//! * **Resolve**: O(n) linear scan, first match wins.
//! * **Draw**: one HTTP request per call, whatever the batch size.
//!
//! ## Gotchas
//! * Chances are not normalized. A total under 100 leaves tickets with no
//!   owner; check [`TicketTable::is_complete`] if that matters.
//! * `chance * 1000` must be a whole number; `0.0005` is rejected.
//! * A single chance above 100 is rejected. Totals above 100 are not.
//! * Misses fail open to the first item by default. Use
//!   [`MissPolicy::FailClosed`] to get [`DrawError::NoMatch`] instead.
//! * Fallback values are **not** verifiable. Check [`Drawn::source`] before
//!   presenting a draw as provably fair.

mod allocator;
mod error;
mod item;
mod random_org;
mod resolver;
mod source;
mod table;
mod verify;

pub use allocator::{
    MAX_CHANCE, TICKET_MAX, TICKET_MIN, TICKET_SPACE, TICKETS_PER_PERCENT, allocate,
};
pub use error::{DrawError, SourceError};
pub use item::{DrawResult, TicketRange, WeightedItem};
pub use random_org::{
    API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, ENDPOINT_ENV, RandomOrgClient,
    RandomOrgConfig, TIMEOUT_MS_ENV,
};
pub use resolver::{MissPolicy, find_range, resolve_ticket};
pub use source::{Drawn, LocalSource, RandomSource, Source, local_integers};
pub use table::TicketTable;
pub use verify::{TicketVerification, verify_ticket};

/// Derive macro imported from `fairdraw_macros`.
/// See the crate-level example for usage.
pub use fairdraw_macros::TicketEnum;

/// Trait implemented by the `TicketEnum` derive macro.
///
/// Each variant, its name and its chance are exposed via
/// [`TicketEnum::ENTRIES`], in declaration order.
pub trait TicketEnum: Sized + 'static {
    /// All `(variant, name, chance)` triples for the enum.
    const ENTRIES: &'static [(Self, &'static str, f64)];

    /// One [`WeightedItem`] per variant, named after the variant.
    fn items() -> Vec<WeightedItem> {
        Self::ENTRIES
            .iter()
            .map(|&(_, name, chance)| WeightedItem::new(name, chance))
            .collect()
    }

    /// Allocate a [`TicketTable`] from the enum entries.
    ///
    /// # Errors
    /// See [`allocate`].
    fn ticket_table() -> Result<TicketTable, DrawError> {
        TicketTable::from_items(&Self::items())
    }

    /// The variant a draw landed on, if the result came from this enum's table.
    fn from_draw(result: &DrawResult) -> Option<Self>
    where
        Self: Copy,
    {
        Self::ENTRIES.get(result.index).map(|&(variant, _, _)| variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_pairs() {
        let table = TicketTable::from_items(&[
            WeightedItem::new("A", 1.0),
            WeightedItem::new("B", 99.0),
        ])
        .unwrap();
        assert!(table.is_complete());
        assert_eq!(table.resolve(500).unwrap().range.item, "A");
        assert_eq!(table.resolve(50_000).unwrap().range.item, "B");
    }
}
