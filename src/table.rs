use crate::allocator::{TICKET_MAX, TICKET_MIN, TICKET_SPACE, allocate};
use crate::error::DrawError;
use crate::item::{DrawResult, TicketRange, WeightedItem};
use crate::resolver::{MissPolicy, resolve_ticket};
use crate::source::{Drawn, RandomSource};

/// Allocated ticket ranges plus the policy for tickets that miss them.
///
/// Build it once per item list, then resolve or draw as often as needed.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketTable {
    ranges: Vec<TicketRange>,
    miss: MissPolicy,
}

impl TicketTable {
    /// Allocate ranges for `items`, failing open on misses.
    ///
    /// # Errors
    /// See [`allocate`].
    pub fn from_items(items: &[WeightedItem]) -> Result<Self, DrawError> {
        Ok(Self {
            ranges: allocate(items)?,
            miss: MissPolicy::default(),
        })
    }

    pub fn with_miss_policy(mut self, miss: MissPolicy) -> Self {
        self.miss = miss;
        self
    }

    pub fn miss_policy(&self) -> MissPolicy {
        self.miss
    }

    pub fn ranges(&self) -> &[TicketRange] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Total tickets owned by all ranges.
    pub fn covered_tickets(&self) -> u64 {
        self.ranges.iter().map(TicketRange::tickets).sum()
    }

    /// Whether the ranges own exactly the whole ticket space.
    pub fn is_complete(&self) -> bool {
        self.covered_tickets() == TICKET_SPACE
    }

    /// Map a ticket to its item.
    ///
    /// # Errors
    /// [`DrawError::NoMatch`] on a miss under [`MissPolicy::FailClosed`].
    pub fn resolve(&self, ticket: i64) -> Result<DrawResult, DrawError> {
        resolve_ticket(ticket, &self.ranges, self.miss)
    }

    /// Resolve tickets in order; the first miss under
    /// [`MissPolicy::FailClosed`] aborts the batch.
    pub fn resolve_batch(&self, tickets: &[i64]) -> Result<Vec<DrawResult>, DrawError> {
        tickets.iter().map(|&t| self.resolve(t)).collect()
    }

    /// Draw one ticket from `source` and resolve it.
    pub async fn draw<S: RandomSource>(&self, source: &S) -> Result<Drawn<DrawResult>, DrawError> {
        let ticket = source.fetch_random_int(TICKET_MIN, TICKET_MAX).await;
        Ok(Drawn {
            source: ticket.source,
            value: self.resolve(ticket.value)?,
        })
    }

    /// Draw `count` tickets with a single source request and resolve each.
    pub async fn draw_batch<S: RandomSource>(
        &self,
        source: &S,
        count: usize,
    ) -> Result<Drawn<Vec<DrawResult>>, DrawError> {
        let tickets = source.fetch_random_integer_batch(count).await;
        Ok(Drawn {
            source: tickets.source,
            value: self.resolve_batch(&tickets.value)?,
        })
    }
}
