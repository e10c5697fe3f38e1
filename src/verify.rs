use serde::{Deserialize, Serialize};

use crate::allocator::{TICKET_MAX, TICKET_MIN};

/// Outcome of a ticket bounds check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketVerification {
    pub valid: bool,
    pub message: String,
}

/// Check that `ticket` lies in `[0, 99999]`.
///
/// This only validates the range. It does not check a draw against
/// committed seeds.
pub fn verify_ticket(ticket: i64) -> TicketVerification {
    let valid = (TICKET_MIN..=TICKET_MAX).contains(&ticket);
    let message = if valid {
        format!("Ticket {ticket} is within the valid range {TICKET_MIN}-{TICKET_MAX}")
    } else {
        format!("Ticket {ticket} is outside the valid range {TICKET_MIN}-{TICKET_MAX}")
    };
    TicketVerification { valid, message }
}
