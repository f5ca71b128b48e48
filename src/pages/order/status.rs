use crate::{AdminError, AdminResult};

use super::{Order, OrderStatus};

impl Order {
    /// Moves to the next workflow status.
    pub fn advance(&mut self) -> AdminResult<OrderStatus> {
        let next = self.status.next().ok_or_else(|| {
            AdminError::transition(format!("Order {} is already {}", self.id, self.status))
        })?;
        self.status = next;
        Ok(next)
    }

    /// Moves back to the previous workflow status.
    pub fn retreat(&mut self) -> AdminResult<OrderStatus> {
        let prev = self.status.prev().ok_or_else(|| {
            AdminError::transition(format!("Order {} is still {}", self.id, self.status))
        })?;
        self.status = prev;
        Ok(prev)
    }

    pub fn toggle_paid(&mut self) -> bool {
        self.paid = !self.paid;
        self.paid
    }
}
