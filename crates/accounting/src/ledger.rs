use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use warehouse_core::{DomainError, DomainResult, Money};

/// One completed operation (immutable once recorded).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRecord {
    /// Zero-based position in the log.
    pub sequence: usize,
    pub description: String,
    pub occurred_at: DateTime<Utc>,
}

/// Append-only, chronological log of completed operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationLog {
    records: Vec<OperationRecord>,
}

impl OperationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[OperationRecord] {
        &self.records
    }

    pub fn append(&mut self, description: impl Into<String>, occurred_at: DateTime<Utc>) {
        let sequence = self.records.len();
        self.records.push(OperationRecord {
            sequence,
            description: description.into(),
            occurred_at,
        });
    }

    /// Records in `[start, end)`.
    ///
    /// A missing bound defaults to the start or end of the log. Rejects
    /// `start < 0`, `end > len` and `start > end`.
    pub fn review(&self, start: Option<i64>, end: Option<i64>) -> DomainResult<&[OperationRecord]> {
        let len = self.records.len();
        let start = start.unwrap_or(0);
        let end = end.unwrap_or(len as i64);

        if start < 0 || end > len as i64 || start > end {
            return Err(DomainError::InvalidRange { start, end, len });
        }

        Ok(&self.records[start as usize..end as usize])
    }
}

/// Cash account plus the log of operations that moved it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    balance: Money,
    operations: OperationLog,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn operations(&self) -> &OperationLog {
        &self.operations
    }

    /// Check that `total` can be paid out of the current balance.
    pub fn ensure_funds(&self, total: Money) -> DomainResult<()> {
        if total > self.balance {
            return Err(DomainError::insufficient_funds(total, self.balance));
        }
        Ok(())
    }

    /// Signed adjustment; the balance itself is unbounded.
    pub fn adjust(&mut self, amount: Money) -> Money {
        self.balance += amount;
        self.balance
    }

    pub fn credit(&mut self, amount: Money) -> Money {
        self.adjust(amount)
    }

    pub fn debit(&mut self, amount: Money) -> Money {
        self.balance -= amount;
        self.balance
    }

    pub fn record(&mut self, description: impl Into<String>, occurred_at: DateTime<Utc>) {
        self.operations.append(description, occurred_at);
    }
}
