use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use warehouse_accounting::{Ledger, OperationLog, OperationRecord};
use warehouse_core::{
    Aggregate, AggregateRoot, DomainError, DomainResult, Money, Quantity, SessionId,
};
use warehouse_events::Event;
use warehouse_inventory::Inventory;

/// Aggregate root: Session (balance + inventory + operation log).
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    id: SessionId,
    ledger: Ledger,
    inventory: Inventory,
    version: u64,
}

impl Session {
    /// A fresh session: zero balance, empty inventory, empty log.
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            ledger: Ledger::new(),
            inventory: Inventory::new(),
            version: 0,
        }
    }

    pub fn balance(&self) -> Money {
        self.ledger.balance()
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn operations(&self) -> &OperationLog {
        self.ledger.operations()
    }

    /// Logged operations in `[start, end)`; blank bounds cover the whole log.
    pub fn review(&self, start: Option<i64>, end: Option<i64>) -> DomainResult<&[OperationRecord]> {
        self.ledger.operations().review(start, end)
    }
}

impl AggregateRoot for Session {
    type Id = SessionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AdjustBalance (signed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustBalance {
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RecordSale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSale {
    pub product: String,
    pub price: Money,
    pub quantity: Quantity,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RecordPurchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPurchase {
    pub product: String,
    pub price: Money,
    pub quantity: Quantity,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionCommand {
    AdjustBalance(AdjustBalance),
    RecordSale(RecordSale),
    RecordPurchase(RecordPurchase),
}

/// Event: BalanceAdjusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceAdjusted {
    pub amount: Money,
    pub new_balance: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Event: SaleRecorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecorded {
    pub product: String,
    pub price: Money,
    pub quantity: Quantity,
    pub total: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Event: PurchaseRecorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecorded {
    pub product: String,
    pub price: Money,
    pub quantity: Quantity,
    pub total: Money,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    BalanceAdjusted(BalanceAdjusted),
    SaleRecorded(SaleRecorded),
    PurchaseRecorded(PurchaseRecorded),
}

impl Event for SessionEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SessionEvent::BalanceAdjusted(_) => "session.balance.adjusted",
            SessionEvent::SaleRecorded(_) => "session.sale.recorded",
            SessionEvent::PurchaseRecorded(_) => "session.purchase.recorded",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            SessionEvent::BalanceAdjusted(e) => e.occurred_at,
            SessionEvent::SaleRecorded(e) => e.occurred_at,
            SessionEvent::PurchaseRecorded(e) => e.occurred_at,
        }
    }

    fn describe(&self) -> String {
        match self {
            SessionEvent::BalanceAdjusted(e) => {
                format!("Balance changed by {}, new balance: {}", e.amount, e.new_balance)
            }
            SessionEvent::SaleRecorded(e) => format!(
                "Sold {} of {} at {} each. Total: {}",
                e.quantity, e.product, e.price, e.total
            ),
            SessionEvent::PurchaseRecorded(e) => format!(
                "Purchased {} of {} at {} each. Total: {}",
                e.quantity, e.product, e.price, e.total
            ),
        }
    }
}

impl Aggregate for Session {
    type Command = SessionCommand;
    type Event = SessionEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            SessionEvent::BalanceAdjusted(e) => {
                self.ledger.adjust(e.amount);
            }
            SessionEvent::SaleRecorded(e) => {
                // `handle` only emits sales that fit the stock on hand. A sale
                // that does not fit is dropped whole: no cash, no log entry.
                if let Err(err) = self.inventory.withdraw(&e.product, e.quantity) {
                    tracing::error!(%err, product = %e.product, "sale event without stock ignored");
                    return;
                }
                self.ledger.credit(e.total);
            }
            SessionEvent::PurchaseRecorded(e) => {
                self.ledger.debit(e.total);
                self.inventory.receive(&e.product, e.price, e.quantity);
            }
        }

        // Only accepted operations reach `apply`, so the log holds exactly one
        // entry per successful balance change, sale or purchase.
        self.ledger.record(event.describe(), event.occurred_at());
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            SessionCommand::AdjustBalance(cmd) => self.handle_adjust(cmd),
            SessionCommand::RecordSale(cmd) => self.handle_sale(cmd),
            SessionCommand::RecordPurchase(cmd) => self.handle_purchase(cmd),
        }
    }
}

impl Session {
    fn ensure_finite(value: Money, what: &str) -> DomainResult<()> {
        if !value.is_finite() {
            return Err(DomainError::validation(format!("{what} must be a finite number")));
        }
        Ok(())
    }

    fn handle_adjust(&self, cmd: &AdjustBalance) -> DomainResult<Vec<SessionEvent>> {
        Self::ensure_finite(cmd.amount, "amount")?;

        Ok(vec![SessionEvent::BalanceAdjusted(BalanceAdjusted {
            amount: cmd.amount,
            new_balance: self.ledger.balance() + cmd.amount,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_sale(&self, cmd: &RecordSale) -> DomainResult<Vec<SessionEvent>> {
        Self::ensure_finite(cmd.price, "price")?;
        self.inventory.ensure_available(&cmd.product, cmd.quantity)?;

        Ok(vec![SessionEvent::SaleRecorded(SaleRecorded {
            product: cmd.product.clone(),
            price: cmd.price,
            quantity: cmd.quantity,
            total: cmd.price.times(cmd.quantity),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_purchase(&self, cmd: &RecordPurchase) -> DomainResult<Vec<SessionEvent>> {
        Self::ensure_finite(cmd.price, "price")?;

        let on_hand = self.inventory.stock_of(&cmd.product);
        if on_hand.checked_add(cmd.quantity).is_none() {
            return Err(DomainError::validation(format!(
                "stock of {:?} cannot exceed {} units",
                cmd.product,
                Quantity::MAX
            )));
        }

        // Funds can only be checked once the total is known.
        let total = cmd.price.times(cmd.quantity);
        self.ledger.ensure_funds(total)?;

        Ok(vec![SessionEvent::PurchaseRecorded(PurchaseRecorded {
            product: cmd.product.clone(),
            price: cmd.price,
            quantity: cmd.quantity,
            total,
            occurred_at: cmd.occurred_at,
        })])
    }
}
