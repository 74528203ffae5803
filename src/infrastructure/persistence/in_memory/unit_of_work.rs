//! # In-Memory Unit of Work
//!
//! [`UnitOfWork`] and [`TaxLineRepository`] implementations that record the
//! tax lines created through them, so tests can see which scope a record
//! was bound to.

use crate::domain::entities::tax_line::{TaxLine, TaxLineFields};
use crate::infrastructure::persistence::traits::{TaxLineRepository, UnitOfWork};
use parking_lot::Mutex;
use std::sync::Arc;

/// Tax line factory that remembers every record it created.
#[derive(Debug, Default)]
pub struct InMemoryTaxLineRepository {
    created: Mutex<Vec<TaxLine>>,
}

impl InMemoryTaxLineRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every record created so far, in creation order.
    #[must_use]
    pub fn created(&self) -> Vec<TaxLine> {
        self.created.lock().clone()
    }

    /// Returns how many records were created.
    #[must_use]
    pub fn created_count(&self) -> usize {
        self.created.lock().len()
    }
}

impl TaxLineRepository for InMemoryTaxLineRepository {
    fn create(&self, fields: TaxLineFields) -> TaxLine {
        let line = TaxLine::create(fields);
        self.created.lock().push(line.clone());
        line
    }
}

/// In-memory persistence scope.
///
/// # Examples
///
/// ```
/// use tax_provider::infrastructure::persistence::UnitOfWork;
/// use tax_provider::infrastructure::persistence::in_memory::InMemoryUnitOfWork;
///
/// let tx = InMemoryUnitOfWork::new("tx-1");
/// assert_eq!(tx.scope_id(), "tx-1");
/// assert_eq!(tx.repository().created_count(), 0);
/// ```
#[derive(Debug)]
pub struct InMemoryUnitOfWork {
    scope_id: String,
    tax_lines: Arc<InMemoryTaxLineRepository>,
}

impl InMemoryUnitOfWork {
    /// Creates a scope with the given label.
    #[must_use]
    pub fn new(scope_id: impl Into<String>) -> Self {
        Self {
            scope_id: scope_id.into(),
            tax_lines: Arc::new(InMemoryTaxLineRepository::new()),
        }
    }

    /// Returns the concrete tax line repository of this scope.
    #[must_use]
    pub fn repository(&self) -> &InMemoryTaxLineRepository {
        &self.tax_lines
    }
}

impl UnitOfWork for InMemoryUnitOfWork {
    fn scope_id(&self) -> &str {
        &self.scope_id
    }

    fn tax_lines(&self) -> Arc<dyn TaxLineRepository> {
        self.tax_lines.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ids::LineItemId;
    use rust_decimal::Decimal;

    fn fields(item: &str) -> TaxLineFields {
        TaxLineFields {
            item_id: LineItemId::new(item).unwrap(),
            rate: Decimal::from(10),
            name: "default".to_string(),
            code: "default".to_string(),
            metadata: None,
        }
    }

    #[test]
    fn created_lines_are_recorded_in_scope() {
        let uow = InMemoryUnitOfWork::new("tx-1");
        let repo = uow.tax_lines();
        let a = repo.create(fields("item_a"));
        let b = repo.create(fields("item_b"));

        let created = uow.repository().created();
        assert_eq!(created, vec![a, b]);
        assert_eq!(uow.repository().created_count(), 2);
    }

    #[test]
    fn scopes_are_independent() {
        let one = InMemoryUnitOfWork::new("one");
        let two = InMemoryUnitOfWork::new("two");
        one.tax_lines().create(fields("item_a"));
        assert_eq!(one.repository().created_count(), 1);
        assert_eq!(two.repository().created_count(), 0);
    }
}
