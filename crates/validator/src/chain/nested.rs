//! Nested chain over a sub-entity

use super::{ChainState, ValidationChain};
use crate::engine::ChainAggregator;
use crate::foundation::ChainResult;

/// A validation chain over a sub-entity of its parent.
///
/// Created with [`ValidationChain::descend`] or
/// [`ValidationChain::descend_into`]. The nested chain owns its parent and
/// gives it back, with its concrete type, on [`ascend`](Self::ascend).
///
/// # Type Parameters
///
/// * `P` - The parent chain type (a [`Chain`](super::Chain) or another
///   `NestedChain`)
/// * `S` - The sub-entity type
///
/// # Examples
///
/// ```rust
/// use fluentval_validator::prelude::*;
///
/// struct Address {
///     city: String,
/// }
///
/// struct Order {
///     reference: String,
///     shipping: Option<Address>,
/// }
///
/// let order = Order {
///     reference: "A-1".into(),
///     shipping: Some(Address { city: String::new() }),
/// };
///
/// let err = Chain::of_lazy(&order)
///     .not_empty(|o: &Order| &o.reference)
///     .and_then(|c| c.descend(|o| o.shipping.as_ref()))
///     .and_then(|c| c.not_empty_with(|a: &Address| &a.city, "city required"))
///     .and_then(|mut c| c.complete())
///     .unwrap_err();
///
/// assert_eq!(err.to_string(), "city required");
/// ```
pub struct NestedChain<'a, P, S: ?Sized> {
    parent: P,
    state: ChainState<'a, S>,
}

impl<'a, P, S> NestedChain<'a, P, S>
where
    P: ValidationChain<'a>,
    S: ?Sized + 'a,
{
    /// Opens a nested chain with the parent's mode and configuration.
    pub(crate) fn new(parent: P, entity: &'a S) -> Self {
        let depth = parent.depth() + 1;
        let state = ChainState::new(
            entity,
            parent.mode(),
            depth,
            parent.state().config_handle(),
        );
        tracing::trace!(depth, mode = ?parent.mode(), "nested chain opened");
        Self { parent, state }
    }

    /// Returns the parent chain.
    pub fn parent(&self) -> &P {
        &self.parent
    }

    /// Returns to the parent chain.
    ///
    /// Rules still pending here move to the end of the parent's queue, in
    /// order. If the parent is immediate they are evaluated right away and a
    /// failure is returned instead of the parent.
    pub fn ascend(mut self) -> ChainResult<P> {
        let pending = self.state.take_pending();
        let mut parent = self.parent;
        if pending.is_empty() {
            return Ok(parent);
        }

        tracing::trace!(
            depth = self.state.depth(),
            rules = pending.len(),
            "moving pending rules to parent"
        );
        parent.state_mut().append_pending(pending);
        if parent.mode().is_immediate() {
            parent.state_mut().drain_and_raise()?;
        }
        Ok(parent)
    }
}

impl<'a, P, S> ValidationChain<'a> for NestedChain<'a, P, S>
where
    P: ValidationChain<'a>,
    S: ?Sized + 'a,
{
    type Entity = S;

    fn state(&self) -> &ChainState<'a, S> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ChainState<'a, S> {
        &mut self.state
    }

    fn drain_lineage(&mut self, aggregator: &mut ChainAggregator) {
        self.parent.drain_lineage(aggregator);
        aggregator.absorb(self.state.drain());
    }

    /// Evaluates the whole lineage when the parent is deferred, then this
    /// level when it is deferred, and raises one aggregated failure.
    ///
    /// When the parent is immediate its ancestors are not visited.
    fn complete(&mut self) -> ChainResult<()> {
        let parent_deferred = self.parent.mode().is_deferred();
        let self_deferred = self.state.mode().is_deferred();
        if !parent_deferred && !self_deferred {
            return Ok(());
        }

        let mut aggregator = ChainAggregator::new();
        if parent_deferred {
            self.parent.drain_lineage(&mut aggregator);
        }
        if self_deferred {
            aggregator.absorb(self.state.drain());
        }
        aggregator.finish(self.state.config())
    }
}

impl<P, S> std::fmt::Debug for NestedChain<'_, P, S>
where
    P: std::fmt::Debug,
    S: ?Sized,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NestedChain")
            .field("state", &self.state)
            .field("parent", &self.parent)
            .finish()
    }
}
