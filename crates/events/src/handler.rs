use warehouse_core::Aggregate;

use crate::Event;

/// Execute an aggregate command deterministically (no IO).
///
/// 1. **Decide**: calls `aggregate.handle(command)` to get events (pure, no mutation)
/// 2. **Evolve**: applies each event to the aggregate via `aggregate.apply(event)`
///
/// When `handle` rejects the command nothing is applied, so the aggregate is
/// left exactly as it was.
pub fn execute<A>(aggregate: &mut A, command: &A::Command) -> Result<Vec<A::Event>, A::Error>
where
    A: Aggregate,
    A::Event: Event,
{
    let events = match A::handle(aggregate, command) {
        Ok(events) => events,
        Err(err) => {
            tracing::debug!(?err, "command rejected");
            return Err(err);
        }
    };

    for ev in &events {
        A::apply(aggregate, ev);
        tracing::debug!(
            event_type = ev.event_type(),
            version = aggregate.version(),
            "event applied"
        );
    }
    Ok(events)
}
