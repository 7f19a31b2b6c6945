/// Decides whether the state of a search survives between destinations.
///
/// The search core is the same for both policies, they only differ in when the session is
/// started over.
pub trait DestinationReuse {
    /// Keep settled entries and the frontier between calls with the same origin
    fn reuses_settled_state(&self) -> bool;

    fn name(&self) -> &'static str;
}

/// Every destination starts a new search
#[derive(Clone, Copy, Debug, Default)]
pub struct StatelessReuse;

impl DestinationReuse for StatelessReuse {
    fn reuses_settled_state(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "dijkstra"
    }
}

/// Destinations of the same origin resume the previous search
#[derive(Clone, Copy, Debug, Default)]
pub struct SettledReuse;

impl DestinationReuse for SettledReuse {
    fn reuses_settled_state(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "dijkstra_one_to_many"
    }
}
