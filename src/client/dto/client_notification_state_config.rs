///
/// What happens to local state when server rejects an optimistic mutation
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OptimisticFailurePolicy {
    /// Keep local change until next full refresh
    #[default]
    Keep,

    /// Restore entries and counter changed by the mutation
    Rollback,
}

#[derive(Debug, Clone, Default)]
pub struct ClientNotificationStateConfig {
    pub on_rejected_mutation: OptimisticFailurePolicy,
}
