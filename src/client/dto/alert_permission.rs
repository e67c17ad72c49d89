///
/// OS-level alert permission
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertPermission {
    /// User was not asked yet
    Default,
    Granted,
    Denied,
}
