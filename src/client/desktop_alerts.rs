use super::AlertPermission;

///
/// OS-level alerting raised when a notification is pushed
///
#[cfg_attr(test, mockall::automock)]
pub trait DesktopAlerts: Send + Sync {
    fn permission(&self) -> AlertPermission;

    ///
    /// Asks user for permission
    ///
    /// ### Returns
    /// Permission after user's answer
    ///
    fn request_permission(&self) -> AlertPermission;

    fn show(&self, title: &str, body: &str);
}

///
/// Alerts for environments without OS notifications
///
pub struct NoDesktopAlerts;

impl DesktopAlerts for NoDesktopAlerts {
    fn permission(&self) -> AlertPermission {
        AlertPermission::Denied
    }

    fn request_permission(&self) -> AlertPermission {
        AlertPermission::Denied
    }

    fn show(&self, _title: &str, _body: &str) {}
}
