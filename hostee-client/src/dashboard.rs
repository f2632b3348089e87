// hostee-client/src/dashboard.rs
// 主页 - 问候语与用户名

use chrono::{Local, Timelike};
use serde::Serialize;
use shared::models::{DEFAULT_DISPLAY_NAME, Session};

/// Greeting for a local hour of day (0-23)
pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        0..12 => "Buenos días",
        12..18 => "Buenas tardes",
        _ => "Buenas noches",
    }
}

/// Header of the main menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardHeader {
    pub greeting: &'static str,
    pub user_name: String,
}

impl DashboardHeader {
    pub fn new(session: Option<&Session>, hour: u32) -> Self {
        Self {
            greeting: greeting_for_hour(hour),
            user_name: session
                .map(|s| s.display_name().to_string())
                .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string()),
        }
    }

    /// Header for the current local time
    pub fn now(session: Option<&Session>) -> Self {
        Self::new(session, Local::now().hour())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_boundaries() {
        assert_eq!(greeting_for_hour(0), "Buenos días");
        assert_eq!(greeting_for_hour(11), "Buenos días");
        assert_eq!(greeting_for_hour(12), "Buenas tardes");
        assert_eq!(greeting_for_hour(17), "Buenas tardes");
        assert_eq!(greeting_for_hour(18), "Buenas noches");
        assert_eq!(greeting_for_hour(23), "Buenas noches");
    }

    #[test]
    fn test_header_user_name() {
        let session = Session::new("u1", "ana.lopez@hostee.com", "t");
        let header = DashboardHeader::new(Some(&session), 9);
        assert_eq!(header.user_name, "ana.lopez");
        assert_eq!(header.greeting, "Buenos días");

        assert_eq!(DashboardHeader::new(None, 20).user_name, "Usuario");
    }
}
