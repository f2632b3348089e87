//! Settings screen state and help texts

use serde::{Deserialize, Serialize};

use crate::notice::Notice;

/// In-memory preference toggles; not persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub notifications: bool,
    pub dark_theme: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            notifications: true,
            dark_theme: false,
        }
    }
}

impl Preferences {
    /// Flip notifications; returns the new value
    pub fn toggle_notifications(&mut self) -> bool {
        self.notifications = !self.notifications;
        self.notifications
    }

    /// Flip the dark theme; returns the new value
    pub fn toggle_dark_theme(&mut self) -> bool {
        self.dark_theme = !self.dark_theme;
        self.dark_theme
    }
}

/// Static help entries of the settings and profile screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    ChangePassword,
    About,
    Support,
    /// Help button of the profile screen
    Help,
}

impl HelpTopic {
    pub fn title(&self) -> &'static str {
        match self {
            Self::ChangePassword => "Cambiar contraseña",
            Self::About => "Acerca de",
            Self::Support => "Soporte",
            Self::Help => "Ayuda",
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Self::ChangePassword => {
                "Solicita el cambio de contraseña desde la app o contacta a soporte."
            }
            Self::About => "Hostee App\nVersión 1.0\nDesarrollado por NOVA Host S.A. de C.V.",
            Self::Support => {
                "Para soporte técnico, contacta a admin@hostee.com o comunícate con tu supervisor."
            }
            Self::Help => "Contacta al administrador para soporte",
        }
    }

    pub fn notice(&self) -> Notice {
        Notice::info(self.title(), self.text())
    }
}
