//! User-facing notices
//!
//! Service calls return `ClientResult`; screens turn failures into a
//! [`Notice`] at the call site with [`Notice::from_error`].

use serde::Serialize;

use crate::{AuthFailure, ClientError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// Flow a failure happened in; picks the generic message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SignIn,
    Register,
    SignOut,
    LoadProfile,
    LoadProfileForm,
    SaveProfile,
    WatchTables,
}

impl Action {
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::SignIn => "Error al iniciar sesión. Verifica tus credenciales",
            Self::Register => "No se pudo crear la cuenta",
            Self::SignOut => "No se pudo cerrar la sesión",
            Self::LoadProfile => "No se pudieron cargar los datos del perfil",
            Self::LoadProfileForm => "No se pudieron cargar los datos.",
            Self::SaveProfile => "No se pudo guardar el perfil",
            Self::WatchTables => "No se pudo conectar con el estado de las mesas",
        }
    }
}

/// Message box content: a title and a body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, "Error", message)
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, title, message)
    }

    /// Shown after a successful registration
    pub fn welcome(name: &str) -> Self {
        Self::new(NoticeKind::Success, "¡Éxito!", format!("Bienvenido, {name}"))
    }

    pub fn profile_saved() -> Self {
        Self::new(NoticeKind::Success, "Éxito", "Perfil actualizado correctamente")
    }

    /// Error notice for a failed `action`
    ///
    /// Local validation and auth rejections keep their specific message;
    /// everything else gets the generic message of the action.
    pub fn from_error(err: &ClientError, action: Action) -> Self {
        let message = match err {
            ClientError::Validation(v) => v.user_message(),
            ClientError::Auth(AuthFailure::Other(_)) => action.fallback_message(),
            ClientError::Auth(failure) => failure.user_message(),
            ClientError::Timeout { .. } => "La operación tardó demasiado. Intenta de nuevo",
            ClientError::NotAuthenticated => "Inicia sesión para continuar",
            _ => action.fallback_message(),
        };
        Self::error(message)
    }
}
