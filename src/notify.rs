//! Transient toast notifications.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    fn background(self) -> &'static str {
        match self {
            ToastKind::Success => "bg-green-500",
            ToastKind::Error => "bg-red-500",
            ToastKind::Warning => "bg-yellow-500",
            ToastKind::Info => "bg-blue-500",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, message)
    }

    /// Class list for the floating toast element.
    pub fn class_name(&self) -> String {
        format!(
            "fixed top-4 right-4 p-4 rounded-lg text-white z-50 {}",
            self.kind.background()
        )
    }
}

/// Anything that can surface a toast to the user.
pub trait Notifier {
    fn notify(&self, toast: Toast);
}
