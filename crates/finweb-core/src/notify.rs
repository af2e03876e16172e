//! User-facing notifications

use crate::types::Severity;

/// Side channel for surfacing load failures to the user
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

impl<F> Notifier for F
where
    F: Fn(&str, Severity) + Send + Sync,
{
    fn notify(&self, message: &str, severity: Severity) {
        self(message, severity)
    }
}

/// Writes notifications to the log as `SEVERITY: message`
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        let line = format!("{}: {}", severity.to_string().to_uppercase(), message);
        match severity {
            Severity::Error => log::error!(target: "finweb::notify", "{}", line),
            Severity::Warning => log::warn!(target: "finweb::notify", "{}", line),
            Severity::Info | Severity::Success => log::info!(target: "finweb::notify", "{}", line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_closure_notifier() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let notifier = move |message: &str, severity: Severity| {
            sink.lock().unwrap().push((message.to_string(), severity));
        };

        notifier.notify("Erro ao carregar subcategorias", Severity::Error);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].1, Severity::Error);
    }
}
