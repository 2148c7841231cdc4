use inspection_form::{NotificationKind, NotificationSink};

/// Prints notifications to the terminal: successes to stdout, errors to stderr
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn notify(&self, message: &str, kind: NotificationKind) {
        match kind {
            NotificationKind::Success => println!("{}", render(message, kind)),
            NotificationKind::Error => eprintln!("{}", render(message, kind)),
        }
    }
}

fn render(message: &str, kind: NotificationKind) -> String {
    match kind {
        NotificationKind::Success => message.to_string(),
        NotificationKind::Error => format!("Error: {}", message),
    }
}
