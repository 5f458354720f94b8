#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Show,
    Hide,
    Back,
    ConfigReload,
}

impl AppEvent {
    /// Parses one line of the control socket protocol.
    pub fn from_command(line: &str) -> Option<Self> {
        match line.trim() {
            "show" => Some(Self::Show),
            "hide" => Some(Self::Hide),
            "back" => Some(Self::Back),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_commands() {
        assert_eq!(AppEvent::from_command("show\n"), Some(AppEvent::Show));
        assert_eq!(AppEvent::from_command("  hide "), Some(AppEvent::Hide));
        assert_eq!(AppEvent::from_command("back"), Some(AppEvent::Back));
        assert_eq!(AppEvent::from_command("reload"), None);
    }
}
