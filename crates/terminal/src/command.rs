//! Parsing raw prompt text into a closed set of commands.

use crate::content::Page;

/// Every command the dispatcher understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Enter on a blank prompt.
    Empty,
    Clear,
    Settings,
    ClearData,
    ExportData,
    /// `import-data [path]`; the path keeps its original case.
    ImportData(Option<String>),
    Packages {
        refresh: bool,
    },
    PackagesInfo,
    /// `theme [name]`; the name keeps its original case.
    Theme(Option<String>),
    Page(Page),
    /// Anything else, as typed (trimmed).
    Unknown(String),
}

impl Command {
    /// Parses `raw`, ignoring case and surrounding whitespace.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Command::Empty;
        }

        let normalized = trimmed.to_lowercase();
        let mut words = normalized.split_whitespace();
        let head = words.next().unwrap_or_default();
        let rest: Vec<&str> = words.collect();
        let argument = || {
            trimmed
                .split_once(char::is_whitespace)
                .map(|(_, arg)| arg.trim().to_string())
                .filter(|arg| !arg.is_empty())
        };

        match (head, rest.as_slice()) {
            ("clear", []) => Command::Clear,
            ("settings", []) => Command::Settings,
            ("clear-data", []) => Command::ClearData,
            ("export-data", []) => Command::ExportData,
            ("import-data", _) => Command::ImportData(argument()),
            ("packages", []) => Command::Packages { refresh: false },
            ("packages", ["--refresh"]) => Command::Packages { refresh: true },
            ("packages", ["--info"]) => Command::PackagesInfo,
            ("theme", _) => Command::Theme(argument()),
            (name, []) => match Page::from_name(name) {
                Some(page) => Command::Page(page),
                None => Command::Unknown(trimmed.to_string()),
            },
            _ => Command::Unknown(trimmed.to_string()),
        }
    }

    /// Commands whose result arrives after the prompt returns.
    pub fn is_async(&self) -> bool {
        matches!(self, Command::Packages { .. } | Command::PackagesInfo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ignores_case_and_whitespace() {
        assert_eq!(Command::parse("  HeLp \t"), Command::Page(Page::Help));
        assert_eq!(Command::parse("CLEAR"), Command::Clear);
        assert_eq!(Command::parse("   "), Command::Empty);
        assert_eq!(Command::parse(""), Command::Empty);
    }

    #[test]
    fn parse_packages_flags() {
        assert_eq!(
            Command::parse("packages"),
            Command::Packages { refresh: false }
        );
        assert_eq!(
            Command::parse("Packages  --REFRESH"),
            Command::Packages { refresh: true }
        );
        assert_eq!(Command::parse("packages --info"), Command::PackagesInfo);
        assert_eq!(
            Command::parse("packages --bogus"),
            Command::Unknown("packages --bogus".to_string())
        );
    }

    #[test]
    fn parse_keeps_argument_case() {
        assert_eq!(
            Command::parse("import-data  /Tmp/Backup.json "),
            Command::ImportData(Some("/Tmp/Backup.json".to_string()))
        );
        assert_eq!(Command::parse("import-data"), Command::ImportData(None));
        assert_eq!(
            Command::parse("THEME Tokyo Night"),
            Command::Theme(Some("Tokyo Night".to_string()))
        );
        assert_eq!(Command::parse("theme"), Command::Theme(None));
    }

    #[test]
    fn parse_unknown_keeps_trimmed_text() {
        assert_eq!(
            Command::parse("  Sudo rm -rf / "),
            Command::Unknown("Sudo rm -rf /".to_string())
        );
        assert_eq!(
            Command::parse("help me"),
            Command::Unknown("help me".to_string())
        );
    }

    #[test]
    fn only_package_commands_are_async() {
        assert!(Command::parse("packages").is_async());
        assert!(Command::parse("packages --info").is_async());
        assert!(!Command::parse("export-data").is_async());
    }
}
