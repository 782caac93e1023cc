//! Compiled-in text: the welcome banner, the static pages, and the theme
//! gallery.

/// Banner placed at the top of every new tab.
pub const WELCOME_MESSAGE: &[&str] = &[
    "Welcome to Mohammad Garmabi's terminal portfolio.",
    "",
    "Type 'help' to see the available commands.",
    "Press Tab to complete a command, Up/Down to recall previous ones.",
    "",
];

/// Professional-network profile attached to the `recommend` output.
pub const RECOMMEND_URL: &str = "https://www.linkedin.com/in/mohammad-garmabi/";

/// Static pages answered straight from the lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Help,
    About,
    Projects,
    Skills,
    Experience,
    Education,
    Contact,
    Social,
    Whoami,
    Recommend,
}

impl Page {
    pub const ALL: [Page; 10] = [
        Page::Help,
        Page::About,
        Page::Projects,
        Page::Skills,
        Page::Experience,
        Page::Education,
        Page::Contact,
        Page::Social,
        Page::Whoami,
        Page::Recommend,
    ];

    /// Command word that opens this page.
    pub fn name(self) -> &'static str {
        match self {
            Page::Help => "help",
            Page::About => "about",
            Page::Projects => "projects",
            Page::Skills => "skills",
            Page::Experience => "experience",
            Page::Education => "education",
            Page::Contact => "contact",
            Page::Social => "social",
            Page::Whoami => "whoami",
            Page::Recommend => "recommend",
        }
    }

    pub fn from_name(name: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|page| page.name() == name)
    }

    /// Canned output lines.
    pub fn lines(self) -> &'static [&'static str] {
        match self {
            Page::Help => HELP,
            Page::About => ABOUT,
            Page::Projects => PROJECTS,
            Page::Skills => SKILLS,
            Page::Experience => EXPERIENCE,
            Page::Education => EDUCATION,
            Page::Contact => CONTACT,
            Page::Social => SOCIAL,
            Page::Whoami => WHOAMI,
            Page::Recommend => RECOMMEND,
        }
    }
}

const HELP: &[&str] = &[
    "Available commands:",
    "",
    "  about              - Who I am",
    "  projects           - Things I have built",
    "  skills             - Languages, frameworks, and tools",
    "  experience         - Work history",
    "  education          - Degrees and courses",
    "  contact            - How to reach me",
    "  social             - Profiles elsewhere",
    "  whoami             - One-line summary",
    "  packages           - npm download statistics (--refresh, --info)",
    "  recommend          - Leave me a recommendation",
    "  theme [name]       - List or apply a color preset",
    "  settings           - Toggle the settings dialog",
    "  export-data        - Save all terminal data to a backup file",
    "  import-data <path> - Restore terminal data from a backup file",
    "  clear-data         - Delete all stored terminal data",
    "  clear              - Clear this tab",
    "",
    "Shortcuts: Ctrl+T new tab, Ctrl+W close tab, Alt+Left/Right switch tab,",
    "           Ctrl+L clear, F2 settings, Ctrl+C quit.",
];

const ABOUT: &[&str] = &[
    "Hi, I'm Mohammad Garmabi.",
    "",
    "Frontend engineer focused on React, TypeScript, and developer tooling.",
    "I enjoy building small, sharp libraries and publishing them to npm,",
    "and I care about performance, accessibility, and a good developer experience.",
];

const PROJECTS: &[&str] = &[
    "Projects:",
    "",
    "  • Terminal Portfolio     - This site: a multi-tab terminal in the browser",
    "  • image-auth             - Image-based authentication component",
    "  • react-video-capture    - Camera capture hooks and components for React",
    "  • frontend-stack-cli     - Scaffolds a frontend project with a chosen stack",
    "  • react-performanalyzer  - Render-cost profiler for React trees",
    "",
    "Run 'packages' to see their npm download statistics.",
];

const SKILLS: &[&str] = &[
    "Skills:",
    "",
    "  Languages:   TypeScript, JavaScript, HTML, CSS",
    "  Frameworks:  React, React Router, Next.js, Vite",
    "  Styling:     Tailwind CSS, CSS Modules, styled-components",
    "  Tooling:     Node.js, npm, pnpm, Git, GitHub Actions",
    "  Testing:     Vitest, Jest, Testing Library, Playwright",
];

const EXPERIENCE: &[&str] = &[
    "Experience:",
    "",
    "  Senior Frontend Engineer",
    "    Building design systems and data-heavy dashboards in React.",
    "",
    "  Frontend Engineer",
    "    Shipped customer-facing web apps and internal tooling.",
    "",
    "  Open source",
    "    Maintainer of several npm packages (see 'packages').",
];

const EDUCATION: &[&str] = &[
    "Education:",
    "",
    "  B.Sc. in Computer Engineering",
    "  Continuous learning through courses, talks, and open source.",
];

const CONTACT: &[&str] = &[
    "Contact:",
    "",
    "  Email:    mohammad.garmabi@gmail.com",
    "  LinkedIn: https://www.linkedin.com/in/mohammad-garmabi/",
    "  GitHub:   https://github.com/mohammadgarmabi",
];

const SOCIAL: &[&str] = &[
    "Social:",
    "",
    "  GitHub:   https://github.com/mohammadgarmabi",
    "  LinkedIn: https://www.linkedin.com/in/mohammad-garmabi/",
    "  npm:      https://www.npmjs.com/~mohammad.garmabi",
];

const WHOAMI: &[&str] = &["visitor@garmabi.dev - frontend engineer's terminal portfolio"];

const RECOMMEND: &[&str] = &[
    "Enjoyed working with me?",
    "",
    "I'd really appreciate a recommendation on LinkedIn.",
    "Open the link below to write one:",
];

/// Every command word offered by tab completion, in display order.
pub const AVAILABLE_COMMANDS: &[&str] = &[
    "help",
    "about",
    "projects",
    "skills",
    "experience",
    "education",
    "contact",
    "social",
    "whoami",
    "packages",
    "packages --refresh",
    "packages --info",
    "recommend",
    "theme",
    "settings",
    "export-data",
    "import-data",
    "clear-data",
    "clear",
];

/// Theme gallery grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeCategory {
    Classic,
    Modern,
    Light,
    Colorful,
    Special,
}

impl ThemeCategory {
    pub const ALL: [ThemeCategory; 5] = [
        ThemeCategory::Classic,
        ThemeCategory::Modern,
        ThemeCategory::Light,
        ThemeCategory::Colorful,
        ThemeCategory::Special,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ThemeCategory::Classic => "🖥️ Classic Terminals",
            ThemeCategory::Modern => "🌙 Modern Dark",
            ThemeCategory::Light => "☀️ Light Themes",
            ThemeCategory::Colorful => "🎨 Colorful",
            ThemeCategory::Special => "✨ Special",
        }
    }
}

/// A named background/foreground pair from the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePreset {
    pub name: &'static str,
    pub category: ThemeCategory,
    pub background_color: &'static str,
    pub font_color: &'static str,
}

const fn preset(
    name: &'static str,
    category: ThemeCategory,
    background_color: &'static str,
    font_color: &'static str,
) -> ThemePreset {
    ThemePreset {
        name,
        category,
        background_color,
        font_color,
    }
}

pub const THEME_PRESETS: &[ThemePreset] = &[
    preset("GitHub Dark", ThemeCategory::Classic, "#0d1117", "#c9d1d9"),
    preset("Classic Green", ThemeCategory::Classic, "#000000", "#00ff00"),
    preset("Amber", ThemeCategory::Classic, "#1a1200", "#ffb000"),
    preset("Ubuntu", ThemeCategory::Classic, "#300a24", "#ffffff"),
    preset("Dracula", ThemeCategory::Modern, "#282a36", "#f8f8f2"),
    preset("Nord", ThemeCategory::Modern, "#2e3440", "#d8dee9"),
    preset("One Dark", ThemeCategory::Modern, "#282c34", "#abb2bf"),
    preset("Tokyo Night", ThemeCategory::Modern, "#1a1b26", "#a9b1d6"),
    preset("Solarized Light", ThemeCategory::Light, "#fdf6e3", "#657b83"),
    preset("GitHub Light", ThemeCategory::Light, "#ffffff", "#24292f"),
    preset("Paper", ThemeCategory::Light, "#f5f5f0", "#333333"),
    preset("Synthwave", ThemeCategory::Colorful, "#2b213a", "#ff7edb"),
    preset("Ocean", ThemeCategory::Colorful, "#0b1d33", "#7fdbff"),
    preset("Forest", ThemeCategory::Colorful, "#1b2b1b", "#a8e6a3"),
    preset("Matrix", ThemeCategory::Special, "#000000", "#39ff14"),
    preset("Cyberpunk", ThemeCategory::Special, "#0f0f23", "#f5e663"),
];

/// Case-insensitive preset lookup.
pub fn find_preset(name: &str) -> Option<&'static ThemePreset> {
    let name = name.trim();
    THEME_PRESETS
        .iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name))
}
