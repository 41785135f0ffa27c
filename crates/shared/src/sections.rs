//! The fixed, ordered list of full-page sections the public site is made of.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub path: &'static str,
    pub label: &'static str,
}

pub const SECTIONS: &[Section] = &[
    Section {
        path: "/",
        label: "Home",
    },
    Section {
        path: "/about",
        label: "About",
    },
    Section {
        path: "/experience",
        label: "Experience",
    },
    Section {
        path: "/projects",
        label: "Projects",
    },
    Section {
        path: "/skills",
        label: "Skills",
    },
    Section {
        path: "/pors",
        label: "PORs",
    },
    Section {
        path: "/achievements",
        label: "Achievements",
    },
    Section {
        path: "/resume",
        label: "Resume",
    },
    Section {
        path: "/contact",
        label: "Contact",
    },
];

pub fn section_paths() -> Vec<&'static str> {
    SECTIONS.iter().map(|section| section.path).collect()
}

pub fn label_for(path: &str) -> Option<&'static str> {
    SECTIONS
        .iter()
        .find(|section| section.path == path)
        .map(|section| section.label)
}
