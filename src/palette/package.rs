//! Package name extraction from frame names.
//!
//! Frames from the same package share a color. How a package is spelled
//! inside a frame name depends on the profiler that produced it, so the
//! extraction pattern is picked by spy name.

use regex::Regex;
use std::sync::OnceLock;

/// Profilers with a known frame naming scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpyKind {
    Go,
    Python,
    Ruby,
    DotNet,
    Java,
    Other,
}

impl SpyKind {
    pub fn from_spy_name(spy_name: &str) -> Self {
        match spy_name {
            "gospy" | "go" => SpyKind::Go,
            "pyspy" => SpyKind::Python,
            "rbspy" => SpyKind::Ruby,
            "dotnetspy" => SpyKind::DotNet,
            "javaspy" => SpyKind::Java,
            _ => SpyKind::Other,
        }
    }

    fn pattern(self) -> Option<&'static Regex> {
        static GO: OnceLock<Option<Regex>> = OnceLock::new();
        static PYTHON: OnceLock<Option<Regex>> = OnceLock::new();
        static RUBY: OnceLock<Option<Regex>> = OnceLock::new();
        static DOTNET: OnceLock<Option<Regex>> = OnceLock::new();
        static JAVA: OnceLock<Option<Regex>> = OnceLock::new();

        let (cell, source) = match self {
            SpyKind::Go => (&GO, r"^(?P<package>.*/.*?\.|.*?\.|.+)(?P<function>.*)$"),
            SpyKind::Python => (&PYTHON, r"^(?P<package>(.*/)*)(?P<filename>.*\.py+)(?P<line>.*)$"),
            SpyKind::Ruby => (&RUBY, r"^(?P<package>(.*/)*)(?P<filename>.*\.rb+)(?P<line>.*)$"),
            SpyKind::DotNet => (&DOTNET, r"^(?P<package>.+)\.(.+)\.(.+)\(.*\)$"),
            SpyKind::Java => (&JAVA, r"^(?P<package>.+/)(?P<filename>.+\.)(?P<function>.+)$"),
            SpyKind::Other => return None,
        };

        cell.get_or_init(|| Regex::new(source).ok()).as_ref()
    }
}

/// Package part of a frame name, or the whole name if none can be found
pub fn package_name<'a>(spy_name: &str, name: &'a str) -> &'a str {
    SpyKind::from_spy_name(spy_name)
        .pattern()
        .and_then(|re| re.captures(name))
        .and_then(|caps| caps.name("package"))
        .map(|m| m.as_str())
        .filter(|package| !package.is_empty())
        .unwrap_or(name)
}
