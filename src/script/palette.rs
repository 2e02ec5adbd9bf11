use crate::foundation::core::Secs;

/// Built-in named colors available to every script.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Palette;

impl Palette {
    /// Highlight for the element currently being discussed.
    pub const ACTIVE: &'static str = "#2f9e44";
    /// Neutral, de-emphasised elements.
    pub const INACTIVE: &'static str = "#ddd";
    /// Blue accent.
    pub const BLUE: &'static str = "#70bafb";
    /// Orange accent.
    pub const ORANGE: &'static str = "#af5900";
    /// Purple accent.
    pub const PURPLE: &'static str = "#e99cfe";
    /// Red accent.
    pub const RED: &'static str = "#f97f81";

    /// All `(name, hex)` pairs.
    pub const ALL: [(&'static str, &'static str); 6] = [
        ("active", Self::ACTIVE),
        ("inactive", Self::INACTIVE),
        ("blue", Self::BLUE),
        ("orange", Self::ORANGE),
        ("purple", Self::PURPLE),
        ("red", Self::RED),
    ];

    /// Hex value for a built-in color name.
    pub fn lookup(name: &str) -> Option<&'static str> {
        Self::ALL.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }
}

/// Built-in named durations, in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Durations;

impl Durations {
    /// No time at all.
    pub const INSTANT: Secs = 0.0;
    /// Quick transitions.
    pub const FAST: Secs = 0.5;
    /// The usual pace.
    pub const NORMAL: Secs = 1.0;
    /// Gap between narrative beats.
    pub const PAUSE: Secs = 0.5;
    /// Deliberate, slow transitions.
    pub const SLOW: Secs = 2.0;

    /// All `(name, seconds)` pairs.
    pub const ALL: [(&'static str, Secs); 5] = [
        ("instant", Self::INSTANT),
        ("fast", Self::FAST),
        ("normal", Self::NORMAL),
        ("pause", Self::PAUSE),
        ("slow", Self::SLOW),
    ];

    /// Seconds for a built-in duration name.
    pub fn lookup(name: &str) -> Option<Secs> {
        Self::ALL.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }
}
