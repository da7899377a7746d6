//! Named colours accepted in `color='…'`.

/// Name → display value. Lookup ignores ASCII case.
pub const NAMED_COLORS: &[(&str, &str)] = &[
    ("red", "#e53935"),
    ("green", "#43a047"),
    ("blue", "#1e88e5"),
    ("orange", "#fb8c00"),
    ("purple", "#8e24aa"),
    ("yellow", "#fdd835"),
    ("pink", "#d81b60"),
    ("brown", "#6d4c41"),
    ("gray", "#757575"),
    ("grey", "#757575"),
    ("black", "#000000"),
    ("white", "#ffffff"),
];

/// Maps a colour name to its display value; anything else is returned as written.
pub fn display_color(value: &str) -> String {
    NAMED_COLORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(value))
        .map_or_else(|| value.to_string(), |(_, hex)| (*hex).to_string())
}
