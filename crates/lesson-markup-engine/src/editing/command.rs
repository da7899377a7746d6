use std::fmt;

use lesson_markup_syntax::Align;

/// A formatting change applied to one paragraph's open tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatCommand {
    Bold,
    Italic,
    Underline,
    Align(Align),
    /// An empty value removes the colour.
    Color(String),
    /// An empty value removes the size.
    Size(String),
}

impl FormatCommand {
    /// Parses the `(type, value?)` form callers use, e.g. `("color", Some("red"))`.
    ///
    /// `color` and `size` need a value; an empty one removes the attribute.
    /// Values are not validated.
    pub fn parse(kind: &str, value: Option<&str>) -> Result<Self, FormatError> {
        let kind = kind.to_ascii_lowercase();
        let value = || {
            value
                .map(str::to_string)
                .ok_or_else(|| FormatError::MissingValue(kind.clone()))
        };
        match kind.as_str() {
            "bold" => Ok(FormatCommand::Bold),
            "italic" => Ok(FormatCommand::Italic),
            "underline" => Ok(FormatCommand::Underline),
            "left" => Ok(FormatCommand::Align(Align::Left)),
            "center" => Ok(FormatCommand::Align(Align::Center)),
            "right" => Ok(FormatCommand::Align(Align::Right)),
            "color" => Ok(FormatCommand::Color(value()?)),
            "size" => Ok(FormatCommand::Size(value()?)),
            _ => Err(FormatError::UnknownCommand(kind.clone())),
        }
    }

    /// The command's name in its `(type, value?)` form.
    pub fn kind(&self) -> &'static str {
        match self {
            FormatCommand::Bold => "bold",
            FormatCommand::Italic => "italic",
            FormatCommand::Underline => "underline",
            FormatCommand::Align(align) => align.keyword(),
            FormatCommand::Color(_) => "color",
            FormatCommand::Size(_) => "size",
        }
    }
}

impl fmt::Display for FormatCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatCommand::Color(v) | FormatCommand::Size(v) => write!(f, "{}={v:?}", self.kind()),
            _ => f.write_str(self.kind()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("unknown format command: {0}")]
    UnknownCommand(String),

    #[error("{0} needs a value")]
    MissingValue(String),

    #[error("token {index} is not a paragraph open tag")]
    NotAParagraph { index: usize },
}
