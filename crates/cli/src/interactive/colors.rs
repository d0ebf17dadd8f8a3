use crossterm::style::Color;
use querent_core::error::{Error, Result};
use querent_core::question_definitions::{ColorDefinition, ThemeDefinition};

/// Where a prompt is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pending,
    Done,
    Cancelled,
    /// The prompt's work failed, through no action of the user.
    Failed,
}

/// Colors used by the prompt frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub pending: Color,
    pub done: Color,
    pub cancelled: Color,
    /// The `│`/`└` rail.
    pub border: Color,
    /// Answers, descriptions and prefilled defaults.
    pub hint: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            pending: Color::Cyan,
            done: Color::Green,
            cancelled: Color::DarkGrey,
            border: Color::DarkGrey,
            hint: Color::DarkGrey,
            error: Color::Red,
        }
    }
}

impl Theme {
    /// The accent for icons and the active choice.
    pub fn status(&self, status: Status) -> Color {
        match status {
            Status::Pending => self.pending,
            Status::Done => self.done,
            Status::Cancelled => self.cancelled,
            Status::Failed => self.error,
        }
    }

    /// Applies the overrides a question file declares.
    ///
    /// # Errors
    ///
    /// Returns an error if any color is malformed.
    pub fn with_overrides(mut self, definition: &ThemeDefinition) -> Result<Self> {
        let slots = [
            (&definition.pending, &mut self.pending),
            (&definition.done, &mut self.done),
            (&definition.cancelled, &mut self.cancelled),
            (&definition.hint, &mut self.hint),
            (&definition.error, &mut self.error),
        ];

        for (definition, slot) in slots {
            if let Some(color) = color_from_definition(definition.as_ref())? {
                *slot = color;
            }
        }

        Ok(self)
    }
}

/// Trait for converting color definitions to terminal colors
pub trait AsTermColor {
    fn as_crossterm_color(&self) -> Result<Option<Color>>;
}

impl AsTermColor for ColorDefinition {
    fn as_crossterm_color(&self) -> Result<Option<Color>> {
        let defined_count = [self.rgb.is_some(), self.ansi.is_some(), self.name.is_some()]
            .iter()
            .filter(|&&x| x)
            .count();

        if defined_count > 1 {
            return Err(Error::MultipleColorTypes);
        }

        Ok(match (self.rgb, self.ansi, &self.name) {
            (Some((r, g, b)), _, _) => Some(Color::Rgb { r, g, b }),
            (_, Some(ansi), _) => Some(Color::AnsiValue(ansi)),
            (_, _, Some(name)) => Some(named_color(name)?),
            (None, None, None) => None,
        })
    }
}

fn named_color(name: &str) -> Result<Color> {
    Ok(match name.to_lowercase().as_str() {
        "black" => Color::Black,
        "darkgrey" | "darkgray" => Color::DarkGrey,
        "red" => Color::Red,
        "darkred" => Color::DarkRed,
        "green" => Color::Green,
        "darkgreen" => Color::DarkGreen,
        "yellow" => Color::Yellow,
        "darkyellow" => Color::DarkYellow,
        "blue" => Color::Blue,
        "darkblue" => Color::DarkBlue,
        "magenta" => Color::Magenta,
        "darkmagenta" => Color::DarkMagenta,
        "cyan" => Color::Cyan,
        "darkcyan" => Color::DarkCyan,
        "white" => Color::White,
        "grey" | "gray" => Color::Grey,
        _ => return Err(Error::UnknownColorName(name.to_string())),
    })
}

fn color_from_definition(definition: Option<&ColorDefinition>) -> Result<Option<Color>> {
    match definition {
        None => Ok(None),
        Some(definition) => definition.as_crossterm_color(),
    }
}
