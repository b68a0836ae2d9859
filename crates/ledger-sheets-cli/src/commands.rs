//! Script command parsing

use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use ledger_sheets::{
    CellRange, CellStyle, Color, Coordinates, FontWeight, TextAlign, TextDecoration,
    VerticalAlign,
};

/// A rectangle of cells not yet tied to a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Area {
    pub start: Coordinates,
    pub end: Coordinates,
}

impl Area {
    /// The area on a sheet
    pub fn on(&self, sheet_id: &str) -> CellRange {
        CellRange::new(self.start, self.end, sheet_id)
    }

    pub fn is_single(&self) -> bool {
        self.start == self.end
    }
}

impl FromStr for Area {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let range = CellRange::parse(s, "")?;
        Ok(Area {
            start: range.start,
            end: range.end,
        })
    }
}

/// One line of a session script
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Select(Area),
    Edit,
    Type(String),
    Submit,
    Cancel,
    Set { coords: Coordinates, text: String },
    Style { area: Area, style: CellStyle },
    Sheet(String),
    AddSheet(Option<String>),
    Gridlines(bool),
    Show(Option<Area>),
    Cell(Coordinates),
    History,
    Ask(String),
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  select A1[:B2]          make A1 the active cell (and select the range)
  edit                    start editing the active cell
  type TEXT               set the formula bar text
  submit                  store the formula bar text in the active cell
  cancel                  stop editing without storing
  set A1 TEXT             store TEXT in a cell
  style RANGE KEY[=VAL].. bold italic underline wrap color= bg= align=
                          valign= size= font= format=
  sheet ID                switch the active sheet (id or name)
  add-sheet [NAME]        append a sheet
  gridlines on|off        show or hide gridlines on the active sheet
  show [RANGE]            print cells (default: the used range)
  cell LABEL              print one cell
  history                 print the history log
  ask PROMPT              ask the assistant about the active sheet
  help                    print this help
  quit                    stop processing";

/// Parse one script line; `None` for blank lines and comments
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "select" => Command::Select(required(rest, "select needs a cell or range")?.parse()?),
        "edit" => Command::Edit,
        "type" => Command::Type(rest.to_string()),
        "submit" => Command::Submit,
        "cancel" => Command::Cancel,
        "set" => {
            let (label, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            Command::Set {
                coords: required(label, "set needs a cell label")?.parse()?,
                text: text.trim().to_string(),
            }
        }
        "style" => {
            let mut tokens = rest.split_whitespace();
            let area = tokens
                .next()
                .ok_or_else(|| anyhow!("style needs a range"))?
                .parse()?;
            let style = parse_style(tokens)?;
            Command::Style { area, style }
        }
        "sheet" => Command::Sheet(required(rest, "sheet needs a sheet id or name")?.to_string()),
        "add-sheet" => Command::AddSheet((!rest.is_empty()).then(|| rest.to_string())),
        "gridlines" => Command::Gridlines(parse_switch(rest)?),
        "show" => Command::Show(if rest.is_empty() {
            None
        } else {
            Some(rest.parse()?)
        }),
        "cell" => Command::Cell(required(rest, "cell needs a label")?.parse()?),
        "history" => Command::History,
        "ask" => Command::Ask(required(rest, "ask needs a prompt")?.to_string()),
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("Unknown command: {} (try 'help')", other),
    };
    Ok(Some(command))
}

fn required<'a>(text: &'a str, message: &str) -> Result<&'a str> {
    if text.is_empty() {
        bail!("{}", message)
    }
    Ok(text)
}

fn parse_switch(text: &str) -> Result<bool> {
    match text.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => bail!("Expected on or off, got '{}'", other),
    }
}

/// Build a style delta from `key[=value]` tokens
pub fn parse_style<'a, I>(tokens: I) -> Result<CellStyle>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut style = CellStyle::new();
    for token in tokens {
        let (key, raw) = match token.split_once('=') {
            Some((key, raw)) => (key, Some(raw)),
            None => (token, None),
        };
        let flag = || raw.map(parse_switch).unwrap_or(Ok(true));
        let value = || raw.ok_or_else(|| anyhow!("style key '{}' needs a value", key));

        style = match key.to_ascii_lowercase().as_str() {
            "bold" => style.bold(flag()?),
            "weight" => {
                let weight: FontWeight = value()?.parse()?;
                CellStyle {
                    font_weight: Some(weight),
                    ..style
                }
            }
            "italic" => style.italic(flag()?),
            "underline" => style.decoration(if flag()? {
                TextDecoration::Underline
            } else {
                TextDecoration::None
            }),
            "strike" => style.decoration(if flag()? {
                TextDecoration::LineThrough
            } else {
                TextDecoration::None
            }),
            "wrap" => style.wrap_text(flag()?),
            "color" => style.color(value()?.parse::<Color>()?),
            "bg" | "background" => style.background(value()?.parse::<Color>()?),
            "align" => style.align(value()?.parse::<TextAlign>()?),
            "valign" => style.vertical_align(value()?.parse::<VerticalAlign>()?),
            "size" => {
                let text = value()?;
                let size: f64 = text
                    .parse()
                    .with_context(|| format!("Invalid font size '{}'", text))?;
                if !(size.is_finite() && size > 0.0) {
                    bail!("Invalid font size '{}'", text);
                }
                style.font_size(size)
            }
            "font" => style.font_family(value()?),
            "format" => style.number_format(value()?),
            other => bail!("Unknown style key: {}", other),
        };
    }
    if style.is_empty() {
        bail!("style needs at least one key");
    }
    Ok(style)
}
