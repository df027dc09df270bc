use gallery_core::RecordId;

/// One line typed at the shell prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Page(u32),
    Next,
    Prev,
    Size(u32),
    Reload,
    Edit(SelectionEdit),
    /// Bulk select the first N records; N <= 0 does nothing.
    Select(i64),
    Cancel,
    Selected,
    Show,
    Help,
    Quit,
}

/// A change to the checkboxes of the page on display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEdit {
    Check(Vec<RecordId>),
    Uncheck(Vec<RecordId>),
    /// Exactly these rows checked, every other row on the page unchecked.
    Only(Vec<RecordId>),
    All,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty input")]
    Empty,
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("`{0}` is not a number")]
    InvalidNumber(String),
}

pub const HELP: &str = "\
commands:
  page N        go to page N            next | prev   move one page
  size N        rows per page (back to page 1)      reload
  check ID..    tick rows on this page  uncheck ID..  untick rows
  only ID..     tick exactly these rows all | none    whole page
  select N      select the first N records across all pages
  cancel        stop a running select   selected      list selected ids
  show          redraw the page         quit";

pub fn parse(line: &str) -> Result<Command, ParseError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err(ParseError::Empty);
    };
    let rest: Vec<&str> = words.collect();

    let command = match head.to_ascii_lowercase().as_str() {
        "page" | "p" => Command::Page(required_number("page", &rest)?),
        "next" | "n" => Command::Next,
        "prev" => Command::Prev,
        "size" => Command::Size(required_number("size", &rest)?),
        "reload" => Command::Reload,
        "check" => Command::Edit(SelectionEdit::Check(ids("check", &rest)?)),
        "uncheck" => Command::Edit(SelectionEdit::Uncheck(ids("uncheck", &rest)?)),
        "only" => Command::Edit(SelectionEdit::Only(numbers(&rest)?)),
        "all" => Command::Edit(SelectionEdit::All),
        "none" => Command::Edit(SelectionEdit::None),
        // An empty count closes the dialog without selecting anything.
        "select" => Command::Select(match rest.first() {
            Some(word) => number(word)?,
            None => 0,
        }),
        "cancel" => Command::Cancel,
        "selected" => Command::Selected,
        "show" | "ls" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(command)
}

fn number<T: std::str::FromStr>(word: &str) -> Result<T, ParseError> {
    word.parse()
        .map_err(|_| ParseError::InvalidNumber(word.to_string()))
}

fn required_number<T: std::str::FromStr>(name: &'static str, rest: &[&str]) -> Result<T, ParseError> {
    let word = rest.first().ok_or(ParseError::MissingArgument(name))?;
    number(word)
}

fn numbers(rest: &[&str]) -> Result<Vec<RecordId>, ParseError> {
    rest.iter()
        .flat_map(|word| word.split(','))
        .filter(|word| !word.is_empty())
        .map(number)
        .collect()
}

fn ids(name: &'static str, rest: &[&str]) -> Result<Vec<RecordId>, ParseError> {
    let ids = numbers(rest)?;
    if ids.is_empty() {
        return Err(ParseError::MissingArgument(name));
    }
    Ok(ids)
}
