//! Console commands
//!
//! One command per line, e.g. `qty 0 3` or `notes Net 30`.

use domain_invoice::LineItemField;

use crate::modal::ModalEvent;

/// A parsed console command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(ModalEvent),
    Show,
    Help,
    Quit,
}

/// Help text for the console
pub const HELP: &str = "\
commands:
  show                 redraw the modal
  edit | cancel        enter or leave edit mode
  save | delete | close
  add                  append a blank line item
  desc <i> <text>      set line item description
  qty <i> <value>      set line item quantity
  rate <i> <value>     set line item rate
  remove <i>           remove line item
  date <YYYY-MM-DD>    set invoice date (empty clears)
  due <YYYY-MM-DD>     set due date (empty clears)
  ref <text>           set reference number
  notes <text>         set notes
  quit";

/// Parses one console line
///
/// # Errors
///
/// Returns a message describing the problem for unknown commands and
/// missing or malformed line item indexes.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim_start()),
        None => (line, ""),
    };

    let event = match verb {
        "" | "show" => return Ok(Command::Show),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        "edit" => ModalEvent::Edit,
        "cancel" => ModalEvent::Cancel,
        "save" => ModalEvent::Save,
        "delete" => ModalEvent::Delete,
        "close" => ModalEvent::Close,
        "add" => ModalEvent::AddLineItem,
        "desc" => line_item_event(LineItemField::Description, rest)?,
        "qty" => line_item_event(LineItemField::Quantity, rest)?,
        "rate" => line_item_event(LineItemField::Rate, rest)?,
        "remove" => ModalEvent::RemoveLineItem(parse_index(rest)?),
        "date" => ModalEvent::SetInvoiceDate(rest.to_string()),
        "due" => ModalEvent::SetDueDate(rest.to_string()),
        "ref" => ModalEvent::SetReferenceNumber(rest.to_string()),
        "notes" => ModalEvent::SetNotes(rest.to_string()),
        other => return Err(format!("unknown command: {other}")),
    };

    Ok(Command::Event(event))
}

fn line_item_event(field: LineItemField, rest: &str) -> Result<ModalEvent, String> {
    let (index, value) = match rest.split_once(char::is_whitespace) {
        Some((index, value)) => (index, value.trim_start()),
        None => (rest, ""),
    };
    Ok(ModalEvent::EditLineItem {
        index: parse_index(index)?,
        field,
        value: value.to_string(),
    })
}

fn parse_index(raw: &str) -> Result<usize, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("expected a line item index, got {raw:?}"))
}
