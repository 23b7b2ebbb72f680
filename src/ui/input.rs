use chrono::NaiveDate;

use super::state::{AdminTab, BookingField, Msg, NewSlotField};

/// What one line of console input asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Msg(Msg),
    Help,
    Quit,
    Redraw,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum InputError {
    #[error("comando desconhecido: {0} (digite 'ajuda')")]
    Unknown(String),

    #[error("faltou informar {0}")]
    MissingArgument(&'static str),

    #[error("data inválida: {0} (use AAAA-MM-DD)")]
    InvalidDate(String),

    #[error("número de horário inválido: {0}")]
    InvalidSlotNumber(String),

    #[error("opção inválida: {0}")]
    InvalidOption(String),
}

pub fn parse(line: &str, today: NaiveDate) -> Result<Input, InputError> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let msg = match command.to_lowercase().as_str() {
        "" => return Ok(Input::Redraw),
        "ajuda" | "?" => return Ok(Input::Help),
        "sair" => return Ok(Input::Quit),

        "data" => Msg::SelectDate(parse_date(required(rest, "a data")?)?),
        "hoje" => Msg::SelectDate(today),
        "mes" | "mês" => match rest.to_lowercase().as_str() {
            "anterior" | "-" => Msg::ShiftMonth(-1),
            "proximo" | "próximo" | "+" => Msg::ShiftMonth(1),
            "" => return Err(InputError::MissingArgument("anterior ou proximo")),
            other => return Err(InputError::InvalidOption(other.to_string())),
        },
        "horario" | "horário" => {
            let raw = required(rest, "o número do horário")?;
            match raw.parse::<usize>() {
                Ok(n) if n >= 1 => Msg::SelectSlot(n - 1),
                _ => return Err(InputError::InvalidSlotNumber(raw.to_string())),
            }
        }

        "nome" => Msg::EditBooking(BookingField::ClientName, rest.to_string()),
        "whatsapp" | "wpp" => Msg::EditBooking(BookingField::Whatsapp, rest.to_string()),
        "obs" => Msg::EditBooking(BookingField::Notes, rest.to_string()),
        "agendar" => Msg::SubmitBooking,

        "admin" | "modo" => Msg::ToggleMode,
        "aba" => Msg::SelectTab(parse_tab(required(rest, "a aba")?)?),

        "novo" => {
            let (field, value) = match rest.split_once(char::is_whitespace) {
                Some((field, value)) => (field, value.trim()),
                None => (rest, ""),
            };
            let field = match field.to_lowercase().as_str() {
                "data" => NewSlotField::Date,
                "hora" => NewSlotField::Time,
                "tipo" => NewSlotField::Type,
                "" => return Err(InputError::MissingArgument("data, hora ou tipo")),
                other => return Err(InputError::InvalidOption(other.to_string())),
            };
            let value = if field == NewSlotField::Type {
                parse_slot_type(value)?.to_string()
            } else {
                value.to_string()
            };
            Msg::EditNewSlot(field, value)
        }
        "criar" => Msg::SubmitNewSlot,

        "ok" => Msg::DismissNotification,

        other => return Err(InputError::Unknown(other.to_string())),
    };

    Ok(Input::Msg(msg))
}

fn required<'a>(value: &'a str, what: &'static str) -> Result<&'a str, InputError> {
    if value.is_empty() {
        Err(InputError::MissingArgument(what))
    } else {
        Ok(value)
    }
}

/// `AAAA-MM-DD`, or the local `DD/MM/AAAA`.
fn parse_date(raw: &str) -> Result<NaiveDate, InputError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .map_err(|_| InputError::InvalidDate(raw.to_string()))
}

fn parse_tab(raw: &str) -> Result<AdminTab, InputError> {
    match raw.to_lowercase().as_str() {
        "agendamentos" => Ok(AdminTab::Appointments),
        "novo" => Ok(AdminTab::NewSlot),
        "calendario" | "calendário" => Ok(AdminTab::Calendar),
        other => Err(InputError::InvalidOption(other.to_string())),
    }
}

fn parse_slot_type(raw: &str) -> Result<&'static str, InputError> {
    match raw.to_lowercase().as_str() {
        "atendimento" | "appointment" => Ok("appointment"),
        "evento" | "event" => Ok("event"),
        "" => Err(InputError::MissingArgument("o tipo")),
        other => Err(InputError::InvalidOption(other.to_string())),
    }
}
