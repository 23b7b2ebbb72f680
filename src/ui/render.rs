use std::fmt::Write;

use chrono::{Datelike, Months, NaiveDate};

use super::messages;
use super::state::{AdminTab, Mode, NotificationKind, ViewState};
use crate::models::SlotType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotButton {
    /// One-based, as typed in `horario N`.
    pub number: usize,
    pub label: String,
    pub selected: bool,
}

pub fn slot_buttons(state: &ViewState) -> Vec<SlotButton> {
    state
        .slots
        .iter()
        .enumerate()
        .map(|(i, slot)| SlotButton {
            number: i + 1,
            label: slot.label(),
            selected: state.selected_slot.as_ref().map(|s| &s.id) == Some(&slot.id),
        })
        .collect()
}

pub fn render(state: &ViewState) -> String {
    let mut out = String::new();

    let mode = match state.mode {
        Mode::Client => "Modo cliente",
        Mode::Admin => "Modo administrador",
    };
    let _ = writeln!(out, "=== Agenda | {mode} ===");

    if let Some(notification) = &state.notification {
        let tag = match notification.kind {
            NotificationKind::Success => "OK",
            NotificationKind::Error => "ERRO",
        };
        let _ = writeln!(out, "[{tag}] {}", notification.message);
    }
    out.push('\n');

    match state.mode {
        Mode::Client => {
            out.push_str(&render_calendar(state.visible_month, state.selected_date, state.today));
            out.push('\n');
            out.push_str(&render_slot_grid(state));
            if state.selected_slot.is_some() {
                out.push('\n');
                out.push_str(&render_booking_form(state));
            }
        }
        Mode::Admin => {
            out.push_str(&render_tabs(state.admin_tab));
            out.push('\n');
            match state.admin_tab {
                AdminTab::Appointments => out.push_str(&render_appointments(state)),
                AdminTab::NewSlot => out.push_str(&render_new_slot_form(state)),
                AdminTab::Calendar => {
                    out.push_str(&render_calendar(
                        state.visible_month,
                        state.selected_date,
                        state.today,
                    ));
                    out.push('\n');
                    out.push_str(&render_slot_grid(state));
                }
            }
        }
    }

    out
}

/// Sunday-first month grid. The selected day is bracketed, today is starred.
pub fn render_calendar(month: NaiveDate, selected: NaiveDate, today: NaiveDate) -> String {
    let first = month.with_day(1).unwrap_or(month);
    let mut out = String::new();

    let title = format!("{} {}", messages::MONTHS[first.month0() as usize], first.year());
    let _ = writeln!(out, "{title:^27}");
    let _ = writeln!(out, "{}", messages::WEEKDAYS.join(" "));

    let mut line = "    ".repeat(first.weekday().num_days_from_sunday() as usize);
    for day in 1..=days_in_month(first) {
        let Some(date) = first.with_day(day) else {
            break;
        };
        let cell = if date == selected {
            format!("[{day:>2}]")
        } else if date == today {
            format!(" {day:>2}*")
        } else {
            format!(" {day:>2} ")
        };
        line.push_str(&cell);
        if date.weekday().num_days_from_sunday() == 6 {
            let _ = writeln!(out, "{}", line.trim_end());
            line.clear();
        }
    }
    if !line.is_empty() {
        let _ = writeln!(out, "{}", line.trim_end());
    }

    out
}

pub fn render_slot_grid(state: &ViewState) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Horários disponíveis para {}:",
        state.selected_date.format("%d/%m/%Y")
    );

    if state.loading_slots {
        let _ = writeln!(out, "  {}", messages::LOADING);
        return out;
    }

    let buttons = slot_buttons(state);
    if buttons.is_empty() {
        let _ = writeln!(out, "  {}", messages::NO_SLOTS);
        return out;
    }

    let cells: Vec<String> = buttons
        .iter()
        .map(|b| {
            if b.selected {
                format!("[{}: {}]*", b.number, b.label)
            } else {
                format!("[{}: {}]", b.number, b.label)
            }
        })
        .collect();
    let _ = writeln!(out, "  {}", cells.join("  "));
    out
}

pub fn render_booking_form(state: &ViewState) -> String {
    let mut out = String::new();
    let form = &state.booking_form;

    if let Some(slot) = &state.selected_slot {
        let _ = writeln!(
            out,
            "Agendar {} às {}",
            slot.date.format("%d/%m/%Y"),
            slot.label()
        );
    }
    let _ = writeln!(out, "  Nome*:      {}", form.client_name);
    let _ = writeln!(out, "  WhatsApp*:  {}", form.whatsapp);
    let _ = writeln!(out, "  Observações: {}", form.notes);

    let action = if state.booking_in_flight {
        "Agendando..."
    } else {
        "Digite 'agendar' para confirmar"
    };
    let _ = writeln!(out, "  {action}");
    out
}

fn render_tabs(active: AdminTab) -> String {
    let tabs = [
        (AdminTab::Appointments, "Agendamentos"),
        (AdminTab::NewSlot, "Novo horário"),
        (AdminTab::Calendar, "Calendário"),
    ];
    let labels: Vec<String> = tabs
        .iter()
        .map(|(tab, label)| {
            if *tab == active {
                format!("[{label}]")
            } else {
                format!(" {label} ")
            }
        })
        .collect();
    format!("{}\n", labels.join(" "))
}

pub fn render_appointments(state: &ViewState) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Agendamentos de {}:",
        state.selected_date.format("%d/%m/%Y")
    );

    if state.appointments.is_empty() {
        let _ = writeln!(out, "  {}", messages::NO_APPOINTMENTS);
        return out;
    }

    for appt in &state.appointments {
        let _ = write!(
            out,
            "  {}  {}  (WhatsApp: {})",
            appt.time_label(),
            appt.client_name,
            appt.whatsapp
        );
        if let Some(notes) = appt.notes.as_deref().filter(|n| !n.is_empty()) {
            let _ = write!(out, "  obs: {notes}");
        }
        out.push('\n');
    }
    out
}

pub fn render_new_slot_form(state: &ViewState) -> String {
    let form = &state.new_slot_form;
    let slot_type = match form.slot_type {
        SlotType::Appointment => "atendimento",
        SlotType::Event => "evento",
    };

    let mut out = String::new();
    let _ = writeln!(out, "Novo horário:");
    let _ = writeln!(out, "  Data (AAAA-MM-DD): {}", form.date);
    let _ = writeln!(out, "  Hora (HH:MM):      {}", form.time);
    let _ = writeln!(out, "  Tipo:              {slot_type}");
    let _ = writeln!(out, "  Digite 'criar' para salvar");
    out
}

fn days_in_month(first: NaiveDate) -> u32 {
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Appointment, RecordId, Slot};
    use crate::ui::state::{update, Msg};

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn state_with_slot() -> ViewState {
        let state = ViewState::new(day("2025-06-01"));
        let (state, _) = update(state, Msg::SelectDate(day("2025-06-10")));
        let generation = state.slots_generation;
        let slot: Slot = serde_json::from_str(
            r#"{"id":1,"date":"2025-06-10","time":"09:00:00","type":"appointment"}"#,
        )
        .unwrap();
        let (state, _) = update(
            state,
            Msg::SlotsLoaded {
                generation,
                result: Ok(vec![slot]),
            },
        );
        state
    }

    #[test]
    fn test_single_slot_renders_one_button() {
        let state = state_with_slot();
        let buttons = slot_buttons(&state);
        assert_eq!(
            buttons,
            vec![SlotButton {
                number: 1,
                label: "09:00".to_string(),
                selected: false,
            }]
        );

        let grid = render_slot_grid(&state);
        assert!(grid.contains("[1: 09:00]"));
        assert!(!grid.contains("09:00:00"));
    }

    #[test]
    fn test_selected_slot_shows_booking_form() {
        let (state, _) = update(state_with_slot(), Msg::SelectSlot(0));
        assert!(slot_buttons(&state)[0].selected);

        let screen = render(&state);
        assert!(screen.contains("[1: 09:00]*"));
        assert!(screen.contains("Agendar 10/06/2025 às 09:00"));
        assert!(screen.contains("WhatsApp*"));
    }

    #[test]
    fn test_empty_slot_grid() {
        let state = ViewState::new(day("2025-06-10"));
        assert!(render_slot_grid(&state).contains(messages::NO_SLOTS));
    }

    #[test]
    fn test_calendar_layout() {
        // June 2025 starts on a Sunday and has 30 days.
        let cal = render_calendar(day("2025-06-01"), day("2025-06-10"), day("2025-06-03"));
        let lines: Vec<&str> = cal.lines().collect();

        assert_eq!(lines[0].trim(), "Junho 2025");
        assert_eq!(lines[1], "Dom Seg Ter Qua Qui Sex Sáb");
        assert_eq!(lines[2], "  1   2   3*  4   5   6   7");
        assert!(lines[3].contains("[10]"));
        assert!(lines.last().unwrap().ends_with("30"));
    }

    #[test]
    fn test_calendar_leading_blanks() {
        // February 2025 starts on a Saturday.
        let cal = render_calendar(day("2025-02-01"), day("2025-03-01"), day("2025-03-01"));
        let lines: Vec<&str> = cal.lines().collect();
        assert_eq!(lines[2], format!("{}  1", " ".repeat(24)));
        assert!(lines.last().unwrap().ends_with("28"));
    }

    #[test]
    fn test_admin_appointments_tab() {
        let state = state_with_slot();
        let (state, _) = update(state, Msg::ToggleMode);
        let generation = state.appointments_generation;
        let (state, _) = update(
            state,
            Msg::AppointmentsLoaded {
                generation,
                result: Ok(vec![Appointment {
                    id: RecordId::Int(3),
                    slot_id: RecordId::Int(1),
                    client_name: "Ana".to_string(),
                    whatsapp: "11999999999".to_string(),
                    notes: Some("primeira consulta".to_string()),
                    date: day("2025-06-10"),
                    time: "09:00:00".to_string(),
                    status: Default::default(),
                    created_at: None,
                }]),
            },
        );

        let screen = render(&state);
        assert!(screen.contains("Modo administrador"));
        assert!(screen.contains("[Agendamentos]"));
        assert!(screen.contains("09:00  Ana  (WhatsApp: 11999999999)  obs: primeira consulta"));
    }

    #[test]
    fn test_notification_banner() {
        let state = ViewState::new(day("2025-06-10"));
        let (state, _) = update(state, Msg::SubmitBooking);
        assert!(render(&state).contains(&format!("[ERRO] {}", messages::REQUIRED_FIELDS)));
    }
}
