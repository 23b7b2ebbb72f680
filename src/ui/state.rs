use chrono::{Datelike, Months, NaiveDate};

use super::messages;
use crate::models::{Appointment, NewAppointment, NewSlot, Slot, SlotType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Client,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    Appointments,
    NewSlot,
    Calendar,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingForm {
    pub client_name: String,
    pub whatsapp: String,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewSlotForm {
    pub date: String,
    pub time: String,
    pub slot_type: SlotType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingField {
    ClientName,
    Whatsapp,
    Notes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewSlotField {
    Date,
    Time,
    Type,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: &str) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.to_string(),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.to_string(),
        }
    }
}

/// Everything the screen shows. Only [`update`] produces a new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub today: NaiveDate,
    pub selected_date: NaiveDate,
    /// First day of the month the calendar displays.
    pub visible_month: NaiveDate,
    pub mode: Mode,
    pub admin_tab: AdminTab,
    pub slots: Vec<Slot>,
    pub appointments: Vec<Appointment>,
    pub selected_slot: Option<Slot>,
    pub booking_form: BookingForm,
    pub new_slot_form: NewSlotForm,
    pub notification: Option<Notification>,
    pub loading_slots: bool,
    pub booking_in_flight: bool,
    pub slots_generation: u64,
    pub appointments_generation: u64,
}

impl ViewState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            selected_date: today,
            visible_month: first_of_month(today),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    SelectDate(NaiveDate),
    /// Move the calendar by this many months without selecting a day.
    ShiftMonth(i32),
    /// Zero-based position in the slot grid.
    SelectSlot(usize),
    EditBooking(BookingField, String),
    SubmitBooking,
    EditNewSlot(NewSlotField, String),
    SubmitNewSlot,
    ToggleMode,
    SelectTab(AdminTab),
    DismissNotification,
    SlotsLoaded {
        generation: u64,
        result: Result<Vec<Slot>, String>,
    },
    AppointmentsLoaded {
        generation: u64,
        result: Result<Vec<Appointment>, String>,
    },
    BookingFinished(Result<Appointment, String>),
    SlotCreated(Result<Slot, String>),
}

/// Side effects requested by a transition; the runtime turns each into a request.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FetchSlots { date: NaiveDate, generation: u64 },
    FetchAppointments { date: NaiveDate, generation: u64 },
    CreateAppointment(NewAppointment),
    CreateSlot(NewSlot),
}

pub fn update(mut state: ViewState, msg: Msg) -> (ViewState, Vec<Command>) {
    let mut commands = Vec::new();

    match msg {
        Msg::SelectDate(date) => {
            state.selected_date = date;
            state.visible_month = first_of_month(date);
            state.selected_slot = None;
            commands.push(fetch_slots(&mut state));
            commands.push(fetch_appointments(&mut state));
        }

        Msg::ShiftMonth(delta) => {
            let months = Months::new(delta.unsigned_abs());
            let shifted = if delta >= 0 {
                state.visible_month.checked_add_months(months)
            } else {
                state.visible_month.checked_sub_months(months)
            };
            if let Some(month) = shifted {
                state.visible_month = month;
            }
        }

        Msg::SelectSlot(index) => {
            if let Some(slot) = state.slots.get(index) {
                state.selected_slot = Some(slot.clone());
            }
        }

        Msg::EditBooking(field, value) => match field {
            BookingField::ClientName => state.booking_form.client_name = value,
            BookingField::Whatsapp => state.booking_form.whatsapp = value,
            BookingField::Notes => state.booking_form.notes = value,
        },

        Msg::SubmitBooking => {
            if state.booking_in_flight {
                return (state, commands);
            }

            let form = &state.booking_form;
            let slot = match &state.selected_slot {
                Some(slot)
                    if !form.client_name.trim().is_empty() && !form.whatsapp.trim().is_empty() =>
                {
                    slot
                }
                _ => {
                    state.notification = Some(Notification::error(messages::REQUIRED_FIELDS));
                    return (state, commands);
                }
            };

            commands.push(Command::CreateAppointment(NewAppointment {
                slot_id: slot.id.clone(),
                client_name: form.client_name.clone(),
                whatsapp: form.whatsapp.clone(),
                notes: Some(form.notes.clone()),
                date: slot.date,
                time: slot.time.clone(),
            }));
            state.booking_in_flight = true;
        }

        Msg::BookingFinished(result) => {
            state.booking_in_flight = false;
            match result {
                Ok(_) => {
                    state.notification = Some(Notification::success(messages::BOOKING_CONFIRMED));
                    state.booking_form = BookingForm::default();
                    state.selected_slot = None;
                    commands.push(fetch_slots(&mut state));
                    commands.push(fetch_appointments(&mut state));
                }
                Err(_) => {
                    state.notification = Some(Notification::error(messages::BOOKING_FAILED));
                }
            }
        }

        Msg::EditNewSlot(field, value) => match field {
            NewSlotField::Date => state.new_slot_form.date = value,
            NewSlotField::Time => state.new_slot_form.time = value,
            NewSlotField::Type => state.new_slot_form.slot_type = SlotType::parse(value.trim()),
        },

        Msg::SubmitNewSlot => {
            let form = &state.new_slot_form;
            let (date, time) = (form.date.trim(), form.time.trim());
            if date.is_empty() || time.is_empty() {
                return (state, commands);
            }

            match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
                Ok(date) => commands.push(Command::CreateSlot(NewSlot {
                    date,
                    time: time.to_string(),
                    slot_type: form.slot_type,
                })),
                Err(_) => {
                    state.notification = Some(Notification::error(messages::INVALID_DATE));
                }
            }
        }

        // Appointments are not refreshed here, only the slot list.
        Msg::SlotCreated(result) => match result {
            Ok(_) => {
                state.notification = Some(Notification::success(messages::SLOT_CREATED));
                state.new_slot_form = NewSlotForm::default();
                commands.push(fetch_slots(&mut state));
            }
            Err(_) => {
                state.notification = Some(Notification::error(messages::SLOT_CREATE_FAILED));
            }
        },

        Msg::ToggleMode => {
            state.mode = match state.mode {
                Mode::Client => {
                    state.admin_tab = AdminTab::Appointments;
                    Mode::Admin
                }
                Mode::Admin => Mode::Client,
            };
        }

        Msg::SelectTab(tab) => state.admin_tab = tab,

        Msg::DismissNotification => state.notification = None,

        Msg::SlotsLoaded { generation, result } => {
            if generation != state.slots_generation {
                return (state, commands);
            }
            state.loading_slots = false;
            match result {
                Ok(slots) => state.slots = slots,
                Err(_) => {
                    state.slots.clear();
                    state.notification = Some(Notification::error(messages::SLOTS_LOAD_FAILED));
                }
            }
        }

        // A failed appointments fetch leaves the previous list in place.
        Msg::AppointmentsLoaded { generation, result } => {
            if generation == state.appointments_generation {
                if let Ok(appointments) = result {
                    state.appointments = appointments;
                }
            }
        }
    }

    (state, commands)
}

fn fetch_slots(state: &mut ViewState) -> Command {
    state.slots_generation += 1;
    state.loading_slots = true;
    Command::FetchSlots {
        date: state.selected_date,
        generation: state.slots_generation,
    }
}

fn fetch_appointments(state: &mut ViewState) -> Command {
    state.appointments_generation += 1;
    Command::FetchAppointments {
        date: state.selected_date,
        generation: state.appointments_generation,
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
