use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use agenda::client::{HttpSchedulingClient, SchedulingApi};
use agenda::config::AppConfig;
use agenda::db;
use agenda::handlers;
use agenda::models::{Appointment, NewAppointment, NewSlot, RecordId, Slot, SlotType};
use agenda::state::AppState;
use agenda::ui::messages;
use agenda::ui::render::slot_buttons;
use agenda::ui::state::{BookingField, NewSlotField, NotificationKind};
use agenda::ui::{Console, Msg};

// ── Mock API ──

#[derive(Debug, Clone, PartialEq)]
enum Call {
    ListSlots(NaiveDate),
    ListAppointments(NaiveDate),
    CreateAppointment(NewAppointment),
    CreateSlot(NewSlot),
}

struct MockApi {
    calls: Arc<Mutex<Vec<Call>>>,
    slots: Vec<Slot>,
    fail_bookings: bool,
}

impl MockApi {
    fn new(slots: Vec<Slot>) -> Self {
        Self {
            calls: Arc::new(Mutex::new(vec![])),
            slots,
            fail_bookings: false,
        }
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl SchedulingApi for MockApi {
    async fn list_slots(&self, date: NaiveDate) -> anyhow::Result<Vec<Slot>> {
        self.record(Call::ListSlots(date));
        Ok(self.slots.iter().filter(|s| s.date == date).cloned().collect())
    }

    async fn list_appointments(&self, date: NaiveDate) -> anyhow::Result<Vec<Appointment>> {
        self.record(Call::ListAppointments(date));
        Ok(vec![])
    }

    async fn create_appointment(&self, req: &NewAppointment) -> anyhow::Result<Appointment> {
        self.record(Call::CreateAppointment(req.clone()));
        if self.fail_bookings {
            anyhow::bail!("This slot is already booked");
        }
        Ok(Appointment {
            id: RecordId::Int(99),
            slot_id: req.slot_id.clone(),
            client_name: req.client_name.clone(),
            whatsapp: req.whatsapp.clone(),
            notes: req.notes.clone(),
            date: req.date,
            time: req.time.clone(),
            status: Default::default(),
            created_at: None,
        })
    }

    async fn create_slot(&self, req: &NewSlot) -> anyhow::Result<Slot> {
        self.record(Call::CreateSlot(req.clone()));
        Ok(Slot {
            id: RecordId::Int(2),
            date: req.date,
            time: req.time.clone(),
            slot_type: req.slot_type,
            is_available: true,
            created_at: None,
        })
    }
}

// ── Helpers ──

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn example_slot() -> Slot {
    serde_json::from_str(r#"{"id":1,"date":"2025-06-10","time":"09:00:00","type":"appointment"}"#)
        .unwrap()
}

fn console_with(api: MockApi) -> (Console, Arc<Mutex<Vec<Call>>>) {
    let calls = Arc::clone(&api.calls);
    (Console::new(Arc::new(api), day("2025-06-01")), calls)
}

fn take_calls(calls: &Arc<Mutex<Vec<Call>>>) -> Vec<Call> {
    calls.lock().unwrap().drain(..).collect()
}

fn fill_booking(console: &mut Console, name: &str, whatsapp: &str) {
    console.dispatch(Msg::EditBooking(BookingField::ClientName, name.to_string()));
    console.dispatch(Msg::EditBooking(BookingField::Whatsapp, whatsapp.to_string()));
    console.dispatch(Msg::EditBooking(BookingField::Notes, String::new()));
}

// ── Console against a mock API ──

#[tokio::test]
async fn test_selecting_a_date_fetches_both_lists_once() {
    let (mut console, calls) = console_with(MockApi::new(vec![example_slot()]));

    console.dispatch(Msg::SelectDate(day("2025-06-10")));
    console.settle().await;

    let mut recorded = take_calls(&calls);
    recorded.sort_by_key(|c| format!("{c:?}"));
    assert_eq!(
        recorded,
        vec![
            Call::ListAppointments(day("2025-06-10")),
            Call::ListSlots(day("2025-06-10")),
        ]
    );

    let buttons = slot_buttons(console.state());
    assert_eq!(buttons.len(), 1);
    assert_eq!(buttons[0].label, "09:00");
}

#[tokio::test]
async fn test_validation_failure_sends_nothing() {
    let (mut console, calls) = console_with(MockApi::new(vec![example_slot()]));
    console.dispatch(Msg::SelectDate(day("2025-06-10")));
    console.settle().await;
    take_calls(&calls);

    console.dispatch(Msg::SelectSlot(0));
    fill_booking(&mut console, "", "11999999999");
    console.dispatch(Msg::SubmitBooking);
    console.settle().await;

    assert!(take_calls(&calls).is_empty());
    assert_eq!(console.in_flight(), 0);
    let notification = console.state().notification.clone().unwrap();
    assert_eq!(notification.kind, NotificationKind::Error);
    assert_eq!(notification.message, messages::REQUIRED_FIELDS);
}

#[tokio::test]
async fn test_successful_booking_flow() {
    let (mut console, calls) = console_with(MockApi::new(vec![example_slot()]));
    console.dispatch(Msg::SelectDate(day("2025-06-10")));
    console.settle().await;
    take_calls(&calls);

    console.dispatch(Msg::SelectSlot(0));
    fill_booking(&mut console, "Ana", "11999999999");
    console.dispatch(Msg::SubmitBooking);

    // Only the booking request goes out first.
    assert_eq!(console.in_flight(), 1);
    console.settle().await;

    let recorded = take_calls(&calls);
    assert_eq!(
        recorded[0],
        Call::CreateAppointment(NewAppointment {
            slot_id: RecordId::Int(1),
            client_name: "Ana".to_string(),
            whatsapp: "11999999999".to_string(),
            notes: Some(String::new()),
            date: day("2025-06-10"),
            time: "09:00:00".to_string(),
        })
    );
    assert_eq!(recorded.len(), 3);
    assert!(recorded.contains(&Call::ListSlots(day("2025-06-10"))));
    assert!(recorded.contains(&Call::ListAppointments(day("2025-06-10"))));

    let state = console.state();
    let notification = state.notification.clone().unwrap();
    assert_eq!(notification.kind, NotificationKind::Success);
    assert_eq!(
        notification.message,
        "Agendamento confirmado! Você receberá uma confirmação em breve."
    );
    assert!(state.selected_slot.is_none());
    assert!(state.booking_form.client_name.is_empty());
    assert!(state.booking_form.whatsapp.is_empty());
}

#[tokio::test]
async fn test_failed_booking_collapses_to_one_message() {
    let mut api = MockApi::new(vec![example_slot()]);
    api.fail_bookings = true;
    let (mut console, calls) = console_with(api);
    console.dispatch(Msg::SelectDate(day("2025-06-10")));
    console.settle().await;
    take_calls(&calls);

    console.dispatch(Msg::SelectSlot(0));
    fill_booking(&mut console, "Ana", "11999999999");
    console.dispatch(Msg::SubmitBooking);
    console.settle().await;

    // No refresh after a failure.
    assert_eq!(take_calls(&calls).len(), 1);
    let notification = console.state().notification.clone().unwrap();
    assert_eq!(notification.message, messages::BOOKING_FAILED);
    assert!(console.state().selected_slot.is_some());
}

#[tokio::test]
async fn test_slot_creation_refreshes_slots_only() {
    let (mut console, calls) = console_with(MockApi::new(vec![]));
    console.dispatch(Msg::SelectDate(day("2025-06-10")));
    console.settle().await;
    take_calls(&calls);

    console.dispatch(Msg::ToggleMode);
    console.dispatch(Msg::EditNewSlot(NewSlotField::Date, "2025-06-12".to_string()));
    console.dispatch(Msg::EditNewSlot(NewSlotField::Time, "15:00".to_string()));
    console.dispatch(Msg::SubmitNewSlot);
    console.settle().await;

    assert_eq!(
        take_calls(&calls),
        vec![
            Call::CreateSlot(NewSlot {
                date: day("2025-06-12"),
                time: "15:00".to_string(),
                slot_type: SlotType::Appointment,
            }),
            Call::ListSlots(day("2025-06-10")),
        ]
    );
    assert!(console.state().new_slot_form.date.is_empty());
    assert_eq!(
        console.state().notification.clone().unwrap().message,
        messages::SLOT_CREATED
    );
}

#[tokio::test]
async fn test_run_loop_scripted_session() {
    let (console, calls) = console_with(MockApi::new(vec![example_slot()]));
    let script: &[u8] = b"data 2025-06-10\nnome Ana\nwhatsapp 11999999999\nagendar\n";
    let mut screen = Vec::new();

    let state = console.run(script, &mut screen).await.unwrap();

    // No slot was chosen, so the booking is refused locally.
    assert!(!take_calls(&calls)
        .iter()
        .any(|c| matches!(c, Call::CreateAppointment(_))));
    assert_eq!(state.selected_date, day("2025-06-10"));
    assert_eq!(
        state.notification.map(|n| n.message).as_deref(),
        Some(messages::REQUIRED_FIELDS)
    );

    let screen = String::from_utf8(screen).unwrap();
    assert!(screen.contains("Modo cliente"));
    assert!(screen.contains("Junho 2025"));
}

#[tokio::test]
async fn test_run_loop_reports_parse_errors() {
    let (console, _) = console_with(MockApi::new(vec![]));
    let script: &[u8] = b"voar\nsair\n";
    let mut screen = Vec::new();

    console.run(script, &mut screen).await.unwrap();

    let screen = String::from_utf8(screen).unwrap();
    assert!(screen.contains("comando desconhecido: voar"));
}

// ── Console against the real server ──

async fn spawn_server() -> String {
    let conn = db::init_db(":memory:").unwrap();
    let config = AppConfig {
        port: 0,
        database_url: ":memory:".to_string(),
        api_base_url: String::new(),
    };
    let app = handlers::router(Arc::new(AppState::new(conn, config)));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_end_to_end_booking_over_http() {
    let base_url = spawn_server().await;
    let client = HttpSchedulingClient::new(base_url.clone());

    assert_eq!(client.health().await.unwrap().status, "healthy");

    let mut console = Console::new(Arc::new(client), day("2025-06-01"));

    // Admin creates a slot.
    console.dispatch(Msg::ToggleMode);
    console.dispatch(Msg::EditNewSlot(NewSlotField::Date, "2025-06-10".to_string()));
    console.dispatch(Msg::EditNewSlot(NewSlotField::Time, "09:00".to_string()));
    console.dispatch(Msg::SubmitNewSlot);
    console.settle().await;
    assert_eq!(
        console.state().notification.clone().unwrap().message,
        messages::SLOT_CREATED
    );

    // Client books it.
    console.dispatch(Msg::ToggleMode);
    console.dispatch(Msg::SelectDate(day("2025-06-10")));
    console.settle().await;
    assert_eq!(slot_buttons(console.state()).len(), 1);

    console.dispatch(Msg::SelectSlot(0));
    fill_booking(&mut console, "Ana", "11999999999");
    console.dispatch(Msg::SubmitBooking);
    console.settle().await;

    let state = console.state();
    assert_eq!(
        state.notification.clone().unwrap().message,
        messages::BOOKING_CONFIRMED
    );
    assert!(state.slots.is_empty());
    assert_eq!(state.appointments.len(), 1);
    assert_eq!(state.appointments[0].client_name, "Ana");

    // Cancelling through the client reopens the slot.
    let client = HttpSchedulingClient::new(base_url);
    let appt_id = state.appointments[0].id.to_string();
    let fetched = client.get_appointment(&appt_id).await.unwrap();
    assert_eq!(fetched.whatsapp, "11999999999");
    client.cancel_appointment(&appt_id).await.unwrap();
    let reopened = client.list_slots(day("2025-06-10")).await.unwrap();
    assert_eq!(reopened.len(), 1);

    client
        .delete_slot(&reopened[0].id.to_string())
        .await
        .unwrap();
    assert!(client.list_slots(day("2025-06-10")).await.unwrap().is_empty());
    assert!(client.delete_slot("missing").await.is_err());
}

#[tokio::test]
async fn test_unreachable_server_shows_load_error() {
    // Nothing listens on port 9 on loopback.
    let client = HttpSchedulingClient::new("http://127.0.0.1:9");
    let mut console = Console::new(Arc::new(client), day("2025-06-01"));

    console.dispatch(Msg::SelectDate(day("2025-06-10")));
    console.settle().await;

    let state = console.state();
    assert_eq!(
        state.notification.clone().unwrap().message,
        messages::SLOTS_LOAD_FAILED
    );
    assert!(!state.loading_slots);
}
