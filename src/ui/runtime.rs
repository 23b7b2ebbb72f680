use std::io::Write;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use super::input::{self, Input};
use super::messages;
use super::render::render;
use super::state::{update, Command, Msg, ViewState};
use crate::client::SchedulingApi;

/// Runs one command against the API and reports the outcome as a message.
///
/// Failures are logged here and reach the view only as a string; the view
/// collapses them into its fixed notifications.
pub async fn execute(api: &dyn SchedulingApi, command: Command) -> Msg {
    match command {
        Command::FetchSlots { date, generation } => {
            let result = api.list_slots(date).await.map_err(|e| {
                tracing::error!(error = %e, %date, "failed to fetch available slots");
                e.to_string()
            });
            Msg::SlotsLoaded { generation, result }
        }
        Command::FetchAppointments { date, generation } => {
            let result = api.list_appointments(date).await.map_err(|e| {
                tracing::error!(error = %e, %date, "failed to fetch appointments");
                e.to_string()
            });
            Msg::AppointmentsLoaded { generation, result }
        }
        Command::CreateAppointment(req) => {
            let result = api.create_appointment(&req).await.map_err(|e| {
                tracing::error!(error = %e, slot_id = %req.slot_id, "booking failed");
                e.to_string()
            });
            if let Ok(appt) = &result {
                tracing::info!(appointment_id = %appt.id, slot_id = %req.slot_id, "appointment booked");
            }
            Msg::BookingFinished(result)
        }
        Command::CreateSlot(req) => {
            let result = api.create_slot(&req).await.map_err(|e| {
                tracing::error!(error = %e, date = %req.date, time = %req.time, "slot creation failed");
                e.to_string()
            });
            Msg::SlotCreated(result)
        }
    }
}

/// Owns the view state and the in-flight requests.
///
/// Requests are never cancelled; their results come back through the channel
/// and stale ones are dropped by the generation check in [`update`].
pub struct Console {
    api: Arc<dyn SchedulingApi>,
    state: ViewState,
    tx: mpsc::UnboundedSender<Msg>,
    rx: mpsc::UnboundedReceiver<Msg>,
    in_flight: usize,
}

impl Console {
    pub fn new(api: Arc<dyn SchedulingApi>, today: NaiveDate) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api,
            state: ViewState::new(today),
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Applies a message and starts whatever requests it produced.
    pub fn dispatch(&mut self, msg: Msg) {
        let (state, commands) = update(std::mem::take(&mut self.state), msg);
        self.state = state;

        for command in commands {
            tracing::debug!(?command, "dispatching");
            let api = Arc::clone(&self.api);
            let tx = self.tx.clone();
            self.in_flight += 1;
            tokio::spawn(async move {
                let msg = execute(api.as_ref(), command).await;
                let _ = tx.send(msg);
            });
        }
    }

    /// Waits for one request to finish and applies its result.
    pub async fn step(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.rx.recv().await {
            Some(msg) => {
                self.in_flight -= 1;
                self.dispatch(msg);
                true
            }
            None => false,
        }
    }

    /// Drains requests until nothing is in flight, including follow-up fetches.
    pub async fn settle(&mut self) {
        while self.step().await {}
    }

    /// Interactive loop: reads commands from `input`, renders to `out`.
    ///
    /// Ends on `sair`, or at end of input once pending requests are done.
    pub async fn run<R, W>(mut self, input: R, mut out: W) -> anyhow::Result<ViewState>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let today = self.state.today;
        self.dispatch(Msg::SelectDate(today));
        draw(&mut out, &self.state, None)?;

        let mut lines = input.lines();
        let mut input_open = true;

        loop {
            if !input_open && self.in_flight == 0 {
                break;
            }

            tokio::select! {
                line = lines.next_line(), if input_open => {
                    let Some(line) = line? else {
                        input_open = false;
                        continue;
                    };
                    match input::parse(&line, today) {
                        Ok(Input::Quit) => break,
                        Ok(Input::Help) => draw(&mut out, &self.state, Some(messages::HELP))?,
                        Ok(Input::Redraw) => draw(&mut out, &self.state, None)?,
                        Ok(Input::Msg(msg)) => {
                            self.dispatch(msg);
                            draw(&mut out, &self.state, None)?;
                        }
                        Err(e) => draw(&mut out, &self.state, Some(&e.to_string()))?,
                    }
                }
                Some(msg) = self.rx.recv(), if self.in_flight > 0 => {
                    self.in_flight -= 1;
                    self.dispatch(msg);
                    draw(&mut out, &self.state, None)?;
                }
            }
        }

        Ok(self.state)
    }
}

fn draw<W: Write>(out: &mut W, state: &ViewState, extra: Option<&str>) -> anyhow::Result<()> {
    writeln!(out, "\n{}", render(state))?;
    if let Some(extra) = extra {
        writeln!(out, "{extra}")?;
    }
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}
