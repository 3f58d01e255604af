//! Interactive terminal front end for the funnel.
//!
//! A single cooperative event loop: poll for key events at a fixed interval,
//! feed them to the session, apply due transitions via `tick`, and redraw
//! when anything changed. All state mutation happens on this loop; the only
//! concurrency is the parallel fixture fetch during loading.

pub mod view;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use reqwest::Client;
use std::io::stdout;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::Config;
use crate::constants::polling::EVENT_POLL_MS;
use crate::error::AppError;
use crate::funnel::{FunnelSession, FunnelState, GateAnswer, PickOutcome, Prediction};
use crate::match_feed::load_upcoming_matches;

/// Runs the interactive funnel until the user quits.
///
/// The caller owns terminal setup and teardown (raw mode, alternate screen);
/// this function only draws and handles events.
pub async fn run_interactive_ui(client: &Client, config: &Config) -> Result<(), AppError> {
    let mut session = FunnelSession::new();
    let mut out = stdout();
    let mut needs_render = true;

    view::render(&mut out, &session)?;
    let matches = load_upcoming_matches(client, config).await;
    session.complete_load(matches);

    loop {
        if needs_render {
            view::render(&mut out, &session)?;
            needs_render = false;
        }

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('r') => {
                        session.reset();
                        view::render(&mut out, &session)?;
                        let matches = load_upcoming_matches(client, config).await;
                        session.complete_load(matches);
                        needs_render = true;
                    }
                    KeyCode::Char(c) => {
                        if apply_key(&mut session, c, Instant::now()) {
                            needs_render = true;
                        }
                    }
                    _ => {}
                },
                Event::Resize(_, _) => {
                    needs_render = true;
                }
                _ => {}
            }
        }

        if session.tick(Instant::now()).is_some() {
            needs_render = true;
        }
    }

    Ok(())
}

/// Translates a character key into a session event. Returns whether the
/// session changed and a redraw is needed.
pub fn apply_key(session: &mut FunnelSession, key: char, now: Instant) -> bool {
    match session.state() {
        FunnelState::CollectingBatchOne | FunnelState::CollectingBatchTwo => {
            let prediction = match key.to_ascii_lowercase() {
                '1' => Prediction::Home,
                'x' => Prediction::Draw,
                '2' => Prediction::Away,
                _ => return false,
            };
            let Some(active_id) = session.active_match_id().map(str::to_string) else {
                return false;
            };
            match session.submit_pick(&active_id, prediction, now) {
                PickOutcome::Accepted => true,
                PickOutcome::Rejected => {
                    debug!("Pick key ignored for {active_id}");
                    false
                }
            }
        }
        FunnelState::GateOne | FunnelState::GateTwo => {
            let answer = match key.to_ascii_lowercase() {
                't' | 'y' => GateAnswer::Yes,
                'n' => GateAnswer::No,
                _ => return false,
            };
            matches!(
                session.answer_gate(answer),
                crate::funnel::AnswerOutcome::Applied
            )
        }
        _ => false,
    }
}
