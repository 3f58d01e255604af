//! Rendering of the funnel screens.
//!
//! One full-screen redraw per state change, teletext-flavored: dark
//! background, green accents, plain character layout. Formatting helpers are
//! kept free of terminal calls so they can be unit tested.

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::Write;

use crate::constants::funnel::MATCH_COUNT;
use crate::error::AppError;
use crate::funnel::{
    FunnelSession, FunnelState, GATE_ONE_QUESTION, GATE_TWO_QUESTION, OfferKind,
};
use crate::match_feed::models::Match;

const HEADER: &str = "TYPER BONUSOWY";
const FOOTER_COLLECTING: &str = "1/X/2 typ · r od nowa · q wyjście";
const FOOTER_GATE: &str = "t tak · n nie · r od nowa · q wyjście";
const FOOTER_FINAL: &str = "r od nowa · q wyjście";

/// Draws the whole screen for the session's current state.
pub fn render<W: Write>(out: &mut W, session: &FunnelSession) -> Result<(), AppError> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;

    draw_header(out)?;

    match session.state() {
        FunnelState::Loading => {
            draw_line(out, 3, "Wczytywanie...", Color::Green)?;
        }
        FunnelState::CollectingBatchOne | FunnelState::CollectingBatchTwo => {
            draw_collecting(out, session)?;
        }
        FunnelState::GateOne => {
            draw_gate(out, 1, GATE_ONE_QUESTION, OfferKind::Superbet)?;
        }
        FunnelState::GateTwo => {
            draw_gate(out, 2, GATE_TWO_QUESTION, OfferKind::Fortuna)?;
        }
        FunnelState::Final(kind) => {
            draw_final(out, kind)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn draw_header<W: Write>(out: &mut W) -> Result<(), AppError> {
    queue!(
        out,
        MoveTo(0, 0),
        SetAttribute(Attribute::Bold),
        SetForegroundColor(Color::Green),
        Print(HEADER),
        ResetColor,
        SetAttribute(Attribute::Reset),
    )?;
    Ok(())
}

fn draw_line<W: Write>(out: &mut W, row: u16, text: &str, color: Color) -> Result<(), AppError> {
    queue!(
        out,
        MoveTo(0, row),
        SetForegroundColor(color),
        Print(text),
        ResetColor,
    )?;
    Ok(())
}

fn draw_collecting<W: Write>(out: &mut W, session: &FunnelSession) -> Result<(), AppError> {
    let banner = match session.state() {
        FunnelState::CollectingBatchOne => "KROK 1: TYPUJ 3 MECZE",
        _ => "KROK 2: DOKOŃCZ KUPON",
    };
    draw_line(out, 2, banner, Color::Green)?;

    let batch = session.visible_batch();
    if batch.is_empty() {
        draw_line(out, 4, "Brak nadchodzących meczów", Color::White)?;
    }

    let active_id = session.active_match_id().map(str::to_string);
    for (i, m) in batch.iter().enumerate() {
        let active = active_id.as_deref() == Some(m.id.as_str());
        let row = 4 + (i as u16) * 2;
        let color = if active { Color::Yellow } else { Color::White };
        draw_line(out, row, &format_match_row(m, active), color)?;
        draw_line(
            out,
            row + 1,
            &format_pick_row(m, session.pick_for(&m.id).map(|p| p.symbol())),
            Color::DarkGrey,
        )?;
    }

    let progress_row = 4 + (batch.len() as u16) * 2 + 1;
    draw_line(
        out,
        progress_row,
        &format_progress(session.picked_count()),
        Color::Green,
    )?;
    draw_line(out, progress_row + 2, FOOTER_COLLECTING, Color::DarkGrey)?;
    Ok(())
}

fn draw_gate<W: Write>(
    out: &mut W,
    number: u8,
    question: &str,
    subject: OfferKind,
) -> Result<(), AppError> {
    draw_line(out, 2, &format!("PYTANIE {number}/2"), Color::Green)?;
    draw_line(out, 4, question, Color::White)?;
    draw_line(
        out,
        6,
        &format!("({})", subject.offer().name),
        Color::DarkGrey,
    )?;
    draw_line(out, 8, FOOTER_GATE, Color::DarkGrey)?;
    Ok(())
}

fn draw_final<W: Write>(out: &mut W, kind: OfferKind) -> Result<(), AppError> {
    let offer = kind.offer();
    draw_line(out, 2, "TWÓJ BONUS", Color::Green)?;
    draw_line(out, 4, offer.name, Color::Yellow)?;
    draw_line(out, 5, offer.description, Color::White)?;
    draw_line(out, 7, offer.cta_text, Color::Green)?;
    draw_line(out, 8, offer.link, Color::Cyan)?;
    draw_line(out, 10, FOOTER_FINAL, Color::DarkGrey)?;
    Ok(())
}

/// One match line: marker, pairing, competition and kickoff.
pub fn format_match_row(m: &Match, active: bool) -> String {
    let marker = if active { ">" } else { " " };
    format!(
        "{marker} {} - {}  [{}]  {}",
        m.home_team, m.away_team, m.round, m.date
    )
}

/// Odds and recorded pick line below a match.
pub fn format_pick_row(m: &Match, pick_symbol: Option<&str>) -> String {
    let odds = match &m.odds {
        Some(odds) => format!("1 {}  X {}  2 {}", odds.home, odds.draw, odds.away),
        None => "brak kursów".to_string(),
    };
    match pick_symbol {
        Some(symbol) => format!("  {odds}  | twój typ: {symbol}"),
        None => format!("  {odds}"),
    }
}

/// Coupon progress counter.
pub fn format_progress(picked: usize) -> String {
    format!("Typy: {picked}/{MATCH_COUNT}")
}
