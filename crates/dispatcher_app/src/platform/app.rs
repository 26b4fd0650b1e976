use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use dispatch_logging::{dispatch_error, dispatch_info};
use dispatcher_core::{update, AppState, Effect, Msg};
use ratatui::widgets::TableState;

use super::config::{AppConfig, Cli};
use super::effects::EffectRunner;
use super::keys::{map_key, KeyAction};
use super::logging;
use super::ui::{self, inputs::InputFields, render, AppTerminal};

const POLL_INTERVAL: Duration = Duration::from_millis(75);

pub fn run_app() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::resolve(&cli)?;
    logging::initialize(&config.log_file, logging::level_for(cli.verbose));
    dispatch_info!("Dispatcher starting; webhook={}", config.endpoint);

    let (msg_tx, msg_rx) = mpsc::channel();
    let runner = EffectRunner::new(config.dispatch_settings(), msg_tx)?;
    let state = AppState::with_endpoint(config.endpoint.clone());

    if let Some(path) = &cli.import {
        runner.enqueue(vec![Effect::ReadImportFile {
            path: path.display().to_string(),
        }]);
    }

    install_panic_hook();
    let mut terminal = ui::setup_terminal()?;
    let result = event_loop(&mut terminal, state, &runner, &msg_rx);
    ui::restore_terminal(&mut terminal)?;

    dispatch_info!("Dispatcher stopped");
    result
}

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ui::force_restore();
        dispatch_error!("Panic: {}", info);
        default_hook(info);
    }));
}

fn apply(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    let (state, effects) = update(state, msg);
    runner.enqueue(effects);
    state
}

fn event_loop(
    terminal: &mut AppTerminal,
    mut state: AppState,
    runner: &EffectRunner,
    msg_rx: &mpsc::Receiver<Msg>,
) -> Result<()> {
    let mut inputs = InputFields::from_view(&state.view());
    let mut table = TableState::default();
    let mut redraw = true;

    loop {
        // Engine completions and file reads arrive here.
        while let Ok(msg) = msg_rx.try_recv() {
            state = apply(state, msg, runner);
        }

        if state.consume_dirty() || redraw {
            let view = state.view();
            inputs.sync(&view);
            clamp_selection(&mut table, view.rows.len());
            terminal.draw(|frame| render::draw(frame, &view, &inputs, &mut table))?;
            redraw = false;
        }

        if !event::poll(POLL_INTERVAL)? {
            state = apply(state, Msg::Tick, runner);
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let view = state.view();
                match map_key(key, &view) {
                    KeyAction::Quit => break,
                    KeyAction::Dispatch(msg) => state = apply(state, msg, runner),
                    KeyAction::Edit(target) => match inputs.edit(target, key) {
                        Some(msg) => state = apply(state, msg, runner),
                        None => redraw = true,
                    },
                    KeyAction::ScrollUp => {
                        scroll(&mut table, view.rows.len(), false);
                        redraw = true;
                    }
                    KeyAction::ScrollDown => {
                        scroll(&mut table, view.rows.len(), true);
                        redraw = true;
                    }
                    KeyAction::Ignore => {}
                }
            }
            Event::Resize(_, _) => redraw = true,
            _ => {}
        }
    }

    Ok(())
}

fn scroll(table: &mut TableState, len: usize, down: bool) {
    if len == 0 {
        table.select(None);
        return;
    }
    let next = match (table.selected(), down) {
        (None, _) => 0,
        (Some(i), true) => (i + 1).min(len - 1),
        (Some(i), false) => i.saturating_sub(1),
    };
    table.select(Some(next));
}

/// Keeps the selection inside the list after a clear or shrink.
fn clamp_selection(table: &mut TableState, len: usize) {
    match table.selected() {
        Some(_) if len == 0 => table.select(None),
        Some(i) if i >= len => table.select(Some(len - 1)),
        _ => {}
    }
}
