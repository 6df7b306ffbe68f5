use anyhow::{Context, Result};
use log::info;
use std::time::Duration;

mod core;
mod engine;
mod game;

use crate::core::BattleConfig;
use crate::engine::game_loop::GameLoop;
use crate::engine::net::{LinkSettings, LoopbackLink};
use crate::game::battle::{AnswerBot, BattleEvent, BattleSession, SessionContext};

/// Environment variable naming an optional JSON config file
const CONFIG_ENV: &str = "MATH_BRAWL_CONFIG";

/// Simulated frame length for the headless demo
const FRAME_TIME: Duration = Duration::from_millis(16);

/// Give up on a match that has not finished after this many frames
const MAX_FRAMES: u64 = 60 * 60 * 10;

fn load_config() -> Result<BattleConfig> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            let config = BattleConfig::load(&path)
                .with_context(|| format!("loading config from {CONFIG_ENV}"))?;
            Ok(config)
        }
        Err(_) => Ok(BattleConfig::default()),
    }
}

fn log_events(tag: &str, session: &mut BattleSession) {
    for event in session.drain_events() {
        match event {
            BattleEvent::AnswerChanged { .. } => log::trace!("[{tag}] typed {}", session.answer_text()),
            BattleEvent::GaugesChanged => log::trace!("[{tag}] bars {:?}", session.bars()),
            BattleEvent::ProblemChanged { prompt } => log::debug!("[{tag}] problem: {prompt}"),
            BattleEvent::ComboChanged { combo } => log::debug!("[{tag}] combo: {combo}"),
            BattleEvent::ResultTextChanged { text } => info!("[{tag}] {text}"),
            BattleEvent::ResultPanelShown { score } => info!("[{tag}] score {score}"),
            BattleEvent::OpponentJoined { character } => info!("[{tag}] opponent is {character}"),
            BattleEvent::CountdownShown { round, seconds } => {
                info!("[{tag}] round {round} in {seconds}s")
            }
            BattleEvent::RoundStarted { round } => info!("[{tag}] round {round}: fight"),
            BattleEvent::Knockout { loser } => info!("[{tag}] knockout, {loser:?} down"),
            BattleEvent::MatchOver { score } => info!("[{tag}] match over {score}"),
            BattleEvent::MatchDecided { verdict } => info!("[{tag}] {}", verdict.label()),
            other => info!("[{tag}] {other:?}"),
        }
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting Math Brawl demo...");

    let config = load_config()?;
    let link = LoopbackLink::new(LinkSettings::default(), 0x5eed);
    let (end_a, end_b) = link.ends();

    let mut left = BattleSession::new(
        SessionContext {
            config: config.clone(),
            character_name: "Adder".to_string(),
            seed: 1,
        },
        Box::new(end_a),
    )?;
    let mut right = BattleSession::new(
        SessionContext {
            config,
            character_name: "Multiplier".to_string(),
            seed: 2,
        },
        Box::new(end_b),
    )?;

    // Fast and sloppy vs slow and careful
    let mut left_bot = AnswerBot::new(40, 0.75, 11);
    let mut right_bot = AnswerBot::new(70, 0.95, 12);

    left.start();
    right.start();

    let mut game_loop = GameLoop::new();
    let dt = game_loop.fixed_timestep();

    while !(left.has_left() && right.has_left()) {
        if game_loop.frame_count() >= MAX_FRAMES {
            anyhow::bail!("match did not finish after {} frames", MAX_FRAMES);
        }

        for _ in 0..game_loop.advance(FRAME_TIME) {
            link.advance(dt);
            left_bot.act(&mut left);
            right_bot.act(&mut right);
            left.tick(dt);
            right.tick(dt);
        }

        log_events("Adder", &mut left);
        log_events("Multiplier", &mut right);
    }

    for session in [&left, &right] {
        let opponent = session.opponent_character().map_or("nobody", |c| c.name);
        info!(
            "{} vs {}: {} after {} rounds ({})",
            session.own_character().name,
            opponent,
            session.verdict().map_or("ABANDONED", |v| v.label()),
            session.round_number(),
            session.score()
        );
    }

    info!(
        "Match finished after {} ticks (sent {}/{}, received {}/{}, {} dropped)",
        game_loop.tick_count(),
        left.messages_sent(),
        right.messages_sent(),
        left.messages_received(),
        right.messages_received(),
        link.dropped()
    );

    Ok(())
}
