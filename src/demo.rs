//! Headless demo runner: a random player driving the engine at 60 Hz.

use std::io;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{info, trace};

use crate::core::{
    FileHighScores, GameConfig, GameState, JsonLinesSync, MemoryHighScores, SoundCue, SoundSink,
};
use crate::input::{InputController, InputSource};
use crate::types::InputAction;

/// Fixed simulation step
pub const FRAME_SECS: f32 = 1.0 / 60.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoArgs {
    pub config: Option<PathBuf>,
    pub frames: u64,
    pub high_score: Option<PathBuf>,
    pub seed: Option<u64>,
    /// Stream notifications to stdout as JSON lines.
    pub sync: bool,
    pub verbose: u8,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            config: None,
            frames: 3600,
            high_score: None,
            seed: None,
            sync: false,
            verbose: 0,
        }
    }
}

pub fn parse_demo_args(args: &[String]) -> Result<DemoArgs> {
    let mut out = DemoArgs::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --config"))?;
                out.config = Some(PathBuf::from(v));
            }
            "--frames" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --frames"))?;
                out.frames = v
                    .parse::<u64>()
                    .map_err(|_| anyhow!("invalid --frames value: {}", v))?;
            }
            "--high-score" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --high-score"))?;
                out.high_score = Some(PathBuf::from(v));
            }
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                out.seed = Some(
                    v.parse::<u64>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            "--sync" => out.sync = true,
            "-v" | "--verbose" => out.verbose = out.verbose.saturating_add(1),
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(out)
}

/// Player that presses a random control now and then.
#[derive(Debug, Clone)]
pub struct RandomInput {
    rng: StdRng,
    pressed: Option<InputAction>,
    soft_drop: bool,
}

impl RandomInput {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            pressed: None,
            soft_drop: false,
        }
    }

    /// Decide this frame's input
    pub fn roll(&mut self) {
        self.pressed = if self.rng.random_bool(0.15) {
            match self.rng.random_range(0..10) {
                0..=2 => Some(InputAction::MoveLeft),
                3..=5 => Some(InputAction::MoveRight),
                6 => Some(InputAction::RotateRight),
                7 => Some(InputAction::RotateLeft),
                8 => Some(InputAction::Hold),
                _ => Some(InputAction::HardDrop),
            }
        } else {
            None
        };
        if self.rng.random_bool(0.02) {
            self.soft_drop = !self.soft_drop;
        }
    }
}

impl InputSource for RandomInput {
    fn was_pressed(&self, action: InputAction) -> bool {
        self.pressed == Some(action)
    }

    fn is_down(&self, action: InputAction) -> bool {
        match action {
            InputAction::SoftDrop => self.soft_drop,
            _ => self.pressed == Some(action),
        }
    }

    fn end_frame(&mut self) {
        self.pressed = None;
    }
}

/// Sound sink for hosts without audio: cues go to the trace log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceSound;

impl SoundSink for TraceSound {
    fn play_sound(&mut self, cue: SoundCue, pitch: f32) {
        trace!(cue = cue.as_str(), pitch, "sound");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DemoSummary {
    pub frames: u64,
    pub games: u32,
    pub best_score: u64,
    pub high_score: u64,
}

fn load_config(args: &DemoArgs) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

pub fn run_demo(args: &DemoArgs) -> Result<DemoSummary> {
    let config = load_config(args).context("demo configuration")?;
    let player_seed = config.seed.unwrap_or_else(rand::random);
    let mut controller = InputController::from_config(&config);

    let mut game = GameState::new(config).with_sound(TraceSound);
    game = match &args.high_score {
        Some(path) => game.with_high_scores(FileHighScores::new(path)),
        None => game.with_high_scores(MemoryHighScores::default()),
    };
    if args.sync {
        game = game.with_listener(JsonLinesSync::new(io::stdout()));
    }

    let mut input = RandomInput::new(player_seed);
    let mut summary = DemoSummary::default();

    info!(frames = args.frames, player_seed, "demo starting");
    game.start_game();
    summary.games = 1;

    for _ in 0..args.frames {
        let score = game.score();
        input.roll();
        controller.frame(&mut game, &mut input, FRAME_SECS);
        summary.frames += 1;
        summary.best_score = summary.best_score.max(game.score());

        if !game.is_playing() {
            summary.best_score = summary.best_score.max(score);
            game.start_game();
            summary.games += 1;
        }
    }

    summary.high_score = game.high_score();
    info!(
        frames = summary.frames,
        games = summary.games,
        best_score = summary.best_score,
        high_score = summary.high_score,
        "demo finished"
    );
    Ok(summary)
}
