use std::fs;
use std::path::Path;
use std::process;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};

use nextword::predict::{FixtureBackend, HttpBackend};
use nextword::settings::{self, settings};
use nextword::{
    fetch_candidates, ClickTarget, FieldState, Key, PredictionBackend, Response, SuggestSession,
};

#[derive(Parser)]
#[command(name = "nwtool", about = "Next-word suggestion diagnostics")]
struct Cli {
    /// Settings TOML to use instead of the built-in defaults
    #[arg(long, global = true)]
    settings: Option<String>,

    /// Log session events to stderr (needs the `trace` feature)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ask the prediction service for candidates once
    Predict {
        /// Text to predict from
        text: String,
        /// Number of candidates to request
        #[arg(short, long)]
        count: Option<u32>,
        /// Prediction endpoint URL
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Drive a headless session through an event script
    Replay {
        /// Script file: one event per line (type, wait, key, click, blur, count)
        script: String,
        /// JSON fixture mapping text to candidates, instead of the live service
        #[arg(long)]
        fixture: Option<String>,
        /// Prediction endpoint URL (ignored with --fixture)
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Print the default settings TOML
    Config,
}

/// One line of a replay script.
#[derive(Debug)]
enum Step {
    Type(String),
    Backspace(usize),
    Wait(u64),
    Key(Key),
    Click(ClickTarget),
    Blur,
    Count(u32),
}

fn parse_step(line: &str) -> Result<Option<Step>, String> {
    let line = line.trim_start();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (cmd, arg) = line.split_once(' ').unwrap_or((line, ""));
    let arg = arg.trim_end();

    let step = match cmd {
        "type" => {
            // Quoted text keeps surrounding spaces: type " wor"
            let text = if arg.starts_with('"') {
                serde_json::from_str::<String>(arg).map_err(|e| format!("bad quoted text: {e}"))?
            } else {
                arg.to_string()
            };
            Step::Type(text)
        }
        "backspace" => Step::Backspace(if arg.is_empty() {
            1
        } else {
            arg.parse().map_err(|_| format!("bad backspace count: {arg}"))?
        }),
        "wait" => Step::Wait(arg.parse().map_err(|_| format!("bad wait: {arg}"))?),
        "key" => Step::Key(match arg {
            "tab" => Key::Tab,
            "right" => Key::ArrowRight,
            "down" => Key::ArrowDown,
            "up" => Key::ArrowUp,
            "esc" | "escape" => Key::Escape,
            "other" => Key::Other,
            _ => return Err(format!("unknown key: {arg}")),
        }),
        "click" => Step::Click(match arg {
            "field" => ClickTarget::Field,
            "outside" => ClickTarget::Outside,
            _ => ClickTarget::Suggestion(
                arg.parse()
                    .map_err(|_| format!("bad click target: {arg}"))?,
            ),
        }),
        "blur" => Step::Blur,
        "count" => Step::Count(arg.parse().map_err(|_| format!("bad count: {arg}"))?),
        _ => return Err(format!("unknown command: {cmd}")),
    };
    Ok(Some(step))
}

/// Headless host: owns the field and a virtual clock, resolves requests
/// synchronously and prints every visible change.
struct Replay {
    session: SuggestSession,
    field: FieldState,
    backend: Box<dyn PredictionBackend>,
    now: Instant,
}

impl Replay {
    fn run(&mut self, step: Step) {
        match step {
            Step::Type(text) => {
                for ch in text.chars() {
                    let at = byte_offset(&self.field);
                    self.field.text.insert(at, ch);
                    self.field.caret += 1;
                    self.session.handle_input(self.now);
                }
            }
            Step::Backspace(n) => {
                for _ in 0..n.min(self.field.caret) {
                    self.field.caret -= 1;
                    let at = byte_offset(&self.field);
                    self.field.text.remove(at);
                    self.session.handle_input(self.now);
                }
            }
            Step::Wait(ms) => {
                self.now += Duration::from_millis(ms);
                if let Some(resp) = self.session.tick(self.now, &self.field) {
                    self.apply(resp);
                }
            }
            Step::Key(key) => {
                let resp = self.session.handle_key(key, &mut self.field);
                if resp.consumed {
                    println!("  (default prevented)");
                }
                self.apply(resp);
            }
            Step::Click(target) => {
                let resp = self.session.handle_click(target, &mut self.field);
                self.apply(resp);
            }
            Step::Blur => {
                self.field.focused = false;
                let resp = self.session.handle_focus_lost();
                self.apply(resp);
            }
            Step::Count(n) => {
                self.session.set_requested_count(n);
                println!("  count = {}", self.session.requested_count());
            }
        }
        self.print_state();
    }

    fn apply(&mut self, resp: Response) {
        if resp.refocus {
            println!("  focus field");
        }
        if let Some(request) = resp.request {
            println!(
                "  request #{} {:?} (n={})",
                request.generation, request.text, request.requested_count
            );
            let candidates = fetch_candidates(self.backend.as_ref(), &request);
            if let Some(next) = self
                .session
                .receive_predictions(request.generation, candidates)
            {
                self.apply(next);
            }
        }
    }

    fn print_state(&self) {
        let chips: Vec<String> = self
            .session
            .suggestions()
            .candidates()
            .iter()
            .enumerate()
            .map(|(i, c)| {
                if self.session.suggestions().highlighted() == Some(i) {
                    format!("[{c}]")
                } else {
                    c.clone()
                }
            })
            .collect();
        println!(
            "  field {:?} caret={} | {}",
            self.field.text,
            self.field.caret,
            if chips.is_empty() {
                "-".to_string()
            } else {
                chips.join(" ")
            }
        );
    }
}

fn byte_offset(field: &FieldState) -> usize {
    field
        .text
        .char_indices()
        .nth(field.caret)
        .map_or(field.text.len(), |(i, _)| i)
}

fn http_backend(endpoint: Option<String>) -> HttpBackend {
    let s = settings();
    let endpoint = endpoint.unwrap_or_else(|| s.predict.endpoint.clone());
    HttpBackend::new(&endpoint, s.request_timeout())
}

fn main() {
    let cli = Cli::parse();
    if cli.verbose {
        nextword::trace_init::init_stderr();
    }

    if let Some(path) = &cli.settings {
        let content = fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Failed to read settings {}: {}", path, e);
            process::exit(1);
        });
        settings::init_custom(content).unwrap_or_else(|e| {
            eprintln!("Invalid settings {}: {}", path, e);
            process::exit(1);
        });
    }

    match cli.command {
        Command::Predict {
            text,
            count,
            endpoint,
        } => {
            let s = settings();
            let count = count
                .unwrap_or(s.predict.default_count)
                .clamp(1, s.predict.max_count);
            let backend = http_backend(endpoint);
            match backend.predict(&text, count) {
                Ok(candidates) if candidates.is_empty() => println!("(no predictions)"),
                Ok(candidates) => {
                    for (i, c) in candidates.iter().enumerate() {
                        println!("{}\t{}", i + 1, c);
                    }
                }
                Err(e) => {
                    eprintln!("Prediction failed: {}", e);
                    process::exit(1);
                }
            }
        }

        Command::Replay {
            script,
            fixture,
            endpoint,
        } => {
            let content = fs::read_to_string(&script).unwrap_or_else(|e| {
                eprintln!("Failed to read script {}: {}", script, e);
                process::exit(1);
            });
            let mut steps = Vec::new();
            for (lineno, line) in content.lines().enumerate() {
                match parse_step(line) {
                    Ok(Some(step)) => steps.push((line.trim().to_string(), step)),
                    Ok(None) => {}
                    Err(e) => {
                        eprintln!("{}:{}: {}", script, lineno + 1, e);
                        process::exit(1);
                    }
                }
            }

            let backend: Box<dyn PredictionBackend> = match fixture {
                Some(path) => Box::new(FixtureBackend::open(Path::new(&path)).unwrap_or_else(|e| {
                    eprintln!("Failed to load fixture: {}", e);
                    process::exit(1);
                })),
                None => Box::new(http_backend(endpoint)),
            };

            let mut replay = Replay {
                session: SuggestSession::from_settings(settings()),
                field: FieldState::default(),
                backend,
                now: Instant::now(),
            };
            for (line, step) in steps {
                println!("> {}", line);
                replay.run(step);
            }
        }

        Command::Config => {
            print!("{}", settings::default_toml());
        }
    }
}
