//! ironpath - BaseCalistenia four-week calisthenics program

use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use ironpath::db::Database;
use ironpath::donation;
use ironpath::plan::{MonthlyPlan, generate_plan};
use ironpath::profile::{Goal, UserProfile};
use ironpath::quotes::{format_quote, random_quote};
use ironpath::tui::App;
use ironpath::video::{PlaybackSession, PlaybackState, RenderDecision, VideoSource};

#[derive(Parser)]
#[command(name = "ironpath")]
#[command(author, version, about = "BaseCalistenia - 4 semanas de treinos em casa")]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "IRONPATH_DB", default_value = "ironpath.db")]
    db: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open TUI dashboard
    Tui,

    /// Create a profile and a fresh four-week plan
    Start {
        #[arg(short, long, value_enum)]
        goal: Goal,
    },

    /// Show the plan with completion marks
    Plan,

    /// Mark a lesson done (or undo it)
    Complete {
        #[arg(short, long)]
        week: u8,

        #[arg(short, long)]
        day: u8,
    },

    /// List completed lessons, newest first
    History {
        /// Number of records to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Classify a video URL and show how it would be rendered
    Resolve {
        url: String,

        /// Pretend native playback already failed
        #[arg(long)]
        failed: bool,
    },

    /// Play a lesson video: native player first, browser embed as fallback
    Play {
        #[arg(short, long)]
        week: u8,

        #[arg(short, long)]
        day: u8,

        /// External player for direct streams
        #[arg(long, env = "IRONPATH_PLAYER", default_value = "mpv")]
        player: String,
    },

    /// Print a motivational quote
    Quote,

    /// Print the share message
    Share,

    /// Donation details
    Donate,

    /// Delete profile, plan and history
    Reset,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    run(Cli::parse())
}

/// Dispatch a parsed command line. The database is only opened by commands
/// that read or write the stored profile and plan.
fn run(cli: Cli) -> Result<()> {
    let db_path = cli.db;
    let open_db = || Database::open(&db_path);

    match cli.command {
        Some(Commands::Start { goal }) => {
            let db = open_db()?;
            let now = Utc::now();
            let profile = UserProfile::anonymous(goal, now);
            let plan = generate_plan(&profile, now);
            db.save_profile(&profile)?;
            db.save_plan(&plan)?;
            info!(goal = goal.label(), plan_id = %plan.id, "Plan created");
            println!("{}", plan.title);
            println!("{}", plan.description);
        }

        Some(Commands::Plan) => {
            let plan = require_plan(&open_db()?)?;
            print_plan(&plan);
        }

        Some(Commands::Complete { week, day }) => {
            let db = open_db()?;
            let (Some(mut profile), Some(mut plan)) = db.restore()? else {
                bail!("No profile yet, run `ironpath start --goal <goal>` first");
            };
            if plan.day(week, day).is_none() {
                bail!("No lesson for week {} day {}", week, day);
            }

            match plan.toggle_day(week, day, Utc::now()) {
                Some(log) => {
                    println!("Aula concluída: {} (semana {}, dia {})", log.lesson_title, week, day);
                    profile.record(log);
                    db.save_profile(&profile)?;
                }
                None => println!("Aula desmarcada: semana {}, dia {}", week, day),
            }
            db.save_plan(&plan)?;
            println!("Progresso: {}/{}", plan.completed_count(), plan.total_sessions());
        }

        Some(Commands::History { limit }) => {
            let (profile, _) = open_db()?.restore()?;
            let Some(profile) = profile else {
                println!("Nenhum histórico.");
                return Ok(());
            };
            println!("Histórico de Atividades:");
            println!("{:-<60}", "");
            for log in profile.recent(limit) {
                println!(
                    "{} | {:28} | Semana {} • Dia {}",
                    log.timestamp.with_timezone(&Local).format("%d/%m %H:%M"),
                    log.lesson_title,
                    log.week_number,
                    log.day_number
                );
            }
        }

        Some(Commands::Resolve { url, failed }) => {
            let source = VideoSource::parse(&url);
            let state = if failed { PlaybackState::Failed } else { PlaybackState::Fresh };
            println!("Provider: {}", source.provider.name());
            if let Some(id) = &source.primary_id {
                println!("Id:       {}", id);
            }
            print_decision(&source.render(state));
        }

        Some(Commands::Play { week, day, player }) => {
            let plan = require_plan(&open_db()?)?;
            let session = plan
                .day(week, day)
                .with_context(|| format!("No lesson for week {} day {}", week, day))?;
            play(PlaybackSession::new(&session.video_url, &session.title), &player)?;
        }

        Some(Commands::Quote) => println!("{}", format_quote(random_quote())),

        Some(Commands::Share) => println!("{}", donation::share_message()),

        Some(Commands::Donate) => {
            println!("Apoie o Projeto");
            println!("Valor sugerido: {}", donation::SUGGESTED_AMOUNT);
            println!("Chave PIX:      {}", donation::PIX_KEY);
            println!("Comprovante:    {}", donation::receipt_link());
            println!("Contato:        {}", donation::contact_link());
        }

        Some(Commands::Reset) => {
            open_db()?.reset()?;
            println!("Dados apagados.");
        }

        Some(Commands::Tui) | None => {
            let mut app = App::new(open_db()?)?;
            app.run()?;
        }
    }

    Ok(())
}

fn require_plan(db: &Database) -> Result<MonthlyPlan> {
    match db.restore()? {
        (_, Some(plan)) => Ok(plan),
        _ => bail!("No plan yet, run `ironpath start --goal <goal>` first"),
    }
}

fn print_plan(plan: &MonthlyPlan) {
    println!("{} ({}/{})", plan.title, plan.completed_count(), plan.total_sessions());
    println!("{:-<60}", "");
    for week in &plan.weeks {
        println!("Semana {} – {}", week.week_number, week.focus);
        for day in &week.days {
            let mark = if day.completed { "✓" } else { " " };
            let video = if day.video_url.is_empty() { "sem vídeo" } else { "vídeo" };
            println!("  [{}] Dia {} | {:28} | {}", mark, day.day_number, day.title, video);
        }
    }
}

fn print_decision(decision: &RenderDecision) {
    match decision {
        RenderDecision::Placeholder => println!("Nenhum vídeo configurado."),
        RenderDecision::Embed { src } => println!("Embed:    {}", src),
        RenderDecision::Native { src } => println!("Native:   {}", src),
    }
}

/// Native decisions go to the external player; if it cannot start or exits
/// with an error the session falls back and the embed opens in the browser.
fn play(mut session: PlaybackSession, player: &str) -> Result<()> {
    println!("{}", session.title());

    if let RenderDecision::Native { src } = session.decision() {
        info!(player, src = %src, "Launching native player");
        let outcome = Command::new(player)
            .arg(&src)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        let failure = match outcome {
            Ok(status) if status.success() => return Ok(()),
            Ok(status) => format!("player exited with {}", status),
            Err(e) => format!("failed to launch '{}': {}", player, e),
        };
        session.report_native_error(&failure);
    }

    match session.decision() {
        RenderDecision::Placeholder => println!("Nenhum vídeo configurado."),
        decision => {
            let src = decision.src().unwrap_or_default();
            println!("Abrindo: {}", src);
            if let Err(e) = open::that(src) {
                warn!(error = %e, "Failed to open browser");
                println!("Abra manualmente: {}", src);
            }
        }
    }
    Ok(())
}
