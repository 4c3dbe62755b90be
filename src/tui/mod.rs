//! TUI module - Terminal dashboard with ratatui

use anyhow::Result;
use chrono::Utc;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
};
use std::io::{Stdout, stdout};
use tracing::{info, warn};

use crate::db::Database;
use crate::donation;
use crate::plan::{MonthlyPlan, WEEKS, generate_plan};
use crate::profile::{Goal, UserProfile};
use crate::quotes::{format_quote, random_quote};
use crate::router::{AppView, ViewRouter};
use crate::video::{PlaybackSession, RenderDecision};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// App state for TUI
pub struct App {
    db: Database,
    router: ViewRouter,
    profile: Option<UserProfile>,
    plan: Option<MonthlyPlan>,
    player: PlaybackSession,
    quote: &'static str,
    status: Option<String>,
    confirm_reset: bool,
    should_quit: bool,
}

impl App {
    pub fn new(db: Database) -> Result<Self> {
        let (profile, plan) = db.restore()?;
        let router = ViewRouter::restore(profile.is_some());

        Ok(Self {
            db,
            router,
            profile,
            plan,
            player: PlaybackSession::default(),
            quote: random_quote(),
            status: None,
            confirm_reset: false,
            should_quit: false,
        })
    }

    /// Run the TUI application
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = init_terminal()?;

        let result = (|| -> Result<()> {
            while !self.should_quit {
                terminal.draw(|frame| self.render(frame))?;
                self.handle_events()?;
            }
            Ok(())
        })();

        restore_terminal()?;
        result
    }

    /// Keep the video view pointed at the selected lesson
    fn sync_player(&mut self) {
        let (url, title) = self
            .plan
            .as_ref()
            .and_then(|plan| self.router.current_session(plan))
            .map(|s| (s.video_url.clone(), s.title.clone()))
            .unwrap_or_default();
        self.player.load(&url, &title);
    }

    fn start(&mut self, goal: Goal) -> Result<()> {
        let now = Utc::now();
        let profile = UserProfile::anonymous(goal, now);
        let plan = generate_plan(&profile, now);

        self.db.save_profile(&profile)?;
        self.db.save_plan(&plan)?;
        info!(goal = goal.label(), plan_id = %plan.id, "Plan created");

        self.profile = Some(profile);
        self.plan = Some(plan);
        self.quote = random_quote();
        self.router.finish_onboarding();
        Ok(())
    }

    fn toggle_complete(&mut self) -> Result<()> {
        let Some(week) = self.router.selected_week() else {
            return Ok(());
        };
        let day = self.router.active_day();
        let (Some(plan), Some(profile)) = (self.plan.as_mut(), self.profile.as_mut()) else {
            return Ok(());
        };

        let log = plan.toggle_day(week, day, Utc::now());
        self.db.save_plan(plan)?;
        if let Some(log) = log {
            self.status = Some(format!("Aula concluída: {}", log.lesson_title));
            profile.record(log);
            self.db.save_profile(profile)?;
        }
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.db.reset()?;
        self.profile = None;
        self.plan = None;
        self.router.reset();
        self.status = Some("Dados apagados".to_string());
        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ])
            .split(area);

        // Header
        let header = Paragraph::new("BaseCalistenia - 4 semanas de treinos")
            .style(Style::default().fg(Color::Yellow).bold())
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        match self.router.view() {
            AppView::Landing => self.render_landing(frame, chunks[1]),
            AppView::Onboarding => self.render_onboarding(frame, chunks[1]),
            AppView::Dashboard => match self.router.selected_week() {
                None => self.render_modules(frame, chunks[1]),
                Some(_) => self.render_lesson(frame, chunks[1]),
            },
            AppView::Donation => self.render_donation(frame, chunks[1]),
        }

        // Footer
        let hints = match (self.router.view(), self.router.selected_week()) {
            (AppView::Landing, _) => "enter: começar | q: sair",
            (AppView::Onboarding, _) => "1: emagrecer | 2: ganhar massa | q: sair",
            (AppView::Dashboard, None) => "1-4: semana | d: doar | s: compartilhar | X: resetar | q: sair",
            (AppView::Dashboard, Some(_)) => {
                "1-7: dia | c: concluir | f: falha no player | o: abrir | esc: voltar | d: doar | q: sair"
            }
            (AppView::Donation, _) => "esc: voltar aos treinos | q: sair",
        };
        let footer_text = match &self.status {
            Some(status) => format!("{}  ·  {}", status, hints),
            None => hints.to_string(),
        };
        let footer = Paragraph::new(footer_text)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[2]);
    }

    fn render_landing(&self, frame: &mut Frame, area: Rect) {
        let text = vec![
            Line::from("Método 100% Caseiro").yellow(),
            Line::from(""),
            Line::from("Defina seu corpo sem academia").bold(),
            Line::from("Calistenia para quem tem pouco tempo."),
            Line::from(""),
            Line::from("Projeto mantido por doações voluntárias.").dark_gray(),
        ];
        let widget = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(widget, area);
    }

    fn render_onboarding(&self, frame: &mut Frame, area: Rect) {
        let mut text = vec![Line::from("Qual é o seu objetivo?").bold(), Line::from("")];
        for (i, goal) in Goal::all().iter().enumerate() {
            text.push(Line::from(format!("{}  {} {}", i + 1, goal.emoji(), goal.label())));
        }
        let widget = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Objetivo"));
        frame.render_widget(widget, area);
    }

    fn render_modules(&self, frame: &mut Frame, area: Rect) {
        let Some(plan) = &self.plan else {
            let widget = Paragraph::new("Nenhum plano encontrado. Pressione X para recomeçar.")
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(widget, area);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(WEEKS as u16 + 4), Constraint::Min(5)])
            .split(area);

        let rows: Vec<Row> = plan
            .weeks
            .iter()
            .map(|w| {
                Row::new(vec![
                    Cell::from(format!("Semana {}", w.week_number)),
                    Cell::from(w.focus.clone()),
                    Cell::from(format!("{}/{}", w.completed_count(), w.days.len())),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [Constraint::Length(10), Constraint::Min(24), Constraint::Length(8)],
        )
        .header(Row::new(vec!["Módulo", "Foco", "Aulas"]).style(Style::default().bold()))
        .block(Block::default().borders(Borders::ALL).title(format!(
            "{} ({}/{})",
            plan.title,
            plan.completed_count(),
            plan.total_sessions()
        )));
        frame.render_widget(table, chunks[0]);

        let history: Vec<Row> = self
            .profile
            .as_ref()
            .map(|p| p.history.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|log| {
                Row::new(vec![
                    Cell::from(log.timestamp.format("%d/%m %H:%M").to_string()),
                    Cell::from(log.lesson_title.clone()),
                    Cell::from(format!("Semana {} • Dia {}", log.week_number, log.day_number)),
                ])
            })
            .collect();

        let history_table = Table::new(
            history,
            [Constraint::Length(12), Constraint::Min(24), Constraint::Length(18)],
        )
        .block(Block::default().borders(Borders::ALL).title("Histórico de Atividades"));
        frame.render_widget(history_table, chunks[1]);
    }

    fn render_lesson(&self, frame: &mut Frame, area: Rect) {
        let Some(week) = self.plan.as_ref().and_then(|plan| self.router.current_week(plan)) else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(6), Constraint::Length(3)])
            .split(area);

        let title = Paragraph::new(vec![
            Line::from(format!("Semana {} – {}", week.week_number, week.focus)).bold(),
            Line::from(format_quote(self.quote)).yellow().italic(),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let source = self.player.source();
        let video_lines = match self.player.decision() {
            RenderDecision::Placeholder => vec![Line::from("Nenhum vídeo configurado.").dark_gray()],
            decision => vec![
                Line::from(format!("Fonte: {}", source.provider.name())),
                Line::from(format!("Modo: {}", decision.label())),
                Line::from(decision.src().unwrap_or_default().to_string()).cyan(),
            ],
        };
        let video = Paragraph::new(video_lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(self.player.title().to_string()));
        frame.render_widget(video, chunks[1]);

        let active = self.router.active_day();
        let days: Vec<Span> = week
            .days
            .iter()
            .map(|d| {
                let mark = if d.completed { "✓" } else { "▶" };
                let label = format!(" {} Dia {} ", mark, d.day_number);
                if d.day_number == active {
                    Span::styled(label, Style::default().fg(Color::Black).bg(Color::Yellow))
                } else {
                    Span::raw(label)
                }
            })
            .collect();
        let picker = Paragraph::new(Line::from(days))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Escolha o dia do treino"));
        frame.render_widget(picker, chunks[2]);
    }

    fn render_donation(&self, frame: &mut Frame, area: Rect) {
        let text = vec![
            Line::from("Apoie o Projeto").bold(),
            Line::from(""),
            Line::from(format!("Valor sugerido: {}", donation::SUGGESTED_AMOUNT)),
            Line::from(format!("Chave PIX: {}", donation::PIX_KEY)).green(),
            Line::from(""),
            Line::from("Envie o comprovante e receba um bônus exclusivo:"),
            Line::from(donation::receipt_link()).cyan(),
        ];
        let widget = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Doação"));
        frame.render_widget(widget, area);
    }

    fn handle_events(&mut self) -> Result<()> {
        if event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            self.handle_key(key.code)?;
            self.sync_player();
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> Result<()> {
        if code == KeyCode::Char('q') {
            self.should_quit = true;
            return Ok(());
        }
        if code != KeyCode::Char('X') {
            self.confirm_reset = false;
        }
        self.status = None;

        match (self.router.view(), code) {
            (AppView::Landing, KeyCode::Enter) => self.router.start_flow(),
            (AppView::Onboarding, KeyCode::Char('1')) => self.start(Goal::WeightLoss)?,
            (AppView::Onboarding, KeyCode::Char('2')) => self.start(Goal::MuscleGain)?,
            (AppView::Donation, KeyCode::Esc | KeyCode::Char('b')) => self.router.toggle_donation(),
            (AppView::Dashboard, KeyCode::Char('d')) => self.router.toggle_donation(),
            (AppView::Dashboard, code) => self.handle_dashboard_key(code)?,
            _ => {}
        }
        Ok(())
    }

    fn handle_dashboard_key(&mut self, code: KeyCode) -> Result<()> {
        let in_week = self.router.selected_week().is_some();

        match code {
            KeyCode::Char(c @ '1'..='7') => {
                let n = c as u8 - b'0';
                let selected = if in_week {
                    self.router.select_day(n)
                } else {
                    self.router.select_week(n)
                };
                if let Err(e) = selected {
                    self.status = Some(e.to_string());
                }
            }
            KeyCode::Esc | KeyCode::Char('b') if in_week => self.router.back_to_modules(),
            KeyCode::Char('c') if in_week => self.toggle_complete()?,
            KeyCode::Char('f') if in_week => {
                if self.player.report_native_error("reported from dashboard") {
                    self.status = Some("Player nativo falhou, usando embed".to_string());
                }
            }
            KeyCode::Char('o') if in_week => {
                if let Some(src) = self.player.decision().src() {
                    if let Err(e) = open::that(src) {
                        warn!(error = %e, "Failed to open browser");
                        self.status = Some(format!("Não foi possível abrir: {}", e));
                    }
                }
            }
            KeyCode::Char('s') if !in_week => {
                self.status = Some(format!("Link: {}", donation::SHARE_URL));
            }
            KeyCode::Char('X') if !in_week => {
                if self.confirm_reset {
                    self.confirm_reset = false;
                    self.reset()?;
                } else {
                    self.confirm_reset = true;
                    self.status = Some("Pressione X novamente para apagar seu progresso".to_string());
                }
            }
            _ => {}
        }
        Ok(())
    }
}

fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
