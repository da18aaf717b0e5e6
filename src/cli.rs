//! CLI session — a line-based front-end that plays the view layer over any
//! async reader/writer pair (stdin/stdout in the binary).

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::RitualConfig;
use crate::dialogue::{self, Mood};
use crate::error::{Error, OnboardingError, Result};
use crate::profile::{BossOption, OnboardingFlow, OnboardingPhase, ProfileStore};
use crate::progress::{DailyProgressTracker, RitualStep, StepStatus};

/// How a session loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user typed `/quit`.
    Quit,
    /// Input closed.
    Eof,
}

/// What one home-screen command resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HomeCommand {
    Open(RitualStep),
    Reset,
    Quit,
    Unknown,
}

fn parse_home_command(input: &str) -> HomeCommand {
    match input.trim().to_lowercase().as_str() {
        "1" | "check-in" | "checkin" => HomeCommand::Open(RitualStep::CheckIn),
        "2" | "reflect" => HomeCommand::Open(RitualStep::Reflect),
        "3" | "zen" | "zen quest" => HomeCommand::Open(RitualStep::ZenQuest),
        "/reset" => HomeCommand::Reset,
        "/quit" | "/exit" => HomeCommand::Quit,
        _ => HomeCommand::Unknown,
    }
}

fn parse_boss(input: &str) -> Option<BossOption> {
    let input = input.trim();
    if let Ok(n) = input.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| BossOption::ALL.get(i).copied());
    }
    BossOption::ALL
        .into_iter()
        .find(|b| b.label().eq_ignore_ascii_case(input))
}

/// Interactive daily-ritual session.
pub struct CliSession<R, W> {
    lines: Lines<R>,
    out: W,
    profile: Arc<ProfileStore>,
    progress: Arc<DailyProgressTracker>,
    config: RitualConfig,
    /// Mood from the check-in, tied to the episode it was given in.
    mood: Option<(Uuid, String)>,
}

impl<R, W> CliSession<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(
        input: R,
        out: W,
        profile: Arc<ProfileStore>,
        progress: Arc<DailyProgressTracker>,
        config: RitualConfig,
    ) -> Self {
        Self {
            lines: input.lines(),
            out,
            profile,
            progress,
            config,
            mood: None,
        }
    }

    /// Run onboarding (when needed), then the home loop.
    pub async fn run(&mut self) -> Result<SessionEnd> {
        if !self.profile.is_complete() {
            if let Some(end) = self.onboard().await? {
                return Ok(end);
            }
        }
        self.home().await
    }

    /// Consume the session and hand back the writer.
    pub fn into_output(self) -> W {
        self.out
    }

    async fn say(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await?;
        Ok(())
    }

    async fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        self.out.write_all(prompt.as_bytes()).await?;
        self.out.write_all(b"> ").await?;
        self.out.flush().await?;
        Ok(self.lines.next_line().await?)
    }

    /// Mood for the current episode, falling back to the configured default.
    fn current_mood(&self) -> String {
        let episode = self.progress.snapshot().id;
        match &self.mood {
            Some((id, mood)) if *id == episode => mood.clone(),
            _ => self.config.default_mood.clone(),
        }
    }

    async fn onboard(&mut self) -> Result<Option<SessionEnd>> {
        let mut flow = OnboardingFlow::new(Arc::clone(&self.profile));

        while !flow.phase().is_terminal() {
            let phase = flow.phase();
            let result = match phase {
                OnboardingPhase::Welcome | OnboardingPhase::MeetEva => {
                    self.say(phase.prompt()).await?;
                    let Some(_) = self.ask("(press Enter)").await? else {
                        return Ok(Some(SessionEnd::Eof));
                    };
                    flow.advance()
                }
                OnboardingPhase::ArcTitle => {
                    self.say(phase.prompt()).await?;
                    let Some(title) = self.ask("").await? else {
                        return Ok(Some(SessionEnd::Eof));
                    };
                    flow.submit_arc_title(&title)
                }
                OnboardingPhase::Boss => {
                    self.say(phase.prompt()).await?;
                    for (i, option) in BossOption::ALL.iter().enumerate() {
                        self.say(&format!("  [{}] {}", i + 1, option)).await?;
                    }
                    let Some(choice) = self.ask("").await? else {
                        return Ok(Some(SessionEnd::Eof));
                    };
                    match parse_boss(&choice) {
                        Some(BossOption::Other) => {
                            let Some(custom) = self.ask("Name your boss").await? else {
                                return Ok(Some(SessionEnd::Eof));
                            };
                            flow.submit_boss(BossOption::Other, &custom)
                        }
                        Some(option) => flow.submit_boss(option, ""),
                        None => Err(OnboardingError::EmptyInput { field: "boss" }),
                    }
                }
                OnboardingPhase::FinalForm => {
                    self.say(phase.prompt()).await?;
                    let Some(form) = self.ask("").await? else {
                        return Ok(Some(SessionEnd::Eof));
                    };
                    flow.submit_final_form(&form)
                }
                OnboardingPhase::Summary => {
                    let summary = self.profile.read().summary();
                    self.say(phase.prompt()).await?;
                    self.say(&summary).await?;
                    let Some(_) = self.ask("(press Enter to begin your journey)").await? else {
                        return Ok(Some(SessionEnd::Eof));
                    };
                    flow.advance()
                }
                OnboardingPhase::Complete => break,
            };

            if let Err(e) = result {
                debug!(phase = %phase, error = %e, "Onboarding input refused");
                self.say(&format!("{e}. Let's try that again.")).await?;
            }
        }

        Ok(None)
    }

    async fn home(&mut self) -> Result<SessionEnd> {
        loop {
            self.render_home().await?;
            let Some(input) = self
                .ask("Choose 1-3, /reset to start a new day, /quit to leave")
                .await?
            else {
                return Ok(SessionEnd::Eof);
            };

            match parse_home_command(&input) {
                HomeCommand::Open(step) => {
                    if let Some(end) = self.open_step(step).await? {
                        return Ok(end);
                    }
                }
                HomeCommand::Reset => {
                    self.progress.reset_daily_flow();
                    self.mood = None;
                    self.say("A new episode begins.").await?;
                }
                HomeCommand::Quit => return Ok(SessionEnd::Quit),
                HomeCommand::Unknown => self.say("I didn't catch that.").await?,
            }
        }
    }

    async fn render_home(&mut self) -> Result<()> {
        let profile = self.profile.read();
        let arc = if profile.arc_title.is_empty() {
            "Your Journey"
        } else {
            &profile.arc_title
        };
        let boss = if profile.boss.is_empty() {
            "Unknown"
        } else {
            &profile.boss
        };
        let mut text = format!("\nToday's Episode\nArc: {arc}\nBoss: {boss}\n");
        for (i, card) in self.progress.steps().iter().enumerate() {
            text.push_str(&format!(
                "  [{}] {} ({}) - {}\n",
                i + 1,
                card.title,
                card.state.status,
                card.description
            ));
        }
        self.say(text.trim_end()).await
    }

    async fn open_step(&mut self, step: RitualStep) -> Result<Option<SessionEnd>> {
        let state = self.progress.status(step);
        if state.disabled {
            let prerequisite = step.prerequisite().map(|p| p.title()).unwrap_or_default();
            self.say(&format!(
                "{} is locked. Complete {} first.",
                step.title(),
                prerequisite
            ))
            .await?;
            return Ok(None);
        }
        if state.status == StepStatus::Completed {
            self.say(&format!("{} is already complete today.", step.title()))
                .await?;
            return Ok(None);
        }

        info!(step = %step, "Opening ritual step");
        match step {
            RitualStep::CheckIn => self.check_in().await,
            RitualStep::Reflect => self.reflect().await,
            RitualStep::ZenQuest => self.zen_quest().await,
        }
    }

    async fn check_in(&mut self) -> Result<Option<SessionEnd>> {
        self.say("How are you arriving today?").await?;
        for (i, mood) in Mood::ALL.iter().enumerate() {
            self.say(&format!("  [{}] {} {}", i + 1, mood.emoji(), mood.label()))
                .await?;
        }
        let Some(choice) = self.ask("Pick a number, or describe it in a word").await? else {
            return Ok(Some(SessionEnd::Eof));
        };

        let choice = choice.trim();
        let mood = match choice.parse::<usize>() {
            Ok(n) => n
                .checked_sub(1)
                .and_then(|i| Mood::ALL.get(i))
                .map(|m| m.id().to_string())
                .unwrap_or_else(|| self.config.default_mood.clone()),
            Err(_) => Mood::parse(choice)
                .map(|m| m.id().to_string())
                .unwrap_or_else(|| choice.to_string()),
        };

        self.progress.mark_checked_in();
        let episode = self.progress.snapshot().id;
        self.mood = Some((episode, mood.clone()));
        self.say(&format!(
            "Checked in feeling {}. Reflect With Eva is now open.",
            dialogue::format_mood(&mood)
        ))
        .await?;
        Ok(None)
    }

    async fn reflect(&mut self) -> Result<Option<SessionEnd>> {
        let context = self.profile.reflection_context(&self.current_mood());
        for message in dialogue::opening_messages(&context) {
            self.say(&format!("Eva: {}", message.text)).await?;
        }

        loop {
            let Some(text) = self.ask("(type /done when you're ready to move on)").await? else {
                return Ok(Some(SessionEnd::Eof));
            };
            if text.trim() == "/done" {
                break;
            }
            let message = dialogue::reply(&text, &context);
            self.say(&format!("Eva: {}", message.text)).await?;
        }

        match self.progress.mark_reflected() {
            Ok(()) => self.say("Reflection complete. Zen Quest is now open.").await?,
            Err(e) => self.say(&format!("{}", Error::from(e))).await?,
        }
        Ok(None)
    }

    async fn zen_quest(&mut self) -> Result<Option<SessionEnd>> {
        let params = self.profile.reflection_context(&self.current_mood());
        let script = dialogue::meditation_script(&params);

        self.say("Zen Quest: your inner mission for today.").await?;
        for line in dialogue::split_lines(&script) {
            self.say(line).await?;
            if !self.config.reveal_delay.is_zero() {
                tokio::time::sleep(self.config.reveal_delay).await;
            }
        }

        let Some(_) = self.ask("(press Enter to complete today's quest)").await? else {
            return Ok(Some(SessionEnd::Eof));
        };

        match self.progress.mark_completed_zen_quest() {
            Ok(()) => {
                self.say("Quest complete. Today's episode is finished.").await?;
            }
            Err(e) => self.say(&format!("{}", Error::from(e))).await?,
        }
        Ok(None)
    }
}
