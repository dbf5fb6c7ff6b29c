use color_eyre::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use portfolio_core::game::Difficulty;
use ratatui::layout::{Constraint, Layout, Rect};
use tokio::sync::mpsc;

use crate::{
    action::Action,
    cli::{Cli, RunMode},
    components::{footer::FooterComponent, popups::SuccessPopup, Component},
    config::Config,
    pages::{ContactPage, GamePage, Page},
    state::{InputMode, State},
    tui::{Event, EventResponse, Tui},
};

pub struct App {
    config: Config,
    pages: Vec<Box<dyn Page>>,
    active_page: usize,
    footer: FooterComponent,
    popup: Option<Box<dyn Component>>,
    should_quit: bool,
    should_suspend: bool,
    state: State,
}

impl App {
    pub fn new(cli: &Cli) -> Result<Self> {
        let config = Config::new()?;
        let (active_page, difficulty) = match cli.start_mode() {
            RunMode::Contact => (0, Difficulty::default()),
            RunMode::Game { difficulty } => (1, difficulty),
        };
        let state = State {
            active_page,
            ..State::default()
        };

        Ok(Self {
            config,
            pages: vec![
                Box::new(ContactPage::new()),
                Box::new(GamePage::new(difficulty)),
            ],
            active_page,
            footer: FooterComponent::new(),
            popup: None,
            should_quit: false,
            should_suspend: false,
            state,
        })
    }

    fn build_tui(&self) -> Result<Tui> {
        Ok(Tui::new()?
            .tick_rate(self.config.config.tick_rate)
            .frame_rate(self.config.config.frame_rate)
            .mouse(true))
    }

    pub async fn run(&mut self) -> Result<()> {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

        let mut tui = self.build_tui()?;
        tui.enter()?;

        for page in self.pages.iter_mut() {
            page.init(&mut self.state)?;
        }
        self.footer.init(&self.state)?;

        loop {
            if let Some(e) = tui.next().await {
                // modal popup gets first pick, then the active page
                let mut stop_event_propagation = self
                    .popup
                    .as_mut()
                    .and_then(|popup| popup.handle_events(e.clone(), &mut self.state).ok())
                    .map(|response| match response {
                        Some(EventResponse::Continue(action)) => {
                            action_tx.send(action).ok();
                            false
                        }
                        Some(EventResponse::Stop(action)) => {
                            action_tx.send(action).ok();
                            true
                        }
                        _ => false,
                    })
                    .unwrap_or(false);

                stop_event_propagation = stop_event_propagation
                    || self
                        .pages
                        .get_mut(self.active_page)
                        .and_then(|page| page.handle_events(e.clone(), &mut self.state).ok())
                        .map(|response| match response {
                            Some(EventResponse::Continue(action)) => {
                                action_tx.send(action).ok();
                                false
                            }
                            Some(EventResponse::Stop(action)) => {
                                action_tx.send(action).ok();
                                true
                            }
                            _ => false,
                        })
                        .unwrap_or(false);

                if !stop_event_propagation {
                    match e {
                        Event::Quit if self.state.input_mode == InputMode::Normal => {
                            action_tx.send(Action::Quit)?
                        }
                        Event::Tick => action_tx.send(Action::Tick)?,
                        Event::Render => action_tx.send(Action::Render)?,
                        Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
                        Event::Key(key) if self.state.input_mode == InputMode::Normal => {
                            match key.code {
                                KeyCode::Char('q') => action_tx.send(Action::Quit)?,
                                KeyCode::Char('z')
                                    if key.modifiers.contains(KeyModifiers::CONTROL) =>
                                {
                                    action_tx.send(Action::Suspend)?
                                }
                                KeyCode::Char('1') => action_tx.send(Action::Navigate(0))?,
                                KeyCode::Char('2') => action_tx.send(Action::Navigate(1))?,
                                _ => {}
                            }
                        }
                        _ => {}
                    }
                }
            }

            while let Ok(action) = action_rx.try_recv() {
                if action != Action::Tick && action != Action::Render {
                    tracing::debug!("{action:?}");
                }
                match &action {
                    Action::Quit if self.state.input_mode == InputMode::Normal => {
                        self.should_quit = true
                    }
                    Action::Suspend => self.should_suspend = true,
                    Action::Resume => self.should_suspend = false,
                    Action::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, *w, *h))?;
                        tui.draw(|f| {
                            self.render(f).unwrap_or_else(|err| {
                                action_tx
                                    .send(Action::Error(format!("Failed to draw: {:?}", err)))
                                    .unwrap();
                            })
                        })?;
                    }
                    Action::Render => {
                        tui.draw(|f| {
                            self.render(f).unwrap_or_else(|err| {
                                action_tx
                                    .send(Action::Error(format!("Failed to draw: {:?}", err)))
                                    .unwrap();
                            })
                        })?;
                    }
                    Action::Navigate(index) if *index < self.pages.len() => {
                        self.active_page = *index;
                        self.state.active_page = *index;
                        tracing::debug!(page = self.pages[*index].name(), "page switched");
                    }
                    Action::ContactSubmitted(submission) => {
                        self.popup = Some(Box::new(SuccessPopup::new(submission.clone())));
                    }
                    Action::ClosePopup => {
                        self.popup = None;
                    }
                    Action::Error(msg) => tracing::error!("{msg}"),
                    _ => {}
                }

                if let Some(popup) = &mut self.popup {
                    if let Some(follow_up) = popup.update(action.clone(), &mut self.state)? {
                        action_tx.send(follow_up)?
                    };
                } else if let Some(page) = self.pages.get_mut(self.active_page) {
                    if let Some(follow_up) = page.update(action.clone(), &mut self.state)? {
                        action_tx.send(follow_up)?
                    };
                }

                if let Some(follow_up) = self.footer.update(action.clone(), &mut self.state)? {
                    action_tx.send(follow_up)?
                };
            }

            if self.should_suspend {
                tui.suspend()?;
                action_tx.send(Action::Resume)?;
                tui = self.build_tui()?;
                tui.enter()?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        Ok(())
    }

    fn render(&mut self, frame: &mut crate::tui::Frame<'_>) -> Result<()> {
        let vertical_layout =
            Layout::vertical(vec![Constraint::Fill(1), Constraint::Length(2)]).split(frame.area());

        if let Some(page) = self.pages.get_mut(self.active_page) {
            page.draw(frame, vertical_layout[0], &self.state)?;
        };
        self.footer.draw(frame, vertical_layout[1], &self.state)?;

        if let Some(popup) = &mut self.popup {
            popup.draw(frame, frame.area(), &self.state)?;
        }
        Ok(())
    }
}
