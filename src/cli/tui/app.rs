//! TUI application state and logic.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::input::FormKey;
use crate::backend::ParkingBackend;
use crate::core::feed::{SpotEvent, SpotFeed};
use crate::core::models::{ParkingSpot, SpotStatus};

/// Actions triggered by user input while browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Up,
    Down,
    Left,
    Right,
    Reserve,
    Occupy,
    Free,
    Refresh,
    GridView,
    TableView,
}

/// Which layout the spot list renders in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Grid,
    Table,
}

/// Field focus inside the reservation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Minutes,
}

/// The reservation form overlay for a selected free spot.
#[derive(Debug, Clone)]
pub struct ReserveForm {
    pub spot_id: String,
    pub spot_number: u32,
    pub name: String,
    pub minutes: String,
    pub focus: FormField,
}

impl ReserveForm {
    fn new(spot: &ParkingSpot) -> Self {
        Self {
            spot_id: spot.id.clone(),
            spot_number: spot.number,
            name: String::new(),
            minutes: "30".to_string(),
            focus: FormField::Name,
        }
    }

    fn minutes_or_default(&self) -> u32 {
        self.minutes.parse().ok().filter(|m| *m > 0).unwrap_or(30)
    }
}

/// Main TUI application state.
pub struct TuiApp {
    backend: Arc<dyn ParkingBackend>,
    feed: SpotFeed,
    events: mpsc::Receiver<SpotEvent>,
    pub spots: Vec<ParkingSpot>,
    pub selected: usize,
    pub view: ViewMode,
    pub form: Option<ReserveForm>,
    pub running: bool,
    pub error: Option<String>,
    pub user_name: Option<String>,
    pub demo: bool,
    /// Number of cards per grid row; the renderer keeps this in sync
    /// with the terminal width so navigation matches the layout.
    pub grid_columns: usize,
}

impl TuiApp {
    pub fn new(
        backend: Arc<dyn ParkingBackend>,
        feed: SpotFeed,
        events: mpsc::Receiver<SpotEvent>,
        user_name: Option<String>,
        demo: bool,
    ) -> Self {
        Self {
            backend,
            feed,
            events,
            spots: Vec::new(),
            selected: 0,
            view: ViewMode::Grid,
            form: None,
            running: true,
            error: None,
            user_name,
            demo,
            grid_columns: 4,
        }
    }

    /// Apply any snapshots the feed has pushed since the last draw.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                SpotEvent::Snapshot(spots) => {
                    self.spots = spots;
                    if self.selected >= self.spots.len() {
                        self.selected = self.spots.len().saturating_sub(1);
                    }
                }
                SpotEvent::Error(message) => {
                    self.error = Some(message);
                }
            }
        }
    }

    pub fn stop_feed(&self) {
        self.feed.stop();
    }

    pub fn selected_spot(&self) -> Option<&ParkingSpot> {
        self.spots.get(self.selected)
    }

    pub async fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Refresh => {
                self.error = None;
                self.feed.refresh_now();
            }
            Action::GridView => self.view = ViewMode::Grid,
            Action::TableView => self.view = ViewMode::Table,
            Action::Up => self.move_selection(-(self.step() as isize)),
            Action::Down => self.move_selection(self.step() as isize),
            Action::Left => self.move_selection(-1),
            Action::Right => self.move_selection(1),
            Action::Reserve => self.open_form(),
            Action::Occupy => self.occupy_selected().await,
            Action::Free => self.free_selected().await,
        }
    }

    /// Vertical step: a full row in grid view, one entry in table view.
    fn step(&self) -> usize {
        match self.view {
            ViewMode::Grid => self.grid_columns.max(1),
            ViewMode::Table => 1,
        }
    }

    fn move_selection(&mut self, delta: isize) {
        if self.spots.is_empty() {
            return;
        }

        let current = self.selected as isize;
        let max = self.spots.len() as isize - 1;
        self.selected = (current + delta).clamp(0, max) as usize;
    }

    fn open_form(&mut self) {
        match self.selected_spot() {
            Some(spot) if spot.is_free() => {
                let form = ReserveForm::new(spot);
                self.error = None;
                self.form = Some(form);
            }
            Some(spot) => {
                let message = format!("Spot {} is not free", spot.number);
                self.error = Some(message);
            }
            None => {}
        }
    }

    pub async fn handle_form_key(&mut self, key: FormKey) {
        if key == FormKey::Submit {
            if let Some(form) = self.form.take() {
                self.submit_reservation(form).await;
            }
            return;
        }

        if key == FormKey::Cancel {
            self.form = None;
            return;
        }

        let Some(form) = self.form.as_mut() else {
            return;
        };

        match key {
            FormKey::NextField => {
                form.focus = match form.focus {
                    FormField::Name => FormField::Minutes,
                    FormField::Minutes => FormField::Name,
                };
            }
            FormKey::Char(c) => match form.focus {
                FormField::Name => form.name.push(c),
                FormField::Minutes if c.is_ascii_digit() => form.minutes.push(c),
                FormField::Minutes => {}
            },
            FormKey::Backspace => {
                match form.focus {
                    FormField::Name => form.name.pop(),
                    FormField::Minutes => form.minutes.pop(),
                };
            }
            FormKey::Submit | FormKey::Cancel => unreachable!(),
        }
    }

    async fn submit_reservation(&mut self, form: ReserveForm) {
        let result = self
            .backend
            .reserve(&form.spot_id, &form.name, form.minutes_or_default())
            .await;

        match result {
            Ok(_) => {
                self.error = None;
                self.feed.refresh_now();
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    async fn occupy_selected(&mut self) {
        let Some(spot) = self.selected_spot() else {
            return;
        };

        if spot.status != SpotStatus::Reserved {
            self.error = Some(format!("Spot {} is not reserved", spot.number));
            return;
        }

        let id = spot.id.clone();
        match self.backend.occupy(&id).await {
            Ok(_) => {
                self.error = None;
                self.feed.refresh_now();
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    async fn free_selected(&mut self) {
        let Some(spot) = self.selected_spot() else {
            return;
        };

        if spot.status == SpotStatus::Free {
            self.error = Some(format!("Spot {} is already free", spot.number));
            return;
        }

        let id = spot.id.clone();
        match self.backend.free(&id).await {
            Ok(_) => {
                self.error = None;
                self.feed.refresh_now();
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}
