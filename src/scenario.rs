//! Scenario replay: register zones, run scripted drags, report outcomes.
//!
//! DESIGN
//! ======
//! A scenario is a JSON document with a list of drop zones and a list of
//! drags. Zones are registered once, up front, on one coordinator; drags run
//! in order, each through its own [`DragController`] over a
//! [`SimulatedElement`]. Zone callbacks append to a shared event log that is
//! drained into each drag's report, so the report shows exactly which
//! enter/leave/drop notifications a drag caused.
//!
//! Steps may unregister a zone by name mid-drag; the live session sees the
//! removal on its next position update.

#[cfg(test)]
#[path = "scenario_test.rs"]
mod scenario_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use dragdrop::{
    BoundingBox, Button, DragController, DragCoordinator, HighlightChange, Point, Registration, Surface,
    ZoneHighlight, ZoneId,
};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::AppError;
use crate::surface::SimulatedElement;

// =============================================================================
// INPUT
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub zones: Vec<ZoneSpec>,
    #[serde(default)]
    pub drags: Vec<DragSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneSpec {
    pub name: String,
    /// Falls back to the configured default channel.
    #[serde(default)]
    pub channel: Option<String>,
    pub rect: BoundingBox,
    #[serde(default = "accepts_by_default")]
    pub accepts: bool,
}

fn accepts_by_default() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DragSpec {
    /// Payload dropped on the winning zone.
    pub item: String,
    #[serde(default)]
    pub channel: Option<String>,
    /// Where the element sits in its list before the drag.
    pub element: BoundingBox,
    /// Pointer position of the primary press that starts the drag.
    pub press: Point,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub end: DragEnd,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Pointer moves to this absolute position.
    Move(Point),
    /// The named zone is torn down.
    Unregister(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DragEnd {
    #[default]
    Drop,
    Cancel,
}

impl Scenario {
    /// Parse a scenario document.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Json`] for malformed or unknown fields.
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(raw)?)
    }
}

// =============================================================================
// OUTPUT
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Accepted,
    Rejected,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DragReport {
    pub item: String,
    pub channel: String,
    pub outcome: Outcome,
    /// Zone the element overlapped when the drag ended.
    pub zone: Option<String>,
    pub events: Vec<String>,
    pub final_box: BoundingBox,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneReport {
    pub name: String,
    pub channel: String,
    pub enters: u32,
    pub drops: u32,
    pub over: bool,
    pub registered: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub drags: Vec<DragReport>,
    pub zones: Vec<ZoneReport>,
}

// =============================================================================
// RUNNER
// =============================================================================

type Events = Rc<RefCell<Vec<String>>>;

struct ZoneRuntime {
    name: String,
    channel: String,
    highlight: ZoneHighlight,
    registration: Registration,
}

/// Replays scenarios against one coordinator.
pub struct Runner {
    config: Config,
    coordinator: Rc<DragCoordinator<String, String>>,
    zones: Vec<ZoneRuntime>,
    names: HashMap<ZoneId, String>,
    events: Events,
}

impl Runner {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let coordinator = Rc::new(DragCoordinator::with_options(config.session));
        Self { config, coordinator, zones: Vec::new(), names: HashMap::new(), events: Rc::default() }
    }

    /// Register every zone, then run every drag in order.
    ///
    /// # Errors
    ///
    /// Fails on duplicate or unknown zone names, invalid zone boxes, and
    /// drags that cannot start.
    pub fn run(mut self, scenario: &Scenario) -> Result<Report, AppError> {
        for spec in &scenario.zones {
            self.register(spec)?;
        }
        let mut drags = Vec::with_capacity(scenario.drags.len());
        for spec in &scenario.drags {
            drags.push(self.drag(spec)?);
        }
        Ok(Report { drags, zones: self.zone_reports() })
    }

    fn channel_or_default(&self, channel: Option<&str>) -> String {
        channel.map_or_else(|| self.config.channel.clone(), str::to_owned)
    }

    fn register(&mut self, spec: &ZoneSpec) -> Result<(), AppError> {
        if self.zones.iter().any(|z| z.name == spec.name) {
            return Err(AppError::DuplicateZone(spec.name.clone()));
        }
        let channel = self.channel_or_default(spec.channel.as_deref());
        let highlight = ZoneHighlight::new();

        let zone = {
            let (name, events, accepts) = (spec.name.clone(), Rc::clone(&self.events), spec.accepts);
            let (change_name, change_events) = (spec.name.clone(), Rc::clone(&self.events));
            highlight.observed_zone(
                spec.rect,
                move |item: String, _element: &String| {
                    let verdict = if accepts { "accepted" } else { "rejected" };
                    events.borrow_mut().push(format!("drop:{name}:{item}:{verdict}"));
                    accepts
                },
                move |change| {
                    let verb = match change {
                        HighlightChange::Enter => "enter",
                        HighlightChange::Leave => "leave",
                    };
                    change_events.borrow_mut().push(format!("{verb}:{change_name}"));
                },
            )
        };

        let registration = self.coordinator.register_drop_zone_in(&channel, zone)?;
        tracing::info!(zone = %spec.name, %channel, id = %registration.id(), "zone registered");
        self.names.insert(registration.id(), spec.name.clone());
        self.zones.push(ZoneRuntime { name: spec.name.clone(), channel, highlight, registration });
        Ok(())
    }

    fn unregister(&self, name: &str) -> Result<(), AppError> {
        let zone = self.zones.iter().find(|z| z.name == name).ok_or_else(|| AppError::UnknownZone(name.to_owned()))?;
        zone.registration.unregister();
        self.events.borrow_mut().push(format!("unregister:{name}"));
        Ok(())
    }

    fn drag(&self, spec: &DragSpec) -> Result<DragReport, AppError> {
        let channel = self.channel_or_default(spec.channel.as_deref());
        let mut controller = DragController::new(Rc::clone(&self.coordinator), &channel);
        let element = SimulatedElement::new(spec.element);
        if controller.press(Button::Primary, spec.press, element, spec.item.clone()).is_err() {
            return Err(AppError::NotStarted(spec.item.clone()));
        }
        tracing::info!(item = %spec.item, %channel, "drag started");

        for step in &spec.steps {
            match step {
                Step::Move(pointer) => {
                    controller.pointer_move(*pointer);
                }
                Step::Unregister(name) => self.unregister(name)?,
            }
        }

        let zone = controller
            .session()
            .and_then(dragdrop::DragSession::current_zone)
            .and_then(|id| self.names.get(&id).cloned());

        let (outcome, surface) = match spec.end {
            DragEnd::Drop => {
                let release = controller
                    .release(spec.item.clone())
                    .map_err(|err| AppError::Drag(err.error))?
                    .ok_or_else(|| AppError::NotStarted(spec.item.clone()))?;
                let outcome = if release.accepted { Outcome::Accepted } else { Outcome::Rejected };
                (outcome, release.surface)
            }
            DragEnd::Cancel => {
                let surface = controller.abort().ok_or_else(|| AppError::NotStarted(spec.item.clone()))?;
                (Outcome::Cancelled, surface)
            }
        };
        tracing::info!(item = %spec.item, ?outcome, zone = ?zone, "drag finished");
        tracing::debug!(
            positioning = ?surface.positioning(),
            placeholder = surface.has_placeholder(),
            classes = ?surface.classes(),
            "element restored"
        );

        let events = std::mem::take(&mut *self.events.borrow_mut());
        Ok(DragReport { item: spec.item.clone(), channel, outcome, zone, events, final_box: surface.bounding_box() })
    }

    fn zone_reports(&self) -> Vec<ZoneReport> {
        self.zones
            .iter()
            .map(|z| ZoneReport {
                name: z.name.clone(),
                channel: z.channel.clone(),
                enters: z.highlight.enter_count(),
                drops: z.highlight.drop_count(),
                over: z.highlight.is_over(),
                registered: !z.registration.is_unregistered(),
            })
            .collect()
    }
}

/// Run `scenario` with `config` on a fresh coordinator.
///
/// # Errors
///
/// See [`Runner::run`].
pub fn run(scenario: &Scenario, config: &Config) -> Result<Report, AppError> {
    Runner::new(config.clone()).run(scenario)
}
