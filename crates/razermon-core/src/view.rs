//! View state for the charge-history screen.
//!
//! The screen moves through an explicit state machine:
//!
//! ```text
//! Resolving --SelectionResolved(None)/SelectionFailed--> Unselected
//!     |
//!     +--SelectionResolved(Some(id))--> Selected(ProductView)
//!                                         status / history / stats slots:
//!                                         Loading -> Ready(T) | Failed
//! ```
//!
//! Every selection gets a fresh generation number. Telemetry events carry the
//! generation they were fetched for, and events from any other generation are
//! dropped, so a slow answer for a previous product can never overwrite the
//! current one.

use tracing::{debug, info, warn};

use razermon_types::{BatteryStats, ChartPoint, DeviceStatus, ProductId};

use crate::messages::{Command, ViewEvent};

/// Load state of one host answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<T> {
    Loading,
    Ready(T),
    Failed,
}

impl<T> Slot<T> {
    /// The loaded value, if any.
    pub fn ready(&self) -> Option<&T> {
        match self {
            Slot::Ready(value) => Some(value),
            Slot::Loading | Slot::Failed => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Slot::Loading)
    }

    /// Store a host answer.
    ///
    /// A failure only marks the slot failed when nothing was loaded yet; on a
    /// refresh the previous value stays on screen.
    fn settle(&mut self, result: Result<T, String>) {
        match result {
            Ok(value) => *self = Slot::Ready(value),
            Err(_) if matches!(self, Slot::Ready(_)) => {}
            Err(_) => *self = Slot::Failed,
        }
    }
}

/// Telemetry held for the selected product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductView {
    pub product: ProductId,
    pub generation: u64,
    /// `Ready(None)` when the host has no device for the product.
    pub status: Slot<Option<DeviceStatus>>,
    pub history: Slot<Vec<ChartPoint>>,
    pub stats: Slot<BatteryStats>,
    /// Answers still expected for `generation`.
    pending: u8,
}

impl ProductView {
    fn new(product: ProductId, generation: u64) -> Self {
        Self {
            product,
            generation,
            status: Slot::Loading,
            history: Slot::Loading,
            stats: Slot::Loading,
            pending: 3,
        }
    }

    fn answered(&mut self) {
        self.pending = self.pending.saturating_sub(1);
    }

    /// The device status, once the host has reported one.
    pub fn device_status(&self) -> Option<&DeviceStatus> {
        self.status.ready().and_then(Option::as_ref)
    }

    /// Device status line, once the status is loaded.
    pub fn status_line(&self) -> Option<String> {
        self.device_status().map(ToString::to_string)
    }

    /// The stats `remaining` value, once stats are loaded.
    pub fn remaining_line(&self) -> Option<String> {
        self.stats
            .ready()
            .and_then(|stats| stats.remaining.as_ref())
            .map(ToString::to_string)
    }

    /// Shaped chart points; empty until history is loaded.
    pub fn points(&self) -> &[ChartPoint] {
        self.history.ready().map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether any of the three answers for the current generation is still
    /// outstanding. Also true during a refresh that kept the old values.
    pub fn is_loading(&self) -> bool {
        self.pending > 0
    }
}

/// Which product the screen is showing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection {
    /// Waiting for the first `selected_product_id` answer.
    #[default]
    Resolving,
    /// The host has no product selected, or could not say.
    Unselected,
    Selected(ProductView),
}

/// What the screen should draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderState<'a> {
    /// Draw nothing: still resolving, or there is no history to chart.
    Nothing,
    /// No product is selected.
    Empty,
    /// A product is selected and its history has not arrived yet.
    Loading(&'a ProductView),
    /// History is loaded and non-empty.
    Loaded(&'a ProductView),
}

/// State machine driving the screen.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    selection: Selection,
    generation: u64,
}

impl ViewState {
    /// A screen that is waiting for the first selection.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The selected product's telemetry.
    pub fn product_view(&self) -> Option<&ProductView> {
        match &self.selection {
            Selection::Selected(view) => Some(view),
            Selection::Resolving | Selection::Unselected => None,
        }
    }

    /// Generation of the current selection.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether an answer is still expected.
    pub fn is_busy(&self) -> bool {
        match &self.selection {
            Selection::Resolving => true,
            Selection::Unselected => false,
            Selection::Selected(view) => view.is_loading(),
        }
    }

    pub fn render_state(&self) -> RenderState<'_> {
        match &self.selection {
            Selection::Resolving => RenderState::Nothing,
            Selection::Unselected => RenderState::Empty,
            Selection::Selected(view) => match &view.history {
                Slot::Loading => RenderState::Loading(view),
                Slot::Ready(points) if !points.is_empty() => RenderState::Loaded(view),
                Slot::Ready(_) | Slot::Failed => RenderState::Nothing,
            },
        }
    }

    /// Apply a worker event, returning the command it triggers, if any.
    pub fn apply(&mut self, event: ViewEvent) -> Option<Command> {
        match event {
            ViewEvent::SelectionResolved(Some(product)) => Some(self.select(product)),
            ViewEvent::SelectionResolved(None) => {
                info!("No product selected");
                self.generation += 1;
                self.selection = Selection::Unselected;
                None
            }
            ViewEvent::SelectionFailed(error) => {
                warn!(error = %error, "Could not resolve selected product");
                // A failed refresh keeps whatever is already on screen.
                if matches!(self.selection, Selection::Resolving) {
                    self.selection = Selection::Unselected;
                }
                None
            }
            ViewEvent::StatusLoaded { generation, result } => {
                if let Some(view) = self.current_view(generation) {
                    view.status.settle(result);
                    view.answered();
                }
                None
            }
            ViewEvent::HistoryLoaded { generation, result } => {
                if let Some(view) = self.current_view(generation) {
                    view.history.settle(result);
                    view.answered();
                }
                None
            }
            ViewEvent::StatsLoaded { generation, result } => {
                if let Some(view) = self.current_view(generation) {
                    view.stats.settle(result);
                    view.answered();
                }
                None
            }
        }
    }

    /// Start a new selection generation for `product`.
    ///
    /// Re-selecting the same product keeps its loaded values until the fresh
    /// answers replace them; a different product starts from scratch.
    fn select(&mut self, product: ProductId) -> Command {
        self.generation += 1;
        let generation = self.generation;

        match &mut self.selection {
            Selection::Selected(view) if view.product == product => {
                debug!(product_id = %product, generation, "Refreshing product");
                view.generation = generation;
                view.pending = 3;
            }
            _ => {
                info!(product_id = %product, generation, "Product selected");
                self.selection = Selection::Selected(ProductView::new(product, generation));
            }
        }

        Command::FetchTelemetry {
            product,
            generation,
        }
    }

    fn current_view(&mut self, generation: u64) -> Option<&mut ProductView> {
        match &mut self.selection {
            Selection::Selected(view) if view.generation == generation => Some(view),
            _ => {
                debug!(
                    generation,
                    current = self.generation,
                    "Dropping stale telemetry"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use razermon_types::{BatteryReading, CreatedAt, StatValue};

    use crate::shaping::shape_history;

    fn id(raw: u32) -> ProductId {
        ProductId::new(raw).unwrap()
    }

    fn points(levels: &[f64]) -> Vec<ChartPoint> {
        shape_history(levels.iter().enumerate().map(|(i, &percentage)| BatteryReading {
            product_id: 1,
            created_at: CreatedAt::Epoch(i as i64 * 60_000),
            percentage,
            charging: false,
        }))
    }

    fn status(name: &str) -> Option<DeviceStatus> {
        Some(DeviceStatus {
            name: name.to_string(),
            ..Default::default()
        })
    }

    fn stats(remaining: &str) -> BatteryStats {
        BatteryStats {
            status: Some(StatValue::Text("discharging".to_string())),
            remaining: Some(StatValue::Text(remaining.to_string())),
        }
    }

    /// Select `product` and return the generation of the fetch.
    fn selected(state: &mut ViewState, product: ProductId) -> u64 {
        match state.apply(ViewEvent::SelectionResolved(Some(product))) {
            Some(Command::FetchTelemetry { generation, .. }) => generation,
            other => panic!("expected fetch, got {:?}", other),
        }
    }

    #[test]
    fn test_initial_state_renders_nothing() {
        let state = ViewState::new();
        assert_eq!(state.selection(), &Selection::Resolving);
        assert_eq!(state.render_state(), RenderState::Nothing);
        assert!(state.is_busy());
    }

    #[test]
    fn test_no_selection_is_empty_state() {
        let mut state = ViewState::new();
        assert_eq!(state.apply(ViewEvent::SelectionResolved(None)), None);
        assert_eq!(state.render_state(), RenderState::Empty);
        assert!(!state.is_busy());
    }

    #[test]
    fn test_resolve_failure_leaves_selection_unset() {
        let mut state = ViewState::new();
        let cmd = state.apply(ViewEvent::SelectionFailed("host down".to_string()));
        assert_eq!(cmd, None);
        assert_eq!(state.selection(), &Selection::Unselected);
    }

    #[test]
    fn test_selection_issues_fetch() {
        let mut state = ViewState::new();
        let cmd = state.apply(ViewEvent::SelectionResolved(Some(id(122))));
        assert_eq!(
            cmd,
            Some(Command::FetchTelemetry {
                product: id(122),
                generation: 1
            })
        );
        assert!(matches!(state.render_state(), RenderState::Loading(_)));
    }

    #[test]
    fn test_full_load() {
        let mut state = ViewState::new();
        let generation = selected(&mut state, id(122));

        state.apply(ViewEvent::StatusLoaded {
            generation,
            result: Ok(status("Viper")),
        });
        state.apply(ViewEvent::HistoryLoaded {
            generation,
            result: Ok(points(&[80.0, 79.0])),
        });
        state.apply(ViewEvent::StatsLoaded {
            generation,
            result: Ok(stats("5h 20m")),
        });

        let RenderState::Loaded(view) = state.render_state() else {
            panic!("expected loaded state");
        };
        assert_eq!(view.status_line().as_deref(), Some("Viper"));
        assert_eq!(view.remaining_line().as_deref(), Some("5h 20m"));
        assert_eq!(view.points().len(), 2);
        assert!(!state.is_busy());
    }

    #[test]
    fn test_empty_history_renders_nothing() {
        let mut state = ViewState::new();
        let generation = selected(&mut state, id(122));
        state.apply(ViewEvent::HistoryLoaded {
            generation,
            result: Ok(Vec::new()),
        });
        assert_eq!(state.render_state(), RenderState::Nothing);
    }

    #[test]
    fn test_failed_history_renders_nothing() {
        let mut state = ViewState::new();
        let generation = selected(&mut state, id(122));
        state.apply(ViewEvent::HistoryLoaded {
            generation,
            result: Err("db locked".to_string()),
        });
        assert_eq!(state.render_state(), RenderState::Nothing);
        assert_eq!(state.product_view().unwrap().history, Slot::Failed);
    }

    #[test]
    fn test_status_failure_does_not_block_chart() {
        let mut state = ViewState::new();
        let generation = selected(&mut state, id(122));
        state.apply(ViewEvent::StatusLoaded {
            generation,
            result: Err("device asleep".to_string()),
        });
        state.apply(ViewEvent::HistoryLoaded {
            generation,
            result: Ok(points(&[50.0])),
        });

        let RenderState::Loaded(view) = state.render_state() else {
            panic!("expected loaded state");
        };
        assert_eq!(view.status_line(), None);
        assert_eq!(view.status, Slot::Failed);
    }

    #[test]
    fn test_missing_device_leaves_status_blank_without_failing() {
        let mut state = ViewState::new();
        let generation = selected(&mut state, id(122));
        state.apply(ViewEvent::StatusLoaded {
            generation,
            result: Ok(None),
        });

        let view = state.product_view().unwrap();
        assert_eq!(view.status, Slot::Ready(None));
        assert_eq!(view.device_status(), None);
        assert_eq!(view.status_line(), None);
    }

    #[test]
    fn test_stats_without_remaining_renders_blank() {
        let mut state = ViewState::new();
        let generation = selected(&mut state, id(122));
        state.apply(ViewEvent::StatsLoaded {
            generation,
            result: Ok(BatteryStats::default()),
        });
        assert_eq!(state.product_view().unwrap().remaining_line(), None);
    }

    #[test]
    fn test_stale_history_is_dropped_after_product_change() {
        let mut state = ViewState::new();
        let first = selected(&mut state, id(1));
        let second = selected(&mut state, id(2));
        assert!(second > first);

        // The slow answer for product 1 arrives after the switch.
        state.apply(ViewEvent::HistoryLoaded {
            generation: first,
            result: Ok(points(&[10.0, 20.0])),
        });
        let view = state.product_view().unwrap();
        assert_eq!(view.product, id(2));
        assert!(view.history.is_loading());

        state.apply(ViewEvent::HistoryLoaded {
            generation: second,
            result: Ok(points(&[90.0])),
        });
        let RenderState::Loaded(view) = state.render_state() else {
            panic!("expected loaded state");
        };
        assert_eq!(view.product, id(2));
        assert_eq!(view.points()[0].percentage, 90.0);
    }

    #[test]
    fn test_product_change_replaces_wholesale() {
        let mut state = ViewState::new();
        let first = selected(&mut state, id(1));
        state.apply(ViewEvent::StatusLoaded {
            generation: first,
            result: Ok(status("Viper")),
        });

        selected(&mut state, id(2));
        let view = state.product_view().unwrap();
        assert_eq!(view.status, Slot::Loading);
        assert_eq!(view.status_line(), None);
    }

    #[test]
    fn test_refresh_same_product_keeps_values_until_replaced() {
        let mut state = ViewState::new();
        let first = selected(&mut state, id(1));
        state.apply(ViewEvent::HistoryLoaded {
            generation: first,
            result: Ok(points(&[70.0])),
        });

        let second = selected(&mut state, id(1));
        assert!(matches!(state.render_state(), RenderState::Loaded(_)));

        // A failed refresh keeps the previous chart.
        state.apply(ViewEvent::HistoryLoaded {
            generation: second,
            result: Err("timeout".to_string()),
        });
        assert_eq!(state.product_view().unwrap().points()[0].percentage, 70.0);

        // Answers for the first generation are stale now.
        state.apply(ViewEvent::HistoryLoaded {
            generation: first,
            result: Ok(points(&[10.0])),
        });
        assert_eq!(state.product_view().unwrap().points()[0].percentage, 70.0);
    }

    #[test]
    fn test_refresh_is_busy_until_all_answers_arrive() {
        let mut state = ViewState::new();
        let first = selected(&mut state, id(1));
        state.apply(ViewEvent::StatusLoaded {
            generation: first,
            result: Ok(status("Viper")),
        });
        state.apply(ViewEvent::HistoryLoaded {
            generation: first,
            result: Ok(points(&[70.0])),
        });
        state.apply(ViewEvent::StatsLoaded {
            generation: first,
            result: Ok(stats("1h")),
        });
        assert!(!state.is_busy());

        let second = selected(&mut state, id(1));
        assert!(state.is_busy());

        // A stale answer does not count towards the refresh.
        state.apply(ViewEvent::StatusLoaded {
            generation: first,
            result: Ok(status("Viper")),
        });
        state.apply(ViewEvent::StatusLoaded {
            generation: second,
            result: Ok(status("Viper")),
        });
        state.apply(ViewEvent::HistoryLoaded {
            generation: second,
            result: Ok(points(&[69.0])),
        });
        assert!(state.is_busy());

        state.apply(ViewEvent::StatsLoaded {
            generation: second,
            result: Err("timeout".to_string()),
        });
        assert!(!state.is_busy());
        assert_eq!(state.product_view().unwrap().remaining_line().as_deref(), Some("1h"));
    }

    #[test]
    fn test_deselect_drops_late_answers() {
        let mut state = ViewState::new();
        let generation = selected(&mut state, id(1));
        state.apply(ViewEvent::SelectionResolved(None));
        state.apply(ViewEvent::HistoryLoaded {
            generation,
            result: Ok(points(&[10.0])),
        });
        assert_eq!(state.render_state(), RenderState::Empty);
    }

    #[test]
    fn test_failed_refresh_keeps_selection() {
        let mut state = ViewState::new();
        selected(&mut state, id(1));
        state.apply(ViewEvent::SelectionFailed("host down".to_string()));
        assert_eq!(state.product_view().unwrap().product, id(1));
    }
}
