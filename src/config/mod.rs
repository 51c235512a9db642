//! Configuration module.
//!
//! [`GridConfig`] is the on-disk shape (every field optional); the loader
//! layers defaults, the config file, environment variables and CLI flags,
//! then [`GridOptions::from_config`] validates the result with the same
//! rules the [`GridView`] setters enforce.

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, resolve, CliOverrides, ConfigError,
    ResolvedConfig,
};

use crate::animation::DEFAULT_SELECT_SCALE;
use crate::container::GridView;
use crate::layout::DEFAULT_MODULE_CELL_SIZE;
use crate::model::{Gravity, GridError, Orientation, Size};
use crate::source::ItemProvider;
use crate::state::{ScrollAlignmentPolicy, DEFAULT_FOCUS_FRAME_COMPENSATION};
use crate::viewport::ViewHost;
use serde::Deserialize;
use std::path::PathBuf;

/// TOML configuration file structure.
///
/// All fields are optional; unset fields fall back to the built-in
/// defaults. Corresponds to `~/.config/tvgrid/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GridConfig {
    /// Scroll axis.
    #[serde(default)]
    pub orientation: Option<Orientation>,

    /// Row count for horizontal grids, column count for vertical ones.
    #[serde(default)]
    pub lanes: Option<usize>,

    /// How the viewport follows the selection.
    #[serde(default)]
    pub focus_scroll_strategy: Option<ScrollAlignmentPolicy>,

    /// `|`-separated gravity flags, e.g. `"center-vertical"`.
    #[serde(default)]
    pub gravity: Option<String>,

    /// Scale of the focused item, at least 1.0.
    #[serde(default)]
    pub selected_scale: Option<f32>,

    /// Whether selection changes scroll the grid.
    #[serde(default)]
    pub scroll_enabled: Option<bool>,

    /// Swallow directional keys without searching for a target.
    #[serde(default)]
    pub focus_search_disabled: Option<bool>,

    /// Let focus leave through the leading edge.
    #[serde(default)]
    pub focus_out_front: Option<bool>,

    /// Let focus leave through the trailing edge.
    #[serde(default)]
    pub focus_out_end: Option<bool>,

    /// Base cell size of module layouts.
    #[serde(default)]
    pub module_cell_size: Option<Size>,

    /// Focus-frame margin used by the compensated item-visible policy.
    #[serde(default)]
    pub focus_frame_compensation: Option<i32>,

    /// Path to the tracing output file.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

/// Validated grid options, ready to apply to a [`GridView`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridOptions {
    /// Scroll axis.
    pub orientation: Orientation,
    /// Lane count, at least 1.
    pub lanes: usize,
    /// Selection-following policy.
    pub focus_scroll_strategy: ScrollAlignmentPolicy,
    /// Secondary-axis gravity.
    pub gravity: Gravity,
    /// Focused item scale.
    pub selected_scale: f32,
    /// Scrolling enabled.
    pub scroll_enabled: bool,
    /// Focus search disabled.
    pub focus_search_disabled: bool,
    /// Focus may leave through the leading edge.
    pub focus_out_front: bool,
    /// Focus may leave through the trailing edge.
    pub focus_out_end: bool,
    /// Module cell size.
    pub module_cell_size: Size,
    /// Focus-frame compensation margin.
    pub focus_frame_compensation: i32,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            lanes: 2,
            focus_scroll_strategy: ScrollAlignmentPolicy::Aligned,
            gravity: Gravity::default(),
            selected_scale: DEFAULT_SELECT_SCALE,
            scroll_enabled: true,
            focus_search_disabled: false,
            focus_out_front: false,
            focus_out_end: false,
            module_cell_size: DEFAULT_MODULE_CELL_SIZE,
            focus_frame_compensation: DEFAULT_FOCUS_FRAME_COMPENSATION,
        }
    }
}

impl GridOptions {
    /// Merge `config` over the defaults and validate.
    ///
    /// # Errors
    /// `InvalidConfiguration` for zero lanes, a scale below 1.0, an empty
    /// module cell or unknown gravity flags.
    pub fn from_config(config: &GridConfig) -> Result<Self, GridError> {
        let defaults = Self::default();
        let options = Self {
            orientation: config.orientation.unwrap_or(defaults.orientation),
            lanes: config.lanes.unwrap_or(defaults.lanes),
            focus_scroll_strategy: config
                .focus_scroll_strategy
                .unwrap_or(defaults.focus_scroll_strategy),
            gravity: match &config.gravity {
                Some(flags) => flags.parse()?,
                None => defaults.gravity,
            },
            selected_scale: config.selected_scale.unwrap_or(defaults.selected_scale),
            scroll_enabled: config.scroll_enabled.unwrap_or(defaults.scroll_enabled),
            focus_search_disabled: config
                .focus_search_disabled
                .unwrap_or(defaults.focus_search_disabled),
            focus_out_front: config.focus_out_front.unwrap_or(defaults.focus_out_front),
            focus_out_end: config.focus_out_end.unwrap_or(defaults.focus_out_end),
            module_cell_size: config.module_cell_size.unwrap_or(defaults.module_cell_size),
            focus_frame_compensation: config
                .focus_frame_compensation
                .unwrap_or(defaults.focus_frame_compensation),
        };
        options.validate()?;
        Ok(options)
    }

    fn validate(&self) -> Result<(), GridError> {
        if self.lanes == 0 {
            return Err(GridError::invalid("lanes", "must be at least 1"));
        }
        if !self.selected_scale.is_finite() || self.selected_scale < 1.0 {
            return Err(GridError::invalid(
                "selected_scale",
                format!("{} is below 1.0", self.selected_scale),
            ));
        }
        if self.module_cell_size.is_empty() {
            return Err(GridError::invalid(
                "module_cell_size",
                "width and height must be positive",
            ));
        }
        Ok(())
    }

    /// Push every option into `grid` through its setters.
    ///
    /// # Errors
    /// Whatever the first rejecting setter returns.
    pub fn apply<P: ItemProvider>(
        &self,
        grid: &mut GridView<P>,
        host: &mut dyn ViewHost,
    ) -> Result<(), GridError> {
        grid.set_orientation(host, self.orientation)?;
        grid.set_lanes(host, self.lanes)?;
        grid.set_gravity(host, self.gravity)?;
        grid.set_selected_scale(host, self.selected_scale)?;
        grid.set_focus_scroll_strategy(self.focus_scroll_strategy);
        grid.set_focus_frame_compensation(self.focus_frame_compensation);
        grid.set_scroll_enabled(host, self.scroll_enabled);
        grid.set_focus_search_disabled(self.focus_search_disabled);
        grid.set_focus_out_allowed(self.focus_out_front, self.focus_out_end);
        Ok(())
    }
}
