//! Toolbar actions and their icon-font glyphs.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::GridbookError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarAction {
    Undo,
    Redo,
    Add,
    Show,
    Delete,
    Theme,
    Import,
    Export,
    Lab,
    Search,
    Layers,
    Refresh,
    Settings,
    Save,
    Menu,
}

impl ToolbarAction {
    pub const DEFAULT_ORDER: [ToolbarAction; 15] = [
        Self::Undo,
        Self::Redo,
        Self::Add,
        Self::Show,
        Self::Delete,
        Self::Theme,
        Self::Import,
        Self::Export,
        Self::Lab,
        Self::Search,
        Self::Layers,
        Self::Refresh,
        Self::Settings,
        Self::Save,
        Self::Menu,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::Add => "add",
            Self::Show => "show",
            Self::Delete => "delete",
            Self::Theme => "theme",
            Self::Import => "import",
            Self::Export => "export",
            Self::Lab => "lab",
            Self::Search => "search",
            Self::Layers => "layers",
            Self::Refresh => "refresh",
            Self::Settings => "settings",
            Self::Save => "save",
            Self::Menu => "menu",
        }
    }

    /// Tooltip shown on the button.
    pub fn title(self) -> &'static str {
        match self {
            Self::Undo => "Undo",
            Self::Redo => "Redo",
            Self::Add => "Add Columns/Rows",
            Self::Show => "Hide/Show Columns",
            Self::Delete => "Delete",
            Self::Theme => "Look & Feel",
            Self::Import => "Import Data",
            Self::Export => "Export Data to...",
            Self::Lab => "Custom Function",
            Self::Search => "Search",
            Self::Layers => "Show Layers",
            Self::Refresh => "Refresh Grid",
            Self::Settings => "Open Settings",
            Self::Save => "Save",
            Self::Menu => "Open Menu",
        }
    }

    /// Private-use code point of the button's icon.
    pub fn glyph(self) -> char {
        match self {
            Self::Theme => '\u{e601}',
            Self::Layers => '\u{e604}',
            Self::Import => '\u{e60a}',
            Self::Export => '\u{e60b}',
            Self::Save => '\u{e60c}',
            Self::Undo => '\u{e60d}',
            Self::Redo => '\u{e60e}',
            Self::Search => '\u{e60f}',
            Self::Settings => '\u{e612}',
            Self::Lab => '\u{e613}',
            Self::Delete => '\u{e614}',
            Self::Menu => '\u{e615}',
            Self::Show => '\u{e61a}',
            Self::Add => '\u{e622}',
            Self::Refresh => '\u{e623}',
        }
    }

    /// Actions that only log when triggered.
    pub fn is_placeholder(self) -> bool {
        matches!(
            self,
            Self::Redo
                | Self::Delete
                | Self::Theme
                | Self::Import
                | Self::Export
                | Self::Lab
                | Self::Search
                | Self::Layers
        )
    }
}

impl fmt::Display for ToolbarAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ToolbarAction {
    type Err = GridbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::DEFAULT_ORDER
            .into_iter()
            .find(|a| a.id() == s)
            .ok_or_else(|| GridbookError::Config(format!("unknown toolbar action \"{s}\"")))
    }
}

/// Resolve configured ids in order, skipping ones that are not recognized.
pub fn parse_toolbar(ids: &[String]) -> Vec<ToolbarAction> {
    ids.iter()
        .filter_map(|id| match id.parse() {
            Ok(action) => Some(action),
            Err(err) => {
                debug!("skipping toolbar entry: {err}");
                None
            }
        })
        .collect()
}
