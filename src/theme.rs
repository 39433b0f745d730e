//! Named color themes.
//!
//! A theme is plain data: a CSS property bag for each visual state of each
//! element class, a two-color palette, and the alternating row colors. The
//! tab, toolbar and popover bags are derived from those values.

use std::collections::BTreeMap;
use std::fmt::Write;

use serde::Serialize;

use crate::classes::{ICON_FONT_FAMILY, TAB_WIDTH, TOOLBAR_HEIGHT};
use crate::error::{GridbookError, Result};

/// Name of the built-in theme.
pub const DEFAULT_THEME: &str = "gridbook";

const FONT_FAMILY: &str = "'Lucida Grande', Verdana, sans-serif";

const Z_ACTIVE: u8 = 3;
const Z_SELECTED: u8 = 2;
const Z_NORMAL: u8 = 1;
const Z_INACTIVE: u8 = 1;

/// An ordered set of CSS declarations.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct StyleBag(BTreeMap<String, String>);

impl StyleBag {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, property: &str, value: impl ToString) -> Self {
        self.set(property, value);
        self
    }

    pub fn set(&mut self, property: &str, value: impl ToString) {
        self.0.insert(property.to_string(), value.to_string());
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.get(property).map(String::as_str)
    }

    /// Overlay `other` on top of this bag.
    pub fn merge(&mut self, other: &StyleBag) {
        for (k, v) in &other.0 {
            self.0.insert(k.clone(), v.clone());
        }
    }

    #[must_use]
    pub fn merged(mut self, other: &StyleBag) -> Self {
        self.merge(other);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Inline `style` attribute text.
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        for (k, v) in &self.0 {
            if !css.is_empty() {
                css.push(' ');
            }
            let _ = write!(css, "{k}: {v};");
        }
        css
    }
}

/// Interaction state an element is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualState {
    Normal,
    Active,
    Selected,
    Inactive,
}

/// Element classes a theme styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementClass {
    Header,
    Cell,
    Button,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
}

/// Header, cell and button bags for one visual state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateStyles {
    pub header: StyleBag,
    pub cell: StyleBag,
    pub button: StyleBag,
}

impl StateStyles {
    fn get(&self, element: ElementClass) -> &StyleBag {
        match element {
            ElementClass::Header => &self.header,
            ElementClass::Cell => &self.cell,
            ElementClass::Button => &self.button,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub name: String,
    pub palette: Palette,
    pub background: String,
    pub row_color: String,
    pub alt_row_color: String,
    pub normal: StateStyles,
    pub active: StateStyles,
    pub selected: StateStyles,
    pub inactive: StateStyles,
}

fn bag(pairs: &[(&str, &str)]) -> StyleBag {
    let mut bag = StyleBag::new();
    for (k, v) in pairs {
        bag.set(k, v);
    }
    bag
}

impl Default for Theme {
    fn default() -> Self {
        let normal = StateStyles {
            header: bag(&[
                ("background-color", "#F3F3F3"),
                ("border-color", "#CCC"),
                ("border-bottom-color", "#F3F3F3"),
                ("color", "#494949"),
                ("font-weight", "normal"),
                ("opacity", "1"),
            ])
            .with("z-index", Z_NORMAL),
            cell: bag(&[
                ("background-color", "transparent"),
                ("border-color", "#DADADA"),
                ("color", "#333"),
                ("font-weight", "normal"),
                ("opacity", "1"),
            ])
            .with("z-index", Z_NORMAL),
            button: bag(&[("background-color", "transparent"), ("color", "#494949")]),
        };
        let active = StateStyles {
            header: bag(&[
                ("background-color", "#DDD"),
                ("border-color", "#DADADA"),
                ("color", "#494949"),
                ("font-weight", "bold"),
            ])
            .with("z-index", Z_ACTIVE),
            cell: bag(&[
                ("background-color", "#EEF4FB"),
                ("border-color", "#EEF4FB"),
                ("color", "#333"),
                ("font-weight", "normal"),
            ])
            .with("z-index", Z_ACTIVE),
            button: bag(&[("background-color", "#2D73CE"), ("color", "#EEF4FB")]),
        };
        let selected = StateStyles {
            header: bag(&[
                ("background-color", "#333"),
                ("border-color", "purple"),
                ("color", "#fff"),
            ])
            .with("z-index", Z_SELECTED),
            cell: bag(&[
                ("background-color", "lightblue"),
                ("border-color", "royalblue"),
                ("color", "#333"),
            ])
            .with("z-index", Z_SELECTED),
            button: bag(&[("background-color", "transparent"), ("color", "#333")]),
        };
        let inactive = StateStyles {
            header: bag(&[
                ("background-color", "#DDD"),
                ("border-color", "#BBB"),
                ("color", "#BBB"),
            ])
            .with("z-index", Z_INACTIVE),
            cell: bag(&[
                ("background-color", "#DDD"),
                ("border-color", "#BBB"),
                ("color", "#BBB"),
            ])
            .with("z-index", Z_INACTIVE),
            button: bag(&[("background-color", "transparent"), ("color", "#999")]),
        };

        Self {
            name: DEFAULT_THEME.to_string(),
            palette: Palette {
                primary: "#2D73CE".to_string(),
                secondary: "#8CB3E6".to_string(),
            },
            background: "#FFF".to_string(),
            row_color: "#FFF".to_string(),
            alt_row_color: "#FCFCFC".to_string(),
            normal,
            active,
            selected,
            inactive,
        }
    }
}

impl Theme {
    /// Look up a theme by name. Only [`DEFAULT_THEME`] exists.
    pub fn named(name: &str) -> Result<Self> {
        if name == DEFAULT_THEME {
            Ok(Self::default())
        } else {
            Err(GridbookError::Config(format!("unknown theme \"{name}\"")))
        }
    }

    pub fn style(&self, state: VisualState, element: ElementClass) -> &StyleBag {
        let styles = match state {
            VisualState::Normal => &self.normal,
            VisualState::Active => &self.active,
            VisualState::Selected => &self.selected,
            VisualState::Inactive => &self.inactive,
        };
        styles.get(element)
    }

    fn prop<'a>(&'a self, state: VisualState, element: ElementClass, property: &str) -> &'a str {
        self.style(state, element).get(property).unwrap_or("inherit")
    }

    /// Background of row `index` (1-based) when alternating colors are on.
    pub fn row_background(&self, index: usize, alternate: bool) -> &str {
        if alternate && index % 2 == 0 {
            &self.alt_row_color
        } else {
            &self.row_color
        }
    }

    /// Detail panels use the active cell background.
    pub fn slice_background(&self) -> &str {
        self.prop(VisualState::Active, ElementClass::Cell, "background-color")
    }

    pub fn tabset(&self) -> StyleBag {
        StyleBag::new()
            .with("background-color", "transparent")
            .with("font-family", FONT_FAMILY)
            .with("height", format!("{TOOLBAR_HEIGHT}px"))
            .with("position", "relative")
            .with("width", "100%")
    }

    /// A tab that is neither selected nor hovered.
    pub fn tab(&self) -> StyleBag {
        StyleBag::new()
            .with(
                "background-color",
                self.prop(VisualState::Normal, ElementClass::Cell, "border-color"),
            )
            .with("border", "none")
            .with("border-top-left-radius", "4px")
            .with("border-top-right-radius", "4px")
            .with(
                "color",
                self.prop(VisualState::Normal, ElementClass::Button, "color"),
            )
            .with("cursor", "pointer")
            .with("display", "inline-block")
            .with("float", "left")
            .with("font-weight", "normal")
            .with("height", format!("{}px", TOOLBAR_HEIGHT - 7.0))
            .with("margin", "4px 3px 0 0")
            .with("position", "relative")
            .with("text-align", "center")
            .with("white-space", "nowrap")
            .with("width", format!("{TAB_WIDTH}px"))
            .with("z-index", 9)
    }

    /// The label inside a tab.
    pub fn tab_label(&self) -> StyleBag {
        StyleBag::new()
            .with("display", "inline-block")
            .with("overflow", "hidden")
            .with("position", "relative")
            .with("text-overflow", "ellipsis")
            .with("top", "30%")
            .with("vertical-align", "middle")
            .with("width", format!("{}px", (TAB_WIDTH / 1.62).round()))
    }

    pub fn tab_selected(&self) -> StyleBag {
        let border = format!(
            "1px solid {}",
            self.prop(VisualState::Normal, ElementClass::Header, "border-color")
        );
        self.tab()
            .with(
                "background-color",
                self.prop(VisualState::Normal, ElementClass::Header, "background-color"),
            )
            .with("border-left", &border)
            .with("border-right", &border)
            .with("border-top", &border)
            .with("font-weight", "bold")
            .with("height", format!("{TOOLBAR_HEIGHT}px"))
            .with("margin", "0 3px 0 0")
    }

    /// Hovered, unselected tab.
    pub fn tab_hover(&self) -> StyleBag {
        self.tab().with(
            "background-color",
            self.prop(VisualState::Active, ElementClass::Cell, "border-color"),
        )
    }

    pub fn toolbar(&self, border_width: f64) -> StyleBag {
        StyleBag::new()
            .with(
                "background-color",
                self.prop(VisualState::Normal, ElementClass::Header, "background-color"),
            )
            .with("border-style", "solid")
            .with("border-bottom", "none")
            .with(
                "border-color",
                self.prop(VisualState::Normal, ElementClass::Header, "border-color"),
            )
            .with("border-width", format!("{border_width}px"))
            .with("box-sizing", "border-box")
            .with("color", "#494949")
            .with("font-family", FONT_FAMILY)
            .with("font-size", "20px")
            .with("height", format!("{TOOLBAR_HEIGHT}px"))
            .with("line-height", format!("{TOOLBAR_HEIGHT}px"))
            .with("position", "relative")
            .with("text-align", "right")
            .with("z-index", 7)
    }

    pub fn toolbar_button(&self) -> StyleBag {
        StyleBag::new()
            .with("cursor", "pointer")
            .with("font-family", ICON_FONT_FAMILY)
            .with("font-style", "normal")
            .with("line-height", format!("{TOOLBAR_HEIGHT}px"))
            .with("margin", "0")
            .with("padding", "7px 6px")
            .with("position", "relative")
            .with("text-decoration", "none")
            .merged(&self.normal.button)
    }

    pub fn popover(&self) -> StyleBag {
        StyleBag::new()
            .with("background-color", &self.row_color)
            .with("border", "1px solid")
            .with(
                "border-color",
                self.prop(VisualState::Normal, ElementClass::Header, "border-color"),
            )
            .with("border-top", "0px")
            .with("box-shadow", "0px 0px 15px 0px rgba(0,0,0,0.5)")
            .with("font-size", "12px")
            .with("line-height", "1em")
            .with("padding", "7px 5px")
            .with("position", "absolute")
            .with("top", format!("{TOOLBAR_HEIGHT}px"))
    }

    /// Links inside a popover.
    pub fn popover_link(&self) -> StyleBag {
        StyleBag::new()
            .with(
                "color",
                self.prop(VisualState::Normal, ElementClass::Cell, "color"),
            )
            .with("font-weight", "bold")
            .with("text-decoration", "none")
    }
}
