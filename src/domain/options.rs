//! Recognized menu item option keys and their value shapes

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// How the value of an option is entered and stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueShape {
    /// Single string
    Scalar,
    /// JSON object, array or literal
    Structured,
    /// Boolean, coerced from a truthy string
    Flag,
}

impl ValueShape {
    /// Suffix appended to the key in editing labels.
    pub fn suffix(self) -> &'static str {
        match self {
            ValueShape::Scalar => "",
            ValueShape::Structured => "*",
            ValueShape::Flag => "+",
        }
    }
}

/// Closed set of option keys a menu item accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKey {
    Route,
    RouteParameters,
    Uri,
    Label,
    Attributes,
    LinkAttributes,
    ChildrenAttributes,
    LabelAttributes,
    Extras,
    Current,
    Display,
    DisplayChildren,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized key: {0}")]
pub struct UnknownOptionKey(pub String);

impl OptionKey {
    /// All keys in editing-choice order.
    pub const ALL: [OptionKey; 12] = [
        OptionKey::Route,
        OptionKey::RouteParameters,
        OptionKey::Uri,
        OptionKey::Label,
        OptionKey::Attributes,
        OptionKey::LinkAttributes,
        OptionKey::ChildrenAttributes,
        OptionKey::LabelAttributes,
        OptionKey::Extras,
        OptionKey::Current,
        OptionKey::Display,
        OptionKey::DisplayChildren,
    ];

    /// Bare key as stored in the option mapping.
    pub fn name(self) -> &'static str {
        match self {
            OptionKey::Route => "route",
            OptionKey::RouteParameters => "routeParameters",
            OptionKey::Uri => "uri",
            OptionKey::Label => "label",
            OptionKey::Attributes => "attributes",
            OptionKey::LinkAttributes => "linkAttributes",
            OptionKey::ChildrenAttributes => "childrenAttributes",
            OptionKey::LabelAttributes => "labelAttributes",
            OptionKey::Extras => "extras",
            OptionKey::Current => "current",
            OptionKey::Display => "display",
            OptionKey::DisplayChildren => "displayChildren",
        }
    }

    pub fn shape(self) -> ValueShape {
        match self {
            OptionKey::RouteParameters
            | OptionKey::Attributes
            | OptionKey::LinkAttributes
            | OptionKey::ChildrenAttributes
            | OptionKey::LabelAttributes
            | OptionKey::Extras => ValueShape::Structured,
            OptionKey::Display | OptionKey::DisplayChildren => ValueShape::Flag,
            OptionKey::Route | OptionKey::Uri | OptionKey::Label | OptionKey::Current => {
                ValueShape::Scalar
            }
        }
    }

    /// Editing label: the bare name followed by the shape suffix.
    pub fn label(self) -> String {
        format!("{}{}", self.name(), self.shape().suffix())
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OptionKey {
    type Err = UnknownOptionKey;

    /// Accepts the bare name or the suffixed label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        OptionKey::ALL
            .into_iter()
            .find(|key| key.name() == trimmed || key.label() == trimmed)
            .ok_or_else(|| UnknownOptionKey(trimmed.to_string()))
    }
}
