//! Parser configuration.

use crate::classify::LayoutMarkers;

/// Configuration for the parser.
///
/// Use the builder pattern to create a configuration:
///
/// ```
/// use tonarchiv_parser::config::ParserConfig;
///
/// let config = ParserConfig::builder()
///     .box_marker("Boxes")
///     .titlecase_upper_names(true)
///     .build();
///
/// assert_eq!(config.markers.box_marker, "Boxes");
/// assert_eq!(config.markers.single_marker, "EinzelCDs");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParserConfig {
    /// Folder names that select the single-disc and box-set layouts.
    pub markers: LayoutMarkers,

    /// Title-case composer names written entirely in upper case.
    /// Default: false
    pub titlecase_upper_names: bool,
}

impl ParserConfig {
    /// Create a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration builder.
    pub fn builder() -> ParserConfigBuilder {
        ParserConfigBuilder::default()
    }
}

/// Builder for `ParserConfig`.
#[derive(Debug, Clone, Default)]
pub struct ParserConfigBuilder {
    box_marker: Option<String>,
    single_marker: Option<String>,
    titlecase_upper_names: Option<bool>,
}

impl ParserConfigBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the folder name marking box sets.
    pub fn box_marker(mut self, name: impl Into<String>) -> Self {
        self.box_marker = Some(name.into());
        self
    }

    /// Set the folder name marking single discs.
    pub fn single_marker(mut self, name: impl Into<String>) -> Self {
        self.single_marker = Some(name.into());
        self
    }

    /// Title-case composer names written entirely in upper case.
    pub fn titlecase_upper_names(mut self, enabled: bool) -> Self {
        self.titlecase_upper_names = Some(enabled);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ParserConfig {
        let defaults = ParserConfig::default();
        ParserConfig {
            markers: LayoutMarkers {
                box_marker: self.box_marker.unwrap_or(defaults.markers.box_marker),
                single_marker: self
                    .single_marker
                    .unwrap_or(defaults.markers.single_marker),
            },
            titlecase_upper_names: self
                .titlecase_upper_names
                .unwrap_or(defaults.titlecase_upper_names),
        }
    }
}
