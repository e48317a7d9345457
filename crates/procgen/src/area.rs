//! Theme-driven areas: a fixed template per theme, the generator it binds,
//! and the decoration pass that fills rooms with contents and descriptions.

mod decorate;
mod describe;
mod template;

use log::debug;

use crate::error::GenerationError;
use crate::mapgen::{DungeonMap, GeneratorConfig};
use crate::types::AreaTheme;

pub use describe::room_description;
pub use template::AreaTemplate;

/// Closed registry of area templates, one per [`AreaTheme`].
#[derive(Clone, Debug)]
pub struct AreaGenerator {
    templates: [AreaTemplate; AreaTheme::ALL.len()],
}

impl Default for AreaGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl AreaGenerator {
    pub fn new() -> Self {
        Self { templates: AreaTheme::ALL.map(AreaTemplate::for_theme) }
    }

    pub fn template(&self, theme: AreaTheme) -> &AreaTemplate {
        &self.templates[theme.index()]
    }

    pub fn templates(&self) -> &[AreaTemplate] {
        &self.templates
    }

    /// Runs the generator bound to `theme` and decorates the result.
    pub fn generate_area(
        &self,
        theme: AreaTheme,
        width: usize,
        height: usize,
        seed: u64,
    ) -> Result<DungeonMap, GenerationError> {
        let template = self.template(theme);
        self.generate_area_with(theme, template.generator(), width, height, seed)
    }

    /// Like [`AreaGenerator::generate_area`] with an explicit generator
    /// configuration in place of the theme's own.
    pub fn generate_area_with(
        &self,
        theme: AreaTheme,
        config: &GeneratorConfig,
        width: usize,
        height: usize,
        seed: u64,
    ) -> Result<DungeonMap, GenerationError> {
        let template = self.template(theme);
        let mut map = config.generate(theme, width, height, seed)?;
        decorate::populate_rooms(&mut map, template);
        debug!(
            "decorated {} area with {} rooms via {} (seed {seed})",
            theme,
            map.rooms().len(),
            config.algorithm()
        );
        Ok(map)
    }
}
