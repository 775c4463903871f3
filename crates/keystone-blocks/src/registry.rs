//! Behavior registry: maps [`MaterialId`] values to their [`BlockBehavior`].
//!
//! The registry is assembled once at startup through a [`RegistryBuilder`]
//! and frozen into a [`BehaviorRegistry`], which is read-only and can be
//! shared between region threads. The empty cell is always id 0.

use keystone_config::PlacementConfig;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::behavior::{BlockBehavior, NoopBehavior};
use crate::kinds::SimpleBlock;
use crate::material::{ItemStack, MaterialId};
use crate::sound::{Sound, SoundError, SoundSpec};

/// Errors that can occur while registering behaviors.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The id already has a behavior.
    #[error("duplicate material id: {0}")]
    DuplicateId(u16),
    /// A material with the same name has already been registered.
    #[error("duplicate material name: {0}")]
    DuplicateName(String),
    /// A configured sound name is not in the catalogue.
    #[error("material {material}: {source}")]
    UnknownSound {
        material: String,
        #[source]
        source: SoundError,
    },
    /// A sound's volume or pitch is out of range.
    #[error("material {material}: invalid sound levels (volume {volume}, pitch {pitch})")]
    InvalidSoundLevels {
        material: String,
        volume: f32,
        pitch: f32,
    },
}

struct Entry {
    name: String,
    behavior: Box<dyn BlockBehavior>,
}

static FALLBACK: NoopBehavior = NoopBehavior;

/// Frozen id → behavior table.
pub struct BehaviorRegistry {
    /// Dense array where `index == MaterialId.0`.
    entries: Vec<Option<Entry>>,
    name_to_id: FxHashMap<String, MaterialId>,
}

impl BehaviorRegistry {
    /// Behavior for `id`. Unregistered ids get [`NoopBehavior`].
    pub fn lookup(&self, id: MaterialId) -> &dyn BlockBehavior {
        match self.entries.get(id.0 as usize) {
            Some(Some(entry)) => entry.behavior.as_ref(),
            _ => &FALLBACK,
        }
    }

    /// Returns the id registered under `name`.
    pub fn lookup_by_name(&self, name: &str) -> Option<MaterialId> {
        self.name_to_id.get(name).copied()
    }

    /// Returns the registered name of `id`.
    pub fn name(&self, id: MaterialId) -> Option<&str> {
        match self.entries.get(id.0 as usize) {
            Some(Some(entry)) => Some(entry.name.as_str()),
            _ => None,
        }
    }

    pub fn contains(&self, id: MaterialId) -> bool {
        matches!(self.entries.get(id.0 as usize), Some(Some(_)))
    }

    /// Number of registered materials (including the empty cell).
    pub fn len(&self) -> usize {
        self.name_to_id.len()
    }

    /// Returns `true` if only the empty cell is registered.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl std::fmt::Debug for BehaviorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BehaviorRegistry")
            .field("materials", &self.len())
            .finish()
    }
}

/// Mutable registration stage for a [`BehaviorRegistry`].
pub struct RegistryBuilder {
    entries: Vec<Option<Entry>>,
    name_to_id: FxHashMap<String, MaterialId>,
}

impl RegistryBuilder {
    /// Creates a builder with `air` pre-registered as id 0.
    pub fn new() -> Self {
        let mut name_to_id = FxHashMap::default();
        name_to_id.insert("air".to_string(), MaterialId::EMPTY);
        Self {
            entries: vec![Some(Entry {
                name: "air".to_string(),
                behavior: Box::new(NoopBehavior),
            })],
            name_to_id,
        }
    }

    /// Registers `behavior` for material `id` under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateId`] or [`RegistryError::DuplicateName`]
    /// on collisions, and [`RegistryError::InvalidSoundLevels`] if the
    /// behavior's place sound has a non-finite or out-of-range volume/pitch.
    pub fn register(
        &mut self,
        id: MaterialId,
        name: &str,
        behavior: impl BlockBehavior + 'static,
    ) -> Result<&mut Self, RegistryError> {
        let index = id.0 as usize;
        if matches!(self.entries.get(index), Some(Some(_))) {
            return Err(RegistryError::DuplicateId(id.0));
        }
        if self.name_to_id.contains_key(name) {
            return Err(RegistryError::DuplicateName(name.to_string()));
        }
        let sound = behavior.place_sound();
        if !sound.is_valid() {
            return Err(RegistryError::InvalidSoundLevels {
                material: name.to_string(),
                volume: sound.volume,
                pitch: sound.pitch,
            });
        }

        if self.entries.len() <= index {
            self.entries.resize_with(index + 1, || None);
        }
        self.entries[index] = Some(Entry {
            name: name.to_string(),
            behavior: Box::new(behavior),
        });
        self.name_to_id.insert(name.to_string(), id);
        tracing::debug!(id = id.0, name, "registered block behavior");
        Ok(self)
    }

    /// Registers every data-driven material listed in `config` as a
    /// [`SimpleBlock`]. Sound names are resolved here, so a typo fails startup
    /// instead of a later placement.
    ///
    /// Returns the number of materials registered.
    pub fn register_config(&mut self, config: &PlacementConfig) -> Result<usize, RegistryError> {
        let default_sound = parse_sound("default", &config.default_place_sound)?;
        let default_spec = SoundSpec::with_levels(
            default_sound,
            config.default_place_volume,
            config.default_place_pitch,
        );

        for entry in &config.materials {
            let place_sound = match &entry.place_sound {
                Some(name) => SoundSpec::new(parse_sound(&entry.name, name)?),
                None => default_spec,
            };
            let mut block = SimpleBlock::new().with_place_sound(place_sound);
            if let Some(drops) = &entry.drops {
                block = block.with_drops(
                    drops
                        .iter()
                        .map(|d| {
                            ItemStack::new(MaterialId(d.material), d.amount).with_variant(d.variant)
                        })
                        .collect(),
                );
            }
            self.register(MaterialId(entry.id), &entry.name, block)?;
        }
        Ok(config.materials.len())
    }

    /// Freezes the table.
    pub fn build(self) -> BehaviorRegistry {
        tracing::info!(materials = self.name_to_id.len(), "block registry built");
        BehaviorRegistry {
            entries: self.entries,
            name_to_id: self.name_to_id,
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_sound(material: &str, name: &str) -> Result<Sound, RegistryError> {
    name.parse().map_err(|source| RegistryError::UnknownSound {
        material: material.to_string(),
        source,
    })
}
