//! Table construction settings.

use crate::ownership::{CopyAll, Flags, Mode};
use crate::seed::SeedSource;
use std::marker::PhantomData;

/// Slot count of a freshly constructed table.
pub const DEFAULT_INITIAL_SIZE: usize = 16;

/// Load factor above which an insert doubles the slot array.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.75;

/// Settings for a `ByteTable`. Start from `TableConfig::default()` and
/// chain the `with_*` methods.
///
/// `M` is the ownership mode of the table being configured; it defaults to
/// `CopyAll` and is changed with `with_mode`.
#[derive(Clone, Debug)]
pub struct TableConfig<M = CopyAll> {
    pub(crate) initial_size: usize,
    pub(crate) max_load_factor: f64,
    pub(crate) seed: SeedSource,
    mode: PhantomData<M>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_size: DEFAULT_INITIAL_SIZE,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            seed: SeedSource::Process,
            mode: PhantomData,
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: Mode> TableConfig<M> {
    /// Switches the ownership mode, keeping every other setting.
    pub fn with_mode<N: Mode>(self, _mode: N) -> TableConfig<N> {
        TableConfig {
            initial_size: self.initial_size,
            max_load_factor: self.max_load_factor,
            seed: self.seed,
            mode: PhantomData,
        }
    }

    /// Number of slots allocated up front. Pre-sizing avoids rehash pauses
    /// on insert. Zero is raised to one.
    pub fn with_initial_size(mut self, slots: usize) -> Self {
        self.initial_size = slots.max(1);
        self
    }

    /// Sets the `len / array_size` ratio that triggers growth.
    ///
    /// # Panics
    ///
    /// Panics if `lf` is not a finite number greater than zero.
    pub fn with_max_load_factor(mut self, lf: f64) -> Self {
        assert!(lf.is_finite() && lf > 0.0, "load factor must be > 0");
        self.max_load_factor = lf;
        self
    }

    pub fn with_seed(mut self, seed: impl Into<SeedSource>) -> Self {
        self.seed = seed.into();
        self
    }

    pub fn flags(&self) -> Flags {
        M::FLAGS
    }

    pub fn initial_size(&self) -> usize {
        self.initial_size
    }

    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    pub fn seed(&self) -> &SeedSource {
        &self.seed
    }
}
