//! Calculation backends and their process-wide, one-shot initialization.
//!
//! [`TableBackend`] is exact but needs its lookup tables built once per
//! process. Until they are, every query is answered by [`FallbackBackend`],
//! which is always available and never reports a hand as closer to winning
//! than it really is.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;
use std::thread;

use crate::errors::EvalResult;
use crate::shanten::{self, ShantenTables, WORST_SHANTEN};
use crate::tile::TileCounts;

pub trait ShantenBackend: Sync {
    fn name(&self) -> &'static str;

    /// Standard-shape shanten against `len_div3` target sets.
    fn normal_shanten(&self, tiles: &TileCounts, len_div3: u8) -> EvalResult<i8>;

    /// Minimum over the standard and irregular shapes.
    fn shanten(&self, tiles: &TileCounts, len_div3: u8) -> EvalResult<i8> {
        let normal = self.normal_shanten(tiles, len_div3)?;
        Ok(shanten::with_irregular(normal, tiles, len_div3))
    }
}

pub struct TableBackend {
    tables: ShantenTables,
}

impl TableBackend {
    pub fn build() -> Self {
        Self {
            tables: ShantenTables::build(),
        }
    }
}

impl ShantenBackend for TableBackend {
    fn name(&self) -> &'static str {
        "table"
    }

    fn normal_shanten(&self, tiles: &TileCounts, len_div3: u8) -> EvalResult<i8> {
        self.tables.calc_normal(tiles, len_div3)
    }
}

pub struct FallbackBackend;

impl ShantenBackend for FallbackBackend {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn normal_shanten(&self, tiles: &TileCounts, len_div3: u8) -> EvalResult<i8> {
        Ok(shanten::approx_normal(tiles, len_div3))
    }
}

static TABLE_BACKEND: OnceLock<TableBackend> = OnceLock::new();
static INIT_STARTED: AtomicBool = AtomicBool::new(false);
static FALLBACK: FallbackBackend = FallbackBackend;

/// Starts building the lookup tables on a background thread. Returns
/// immediately; only the first call does any work.
pub fn init() {
    if TABLE_BACKEND.get().is_some() {
        return;
    }
    if INIT_STARTED
        .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        .is_err()
    {
        return;
    }

    log::debug!("building shanten tables in the background");
    let spawned = thread::Builder::new()
        .name("shanten-tables".to_string())
        .spawn(|| {
            TABLE_BACKEND.get_or_init(TableBackend::build);
            log::debug!("shanten tables ready");
        });
    if let Err(err) = spawned {
        log::warn!("could not start table build thread: {}", err);
        INIT_STARTED.store(false, Ordering::Release);
    }
}

/// Builds the lookup tables on the calling thread if nobody has yet, and
/// waits for an in-flight build otherwise.
pub fn ensure_init() {
    INIT_STARTED.store(true, Ordering::Release);
    TABLE_BACKEND.get_or_init(TableBackend::build);
}

pub fn is_ready() -> bool {
    TABLE_BACKEND.get().is_some()
}

/// The exact backend once ready, the fallback before that.
pub fn active_backend() -> &'static dyn ShantenBackend {
    init();
    match TABLE_BACKEND.get() {
        Some(backend) => backend,
        None => {
            log::debug!("shanten tables not ready, using {}", FALLBACK.name());
            &FALLBACK
        }
    }
}

pub(crate) fn shanten_of(tiles: &TileCounts, len_div3: u8) -> i8 {
    let backend = active_backend();
    match backend.shanten(tiles, len_div3) {
        Ok(value) => return value,
        Err(err) => log::warn!(
            "{} backend failed, answering with {}: {}",
            backend.name(),
            FALLBACK.name(),
            err
        ),
    }
    FALLBACK.shanten(tiles, len_div3).unwrap_or(WORST_SHANTEN)
}
