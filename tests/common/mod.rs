//! Shared helpers for integration tests.

#![allow(dead_code)]

use buckshot::core::Rules;
use buckshot::magazine::{ShellKind, ShellMagazine};
use buckshot::save_manager::MemoryStore;
use buckshot::stage::Session;
use buckshot::table::Table;
use buckshot::ui::testing::ScriptedPresenter;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// A stage-1 table with a hand-loaded magazine.
pub fn table_with(shells: Vec<ShellKind>) -> Table {
    let mut table = Table::new(&Rules::default());
    table.magazine = ShellMagazine::from_shells(shells);
    table
}

pub fn session(
    rules: Rules,
    presenter: ScriptedPresenter,
    seed: u64,
) -> Session<ScriptedPresenter, MemoryStore, StdRng> {
    Session::new(rules, presenter, MemoryStore::new(), rng(seed))
}

/// A unique save path under the system temp dir.
pub fn temp_save_path(tag: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir()
        .join(format!("buckshot-{}-{}-{}", tag, std::process::id(), n))
        .join("save.dat")
}
