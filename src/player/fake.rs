use anyhow::{bail, Result};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::{PlayerProcess, Spawn};

#[derive(Default)]
struct Log {
    spawned: Vec<PathBuf>,
    alive: Vec<bool>,
    terminated: Vec<usize>,
    fail_next: bool,
}

/// In-memory players for tests. Clones share the same log.
#[derive(Clone, Default)]
pub(crate) struct FakePlayers {
    log: Rc<RefCell<Log>>,
}

impl FakePlayers {
    pub fn spawned(&self) -> Vec<PathBuf> {
        self.log.borrow().spawned.clone()
    }

    pub fn terminated(&self) -> Vec<usize> {
        self.log.borrow().terminated.clone()
    }

    pub fn live_count(&self) -> usize {
        self.log.borrow().alive.iter().filter(|alive| **alive).count()
    }

    /// Make player `id` exit on its own
    pub fn finish(&self, id: usize) {
        self.log.borrow_mut().alive[id] = false;
    }

    pub fn fail_next(&self) {
        self.log.borrow_mut().fail_next = true;
    }
}

pub(crate) struct FakeProcess {
    id: usize,
    log: Rc<RefCell<Log>>,
}

impl PlayerProcess for FakeProcess {
    fn is_running(&mut self) -> bool {
        self.log.borrow().alive[self.id]
    }

    fn terminate(&mut self) {
        let mut log = self.log.borrow_mut();
        log.alive[self.id] = false;
        log.terminated.push(self.id);
    }
}

impl Spawn for FakePlayers {
    type Process = FakeProcess;

    fn spawn(&self, path: &Path) -> Result<FakeProcess> {
        let mut log = self.log.borrow_mut();
        if log.fail_next {
            log.fail_next = false;
            bail!("player not found");
        }

        log.spawned.push(path.to_path_buf());
        log.alive.push(true);
        Ok(FakeProcess {
            id: log.alive.len() - 1,
            log: self.log.clone(),
        })
    }
}
