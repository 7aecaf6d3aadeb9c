/// Records scene changes as named, undoable steps.
pub trait UndoSystem {
    /// Opens a step; changes until the matching [`commit`](Self::commit) belong to it.
    fn begin(&mut self, name: &str);

    /// Closes the open step.
    fn commit(&mut self);
}

/// Keeps an undo step open for its lifetime.
///
/// The step is committed when the scope is dropped, including on early return.
pub struct UndoScope<'a> {
    undo: &'a mut dyn UndoSystem,
}

impl<'a> UndoScope<'a> {
    /// Begins a step named `name`.
    pub fn new(undo: &'a mut dyn UndoSystem, name: &str) -> Self {
        undo.begin(name);
        Self { undo }
    }
}

impl Drop for UndoScope<'_> {
    fn drop(&mut self) {
        self.undo.commit();
    }
}

/// An undo system that only remembers the names of committed steps.
#[derive(Debug, Default)]
pub struct UndoLog {
    open: Vec<String>,
    committed: Vec<String>,
}

impl UndoLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of committed steps, oldest first.
    #[must_use]
    pub fn committed(&self) -> &[String] {
        &self.committed
    }

    /// Returns `true` while a step is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.open.is_empty()
    }
}

impl UndoSystem for UndoLog {
    fn begin(&mut self, name: &str) {
        self.open.push(name.to_owned());
    }

    fn commit(&mut self) {
        if let Some(name) = self.open.pop() {
            tracing::debug!(step = %name, "undo step committed");
            self.committed.push(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_commits_on_drop() {
        let mut log = UndoLog::new();
        {
            let _scope = UndoScope::new(&mut log, "brushSubtract");
        }
        assert!(!log.is_open());
        assert_eq!(log.committed(), ["brushSubtract"]);
    }

    #[test]
    fn scope_commits_on_early_return() {
        fn run(log: &mut UndoLog, fail: bool) -> Result<(), ()> {
            let _scope = UndoScope::new(log, "brushMerge");
            if fail {
                return Err(());
            }
            Ok(())
        }

        let mut log = UndoLog::new();
        assert!(run(&mut log, true).is_err());
        assert_eq!(log.committed(), ["brushMerge"]);
    }
}
