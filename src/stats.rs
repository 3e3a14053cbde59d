/// Work counters for a [`Walk`](crate::walker::Walk), updated as it advances.
///
/// Useful for checking how much of a tree an early-stopped walk touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Backend listing calls issued, root included.
    pub listings: usize,

    /// Directory entries encountered (expanded or not).
    pub dirs: usize,

    /// Non-directory entries tested against `spec`.
    pub files: usize,

    /// Entries yielded.
    pub matches: usize,
}

impl WalkStats {
    /// Entries encountered of either kind.
    pub fn entries(&self) -> usize {
        self.dirs + self.files
    }
}
