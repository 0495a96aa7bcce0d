use rayon::prelude::*;

/// How an operation dispatches its inner loop.
///
/// `Parallel` runs the loop on the rayon global pool and returns only after
/// every worker has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionPolicy {
    #[default]
    Sequential,
    Parallel,
}

impl ExecutionPolicy {
    pub fn for_each<I, F>(self, items: I, op: F)
    where
        I: IntoIterator + IntoParallelIterator<Item = <I as IntoIterator>::Item>,
        F: Fn(<I as IntoIterator>::Item) + Sync + Send,
    {
        match self {
            ExecutionPolicy::Sequential => items.into_iter().for_each(op),
            ExecutionPolicy::Parallel => items.into_par_iter().for_each(op),
        }
    }

    pub fn any<I, F>(self, items: I, predicate: F) -> bool
    where
        I: IntoIterator + IntoParallelIterator<Item = <I as IntoIterator>::Item>,
        F: Fn(<I as IntoIterator>::Item) -> bool + Sync + Send,
    {
        match self {
            ExecutionPolicy::Sequential => items.into_iter().any(predicate),
            ExecutionPolicy::Parallel => items.into_par_iter().any(predicate),
        }
    }

    /// Keeps the input order in both modes.
    pub fn filter_map<I, F, R>(self, items: I, op: F) -> Vec<R>
    where
        I: IntoIterator + IntoParallelIterator<Item = <I as IntoIterator>::Item>,
        F: Fn(<I as IntoIterator>::Item) -> Option<R> + Sync + Send,
        R: Send,
    {
        match self {
            ExecutionPolicy::Sequential => items.into_iter().filter_map(op).collect(),
            ExecutionPolicy::Parallel => items.into_par_iter().filter_map(op).collect(),
        }
    }
}
