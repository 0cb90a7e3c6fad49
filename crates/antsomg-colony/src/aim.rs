use crate::ant::{Ant, Trace};

/// Completion rule tested on an ant after each of its steps.
pub trait Aim: Send + Sync {
    fn is_complete(&self, ant: &Ant, start: &Trace) -> bool;
}

/// Complete once every dimension is back at its start vertex.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReturnToStart;

impl Aim for ReturnToStart {
    fn is_complete(&self, ant: &Ant, start: &Trace) -> bool {
        ant.steps() > 0 && ant.current() == start
    }
}

/// Complete after a fixed number of steps.
#[derive(Debug, Clone, Copy)]
pub struct StepLimit(pub usize);

impl Aim for StepLimit {
    fn is_complete(&self, ant: &Ant, _start: &Trace) -> bool {
        ant.steps() >= self.0
    }
}

impl<F> Aim for F
where
    F: Fn(&Ant, &Trace) -> bool + Send + Sync,
{
    fn is_complete(&self, ant: &Ant, start: &Trace) -> bool {
        self(ant, start)
    }
}
