/// A type that records the rewrite steps taken by an algorithm.
///
/// [`StepCollector`] is also implemented for the unit type `()`, which throws every step away.
/// Algorithms take a `&mut dyn StepCollector<S>`, so callers that don't care about the steps pay
/// nothing more than a no-op call per step.
pub trait StepCollector<S> {
    /// Records a step.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}
