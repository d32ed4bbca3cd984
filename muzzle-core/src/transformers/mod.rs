// muzzle-core/src/transformers/mod.rs
//! The transformer pipeline: character-level rewrites applied to input text
//! before any matching takes place.
//!
//! A transformer is either *stateless* (a pure codepoint map) or *stateful*
//! (a factory producing a per-pipeline-run state object). A `TransformerSet`
//! instantiates one private state object per stateful transformer at
//! construction time and owns it for its whole lifetime; the matcher resets
//! all stateful instances at the end of every top-level call so state never
//! leaks between independent runs.
//!
//! License: MIT OR APACHE 2.0

pub mod builtin;

use std::fmt;

/// Per-pipeline-run state behind a stateful transformer.
///
/// `transform` maps one codepoint to its replacement, or to `None` to drop
/// it from the stream. `reset` must return the instance to its
/// freshly-constructed state.
pub trait StatefulTransformer {
    fn transform(&mut self, c: char) -> Option<char>;
    fn reset(&mut self);
}

type StatelessFn = Box<dyn Fn(char) -> Option<char> + Send + Sync>;
type StatefulFactory = Box<dyn Fn() -> Box<dyn StatefulTransformer + Send> + Send + Sync>;

/// A single stage of the transformation pipeline.
///
/// The two variants are a closed set: every transformer is either a pure
/// per-codepoint function or a factory for per-run state. Stateful
/// transformers hand their factory over to the `TransformerSet`, which
/// instantiates and exclusively owns the resulting state object.
pub enum Transformer {
    Stateless(StatelessFn),
    Stateful(StatefulFactory),
}

impl Transformer {
    /// Wraps a pure codepoint map. Returning `None` drops the codepoint.
    pub fn stateless(f: impl Fn(char) -> Option<char> + Send + Sync + 'static) -> Self {
        Transformer::Stateless(Box::new(f))
    }

    /// Wraps a factory producing one state object per owning
    /// `TransformerSet`.
    pub fn stateful(
        factory: impl Fn() -> Box<dyn StatefulTransformer + Send> + Send + Sync + 'static,
    ) -> Self {
        Transformer::Stateful(Box::new(factory))
    }
}

impl fmt::Debug for Transformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transformer::Stateless(_) => f.write_str("Transformer::Stateless"),
            Transformer::Stateful(_) => f.write_str("Transformer::Stateful"),
        }
    }
}

enum Instance {
    Stateless(StatelessFn),
    Stateful(Box<dyn StatefulTransformer + Send>),
}

/// An ordered chain of transformer instances.
///
/// Construction consumes the supplied transformers, invoking every stateful
/// factory exactly once; the resulting state objects are private to this
/// set and reused (after `reset_all`) across calls.
pub struct TransformerSet {
    instances: Vec<Instance>,
}

impl TransformerSet {
    pub fn new(transformers: Vec<Transformer>) -> Self {
        let instances = transformers
            .into_iter()
            .map(|transformer| match transformer {
                Transformer::Stateless(f) => Instance::Stateless(f),
                Transformer::Stateful(factory) => Instance::Stateful(factory()),
            })
            .collect();
        Self { instances }
    }

    /// Feeds one codepoint through each transformer in order.
    ///
    /// If any stage drops the codepoint, later stages never see it and the
    /// whole application returns `None`.
    pub fn apply(&mut self, c: char) -> Option<char> {
        let mut current = c;
        for instance in &mut self.instances {
            current = match instance {
                Instance::Stateless(f) => f(current)?,
                Instance::Stateful(state) => state.transform(current)?,
            };
        }
        Some(current)
    }

    /// Resets every stateful instance. Invoked once per top-level matcher
    /// call, after that call completes.
    pub fn reset_all(&mut self) {
        for instance in &mut self.instances {
            if let Instance::Stateful(state) = instance {
                state.reset();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl fmt::Debug for TransformerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformerSet")
            .field("instances", &self.instances.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingDropper {
        seen: usize,
    }

    impl StatefulTransformer for CountingDropper {
        fn transform(&mut self, c: char) -> Option<char> {
            self.seen += 1;
            Some(c)
        }

        fn reset(&mut self) {
            self.seen = 0;
        }
    }

    #[test]
    fn test_empty_set_is_identity() {
        let mut set = TransformerSet::new(Vec::new());
        assert_eq!(set.apply('x'), Some('x'));
    }

    #[test]
    fn test_stages_apply_in_order() {
        let mut set = TransformerSet::new(vec![
            Transformer::stateless(|c| Some(if c == 'a' { 'b' } else { c })),
            Transformer::stateless(|c| Some(if c == 'b' { 'c' } else { c })),
        ]);
        assert_eq!(set.apply('a'), Some('c'));
        assert_eq!(set.apply('x'), Some('x'));
    }

    #[test]
    fn test_drop_short_circuits_later_stages() {
        // The second stage would panic if it ever saw a dropped codepoint.
        let mut set = TransformerSet::new(vec![
            Transformer::stateless(|c| if c == '-' { None } else { Some(c) }),
            Transformer::stateless(|c| {
                assert_ne!(c, '-');
                Some(c)
            }),
        ]);
        assert_eq!(set.apply('-'), None);
        assert_eq!(set.apply('a'), Some('a'));
    }

    #[test]
    fn test_stateful_factory_invoked_once_per_set() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let instantiations = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&instantiations);
        let set = TransformerSet::new(vec![Transformer::stateful(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Box::new(CountingDropper { seen: 0 }) as Box<dyn StatefulTransformer + Send>
        })]);
        drop(set);
        assert_eq!(instantiations.load(Ordering::SeqCst), 1);
    }
}
